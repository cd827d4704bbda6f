use term_macros::*;

fn plus1(x: i64) -> Option<i64> {
    x.checked_add(1)
}

fn main() {
    tool! {
        args:
            - y: i64 = 1;
        ;

        body: || -> Result<(), String> {
            let arrow_plus1 = |x: i64| x.checked_add(1);

            let overflow = || format!("{} + 1 doesn't fit in an i64", y);
            println!("{}", plus1(y).ok_or_else(overflow)?);
            println!("{}", arrow_plus1(y).ok_or_else(overflow)?);
            Ok(())
        }
    }
}

#[test]
fn test_plus1() {
    assert_eq!(plus1(1), Some(2));
    assert_eq!(plus1(-1), Some(0));
    assert_eq!(plus1(i64::MAX), None);
}
