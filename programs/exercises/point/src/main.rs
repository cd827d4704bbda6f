use term_macros::*;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Point {
    x: f64,
    y: f64,
}

impl Point {
    fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Distance from the origin.
    fn distance(&self) -> f64 {
        (self.x.powi(2) + self.y.powi(2)).sqrt()
    }
}

fn main() {
    tool! {
        args:
            - x: f64 = 3.0;
                ? !x.is_finite()
                => "needs to be a finite number"
            - y: f64 = 4.0;
                ? !y.is_finite()
                => "needs to be a finite number"
        ;

        body: || {
            let point = Point::new(x, y);
            log::debug!("{:?}", point);
            println!("{}", point.distance());
        }
    }
}

#[test]
fn test_distance() {
    assert_eq!(Point::new(3.0, 4.0).distance(), 5.0);
    assert_eq!(Point::new(0.0, 0.0).distance(), 0.0);
    assert_eq!(Point::new(-5.0, 12.0).distance(), 13.0);
    assert_eq!(format!("{}", Point::new(3.0, 4.0).distance()), "5");
    assert!((Point::new(1.0, 1.0).distance() - std::f64::consts::SQRT_2).abs() < 1e-12);
}
