use std::io::Write;
use std::process::{Command, Output, Stdio};

fn run(args: &[&str], input: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_charfreq"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("couldn't start charfreq");
    // the child may exit before reading anything, e.g. on a bad flag
    let _ = child.stdin.take().expect("stdin was piped").write_all(input);
    child.wait_with_output().expect("charfreq didn't finish")
}

#[test]
fn test_hello_world_from_stdin() {
    let out = run(&[], b"Hello,\nWorld!\n");
    assert!(out.status.success());
    let text = String::from_utf8(out.stdout).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 9);
    assert_eq!(lines[0], format!("L: {} 25.00%", "#".repeat(25)));
    assert_eq!(lines[1], format!("O: {} 16.67%", "#".repeat(17)));
    assert_eq!(lines[2], format!("!: {} 8.33%", "#".repeat(8)));
    assert_eq!(lines[8], format!("W: {} 8.33%", "#".repeat(8)));
    assert!(text.ends_with("8.33%\n"));
}

#[test]
fn test_empty_input_prints_an_empty_line() {
    let out = run(&[], b"  \n\t\n");
    assert!(out.status.success());
    assert_eq!(out.stdout, b"\n");
}

#[test]
fn test_multibyte_input() {
    let out = run(&[], "ää ö".as_bytes());
    assert!(out.status.success());
    let text = String::from_utf8(out.stdout).unwrap();
    assert_eq!(
        text,
        format!("Ä: {} 66.67%\nÖ: {} 33.33%\n", "#".repeat(67), "#".repeat(33))
    );
}

#[test]
fn test_unknown_flag_is_rejected() {
    let out = run(&["--top", "5"], b"abc");
    assert_eq!(out.status.code(), Some(2));
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("--top"));
}

#[test]
fn test_leading_byte_order_mark_is_not_counted() {
    let out = run(&[], "\u{FEFF}ab\n".as_bytes());
    assert!(out.status.success());
    let text = String::from_utf8(out.stdout).unwrap();
    assert_eq!(
        text,
        format!("A: {} 50.00%\nB: {} 50.00%\n", "#".repeat(50), "#".repeat(50))
    );
}
