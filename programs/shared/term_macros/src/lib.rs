//! Bits every program in the workspace needs: typed command line arguments
//! via [`tool!`], stdin chunking and a stderr logger.
//!
//! ```ignore
//! use term_macros::*;
//!
//! fn main() {
//!     tool! {
//!         args:
//!             - input_dir: String;
//!                 ? !std::path::Path::new(&input_dir).exists()
//!                 => "the path you entered for input_dir doesn't exist"
//!             - concurrency: usize = 4;
//!         ;
//!
//!         body: || -> std::io::Result<()> {
//!             log::debug!("{} workers on {}", concurrency, input_dir);
//!             Ok(())
//!         }
//!     }
//! }
//! ```

mod args;
mod logger;
mod stdin;

pub use args::{usage, ArgError, Args, Param};
pub use log;
pub use logger::init_logger;
pub use stdin::{for_each_batch, for_each_chunk, Utf8Carry};

use std::error::Error;
use std::fmt;

/// What a `tool!` body may evaluate to.
pub trait Outcome {
    fn into_result(self) -> Result<(), Box<dyn Error>>;
}

impl Outcome for () {
    fn into_result(self) -> Result<(), Box<dyn Error>> {
        Ok(())
    }
}

impl<E> Outcome for Result<(), E>
where
    E: Into<Box<dyn Error>>,
{
    fn into_result(self) -> Result<(), Box<dyn Error>> {
        self.map_err(Into::into)
    }
}

pub fn exit_with<E: fmt::Display + ?Sized>(code: i32, err: &E) -> ! {
    log::error!("{}", err);
    std::process::exit(code)
}

/// Declares a program's arguments, binds each one as a local of its
/// declared type and runs `body`.
///
/// Argument problems exit with status 2, a body error with status 1.
/// `--help` and `--verbose` are always available.
#[macro_export]
macro_rules! tool {
    (
        args:
            $( - $name:ident : $ty:ty $(= $default:expr)? ; $(? $cond:expr => $msg:literal)? )*
        ;

        body: || $(-> $ret:ty)? $body:block
    ) => {{
        #[allow(unused_mut)]
        let mut __args = $crate::Args::from_env();
        $crate::init_logger(if __args.verbose() {
            $crate::log::LevelFilter::Debug
        } else {
            $crate::log::LevelFilter::Warn
        });
        if __args.help() {
            eprint!("{}", $crate::usage(env!("CARGO_PKG_NAME"), &[$(
                $crate::Param {
                    name: stringify!($name),
                    ty: stringify!($ty),
                    default: $crate::__default_text!($($default)?),
                }
            ),*]));
            return;
        }
        $(
            let $name: $ty = match $crate::__take_arg!(__args, $name, $ty $(, $default)?) {
                Ok(value) => value,
                Err(err) => $crate::exit_with(2, &err),
            };
            $(
                if $cond {
                    $crate::exit_with(2, &$crate::ArgError::Rejected {
                        name: stringify!($name),
                        reason: $msg,
                    });
                }
            )?
        )*
        if let Err(err) = __args.finish() {
            $crate::exit_with(2, &err);
        }
        if let Err(err) = $crate::__run_body!($(-> $ret)? $body) {
            $crate::exit_with(1, &*err);
        }
    }};
}

/// Reads stdin to the end, a batch at a time, handing each batch to the
/// closure with a buffered stdout writer in scope. Batches are raw bytes
/// for `|line: &[u8]|` or decoded text for `|chunk: &str|`.
///
/// Evaluates to `io::Result` of the flushed writer, so output can carry on
/// after the input is done. Give a reader and a writer up front to read
/// from somewhere other than stdin.
#[macro_export]
macro_rules! readin {
    ($writer:ident, |$chunk:ident : &[u8]| $body:expr) => {
        $crate::readin!(::std::io::stdin().lock(), ::std::io::stdout().lock(), $writer, |$chunk: &[u8]| $body)
    };
    ($writer:ident, |$chunk:ident : &str| $body:expr) => {
        $crate::readin!(::std::io::stdin().lock(), ::std::io::stdout().lock(), $writer, |$chunk: &str| $body)
    };
    ($reader:expr, $out:expr, $writer:ident, |$chunk:ident : &[u8]| $body:expr) => {{
        #[allow(unused_mut)]
        let mut $writer = ::std::io::BufWriter::new($out);
        $crate::for_each_batch($reader, |$chunk: &[u8]| {
            $body;
        })
        .and_then(|_| ::std::io::Write::flush(&mut $writer))
        .map(|_| $writer)
    }};
    ($reader:expr, $out:expr, $writer:ident, |$chunk:ident : &str| $body:expr) => {{
        #[allow(unused_mut)]
        let mut $writer = ::std::io::BufWriter::new($out);
        $crate::for_each_chunk($reader, |$chunk: &str| {
            $body;
        })
        .and_then(|_| ::std::io::Write::flush(&mut $writer))
        .map(|_| $writer)
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __run_body {
    ($(-> $ret:ty)? $body:block) => {
        $crate::Outcome::into_result((|| $(-> $ret)? { $body })())
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __take_arg {
    ($args:ident, $name:ident, $ty:ty) => {
        $args.required::<$ty>(stringify!($name))
    };
    ($args:ident, $name:ident, $ty:ty, $default:expr) => {
        $args
            .optional::<$ty>(stringify!($name))
            .map(|value| value.unwrap_or_else(|| $default))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __default_text {
    () => {
        None
    };
    ($default:expr) => {
        Some(stringify!($default))
    };
}

#[test]
fn test_outcomes() {
    assert!(().into_result().is_ok());
    assert!(Ok::<(), std::io::Error>(()).into_result().is_ok());
    let err = Err::<(), String>("overflow".to_string()).into_result().unwrap_err();
    assert_eq!(err.to_string(), "overflow");
}

#[test]
fn test_take_arg_defaults() {
    let mut __args = Args::parse(["--y", "7"]);
    let y: i64 = __take_arg!(__args, y, i64, 1).unwrap();
    let x: f64 = __take_arg!(__args, x, f64, 3.0).unwrap();
    assert_eq!((x, y), (3.0, 7));
    assert_eq!(__take_arg!(__args, z, String), Err(ArgError::Missing("z")));
    assert_eq!(__default_text!(3.0), Some("3.0"));
    assert_eq!(__default_text!(), None::<&str>);
}

#[test]
fn test_typed_body_can_use_question_mark() {
    let parsed = __run_body!(-> Result<(), std::num::ParseIntError> {
        let n: u32 = "12".parse()?;
        assert_eq!(n, 12);
        Ok(())
    });
    assert!(parsed.is_ok());

    let failed = __run_body!(-> std::io::Result<()> {
        std::fs::File::open("/definitely/not/here")?;
        Ok(())
    });
    assert!(failed.is_err());

    let mut ran = false;
    let plain = __run_body!({
        ran = true;
    });
    assert!(plain.is_ok());
    assert!(ran);
}

#[test]
fn test_readin_text_and_bytes() {
    use std::io::Write;

    let mut seen = String::new();
    let wtr = readin!("a\nb\n".as_bytes(), Vec::new(), wtr, |chunk: &str| {
        seen.push_str(chunk);
        let _ = wtr.write_all(chunk.to_uppercase().as_bytes());
    })
    .unwrap();
    assert_eq!(seen, "a\nb\n");
    assert_eq!(wtr.get_ref().as_slice(), b"A\nB\n");

    let mut lines = 0;
    let mut wtr = readin!("x\ny\n".as_bytes(), Vec::new(), wtr, |line: &[u8]| {
        lines += line.iter().filter(|b| **b == b'\n').count();
    })
    .unwrap();
    writeln!(wtr, "{}", lines).unwrap();
    wtr.flush().unwrap();
    assert_eq!(wtr.get_ref().as_slice(), b"2\n");
}
