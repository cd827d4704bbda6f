use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Everything that can go wrong between `std::env::args` and a typed value.
#[derive(Debug, PartialEq)]
pub enum ArgError {
    Unknown(String),
    Stray(String),
    Missing(&'static str),
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
    Rejected {
        name: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for ArgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgError::Unknown(name) => write!(f, "unknown argument --{}", name.replace('_', "-")),
            ArgError::Stray(value) => write!(f, "unexpected positional argument {:?}", value),
            ArgError::Missing(name) => write!(f, "missing required argument --{}", name.replace('_', "-")),
            ArgError::Invalid { name, value, reason } => {
                write!(f, "bad value {:?} for --{}: {}", value, name.replace('_', "-"), reason)
            }
            ArgError::Rejected { name, reason } => write!(f, "--{}: {}", name.replace('_', "-"), reason),
        }
    }
}

impl std::error::Error for ArgError {}

/// One declared argument, as shown by `--help`.
pub struct Param {
    pub name: &'static str,
    pub ty: &'static str,
    pub default: Option<&'static str>,
}

/// Raw `--name value` pairs waiting to be claimed by a program's declarations.
///
/// Names are normalised so `--min-count` and `--min_count` are the same
/// argument. A flag with no value after it reads as `"true"`.
#[derive(Debug, Default)]
pub struct Args {
    values: HashMap<String, String>,
    stray: Vec<String>,
    help: bool,
    verbose: bool,
}

impl Args {
    pub fn from_env() -> Args {
        Args::parse(std::env::args().skip(1))
    }

    pub fn parse<I, S>(raw: I) -> Args
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = Args::default();
        let mut raw = raw.into_iter().map(Into::into).peekable();
        while let Some(arg) = raw.next() {
            let flag = match arg.strip_prefix("--") {
                Some(flag) => flag,
                None => {
                    args.stray.push(arg);
                    continue;
                }
            };
            let (name, value) = match flag.split_once('=') {
                Some((name, value)) => (name.replace('-', "_"), Some(value.to_string())),
                None => (flag.replace('-', "_"), None),
            };
            match name.as_str() {
                "help" => args.help = true,
                "verbose" => args.verbose = true,
                _ => {
                    let value = value.or_else(|| match raw.peek() {
                        Some(next) if !next.starts_with("--") => raw.next(),
                        _ => None,
                    });
                    args.values.insert(name, value.unwrap_or_else(|| "true".to_string()));
                }
            }
        }
        args
    }

    pub fn help(&self) -> bool {
        self.help
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn optional<T>(&mut self, name: &'static str) -> Result<Option<T>, ArgError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        match self.values.remove(name) {
            None => Ok(None),
            Some(value) => value.parse::<T>().map(Some).map_err(|e| ArgError::Invalid {
                name,
                reason: e.to_string(),
                value,
            }),
        }
    }

    pub fn required<T>(&mut self, name: &'static str) -> Result<T, ArgError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.optional(name)?.ok_or(ArgError::Missing(name))
    }

    /// Anything not claimed by now was never declared.
    pub fn finish(self) -> Result<(), ArgError> {
        if let Some(value) = self.stray.into_iter().next() {
            return Err(ArgError::Stray(value));
        }
        match self.values.into_keys().min() {
            Some(name) => Err(ArgError::Unknown(name)),
            None => Ok(()),
        }
    }
}

pub fn usage(program: &str, params: &[Param]) -> String {
    let mut out = format!("usage: {}", program);
    params.iter().for_each(|p| {
        let flag = p.name.replace('_', "-");
        match p.default {
            Some(_) => out.push_str(&format!(" [--{} <{}>]", flag, p.ty)),
            None => out.push_str(&format!(" --{} <{}>", flag, p.ty)),
        }
    });
    out.push_str(" [--verbose] [--help]\n");
    params.iter().filter(|p| p.default.is_some()).for_each(|p| {
        out.push_str(&format!(
            "    --{:<16} default {}\n",
            p.name.replace('_', "-"),
            p.default.unwrap_or_default()
        ));
    });
    out
}

#[test]
fn test_parse_values_and_flags() {
    let mut args = Args::parse(["--min-count", "3", "--sep=,", "--lowercase", "--verbose"]);
    assert!(args.verbose());
    assert!(!args.help());
    assert_eq!(args.required::<usize>("min_count"), Ok(3));
    assert_eq!(args.required::<String>("sep"), Ok(",".to_string()));
    assert_eq!(args.optional::<bool>("lowercase"), Ok(Some(true)));
    assert_eq!(args.optional::<bool>("absent"), Ok(None));
    assert_eq!(args.finish(), Ok(()));
}

#[test]
fn test_negative_numbers_are_values() {
    let mut args = Args::parse(["--x", "-3.5"]);
    assert_eq!(args.required::<f64>("x"), Ok(-3.5));
    assert_eq!(args.finish(), Ok(()));
}

#[test]
fn test_errors() {
    let mut args = Args::parse(["--y", "one"]);
    match args.required::<i64>("y") {
        Err(ArgError::Invalid { name, value, .. }) => {
            assert_eq!(name, "y");
            assert_eq!(value, "one");
        }
        other => panic!("expected an invalid value, got {:?}", other),
    }
    assert_eq!(args.required::<i64>("y"), Err(ArgError::Missing("y")));

    let args = Args::parse(["--nope", "1"]);
    assert_eq!(args.finish(), Err(ArgError::Unknown("nope".to_string())));

    let args = Args::parse(["file.txt"]);
    assert_eq!(args.finish(), Err(ArgError::Stray("file.txt".to_string())));
}

#[test]
fn test_usage() {
    let text = usage(
        "point",
        &[
            Param { name: "x", ty: "f64", default: Some("3.0") },
            Param { name: "input_dir", ty: "String", default: None },
        ],
    );
    assert!(text.starts_with("usage: point [--x <f64>] --input-dir <String> [--verbose] [--help]\n"));
    assert!(text.contains("--x"));
    assert!(text.contains("default 3.0"));
}
