use log::{Level, LevelFilter, Log, Metadata, Record};
use owo_colors::OwoColorize;
use std::io::{IsTerminal, Write};

// stdout belongs to the program's output, so everything goes to stderr
struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let stderr = std::io::stderr();
        let colour = stderr.is_terminal();
        let mut lock = stderr.lock();
        let _ = writeln!(lock, "{} {}", tag(record.level(), colour), record.args());
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn tag(level: Level, colour: bool) -> String {
    let name = level.to_string().to_lowercase();
    if !colour {
        return format!("{}:", name);
    }
    match level {
        Level::Error => format!("{}:", name.red().bold()),
        Level::Warn => format!("{}:", name.yellow().bold()),
        Level::Info => format!("{}:", name.green()),
        Level::Debug => format!("{}:", name.blue()),
        Level::Trace => format!("{}:", name.dimmed()),
    }
}

/// Installs the stderr logger. Calling it again only changes the level.
pub fn init_logger(level: LevelFilter) {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

#[test]
fn test_plain_tags() {
    assert_eq!(tag(Level::Error, false), "error:");
    assert_eq!(tag(Level::Warn, false), "warn:");
    assert_eq!(tag(Level::Debug, false), "debug:");
}

#[test]
fn test_coloured_tags_keep_the_name() {
    let coloured = tag(Level::Warn, true);
    assert!(coloured.contains("warn"));
    assert_ne!(coloured, "warn:");
}
