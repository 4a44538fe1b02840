use std::io::Write;

use log::{Level, LevelFilter, Log, Metadata, Record};

///Writes records to stderr, prefixed with their level and module.
struct StderrLogger {
    level: LevelFilter,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
	metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
	if !self.enabled(record.metadata()) {
	    return;
	}

	let module = record.module_path().unwrap_or_default();
	let level = match record.level() {
	    Level::Error => "error",
	    Level::Warn => "warning",
	    Level::Info => "info",
	    Level::Debug => "debug",
	    Level::Trace => "trace",
	};

	let mut stderr = std::io::stderr().lock();
	writeln!(stderr, "{}[{}]: {}", level, module, record.args()).ok();
    }

    fn flush(&self) {
	std::io::stderr().flush().ok();
    }
}

///Warnings are always shown, `verbose` adds debug records and a second one
///trace records.
pub fn init(verbose: u8) {
    let level = match verbose {
	0 => LevelFilter::Warn,
	1 => LevelFilter::Debug,
	_ => LevelFilter::Trace,
    };

    let logger = Box::new(StderrLogger { level });
    if log::set_boxed_logger(logger).is_ok() {
	log::set_max_level(level);
    }
}
