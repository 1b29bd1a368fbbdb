// Injected logging capability.
// Components receive a Logger at construction instead of reaching for a global.

use std::fmt;

pub use log::Level;

/// Sink for diagnostic messages emitted by the cache and transport.
pub trait Logger: Send + Sync {
    fn log(&self, level: Level, args: fmt::Arguments<'_>);

    fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, args);
    }

    fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Info, args);
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Warn, args);
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Error, args);
    }
}

/// Discards everything. Default for library use and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _level: Level, _args: fmt::Arguments<'_>) {}
}

/// Forwards to the `log` facade under the `repocache` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFacade;

impl Logger for LogFacade {
    fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        log::log!(target: "repocache", level, "{}", args);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Keeps every message in memory for assertions.
    #[derive(Debug, Default)]
    pub struct RecordingLogger {
        pub records: Mutex<Vec<(Level, String)>>,
    }

    impl RecordingLogger {
        pub fn messages(&self, level: Level) -> Vec<String> {
            self.records
                .lock()
                .unwrap()
                .iter()
                .filter(|(l, _)| *l == level)
                .map(|(_, m)| m.clone())
                .collect()
        }
    }

    impl Logger for RecordingLogger {
        fn log(&self, level: Level, args: fmt::Arguments<'_>) {
            self.records.lock().unwrap().push((level, args.to_string()));
        }
    }
}
