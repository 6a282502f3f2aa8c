use std::{
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, RwLock},
    time::{Duration, Instant},
};

use log::{Log, Metadata, Record};

static LOGGER: OnceLock<AppLogger> = OnceLock::new();

pub fn get_logger() -> &'static AppLogger {
    // default configuration
    const DEFAULT_DECAY: Duration = Duration::from_secs(5);
    const DEFAULT_MAX_VISIBLE: usize = 4;

    LOGGER.get_or_init(|| AppLogger::new(log::Level::Warn, DEFAULT_DECAY, DEFAULT_MAX_VISIBLE))
}

pub fn init() {
    if log::set_logger(get_logger()).is_ok() {
        log::set_max_level(log::LevelFilter::Trace);
    }
}

#[derive(Debug, Clone)]
pub struct Message {
    pub level: log::Level,
    pub pushed: Instant,
    pub message: String,
    pub source: String,
}

struct Logs {
    logs: [Vec<Message>; 5], // there are 5 levels
}

impl Logs {
    fn push(&mut self, message: Message) {
        self.logs[message.level as usize - 1].insert(0, message);
    }

    fn clear_old(&mut self, decay: Duration) {
        let now = Instant::now();
        for level in self.logs.iter_mut() {
            level.retain(|msg| now.duration_since(msg.pushed) < decay);
        }
    }
}

/// Keeps recent log messages in memory so they can be drawn under the maze.
pub struct AppLogger {
    min_level: Arc<RwLock<log::Level>>,
    pub decay: Duration,
    pub max_visible: usize,
    logs: Arc<Mutex<Logs>>,
}

impl AppLogger {
    fn new(min_level: log::Level, decay: Duration, max_visible: usize) -> Self {
        Self {
            min_level: Arc::new(RwLock::new(min_level)),
            decay,
            max_visible,
            logs: Arc::new(Mutex::new(Logs {
                logs: Default::default(),
            })),
        }
    }

    pub fn min_level(&self) -> log::Level {
        *self.min_level.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_min_level(&self, level: log::Level) {
        *self.min_level.write().unwrap_or_else(PoisonError::into_inner) = level;
    }

    fn borrow_mut_logs(&self) -> MutexGuard<Logs> {
        // a poisoned lock only means a panic mid-push, the queues are still usable
        self.logs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Messages younger than the decay time, most severe first, newest first within a level.
    pub fn recent(&self) -> Vec<Message> {
        let mut logs = self.borrow_mut_logs();
        logs.clear_old(self.decay);

        logs.logs
            .iter()
            .flatten()
            .take(self.max_visible)
            .cloned()
            .collect()
    }

    pub fn switch_debug(&self) {
        if self.min_level() == log::Level::Debug {
            self.set_min_level(log::Level::Warn);
        } else {
            self.set_min_level(log::Level::Debug);
        }
    }
}

impl Log for AppLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.min_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.borrow_mut_logs().push(Message {
                level: record.level(),
                pushed: Instant::now(),
                message: record.args().to_string(),
                source: record.module_path().unwrap_or("unknown").to_string(),
            });
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(level: log::Level, message: &str) -> Message {
        Message {
            level,
            pushed: Instant::now(),
            message: message.to_string(),
            source: "test".to_string(),
        }
    }

    #[test]
    fn filters_by_level() {
        let logger = AppLogger::new(log::Level::Warn, Duration::from_secs(60), 10);
        logger.log(
            &Record::builder()
                .level(log::Level::Info)
                .args(format_args!("hidden"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(log::Level::Error)
                .args(format_args!("shown"))
                .build(),
        );

        let recent = logger.recent();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].message, "shown");

        logger.switch_debug();
        assert_eq!(logger.min_level(), log::Level::Debug);
        logger.switch_debug();
        assert_eq!(logger.min_level(), log::Level::Warn);
    }

    #[test]
    fn severity_order_and_limit() {
        let logger = AppLogger::new(log::Level::Trace, Duration::from_secs(60), 2);
        {
            let mut logs = logger.borrow_mut_logs();
            logs.push(record(log::Level::Info, "info"));
            logs.push(record(log::Level::Error, "error"));
            logs.push(record(log::Level::Warn, "warn"));
        }

        let recent: Vec<_> = logger.recent().into_iter().map(|m| m.message).collect();
        assert_eq!(recent, vec!["error", "warn"]);
    }

    #[test]
    fn old_messages_decay() {
        let logger = AppLogger::new(log::Level::Trace, Duration::ZERO, 5);
        logger.borrow_mut_logs().push(record(log::Level::Error, "gone"));
        assert!(logger.recent().is_empty());
    }
}
