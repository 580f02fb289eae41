//! Event and log callback system.
//!
//! The host (the reading surface embedding this crate) registers callbacks
//! to observe what the core does: the [`Reader`](crate::Reader) emits one
//! event per caller-facing operation, and internals log at
//! [`LogLevel::Debug`]. With no callback registered both are no-ops.

use std::sync::{Mutex, OnceLock};

/// Log level for debug callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Event names emitted by [`Reader`](crate::Reader).
pub mod names {
    /// A document tree was loaded; data is the leaf count.
    pub const LOAD: &str = "load";
    /// The visible range changed; data is the container node.
    pub const RELOCATE: &str = "relocate";
    /// Highlighting ran; data is the `term=count` frequency list.
    pub const HIGHLIGHT: &str = "highlight";
    /// A term was unhighlighted; data is `term=removed`.
    pub const UNHIGHLIGHT: &str = "unhighlight";
    /// A word was resolved at a point; data is the word.
    pub const WORD: &str = "word";
    /// Clicked-word markers were cleared; data is how many.
    pub const CLEAR_CLICKED: &str = "clear-clicked";
}

type EventCallback = Box<dyn Fn(&str, &str) + Send + Sync + 'static>;
type LogCallback = Box<dyn Fn(LogLevel, &str) + Send + Sync + 'static>;

fn event_callback() -> &'static Mutex<Option<EventCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<EventCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

fn log_callback() -> &'static Mutex<Option<LogCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<LogCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

/// Set the global event callback.
pub fn set_event_callback<F>(callback: F)
where
    F: Fn(&str, &str) + Send + Sync + 'static,
{
    if let Ok(mut guard) = event_callback().lock() {
        *guard = Some(Box::new(callback));
    }
}

/// Remove the global event callback.
pub fn clear_event_callback() {
    if let Ok(mut guard) = event_callback().lock() {
        *guard = None;
    }
}

/// Emit an event to the registered callback.
pub fn emit_event(name: &str, data: &str) {
    if let Ok(guard) = event_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(name, data);
        }
    }
}

/// Set the global log callback.
pub fn set_log_callback<F>(callback: F)
where
    F: Fn(LogLevel, &str) + Send + Sync + 'static,
{
    if let Ok(mut guard) = log_callback().lock() {
        *guard = Some(Box::new(callback));
    }
}

/// Remove the global log callback.
pub fn clear_log_callback() {
    if let Ok(mut guard) = log_callback().lock() {
        *guard = None;
    }
}

/// Emit a log event.
pub fn emit_log(level: LogLevel, message: &str) {
    if let Ok(guard) = log_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(level, message);
        }
    }
}

/// Emit a log event, formatting the message only when a callback is set.
pub(crate) fn emit_log_with(level: LogLevel, message: impl FnOnce() -> String) {
    if let Ok(guard) = log_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(level, &message());
        }
    }
}
