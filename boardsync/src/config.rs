//! Runtime configuration for boardsync.
//!
//! Every value has a compile-time default and can be overridden via a
//! dedicated environment variable. Command-line flags take precedence over
//! both where they exist.

use std::path::PathBuf;

use board_sync::BoardConfig;

/// Default directory for the daily rolling log file.
const DEFAULT_LOG_DIR: &str = "logs";

/// Default number of queued board commands.
const DEFAULT_COMMAND_CAPACITY: usize = 32;

/// Default number of buffered board events per subscriber.
const DEFAULT_EVENT_CAPACITY: usize = 100;

/// Get the log directory.
///
/// Priority:
/// 1. `BOARDSYNC_LOG_DIR` env variable if set
/// 2. `./logs` as fallback
pub fn get_log_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("BOARDSYNC_LOG_DIR") {
        return PathBuf::from(dir);
    }

    PathBuf::from(DEFAULT_LOG_DIR)
}

/// Get the board command queue size.
///
/// Priority:
/// 1. `BOARDSYNC_COMMAND_CAPACITY` env variable if set to a positive integer
/// 2. `32` as fallback
pub fn get_command_capacity() -> usize {
    read_capacity("BOARDSYNC_COMMAND_CAPACITY", DEFAULT_COMMAND_CAPACITY)
}

/// Get the board event buffer size.
///
/// Priority:
/// 1. `BOARDSYNC_EVENT_CAPACITY` env variable if set to a positive integer
/// 2. `100` as fallback
pub fn get_event_capacity() -> usize {
    read_capacity("BOARDSYNC_EVENT_CAPACITY", DEFAULT_EVENT_CAPACITY)
}

pub fn board_config() -> BoardConfig {
    BoardConfig {
        command_capacity: get_command_capacity(),
        event_capacity: get_event_capacity(),
    }
}

fn read_capacity(var: &str, default: usize) -> usize {
    std::env::var(var)
        .ok()
        .and_then(|v| parse_capacity(&v))
        .unwrap_or(default)
}

fn parse_capacity(value: &str) -> Option<usize> {
    value.trim().parse().ok().filter(|&n| n > 0)
}
