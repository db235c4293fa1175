// Conditional logging macros - only active in debug builds

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

use env_logger::{Builder, Env, Target};
use log::LevelFilter;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

const LOG_FILE_NAME: &str = "evil-hangman.log";

/// Location of the log file used while the terminal UI owns the screen.
pub fn log_file_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("evil-hangman").join(LOG_FILE_NAME))
}

/// Installs the global logger. `RUST_LOG` still overrides the level picked here.
///
/// With `to_file` set, records go to [`log_file_path`] instead of stderr; if no
/// cache directory exists logging stays off.
pub fn init_logging(verbose: bool, to_file: bool) -> io::Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_level));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} [{}] {}: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    if to_file {
        let Some(path) = log_file_path() else {
            builder.filter_level(LevelFilter::Off);
            let _ = builder.try_init();
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        builder.target(Target::Pipe(Box::new(file)));
    } else {
        builder.target(Target::Stderr);
    }

    // A logger may already be installed when running under a test harness.
    let _ = builder.try_init();
    Ok(())
}
