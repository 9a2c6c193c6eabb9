use log::{info, LevelFilter};
use std::env;

pub const UI_NAMESPACE: &str = "ringclock::ui";
pub const CLOCK_NAMESPACE: &str = "ringclock::clock";
pub const SETTINGS_NAMESPACE: &str = "ringclock::settings";

pub fn init_logging() {
    // Set default log level if not specified in environment
    if env::var("RUST_LOG").is_err() {
        unsafe {
            env::set_var("RUST_LOG", "info");
        }
    }

    // Configure env_logger
    env_logger::Builder::from_env(env_logger::Env::default())
        .format_timestamp_millis()
        .format_module_path(true)
        .format_target(true)
        .filter(Some(UI_NAMESPACE), LevelFilter::Debug)
        .filter(Some(CLOCK_NAMESPACE), LevelFilter::Debug)
        .filter(Some(SETTINGS_NAMESPACE), LevelFilter::Debug)
        .init();

    info!("Logging initialized");
}

// Convenience macros for each namespace
#[macro_export]
macro_rules! ui_log {
    ($($arg:tt)*) => {
        log::log!(target: $crate::logging::UI_NAMESPACE, $($arg)*)
    };
}

#[macro_export]
macro_rules! clock_log {
    ($($arg:tt)*) => {
        log::log!(target: $crate::logging::CLOCK_NAMESPACE, $($arg)*)
    };
}

#[macro_export]
macro_rules! settings_log {
    ($($arg:tt)*) => {
        log::log!(target: $crate::logging::SETTINGS_NAMESPACE, $($arg)*)
    };
}
