//! Logger setup for applications embedding the core.
//!
//! Library code only uses the `log` macros; the host decides whether to
//! install a logger. `init` installs `env_logger`, filtered by `RUST_LOG`
//! with `info` as the default level.

use log::LevelFilter;

/// Install the logger. Calling it again is harmless.
pub fn init() {
    let _ = env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .try_init();
}

/// Logger for unit tests: output is captured per test.
#[cfg(test)]
pub(crate) fn init_test() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(LevelFilter::Debug)
        .try_init();
}
