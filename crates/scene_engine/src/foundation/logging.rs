//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// Honours `RUST_LOG`. Calling this more than once is harmless.
pub fn init() {
    let _ = env_logger::try_init();
}

/// Initialize the logging system with a fallback filter used when `RUST_LOG` is unset
pub fn init_with_filter(default_filter: &str) {
    let env = env_logger::Env::default().default_filter_or(default_filter);
    let _ = env_logger::Builder::from_env(env).try_init();
}
