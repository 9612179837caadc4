//! `tracing` subscriber setup for binaries and demos.

use tracing_subscriber::EnvFilter;

/// Install a formatted subscriber filtered by `RUST_LOG`, falling back to
/// `info`.
///
/// Safe to call more than once; only the first call installs anything.
pub fn init() {
    init_with_default("info");
}

/// Like [`init`], with an explicit fallback directive such as
/// `"glkit_window=debug,info"`.
pub fn init_with_default(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!("logging initialised");
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn repeated_init_does_not_panic() {
        super::init();
        super::init_with_default("debug");
    }
}
