//! Logging initialization

fn builder() -> env_logger::Builder {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    );
    builder.format_timestamp_millis();
    builder
}

/// Install `env_logger` with a default filter of `info`.
///
/// Override with the RUST_LOG environment variable.
///
/// # Example
/// ```no_run
/// glade::core::logging::init();
/// log::info!("Collider baked");
/// ```
pub fn init() {
    builder().init();
}

/// Like [`init`], but returns `false` instead of panicking when a logger
/// is already installed (test binaries call this once per test).
pub fn try_init() -> bool {
    builder().try_init().is_ok()
}
