use log::LevelFilter;

/// Install the stderr logger.
///
/// `warn` by default, `debug` with `--debug`; `RUST_LOG` overrides both.
pub(crate) fn init_logging(debug: bool) {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}
