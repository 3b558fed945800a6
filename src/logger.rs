use log::LevelFilter;

/// Route `log` records to stderr, filtered at `level`.
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}
