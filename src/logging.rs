use std::path::Path;

use anyhow::{Context, Result};
use log::LevelFilter;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

/// Log file used by the terminal viewer when no log4rs config is given.
pub const DEFAULT_LOG_FILE: &str = "swiftdocs.log";
/// Picked up from the working directory when present.
pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yaml";

/// Logging for the full-screen viewer. Output must never reach the terminal,
/// so everything goes through log4rs: an explicit YAML config if one exists,
/// otherwise a plain file appender.
pub fn init_for_tui(config: Option<&Path>) -> Result<()> {
    let config = config.map(Path::to_path_buf).or_else(|| {
        let fallback = Path::new(DEFAULT_LOG_CONFIG);
        fallback.is_file().then(|| fallback.to_path_buf())
    });
    if let Some(path) = config {
        return log4rs::init_file(&path, Default::default())
            .with_context(|| format!("failed to load log config {}", path.display()));
    }

    let file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} {l:<5} {t} - {m}{n}",
        )))
        .build(DEFAULT_LOG_FILE)
        .with_context(|| format!("failed to open {DEFAULT_LOG_FILE}"))?;
    let config = Config::builder()
        .appender(Appender::builder().build("file", Box::new(file)))
        .build(Root::builder().appender("file").build(LevelFilter::Info))
        .context("invalid logging configuration")?;
    log4rs::init_config(config).context("logger already initialized")?;
    Ok(())
}

/// Logging for the one-shot commands: stderr, filtered by `RUST_LOG`.
pub fn init_for_cli() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init();
}
