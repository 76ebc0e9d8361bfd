//! Logger setup shared by the `events` and `mock-server` binaries.

use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    Config,
};

/// Environment variable holding the log level (`error` .. `trace`).
pub const LOG_LEVEL_VAR: &str = "EVENT_LOG_LEVEL";

/// Level named by `value`, or `info` when unset or unparseable.
pub fn level_from(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|level| level.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Route `log` records to stderr at the level from `EVENT_LOG_LEVEL`.
pub fn init_logger() -> Result<(), Box<dyn std::error::Error>> {
    let level = level_from(std::env::var(LOG_LEVEL_VAR).ok().as_deref());

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {l} {t} - {m}{n}")))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;

    log4rs::init_config(config)?;
    Ok(())
}
