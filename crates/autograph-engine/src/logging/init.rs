use std::sync::Once;

/// Variable consulted when no explicit filter is configured.
pub const LOG_ENV: &str = "AUTOGRAPH_LOG";

/// How the process-wide logger is set up.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `env_logger` filter directives, e.g. `"autograph_pad=debug,wgpu=warn"`.
    pub filter: Option<String>,
    /// Millisecond timestamps help line up pointer samples with log output.
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: None, timestamps: true }
    }
}

impl LoggingConfig {
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn timestamps(mut self, on: bool) -> Self {
        self.timestamps = on;
        self
    }

    /// Explicit filter first, then `AUTOGRAPH_LOG`, then `RUST_LOG`.
    fn directives(&self) -> Option<String> {
        self.filter
            .clone()
            .or_else(|| std::env::var(LOG_ENV).ok())
            .or_else(|| std::env::var("RUST_LOG").ok())
    }
}

static INIT: Once = Once::new();

/// Installs `env_logger` as the `log` backend. Only the first call has any
/// effect, and a logger installed by someone else is left alone.
///
/// Without directives the level is `info`, with wgpu internals held to `warn`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        match config.directives() {
            Some(directives) => {
                builder.parse_filters(&directives);
            }
            None => {
                builder
                    .filter_level(log::LevelFilter::Info)
                    .filter_module("wgpu_core", log::LevelFilter::Warn)
                    .filter_module("wgpu_hal", log::LevelFilter::Warn)
                    .filter_module("naga", log::LevelFilter::Warn);
            }
        }
        if config.timestamps {
            builder.format_timestamp_millis();
        } else {
            builder.format_timestamp(None);
        }
        if builder.try_init().is_ok() {
            log::debug!("logger installed");
        }
    });
}
