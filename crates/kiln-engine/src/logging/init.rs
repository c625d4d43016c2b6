use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` uses `env_logger` directive syntax, e.g.
/// `"kiln_engine=trace,winit=warn"`. When unset, `RUST_LOG` is consulted and
/// `default_level` applies if that is missing too.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub default_level: log::LevelFilter,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: log::LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// Returns the filter directives this config resolves to.
    fn directives(&self) -> String {
        self.env_filter
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| self.default_level.to_string().to_lowercase())
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let directives = config.directives();

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&directives);
        builder.write_style(config.write_style);
        builder.format_timestamp_millis();

        // A test harness or host may already own the logger.
        if builder.try_init().is_err() {
            return;
        }

        log::debug!("logging initialized ({directives})");
    });
}
