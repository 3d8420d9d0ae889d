use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` uses `env_logger` filter syntax (e.g. "info",
/// "citey_engine=debug,wgpu_core=warn"). When unset, `RUST_LOG` is consulted.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

/// Default filter when neither the config nor `RUST_LOG` provide one.
///
/// wgpu is chatty at info level; keep it to warnings.
const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

static INIT: Once = Once::new();

/// Initializes the global logger once. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        let filter = config
            .env_filter
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| DEFAULT_FILTER.to_owned());
        builder.parse_filters(&filter);
        builder.write_style(config.write_style);

        // `try_init` so a logger installed by a test harness does not panic.
        if builder.try_init().is_ok() {
            log::debug!("logging initialized ({filter})");
        }
    });
}
