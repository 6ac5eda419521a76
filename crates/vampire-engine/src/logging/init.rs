use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "vampire_engine=debug,wgpu=warn").
///
/// `write_style` controls ANSI coloring behavior.
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

/// Backend crates that are noisy at `info` and below.
const QUIET_MODULES: [&str; 4] = ["wgpu", "wgpu_core", "wgpu_hal", "naga"];

/// Log target for the per-frame console diagnostic.
///
/// Always at least `info` under the default filter, so every rendered frame
/// shows up on the console.
pub const FRAME_TARGET: &str = "frame";

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Filter precedence: `config.env_filter`, then `RUST_LOG`, then `info` with
/// the GPU backend crates capped at `warn`.
///
/// This function is idempotent; subsequent calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let rust_log = std::env::var("RUST_LOG").ok();
        let mut builder = builder(&config, rust_log.as_deref());

        // A logger already installed by the host takes precedence.
        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}

fn builder(config: &LoggingConfig, rust_log: Option<&str>) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();

    match config.env_filter.as_deref().or(rust_log) {
        Some(filter) => {
            builder.parse_filters(filter);
        }
        None => {
            builder.filter_level(log::LevelFilter::Info);
            for module in QUIET_MODULES {
                builder.filter_module(module, log::LevelFilter::Warn);
            }
            builder.filter_module(FRAME_TARGET, log::LevelFilter::Info);
        }
    }

    builder.write_style(config.write_style);
    builder
}
