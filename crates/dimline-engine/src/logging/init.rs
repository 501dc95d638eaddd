use std::sync::Once;

/// Quiets the GPU stack unless the caller asks for it explicitly.
const GPU_FILTERS: &str = "wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "dimline_engine=debug,wgpu_core=warn") and wins over `RUST_LOG`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    /// Level used when neither `env_filter` nor `RUST_LOG` is set.
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
    /// Filter string the logger is built from, given the value of `RUST_LOG`.
    pub fn resolve_filter(&self, rust_log: Option<&str>) -> String {
        match self.env_filter.as_deref().or(rust_log) {
            Some(filter) => filter.to_owned(),
            None => {
                let level = self.default_level.to_string().to_lowercase();
                format!("{level},{GPU_FILTERS}")
            }
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let rust_log = std::env::var("RUST_LOG").ok();
        let filter = config.resolve_filter(rust_log.as_deref());

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&filter);
        builder.write_style(config.write_style);

        // Another logger may already be installed (test harnesses, embedders).
        if builder.try_init().is_ok() {
            log::debug!("logging initialized ({filter})");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins() {
        let cfg = LoggingConfig {
            env_filter: Some("debug".into()),
            ..Default::default()
        };
        assert_eq!(cfg.resolve_filter(Some("trace")), "debug");
    }

    #[test]
    fn rust_log_used_when_no_filter() {
        assert_eq!(LoggingConfig::default().resolve_filter(Some("warn")), "warn");
    }

    #[test]
    fn default_level_keeps_gpu_stack_quiet() {
        let cfg = LoggingConfig {
            default_level: log::LevelFilter::Debug,
            ..Default::default()
        };
        let filter = cfg.resolve_filter(None);
        assert!(filter.starts_with("debug,"));
        assert!(filter.contains("wgpu_hal=warn"));
    }

    #[test]
    fn init_is_idempotent() {
        init_logging(LoggingConfig::default());
        init_logging(LoggingConfig::default());
    }
}
