use colorful::Colorful;
use std::{
    fs::create_dir_all,
    path::{Path, PathBuf},
};
use tracing_subscriber::layer::SubscriberExt;

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: tracing::Level,
    pub logging_enabled: bool,
    pub logger_name: String,
    pub log_dir: Option<PathBuf>,
    pub _tracing_guard: Option<std::sync::Arc<tracing::subscriber::DefaultGuard>>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: tracing::Level::INFO,
            logging_enabled: true,
            logger_name: "concept_classifier".to_string(),
            log_dir: None,
            _tracing_guard: None,
        }
    }
}

impl LoggingConfig {
    pub fn new() -> Self {
        Default::default()
    }

    /// Installs the subscriber. A logger that cannot be created is reported on stderr
    /// and skipped; it never fails the caller.
    pub fn load_logger(&mut self) {
        if !self.logging_enabled {
            self._tracing_guard = None;
            return;
        }
        match self.create_logger() {
            Ok(guard) => self._tracing_guard = Some(std::sync::Arc::new(guard)),
            Err(e) => {
                self._tracing_guard = None;
                eprintln!(
                    "{}",
                    format!("{} Logger disabled: {e}", self.logger_name)
                        .color(colorful::RGB::new(248, 139, 0))
                );
                return;
            }
        }

        eprintln!(
            "{}",
            format!("Starting {} Logger", self.logger_name)
                .color(colorful::RGB::new(0, 139, 248))
                .bold()
        );
    }

    /// Resolved at runtime: the configured dir, else `logs` under the running cargo
    /// package, else under the working directory.
    fn log_dir(&self) -> PathBuf {
        if let Some(dir) = &self.log_dir {
            return dir.clone();
        }
        std::env::var_os("CARGO_MANIFEST_DIR")
            .map(PathBuf::from)
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_default()
            .join("logs")
    }

    fn create_logger(
        &mut self,
    ) -> crate::Result<tracing::subscriber::DefaultGuard, crate::ClassifierError> {
        let log_dir = self.log_dir();

        if !Path::new(&log_dir).exists() {
            create_dir_all(&log_dir).map_err(|e| {
                crate::ClassifierError::Logger(format!(
                    "Failed to create log directory {}: {e}",
                    log_dir.display()
                ))
            })?;
        }

        let file_appender = tracing_appender::rolling::RollingFileAppender::builder()
            .rotation(tracing_appender::rolling::Rotation::HOURLY)
            .max_log_files(6)
            .filename_prefix(&self.logger_name)
            .filename_suffix("log")
            .build(&log_dir)
            .map_err(|e| crate::ClassifierError::Logger(e.to_string()))?;

        let filter = tracing_subscriber::EnvFilter::builder()
            .with_default_directive(self.level.into())
            .parse_lossy("");

        let file_layer = tracing_subscriber::fmt::layer()
            .pretty()
            .with_ansi(false)
            .with_writer(file_appender);

        let terminal_layer = tracing_subscriber::fmt::layer()
            .compact()
            .with_ansi(false)
            .with_writer(std::io::stderr);

        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(terminal_layer);

        Ok(tracing::subscriber::set_default(subscriber))
    }
}

pub trait LoggingConfigTrait {
    fn logging_config_mut(&mut self) -> &mut LoggingConfig;

    /// If set to false, will disable logging. By defaults logs to the logs dir.
    fn logging_enabled(mut self, enabled: bool) -> Self
    where
        Self: Sized,
    {
        self.logging_config_mut().logging_enabled = enabled;
        self
    }

    fn logger_name<S: Into<String>>(mut self, logger_name: S) -> Self
    where
        Self: Sized,
    {
        self.logging_config_mut().logger_name = logger_name.into();
        self
    }

    fn log_dir<P: Into<PathBuf>>(mut self, log_dir: P) -> Self
    where
        Self: Sized,
    {
        self.logging_config_mut().log_dir = Some(log_dir.into());
        self
    }

    /// Sets the log level to TRACE.
    ///
    /// Rendered prompts and raw model responses are logged at this level.
    fn log_level_trace(mut self) -> Self
    where
        Self: Sized,
    {
        self.logging_config_mut().level = tracing::Level::TRACE;
        self
    }

    /// Sets the log level to DEBUG.
    ///
    /// Stage transitions of each classification are logged at this level.
    fn log_level_debug(mut self) -> Self
    where
        Self: Sized,
    {
        self.logging_config_mut().level = tracing::Level::DEBUG;
        self
    }

    /// Sets the log level to INFO.
    fn log_level_info(mut self) -> Self
    where
        Self: Sized,
    {
        self.logging_config_mut().level = tracing::Level::INFO;
        self
    }

    fn log_level_warn(mut self) -> Self
    where
        Self: Sized,
    {
        self.logging_config_mut().level = tracing::Level::WARN;
        self
    }

    fn log_level_error(mut self) -> Self
    where
        Self: Sized,
    {
        self.logging_config_mut().level = tracing::Level::ERROR;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    struct Builder {
        logging_config: LoggingConfig,
    }

    impl LoggingConfigTrait for Builder {
        fn logging_config_mut(&mut self) -> &mut LoggingConfig {
            &mut self.logging_config
        }
    }

    #[test]
    fn builder_setters() {
        let builder = Builder {
            logging_config: LoggingConfig::new(),
        }
        .logger_name("classify")
        .log_level_trace()
        .logging_enabled(false);
        assert_eq!(builder.logging_config.logger_name, "classify");
        assert_eq!(builder.logging_config.level, tracing::Level::TRACE);
        assert!(!builder.logging_config.logging_enabled);
    }

    #[test]
    fn disabled_logger_installs_nothing() {
        let mut config = LoggingConfig {
            logging_enabled: false,
            ..Default::default()
        };
        config.load_logger();
        assert!(config._tracing_guard.is_none());
    }

    #[test]
    #[serial]
    fn writes_to_the_configured_dir() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("nested").join("logs");
        let mut config = LoggingConfig {
            logger_name: "logging_test".to_string(),
            log_dir: Some(log_dir.clone()),
            ..Default::default()
        };
        config.load_logger();
        tracing::info!(concept = "mammal", "Log Event");
        assert!(config._tracing_guard.is_some());
        assert!(log_dir.exists());
    }

    #[test]
    fn unusable_dir_leaves_logging_off() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut config = LoggingConfig {
            logger_name: "logging_test".to_string(),
            log_dir: Some(file.path().join("logs")),
            ..Default::default()
        };
        config.load_logger();
        assert!(config._tracing_guard.is_none());
    }

    #[test]
    fn default_dir_is_not_fixed_at_build_time() {
        let config = LoggingConfig::new();
        let expected = std::env::var_os("CARGO_MANIFEST_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::current_dir().unwrap())
            .join("logs");
        assert_eq!(config.log_dir(), expected);
    }
}
