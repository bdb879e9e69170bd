//! Logging configuration module
//! Routes `tracing` output to the browser console

use tracing::Subscriber;
use tracing_subscriber::fmt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use tracing_web::MakeWebConsoleWriter;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,          // filter directive (trace, debug, info, warn, error)
    pub json_format: bool,      // one JSON object per console line
    pub with_target: bool,      // prefix lines with the module path
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            with_target: true,
        }
    }
}

impl LoggingConfig {
    /// Install the console subscriber
    ///
    /// Fails on an unparsable level or when a global subscriber already exists.
    pub fn init(&self) -> Result<(), Box<dyn std::error::Error>> {
        let env_filter = EnvFilter::try_new(&self.level)?;

        tracing_subscriber::registry()
            .with(env_filter)
            .with(self.console_layer())
            .try_init()?;

        tracing::info!("Logging initialized - level: {}", self.level);

        Ok(())
    }

    /// Initialize with default settings
    pub fn init_default() -> Result<(), Box<dyn std::error::Error>> {
        Self::default().init()
    }

    /// Format layer writing to the browser console
    ///
    /// Browsers have no wall clock formatter and no ANSI colors. The writer
    /// picks the console method from each event's level.
    pub fn console_layer<S>(&self) -> Box<dyn Layer<S> + Send + Sync>
    where
        S: Subscriber + for<'a> LookupSpan<'a> + 'static,
    {
        if self.json_format {
            fmt::layer()
                .json()
                .with_target(self.with_target)
                .without_time()
                .with_writer(MakeWebConsoleWriter::new())
                .boxed()
        } else {
            fmt::layer()
                .with_target(self.with_target)
                .with_level(true)
                .with_ansi(false)
                .without_time()
                .with_writer(MakeWebConsoleWriter::new().with_pretty_level())
                .boxed()
        }
    }
}
