pub mod config;
pub mod handler;
pub mod logging_system;

pub use config::{Config, ConfigError, LogLevel, LogOutputFormat};
pub use handler::{BatchSummary, EventHandler, HandlerError};
pub use logging_system::{LogDirective, LoggingError, LoggingSystem, init_logging};

use crate::collector::LocalDirSource;
use crate::domain::HookError;
use crate::sender::NdjsonSink;
use std::path::Path;
use tokio::io::AsyncReadExt;
use tracing::{error, info};

pub struct App {
    config: Config,
}

impl App {
    pub fn from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Ok(Self::from_config(Config::from_args_and_env(args)?))
    }

    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Process the configured notification file once.
    pub async fn run(&self) -> Result<BatchSummary, HookError> {
        let payload = read_event(&self.config.event_file)
            .await
            .map_err(|e| HookError::Event(format!("{}: {e}", self.config.event_file.display())))?;

        let source = LocalDirSource::new(&self.config.local_root);
        let pipeline_config = self.config.pipeline_config();

        let summary = match &self.config.output {
            Some(path) => {
                let file = tokio::fs::File::create(path)
                    .await
                    .map_err(|e| HookError::Delivery(format!("{}: {e}", path.display())))?;
                EventHandler::new(&pipeline_config, source, NdjsonSink::new(file))
                    .handle_payload(&payload)
                    .await?
            }
            None => {
                EventHandler::new(&pipeline_config, source, NdjsonSink::stdout())
                    .handle_payload(&payload)
                    .await?
            }
        };

        Ok(summary)
    }
}

impl From<HandlerError> for HookError {
    fn from(err: HandlerError) -> Self {
        match err {
            HandlerError::Config(e) => HookError::from(e),
            HandlerError::Event(e) => HookError::from(e),
        }
    }
}

async fn read_event(path: &Path) -> std::io::Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut payload = Vec::new();
        tokio::io::stdin().read_to_end(&mut payload).await?;
        Ok(payload)
    } else {
        tokio::fs::read(path).await
    }
}

pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Binary entry point. Configuration problems exit with status 2,
/// processing errors with status 1.
pub async fn main() -> anyhow::Result<()> {
    let app = match App::from_args(std::env::args_os()) {
        Ok(app) => app,
        Err(ConfigError::Cli(e)) => e.exit(),
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(2);
        }
    };

    if let Err(e) = init_logging(app.config().log_level, app.config().log_format) {
        eprintln!("Warning: {e}");
    }

    info!(
        version = %get_version(),
        log_type = %app.config().log_type,
        local_root = %app.config().local_root.display(),
        "Starting s3-log-hook"
    );

    match app.run().await {
        Ok(summary) => {
            info!(?summary, "s3-log-hook finished");
            Ok(())
        }
        Err(HookError::Config(e)) => {
            error!(error = %e, "Configuration error");
            std::process::exit(2);
        }
        Err(e) => {
            error!(error = %e, "Application error");
            Err(e.into())
        }
    }
}
