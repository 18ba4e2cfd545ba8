// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

mod error;
pub mod layers;

use crate::error::Result;
use layers::TracingLayers;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_core::dispatcher::DefaultGuard;
use tracing_subscriber::{
    filter::Targets,
    fmt::MakeWriter,
    layer::{Filter, SubscriberExt},
    reload,
    util::SubscriberInitExt,
    Layer, Registry,
};

pub use error::Error;
pub use layers::{ReloadHandle, LOG_ENV_VAR};
pub use tracing_appender::non_blocking::WorkerGuard;

// re-exporting the tracing crate's Level as it is used in our public API
pub use tracing_core::Level;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOutputDest {
    Stderr,
    Stdout,
    Path(PathBuf),
}

impl LogOutputDest {
    pub fn parse_from_str(val: &str) -> Result<Self> {
        match val {
            "stderr" => Ok(LogOutputDest::Stderr),
            "stdout" => Ok(LogOutputDest::Stdout),
            "data-dir" => {
                let timestamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();

                let dir = match dirs_next::data_dir() {
                    Some(dir) => dir
                        .join("vrent")
                        .join("migrate")
                        .join("logs")
                        .join(format!("log_{timestamp}")),
                    None => {
                        return Err(Error::LoggingConfiguration(
                            "could not obtain data directory path".to_string(),
                        ));
                    }
                };
                Ok(LogOutputDest::Path(dir))
            }
            "" => Err(Error::LoggingConfiguration(
                "The log output destination cannot be empty".to_string(),
            )),
            // The directory does not need to exist yet, it is created on initialization.
            value => Ok(LogOutputDest::Path(PathBuf::from(value))),
        }
    }
}

impl std::fmt::Display for LogOutputDest {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LogOutputDest::Stderr => write!(f, "stderr"),
            LogOutputDest::Stdout => write!(f, "stdout"),
            LogOutputDest::Path(p) => write!(f, "{}", p.to_string_lossy()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Default,
    Json,
}

impl LogFormat {
    pub fn parse_from_str(val: &str) -> Result<Self> {
        match val {
            "default" => Ok(LogFormat::Default),
            "json" => Ok(LogFormat::Json),
            _ => Err(Error::LoggingConfiguration(
                "The only valid values for this argument are \"default\" or \"json\"".to_string(),
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Default => "default",
            LogFormat::Json => "json",
        }
    }
}

pub struct LogBuilder {
    default_logging_targets: Vec<(String, Level)>,
    output_dest: LogOutputDest,
    format: LogFormat,
}

impl LogBuilder {
    /// Create a new builder.
    /// The default_logging_targets are used if the `VRENT_LOG` env variable is not set.
    ///
    /// Logs go to stderr in the default format unless told otherwise, keeping stdout free for
    /// the command's own output.
    pub fn new(default_logging_targets: Vec<(String, Level)>) -> Self {
        Self {
            default_logging_targets,
            output_dest: LogOutputDest::Stderr,
            format: LogFormat::Default,
        }
    }

    /// Set the logging output destination
    pub fn output_dest(&mut self, output_dest: LogOutputDest) {
        self.output_dest = output_dest;
    }

    /// Set the logging format
    pub fn format(&mut self, format: LogFormat) {
        self.format = format
    }

    /// Inits logging, returning the NonBlocking guard if present.
    /// This guard should be held for the life of the program.
    ///
    /// Logging should be instantiated only once.
    pub fn initialize(self) -> Result<(ReloadHandle, Option<WorkerGuard>)> {
        let mut layers = TracingLayers::default();

        let reload_handle =
            layers.fmt_layer(self.default_logging_targets, &self.output_dest, self.format)?;

        if tracing_subscriber::registry()
            .with(layers.layers)
            .try_init()
            .is_err()
        {
            eprintln!("Tried to initialize and set global default subscriber more than once");
        }

        Ok((reload_handle, layers.log_appender_guard))
    }

    /// Logs to `writer` for the current thread only, until the returned guard is dropped.
    ///
    /// `VRENT_LOG` is ignored here, only the given targets apply.
    pub fn init_scoped_with_writer<W>(
        targets: Vec<(String, Level)>,
        format: LogFormat,
        writer: W,
    ) -> (ReloadHandle, DefaultGuard)
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let target_filters: Box<dyn Filter<Registry> + Send + Sync> =
            Box::new(Targets::new().with_targets(targets));
        let (filter, handle) = reload::Layer::new(target_filters);
        let layer = layers::fmt_layer_with_writer(writer, format)
            .with_filter(filter)
            .boxed();

        let guard = tracing_subscriber::registry().with(vec![layer]).set_default();
        (ReloadHandle(handle), guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_dest_keywords_are_recognised() {
        assert_eq!(
            LogOutputDest::parse_from_str("stderr").unwrap(),
            LogOutputDest::Stderr
        );
        assert_eq!(
            LogOutputDest::parse_from_str("stdout").unwrap(),
            LogOutputDest::Stdout
        );
        assert_eq!(
            LogOutputDest::parse_from_str("/tmp/vrent-logs").unwrap(),
            LogOutputDest::Path(PathBuf::from("/tmp/vrent-logs"))
        );
        assert!(LogOutputDest::parse_from_str("").is_err());
    }

    #[test]
    fn data_dir_resolves_to_a_timestamped_directory() {
        // Not every CI box has a data dir.
        if let Ok(LogOutputDest::Path(path)) = LogOutputDest::parse_from_str("data-dir") {
            let name = path.file_name().unwrap().to_string_lossy().to_string();
            assert!(name.starts_with("log_"));
            assert!(path.to_string_lossy().contains("vrent"));
        }
    }

    #[test]
    fn log_format_round_trips_through_its_name() {
        for format in [LogFormat::Default, LogFormat::Json] {
            assert_eq!(LogFormat::parse_from_str(format.as_str()).unwrap(), format);
        }
        assert!(LogFormat::parse_from_str("pretty").is_err());
    }
}
