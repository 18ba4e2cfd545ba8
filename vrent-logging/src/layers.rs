// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::error::{Error, Result};
use crate::{LogFormat, LogOutputDest};
use std::str::FromStr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{Builder as RollingBuilder, Rotation};
use tracing_core::{Event, Level, Subscriber};
use tracing_subscriber::{
    filter::Targets,
    fmt::{
        self as tracing_fmt,
        format::Writer,
        time::{FormatTime, SystemTime},
        FmtContext, FormatEvent, FormatFields, MakeWriter,
    },
    layer::Filter,
    registry::LookupSpan,
    reload, Layer, Registry,
};

/// Env var that overrides the default logging targets, e.g. `VRENT_LOG=vrent_evm=trace,alloy=info`.
pub const LOG_ENV_VAR: &str = "VRENT_LOG";

/// Crates whose logs are enabled by `all` or a bare level.
const OWN_CRATES: [&str; 3] = ["vrent_evm", "vrent_logging", "vrent_migrate"];

const LOG_FILE_PREFIX: &str = "vrent";

/// Handle to change the log targets at run time.
pub struct ReloadHandle(
    pub(crate) reload::Handle<Box<dyn Filter<Registry> + Send + Sync>, Registry>,
);

impl ReloadHandle {
    /// Modify the log level to the provided CSV value.
    /// Example input: `info,vrent_evm=debug`
    pub fn modify_log_level(&self, logging_value: &str) -> Result<()> {
        let targets: Vec<(String, Level)> = get_logging_targets(logging_value)?;
        self.0.modify(|old_filter| {
            let new_filter: Box<dyn Filter<Registry> + Send + Sync> =
                Box::new(Targets::new().with_targets(targets));
            *old_filter = new_filter;
        })?;

        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct TracingLayers {
    pub(crate) layers: Vec<Box<dyn Layer<Registry> + Send + Sync>>,
    pub(crate) log_appender_guard: Option<WorkerGuard>,
}

/// Writes `[<time> <LEVEL> <module> <line>/<span>] <fields>`.
pub struct LogFormatter;

impl<S, N> FormatEvent<S, N> for LogFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let level = *event.metadata().level();
        let module = event.metadata().module_path().unwrap_or("<unknown module>");
        let lno = event.metadata().line().unwrap_or(0);

        write!(writer, "[")?;
        SystemTime.format_time(&mut writer)?;
        write!(writer, " {level} {module} {lno}")?;

        if let Some(span_ref) = ctx.lookup_current() {
            write!(writer, "/{}", span_ref.name())?;
        }

        write!(writer, "] ")?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// A fmt layer in the requested format writing to `writer`.
pub fn fmt_layer_with_writer<W>(
    writer: W,
    format: LogFormat,
) -> Box<dyn Layer<Registry> + Send + Sync>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    match format {
        LogFormat::Json => tracing_fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(writer)
            .boxed(),
        LogFormat::Default => tracing_fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .event_format(LogFormatter)
            .with_writer(writer)
            .boxed(),
    }
}

impl TracingLayers {
    pub(crate) fn fmt_layer(
        &mut self,
        default_logging_targets: Vec<(String, Level)>,
        output_dest: &LogOutputDest,
        format: LogFormat,
    ) -> Result<ReloadHandle> {
        let layer = match output_dest {
            LogOutputDest::Stderr => fmt_layer_with_writer(std::io::stderr, format),
            LogOutputDest::Stdout => fmt_layer_with_writer(std::io::stdout, format),
            LogOutputDest::Path(path) => {
                std::fs::create_dir_all(path)?;

                let file_appender = RollingBuilder::new()
                    .rotation(Rotation::HOURLY)
                    .filename_prefix(LOG_FILE_PREFIX)
                    .filename_suffix("log")
                    .build(path)
                    .map_err(|err| Error::LoggingConfiguration(err.to_string()))?;

                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                self.log_appender_guard = Some(guard);

                fmt_layer_with_writer(non_blocking, format)
            }
        };

        let targets = match std::env::var(LOG_ENV_VAR) {
            Ok(value) if !value.trim().is_empty() => get_logging_targets(&value)?,
            _ => default_logging_targets,
        };

        let target_filters: Box<dyn Filter<Registry> + Send + Sync> =
            Box::new(Targets::new().with_targets(targets));
        let (filter, handle) = reload::Layer::new(target_filters);
        self.layers.push(layer.with_filter(filter).boxed());

        Ok(ReloadHandle(handle))
    }
}

/// Parse a CSV of logging targets.
///
/// Each entry is either `target=level`, or `all` / a bare level which applies to our own crates.
/// `all` means `trace`.
pub fn get_logging_targets(logging_env_value: &str) -> Result<Vec<(String, Level)>> {
    let mut targets = Vec::new();

    for entry in logging_env_value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
    {
        match entry.split_once('=') {
            Some((target, level)) => {
                let target = target.trim();
                if target.is_empty() {
                    return Err(Error::LoggingConfiguration(format!(
                        "Missing target in logging entry {entry:?}"
                    )));
                }
                targets.push((target.to_string(), parse_level(level)?));
            }
            None => {
                let level = if entry.eq_ignore_ascii_case("all") {
                    Level::TRACE
                } else {
                    parse_level(entry)?
                };
                targets.extend(OWN_CRATES.iter().map(|krate| (krate.to_string(), level)));
            }
        }
    }

    Ok(targets)
}

fn parse_level(value: &str) -> Result<Level> {
    Level::from_str(value.trim()).map_err(|_| {
        Error::LoggingConfiguration(format!(
            "Invalid log level {value:?}, expected one of trace, debug, info, warn, error"
        ))
    })
}
