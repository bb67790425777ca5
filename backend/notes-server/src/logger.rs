use crate::error::{Result as ServerErrorResult, ServerError};

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::LevelFilter;

/// Where log lines go
enum Sink {
    File(File),
    Terminal { colors: Option<ColoredLevelConfig> },
}

impl Sink {
    fn open(log_file: Option<&Path>, colored: bool) -> ServerErrorResult<Self> {
        let Some(path) = log_file else {
            let colors = colored.then(level_colors);
            return Ok(Sink::Terminal { colors });
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map(Sink::File)
            .map_err(|e| ServerError::Logger {
                message: format!("Cannot open log file {}: {e}", path.display()),
            })
    }

    fn into_dispatch(self) -> Dispatch {
        match self {
            // Files get the source position, terminals get the module target
            Sink::File(file) => Dispatch::new()
                .format(|out, message, record| {
                    let origin = format!(
                        "{}:{}",
                        record.file().unwrap_or("unknown"),
                        record.line().unwrap_or(0)
                    );
                    write_line(out, record.level(), message, &origin)
                })
                .chain(file),
            Sink::Terminal { colors } => Dispatch::new()
                .format(move |out, message, record| match colors {
                    Some(colors) => {
                        write_line(out, colors.color(record.level()), message, record.target())
                    }
                    None => write_line(out, record.level(), message, record.target()),
                })
                .chain(std::io::stdout()),
        }
    }
}

fn level_colors() -> ColoredLevelConfig {
    ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Cyan)
        .trace(Color::BrightBlack)
}

fn write_line(
    out: FormatCallback<'_>,
    level: impl std::fmt::Display,
    message: &std::fmt::Arguments<'_>,
    origin: &str,
) {
    out.finish(format_args!(
        "{} {:<5} {} ({})",
        humantime::format_rfc3339_millis(SystemTime::now()),
        level,
        message,
        origin
    ))
}

/// Install the process-wide logger.
///
/// With no `log_file` lines go to stdout, colored when `colored` is set.
pub fn initialize(
    log_level: notes_config::LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> ServerErrorResult<()> {
    let level = log_level.0;
    let sink = Sink::open(log_file.as_deref(), colored)?;

    Dispatch::new()
        .level(level)
        .level_for("sqlx", LevelFilter::Warn)
        .level_for("hyper", LevelFilter::Info)
        .chain(sink.into_dispatch())
        .apply()
        .map_err(|e| ServerError::Logger {
            message: format!("Logger already installed: {e}"),
        })?;

    let destination = log_file
        .as_ref()
        .map_or_else(|| String::from("stdout"), |p| p.display().to_string());
    log::info!("Logging at {level} to {destination}");

    Ok(())
}
