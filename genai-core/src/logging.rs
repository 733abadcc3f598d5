use std::fmt;
use std::path::PathBuf;

use tracing::{Event, Subscriber};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::format::FmtSpan,
    fmt::{format::Writer, FmtContext, FormatEvent, FormatFields},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Targets emitted by the demo crates
pub const TARGETS: [&str; 6] = [
    "genai::llm",
    "genai::tool",
    "genai::rag",
    "genai::chat",
    "genai::config",
    "genai::imaging",
];

/// Console formatter with one colour per target
struct ColoredFormatter;

fn target_color(target: &str) -> &'static str {
    match target {
        "genai::llm" => "\x1b[38;5;51m",
        "genai::tool" => "\x1b[38;5;213m",
        "genai::rag" => "\x1b[38;5;226m",
        "genai::chat" => "\x1b[38;5;82m",
        "genai::config" => "\x1b[38;5;208m",
        "genai::imaging" => "\x1b[38;5;141m",
        _ => "\x1b[2m",
    }
}

impl<S, N> FormatEvent<S, N> for ColoredFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
        let metadata = event.metadata();

        let level_color = match *metadata.level() {
            tracing::Level::ERROR => "\x1b[31m",
            tracing::Level::WARN => "\x1b[33m",
            tracing::Level::INFO => "\x1b[32m",
            tracing::Level::DEBUG => "\x1b[34m",
            tracing::Level::TRACE => "\x1b[35m",
        };

        write!(writer, "{} ", chrono::Local::now().format("%H:%M:%S%.3f"))?;
        write!(writer, "{}{:5}\x1b[0m ", level_color, metadata.level())?;
        write!(writer, "{}[{}]\x1b[0m ", target_color(metadata.target()), metadata.target())?;
        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Level for the demo targets ("off", "error", "info", "debug", ...)
    pub level: String,
    /// Log to a daily rotated file instead of stderr
    pub file_path: Option<PathBuf>,
    pub include_spans: bool,
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "off".to_string(),
            file_path: None,
            include_spans: false,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self {
            level: std::env::var("GENAI_LOG_LEVEL").unwrap_or_else(|_| "off".to_string()),
            file_path: std::env::var("GENAI_LOG_FILE").ok().map(PathBuf::from),
            include_spans: std::env::var("GENAI_LOG_SPANS").map(|v| v == "true").unwrap_or(false),
            json_format: std::env::var("GENAI_LOG_JSON").map(|v| v == "true").unwrap_or(false),
        }
    }

    pub fn level<S: Into<String>>(mut self, level: S) -> Self {
        self.level = level.into();
        self
    }

    pub fn file_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.file_path = Some(path.into());
        self
    }

    pub fn with_spans(mut self, enable: bool) -> Self {
        self.include_spans = enable;
        self
    }

    pub fn json_format(mut self, enable: bool) -> Self {
        self.json_format = enable;
        self
    }

    /// Everything else stays at warn, the demo targets follow `level`
    pub fn filter(&self) -> Result<EnvFilter, Box<dyn std::error::Error + Send + Sync>> {
        let mut filter = EnvFilter::from_default_env()
            .add_directive("warn".parse()?)
            .add_directive(format!("genai_core={}", self.level).parse()?)
            .add_directive(format!("genai_llm={}", self.level).parse()?);
        for target in TARGETS {
            filter = filter.add_directive(format!("{}={}", target, self.level).parse()?);
        }
        Ok(filter)
    }

    /// Install the global subscriber. A second call leaves the first one in place.
    pub fn init(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let filter = self.filter()?;

        let span_events = if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        let result = match self.file_path {
            Some(path) => {
                let directory = path.parent().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
                let file_name = path
                    .file_name()
                    .map(|n| n.to_os_string())
                    .unwrap_or_else(|| "genai.log".into());
                let file_appender = RollingFileAppender::new(Rotation::DAILY, directory, file_name);

                if self.json_format {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(file_appender)
                            .with_span_events(span_events))
                        .try_init()
                } else {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(tracing_subscriber::fmt::layer()
                            .with_writer(file_appender)
                            .with_span_events(span_events)
                            .with_ansi(false))
                        .try_init()
                }
            }
            None => {
                if self.json_format {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(std::io::stderr)
                            .with_span_events(span_events))
                        .try_init()
                } else {
                    // stderr keeps the demo output on stdout readable
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(tracing_subscriber::fmt::layer()
                            .event_format(ColoredFormatter)
                            .with_writer(std::io::stderr)
                            .with_ansi(true))
                        .try_init()
                }
            }
        };

        result.map_err(|_| "Failed to initialize subscriber (already set)".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = LoggingConfig::default().level("debug").file_path("/tmp/genai.log").json_format(true);
        assert_eq!(config.level, "debug");
        assert_eq!(config.file_path, Some(PathBuf::from("/tmp/genai.log")));
        assert!(config.json_format);
        assert!(!config.include_spans);
    }

    #[test]
    fn test_filter_accepts_levels() {
        for level in ["off", "error", "warn", "info", "debug", "trace"] {
            assert!(LoggingConfig::default().level(level).filter().is_ok(), "{}", level);
        }
    }

    #[test]
    fn test_second_init_is_an_error_not_a_panic() {
        let _ = LoggingConfig::default().init();
        assert!(LoggingConfig::default().init().is_err());
    }
}
