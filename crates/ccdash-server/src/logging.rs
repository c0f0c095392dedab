//! Logging configuration and initialization.
//!
//! ccdash logs under four targets: `ccdash::startup`, `ccdash::api`,
//! `ccdash::reader` and `ccdash::config_file`. A preset picks their base
//! levels, `--log reader=debug` overrides one of them, and `RUST_LOG` replaces
//! the whole filter when set. Output is plain text or JSON lines.

use std::collections::HashMap;
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Short names of the targets ccdash emits, without the `ccdash::` prefix.
pub const TARGETS: &[&str] = &["startup", "api", "reader", "config_file"];

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: '{}'. Use 'text' or 'json'.", s)),
        }
    }
}

/// Logging preset levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogPreset {
    /// Reader problems as warnings, everything else at info
    #[default]
    Production,
    /// Info everywhere, including request traces
    Verbose,
    /// Per-file reader detail and request internals
    Debug,
    /// Warnings and errors only
    Quiet,
}

impl LogPreset {
    fn level_for(self, target: &str) -> Level {
        match self {
            LogPreset::Production if target == "reader" => Level::WARN,
            LogPreset::Production | LogPreset::Verbose => Level::INFO,
            LogPreset::Debug => Level::DEBUG,
            LogPreset::Quiet => Level::WARN,
        }
    }

    fn tower_http_level(self) -> Level {
        match self {
            LogPreset::Production => Level::WARN,
            LogPreset::Verbose => Level::INFO,
            LogPreset::Debug => Level::DEBUG,
            LogPreset::Quiet => Level::ERROR,
        }
    }
}

/// Logging configuration built from CLI arguments.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub preset: LogPreset,
    /// Level overrides keyed by full target (e.g. "ccdash::reader" -> DEBUG)
    pub overrides: HashMap<String, Level>,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            preset: LogPreset::Production,
            overrides: HashMap::new(),
            format: LogFormat::Text,
        }
    }
}

impl LogConfig {
    /// Create a new LogConfig from CLI arguments. Overrides naming an unknown
    /// target or level are ignored.
    pub fn from_cli(
        verbose: bool,
        debug: bool,
        quiet: bool,
        log_overrides: Vec<String>,
        format: LogFormat,
    ) -> Self {
        // Quiet beats debug beats verbose
        let preset = if quiet {
            LogPreset::Quiet
        } else if debug {
            LogPreset::Debug
        } else if verbose {
            LogPreset::Verbose
        } else {
            LogPreset::Production
        };

        // "target=level", several per flag when comma separated
        let mut overrides = HashMap::new();
        for override_str in log_overrides {
            for part in override_str.split(',') {
                let Some((target, level_str)) = part.split_once('=') else {
                    continue;
                };
                let Some(full_target) = full_target(target.trim()) else {
                    continue;
                };
                if let Some(level) = parse_level(level_str.trim()) {
                    overrides.insert(full_target, level);
                }
            }
        }

        Self {
            preset,
            overrides,
            format,
        }
    }

    /// Build an EnvFilter from this configuration.
    pub fn build_filter(&self) -> EnvFilter {
        if let Ok(env_filter) = EnvFilter::try_from_default_env() {
            return env_filter;
        }

        let mut directives: Vec<String> = TARGETS
            .iter()
            .map(|t| format!("ccdash::{}={}", t, level_to_str(self.preset.level_for(t))))
            .collect();
        directives.push(format!("tower_http={}", level_to_str(self.preset.tower_http_level())));

        // Overrides come last so they take precedence
        for (target, level) in &self.overrides {
            directives.push(format!("{}={}", target, level_to_str(*level)));
        }

        let filter_str = directives.join(",");
        EnvFilter::try_new(&filter_str).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// "reader" or "ccdash::reader" -> "ccdash::reader"; "tower_http" passes through.
fn full_target(target: &str) -> Option<String> {
    if target == "tower_http" {
        return Some(target.to_string());
    }
    let short = target.strip_prefix("ccdash::").unwrap_or(target);
    TARGETS.contains(&short).then(|| format!("ccdash::{}", short))
}

/// Parse a level string (case-insensitive).
fn parse_level(s: &str) -> Option<Level> {
    match s.to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" | "warning" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

fn level_to_str(level: Level) -> &'static str {
    match level {
        Level::TRACE => "trace",
        Level::DEBUG => "debug",
        Level::INFO => "info",
        Level::WARN => "warn",
        Level::ERROR => "error",
    }
}

/// Initialize the tracing subscriber with the given configuration.
pub fn init(config: &LogConfig) {
    let filter = config.build_filter();

    match config.format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(false)
                        .with_file(false)
                        .with_line_number(false),
                )
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_span_events(FmtSpan::CLOSE),
                )
                .init();
        }
    }
}
