//! Configuration for the MDC tools.
//!
//! Parses `mdc.toml` with serde and discovers it in the current directory
//! or its parents. Every field has a default, so an empty file (or no file
//! at all) yields the stock parser.
//!
//! ```toml
//! [parser]
//! max_nesting = 100
//!
//! [syntax]
//! containers = true
//! shorthand = true
//! front_matter = true
//! slots = true
//! inline_components = true
//! inline_spans = true
//! min_markers = 2
//! ```
//!
//! CLI settings can be applied during load via [`CliSettings`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use mdc_engine::{DEFAULT_MAX_NESTING, ParserOptions};
use mdc_syntax::{MIN_MARKERS, MdcOptions};
use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdc.toml";

/// CLI settings that override configuration file values.
///
/// Only non-None values (and listed features) override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the recursion ceiling.
    pub max_nesting: Option<usize>,
    /// Features to switch off.
    pub disabled: Vec<Feature>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Tokenizer limits.
    pub parser: ParserConfig,
    /// Component syntax toggles.
    pub syntax: SyntaxConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Tokenizer limits.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ParserConfig {
    /// Maximum depth of recursive tokenization.
    pub max_nesting: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_nesting: DEFAULT_MAX_NESTING,
        }
    }
}

/// Component syntax toggles.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
#[allow(clippy::struct_excessive_bools)]
pub struct SyntaxConfig {
    pub containers: bool,
    pub shorthand: bool,
    pub front_matter: bool,
    pub slots: bool,
    pub inline_components: bool,
    pub inline_spans: bool,
    /// Shortest colon run that opens a container.
    pub min_markers: usize,
}

impl Default for SyntaxConfig {
    fn default() -> Self {
        Self {
            containers: true,
            shorthand: true,
            front_matter: true,
            slots: true,
            inline_components: true,
            inline_spans: true,
            min_markers: MIN_MARKERS,
        }
    }
}

impl SyntaxConfig {
    /// Switch a single feature on or off.
    pub fn set(&mut self, feature: Feature, enabled: bool) {
        let flag = match feature {
            Feature::Containers => &mut self.containers,
            Feature::Shorthand => &mut self.shorthand,
            Feature::FrontMatter => &mut self.front_matter,
            Feature::Slots => &mut self.slots,
            Feature::InlineComponents => &mut self.inline_components,
            Feature::InlineSpans => &mut self.inline_spans,
        };
        *flag = enabled;
    }
}

/// A syntax feature that can be toggled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feature {
    Containers,
    Shorthand,
    FrontMatter,
    Slots,
    InlineComponents,
    InlineSpans,
}

impl Feature {
    /// All features, in config file order.
    pub const ALL: [Self; 6] = [
        Self::Containers,
        Self::Shorthand,
        Self::FrontMatter,
        Self::Slots,
        Self::InlineComponents,
        Self::InlineSpans,
    ];

    /// Name as written on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Containers => "containers",
            Self::Shorthand => "shorthand",
            Self::FrontMatter => "front-matter",
            Self::Slots => "slots",
            Self::InlineComponents => "inline-components",
            Self::InlineSpans => "inline-spans",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = ConfigError;

    /// Accepts both `front-matter` and `front_matter` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|feature| feature.name() == wanted)
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|f| f.name()).collect();
                ConfigError::Validation(format!(
                    "unknown feature `{s}` (expected one of: {})",
                    known.join(", ")
                ))
            })
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `mdc.toml` in the current directory and its parents,
    /// falling back to defaults.
    ///
    /// CLI settings are applied after loading and validated with the rest.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or a value is out of range.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_from(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(max_nesting) = settings.max_nesting {
            self.parser.max_nesting = max_nesting;
        }
        for &feature in &settings.disabled {
            self.syntax.set(feature, false);
        }
    }

    /// Search for a config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any value is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.parser.max_nesting == 0 {
            return Err(ConfigError::Validation(
                "parser.max_nesting must be greater than 0".to_owned(),
            ));
        }
        if self.syntax.min_markers < MIN_MARKERS {
            return Err(ConfigError::Validation(format!(
                "syntax.min_markers must be at least {MIN_MARKERS}"
            )));
        }
        Ok(())
    }

    /// Engine options derived from `[parser]`.
    #[must_use]
    pub fn parser_options(&self) -> ParserOptions {
        ParserOptions {
            max_nesting: self.parser.max_nesting,
        }
    }

    /// Plugin options derived from `[syntax]`.
    #[must_use]
    pub fn mdc_options(&self) -> MdcOptions {
        let syntax = &self.syntax;
        MdcOptions {
            containers: syntax.containers,
            shorthand: syntax.shorthand,
            front_matter: syntax.front_matter,
            slots: syntax.slots,
            inline_components: syntax.inline_components,
            inline_spans: syntax.inline_spans,
            min_markers: syntax.min_markers,
        }
    }
}
