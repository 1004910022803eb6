//! CLI command implementations.

pub(crate) mod render;
pub(crate) mod tokens;

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;
use mdc_config::{CliSettings, Config, Feature};
use mdc_engine::MarkdownParser;

use crate::error::CliError;
use crate::output::Output;

pub(crate) use render::RenderArgs;
pub(crate) use tokens::TokensArgs;

/// Arguments shared by every command.
#[derive(Args, Debug)]
pub(crate) struct CommonArgs {
    /// Markdown file to read (default: stdin).
    file: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover mdc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum tokenizer nesting depth (overrides config).
    #[arg(long)]
    max_nesting: Option<usize>,

    /// Disable a syntax feature; may be repeated.
    #[arg(long = "disable", value_name = "FEATURE")]
    disabled: Vec<Feature>,

    /// Enable verbose output (debug logs on stderr).
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    /// Load configuration, build the parser and read the input document.
    fn prepare(self) -> Result<(MarkdownParser, String), CliError> {
        let cli_settings = CliSettings {
            max_nesting: self.max_nesting,
            disabled: self.disabled,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        if self.verbose {
            let output = Output::new();
            match &config.config_path {
                Some(path) => output.info(&format!("Config: {}", path.display())),
                None => output.info("Config: defaults"),
            }
        }

        let md = build_parser(&config)?;
        let src = read_input(self.file.as_deref())?;
        Ok((md, src))
    }
}

/// Parser configured from `config`.
fn build_parser(config: &Config) -> Result<MarkdownParser, CliError> {
    Ok(mdc_syntax::parser(
        config.parser_options(),
        config.mdc_options(),
    )?)
}

/// Read the document from `file`, or from stdin when absent.
fn read_input(file: Option<&Path>) -> Result<String, CliError> {
    let src = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().lock().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(src)
}

#[cfg(test)]
mod tests {
    use mdc_config::SyntaxConfig;
    use mdc_engine::HtmlRenderer;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_build_parser_honors_disabled_features() {
        let config = Config {
            syntax: SyntaxConfig {
                inline_spans: false,
                ..SyntaxConfig::default()
            },
            ..Config::default()
        };
        let md = build_parser(&config).unwrap();
        let html = HtmlRenderer::new().render(&md.parse("[x] :icon\n").unwrap());
        assert_eq!(html, "<p>[x] <icon></icon></p>\n");
    }

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        std::fs::write(&path, "::note\nhi\n::\n").unwrap();
        assert_eq!(read_input(Some(&path)).unwrap(), "::note\nhi\n::\n");
    }

    #[test]
    fn test_read_input_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_input(Some(&dir.path().join("nope.md"))).unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }
}
