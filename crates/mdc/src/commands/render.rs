//! `mdc render` command implementation.

use std::io::{self, Write};

use clap::Args;
use mdc_engine::HtmlRenderer;

use super::CommonArgs;
use crate::error::CliError;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, input, or tokenization fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let (md, src) = self.common.prepare()?;
        let tokens = md.parse(&src)?;
        tracing::debug!(tokens = tokens.len(), "rendering");

        let html = HtmlRenderer::new().render(&tokens);
        io::stdout().lock().write_all(html.as_bytes())?;
        Ok(())
    }
}
