//! `mdc tokens` command implementation.

use std::io::{self, Write};

use clap::Args;

use super::CommonArgs;
use crate::error::CliError;

/// Arguments for the tokens command.
#[derive(Args)]
pub(crate) struct TokensArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

impl TokensArgs {
    /// Execute the tokens command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, input, or tokenization fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let (md, src) = self.common.prepare()?;
        let tokens = md.parse(&src)?;

        let json = if self.pretty {
            serde_json::to_string_pretty(&tokens)?
        } else {
            serde_json::to_string(&tokens)?
        };
        writeln!(io::stdout().lock(), "{json}")?;
        Ok(())
    }
}
