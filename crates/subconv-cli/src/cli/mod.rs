//! CLI for subconv, the Clash subscription URL composer.

mod args;
mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use subconv_core::config;
use subconv_core::store::KeyValueStore;
use subconv_core::template::TemplateId;

use args::{FlagArgs, TemplateArgs};
use commands::{
    run_batch, run_completions, run_convert, run_export, run_history, run_import, run_man,
    run_template, ConvertOptions, Session,
};

/// Top-level CLI for subconv.
#[derive(Debug, Parser)]
#[command(name = "subconv")]
#[command(about = "subconv: turn a subscription URL into a Clash conversion URL", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Convert one subscription URL and print the result.
    Convert {
        /// HTTP/HTTPS subscription URL.
        url: String,

        #[command(flatten)]
        template: TemplateArgs,

        #[command(flatten)]
        flags: FlagArgs,

        /// Do not record this conversion in history.
        #[arg(long)]
        no_history: bool,

        /// Also write an export document (default name clash-config-<millis>.json).
        #[arg(long, value_name = "PATH")]
        export: Option<Option<PathBuf>>,
    },

    /// Convert every URL in a newline-separated list (file or stdin).
    Batch {
        /// File with one URL per line; reads stdin when omitted or "-".
        input: Option<PathBuf>,

        #[command(flatten)]
        template: TemplateArgs,

        #[command(flatten)]
        flags: FlagArgs,

        /// Pause between items in milliseconds (overrides config).
        #[arg(long, value_name = "MS")]
        delay_ms: Option<u64>,

        /// Do not record conversions in history.
        #[arg(long)]
        no_history: bool,
    },

    /// Show or clear conversion history.
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Show or change the saved template selection.
    Template {
        #[command(subcommand)]
        action: TemplateAction,
    },

    /// Convert a URL and write its settings to a JSON export document.
    Export {
        /// HTTP/HTTPS subscription URL.
        url: String,

        #[command(flatten)]
        template: TemplateArgs,

        #[command(flatten)]
        flags: FlagArgs,

        /// Output file (default clash-config-<millis>.json in the current directory).
        #[arg(long, short = 'o', value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Restore settings from an export document.
    Import {
        /// Path to the JSON export document.
        path: PathBuf,

        /// Re-run the conversion with the restored settings.
        #[arg(long)]
        convert: bool,
    },

    /// Print shell completions.
    Completions {
        shell: Shell,
    },

    /// Print the man page.
    Man,
}

#[derive(Debug, Subcommand)]
pub enum HistoryAction {
    /// List recent conversions, newest first.
    List,
    /// Print one entry (0 = most recent).
    Show { index: usize },
    /// Remove all history.
    Clear,
}

#[derive(Debug, Subcommand)]
pub enum TemplateAction {
    /// Print the saved selection and the available templates.
    Show,
    /// Save a new selection.
    Set {
        template: TemplateId,
        /// Rule-set URL used with the `custom` template.
        #[arg(long, value_name = "URL")]
        custom_template: Option<String>,
    },
}

fn open_session() -> Result<Session> {
    let cfg = config::load_or_init()?;
    tracing::debug!("loaded config: {:?}", cfg);
    Session::open(cfg)
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        cli.command.run(open_session).await
    }

    /// Execute the command. `open` is only called by commands that touch the store.
    pub async fn run<S, F>(self, open: F) -> Result<()>
    where
        S: KeyValueStore,
        F: FnOnce() -> Result<Session<S>>,
    {
        match self {
            CliCommand::Convert {
                url,
                template,
                flags,
                no_history,
                export,
            } => {
                let opts = ConvertOptions {
                    record_history: !no_history,
                    export,
                };
                run_convert(&mut open()?, &url, &template, &flags, &opts)?;
            }
            CliCommand::Batch {
                input,
                template,
                flags,
                delay_ms,
                no_history,
            } => {
                let mut session = open()?;
                run_batch(&mut session, input.as_deref(), &template, &flags, delay_ms, !no_history)
                    .await?;
            }
            CliCommand::History { action } => run_history(&mut open()?, action)?,
            CliCommand::Template { action } => run_template(&mut open()?, action)?,
            CliCommand::Export {
                url,
                template,
                flags,
                output,
            } => {
                run_export(&mut open()?, &url, &template, &flags, output)?;
            }
            CliCommand::Import { path, convert } => {
                run_import(&mut open()?, &path, convert)?;
            }
            CliCommand::Completions { shell } => run_completions(shell)?,
            CliCommand::Man => run_man()?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
