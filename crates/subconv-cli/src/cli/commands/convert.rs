//! `subconv convert <url>` – compose one conversion URL.

use anyhow::Result;
use chrono::Utc;
use std::path::PathBuf;
use subconv_core::compose::Composed;
use subconv_core::history::History;
use subconv_core::store::KeyValueStore;
use subconv_core::transfer::{default_export_file_name, ExportDocument};

use super::Session;
use crate::cli::args::{FlagArgs, TemplateArgs};

#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub record_history: bool,
    /// `Some(None)` exports to the default file name.
    pub export: Option<Option<PathBuf>>,
}

pub fn run_convert<S: KeyValueStore>(
    session: &mut Session<S>,
    url: &str,
    template: &TemplateArgs,
    flags: &FlagArgs,
    opts: &ConvertOptions,
) -> Result<Composed> {
    let req = session.request_for(url, template, flags)?;
    tracing::info!(url = %req.source_url.trim(), template = %req.template, "converting");

    let composed = match session.composer().compose(&req) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "conversion rejected");
            return Err(e.into());
        }
    };
    if composed.template_fell_back() {
        eprintln!("warning: custom template URL is invalid, using default template");
    }

    println!("{}", composed.url);
    eprintln!(
        "length: {} chars | template: {}",
        composed.url.len(),
        composed.template_name()
    );

    if opts.record_history {
        let mut history = History::new(&mut session.store);
        if let Err(e) = history.record(&composed.source_url, &composed.url) {
            tracing::warn!(error = %e, "failed to save history");
            eprintln!("warning: could not save history: {e}");
        }
    }

    if let Some(path) = &opts.export {
        let now = Utc::now();
        let path = path
            .clone()
            .unwrap_or_else(|| PathBuf::from(default_export_file_name(now)));
        ExportDocument::new(&req, &composed, now).write_to_path(&path)?;
        eprintln!("exported settings to {}", path.display());
    }

    tracing::info!("conversion succeeded");
    Ok(composed)
}
