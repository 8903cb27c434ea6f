//! `subconv import <path>` – restore settings from an export document.

use anyhow::Result;
use std::path::Path;
use subconv_core::history::History;
use subconv_core::saved_config;
use subconv_core::store::KeyValueStore;
use subconv_core::transfer::{import_from_path, ImportedSettings};

use super::Session;

fn on_off(b: bool) -> &'static str {
    if b {
        "on"
    } else {
        "off"
    }
}

pub fn run_import<S: KeyValueStore>(
    session: &mut Session<S>,
    path: &Path,
    convert: bool,
) -> Result<ImportedSettings> {
    let imported = match import_from_path(path) {
        Ok(i) => i,
        Err(e) => {
            tracing::error!(error = %e, "import aborted");
            return Err(e.into());
        }
    };

    let current = saved_config::load(&session.store)?;
    let selection = imported.merged_template(&current);
    saved_config::save(&mut session.store, &selection)?;

    if let Some(url) = &imported.original_url {
        println!("url:       {url}");
    }
    if let Some(url) = &imported.converted_url {
        println!("converted: {url}");
    }
    println!(
        "template:  {} ({})",
        selection.template.as_str(),
        selection.template.display_name()
    );
    if let Some(url) = selection.custom_url() {
        println!("custom:    {url}");
    }
    let line: Vec<String> = imported
        .flags
        .pairs()
        .iter()
        .map(|(k, v)| format!("{k}={}", on_off(*v)))
        .collect();
    println!("flags:     {}", line.join(" "));

    if convert {
        match imported.to_request(&current) {
            Some(req) => {
                let composed = session.composer().compose(&req)?;
                println!("{}", composed.url);
                if let Err(e) = History::new(&mut session.store).record(&composed.source_url, &composed.url) {
                    tracing::warn!(error = %e, "failed to save history");
                }
            }
            None => eprintln!("warning: document has no originalUrl, nothing to convert"),
        }
    }

    Ok(imported)
}
