//! `subconv export <url>` – write a settings export document.

use anyhow::Result;
use chrono::Utc;
use std::path::PathBuf;
use subconv_core::store::KeyValueStore;
use subconv_core::transfer::{default_export_file_name, ExportDocument};

use super::Session;
use crate::cli::args::{FlagArgs, TemplateArgs};

pub fn run_export<S: KeyValueStore>(
    session: &mut Session<S>,
    url: &str,
    template: &TemplateArgs,
    flags: &FlagArgs,
    output: Option<PathBuf>,
) -> Result<PathBuf> {
    let req = session.request_for(url, template, flags)?;
    let composed = session.composer().compose(&req)?;
    if composed.template_fell_back() {
        eprintln!("warning: custom template URL is invalid, using default template");
    }

    let now = Utc::now();
    let path = output.unwrap_or_else(|| PathBuf::from(default_export_file_name(now)));
    ExportDocument::new(&req, &composed, now).write_to_path(&path)?;
    println!("Exported settings to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use subconv_core::config::SubconvConfig;
    use subconv_core::store::MemoryStore;

    #[test]
    fn export_requires_valid_url() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = Session::new(SubconvConfig::default(), MemoryStore::new());
        let out = dir.path().join("x.json");
        assert!(run_export(
            &mut s,
            "",
            &TemplateArgs::default(),
            &FlagArgs::default(),
            Some(out.clone())
        )
        .is_err());
        assert!(!out.exists());

        let written = run_export(
            &mut s,
            "https://example.com/sub",
            &TemplateArgs::default(),
            &FlagArgs::default(),
            Some(out.clone()),
        )
        .unwrap();
        assert_eq!(written, out);
        assert!(out.exists());
    }
}
