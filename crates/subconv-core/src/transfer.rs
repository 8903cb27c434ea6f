//! Export and import of a conversion's settings as a JSON document.
//!
//! Document shape:
//!
//! ```json
//! {
//!   "originalUrl": "https://example.com/sub",
//!   "convertedUrl": "https://url.v1.mk/sub?...",
//!   "config": {
//!     "emoji": false, "udp": true, "tfo": false, "xudp": false, "scv": false,
//!     "template": "default", "templateName": "ACL4SSR Online",
//!     "customTemplateUrl": ""
//!   },
//!   "timestamp": "2024-05-01T12:00:00Z",
//!   "version": "1.0.0"
//! }
//! ```

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::compose::{Composed, ConversionRequest, FeatureFlags};
use crate::error::{Result, SubconvError};
use crate::saved_config::SavedConfig;
use crate::template::TemplateId;

/// Format version written into every export.
pub const EXPORT_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub original_url: String,
    pub converted_url: String,
    pub config: ExportedSettings,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedSettings {
    #[serde(flatten)]
    pub flags: FeatureFlags,
    pub template: TemplateId,
    pub template_name: String,
    pub custom_template_url: String,
}

impl ExportDocument {
    /// Build from the request as the user made it and its composed result.
    ///
    /// The requested template is recorded even if composition fell back to the default.
    pub fn new(req: &ConversionRequest, composed: &Composed, at: DateTime<Utc>) -> Self {
        Self {
            original_url: composed.source_url.clone(),
            converted_url: composed.url.clone(),
            config: ExportedSettings {
                flags: req.flags,
                template: req.template,
                template_name: req.template.display_name().to_string(),
                custom_template_url: req.custom_template_url.clone().unwrap_or_default(),
            },
            timestamp: at,
            version: EXPORT_VERSION.to_string(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|source| SubconvError::Serialize {
            what: "export document",
            source,
        })
    }

    /// Write pretty-printed JSON to `path`, creating parent dirs if needed.
    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        let json = self.to_json_pretty()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| SubconvError::io("create dir", parent, e))?;
        }
        fs::write(path, json).map_err(|e| SubconvError::io("write export", path, e))?;
        tracing::info!(path = %path.display(), "settings exported");
        Ok(())
    }
}

/// `clash-config-<unix millis>.json`.
pub fn default_export_file_name(at: DateTime<Utc>) -> String {
    format!("clash-config-{}.json", at.timestamp_millis())
}

/// Fields recovered from an imported document. Absent fields stay `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportedSettings {
    pub original_url: Option<String>,
    pub converted_url: Option<String>,
    pub flags: FeatureFlags,
    pub template: Option<TemplateId>,
    pub custom_template_url: Option<String>,
}

impl ImportedSettings {
    /// Template selection to persist: imported values win over `current`.
    pub fn merged_template(&self, current: &SavedConfig) -> SavedConfig {
        SavedConfig {
            template: self.template.unwrap_or(current.template),
            custom_template_url: self
                .custom_template_url
                .clone()
                .unwrap_or_else(|| current.custom_template_url.clone()),
        }
    }

    /// Rebuild a request; `None` when the document carried no source URL.
    pub fn to_request(&self, current: &SavedConfig) -> Option<ConversionRequest> {
        let url = self.original_url.as_deref()?;
        let tpl = self.merged_template(current);
        Some(
            ConversionRequest::new(url)
                .with_template(tpl.template, tpl.custom_url().map(str::to_string))
                .with_flags(self.flags),
        )
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ImportDocument {
    original_url: Option<String>,
    converted_url: Option<String>,
    config: Option<ImportConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ImportConfig {
    emoji: Option<bool>,
    udp: Option<bool>,
    tfo: Option<bool>,
    xudp: Option<bool>,
    scv: Option<bool>,
    template: Option<String>,
    #[serde(alias = "customConfigUrl")]
    custom_template_url: Option<String>,
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.is_empty())
}

/// Parse an export document. Flags missing from the document read as `false`;
/// an unknown template name reads as `default`.
pub fn parse_import(json: &str) -> serde_json::Result<ImportedSettings> {
    let doc: ImportDocument = serde_json::from_str(json)?;
    let mut out = ImportedSettings {
        original_url: non_empty(doc.original_url),
        converted_url: non_empty(doc.converted_url),
        ..ImportedSettings::default()
    };
    if let Some(c) = doc.config {
        out.flags = FeatureFlags {
            emoji: c.emoji.unwrap_or(false),
            udp: c.udp.unwrap_or(false),
            tfo: c.tfo.unwrap_or(false),
            xudp: c.xudp.unwrap_or(false),
            scv: c.scv.unwrap_or(false),
        };
        out.template = non_empty(c.template).map(|t| TemplateId::from_name_lossy(&t));
        out.custom_template_url = non_empty(c.custom_template_url);
    }
    Ok(out)
}

/// Read and parse an export document from disk. Nothing is applied on failure.
pub fn import_from_path(path: &Path) -> Result<ImportedSettings> {
    let data = fs::read_to_string(path).map_err(|e| SubconvError::io("read import", path, e))?;
    let settings = parse_import(&data).map_err(|source| SubconvError::ImportParse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "settings imported");
    Ok(settings)
}
