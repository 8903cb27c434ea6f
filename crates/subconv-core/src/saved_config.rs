//! The persisted template selection (singleton, last write wins).

use serde::{Deserialize, Serialize};

use crate::error::{Result, SubconvError};
use crate::store::{KeyValueStore, CONFIG_KEY};
use crate::template::TemplateId;

/// Template the user last selected, reused when a conversion names none.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SavedConfig {
    pub template: TemplateId,
    #[serde(alias = "customConfigUrl")]
    pub custom_template_url: String,
}

impl SavedConfig {
    pub fn new(template: TemplateId, custom_template_url: Option<&str>) -> Self {
        Self {
            template,
            custom_template_url: custom_template_url.unwrap_or_default().trim().to_string(),
        }
    }

    /// Custom URL, or `None` when blank.
    pub fn custom_url(&self) -> Option<&str> {
        let s = self.custom_template_url.trim();
        (!s.is_empty()).then_some(s)
    }
}

/// The saved selection, or `None` if nothing usable was ever saved.
pub fn load_existing<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<SavedConfig>> {
    let Some(raw) = store.get(CONFIG_KEY)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(cfg) => Ok(Some(cfg)),
        Err(e) => {
            tracing::warn!(error = %e, "saved template config is unreadable, ignoring it");
            Ok(None)
        }
    }
}

/// Load the saved selection; a missing or unreadable record yields the default.
pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<SavedConfig> {
    Ok(load_existing(store)?.unwrap_or_default())
}

pub fn save<S: KeyValueStore + ?Sized>(store: &mut S, cfg: &SavedConfig) -> Result<()> {
    let json = serde_json::to_string(cfg).map_err(|source| SubconvError::Serialize {
        what: "saved config",
        source,
    })?;
    store.set(CONFIG_KEY, &json)?;
    tracing::info!(template = %cfg.template, "template selection saved");
    Ok(())
}
