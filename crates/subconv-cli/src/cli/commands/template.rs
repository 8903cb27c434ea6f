//! `subconv template show|set`.

use anyhow::Result;
use subconv_core::saved_config::{self, SavedConfig};
use subconv_core::store::KeyValueStore;
use subconv_core::template::TemplateId;

use super::Session;
use crate::cli::TemplateAction;

pub fn run_template<S: KeyValueStore>(session: &mut Session<S>, action: TemplateAction) -> Result<()> {
    match action {
        TemplateAction::Show => {
            let current = saved_config::load_existing(&session.store)?.unwrap_or_else(|| {
                SavedConfig::new(session.cfg.default_template.unwrap_or_default(), None)
            });
            for t in TemplateId::ALL {
                let mark = if t == current.template { "*" } else { " " };
                println!("{mark} {:<8} {}", t.as_str(), t.display_name());
            }
            if let Some(url) = current.custom_url() {
                println!("custom template URL: {url}");
            }
        }
        TemplateAction::Set {
            template,
            custom_template,
        } => {
            let prev = saved_config::load(&session.store)?;
            let custom = custom_template.unwrap_or(prev.custom_template_url);
            let cfg = SavedConfig::new(template, Some(custom.as_str()));
            saved_config::save(&mut session.store, &cfg)?;
            println!("Template set to {} ({}).", template.as_str(), template.display_name());
        }
    }
    Ok(())
}
