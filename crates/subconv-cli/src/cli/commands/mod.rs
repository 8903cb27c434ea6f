//! CLI command handlers. Each command is in its own file.

mod batch;
mod completions;
mod convert;
mod export;
mod history;
mod import;
mod template;

pub use batch::run_batch;
pub use completions::{run_completions, run_man};
pub use convert::{run_convert, ConvertOptions};
pub use export::run_export;
pub use history::run_history;
pub use import::run_import;
pub use template::run_template;

use anyhow::Result;
use subconv_core::compose::{Composer, ConversionRequest};
use subconv_core::config::SubconvConfig;
use subconv_core::saved_config::{self, SavedConfig};
use subconv_core::store::{FileStore, KeyValueStore};

use super::args::{FlagArgs, TemplateArgs};

/// Loaded config plus the key-value store commands read and write.
pub struct Session<S = FileStore> {
    pub cfg: SubconvConfig,
    pub store: S,
}

impl Session<FileStore> {
    /// Open the store named by `cfg.data_dir`, or the default XDG data dir.
    pub fn open(cfg: SubconvConfig) -> Result<Self> {
        let store = match &cfg.data_dir {
            Some(dir) => FileStore::open_at(dir)?,
            None => FileStore::open_default()?,
        };
        tracing::debug!("store at {}", store.dir().display());
        Ok(Self { cfg, store })
    }
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(cfg: SubconvConfig, store: S) -> Self {
        Self { cfg, store }
    }

    pub fn composer(&self) -> Composer {
        self.cfg.composer()
    }

    /// Template selection for this command.
    ///
    /// A template named on the command line is saved (last write wins) and used;
    /// otherwise the saved selection, then the config default, applies.
    pub fn selection(&mut self, args: &TemplateArgs) -> Result<SavedConfig> {
        let saved = saved_config::load_existing(&self.store)?;

        let Some(template) = args.requested() else {
            return Ok(saved.unwrap_or_else(|| {
                SavedConfig::new(self.cfg.default_template.unwrap_or_default(), None)
            }));
        };

        let custom = args
            .custom_template
            .clone()
            .or_else(|| saved.as_ref().map(|s| s.custom_template_url.clone()));
        let selection = SavedConfig::new(template, custom.as_deref());
        if saved.as_ref() != Some(&selection) {
            saved_config::save(&mut self.store, &selection)?;
            tracing::info!("switched to {} template", template.display_name());
        }
        Ok(selection)
    }

    /// Build a request from command-line arguments and the current selection.
    pub fn request_for(
        &mut self,
        url: &str,
        template: &TemplateArgs,
        flags: &FlagArgs,
    ) -> Result<ConversionRequest> {
        let sel = self.selection(template)?;
        Ok(ConversionRequest::new(url)
            .with_template(sel.template, sel.custom_url().map(str::to_string))
            .with_flags(flags.to_flags()))
    }
}

/// Shorten `s` to `max` characters, marking the cut with "...".
pub(crate) fn truncate_for_display(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use subconv_core::store::MemoryStore;
    use subconv_core::template::TemplateId;

    fn session() -> Session<MemoryStore> {
        Session::new(SubconvConfig::default(), MemoryStore::new())
    }

    #[test]
    fn selection_defaults_then_remembers_choice() {
        let mut s = session();
        let none = TemplateArgs::default();
        assert_eq!(s.selection(&none).unwrap().template, TemplateId::Default);

        let full = TemplateArgs {
            template: Some(TemplateId::Full),
            custom_template: None,
        };
        assert_eq!(s.selection(&full).unwrap().template, TemplateId::Full);
        assert_eq!(s.selection(&none).unwrap().template, TemplateId::Full);
    }

    #[test]
    fn custom_url_alone_selects_custom_and_is_kept() {
        let mut s = session();
        let args = TemplateArgs {
            template: None,
            custom_template: Some("https://rules.example.com/r.ini".into()),
        };
        let sel = s.selection(&args).unwrap();
        assert_eq!(sel.template, TemplateId::Custom);

        // Switching away and back keeps the saved custom URL.
        let minimal = TemplateArgs {
            template: Some(TemplateId::Minimal),
            custom_template: None,
        };
        s.selection(&minimal).unwrap();
        let back = TemplateArgs {
            template: Some(TemplateId::Custom),
            custom_template: None,
        };
        assert_eq!(
            s.selection(&back).unwrap().custom_url(),
            Some("https://rules.example.com/r.ini")
        );
    }

    #[test]
    fn config_default_template_applies_when_nothing_saved() {
        let cfg = SubconvConfig {
            default_template: Some(TemplateId::Minimal),
            ..SubconvConfig::default()
        };
        let mut s = Session::new(cfg, MemoryStore::new());
        assert_eq!(
            s.selection(&TemplateArgs::default()).unwrap().template,
            TemplateId::Minimal
        );
    }

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate_for_display("abc", 5), "abc");
        assert_eq!(truncate_for_display("abcdef", 3), "abc...");
        assert_eq!(truncate_for_display("订阅订阅订阅", 2), "订阅...");
    }
}
