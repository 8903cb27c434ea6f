//! Argument groups shared by several subcommands.

use clap::Args;
use subconv_core::compose::FeatureFlags;
use subconv_core::template::TemplateId;

/// Feature toggles; each one left off is sent as `false`.
#[derive(Debug, Clone, Default, Args)]
pub struct FlagArgs {
    /// Prefix node names with a flag emoji.
    #[arg(long)]
    pub emoji: bool,
    /// Enable UDP relay.
    #[arg(long)]
    pub udp: bool,
    /// Enable TCP Fast Open.
    #[arg(long)]
    pub tfo: bool,
    /// Enable XUDP.
    #[arg(long)]
    pub xudp: bool,
    /// Skip TLS certificate verification.
    #[arg(long)]
    pub scv: bool,
}

impl FlagArgs {
    pub fn to_flags(&self) -> FeatureFlags {
        FeatureFlags {
            emoji: self.emoji,
            udp: self.udp,
            tfo: self.tfo,
            xudp: self.xudp,
            scv: self.scv,
        }
    }
}

/// Template selection; when absent the saved selection is used.
#[derive(Debug, Clone, Default, Args)]
pub struct TemplateArgs {
    /// Rule-set template: default, minimal, full or custom.
    #[arg(long, short = 't', value_name = "NAME")]
    pub template: Option<TemplateId>,

    /// Rule-set URL for the custom template (implies --template custom).
    #[arg(long, value_name = "URL")]
    pub custom_template: Option<String>,
}

impl TemplateArgs {
    /// Template named on the command line, if any. A custom URL alone selects `custom`.
    pub fn requested(&self) -> Option<TemplateId> {
        match (self.template, &self.custom_template) {
            (Some(t), _) => Some(t),
            (None, Some(_)) => Some(TemplateId::Custom),
            (None, None) => None,
        }
    }
}
