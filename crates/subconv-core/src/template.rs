//! Rule-set templates and their `config=` parameter values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::encode::encode_component;
use crate::error::SubconvError;
use crate::validate::is_valid_url;

/// ACL4SSR Online rule set, pre-encoded as the conversion service expects it.
pub const DEFAULT_TEMPLATE_PARAM: &str = "https%3A%2F%2Fraw%2Egithubusercontent%2Ecom%2FACL4SSR%2FACL4SSR%2Frefs%2Fheads%2Fmaster%2FClash%2Fconfig%2FACL4SSR%5FOnline%2Eini";
/// ACL4SSR Mini rule set.
pub const MINIMAL_TEMPLATE_PARAM: &str = "https%3A%2F%2Fraw%2Egithubusercontent%2Ecom%2FACL4SSR%2FACL4SSR%2Frefs%2Fheads%2Fmaster%2FClash%2Fconfig%2FACL4SSR%5FMini%2Eini";
/// ACL4SSR Online Full rule set.
pub const FULL_TEMPLATE_PARAM: &str = "https%3A%2F%2Fraw%2Egithubusercontent%2Ecom%2FACL4SSR%2FACL4SSR%2Frefs%2Fheads%2Fmaster%2FClash%2Fconfig%2FACL4SSR%5FOnline%5FFull%2Eini";

/// Which rule-set template the conversion service should apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    #[default]
    Default,
    Minimal,
    Full,
    Custom,
}

impl TemplateId {
    pub const ALL: [TemplateId; 4] = [
        TemplateId::Default,
        TemplateId::Minimal,
        TemplateId::Full,
        TemplateId::Custom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateId::Default => "default",
            TemplateId::Minimal => "minimal",
            TemplateId::Full => "full",
            TemplateId::Custom => "custom",
        }
    }

    /// Human-readable name, as shown next to conversion results.
    pub fn display_name(self) -> &'static str {
        match self {
            TemplateId::Default => "ACL4SSR Online",
            TemplateId::Minimal => "ACL4SSR Mini",
            TemplateId::Full => "ACL4SSR Full",
            TemplateId::Custom => "Custom",
        }
    }

    /// Static `config=` value; `None` for `Custom`, which is caller-supplied.
    pub fn builtin_param(self) -> Option<&'static str> {
        match self {
            TemplateId::Default => Some(DEFAULT_TEMPLATE_PARAM),
            TemplateId::Minimal => Some(MINIMAL_TEMPLATE_PARAM),
            TemplateId::Full => Some(FULL_TEMPLATE_PARAM),
            TemplateId::Custom => None,
        }
    }

    /// Parse leniently: unknown names map to `Default`. Used for stored and imported data.
    pub fn from_name_lossy(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = SubconvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(TemplateId::Default),
            "minimal" => Ok(TemplateId::Minimal),
            "full" => Ok(TemplateId::Full),
            "custom" => Ok(TemplateId::Custom),
            other => Err(SubconvError::UnknownTemplate(other.to_string())),
        }
    }
}

/// Outcome of mapping a template selection to its `config=` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTemplate {
    /// Template actually used (may be `Default` after a fallback).
    pub used: TemplateId,
    /// Encoded value placed after `&config=`.
    pub param: String,
    /// Set when a custom URL was supplied but rejected.
    pub fell_back: bool,
}

/// Resolve `id` (plus the custom URL for `Custom`) to a `config=` parameter.
///
/// An invalid custom URL downgrades to the default template with `fell_back` set.
/// A whitespace-only URL counts as invalid. `Custom` with no URL (or `""`) also
/// resolves to the default, without a warning.
pub fn resolve_template(id: TemplateId, custom_url: Option<&str>) -> ResolvedTemplate {
    let custom = custom_url.filter(|s| !s.is_empty()).map(str::trim);

    if id == TemplateId::Custom {
        if let Some(custom) = custom {
            if is_valid_url(custom) {
                return ResolvedTemplate {
                    used: TemplateId::Custom,
                    param: encode_component(custom),
                    fell_back: false,
                };
            }
            tracing::warn!(custom_url = custom, "custom template URL is invalid, using default template");
            return ResolvedTemplate {
                used: TemplateId::Default,
                param: DEFAULT_TEMPLATE_PARAM.to_string(),
                fell_back: true,
            };
        }
    }

    match id.builtin_param() {
        Some(p) => ResolvedTemplate {
            used: id,
            param: p.to_string(),
            fell_back: false,
        },
        None => ResolvedTemplate {
            used: TemplateId::Default,
            param: DEFAULT_TEMPLATE_PARAM.to_string(),
            fell_back: false,
        },
    }
}
