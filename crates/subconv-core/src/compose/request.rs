//! Conversion request and feature flags.

use serde::{Deserialize, Serialize};

use crate::template::TemplateId;

/// Boolean feature toggles passed to the conversion service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    /// Prefix node names with a country flag emoji.
    pub emoji: bool,
    /// Enable UDP relay.
    pub udp: bool,
    /// TCP Fast Open.
    pub tfo: bool,
    pub xudp: bool,
    /// Skip TLS certificate verification.
    pub scv: bool,
}

impl FeatureFlags {
    /// Every flag set.
    pub fn all() -> Self {
        Self {
            emoji: true,
            udp: true,
            tfo: true,
            xudp: true,
            scv: true,
        }
    }

    /// `(key, value)` pairs in emoji, udp, tfo, xudp, scv order.
    pub fn pairs(&self) -> [(&'static str, bool); 5] {
        [
            ("emoji", self.emoji),
            ("udp", self.udp),
            ("tfo", self.tfo),
            ("xudp", self.xudp),
            ("scv", self.scv),
        ]
    }

    /// Set flags as `key=true` first, then unset ones as `key=false`, then `list=false`.
    /// Each group keeps the emoji, udp, tfo, xudp, scv order.
    pub fn to_query(&self) -> String {
        let pairs = self.pairs();
        let set = pairs.iter().filter(|(_, v)| *v);
        let unset = pairs.iter().filter(|(_, v)| !*v);
        let mut parts: Vec<String> = set.chain(unset).map(|(k, v)| format!("{k}={v}")).collect();
        parts.push("list=false".to_string());
        parts.join("&")
    }
}

/// Everything needed to build one converted URL.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConversionRequest {
    pub source_url: String,
    pub template: TemplateId,
    /// Only consulted when `template` is `Custom`.
    pub custom_template_url: Option<String>,
    pub flags: FeatureFlags,
}

impl ConversionRequest {
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            ..Self::default()
        }
    }

    pub fn with_template(mut self, template: TemplateId, custom_url: Option<String>) -> Self {
        self.template = template;
        self.custom_template_url = custom_url;
        self
    }

    pub fn with_flags(mut self, flags: FeatureFlags) -> Self {
        self.flags = flags;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_query_puts_set_flags_first() {
        assert_eq!(
            FeatureFlags::default().to_query(),
            "emoji=false&udp=false&tfo=false&xudp=false&scv=false&list=false"
        );
        let flags = FeatureFlags {
            udp: true,
            scv: true,
            ..FeatureFlags::default()
        };
        assert_eq!(
            flags.to_query(),
            "udp=true&scv=true&emoji=false&tfo=false&xudp=false&list=false"
        );
        assert_eq!(
            FeatureFlags::all().to_query(),
            "emoji=true&udp=true&tfo=true&xudp=true&scv=true&list=false"
        );
    }

    #[test]
    fn missing_flag_fields_deserialize_as_false() {
        let flags: FeatureFlags = serde_json::from_str(r#"{"emoji":true}"#).unwrap();
        assert!(flags.emoji);
        assert!(!flags.udp && !flags.tfo && !flags.xudp && !flags.scv);
    }
}
