//! URL composer: subscription URL + template + flags → conversion-service URL.
//!
//! Output layout:
//!
//! ```text
//! <base><encoded source>&config=<template><fixed params>&<flag params>&list=false
//! ```
//!
//! Composition is a pure function of the request and the base URL; validation of
//! the source URL happens first and is the only way it can fail.

mod request;

pub use request::{ConversionRequest, FeatureFlags};

use crate::encode::encode_component;
use crate::error::Result;
use crate::template::{resolve_template, ResolvedTemplate, TemplateId};
use crate::validate::validate_source_url;

/// Conversion service endpoint; the encoded source URL is appended directly.
pub const DEFAULT_BASE_URL: &str = "https://url.v1.mk/sub?target=clash&url=";

/// Parameters sent with every conversion, between template and flags.
pub const FIXED_PARAMS: &str = "&insert=false&expand=true&fdn=false&new_name=true";

/// A composed URL plus how its template was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composed {
    /// Trimmed source URL that was encoded.
    pub source_url: String,
    pub url: String,
    pub template: ResolvedTemplate,
}

impl Composed {
    pub fn template_name(&self) -> &'static str {
        self.template.used.display_name()
    }

    /// True when a custom template was requested but the default was used instead.
    pub fn template_fell_back(&self) -> bool {
        self.template.fell_back
    }
}

/// Composer bound to a conversion-service base URL.
#[derive(Debug, Clone)]
pub struct Composer {
    base_url: String,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl Composer {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Validate `req.source_url` and build the converted URL.
    pub fn compose(&self, req: &ConversionRequest) -> Result<Composed> {
        let source = validate_source_url(&req.source_url)?;
        let template = resolve_template(req.template, req.custom_template_url.as_deref());
        let url = self.compose_parts(source, &template.param, &req.flags);
        Ok(Composed {
            source_url: source.to_string(),
            url,
            template,
        })
    }

    fn compose_parts(&self, source: &str, template_param: &str, flags: &FeatureFlags) -> String {
        let encoded = encode_component(source);
        let flag_query = flags.to_query();
        let mut out = String::with_capacity(
            self.base_url.len()
                + encoded.len()
                + template_param.len()
                + FIXED_PARAMS.len()
                + flag_query.len()
                + 16,
        );
        out.push_str(&self.base_url);
        out.push_str(&encoded);
        out.push_str("&config=");
        out.push_str(template_param);
        out.push_str(FIXED_PARAMS);
        out.push('&');
        out.push_str(&flag_query);
        out
    }
}

/// Compose with the default conversion service.
pub fn compose(req: &ConversionRequest) -> Result<Composed> {
    Composer::default().compose(req)
}

/// Shorthand for a built-in template (no custom URL).
pub fn compose_url(source_url: &str, template: TemplateId, flags: FeatureFlags) -> Result<String> {
    let req = ConversionRequest::new(source_url)
        .with_template(template, None)
        .with_flags(flags);
    compose(&req).map(|c| c.url)
}

#[cfg(test)]
mod tests;
