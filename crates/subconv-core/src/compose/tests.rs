//! Tests for the URL composer.

use super::*;
use crate::error::SubconvError;
use crate::template::{DEFAULT_TEMPLATE_PARAM, MINIMAL_TEMPLATE_PARAM};

#[test]
fn default_template_all_flags_off() {
    let out = compose_url("https://example.com/sub", TemplateId::Default, FeatureFlags::default())
        .unwrap();
    let expected = format!(
        "{DEFAULT_BASE_URL}https%3A%2F%2Fexample.com%2Fsub&config={DEFAULT_TEMPLATE_PARAM}\
         &insert=false&expand=true&fdn=false&new_name=true\
         &emoji=false&udp=false&tfo=false&xudp=false&scv=false&list=false"
    );
    assert_eq!(out, expected);
    assert!(out.starts_with("https://url.v1.mk/sub?target=clash&url=https%3A%2F%2Fexample.com%2Fsub"));
    assert!(out.ends_with("&emoji=false&udp=false&tfo=false&xudp=false&scv=false&list=false"));
}

#[test]
fn compose_is_deterministic() {
    let req = ConversionRequest::new("https://sub.example.org/api?token=a+b&flag=clash")
        .with_template(TemplateId::Minimal, None)
        .with_flags(FeatureFlags {
            emoji: true,
            tfo: true,
            ..FeatureFlags::default()
        });
    let a = compose(&req).unwrap();
    let b = compose(&req).unwrap();
    assert_eq!(a, b);
    assert!(a.url.contains(&format!("&config={MINIMAL_TEMPLATE_PARAM}&")));
}

#[test]
fn source_query_string_is_fully_encoded() {
    let out = compose_url(
        "https://sub.example.org/api?token=a b&x=1",
        TemplateId::Default,
        FeatureFlags::default(),
    )
    .unwrap();
    assert!(out.contains("url=https%3A%2F%2Fsub.example.org%2Fapi%3Ftoken%3Da%20b%26x%3D1&config="));
}

#[test]
fn set_flags_emit_true() {
    let out = compose_url("https://example.com/sub", TemplateId::Full, FeatureFlags::all()).unwrap();
    assert!(out.ends_with("&emoji=true&udp=true&tfo=true&xudp=true&scv=true&list=false"));
}

#[test]
fn surrounding_whitespace_is_trimmed() {
    let c = compose(&ConversionRequest::new("  https://example.com/sub\t")).unwrap();
    assert_eq!(c.source_url, "https://example.com/sub");
    assert!(c.url.contains("url=https%3A%2F%2Fexample.com%2Fsub&"));
}

#[test]
fn rejects_empty_and_non_http_sources() {
    assert!(matches!(
        compose(&ConversionRequest::new("")),
        Err(SubconvError::EmptyUrl)
    ));
    assert!(matches!(
        compose(&ConversionRequest::new("trojan://pass@host:443")),
        Err(SubconvError::InvalidUrl(_))
    ));
}

#[test]
fn custom_template_is_embedded_encoded() {
    let req = ConversionRequest::new("https://example.com/sub")
        .with_template(TemplateId::Custom, Some("https://rules.example.com/a.ini".into()));
    let c = compose(&req).unwrap();
    assert!(c
        .url
        .contains("&config=https%3A%2F%2Frules.example.com%2Fa.ini&insert=false"));
    assert_eq!(c.template_name(), "Custom");
    assert!(!c.template_fell_back());
}

#[test]
fn invalid_custom_template_falls_back_but_still_composes() {
    let req = ConversionRequest::new("https://example.com/sub")
        .with_template(TemplateId::Custom, Some("rules.ini".into()));
    let c = compose(&req).unwrap();
    assert!(c.template_fell_back());
    assert_eq!(c.template_name(), "ACL4SSR Online");
    assert!(c.url.contains(&format!("&config={DEFAULT_TEMPLATE_PARAM}&")));
}

#[test]
fn custom_base_url_is_used_verbatim() {
    let composer = Composer::new("https://sub.local/sub?target=clash&url=");
    let c = composer
        .compose(&ConversionRequest::new("http://example.com/s"))
        .unwrap();
    assert!(c.url.starts_with("https://sub.local/sub?target=clash&url=http%3A%2F%2Fexample.com%2Fs&config="));
}

#[test]
fn set_flags_come_before_unset_ones() {
    let flags = FeatureFlags {
        udp: true,
        scv: true,
        ..FeatureFlags::default()
    };
    let out = compose_url("https://example.com/sub", TemplateId::Default, flags).unwrap();
    assert!(out.ends_with(
        "&new_name=true&udp=true&scv=true&emoji=false&tfo=false&xudp=false&list=false"
    ));
}

#[test]
fn uri_component_marks_stay_literal() {
    let out = compose_url(
        "https://example.com/sub?name=a(b)!&x=*'~",
        TemplateId::Default,
        FeatureFlags::default(),
    )
    .unwrap();
    assert!(out.contains("url=https%3A%2F%2Fexample.com%2Fsub%3Fname%3Da(b)!%26x%3D*'~&config="));
}
