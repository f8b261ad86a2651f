//! Rendering contract of the honeypot input
//!
//! The field must stay reachable for naive bots while invisible and
//! unreachable for people, screen readers and password managers.

use crate::domain::sanitize;
use crate::domain::validation_constants::honeypot;

/// Name of the honeypot input in the programmatic form
pub const FIELD_NAME: &str = honeypot::JSON_FIELD;

/// Name of the honeypot input in the native HTML form
pub const NATIVE_FIELD_NAME: &str = honeypot::FORM_FIELD;

/// Attributes the input carries
pub const ATTRIBUTES: [(&str, &str); 4] = [
    ("type", "text"),
    ("tabindex", "-1"),
    ("autocomplete", "off"),
    ("aria-hidden", "true"),
];

/// Inline style keeping the input off-screen with zero size
pub const STYLE: [(&str, &str); 7] = [
    ("position", "absolute"),
    ("left", "-9999px"),
    ("opacity", "0"),
    ("pointer-events", "none"),
    ("height", "0"),
    ("width", "0"),
    ("overflow", "hidden"),
];

/// Markup for a honeypot input called `name`
pub fn render_input(name: &str) -> String {
    let attributes = ATTRIBUTES
        .iter()
        .map(|(key, value)| format!(r#" {key}="{value}""#))
        .collect::<String>();
    let style = STYLE
        .iter()
        .map(|(key, value)| format!("{key}: {value};"))
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        r#"<input name="{}"{attributes} style="{style}">"#,
        sanitize(name)
    )
}
