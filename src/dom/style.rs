/// Inline style declarations for a single element
///
/// Only the handful of properties the widgets touch are ever set
/// (`overflow`, `display`, `transform`), so this is a plain ordered map
/// rather than a CSS object model.
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    properties: BTreeMap<String, String>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a property value, `None` when unset
    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Set a property, returning the value it replaced
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Option<String> {
        self.properties.insert(name.to_string(), value.into())
    }

    /// Unset a property, returning the value it had
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.properties.remove(name)
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// Format a horizontal translation the way a stylesheet would spell it
///
/// `-0` is normalized to `0` so a track at rest always reads `translateX(0%)`.
pub fn translate_x(percent: f32) -> String {
    let percent = if percent == 0.0 { 0.0 } else { percent };
    format!("translateX({}%)", percent)
}

/// Parse the percentage back out of a `translateX(<n>%)` transform
pub fn parse_translate_x(transform: &str) -> Option<f32> {
    transform
        .trim()
        .strip_prefix("translateX(")?
        .strip_suffix("%)")?
        .trim()
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_returns_previous_value() {
        let mut style = Style::new();
        assert_eq!(style.set("overflow", "hidden"), None);
        assert_eq!(style.set("overflow", "auto"), Some("hidden".to_string()));
        assert_eq!(style.get("overflow"), Some("auto"));
        assert_eq!(style.remove("overflow"), Some("auto".to_string()));
        assert!(style.is_empty());
    }

    #[test]
    fn test_translate_formatting() {
        assert_eq!(translate_x(-40.0), "translateX(-40%)");
        assert_eq!(translate_x(-0.0), "translateX(0%)");
        assert_eq!(translate_x(-12.5), "translateX(-12.5%)");
    }

    #[test]
    fn test_parse_translate() {
        assert_eq!(parse_translate_x("translateX(-200%)"), Some(-200.0));
        assert_eq!(parse_translate_x(" translateX(0%) "), Some(0.0));
        assert_eq!(parse_translate_x("rotate(3deg)"), None);
        assert_eq!(parse_translate_x("translateX(abc%)"), None);
    }
}
