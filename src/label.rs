//! # Label Content
//!
//! What goes on a label, independent of how it is laid out, plus the small
//! text helpers label entry forms use (prefixes and auto-increment).
//!
//! ## Example
//!
//! ```
//! use cinta::label::{self, LabelContent};
//!
//! let content = LabelContent::new(label::with_prefix(Some("Box"), "18"))
//!     .with_code("https://inventory.local/box/18");
//! assert_eq!(content.display_text, "Box 18");
//!
//! let next = label::increment("Box 18", false);
//! assert_eq!(next, "Box 19");
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{LabelError, Result};

/// Prefixes offered by label entry forms.
pub const PREFIXES: &[&str] = &["Box", "Container", "Shelf", "Asset"];

/// Text and optional code payload for one label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelContent {
    /// Main human-readable text. For the shelf-number template this is the
    /// rotated word; for the storage-code template the caption.
    #[serde(rename = "text")]
    pub display_text: String,

    /// Data encoded in the code bitmap.
    #[serde(default, rename = "payload")]
    pub code_payload: Option<String>,

    /// Whether the layout includes the code element.
    #[serde(default)]
    pub include_code: bool,

    /// Large number for the shelf-number and storage-code templates.
    #[serde(default)]
    pub number: Option<String>,
}

impl LabelContent {
    /// Text-only content.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            display_text: text.into(),
            ..Default::default()
        }
    }

    /// Attach a code payload and enable the code element.
    pub fn with_code(mut self, payload: impl Into<String>) -> Self {
        self.code_payload = Some(payload.into());
        self.include_code = true;
        self
    }

    /// Set the large number (shelf-number and storage-code templates).
    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    /// Disable the code element, keeping any payload.
    pub fn without_code(mut self) -> Self {
        self.include_code = false;
        self
    }

    /// Check the invariants every template relies on.
    ///
    /// - text must be non-empty (whitespace does not count)
    /// - if the code is included, the payload must be non-empty
    pub fn validate(&self) -> Result<()> {
        if self.display_text.trim().is_empty() {
            return Err(LabelError::Validation("Label text is required".to_string()));
        }
        if self.include_code && self.payload().is_none() {
            return Err(LabelError::Validation(
                "A code payload is required when the code is included".to_string(),
            ));
        }
        Ok(())
    }

    /// The payload to encode, if the code element is enabled and non-empty.
    pub fn payload(&self) -> Option<&str> {
        if !self.include_code {
            return None;
        }
        self.code_payload
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }

    /// The trimmed number, or a validation error naming `role`.
    pub fn require_number(&self, role: &str) -> Result<&str> {
        self.number
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| LabelError::Validation(format!("{} requires a number", role)))
    }

    pub fn text(&self) -> &str {
        self.display_text.trim()
    }
}

/// Canonical spelling of one of the [`PREFIXES`], matched ignoring case.
pub fn known_prefix(prefix: &str) -> Result<&'static str> {
    let prefix = prefix.trim();
    PREFIXES
        .iter()
        .copied()
        .find(|known| known.eq_ignore_ascii_case(prefix))
        .ok_or_else(|| {
            LabelError::Validation(format!(
                "Unknown prefix '{}' (expected one of: {})",
                prefix,
                PREFIXES.join(", ")
            ))
        })
}

/// Join an optional prefix and the entered text as `"{prefix} {text}"`.
///
/// Returns the trimmed text unchanged when either part is empty.
pub fn with_prefix(prefix: Option<&str>, text: &str) -> String {
    let text = text.trim();
    match prefix.map(str::trim) {
        Some(prefix) if !prefix.is_empty() && !text.is_empty() => format!("{} {}", prefix, text),
        _ => text.to_string(),
    }
}

/// Bump the trailing number of a label.
///
/// | Input | `prefixed` | Output |
/// |-------|------------|--------|
/// | `"Box 9"` | any | `"Box 10"` |
/// | `"18"` | `true` | `"19"` |
/// | `"Shelf"` | `true` | `"1"` |
/// | `"Shelf"` | `false` | `"Shelf 2"` |
///
/// In prefixed mode the field holds only the number, so text without digits
/// restarts at 1.
pub fn increment(text: &str, prefixed: bool) -> String {
    let digits_start = text
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i);

    if let Some(start) = digits_start {
        let (head, digits) = text.split_at(start);
        return format!("{}{}", head, add_one(digits));
    }

    if prefixed {
        "1".to_string()
    } else {
        format!("{} 2", text)
    }
}

/// Add one to a run of ASCII digits of any length, dropping leading zeros.
fn add_one(digits: &str) -> String {
    let mut out: Vec<char> = digits.trim_start_matches('0').chars().collect();
    let mut i = out.len();
    loop {
        if i == 0 {
            out.insert(0, '1');
            break;
        }
        i -= 1;
        if out[i] == '9' {
            out[i] = '0';
        } else {
            out[i] = (out[i] as u8 + 1) as char;
            break;
        }
    }
    out.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_rejected() {
        for text in ["", "   ", "\t"] {
            let err = LabelContent::new(text).validate().unwrap_err();
            assert!(matches!(err, LabelError::Validation(_)));
        }
    }

    #[test]
    fn test_code_requires_payload() {
        let content = LabelContent::new("BOX 1").with_code("  ");
        assert!(matches!(content.validate(), Err(LabelError::Validation(_))));

        let content = LabelContent {
            display_text: "BOX 1".to_string(),
            code_payload: None,
            include_code: true,
            number: None,
        };
        assert!(content.validate().is_err());
    }

    #[test]
    fn test_payload_ignored_without_code() {
        let content = LabelContent::new("BOX 1").with_code("https://example.com").without_code();
        assert!(content.validate().is_ok());
        assert_eq!(content.payload(), None);
    }

    #[test]
    fn test_require_number() {
        let content = LabelContent::new("SHELF").with_number(" 7 ");
        assert_eq!(content.require_number("shelf label").unwrap(), "7");
        let err = LabelContent::new("SHELF").require_number("shelf label").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: shelf label requires a number");
    }

    #[test]
    fn test_with_prefix() {
        assert_eq!(with_prefix(Some("Box"), "18"), "Box 18");
        assert_eq!(with_prefix(Some("Box"), "  "), "");
        assert_eq!(with_prefix(Some(""), "Box 1"), "Box 1");
        assert_eq!(with_prefix(None, " Label "), "Label");
    }

    #[test]
    fn test_increment() {
        assert_eq!(increment("Box 9", false), "Box 10");
        assert_eq!(increment("18", true), "19");
        assert_eq!(increment("A12", true), "A13");
        assert_eq!(increment("Shelf", true), "1");
        assert_eq!(increment("Shelf", false), "Shelf 2");
        assert_eq!(increment("Bin 007", false), "Bin 8");
    }

    #[test]
    fn test_known_prefix() {
        assert_eq!(known_prefix("container").unwrap(), "Container");
        assert_eq!(known_prefix(" SHELF ").unwrap(), "Shelf");
        let err = known_prefix("Crate").unwrap_err();
        assert!(matches!(err, LabelError::Validation(_)));
        assert!(err.to_string().contains("Box, Container, Shelf, Asset"), "{}", err);
    }

    #[test]
    fn test_increment_long_numbers() {
        assert_eq!(increment("Box 99999999999999999999", false), "Box 100000000000000000000");
        assert_eq!(increment("18446744073709551615", true), "18446744073709551616");
        assert_eq!(increment("Box 0", false), "Box 1");
        assert_eq!(increment("Box 000", false), "Box 1");
    }

    #[test]
    fn test_serde_field_names() {
        let json = r#"{"text": "BOX 1", "payload": "https://example.com/box/1", "include_code": true}"#;
        let content: LabelContent = serde_json::from_str(json).unwrap();
        assert_eq!(content, LabelContent::new("BOX 1").with_code("https://example.com/box/1"));
    }
}
