// 📐 Form Schema - field rules shared by the clothing and wishlist forms
//
// Rules run on submit. Every failing field contributes one error and the
// submission is blocked as a whole; nothing reaches a store.

use std::fmt;
use std::str::FromStr;
use url::Url;

pub const NAME_MAX_CHARS: usize = 40;

// ============================================================================
// VALIDATION RESULT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub context: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.context, self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult<T> = Result<T, Vec<ValidationError>>;

/// Message for `field`, if it failed
#[cfg(test)]
pub(crate) fn message_for<'a>(errors: &'a [ValidationError], field: &str) -> Option<&'a str> {
    errors
        .iter()
        .find(|e| e.field == field)
        .map(|e| e.message.as_str())
}

// ============================================================================
// FIELD VALIDATOR
// ============================================================================

/// Collects field errors for one form submission.
pub struct FieldValidator {
    context: &'static str,
    errors: Vec<ValidationError>,
}

impl FieldValidator {
    pub fn new(context: &'static str) -> Self {
        FieldValidator {
            context,
            errors: Vec::new(),
        }
    }

    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(ValidationError {
            field: field.to_string(),
            message: message.into(),
            context: self.context.to_string(),
        });
    }

    /// Required, 1-40 characters
    pub fn name(&mut self, value: &str) -> Option<String> {
        let chars = value.chars().count();

        if chars == 0 {
            self.push("name", "Name is required");
            None
        } else if chars > NAME_MAX_CHARS {
            self.push("name", format!("Max {} characters", NAME_MAX_CHARS));
            None
        } else {
            Some(value.to_string())
        }
    }

    /// Required, one of `options` (exact wire value)
    pub fn choice<T: FromStr>(
        &mut self,
        field: &str,
        label: &str,
        value: &str,
        options: &[&str],
    ) -> Option<T> {
        if value.is_empty() {
            self.push(field, format!("{} is required", label));
            return None;
        }

        match value.parse::<T>() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                self.push(field, format!("Must be one of: {}", options.join(", ")));
                None
            }
        }
    }

    /// Required hex color (#rgb or #rrggbb)
    pub fn color(&mut self, value: &str) -> Option<String> {
        let value = value.trim();

        if value.is_empty() {
            self.push("color", "Color is required");
            None
        } else if !is_hex_color(value) {
            self.push("color", "Must be a hex color like #1d4ed8");
            None
        } else {
            Some(value.to_string())
        }
    }

    /// Optional absolute URL; empty means absent
    pub fn link(&mut self, value: &str) -> Option<Option<String>> {
        if value.is_empty() {
            return Some(None);
        }

        match Url::parse(value) {
            Ok(_) => Some(Some(value.trim().to_string())),
            Err(_) => {
                self.push("link", "Must be a valid URL");
                None
            }
        }
    }

    /// Optional finite number >= 0; blank means absent
    pub fn price(&mut self, value: &str) -> Option<Option<f64>> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Some(None);
        }

        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() && n >= 0.0 => Some(Some(n)),
            _ => {
                self.push("estimatedPrice", "Must be a non-negative number");
                None
            }
        }
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}

// ============================================================================
// NORMALIZERS
// ============================================================================

/// Split comma-separated input into tags: trimmed, empties dropped,
/// order and duplicates kept.
pub fn parse_tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Inverse of `parse_tags` for pre-filling a form
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

/// Blank text becomes `None`
pub fn optional_text(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

pub fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => {
            (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

// ============================================================================
// TESTS
// ============================================================================
