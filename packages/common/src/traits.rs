//! Trait keys and values
//!
//! Every user-editable property of a button instance is addressed by a
//! [`TraitKey`]. Keys carry the wire name that trait-editing widgets and
//! persisted projects use, so hosts can still speak in strings at the edge
//! while the engine dispatches on the enum.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CommonError;

/// Enumerated trait identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TraitKey {
    #[serde(rename = "button-text")]
    Text,
    #[serde(rename = "icon-type")]
    IconType,
    #[serde(rename = "svg-code")]
    SvgCode,
    #[serde(rename = "icon-position")]
    IconPosition,
    #[serde(rename = "icon-size")]
    IconSize,
    #[serde(rename = "icon-color")]
    IconColor,
    #[serde(rename = "type")]
    ButtonType,
    #[serde(rename = "onclick")]
    OnClick,
    #[serde(rename = "disabled")]
    Disabled,
    #[serde(rename = "button-style")]
    StylePreset,
    #[serde(rename = "custom-bg-color")]
    CustomBgColor,
    #[serde(rename = "custom-text-color")]
    CustomTextColor,
    #[serde(rename = "button-size")]
    SizePreset,
    #[serde(rename = "custom-padding")]
    CustomPadding,
    #[serde(rename = "custom-font-size")]
    CustomFontSize,
    #[serde(rename = "border-radius")]
    BorderRadius,
    #[serde(rename = "href")]
    Href,
}

/// The shape of value a trait accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Integer,
    Boolean,
    Choice,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Text => "text",
            ValueKind::Integer => "integer",
            ValueKind::Boolean => "boolean",
            ValueKind::Choice => "one of the declared options",
        };
        f.write_str(name)
    }
}

impl TraitKey {
    pub const ALL: [TraitKey; 17] = [
        TraitKey::Text,
        TraitKey::IconType,
        TraitKey::SvgCode,
        TraitKey::IconPosition,
        TraitKey::IconSize,
        TraitKey::IconColor,
        TraitKey::ButtonType,
        TraitKey::OnClick,
        TraitKey::Disabled,
        TraitKey::StylePreset,
        TraitKey::CustomBgColor,
        TraitKey::CustomTextColor,
        TraitKey::SizePreset,
        TraitKey::CustomPadding,
        TraitKey::CustomFontSize,
        TraitKey::BorderRadius,
        TraitKey::Href,
    ];

    /// Wire name used by widgets and persisted state
    pub fn as_str(&self) -> &'static str {
        match self {
            TraitKey::Text => "button-text",
            TraitKey::IconType => "icon-type",
            TraitKey::SvgCode => "svg-code",
            TraitKey::IconPosition => "icon-position",
            TraitKey::IconSize => "icon-size",
            TraitKey::IconColor => "icon-color",
            TraitKey::ButtonType => "type",
            TraitKey::OnClick => "onclick",
            TraitKey::Disabled => "disabled",
            TraitKey::StylePreset => "button-style",
            TraitKey::CustomBgColor => "custom-bg-color",
            TraitKey::CustomTextColor => "custom-text-color",
            TraitKey::SizePreset => "button-size",
            TraitKey::CustomPadding => "custom-padding",
            TraitKey::CustomFontSize => "custom-font-size",
            TraitKey::BorderRadius => "border-radius",
            TraitKey::Href => "href",
        }
    }

    pub fn from_name(name: &str) -> Option<TraitKey> {
        TraitKey::ALL.iter().copied().find(|key| key.as_str() == name)
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            TraitKey::IconSize | TraitKey::CustomFontSize | TraitKey::BorderRadius => {
                ValueKind::Integer
            }
            TraitKey::Disabled => ValueKind::Boolean,
            TraitKey::IconType
            | TraitKey::IconPosition
            | TraitKey::ButtonType
            | TraitKey::StylePreset
            | TraitKey::SizePreset => ValueKind::Choice,
            _ => ValueKind::Text,
        }
    }
}

impl fmt::Display for TraitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TraitKey {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TraitKey::from_name(s).ok_or_else(|| CommonError::UnknownTrait(s.to_string()))
    }
}

/// A trait value as handed over by a widget or a programmatic write
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraitValue {
    Bool(bool),
    Number(i64),
    Text(String),
    Empty,
}

impl TraitValue {
    pub fn text(value: impl Into<String>) -> Self {
        TraitValue::Text(value.into())
    }

    /// `Empty`, or text that is blank once trimmed
    pub fn is_empty(&self) -> bool {
        match self {
            TraitValue::Empty => true,
            TraitValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            TraitValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numbers, or text that parses as a whole number (number widgets send strings)
    pub fn as_number(&self) -> Option<i64> {
        match self {
            TraitValue::Number(n) => Some(*n),
            TraitValue::Text(s) => {
                let trimmed = s.trim();
                trimmed.parse::<i64>().ok().or_else(|| {
                    trimmed
                        .parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite() && f.fract() == 0.0)
                        .map(|f| f as i64)
                })
            }
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TraitValue::Bool(b) => Some(*b),
            TraitValue::Empty => Some(false),
            TraitValue::Number(n) => Some(*n != 0),
            TraitValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "on" | "disabled" | "1" => Some(true),
                "false" | "off" | "0" | "" => Some(false),
                _ => None,
            },
        }
    }

    /// Lossy rendering used in error messages
    pub fn describe(&self) -> String {
        match self {
            TraitValue::Bool(b) => b.to_string(),
            TraitValue::Number(n) => n.to_string(),
            TraitValue::Text(s) => format!("\"{}\"", s),
            TraitValue::Empty => "<empty>".to_string(),
        }
    }
}

impl From<&str> for TraitValue {
    fn from(value: &str) -> Self {
        TraitValue::Text(value.to_string())
    }
}

impl From<String> for TraitValue {
    fn from(value: String) -> Self {
        TraitValue::Text(value)
    }
}

impl From<i64> for TraitValue {
    fn from(value: i64) -> Self {
        TraitValue::Number(value)
    }
}

impl From<bool> for TraitValue {
    fn from(value: bool) -> Self {
        TraitValue::Bool(value)
    }
}

impl<T: Into<TraitValue>> From<Option<T>> for TraitValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(TraitValue::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip() {
        for key in TraitKey::ALL {
            assert_eq!(TraitKey::from_name(key.as_str()), Some(key));
        }
    }

    #[test]
    fn test_unknown_trait_name() {
        let err = "button-colour".parse::<TraitKey>().unwrap_err();
        assert_eq!(err, CommonError::UnknownTrait("button-colour".to_string()));
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&TraitKey::StylePreset).unwrap();
        assert_eq!(json, "\"button-style\"");
    }

    #[test]
    fn test_number_widget_text_coerces() {
        assert_eq!(TraitValue::text("24").as_number(), Some(24));
        assert_eq!(TraitValue::text(" 12.0 ").as_number(), Some(12));
        assert_eq!(TraitValue::text("12.5").as_number(), None);
        assert_eq!(TraitValue::text("big").as_number(), None);
    }

    #[test]
    fn test_checkbox_values_coerce() {
        assert_eq!(TraitValue::text("on").as_bool(), Some(true));
        assert_eq!(TraitValue::Empty.as_bool(), Some(false));
        assert_eq!(TraitValue::text("maybe").as_bool(), None);
    }

    #[test]
    fn test_untagged_values_deserialize() {
        let values: Vec<TraitValue> = serde_json::from_str(r#"[true, 16, "red", null]"#).unwrap();
        assert_eq!(
            values,
            vec![
                TraitValue::Bool(true),
                TraitValue::Number(16),
                TraitValue::text("red"),
                TraitValue::Empty,
            ]
        );
    }
}
