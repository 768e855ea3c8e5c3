//! Trait snapshot
//!
//! The complete, consistent set of trait values for one component instance.
//! All derived state (style, markup, attributes) is a function of this value.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CommonError, CommonResult};
use crate::traits::{TraitKey, TraitValue};

pub const DEFAULT_TEXT: &str = "Click Me!";
pub const DEFAULT_ICON_SIZE: i64 = 16;

/// Range the icon-size widget offers. Values outside it are stored as given.
pub const ICON_SIZE_MIN: i64 = 8;
pub const ICON_SIZE_MAX: i64 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconType {
    #[default]
    None,
    Svg,
}

impl IconType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconType::None => "none",
            IconType::Svg => "svg",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "none" => Some(IconType::None),
            "svg" => Some(IconType::Svg),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconPosition {
    #[default]
    Left,
    Right,
}

impl IconPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconPosition::Left => "left",
            IconPosition::Right => "right",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "left" => Some(IconPosition::Left),
            "right" => Some(IconPosition::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonType {
    Button,
    Submit,
    Reset,
}

impl ButtonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonType::Button => "button",
            ButtonType::Submit => "submit",
            ButtonType::Reset => "reset",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "button" => Some(ButtonType::Button),
            "submit" => Some(ButtonType::Submit),
            "reset" => Some(ButtonType::Reset),
            _ => None,
        }
    }
}

/// Named color pair, or `Custom` to use the custom color traits.
///
/// Values a widget sends that are not in the table are kept as `Unknown` and
/// ignored when resolving style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StylePreset {
    Primary,
    Secondary,
    Success,
    Danger,
    Warning,
    Info,
    Custom,
    Unknown(String),
}

impl StylePreset {
    pub const OPTIONS: [StylePreset; 7] = [
        StylePreset::Primary,
        StylePreset::Secondary,
        StylePreset::Success,
        StylePreset::Danger,
        StylePreset::Warning,
        StylePreset::Info,
        StylePreset::Custom,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            StylePreset::Primary => "primary",
            StylePreset::Secondary => "secondary",
            StylePreset::Success => "success",
            StylePreset::Danger => "danger",
            StylePreset::Warning => "warning",
            StylePreset::Info => "info",
            StylePreset::Custom => "custom",
            StylePreset::Unknown(raw) => raw,
        }
    }
}

impl From<String> for StylePreset {
    fn from(value: String) -> Self {
        match value.trim() {
            "primary" => StylePreset::Primary,
            "secondary" => StylePreset::Secondary,
            "success" => StylePreset::Success,
            "danger" => StylePreset::Danger,
            "warning" => StylePreset::Warning,
            "info" => StylePreset::Info,
            "custom" => StylePreset::Custom,
            _ => StylePreset::Unknown(value),
        }
    }
}

impl From<StylePreset> for String {
    fn from(value: StylePreset) -> Self {
        value.as_str().to_string()
    }
}

/// Named padding/font-size pair, or `Custom` to use the custom size traits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SizePreset {
    Small,
    Medium,
    Large,
    Custom,
    Unknown(String),
}

impl SizePreset {
    pub const OPTIONS: [SizePreset; 4] = [
        SizePreset::Small,
        SizePreset::Medium,
        SizePreset::Large,
        SizePreset::Custom,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            SizePreset::Small => "small",
            SizePreset::Medium => "medium",
            SizePreset::Large => "large",
            SizePreset::Custom => "custom",
            SizePreset::Unknown(raw) => raw,
        }
    }
}

impl From<String> for SizePreset {
    fn from(value: String) -> Self {
        match value.trim() {
            "small" => SizePreset::Small,
            "medium" => SizePreset::Medium,
            "large" => SizePreset::Large,
            "custom" => SizePreset::Custom,
            _ => SizePreset::Unknown(value),
        }
    }
}

impl From<SizePreset> for String {
    fn from(value: SizePreset) -> Self {
        value.as_str().to_string()
    }
}

macro_rules! impl_display_via_as_str {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

impl_display_via_as_str!(IconType, IconPosition, ButtonType, StylePreset, SizePreset);

/// Current trait values of one component instance.
///
/// Serializes with the trait wire names as keys; missing keys take their
/// defaults, so a partially persisted project restores cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraitSnapshot {
    #[serde(rename = "button-text")]
    pub text: String,

    #[serde(rename = "icon-type")]
    pub icon_type: IconType,

    #[serde(rename = "svg-code")]
    pub svg_code: String,

    #[serde(rename = "icon-position")]
    pub icon_position: IconPosition,

    #[serde(rename = "icon-size")]
    pub icon_size: i64,

    #[serde(rename = "icon-color", skip_serializing_if = "Option::is_none")]
    pub icon_color: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub button_type: Option<ButtonType>,

    #[serde(rename = "onclick")]
    pub on_click: String,

    pub disabled: bool,

    #[serde(rename = "button-style", skip_serializing_if = "Option::is_none")]
    pub style_preset: Option<StylePreset>,

    #[serde(rename = "custom-bg-color", skip_serializing_if = "Option::is_none")]
    pub custom_bg_color: Option<String>,

    #[serde(rename = "custom-text-color", skip_serializing_if = "Option::is_none")]
    pub custom_text_color: Option<String>,

    #[serde(rename = "button-size", skip_serializing_if = "Option::is_none")]
    pub size_preset: Option<SizePreset>,

    #[serde(rename = "custom-padding", skip_serializing_if = "Option::is_none")]
    pub custom_padding: Option<String>,

    #[serde(rename = "custom-font-size", skip_serializing_if = "Option::is_none")]
    pub custom_font_size: Option<i64>,

    #[serde(rename = "border-radius", skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<i64>,

    pub href: String,
}

impl Default for TraitSnapshot {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT.to_string(),
            icon_type: IconType::None,
            svg_code: String::new(),
            icon_position: IconPosition::Left,
            icon_size: DEFAULT_ICON_SIZE,
            icon_color: None,
            button_type: None,
            on_click: String::new(),
            disabled: false,
            style_preset: None,
            custom_bg_color: None,
            custom_text_color: None,
            size_preset: None,
            custom_padding: None,
            custom_font_size: None,
            border_radius: None,
            href: String::new(),
        }
    }
}

impl TraitSnapshot {
    /// Read one trait as a widget-facing value
    pub fn get(&self, key: TraitKey) -> TraitValue {
        match key {
            TraitKey::Text => TraitValue::text(&self.text),
            TraitKey::IconType => TraitValue::text(self.icon_type.as_str()),
            TraitKey::SvgCode => TraitValue::text(&self.svg_code),
            TraitKey::IconPosition => TraitValue::text(self.icon_position.as_str()),
            TraitKey::IconSize => TraitValue::Number(self.icon_size),
            TraitKey::IconColor => self.icon_color.clone().into(),
            TraitKey::ButtonType => self.button_type.map(|t| t.as_str()).into(),
            TraitKey::OnClick => TraitValue::text(&self.on_click),
            TraitKey::Disabled => TraitValue::Bool(self.disabled),
            TraitKey::StylePreset => self.style_preset.as_ref().map(|p| p.as_str()).into(),
            TraitKey::CustomBgColor => self.custom_bg_color.clone().into(),
            TraitKey::CustomTextColor => self.custom_text_color.clone().into(),
            TraitKey::SizePreset => self.size_preset.as_ref().map(|p| p.as_str()).into(),
            TraitKey::CustomPadding => self.custom_padding.clone().into(),
            TraitKey::CustomFontSize => self.custom_font_size.into(),
            TraitKey::BorderRadius => self.border_radius.into(),
            TraitKey::Href => TraitValue::text(&self.href),
        }
    }

    /// Coerce `value` to the trait's kind and overwrite it.
    ///
    /// On error the snapshot is unchanged.
    pub fn set(&mut self, key: TraitKey, value: TraitValue) -> CommonResult<()> {
        match key {
            TraitKey::Text => self.text = coerce_text(key, &value)?,
            TraitKey::IconType => {
                self.icon_type = coerce_choice(key, &value, IconType::parse)?.unwrap_or_default()
            }
            TraitKey::SvgCode => self.svg_code = coerce_text(key, &value)?,
            TraitKey::IconPosition => {
                self.icon_position =
                    coerce_choice(key, &value, IconPosition::parse)?.unwrap_or_default()
            }
            TraitKey::IconSize => {
                self.icon_size = coerce_optional_int(key, &value)?.unwrap_or(DEFAULT_ICON_SIZE)
            }
            TraitKey::IconColor => self.icon_color = coerce_optional_text(key, &value)?,
            TraitKey::ButtonType => self.button_type = coerce_choice(key, &value, ButtonType::parse)?,
            TraitKey::OnClick => self.on_click = coerce_text(key, &value)?,
            TraitKey::Disabled => {
                self.disabled = value
                    .as_bool()
                    .ok_or_else(|| CommonError::invalid_value(key, value.describe()))?
            }
            TraitKey::StylePreset => {
                self.style_preset = coerce_optional_text(key, &value)?.map(StylePreset::from)
            }
            TraitKey::CustomBgColor => self.custom_bg_color = coerce_optional_text(key, &value)?,
            TraitKey::CustomTextColor => {
                self.custom_text_color = coerce_optional_text(key, &value)?
            }
            TraitKey::SizePreset => {
                self.size_preset = coerce_optional_text(key, &value)?.map(SizePreset::from)
            }
            TraitKey::CustomPadding => self.custom_padding = coerce_optional_text(key, &value)?,
            TraitKey::CustomFontSize => self.custom_font_size = coerce_optional_int(key, &value)?,
            TraitKey::BorderRadius => self.border_radius = coerce_optional_int(key, &value)?,
            TraitKey::Href => self.href = coerce_text(key, &value)?,
        }
        Ok(())
    }

    /// Whether the icon traits ask for an embedded vector icon
    pub fn wants_icon(&self) -> bool {
        self.icon_type == IconType::Svg && !self.svg_code.trim().is_empty()
    }
}

fn coerce_text(key: TraitKey, value: &TraitValue) -> CommonResult<String> {
    match value {
        TraitValue::Text(s) => Ok(s.clone()),
        TraitValue::Number(n) => Ok(n.to_string()),
        TraitValue::Empty => Ok(String::new()),
        TraitValue::Bool(_) => Err(CommonError::invalid_value(key, value.describe())),
    }
}

fn coerce_optional_text(key: TraitKey, value: &TraitValue) -> CommonResult<Option<String>> {
    if value.is_empty() {
        return Ok(None);
    }
    coerce_text(key, value).map(Some)
}

fn coerce_optional_int(key: TraitKey, value: &TraitValue) -> CommonResult<Option<i64>> {
    if value.is_empty() {
        return Ok(None);
    }
    value
        .as_number()
        .map(Some)
        .ok_or_else(|| CommonError::invalid_value(key, value.describe()))
}

fn coerce_choice<T>(
    key: TraitKey,
    value: &TraitValue,
    parse: impl Fn(&str) -> Option<T>,
) -> CommonResult<Option<T>> {
    if value.is_empty() {
        return Ok(None);
    }
    match value {
        TraitValue::Text(s) => parse(s)
            .map(Some)
            .ok_or_else(|| CommonError::invalid_value(key, value.describe())),
        _ => Err(CommonError::invalid_value(key, value.describe())),
    }
}
