//! The button component types and their palette entries

use crate::errors::EditorResult;
use crate::inline_edit::{Gesture, EDIT_HINT_TITLE, EDIT_PROMPT};
use crate::registry::{ComponentTypeDef, HostEditor, ModelSpec, PaletteEntry, TraitDef, ViewSpec, Widget};
use pagekit_common::{TraitKey, TraitSnapshot, DEFAULT_ICON_SIZE, ICON_SIZE_MAX, ICON_SIZE_MIN};
use pagekit_evaluator::AttributeMap;
use serde::{Deserialize, Serialize};
use tracing::info;

pub const CUSTOM_BUTTON: &str = "custom-button";
pub const CTA_BUTTON: &str = "cta-button";

pub const SVG_PLACEHOLDER: &str = r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="currentColor">
  <path d="M12 2l3.09 6.26L22 9.27l-5 4.87 1.18 6.88L12 17.77l-6.18 3.25L7 14.14 2 9.27l6.91-1.01L12 2z"/>
</svg>"#;

/// Palette thumbnail (a pointer clicking a button)
pub const PALETTE_ICON: &str = r##"<svg fill="#000000" width="40px" height="40px" viewBox="0 0 52 52" xmlns="http://www.w3.org/2000/svg"><path d="M31.9981689,11.9995104 C33.4659424,11.9985117 34.998291,13.1328 34.998291,16.1348 L34.998291,26 C34.998291,27.5134277 36.3779053,28.1114014 36.9779053,28.3114014 L43.8,30.8 C46.7,31.9 48.5,35 47.7,38.2 L44.5,48.5995 C44.3,49.3995 43.6,49.9995 42.7,49.9995 L26.6,49.9995 C25.8,49.9995 25.1,49.5995 24.8,48.8995 C20.9318685,39.9190553 18.7869873,34.9395752 18.3653564,33.9610596 C17.9437256,32.9825439 18.2219401,32.1955241 19.2,31.6 C21,30.3 23.7,31.6395508 24.8,33.5395508 L26.4157715,35.7431828 C27.0515137,36.9508 29,36.9508 29,35.1508 L29,16.1348 C29,13.1328 30.5303955,12.0005117 31.9981689,11.9995104 Z M46,2 C48.2,2 50,3.8 50,6 L50,21 C50,22.882323 48.1813389,25.0030348 46,25 L40.010437,25 C39,25 39,24.1881157 39,24.059082 L39,15.5 C39,11.6547018 37.0187988,8 32,8 C26.9812012,8 25,11.1879783 25,15.5 L25,24.059082 C25,24.4078007 24.7352295,25 23.987793,25 L6,25 C3.8,25 2,23.2 2,21 L2,6 C2,3.8 3.8,2 6,2 Z"></path></svg>"##;

/// Plugin settings, as read from the host's configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginOptions {
    /// Palette category both entries are filed under
    pub category: String,
    pub button_label: String,
    pub include_call_to_action: bool,
    pub cta_label: String,
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            category: "Custom Components".to_string(),
            button_label: "Custom Button".to_string(),
            include_call_to_action: true,
            cta_label: "Call To Action".to_string(),
        }
    }
}

/// Register the button types and their palette entries with `host`
pub fn install(host: &mut dyn HostEditor, options: &PluginOptions) -> EditorResult<()> {
    host.define_component_type(custom_button_type())?;
    host.register_palette_entry(palette_entry(CUSTOM_BUTTON, &options.button_label, options))?;

    if options.include_call_to_action {
        host.define_component_type(cta_button_type())?;
        host.register_palette_entry(palette_entry(CTA_BUTTON, &options.cta_label, options))?;
    }

    info!(category = %options.category, "Button components installed");
    Ok(())
}

fn palette_entry(type_name: &str, label: &str, options: &PluginOptions) -> PaletteEntry {
    PaletteEntry {
        type_name: type_name.to_string(),
        label: label.to_string(),
        preview_markup: PALETTE_ICON.to_string(),
        category: options.category.clone(),
    }
}

fn edit_view() -> ViewSpec {
    let mut hint_attributes = AttributeMap::new();
    hint_attributes.insert("data-editable".to_string(), "true".to_string());
    hint_attributes.insert("title".to_string(), EDIT_HINT_TITLE.to_string());

    ViewSpec {
        edit_gesture: Gesture::DoubleClick,
        prompt_message: EDIT_PROMPT.to_string(),
        hint_attributes,
    }
}

/// `<button class="custom-btn" type="button">`
pub fn custom_button_type() -> ComponentTypeDef {
    let mut model = ModelSpec::new("button");
    model.classes = vec!["custom-btn".to_string()];
    model
        .base_attributes
        .insert("type".to_string(), "button".to_string());
    model.traits = content_traits();
    model.traits.extend([
        TraitDef::new(
            TraitKey::ButtonType,
            "Button Type",
            Widget::select([("button", "Button"), ("submit", "Submit"), ("reset", "Reset")]),
        ),
        TraitDef::new(TraitKey::OnClick, "onClick Event", Widget::Text)
            .with_placeholder(r#"alert("Button clicked!")"#),
        TraitDef::new(TraitKey::Disabled, "Disabled", Widget::Checkbox),
    ]);
    model.traits.extend(appearance_traits());

    ComponentTypeDef {
        type_name: CUSTOM_BUTTON.to_string(),
        model,
        view: edit_view(),
    }
}

/// `<a class="custom-cta" href="…">` with the same look and content
pub fn cta_button_type() -> ComponentTypeDef {
    let mut model = ModelSpec::new("a");
    model.classes = vec!["custom-cta".to_string()];
    model.defaults = TraitSnapshot {
        text: "Get Started".to_string(),
        href: "#".to_string(),
        ..Default::default()
    };
    model.traits = content_traits();
    model.traits.extend([
        TraitDef::new(TraitKey::Href, "Link URL", Widget::Text).with_placeholder("https://"),
        TraitDef::new(TraitKey::OnClick, "onClick Event", Widget::Text)
            .with_placeholder(r#"alert("Button clicked!")"#),
        TraitDef::new(TraitKey::Disabled, "Disabled", Widget::Checkbox),
    ]);
    model.traits.extend(appearance_traits());

    ComponentTypeDef {
        type_name: CTA_BUTTON.to_string(),
        model,
        view: edit_view(),
    }
}

fn content_traits() -> Vec<TraitDef> {
    vec![
        TraitDef::new(TraitKey::Text, "Button Text", Widget::Text),
        TraitDef::new(
            TraitKey::IconType,
            "Icon Type",
            Widget::select([("none", "No Icon"), ("svg", "SVG Icon")]),
        ),
        TraitDef::new(TraitKey::SvgCode, "SVG Code", Widget::Textarea)
            .with_placeholder(SVG_PLACEHOLDER),
        TraitDef::new(
            TraitKey::IconPosition,
            "Icon Position",
            Widget::select([("left", "Left"), ("right", "Right")]),
        ),
        TraitDef::new(
            TraitKey::IconSize,
            "Icon Size (px)",
            Widget::number_in(ICON_SIZE_MIN, ICON_SIZE_MAX),
        )
        .with_placeholder(DEFAULT_ICON_SIZE.to_string()),
        TraitDef::new(TraitKey::IconColor, "Icon Color", Widget::Color),
    ]
}

fn appearance_traits() -> Vec<TraitDef> {
    vec![
        TraitDef::new(
            TraitKey::StylePreset,
            "Button Style",
            Widget::select([
                ("primary", "Primary"),
                ("secondary", "Secondary"),
                ("success", "Success"),
                ("danger", "Danger"),
                ("warning", "Warning"),
                ("info", "Info"),
                ("custom", "Custom"),
            ]),
        ),
        TraitDef::new(TraitKey::CustomBgColor, "Custom Background", Widget::Color),
        TraitDef::new(TraitKey::CustomTextColor, "Custom Text Color", Widget::Color),
        TraitDef::new(
            TraitKey::SizePreset,
            "Button Size",
            Widget::select([
                ("small", "Small"),
                ("medium", "Medium"),
                ("large", "Large"),
                ("custom", "Custom"),
            ]),
        ),
        TraitDef::new(TraitKey::CustomPadding, "Custom Padding", Widget::Text)
            .with_placeholder("12px 24px"),
        TraitDef::new(TraitKey::CustomFontSize, "Custom Font Size (px)", Widget::number())
            .with_placeholder("16"),
        TraitDef::new(TraitKey::BorderRadius, "Border Radius (px)", Widget::number())
            .with_placeholder("6"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagekit_common::StylePreset;

    #[test]
    fn test_options_from_partial_json() {
        let options: PluginOptions =
            serde_json::from_str(r#"{ "includeCallToAction": false }"#).unwrap();
        assert!(!options.include_call_to_action);
        assert_eq!(options.category, "Custom Components");
    }

    #[test]
    fn test_button_declares_every_trait_but_href() {
        let def = custom_button_type();
        for key in pagekit_common::TraitKey::ALL {
            assert_eq!(def.model.declares(key), key != TraitKey::Href, "{}", key);
        }
    }

    #[test]
    fn test_cta_swaps_type_for_href() {
        let def = cta_button_type();
        assert_eq!(def.model.tag_name, "a");
        assert!(def.model.declares(TraitKey::Href));
        assert!(!def.model.declares(TraitKey::ButtonType));
        assert!(def.model.base_attributes.is_empty());
    }

    #[test]
    fn test_style_options_match_presets() {
        let def = custom_button_type();
        let style = def
            .model
            .traits
            .iter()
            .find(|t| t.key == TraitKey::StylePreset)
            .unwrap();
        let Widget::Select { options } = &style.widget else {
            panic!("expected select widget");
        };
        let ids: Vec<&str> = options.iter().map(|o| o.id.as_str()).collect();
        let presets = StylePreset::OPTIONS;
        let expected: Vec<&str> = presets.iter().map(|p| p.as_str()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_palette_icon_is_valid_svg() {
        assert!(PALETTE_ICON.starts_with(r##"<svg fill="#000000""##));
        assert!(PALETTE_ICON.ends_with("</path></svg>"));

        let icon = pagekit_evaluator::try_sanitize(PALETTE_ICON, None, Some("red")).unwrap();
        assert!(icon.contains(r##"fill="#000000""##));
    }
}
