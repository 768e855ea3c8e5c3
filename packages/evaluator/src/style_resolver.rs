//! Trait snapshot → inline style

use pagekit_common::{SizePreset, StylePreset, TraitSnapshot};
use pagekit_parser::StyleDeclarations;
use tracing::trace;

/// Ordered property → value mapping applied as the element's inline style
pub type StyleMap = StyleDeclarations;

const BASE_STYLE: [(&str, &str); 8] = [
    ("background-color", "#007bff"),
    ("color", "#ffffff"),
    ("border", "none"),
    ("padding", "12px 24px"),
    ("border-radius", "6px"),
    ("font-size", "16px"),
    ("font-weight", "500"),
    ("transition", "all 0.3s ease"),
];

const DISABLED_OVERLAY: [(&str, &str); 3] = [
    ("opacity", "0.6"),
    ("cursor", "not-allowed"),
    ("pointer-events", "none"),
];

const ENABLED_OVERLAY: [(&str, &str); 3] = [
    ("opacity", "1"),
    ("cursor", "pointer"),
    ("pointer-events", "auto"),
];

/// (background, text) color for a named preset
pub fn preset_colors(preset: &StylePreset) -> Option<(&'static str, &'static str)> {
    match preset {
        StylePreset::Primary => Some(("#007bff", "#ffffff")),
        StylePreset::Secondary => Some(("#6c757d", "#ffffff")),
        StylePreset::Success => Some(("#28a745", "#ffffff")),
        StylePreset::Danger => Some(("#dc3545", "#ffffff")),
        StylePreset::Warning => Some(("#ffc107", "#212529")),
        StylePreset::Info => Some(("#17a2b8", "#ffffff")),
        StylePreset::Custom | StylePreset::Unknown(_) => None,
    }
}

/// (padding, font-size) for a named size preset
pub fn preset_size(preset: &SizePreset) -> Option<(&'static str, &'static str)> {
    match preset {
        SizePreset::Small => Some(("8px 16px", "14px")),
        SizePreset::Medium => Some(("12px 24px", "16px")),
        SizePreset::Large => Some(("16px 32px", "18px")),
        SizePreset::Custom | SizePreset::Unknown(_) => None,
    }
}

/// Resolves the full inline style of a button from its traits.
///
/// The result depends only on the snapshot: resolving always starts from the
/// base style, so no earlier preset can leak into a later resolution.
pub struct StyleResolver;

impl StyleResolver {
    pub fn resolve(snapshot: &TraitSnapshot) -> StyleMap {
        let mut style: StyleMap = BASE_STYLE.into_iter().collect();

        match &snapshot.style_preset {
            Some(StylePreset::Custom) => {
                if let Some(bg) = non_empty(&snapshot.custom_bg_color) {
                    style.set("background-color", bg);
                }
                if let Some(fg) = non_empty(&snapshot.custom_text_color) {
                    style.set("color", fg);
                }
            }
            Some(preset) => match preset_colors(preset) {
                Some((bg, fg)) => {
                    style.set("background-color", bg);
                    style.set("color", fg);
                }
                None => trace!(preset = %preset, "Ignoring unknown style preset"),
            },
            None => {}
        }

        match &snapshot.size_preset {
            Some(SizePreset::Custom) => {
                if let Some(padding) = non_empty(&snapshot.custom_padding) {
                    style.set("padding", padding);
                }
                if let Some(size) = snapshot.custom_font_size {
                    style.set("font-size", format!("{}px", size));
                }
            }
            Some(preset) => match preset_size(preset) {
                Some((padding, font_size)) => {
                    style.set("padding", padding);
                    style.set("font-size", font_size);
                }
                None => trace!(preset = %preset, "Ignoring unknown size preset"),
            },
            None => {}
        }

        if let Some(radius) = snapshot.border_radius {
            style.set("border-radius", format!("{}px", radius));
        }

        let overlay = if snapshot.disabled {
            DISABLED_OVERLAY
        } else {
            ENABLED_OVERLAY
        };
        for (prop, value) in overlay {
            style.set(prop, value);
        }

        style
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_resolve_to_base_plus_enabled_overlay() {
        let style = StyleResolver::resolve(&TraitSnapshot::default());
        assert_eq!(
            style.to_css_text(),
            "background-color: #007bff; color: #ffffff; border: none; padding: 12px 24px; \
             border-radius: 6px; font-size: 16px; font-weight: 500; transition: all 0.3s ease; \
             opacity: 1; cursor: pointer; pointer-events: auto;"
        );
    }

    #[test]
    fn test_warning_preset_uses_dark_text() {
        let snapshot = TraitSnapshot {
            style_preset: Some(StylePreset::Warning),
            ..Default::default()
        };
        let style = StyleResolver::resolve(&snapshot);
        assert_eq!(style.get("background-color"), Some("#ffc107"));
        assert_eq!(style.get("color"), Some("#212529"));
    }

    #[test]
    fn test_custom_colors_only_used_with_custom_preset() {
        let mut snapshot = TraitSnapshot {
            style_preset: Some(StylePreset::Danger),
            custom_bg_color: Some("#112233".to_string()),
            ..Default::default()
        };
        assert_eq!(
            StyleResolver::resolve(&snapshot).get("background-color"),
            Some("#dc3545")
        );

        snapshot.style_preset = Some(StylePreset::Custom);
        let style = StyleResolver::resolve(&snapshot);
        assert_eq!(style.get("background-color"), Some("#112233"));
        // No custom text color: base value stays
        assert_eq!(style.get("color"), Some("#ffffff"));
    }

    #[test]
    fn test_custom_size() {
        let snapshot = TraitSnapshot {
            size_preset: Some(SizePreset::Custom),
            custom_padding: Some("4px 6px".to_string()),
            custom_font_size: Some(13),
            ..Default::default()
        };
        let style = StyleResolver::resolve(&snapshot);
        assert_eq!(style.get("padding"), Some("4px 6px"));
        assert_eq!(style.get("font-size"), Some("13px"));
    }

    #[test]
    fn test_custom_size_without_fields_keeps_base() {
        let snapshot = TraitSnapshot {
            size_preset: Some(SizePreset::Custom),
            ..Default::default()
        };
        let style = StyleResolver::resolve(&snapshot);
        assert_eq!(style.get("padding"), Some("12px 24px"));
        assert_eq!(style.get("font-size"), Some("16px"));
    }

    #[test]
    fn test_unknown_presets_ignored() {
        let snapshot = TraitSnapshot {
            style_preset: Some(StylePreset::from("neon".to_string())),
            size_preset: Some(SizePreset::from("huge".to_string())),
            ..Default::default()
        };
        assert_eq!(
            StyleResolver::resolve(&snapshot),
            StyleResolver::resolve(&TraitSnapshot::default())
        );
    }

    #[test]
    fn test_border_radius() {
        let snapshot = TraitSnapshot {
            border_radius: Some(0),
            ..Default::default()
        };
        assert_eq!(StyleResolver::resolve(&snapshot).get("border-radius"), Some("0px"));
    }

    #[test]
    fn test_disabled_overlay() {
        let snapshot = TraitSnapshot {
            disabled: true,
            ..Default::default()
        };
        let style = StyleResolver::resolve(&snapshot);
        assert_eq!(style.get("opacity"), Some("0.6"));
        assert_eq!(style.get("cursor"), Some("not-allowed"));
        assert_eq!(style.get("pointer-events"), Some("none"));
    }
}
