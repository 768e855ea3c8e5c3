/// Determinism tests - the same snapshot always yields byte-identical output
///
/// Presentation is recomputed on every trait edit, so any ordering leak
/// (hash iteration, accumulated state) would show up as spurious diffs.
use pagekit_common::{IconPosition, IconType, NullSink, SizePreset, StylePreset, TraitSnapshot};
use pagekit_evaluator::{Composition, ContentComposer, StyleResolver};

fn busy_snapshot() -> TraitSnapshot {
    TraitSnapshot {
        text: "Download".to_string(),
        icon_type: IconType::Svg,
        svg_code: r#"<svg viewBox="0 0 24 24" stroke="currentColor" fill="none"><path d="M12 3v12"/><polyline points="7 10 12 15 17 10"/><line x1="5" y1="21" x2="19" y2="21" stroke="currentColor"/></svg>"#.to_string(),
        icon_position: IconPosition::Right,
        icon_size: 20,
        icon_color: Some("#fafafa".to_string()),
        style_preset: Some(StylePreset::Custom),
        custom_bg_color: Some("#222222".to_string()),
        custom_text_color: Some("#fafafa".to_string()),
        size_preset: Some(SizePreset::Custom),
        custom_padding: Some("10px 18px".to_string()),
        custom_font_size: Some(15),
        border_radius: Some(999),
        ..Default::default()
    }
}

#[test]
fn test_style_resolution_determinism() {
    let snapshot = busy_snapshot();
    let results: Vec<String> = (0..10)
        .map(|_| StyleResolver::resolve(&snapshot).to_css_text())
        .collect();

    for i in 1..results.len() {
        assert_eq!(
            results[0], results[i],
            "Resolution {} differs from resolution 0",
            i
        );
    }
}

#[test]
fn test_composition_determinism() {
    let snapshot = busy_snapshot();
    let results: Vec<Composition> = (0..10)
        .map(|_| ContentComposer::new(&NullSink).compose(&snapshot))
        .collect();

    for i in 1..results.len() {
        assert_eq!(
            results[0], results[i],
            "Composition {} differs from composition 0",
            i
        );
    }
}

#[test]
fn test_resolution_does_not_depend_on_history() {
    let target = busy_snapshot();
    let fresh = StyleResolver::resolve(&target);

    // Resolve a sequence of unrelated snapshots first
    for preset in StylePreset::OPTIONS {
        let _ = StyleResolver::resolve(&TraitSnapshot {
            style_preset: Some(preset),
            disabled: true,
            ..Default::default()
        });
    }

    assert_eq!(StyleResolver::resolve(&target), fresh);
}
