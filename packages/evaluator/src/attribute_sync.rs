//! Trait snapshot → element attributes

use crate::vdom::AttributeMap;
use pagekit_common::TraitSnapshot;

/// Rebuilds the trait-owned attributes of an element.
///
/// `disabled`, `type`, `onclick` and `href` are derived from the snapshot
/// alone: a trait with no value falls back to the entry in `base` (the
/// component type's own attributes) or is removed. Anything else in the map
/// (class list, editor hints) is left alone.
pub struct AttributeSync;

/// Attributes whose value is owned by a trait
const TRAIT_ATTRIBUTES: [&str; 4] = ["disabled", "type", "onclick", "href"];

impl AttributeSync {
    pub fn apply(snapshot: &TraitSnapshot, base: &AttributeMap, attributes: &mut AttributeMap) {
        for name in TRAIT_ATTRIBUTES {
            match Self::trait_value(snapshot, name).or_else(|| base.get(name).cloned()) {
                Some(value) => {
                    attributes.insert(name.to_string(), value);
                }
                None => {
                    attributes.shift_remove(name);
                }
            }
        }
    }

    fn trait_value(snapshot: &TraitSnapshot, name: &str) -> Option<String> {
        let value = match name {
            "disabled" => snapshot.disabled.then(|| "disabled".to_string()),
            "type" => snapshot.button_type.map(|t| t.as_str().to_string()),
            "onclick" => Some(snapshot.on_click.clone()),
            "href" => Some(snapshot.href.clone()),
            _ => None,
        };
        value.filter(|v| !v.is_empty())
    }
}
