//! Season template resolution.

use std::collections::{HashMap, HashSet};

use crate::models::{ClassName, Season};

/// Resolve a season's known archetype names, grouped by class.
///
/// Only active templates count. Every one of the seven class keys is present
/// in the result even when no templates exist for it, so classification never
/// has to null-check a class.
pub fn resolve_known_templates(season: &Season) -> HashMap<ClassName, HashSet<String>> {
    let mut known: HashMap<ClassName, HashSet<String>> = HashMap::new();
    for class in ClassName::ALL {
        known.insert(class, HashSet::new());
    }

    for template in season.parse_templates().into_vec() {
        if !template.is_active {
            continue;
        }
        if let Some(names) = known.get_mut(&template.class) {
            names.insert(template.deck_name);
        }
    }

    known
}
