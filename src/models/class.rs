//! The fixed class enumeration.
//!
//! Every deck belongs to exactly one of seven classes. The canonical names
//! are the Japanese ones used throughout the UI and the persisted data, so
//! the enum serializes to those exact strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the seven playable classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassName {
    #[serde(rename = "エルフ")]
    Elf,
    #[serde(rename = "ロイヤル")]
    Royal,
    #[serde(rename = "ウィッチ")]
    Witch,
    #[serde(rename = "ドラゴン")]
    Dragon,
    #[serde(rename = "ネクロマンサー")]
    Necromancer,
    #[serde(rename = "ヴァンパイア")]
    Vampire,
    #[serde(rename = "ビショップ")]
    Bishop,
}

impl ClassName {
    /// All seven classes in display order.
    pub const ALL: [ClassName; 7] = [
        ClassName::Elf,
        ClassName::Royal,
        ClassName::Witch,
        ClassName::Dragon,
        ClassName::Necromancer,
        ClassName::Vampire,
        ClassName::Bishop,
    ];

    /// The canonical name of the class.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassName::Elf => "エルフ",
            ClassName::Royal => "ロイヤル",
            ClassName::Witch => "ウィッチ",
            ClassName::Dragon => "ドラゴン",
            ClassName::Necromancer => "ネクロマンサー",
            ClassName::Vampire => "ヴァンパイア",
            ClassName::Bishop => "ビショップ",
        }
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ClassName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClassName::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown class: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_has_seven_distinct_classes() {
        let mut seen = std::collections::HashSet::new();
        for class in ClassName::ALL {
            seen.insert(class);
        }
        assert_eq!(seen.len(), 7);
    }

    #[test]
    fn test_serializes_to_canonical_name() {
        let json = serde_json::to_string(&ClassName::Elf).unwrap();
        assert_eq!(json, "\"エルフ\"");

        let parsed: ClassName = serde_json::from_str("\"ドラゴン\"").unwrap();
        assert_eq!(parsed, ClassName::Dragon);
    }

    #[test]
    fn test_deserialize_unknown_fails() {
        let result: Result<ClassName, _> = serde_json::from_str("\"スライム\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_display_matches_as_str() {
        for class in ClassName::ALL {
            assert_eq!(format!("{}", class), class.as_str());
        }
    }

    #[test]
    fn test_from_str_round_trip() {
        for class in ClassName::ALL {
            assert_eq!(class.as_str().parse::<ClassName>().unwrap(), class);
        }
        assert!("unknown".parse::<ClassName>().is_err());
    }
}
