//! Core types for keyboard layouts

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// A 2D point in pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point halfway between `self` and `other`
    pub fn midpoint(&self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Position of a key in layout-grid units (one unit per key pitch)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCoord {
    pub x: f64,
    pub y: f64,
}

impl GridCoord {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A single labelled key of a layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Key {
    pub label: char,
    pub position: GridCoord,
}

/// The statically known keyboard layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyboardLayout {
    Qwerty,
    Colemak,
    Dvorak,
    Azerty,
    Abcdef,
    /// Right-to-left Arabic script layout
    Arabic,
}

impl KeyboardLayout {
    pub const ALL: [KeyboardLayout; 6] = [
        KeyboardLayout::Qwerty,
        KeyboardLayout::Colemak,
        KeyboardLayout::Dvorak,
        KeyboardLayout::Azerty,
        KeyboardLayout::Abcdef,
        KeyboardLayout::Arabic,
    ];

    /// Identifier used in presets and on the command line
    pub fn name(&self) -> &'static str {
        match self {
            KeyboardLayout::Qwerty => "qwerty",
            KeyboardLayout::Colemak => "colemak",
            KeyboardLayout::Dvorak => "dvorak",
            KeyboardLayout::Azerty => "azerty",
            KeyboardLayout::Abcdef => "abcdef",
            KeyboardLayout::Arabic => "arabic",
        }
    }

    /// Script layouts whose rows run wider than the latin ones get the tall canvas
    pub fn is_wide_script(&self) -> bool {
        matches!(self, KeyboardLayout::Arabic)
    }

    fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(|l| l.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for KeyboardLayout {
    fn default() -> Self {
        KeyboardLayout::Qwerty
    }
}

impl fmt::Display for KeyboardLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KeyboardLayout {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|l| l.name() == wanted)
            .ok_or_else(|| ParseError::UnknownLayout {
                name: s.to_string(),
                valid: Self::valid_names(),
            })
    }
}

/// Character → grid position lookup for one resolved layout
///
/// Keys iterate in definition order so that drawings of the keyboard are
/// stable from run to run.
#[derive(Debug, Clone, Default)]
pub struct CharacterTable {
    keys: Vec<Key>,
    index: HashMap<char, usize>,
}

impl CharacterTable {
    /// Build a table from `(char, x, y)` rows; a later row for an already
    /// present character replaces the earlier position in place
    pub fn from_rows(rows: &[(char, f64, f64)]) -> Self {
        let mut table = Self::default();
        table.extend_rows(rows);
        table
    }

    /// Add `(char, x, y)` rows, overwriting positions of shared characters
    pub fn extend_rows(&mut self, rows: &[(char, f64, f64)]) {
        for &(label, x, y) in rows {
            let key = Key {
                label,
                position: GridCoord::new(x, y),
            };
            match self.index.get(&label) {
                Some(&i) => self.keys[i] = key,
                None => {
                    self.index.insert(label, self.keys.len());
                    self.keys.push(key);
                }
            }
        }
    }

    pub fn get(&self, c: char) -> Option<GridCoord> {
        self.index.get(&c).map(|&i| self.keys[i].position)
    }

    pub fn contains(&self, c: char) -> bool {
        self.index.contains_key(&c)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// All keys in definition order
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Largest x coordinate of any key, in grid units
    pub fn max_x(&self) -> Option<f64> {
        self.keys.iter().map(|k| k.position.x).reduce(f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_from_str_case_insensitive() {
        assert_eq!("QWERTY".parse::<KeyboardLayout>().unwrap(), KeyboardLayout::Qwerty);
        assert_eq!(" dvorak ".parse::<KeyboardLayout>().unwrap(), KeyboardLayout::Dvorak);
    }

    #[test]
    fn test_layout_from_str_unknown() {
        let err = "workman".parse::<KeyboardLayout>().unwrap_err();
        match err {
            ParseError::UnknownLayout { name, valid } => {
                assert_eq!(name, "workman");
                assert!(valid.contains("qwerty"));
                assert!(valid.contains("arabic"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_layout_name_round_trip() {
        for layout in KeyboardLayout::ALL {
            assert_eq!(layout.name().parse::<KeyboardLayout>().unwrap(), layout);
        }
    }

    #[test]
    fn test_only_arabic_is_wide() {
        let wide: Vec<_> = KeyboardLayout::ALL
            .iter()
            .filter(|l| l.is_wide_script())
            .collect();
        assert_eq!(wide, vec![&KeyboardLayout::Arabic]);
    }

    #[test]
    fn test_table_overwrite_keeps_order() {
        let mut table = CharacterTable::from_rows(&[('A', 0.0, 0.0), ('B', 1.0, 0.0)]);
        table.extend_rows(&[('A', 5.0, 5.0), ('C', 2.0, 0.0)]);

        assert_eq!(table.len(), 3);
        assert_eq!(table.get('A'), Some(GridCoord::new(5.0, 5.0)));
        let labels: Vec<char> = table.keys().iter().map(|k| k.label).collect();
        assert_eq!(labels, vec!['A', 'B', 'C']);
    }

    #[test]
    fn test_max_x() {
        let table = CharacterTable::from_rows(&[('A', 0.5, 0.0), ('B', 9.75, 1.0)]);
        assert_eq!(table.max_x(), Some(9.75));
        assert_eq!(CharacterTable::default().max_x(), None);
    }
}
