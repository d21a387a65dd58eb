//! Static key positions for every supported layout
//!
//! Rows are staggered the way a physical keyboard is: the home row sits a
//! quarter key right of the top row, the bottom row three quarters.

use std::collections::HashMap;
use std::sync::OnceLock;

use super::types::{CharacterTable, KeyboardLayout};

/// Digits 1-9 then 0, one row above the letters
const NUMBER_ROW: &[(char, f64, f64)] = &[
    ('1', 0.5, -1.0),
    ('2', 1.5, -1.0),
    ('3', 2.5, -1.0),
    ('4', 3.5, -1.0),
    ('5', 4.5, -1.0),
    ('6', 5.5, -1.0),
    ('7', 6.5, -1.0),
    ('8', 7.5, -1.0),
    ('9', 8.5, -1.0),
    ('0', 9.5, -1.0),
];

const QWERTY: &[(char, f64, f64)] = &[
    ('Q', 0.5, 0.0),
    ('W', 1.5, 0.0),
    ('E', 2.5, 0.0),
    ('R', 3.5, 0.0),
    ('T', 4.5, 0.0),
    ('Y', 5.5, 0.0),
    ('U', 6.5, 0.0),
    ('I', 7.5, 0.0),
    ('O', 8.5, 0.0),
    ('P', 9.5, 0.0),
    ('A', 0.75, 1.0),
    ('S', 1.75, 1.0),
    ('D', 2.75, 1.0),
    ('F', 3.75, 1.0),
    ('G', 4.75, 1.0),
    ('H', 5.75, 1.0),
    ('J', 6.75, 1.0),
    ('K', 7.75, 1.0),
    ('L', 8.75, 1.0),
    ('Z', 1.25, 2.0),
    ('X', 2.25, 2.0),
    ('C', 3.25, 2.0),
    ('V', 4.25, 2.0),
    ('B', 5.25, 2.0),
    ('N', 6.25, 2.0),
    ('M', 7.25, 2.0),
];

const COLEMAK: &[(char, f64, f64)] = &[
    ('Q', 0.5, 0.0),
    ('W', 1.5, 0.0),
    ('F', 2.5, 0.0),
    ('P', 3.5, 0.0),
    ('G', 4.5, 0.0),
    ('J', 5.5, 0.0),
    ('L', 6.5, 0.0),
    ('U', 7.5, 0.0),
    ('Y', 8.5, 0.0),
    ('A', 0.75, 1.0),
    ('R', 1.75, 1.0),
    ('S', 2.75, 1.0),
    ('T', 3.75, 1.0),
    ('D', 4.75, 1.0),
    ('H', 5.75, 1.0),
    ('N', 6.75, 1.0),
    ('E', 7.75, 1.0),
    ('I', 8.75, 1.0),
    ('O', 9.75, 1.0),
    ('Z', 1.25, 2.0),
    ('X', 2.25, 2.0),
    ('C', 3.25, 2.0),
    ('V', 4.25, 2.0),
    ('B', 5.25, 2.0),
    ('K', 6.25, 2.0),
    ('M', 7.25, 2.0),
];

const DVORAK: &[(char, f64, f64)] = &[
    ('\'', 0.5, 0.0),
    (',', 1.5, 0.0),
    ('.', 2.5, 0.0),
    ('P', 3.5, 0.0),
    ('Y', 4.5, 0.0),
    ('F', 5.5, 0.0),
    ('G', 6.5, 0.0),
    ('C', 7.5, 0.0),
    ('R', 8.5, 0.0),
    ('L', 9.5, 0.0),
    ('A', 0.75, 1.0),
    ('O', 1.75, 1.0),
    ('E', 2.75, 1.0),
    ('U', 3.75, 1.0),
    ('I', 4.75, 1.0),
    ('D', 5.75, 1.0),
    ('H', 6.75, 1.0),
    ('T', 7.75, 1.0),
    ('N', 8.75, 1.0),
    ('S', 9.75, 1.0),
    (';', 1.25, 2.0),
    ('Q', 2.25, 2.0),
    ('J', 3.25, 2.0),
    ('K', 4.25, 2.0),
    ('X', 5.25, 2.0),
    ('B', 6.25, 2.0),
    ('M', 7.25, 2.0),
    ('W', 8.25, 2.0),
    ('V', 9.25, 2.0),
    ('Z', 10.25, 2.0),
];

const AZERTY: &[(char, f64, f64)] = &[
    ('A', 0.5, 0.0),
    ('Z', 1.5, 0.0),
    ('E', 2.5, 0.0),
    ('R', 3.5, 0.0),
    ('T', 4.5, 0.0),
    ('Y', 5.5, 0.0),
    ('U', 6.5, 0.0),
    ('I', 7.5, 0.0),
    ('O', 8.5, 0.0),
    ('P', 9.5, 0.0),
    ('Q', 0.75, 1.0),
    ('S', 1.75, 1.0),
    ('D', 2.75, 1.0),
    ('F', 3.75, 1.0),
    ('G', 4.75, 1.0),
    ('H', 5.75, 1.0),
    ('J', 6.75, 1.0),
    ('K', 7.75, 1.0),
    ('L', 8.75, 1.0),
    ('M', 9.75, 1.0),
    ('W', 1.25, 2.0),
    ('X', 2.25, 2.0),
    ('C', 3.25, 2.0),
    ('V', 4.25, 2.0),
    ('B', 5.25, 2.0),
    ('N', 6.25, 2.0),
];

const ABCDEF: &[(char, f64, f64)] = &[
    ('A', 0.5, 0.0),
    ('B', 1.5, 0.0),
    ('C', 2.5, 0.0),
    ('D', 3.5, 0.0),
    ('E', 4.5, 0.0),
    ('F', 5.5, 0.0),
    ('G', 6.5, 0.0),
    ('H', 7.5, 0.0),
    ('I', 8.5, 0.0),
    ('J', 9.5, 0.0),
    ('K', 0.75, 1.0),
    ('L', 1.75, 1.0),
    ('M', 2.75, 1.0),
    ('N', 3.75, 1.0),
    ('O', 4.75, 1.0),
    ('P', 5.75, 1.0),
    ('Q', 6.75, 1.0),
    ('R', 7.75, 1.0),
    ('S', 8.75, 1.0),
    ('T', 1.25, 2.0),
    ('U', 2.25, 2.0),
    ('V', 3.25, 2.0),
    ('W', 4.25, 2.0),
    ('X', 5.25, 2.0),
    ('Y', 6.25, 2.0),
    ('Z', 7.25, 2.0),
];

// The lam-alef ligature key produces two code points and cannot be matched
// one character at a time, so it has no entry here.
const ARABIC: &[(char, f64, f64)] = &[
    ('ض', 0.5, 0.0),
    ('ص', 1.5, 0.0),
    ('ث', 2.5, 0.0),
    ('ق', 3.5, 0.0),
    ('ف', 4.5, 0.0),
    ('غ', 5.5, 0.0),
    ('ع', 6.5, 0.0),
    ('ه', 7.5, 0.0),
    ('خ', 8.5, 0.0),
    ('ح', 9.5, 0.0),
    ('ج', 10.5, 0.0),
    ('د', 11.5, 0.0),
    ('ش', 0.75, 1.0),
    ('س', 1.75, 1.0),
    ('ي', 2.75, 1.0),
    ('ب', 3.75, 1.0),
    ('ل', 4.75, 1.0),
    ('ا', 5.75, 1.0),
    ('ت', 6.75, 1.0),
    ('ن', 7.75, 1.0),
    ('م', 8.75, 1.0),
    ('ك', 9.75, 1.0),
    ('ط', 10.75, 1.0),
    ('ئ', 1.25, 2.0),
    ('ء', 2.25, 2.0),
    ('ؤ', 3.25, 2.0),
    ('ر', 4.25, 2.0),
    ('ى', 6.25, 2.0),
    ('ة', 7.25, 2.0),
    ('و', 8.25, 2.0),
    ('ز', 9.25, 2.0),
    ('ظ', 10.25, 2.0),
];

/// Minimum width of the keyboard drawing in pixels
pub const MIN_KEYBOARD_WIDTH: f64 = 650.0;

fn base_rows(layout: KeyboardLayout) -> &'static [(char, f64, f64)] {
    match layout {
        KeyboardLayout::Qwerty => QWERTY,
        KeyboardLayout::Colemak => COLEMAK,
        KeyboardLayout::Dvorak => DVORAK,
        KeyboardLayout::Azerty => AZERTY,
        KeyboardLayout::Abcdef => ABCDEF,
        KeyboardLayout::Arabic => ARABIC,
    }
}

fn build_table(layout: KeyboardLayout, include_numbers: bool) -> CharacterTable {
    let mut table = CharacterTable::default();
    if include_numbers {
        table.extend_rows(NUMBER_ROW);
    }
    // Base keys are laid over the number row, so they win any shared character
    table.extend_rows(base_rows(layout));
    table
}

static TABLES: OnceLock<HashMap<(KeyboardLayout, bool), CharacterTable>> = OnceLock::new();

/// Resolve a layout (optionally with the number row) into its character table
///
/// Tables are built once per process and shared afterwards.
pub fn resolve_layout(layout: KeyboardLayout, include_numbers: bool) -> &'static CharacterTable {
    let tables = TABLES.get_or_init(|| {
        KeyboardLayout::ALL
            .iter()
            .flat_map(|&l| [(l, false), (l, true)])
            .map(|key| (key, build_table(key.0, key.1)))
            .collect()
    });
    // Every (layout, flag) pair is inserted above
    &tables[&(layout, include_numbers)]
}

/// Width in pixels needed to draw every key of the resolved layout
pub fn keyboard_width(layout: KeyboardLayout, include_numbers: bool) -> f64 {
    table_width(resolve_layout(layout, include_numbers))
}

/// Canvas width for drawing the keys of `table`, never below the default
pub(crate) fn table_width(table: &CharacterTable) -> f64 {
    match table.max_x() {
        Some(max_x) => MIN_KEYBOARD_WIDTH.max((max_x + 1.0) * 60.0 + 56.0),
        None => MIN_KEYBOARD_WIDTH,
    }
}
