//! Mapping typed names onto keyboard positions

use std::collections::BTreeSet;

use super::config::LayoutConfig;
use super::types::{CharacterTable, Point};

/// Map a name to pixel points with the default scale and offsets
///
/// Characters are matched by their uppercase form. Characters missing from
/// `table` (spaces, punctuation, digits without the number row) are skipped,
/// so the result may be empty; that means "nothing to draw", not an error.
pub fn map_to_points(name: &str, table: &CharacterTable, include_numbers: bool) -> Vec<Point> {
    map_to_points_with_config(name, table, include_numbers, &LayoutConfig::default())
}

/// Map a name to pixel points with a custom configuration
pub fn map_to_points_with_config(
    name: &str,
    table: &CharacterTable,
    include_numbers: bool,
    config: &LayoutConfig,
) -> Vec<Point> {
    let y_offset = config.y_offset_for(include_numbers);

    name.to_uppercase()
        .chars()
        .filter_map(|c| table.get(c))
        .map(|pos| {
            Point::new(
                pos.x * config.cell_size + config.x_offset,
                pos.y * config.cell_size + y_offset,
            )
        })
        .collect()
}

/// Keys of `table` that appear in `name`
pub fn active_keys(name: &str, table: &CharacterTable) -> BTreeSet<char> {
    name.to_uppercase()
        .chars()
        .filter(|&c| table.contains(c))
        .collect()
}
