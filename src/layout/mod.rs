//! Keyboard layouts and the mapping from names to points
//!
//! A layout places every character it knows on a staggered grid. Mapping a
//! name walks its characters, looks each one up and scales the grid position
//! into pixel space, producing the ordered points a signature is drawn
//! through.

pub mod config;
pub mod mapper;
pub mod tables;
pub mod types;

pub use config::LayoutConfig;
pub use mapper::{active_keys, map_to_points, map_to_points_with_config};
pub use tables::{keyboard_width, resolve_layout};
pub use types::{CharacterTable, GridCoord, Key, KeyboardLayout, Point};
