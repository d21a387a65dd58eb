//! Configuration for mapping grid positions to pixels

/// Scale and offsets applied when turning key positions into pixel points
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Pixels per grid unit (one key pitch)
    pub cell_size: f64,

    /// Horizontal offset added to every point
    pub x_offset: f64,

    /// Vertical offset when only the letter rows are shown
    pub y_offset: f64,

    /// Vertical offset when the number row is shown, leaving headroom for it
    pub numeric_y_offset: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            cell_size: 60.0,
            x_offset: 28.0,
            y_offset: 40.0,
            numeric_y_offset: 100.0,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pixel size of one grid unit
    pub fn with_cell_size(mut self, cell_size: f64) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Set the horizontal offset
    pub fn with_x_offset(mut self, offset: f64) -> Self {
        self.x_offset = offset;
        self
    }

    /// Set both vertical baselines
    pub fn with_y_offsets(mut self, letters: f64, numeric: f64) -> Self {
        self.y_offset = letters;
        self.numeric_y_offset = numeric;
        self
    }

    /// Vertical offset for the given numeric mode
    pub fn y_offset_for(&self, include_numbers: bool) -> f64 {
        if include_numbers {
            self.numeric_y_offset
        } else {
            self.y_offset
        }
    }
}
