//! Responsive grid sizing for the model-card display.
//!
//! Derives how many model cards fit the current viewport so no view needs
//! more than two rows of scroll-free cards. The calculator is pure: it reads
//! its inputs at call time and keeps no cache, so callers recompute on every
//! resize and replace the previous layout wholesale.

/// Vertical space reserved for headers, tabs, search, and pagination.
pub const HEADER_RESERVE: u32 = 280;
/// Card width in pixels.
pub const CARD_WIDTH: u32 = 140;
/// Card height in pixels (60px card plus row gap).
pub const CARD_HEIGHT: u32 = 80;
/// Minimum horizontal gap between cards.
pub const MIN_GAP: u32 = 8;
/// Horizontal padding reserved at the viewport edges.
pub const SIDE_PADDING: u32 = 100;

/// Column bounds.
pub const MIN_COLUMNS: u32 = 3;
pub const MAX_COLUMNS: u32 = 8;
/// Row cap: the grid never grows past two rows.
pub const MAX_ROWS: u32 = 2;
/// Page-size bounds for the resulting `columns * rows` product.
pub const MIN_PAGE_SIZE: usize = 12;
pub const MAX_PAGE_SIZE: usize = 48;

/// Viewport dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A computed grid layout. No identity beyond "current".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    /// Number of card columns, in `[MIN_COLUMNS, MAX_COLUMNS]`.
    pub columns: u32,
    /// Number of card rows, capped at `MAX_ROWS`.
    pub rows: u32,
    /// Cards shown per page, clamped to `[MIN_PAGE_SIZE, MAX_PAGE_SIZE]`.
    pub page_size: usize,
    /// Per-card width as a percentage of the row.
    pub card_width_percent: f32,
}

/// Compute the grid layout for a viewport.
///
/// Subtractions saturate, so degenerate viewports still produce an in-bounds
/// layout (minimum columns, minimum page size).
pub fn grid_layout(viewport: Viewport) -> GridLayout {
    let usable_width = viewport.width.saturating_sub(SIDE_PADDING);
    let columns = (usable_width / (CARD_WIDTH + MIN_GAP)).clamp(MIN_COLUMNS, MAX_COLUMNS);

    let usable_height = viewport.height.saturating_sub(HEADER_RESERVE);
    let rows = (usable_height / CARD_HEIGHT).min(MAX_ROWS);

    let page_size = ((columns * rows) as usize).clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE);

    GridLayout {
        columns,
        rows,
        page_size,
        card_width_percent: 100.0 / columns as f32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_viewport_hits_column_cap() {
        // floor(1820 / 148) = 12, capped at 8
        let layout = grid_layout(Viewport::new(1920, 1080));
        assert_eq!(layout.columns, 8);
    }

    #[test]
    fn test_narrow_viewport_hits_column_floor() {
        // floor(300 / 148) = 2, raised to 3
        let layout = grid_layout(Viewport::new(400, 1080));
        assert_eq!(layout.columns, 3);
    }

    #[test]
    fn test_rows_capped_at_two() {
        let layout = grid_layout(Viewport::new(1920, 2160));
        assert_eq!(layout.rows, 2);
    }

    #[test]
    fn test_short_viewport_single_row() {
        // usable height 400 - 280 = 120 -> one row of 80px cards
        let layout = grid_layout(Viewport::new(1920, 400));
        assert_eq!(layout.rows, 1);
    }

    #[test]
    fn test_page_size_clamped_to_minimum() {
        // 3 columns * 1 row = 3, raised to 12
        let layout = grid_layout(Viewport::new(400, 400));
        assert_eq!(layout.page_size, MIN_PAGE_SIZE);
    }

    #[test]
    fn test_page_size_tracks_grid_when_in_bounds() {
        let layout = grid_layout(Viewport::new(1920, 1080));
        assert_eq!(layout.page_size, (layout.columns * layout.rows) as usize);
    }

    #[test]
    fn test_degenerate_viewport_stays_in_bounds() {
        let layout = grid_layout(Viewport::new(0, 0));
        assert_eq!(layout.columns, MIN_COLUMNS);
        assert_eq!(layout.rows, 0);
        assert_eq!(layout.page_size, MIN_PAGE_SIZE);
    }

    #[test]
    fn test_card_width_percent_splits_the_row() {
        let layout = grid_layout(Viewport::new(1920, 1080));
        assert!((layout.card_width_percent - 12.5).abs() < f32::EPSILON);
    }
}
