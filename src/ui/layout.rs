//! Fixed screen layout and its inverse for mouse hit-testing.
//!
//! Drawing and hit-testing both go through [`compute`], so a click always lands on
//! the same cells the progress bar and its buttons were drawn in.

pub const ALBUM_ROW: u16 = 0;
pub const ARTIST_ROW: u16 = 2;
pub const TITLE_ROW: u16 = 3;
pub const ARTWORK_ROW: u16 = 7;
pub const ALBUM_COLUMN: u16 = 2;
pub const MIN_BAR_WIDTH: u16 = 10;

/// Terminal size in cells plus the pixel size of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TerminalGeometry {
    pub rows: u16,
    pub columns: u16,
    pub cell_width: u16,
    pub cell_height: u16,
}

/// Rectangle in character-cell coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutBox {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl LayoutBox {
    /// One past the last column
    pub fn end_x(&self) -> u32 {
        self.x as u32 + self.width as u32
    }
}

/// Artwork area in cells together with its size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArtworkBox {
    pub cells: LayoutBox,
    pub pixel_width: u32,
    pub pixel_height: u32,
}

/// Where every element goes for one terminal geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutSet {
    pub rows: u16,
    pub columns: u16,
    pub album_row: u16,
    pub artist_row: u16,
    pub title_row: u16,
    pub time_row: u16,
    pub progress_bar: LayoutBox,
    pub artwork: ArtworkBox,
    pub status_row: Option<u16>,
}

/// Logical control under a clicked cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickTarget {
    /// Fraction of the track, `0.0..1.0`
    SeekTo(f64),
    Previous,
    Next,
    None,
}

pub fn compute(geometry: &TerminalGeometry, show_status_bar: bool) -> LayoutSet {
    let TerminalGeometry {
        rows,
        columns,
        cell_width,
        cell_height,
    } = *geometry;

    let bar_width = (columns / 2).max(MIN_BAR_WIDTH);
    let bar_x = columns.saturating_sub(bar_width) / 2;
    let bar_y = (rows as u32 * 9 / 10) as u16;

    let time_row = bar_y.saturating_sub(1);

    // A sixel taller than the space above the time readout would scroll the screen,
    // so short terminals get a smaller box with the same proportions.
    let mut art_width = (bar_width as u32 * 2 / 3) as u16;
    let mut art_height = art_width / 2;
    let art_room = time_row.saturating_sub(ARTWORK_ROW);
    if art_height > art_room {
        art_height = art_room;
        art_width = art_room * 2;
    }
    let art_x = columns.saturating_sub(art_width) / 2;

    LayoutSet {
        rows,
        columns,
        album_row: ALBUM_ROW,
        artist_row: ARTIST_ROW,
        title_row: TITLE_ROW,
        time_row,
        progress_bar: LayoutBox {
            x: bar_x,
            y: bar_y,
            width: bar_width,
            height: 1,
        },
        artwork: ArtworkBox {
            cells: LayoutBox {
                x: art_x,
                y: ARTWORK_ROW,
                width: art_width,
                height: art_height,
            },
            pixel_width: art_width as u32 * cell_width as u32,
            pixel_height: art_height as u32 * cell_height as u32,
        },
        status_row: show_status_bar.then(|| rows.checked_sub(2)).flatten(),
    }
}

/// Map a clicked cell to the control drawn there.
pub fn hit_test(click_x: u16, click_y: u16, layout: &LayoutSet) -> ClickTarget {
    let bar = layout.progress_bar;
    if click_y != bar.y || bar.width == 0 {
        return ClickTarget::None;
    }

    let x = click_x as u32;
    if bar.x > 0 && x == bar.x as u32 - 1 {
        ClickTarget::Previous
    } else if x == bar.end_x() {
        ClickTarget::Next
    } else if x >= bar.x as u32 && x < bar.end_x() {
        ClickTarget::SeekTo((x - bar.x as u32) as f64 / bar.width as f64)
    } else {
        ClickTarget::None
    }
}

/// Number of filled progress cells for a position within a track.
pub fn filled_cells(position_us: u64, duration_us: u64, bar_width: u16) -> u16 {
    let duration = duration_us.max(1) as u128;
    let filled = position_us as u128 * bar_width as u128 / duration;
    filled.min(bar_width as u128) as u16
}
