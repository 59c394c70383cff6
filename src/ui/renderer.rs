use ratatui::{
    Frame,
    layout::Rect,
    style::{Style, Stylize},
    text::{Line, Span},
};

use crate::app::config::Config;
use crate::player::PlaybackSnapshot;
use crate::ui::layout::{ALBUM_COLUMN, LayoutSet, filled_cells};
use crate::ui::utils::{centered_x, format_clock, truncate_by_width};

/// Draw every text element of the display. The artwork is blitted separately.
pub fn render(frame: &mut Frame, snapshot: &PlaybackSnapshot, layout: &LayoutSet, config: &Config) {
    let colors = &config.colors;
    let columns = layout.columns;

    if !snapshot.album.is_empty() {
        let max_width = columns.saturating_sub(4) as usize;
        let album = truncate_by_width(&format!(" {}", snapshot.album), max_width);
        put_line(
            frame,
            ALBUM_COLUMN,
            layout.album_row,
            Line::from(album).fg(colors.album_color()),
        );
    }

    put_centered(
        frame,
        &snapshot.artist,
        layout.artist_row,
        columns,
        Style::new().fg(colors.artist_color()),
    );
    put_centered(
        frame,
        &snapshot.title,
        layout.title_row,
        columns,
        Style::new().fg(colors.title_color()).bold(),
    );

    let time = format!(
        "{} / {}",
        format_clock(snapshot.position),
        format_clock(snapshot.duration)
    );
    put_centered(
        frame,
        &time,
        layout.time_row,
        columns,
        Style::new().fg(colors.time_color()),
    );

    render_progress_bar(frame, snapshot, layout, config);

    if let Some(row) = layout.status_row {
        let footer = format!(
            " ⏵  Status: {} |    {}x{} ",
            snapshot.status, snapshot.columns, snapshot.rows
        );
        put_line(
            frame,
            ALBUM_COLUMN,
            row,
            Line::from(footer).fg(colors.footer_color()),
        );
    }
}

fn render_progress_bar(
    frame: &mut Frame,
    snapshot: &PlaybackSnapshot,
    layout: &LayoutSet,
    config: &Config,
) {
    let bar = layout.progress_bar;
    let ui = &config.ui;
    let colors = &config.colors;

    let filled = filled_cells(snapshot.position, snapshot.duration, bar.width);
    let line = Line::from(vec![
        Span::styled(
            ui.bar_filled.repeat(filled as usize),
            Style::new().fg(colors.progress_filled_color()),
        ),
        Span::styled(
            ui.bar_empty.repeat((bar.width - filled) as usize),
            Style::new().fg(colors.progress_empty_color()),
        ),
    ]);
    put_line(frame, bar.x, bar.y, line);

    // One-cell buttons on either side of the bar, matching the hit-test zones
    if bar.x > 0 {
        put_line(frame, bar.x - 1, bar.y, Line::from(ui.previous_glyph.as_str()));
    }
    if let Ok(next_x) = u16::try_from(bar.end_x()) {
        put_line(frame, next_x, bar.y, Line::from(ui.next_glyph.as_str()));
    }
}

fn put_centered(frame: &mut Frame, text: &str, row: u16, columns: u16, style: Style) {
    if text.is_empty() {
        return;
    }
    let x = centered_x(text, columns);
    put_line(frame, x, row, Line::styled(text.to_string(), style));
}

/// Draw a line starting at (`x`, `y`), clipped to the frame.
fn put_line(frame: &mut Frame, x: u16, y: u16, line: Line) {
    let width = u16::try_from(line.width()).unwrap_or(u16::MAX);
    let area = Rect::new(x, y, width, 1).intersection(frame.area());
    if area.is_empty() {
        return;
    }
    frame.render_widget(line, area);
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::player::PlayStatus;
    use crate::ui::layout::{TerminalGeometry, compute};
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer, style::Color};

    pub(crate) fn row_text(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    pub(crate) fn snapshot(rows: u16, columns: u16) -> PlaybackSnapshot {
        PlaybackSnapshot {
            title: "Song".to_string(),
            artist: "Artist".to_string(),
            album: "Album".to_string(),
            art_source_id: "https://art/a".to_string(),
            status: PlayStatus::Playing,
            position: 50_000_000,
            duration: 200_000_000,
            rows,
            columns,
        }
    }

    fn draw(snapshot: &PlaybackSnapshot, show_status_bar: bool) -> Buffer {
        let geometry = TerminalGeometry {
            rows: snapshot.rows,
            columns: snapshot.columns,
            cell_width: 10,
            cell_height: 20,
        };
        let layout = compute(&geometry, show_status_bar);
        let config = Config::default();

        let mut terminal =
            Terminal::new(TestBackend::new(snapshot.columns, snapshot.rows)).unwrap();
        terminal
            .draw(|frame| render(frame, snapshot, &layout, &config))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    #[test]
    fn test_text_positions() {
        let buffer = draw(&snapshot(40, 120), false);

        assert_eq!(row_text(&buffer, 0).trim_end(), "   Album");
        assert_eq!(row_text(&buffer, 2).find("Artist"), Some(57));
        assert_eq!(row_text(&buffer, 3).find("Song"), Some(58));
        assert_eq!(row_text(&buffer, 35).trim(), "0:50 / 3:20");
        assert_eq!(buffer[(0, 0)].fg, Color::Reset);
        assert_eq!(buffer[(3, 0)].fg, Color::Cyan);
        assert_eq!(buffer[(58, 3)].fg, Color::Red);
    }

    #[test]
    fn test_progress_bar_and_buttons() {
        // 60-cell bar at x = 30, a quarter of the way through
        let buffer = draw(&snapshot(40, 120), false);
        let row = row_text(&buffer, 36);
        let cells: Vec<char> = row.chars().collect();

        assert_eq!(cells[29], '«');
        assert!(cells[30..45].iter().all(|c| *c == '█'));
        assert!(cells[45..90].iter().all(|c| *c == '░'));
        assert_eq!(cells[90], '»');
        assert_eq!(buffer[(30, 36)].fg, Color::Green);
    }

    #[test]
    fn test_status_footer() {
        let buffer = draw(&snapshot(30, 80), true);
        let footer = row_text(&buffer, 28);
        assert!(footer.starts_with("   ⏵"), "{:?}", footer);
        assert!(footer.contains("  Status: Playing |    80x30 "), "{:?}", footer);

        let buffer = draw(&snapshot(30, 80), false);
        assert_eq!(row_text(&buffer, 28).trim(), "");
    }

    #[test]
    fn test_album_is_truncated() {
        let mut snap = snapshot(24, 20);
        snap.album = "A very long album name indeed".to_string();
        let buffer = draw(&snap, false);
        // " " + album cut to 16 cells at column 2
        assert_eq!(row_text(&buffer, 0), "   A very long alb  ");
    }

    #[test]
    fn test_tiny_terminal_is_clipped() {
        // Bar and buttons run past the right edge; drawing must not panic
        let buffer = draw(&snapshot(3, 6), true);
        assert_eq!(buffer.area.width, 6);
    }
}
