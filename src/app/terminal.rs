use crate::ui::layout::TerminalGeometry;
use crossterm::{
    cursor::{Hide, Show},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode, window_size,
    },
};
use ratatui::DefaultTerminal;
use ratatui_image::picker::Picker;

/// Cell size used when neither the terminal nor a query reports one
pub const FALLBACK_CELL_SIZE: (u16, u16) = (10, 20);

/// Initialize the terminal for the application
pub fn init_terminal() -> color_eyre::Result<DefaultTerminal> {
    execute!(
        std::io::stdout(),
        EnterAlternateScreen,
        EnableMouseCapture,
        Hide
    )?;
    enable_raw_mode()?;

    let terminal =
        ratatui::Terminal::new(ratatui::backend::CrosstermBackend::new(std::io::stdout()))?;

    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal() -> color_eyre::Result<()> {
    execute!(
        std::io::stdout(),
        DisableMouseCapture,
        Show,
        LeaveAlternateScreen
    )?;
    disable_raw_mode()?;
    Ok(())
}

/// Cell size to fall back on when `window_size` reports no pixel dimensions, which
/// is common over ssh and in some emulators. Must run before the event stream starts,
/// since the terminal answers the query on stdin.
pub fn detect_cell_fallback() -> Option<(u16, u16)> {
    match window_size() {
        Ok(size) if size.width > 0 && size.height > 0 => None,
        _ => query_cell_size(),
    }
}

fn query_cell_size() -> Option<(u16, u16)> {
    match Picker::from_query_stdio() {
        Ok(picker) => {
            let (width, height) = picker.font_size();
            (width > 0 && height > 0).then_some((width, height))
        }
        Err(e) => {
            log::debug!("Font size query failed: {:?}", e);
            None
        }
    }
}

/// Current terminal size in cells and pixels per cell.
pub fn query_geometry(cell_fallback: Option<(u16, u16)>) -> color_eyre::Result<TerminalGeometry> {
    let size = window_size()?;
    Ok(geometry_from(
        size.rows,
        size.columns,
        size.width,
        size.height,
        cell_fallback,
    ))
}

fn geometry_from(
    rows: u16,
    columns: u16,
    pixel_width: u16,
    pixel_height: u16,
    cell_fallback: Option<(u16, u16)>,
) -> TerminalGeometry {
    let (cell_width, cell_height) = if rows > 0 && columns > 0 && pixel_width > 0 && pixel_height > 0
    {
        (pixel_width / columns, pixel_height / rows)
    } else {
        cell_fallback.unwrap_or(FALLBACK_CELL_SIZE)
    };

    TerminalGeometry {
        rows,
        columns,
        cell_width: cell_width.max(1),
        cell_height: cell_height.max(1),
    }
}
