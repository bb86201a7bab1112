use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen layout
pub struct AppLayout {
    pub input_area: Rect,
    pub history_area: Rect,
    pub result_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// - Editor: top left, 60% width
    /// - History: top right, 40% width
    /// - Result / error / spinner: below, at least 6 rows
    /// - Status bar: bottom row
    pub fn new(area: Rect) -> Self {
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(45), // Editor + history
                Constraint::Min(6),         // Result pane
                Constraint::Length(1),      // Status bar
            ])
            .split(area);

        let horizontal_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(vertical_chunks[0]);

        Self {
            input_area: horizontal_chunks[0],
            history_area: horizontal_chunks[1],
            result_area: vertical_chunks[1],
            status_area: vertical_chunks[2],
        }
    }
}
