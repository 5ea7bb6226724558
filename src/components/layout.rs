//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main screen layout areas
pub struct MainLayout {
    pub tabs: Rect,
    /// Filter bar on the operators tab, summary line on the DPS tab
    pub toolbar: Rect,
    pub body: Rect,
    /// Class/branch description cards, when shown
    pub descriptions: Option<Rect>,
    pub status: Rect,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Calculate main screen layout
pub fn calculate_main_layout(area: Rect, show_descriptions: bool) -> MainLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    // Operator list on the left, description cards on the right
    let (body, descriptions) = if show_descriptions {
        let body_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[2]);
        (body_chunks[0], Some(body_chunks[1]))
    } else {
        (main_chunks[2], None)
    };

    MainLayout {
        tabs: main_chunks[0],
        toolbar: main_chunks[1],
        body,
        descriptions,
        status: main_chunks[3],
        help: main_chunks[4],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup_is_clamped_to_area() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(centered_popup(area, 20, 4), Rect::new(10, 3, 20, 4));
        assert_eq!(centered_popup(area, 100, 100), area);
    }

    #[test]
    fn test_descriptions_split_body() {
        let area = Rect::new(0, 0, 100, 40);
        let without = calculate_main_layout(area, false);
        let with = calculate_main_layout(area, true);

        assert!(without.descriptions.is_none());
        let cards = with.descriptions.unwrap();
        assert_eq!(with.body.width + cards.width, without.body.width);
        assert_eq!(with.help.y, 39);
    }
}
