//! Add operator dialog
//!
//! Lists every operator in the catalog with a type-to-filter query.
//! Operators already in the comparison are marked and cannot be picked.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::{Catalog, DpsCalculator, OperatorId};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

#[derive(Debug, Clone)]
struct PickerRow {
    id: OperatorId,
    name: String,
    class_name: &'static str,
    stars: String,
    added: bool,
}

#[derive(Default)]
pub struct AddOperatorDialog {
    rows: Vec<PickerRow>,
    pub query: String,
    /// Index into the filtered rows
    pub selected_index: usize,
    list_state: ListState,
}

impl AddOperatorDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the catalog and roster, clearing any previous query
    pub fn open(&mut self, catalog: &Catalog, dps: &DpsCalculator) {
        self.rows = catalog
            .operators()
            .iter()
            .map(|op| PickerRow {
                id: op.char_id.clone(),
                name: op.name.clone(),
                class_name: op.profession.class_name(),
                stars: op.stars(),
                added: dps.contains(&op.char_id),
            })
            .collect();
        self.query.clear();
        self.select_first_available();
    }

    fn filtered(&self) -> Vec<&PickerRow> {
        let query = self.query.to_lowercase();
        self.rows
            .iter()
            .filter(|row| query.is_empty() || row.name.to_lowercase().contains(&query))
            .collect()
    }

    fn select_first_available(&mut self) {
        self.selected_index = self.filtered().iter().position(|r| !r.added).unwrap_or(0);
        self.list_state.select(Some(self.selected_index));
    }

    /// Operator under the cursor, unless it is already compared
    pub fn selected_operator(&self) -> Option<&OperatorId> {
        self.filtered()
            .get(self.selected_index)
            .filter(|row| !row.added)
            .map(|row| &row.id)
    }

    fn select_next(&mut self) {
        if self.selected_index + 1 < self.filtered().len() {
            self.selected_index += 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    fn select_prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    pub fn search_input(&mut self, c: char) {
        self.query.push(c);
        self.select_first_available();
    }

    pub fn search_backspace(&mut self) {
        self.query.pop();
        self.select_first_available();
    }
}

impl Component for AddOperatorDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => self.selected_operator().cloned().map(Action::AddOperator),
            KeyCode::Up => Some(Action::ModalUp),
            KeyCode::Down => Some(Action::ModalDown),
            KeyCode::Backspace => {
                self.search_backspace();
                None
            }
            KeyCode::Char(c) => {
                self.search_input(c);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::ModalUp => self.select_prev(),
            Action::ModalDown => self.select_next(),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 56, area.height.saturating_sub(4).max(10));
        frame.render_widget(Clear, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Query
                Constraint::Min(3),    // Operators
                Constraint::Length(3), // Help bar
            ])
            .split(popup_area);

        let query = Paragraph::new(Line::from(vec![
            Span::styled("Search: ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{}_", self.query), Style::default().fg(Color::Cyan)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Add new operator ")
                .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
                .border_style(Style::default().fg(Color::Green)),
        );
        frame.render_widget(query, chunks[0]);

        let filtered = self.filtered();
        let items: Vec<ListItem> = filtered
            .iter()
            .map(|row| {
                let (marker, name_style) = if row.added {
                    ("✓ ", Style::default().fg(Color::DarkGray))
                } else {
                    ("  ", Style::default().fg(Color::White))
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(Color::Green)),
                    Span::styled(format!("{:6} ", row.stars), Style::default().fg(Color::Yellow)),
                    Span::styled(format!("{:20}", row.name), name_style),
                    Span::styled(row.class_name, Style::default().fg(Color::DarkGray)),
                ]))
            })
            .collect();
        let empty = items.is_empty();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} operators ", filtered.len()))
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");
        if empty {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(self.selected_index));
        }
        frame.render_stateful_widget(list, chunks[1], &mut self.list_state);

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Enter ", Style::default().fg(Color::Yellow)),
            Span::raw("Add  "),
            Span::styled(" ↑/↓ ", Style::default().fg(Color::Cyan)),
            Span::raw("Navigate  "),
            Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
            Span::raw("Cancel"),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::fixtures::sample_catalog;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_cursor_skips_operators_already_compared() {
        let catalog = sample_catalog();
        let mut dps = DpsCalculator::new(catalog.len());
        dps.add_operator(&catalog, &OperatorId::new("char_017_huang")).unwrap();

        let mut dialog = AddOperatorDialog::new();
        dialog.open(&catalog, &dps);

        assert_eq!(dialog.selected_operator(), Some(&OperatorId::new("char_350_surtr")));
        dialog.update(Action::ModalUp).unwrap();
        assert_eq!(dialog.selected_operator(), None);
        assert_eq!(dialog.handle_key_event(key(KeyCode::Enter)).unwrap(), None);
    }

    #[test]
    fn test_typing_filters_by_name() {
        let catalog = sample_catalog();
        let dps = DpsCalculator::new(catalog.len());
        let mut dialog = AddOperatorDialog::new();
        dialog.open(&catalog, &dps);

        for c in "ptilo".chars() {
            dialog.handle_key_event(key(KeyCode::Char(c))).unwrap();
        }

        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Enter)).unwrap(),
            Some(Action::AddOperator(OperatorId::new("char_128_plosis")))
        );
    }
}
