//! Class and branch menus
//!
//! A popup list whose first entry clears the selection ("All Classes" /
//! "All Branches"). Enter emits the matching `Set*` action.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::{Catalog, Profession, SubProfessionId};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

struct MenuEntry {
    label: String,
    /// Right-aligned hint, e.g. operator count
    detail: String,
    action: Action,
    is_current: bool,
}

/// Popup menu for the class or branch filter
pub struct FilterMenu {
    title: &'static str,
    entries: Vec<MenuEntry>,
    pub selected_index: usize,
    list_state: ListState,
}

impl Default for FilterMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterMenu {
    pub fn new() -> Self {
        Self {
            title: " Class ",
            entries: Vec::new(),
            selected_index: 0,
            list_state: ListState::default(),
        }
    }

    /// Fill with every class in the data, cursor on the current one
    pub fn open_class_menu(&mut self, catalog: &Catalog, current: Option<Profession>) {
        self.title = " Select Class ";
        self.entries = vec![MenuEntry {
            label: "All Classes".to_string(),
            detail: catalog.len().to_string(),
            action: Action::SetProfession(None),
            is_current: current.is_none(),
        }];
        for profession in catalog.professions() {
            let count = catalog
                .operators()
                .iter()
                .filter(|op| op.profession == profession)
                .count();
            self.entries.push(MenuEntry {
                label: profession.class_name().to_string(),
                detail: count.to_string(),
                action: Action::SetProfession(Some(profession)),
                is_current: current == Some(profession),
            });
        }
        self.select_current();
    }

    /// Fill with the branches of `profession`
    pub fn open_branch_menu(
        &mut self,
        catalog: &Catalog,
        profession: Profession,
        current: Option<&SubProfessionId>,
    ) {
        self.title = " Select Branch ";
        self.entries = vec![MenuEntry {
            label: "All Branches".to_string(),
            detail: profession.class_name().to_string(),
            action: Action::SetSubProfession(None),
            is_current: current.is_none(),
        }];
        for branch in catalog.branches_of(profession) {
            self.entries.push(MenuEntry {
                label: branch.name.clone(),
                detail: branch.r#trait.clone(),
                action: Action::SetSubProfession(Some(branch.sub_profession_id.clone())),
                is_current: current == Some(&branch.sub_profession_id),
            });
        }
        self.select_current();
    }

    fn select_current(&mut self) {
        self.selected_index = self.entries.iter().position(|e| e.is_current).unwrap_or(0);
        self.list_state.select(Some(self.selected_index));
    }

    /// Action bound to the highlighted entry
    pub fn selected_action(&self) -> Option<Action> {
        self.entries.get(self.selected_index).map(|e| e.action.clone())
    }

    pub fn select_next(&mut self) {
        if self.selected_index + 1 < self.entries.len() {
            self.selected_index += 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    pub fn select_prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.list_state.select(Some(self.selected_index));
        }
    }
}

impl Component for FilterMenu {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::CloseModal),
            KeyCode::Enter | KeyCode::Char(' ') => self.selected_action(),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::ModalUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::ModalDown),
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
        let height = (self.entries.len() as u16 + 2 + 3).max(8);
        let popup_area = centered_popup(area, 60, height.min(area.height.saturating_sub(2)));
        frame.render_widget(Clear, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(popup_area);

        let label_width = self
            .entries
            .iter()
            .map(|e| e.label.chars().count())
            .max()
            .unwrap_or(0);

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|entry| {
                let (marker, style) = if entry.is_current {
                    ("● ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                } else {
                    ("  ", Style::default().fg(Color::White))
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(Color::Green)),
                    Span::styled(format!("{:width$}", entry.label, width = label_width), style),
                    Span::styled(
                        format!("  {}", entry.detail),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(self.title)
                    .title_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
                    .border_style(Style::default().fg(Color::Magenta)),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(list, chunks[0], &mut self.list_state);

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Enter ", Style::default().fg(Color::Yellow)),
            Span::raw("Select  "),
            Span::styled(" j/k ", Style::default().fg(Color::Cyan)),
            Span::raw("Navigate  "),
            Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
            Span::raw("Cancel"),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[1]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::fixtures::sample_catalog;

    #[test]
    fn test_class_menu_starts_on_current_class() {
        let catalog = sample_catalog();
        let mut menu = FilterMenu::new();
        menu.open_class_menu(&catalog, Some(Profession::Medic));

        assert_eq!(menu.selected_action(), Some(Action::SetProfession(Some(Profession::Medic))));
        menu.select_prev();
        menu.select_prev();
        menu.select_prev();
        menu.select_prev();
        assert_eq!(menu.selected_action(), Some(Action::SetProfession(None)));
    }

    #[test]
    fn test_branch_menu_lists_only_branches_of_class() {
        let catalog = sample_catalog();
        let mut menu = FilterMenu::new();
        menu.open_branch_menu(&catalog, Profession::Warrior, None);

        assert_eq!(menu.entries.len(), 3);
        assert_eq!(menu.selected_action(), Some(Action::SetSubProfession(None)));
        menu.select_next();
        assert_eq!(
            menu.selected_action(),
            Some(Action::SetSubProfession(Some(SubProfessionId::new("artsfghter"))))
        );
        menu.select_next();
        menu.select_next();
        assert_eq!(
            menu.selected_action(),
            Some(Action::SetSubProfession(Some(SubProfessionId::new("centurion"))))
        );
    }
}
