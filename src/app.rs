//! Root application component
//!
//! The App owns the catalog, both stores and the modal stack, and routes
//! events to child components. Store mutations happen only in `update`.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    calculate_main_layout, descriptions_visible, draw_operators_screen, AddOperatorDialog,
    FilterMenu, HelpDialog, OperatorsComponent, OperatorsRenderContext, ParametersDialog,
    QuitDialog, ResultTable,
};
use crate::config::Config;
use crate::model::fragment::{filter_fragment, parse_filter_fragment};
use crate::model::modal::{Modal, ModalStack};
use crate::model::store::Subscription;
use crate::model::ui::Tab;
use crate::model::{AddOutcome, Catalog, DpsCalculator, FilterState, OperatorId};
use crate::services::{self, DataError};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};
use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

// ═══════════════════════════════════════════════════════════════════════════════
// Error Message Helpers
// ═══════════════════════════════════════════════════════════════════════════════

/// User-facing explanation of a failed data load
fn data_error_message(error: &DataError, data_dir: &Path) -> String {
    match error {
        DataError::MissingFile(path) => format!(
            "operators.json not found at:\n  {}\n\n\
             Point the app at the prepared data tables with either:\n  \
             • \"data_dir\" in ~/.operator-tui/config.json\n  \
             • the OPERATOR_TUI_DATA environment variable\n\n\
             Current data directory: {}",
            path.display(),
            data_dir.display()
        ),
        DataError::Io { .. } => format!("{}\n\nCheck the file permissions and try again.", error),
        DataError::Parse { .. } => format!(
            "{}\n\n\
             This may indicate:\n\
             • The file is not valid JSON\n\
             • The data was exported in an older format\n\
             • The file is still being written",
            error
        ),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

pub struct App {
    pub catalog: Catalog,
    pub filter: FilterState,
    pub dps: DpsCalculator,
    pub modals: ModalStack,
    pub active_tab: Tab,
    pub config: Config,

    pub should_quit: bool,
    /// Error for the status line, cleared on the next key press
    pub error: Option<String>,
    pub status_message: Option<String>,
    /// Shown instead of the operator list when the data tables failed to load
    pub load_error: Option<String>,
    /// Where CSV exports are written
    pub export_dir: PathBuf,

    /// Set by the DPS store listener whenever the roster changes
    roster_dirty: Rc<Cell<bool>>,
    _roster_subscription: Subscription,
    /// Set by the filter listener; cleared once the list cursor is fixed up
    filter_changed: Rc<Cell<bool>>,
    _filter_subscription: Subscription,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub operators: OperatorsComponent,
    pub result_table: ResultTable,
    pub filter_menu: FilterMenu,
    pub add_operator_dialog: AddOperatorDialog,
    pub parameters_dialog: ParametersDialog,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    pub fn new(config: Config, catalog: Catalog) -> App {
        let mut filter = FilterState::new(config.show_only_guide_available);
        let filter_changed = Rc::new(Cell::new(false));
        let changed = Rc::clone(&filter_changed);
        let filter_subscription = filter.subscribe(move |_| changed.set(true));

        let mut dps = DpsCalculator::new(catalog.len());

        let roster_dirty = Rc::new(Cell::new(false));
        let dirty = Rc::clone(&roster_dirty);
        let roster_subscription = dps.subscribe(move |_| dirty.set(true));

        let mut app = App {
            filter,
            dps,
            modals: ModalStack::new(),
            active_tab: Tab::Operators,
            should_quit: false,
            error: None,
            status_message: None,
            load_error: None,
            export_dir: Config::output_dir(),
            roster_dirty,
            _roster_subscription: roster_subscription,
            filter_changed,
            _filter_subscription: filter_subscription,
            operators: OperatorsComponent::new(config.show_class_descriptions),
            result_table: ResultTable::new(),
            filter_menu: FilterMenu::new(),
            add_operator_dialog: AddOperatorDialog::new(),
            parameters_dialog: ParametersDialog::new(),
            quit_dialog: QuitDialog::default(),
            help_dialog: HelpDialog::default(),
            catalog,
            config,
        };
        app.operators.select_first(&app.catalog, &app.filter);
        app
    }

    /// Load the catalog from the configured data directory
    ///
    /// A failed load still yields a running app with an empty catalog and
    /// the failure explained on screen.
    pub fn load(config: Config) -> App {
        match services::load_catalog(config.data_path()) {
            Ok(catalog) => App::new(config, catalog),
            Err(e) => {
                tracing::error!(error = %e, "Failed to load data tables");
                let message = data_error_message(&e, &config.data_path());
                let mut app = App::new(config, Catalog::default());
                app.load_error = Some(message);
                app
            }
        }
    }

    /// Apply a `#class-branch` fragment; returns whether it was understood
    pub fn apply_fragment(&mut self, fragment: &str) -> bool {
        match parse_filter_fragment(fragment, &self.catalog) {
            Some(parsed) => {
                match parsed.sub_profession_id {
                    Some(branch) => self.filter.filter_by_branch(parsed.profession, branch),
                    None => self.filter.set_profession(Some(parsed.profession)),
                }
                self.operators.select_first(&self.catalog, &self.filter);
                self.filter_changed.set(false);
                true
            }
            None => {
                tracing::warn!(fragment, "Ignoring unrecognised filter fragment");
                self.error = Some(format!("Unknown class in '{}'", fragment));
                false
            }
        }
    }

    /// Whether the comparison changed since the last export
    pub fn has_unexported_changes(&self) -> bool {
        self.roster_dirty.get() && !self.dps.is_empty()
    }

    fn selected_operator_id(&self) -> Option<OperatorId> {
        self.operators
            .selected_operator(&self.catalog, &self.filter)
            .map(|op| op.char_id.clone())
    }

    fn close_menu(&mut self) {
        if matches!(self.modals.top(), Some(Modal::ClassMenu | Modal::BranchMenu)) {
            self.modals.pop();
        }
    }

    fn export(&mut self) {
        if self.dps.is_empty() {
            self.status_message = Some("Nothing to export".to_string());
            return;
        }
        match services::export_comparison(&self.export_dir, self.dps.entries(), self.dps.calcs()) {
            Ok(path) => {
                self.roster_dirty.set(false);
                self.status_message = Some(format!("Exported to {}", path.display()));
            }
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                self.error = Some(format!("Export failed: {}", e));
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::ForceQuit));
        }
        self.error = None;
        self.status_message = None;

        if let Some(modal) = self.modals.top().cloned() {
            return self.handle_modal_key_event(&modal, key);
        }
        match self.active_tab {
            Tab::Operators => self.operators.handle_key_event(key),
            Tab::DpsCalculator => self.result_table.handle_key_event(key),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        tracing::trace!(%action, "update");
        let previous = if action.changes_filter() {
            self.selected_operator_id()
        } else {
            None
        };

        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick | Action::Resize(_, _) => {}
            Action::ForceQuit => {
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // Navigation
            // ─────────────────────────────────────────────────────────────────
            Action::NextItem => match self.active_tab {
                Tab::Operators => self.operators.next(&self.catalog, &self.filter),
                Tab::DpsCalculator => self.result_table.next(self.dps.len()),
            },
            Action::PrevItem => match self.active_tab {
                Tab::Operators => self.operators.previous(&self.catalog, &self.filter),
                Tab::DpsCalculator => self.result_table.previous(self.dps.len()),
            },
            Action::FirstItem => match self.active_tab {
                Tab::Operators => self.operators.select_first(&self.catalog, &self.filter),
                Tab::DpsCalculator => self.result_table.select_first(),
            },
            Action::LastItem => match self.active_tab {
                Tab::Operators => self.operators.select_last(&self.catalog, &self.filter),
                Tab::DpsCalculator => self.result_table.select_last(self.dps.len()),
            },
            Action::NextTab => {
                self.active_tab = self.active_tab.next();
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.quit_dialog.roster_size = if self.has_unexported_changes() {
                    self.dps.len()
                } else {
                    0
                };
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
            }
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::ModalUp | Action::ModalDown => match self.modals.top() {
                Some(Modal::ClassMenu | Modal::BranchMenu) => {
                    self.filter_menu.update(action)?;
                }
                Some(Modal::AddOperator) => {
                    self.add_operator_dialog.update(action)?;
                }
                Some(Modal::EditParameters { .. }) => {
                    self.parameters_dialog.update(action)?;
                }
                _ => {}
            },

            // ─────────────────────────────────────────────────────────────────
            // Operator Filter
            // ─────────────────────────────────────────────────────────────────
            Action::OpenClassMenu => {
                self.filter_menu
                    .open_class_menu(&self.catalog, self.filter.selected_profession());
                self.modals.push(Modal::ClassMenu);
            }
            Action::OpenBranchMenu => match self.filter.selected_profession() {
                Some(profession) => {
                    self.filter_menu.open_branch_menu(
                        &self.catalog,
                        profession,
                        self.filter.selected_sub_profession_id(),
                    );
                    self.modals.push(Modal::BranchMenu);
                }
                None => {
                    self.status_message = Some("Select a class first".to_string());
                }
            },
            Action::SetProfession(profession) => {
                self.filter.set_profession(profession);
                self.close_menu();
            }
            Action::SetSubProfession(sub_profession_id) => {
                self.filter.set_sub_profession(sub_profession_id);
                self.close_menu();
            }
            Action::FilterBySelectedBranch => {
                if let Some(op) = self.operators.selected_operator(&self.catalog, &self.filter) {
                    let (profession, branch) = (op.profession, op.sub_profession_id.clone());
                    self.filter.filter_by_branch(profession, branch);
                }
            }
            Action::ToggleGuideOnly => {
                self.filter.toggle_guide_only();
            }
            Action::ResetFilters => {
                self.filter.reset();
            }
            Action::ToggleClassDescriptions => {
                self.operators.toggle_descriptions();
                self.config.show_class_descriptions = self.operators.show_descriptions;
                if let Err(e) = self.config.save() {
                    tracing::warn!(error = %e, "Failed to save config");
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // DPS Calculator
            // ─────────────────────────────────────────────────────────────────
            Action::OpenAddOperator => {
                if self.dps.can_add_operators() {
                    self.add_operator_dialog.open(&self.catalog, &self.dps);
                    self.modals.push(Modal::AddOperator);
                } else {
                    self.status_message =
                        Some("Every operator is already in the comparison".to_string());
                }
            }
            Action::AddOperator(id) => match self.dps.add_operator(&self.catalog, &id) {
                Ok(AddOutcome::Added) => {
                    if matches!(self.modals.top(), Some(Modal::AddOperator)) {
                        self.modals.pop();
                    }
                    self.result_table.select_last(self.dps.len());
                }
                Ok(AddOutcome::AlreadyPresent) => {
                    let name = self.catalog.get(&id).map_or(id.as_str(), |op| op.name.as_str());
                    self.status_message = Some(format!("{} is already in the comparison", name));
                }
                Err(e) => {
                    self.error = Some(e.to_string());
                }
            },
            Action::RemoveSelectedOperator => {
                if let Some(id) = self.result_table.selected_operator_id(&self.dps).cloned() {
                    self.dps.remove_operator(&id);
                    self.result_table.clamp(self.dps.len());
                }
            }
            Action::OpenEditParameters => {
                if let Some(entry) = self.dps.entries().get(self.result_table.selected_column) {
                    let id = entry.operator.char_id.clone();
                    self.parameters_dialog
                        .open(id.clone(), &entry.operator.name, &entry.parameters);
                    self.modals.push(Modal::EditParameters { operator_id: id });
                }
            }
            Action::UpdateParameters(id, parameters) => {
                match self.dps.update_parameters(&id, parameters) {
                    Ok(()) => {
                        if matches!(
                            self.modals.top(),
                            Some(Modal::EditParameters { operator_id }) if *operator_id == id
                        ) {
                            self.modals.pop();
                        }
                    }
                    Err(e) => {
                        self.error = Some(e.to_string());
                    }
                }
            }
            Action::ExportComparison => self.export(),
        }

        // Set by the filter listener; keep the cursor on the same operator
        if self.filter_changed.replace(false) {
            self.operators
                .reselect(&self.catalog, &self.filter, previous.as_ref());
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let show_descriptions = self.active_tab == Tab::Operators
            && descriptions_visible(&self.operators, &self.filter);
        let layout = calculate_main_layout(area, show_descriptions);

        render_tabs(frame, layout.tabs, self.active_tab);
        match self.active_tab {
            Tab::Operators => match &self.load_error {
                Some(message) => render_load_error(frame, layout.body, message),
                None => {
                    let ctx = OperatorsRenderContext {
                        catalog: &self.catalog,
                        filter: &self.filter,
                    };
                    draw_operators_screen(frame, &layout, &mut self.operators, &ctx);
                }
            },
            Tab::DpsCalculator => {
                render_dps_summary(frame, layout.toolbar, &self.dps);
                self.result_table.draw_with_state(frame, layout.body, &self.dps)?;
            }
        }
        self.render_status_bar(frame, layout.status);
        render_help_bar(frame, layout.help, self.active_tab);

        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, area, &modal)?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::ClassMenu | Modal::BranchMenu => self.filter_menu.handle_key_event(key),
            Modal::AddOperator => self.add_operator_dialog.handle_key_event(key),
            Modal::EditParameters { .. } => self.parameters_dialog.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area),
            Modal::ClassMenu | Modal::BranchMenu => self.filter_menu.draw(frame, area),
            Modal::AddOperator => self.add_operator_dialog.draw(frame, area),
            Modal::EditParameters { .. } => self.parameters_dialog.draw(frame, area),
            Modal::Help => self.help_dialog.draw(frame, area),
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![];

        let settings = self.filter.settings();
        let fragment = filter_fragment(
            settings.selected_profession,
            settings.selected_sub_profession_id.as_ref(),
            &self.catalog,
        );
        spans.push(Span::styled(
            format!(" {} ", fragment.as_deref().unwrap_or("#all")),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!(" {} in comparison ", self.dps.len()),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ));

        if let Some(error) = &self.error {
            spans.push(Span::styled(
                format!(" Error: {} ", error),
                Style::default().fg(Color::Red),
            ));
        } else if let Some(status) = &self.status_message {
            spans.push(Span::styled(format!(" {} ", status), Style::default().fg(Color::Yellow)));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

fn render_tabs(frame: &mut Frame, area: Rect, active_tab: Tab) {
    let all_tabs = Tab::all();
    let titles: Vec<&str> = all_tabs.iter().map(|t| t.name()).collect();
    let selected = all_tabs.iter().position(|t| *t == active_tab).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::BOTTOM))
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    frame.render_widget(tabs, area);
}

fn render_load_error(frame: &mut Frame, area: Rect, message: &str) {
    let paragraph = Paragraph::new(message.to_string())
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(Color::Red))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Data not loaded ")
                .border_style(Style::default().fg(Color::Red)),
        );
    frame.render_widget(paragraph, area);
}

fn render_dps_summary(frame: &mut Frame, area: Rect, dps: &DpsCalculator) {
    let best = dps
        .entries()
        .iter()
        .zip(dps.calcs())
        .max_by(|(_, a), (_, b)| a.average_dps.total_cmp(&b.average_dps));

    let mut spans = vec![Span::styled("Comparing ", Style::default().fg(Color::DarkGray))];
    spans.push(Span::styled(
        format!("{} operator(s)", dps.len()),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ));
    if let Some((entry, calc)) = best {
        spans.push(Span::styled("  highest average DPS: ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            format!(
                "{} ({})",
                entry.operator.name,
                crate::components::result_table::format_number(calc.average_dps)
            ),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(paragraph, area);
}

fn render_help_bar(frame: &mut Frame, area: Rect, active_tab: Tab) {
    let key = |k: &'static str, color: Color| {
        Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD))
    };
    let mut spans = vec![
        key(" q ", Color::Yellow),
        Span::raw("Quit "),
        key(" Tab ", Color::Cyan),
        Span::raw("Switch "),
    ];
    match active_tab {
        Tab::Operators => spans.extend([
            key(" c ", Color::Cyan),
            Span::raw("Class "),
            key(" b ", Color::Cyan),
            Span::raw("Branch "),
            key(" f ", Color::Green),
            Span::raw("Filter by branch "),
            key(" space ", Color::Green),
            Span::raw("Guide only "),
            key(" r ", Color::Magenta),
            Span::raw("Reset "),
        ]),
        Tab::DpsCalculator => spans.extend([
            key(" a ", Color::Green),
            Span::raw("Add "),
            key(" e ", Color::Cyan),
            Span::raw("Edit "),
            key(" - ", Color::Red),
            Span::raw("Remove "),
            key(" x ", Color::Magenta),
            Span::raw("Export "),
        ]),
    }
    spans.extend([key(" ? ", Color::White), Span::raw("Help")]);

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::fixtures::sample_catalog;
    use crate::model::{Profession, SubProfessionId};

    fn app() -> App {
        App::new(Config::default(), sample_catalog())
    }

    /// Feed a key through the same path the event loop uses
    fn press(app: &mut App, code: KeyCode) {
        let mut action = app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
        while let Some(a) = action {
            action = app.update(a).unwrap();
        }
    }

    #[test]
    fn test_fragment_selects_class_and_branch() {
        let mut app = app();
        assert!(app.apply_fragment("#guard-arts_fighter"));

        assert_eq!(app.filter.selected_profession(), Some(Profession::Warrior));
        assert_eq!(
            app.filter.selected_sub_profession_id(),
            Some(&SubProfessionId::new("artsfghter"))
        );
    }

    #[test]
    fn test_unknown_fragment_leaves_filter_untouched() {
        let mut app = app();
        assert!(!app.apply_fragment("#bard"));
        assert_eq!(app.filter.selected_profession(), None);
        assert!(app.error.is_some());
    }

    #[test]
    fn test_class_menu_selection_closes_menu() {
        let mut app = app();
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.modals.top(), Some(&Modal::ClassMenu));

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        assert!(app.modals.is_empty());
        assert_eq!(app.filter.selected_profession(), Some(Profession::Warrior));
    }

    #[test]
    fn test_branch_menu_needs_a_class() {
        let mut app = app();
        press(&mut app, KeyCode::Char('b'));
        assert!(app.modals.is_empty());
        assert_eq!(app.status_message.as_deref(), Some("Select a class first"));
    }

    #[test]
    fn test_filter_by_selected_branch_keeps_cursor() {
        let mut app = app();
        // Guide-only: Blaze then Ptilopsis
        press(&mut app, KeyCode::Char('f'));

        assert_eq!(app.filter.selected_profession(), Some(Profession::Warrior));
        assert_eq!(
            app.filter.selected_sub_profession_id(),
            Some(&SubProfessionId::new("centurion"))
        );
        let selected = app.operators.selected_operator(&app.catalog, &app.filter).unwrap();
        assert_eq!(selected.name, "Blaze");

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.filter.selected_profession(), None);
        assert!(app.filter.show_only_guide_available());
    }

    #[test]
    fn test_guide_toggle_keeps_selected_operator() {
        let mut app = app();
        // Guide-only: Blaze then Ptilopsis
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char(' '));

        assert!(!app.filter.show_only_guide_available());
        let selected = app.operators.selected_operator(&app.catalog, &app.filter).unwrap();
        assert_eq!(selected.name, "Ptilopsis");
    }

    #[test]
    fn test_help_opens_at_top_and_closes() {
        let mut app = app();
        app.help_dialog.scroll_offset = 5;
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.modals.top(), Some(&Modal::Help));
        assert_eq!(app.help_dialog.scroll_offset, 0);

        press(&mut app, KeyCode::Esc);
        assert!(app.modals.is_empty());
    }

    #[test]
    fn test_stale_parameter_update_leaves_other_editor_open() {
        let mut app = app();
        let blaze = OperatorId::new("char_017_huang");
        let surtr = OperatorId::new("char_350_surtr");
        app.update(Action::AddOperator(blaze.clone())).unwrap();
        app.update(Action::AddOperator(surtr.clone())).unwrap();
        app.modals.push(Modal::EditParameters { operator_id: surtr });

        app.update(Action::UpdateParameters(blaze, Default::default())).unwrap();

        assert!(matches!(app.modals.top(), Some(Modal::EditParameters { .. })));
    }

    #[test]
    fn test_add_edit_remove_flow() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.active_tab, Tab::DpsCalculator);

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.modals.top(), Some(&Modal::AddOperator));
        press(&mut app, KeyCode::Enter);
        assert!(app.modals.is_empty());
        assert_eq!(app.dps.len(), 1);
        assert!(app.has_unexported_changes());

        press(&mut app, KeyCode::Char('e'));
        assert!(matches!(app.modals.top(), Some(Modal::EditParameters { .. })));
        for _ in 0..3 {
            press(&mut app, KeyCode::Backspace);
        }
        for c in "100".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert!(app.modals.is_empty());
        assert_eq!(app.dps.entries()[0].parameters.atk, 100.0);
        assert_eq!(app.dps.calcs()[0].skill_atk, 200.0);

        press(&mut app, KeyCode::Char('-'));
        assert!(app.dps.is_empty());
    }

    #[test]
    fn test_duplicate_add_reports_status() {
        let mut app = app();
        let blaze = OperatorId::new("char_017_huang");
        app.update(Action::AddOperator(blaze.clone())).unwrap();
        app.update(Action::AddOperator(blaze)).unwrap();

        assert_eq!(app.dps.len(), 1);
        assert_eq!(app.status_message.as_deref(), Some("Blaze is already in the comparison"));
    }

    #[test]
    fn test_update_for_absent_operator_sets_error() {
        let mut app = app();
        app.update(Action::UpdateParameters(
            OperatorId::new("char_017_huang"),
            Default::default(),
        ))
        .unwrap();

        assert!(app.dps.is_empty());
        assert!(app.error.as_deref().unwrap().contains("char_017_huang"));
    }

    #[test]
    fn test_export_writes_csv_and_clears_dirty_flag() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut app = app();
        app.export_dir = dir.path().to_path_buf();
        app.update(Action::AddOperator(OperatorId::new("char_128_plosis"))).unwrap();

        app.update(Action::ExportComparison).unwrap();

        assert!(!app.has_unexported_changes());
        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_load_failure_is_explained() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config {
            data_dir: dir.path().to_string_lossy().to_string(),
            ..Config::default()
        };
        let app = App::load(config);

        assert!(app.catalog.is_empty());
        assert!(app.load_error.as_deref().unwrap().contains("operators.json not found"));
    }

    #[test]
    fn test_ctrl_c_quits_from_anywhere() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        let action = app
            .handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .unwrap();
        assert_eq!(action, Some(Action::ForceQuit));
    }
}
