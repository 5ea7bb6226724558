//! Operators component - filterable operator list
//!
//! Displays the filter bar, the visible operators grouped by class (or by
//! branch once a class is selected) and the class/branch description cards.
//! Owns list navigation; the filter selections live in `FilterState`.

use crate::action::Action;
use crate::component::Component;
use crate::components::checkbox::Checkbox;
use crate::components::layout::MainLayout;
use crate::model::{Catalog, FilterState, Operator, OperatorId, Profession};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Placeholder in branch analysis text for the plural branch name
static BRANCH_NAME_PLURAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<BranchNamePlural\s*/>").unwrap());

// ═══════════════════════════════════════════════════════════════════════════════
// Display List Item
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub enum DisplayListItem<'a> {
    /// Class or branch header (not selectable)
    Header(String),
    Operator(&'a Operator),
}

/// Group the visible operators for display
///
/// Without a class filter groups are classes in profession order; with one,
/// groups are branches sorted by name. Operator order inside a group is the
/// catalog order.
pub fn build_display_list<'a>(
    catalog: &'a Catalog,
    filter: &FilterState,
) -> Vec<DisplayListItem<'a>> {
    let visible = filter.visible_operators(catalog);
    let groups: Vec<(String, Vec<&Operator>)> = if filter.selected_profession().is_some() {
        let mut by_branch: BTreeMap<String, Vec<&Operator>> = BTreeMap::new();
        for op in visible {
            by_branch
                .entry(catalog.branch_name(&op.sub_profession_id))
                .or_default()
                .push(op);
        }
        by_branch.into_iter().collect()
    } else {
        let mut by_class: BTreeMap<Profession, Vec<&Operator>> = BTreeMap::new();
        for op in visible {
            by_class.entry(op.profession).or_default().push(op);
        }
        by_class
            .into_iter()
            .map(|(p, ops)| (p.class_name().to_string(), ops))
            .collect()
    };

    let mut items = Vec::new();
    for (name, ops) in groups {
        items.push(DisplayListItem::Header(name));
        items.extend(ops.into_iter().map(DisplayListItem::Operator));
    }
    items
}

fn selectable_indices(items: &[DisplayListItem]) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| matches!(item, DisplayListItem::Operator(_)))
        .map(|(i, _)| i)
        .collect()
}

/// Substitute `<BranchNamePlural />` with e.g. "Centurion Guards"
pub fn render_branch_analysis(analysis: &str, branch_name: &str, class_name: &str) -> String {
    let plural = format!("{} {}s", branch_name, class_name);
    BRANCH_NAME_PLURAL
        .replace_all(analysis, regex::NoExpand(&plural))
        .into_owned()
}

// ═══════════════════════════════════════════════════════════════════════════════
// Operators Component
// ═══════════════════════════════════════════════════════════════════════════════

pub struct OperatorsComponent {
    pub list_state: ListState,
    /// Whether the class/branch description cards are expanded
    pub show_descriptions: bool,
}

impl Default for OperatorsComponent {
    fn default() -> Self {
        Self::new(true)
    }
}

impl OperatorsComponent {
    pub fn new(show_descriptions: bool) -> Self {
        Self {
            list_state: ListState::default(),
            show_descriptions,
        }
    }

    pub fn selected_operator<'a>(
        &self,
        catalog: &'a Catalog,
        filter: &FilterState,
    ) -> Option<&'a Operator> {
        let items = build_display_list(catalog, filter);
        match items.get(self.list_state.selected()?)? {
            DisplayListItem::Operator(op) => Some(*op),
            DisplayListItem::Header(_) => None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    /// Select next operator (skipping headers), wrapping to the first
    pub fn next(&mut self, catalog: &Catalog, filter: &FilterState) {
        let selectable = selectable_indices(&build_display_list(catalog, filter));
        let Some(&first) = selectable.first() else {
            return;
        };
        let current = self.list_state.selected().unwrap_or(0);
        let next_idx = selectable.iter().find(|&&i| i > current).copied().unwrap_or(first);
        self.list_state.select(Some(next_idx));
    }

    /// Select previous operator, wrapping to the last
    pub fn previous(&mut self, catalog: &Catalog, filter: &FilterState) {
        let selectable = selectable_indices(&build_display_list(catalog, filter));
        let Some(&last) = selectable.last() else {
            return;
        };
        let current = self.list_state.selected().unwrap_or(0);
        let prev_idx = selectable.iter().rev().find(|&&i| i < current).copied().unwrap_or(last);
        self.list_state.select(Some(prev_idx));
    }

    pub fn select_first(&mut self, catalog: &Catalog, filter: &FilterState) {
        let selectable = selectable_indices(&build_display_list(catalog, filter));
        self.list_state.select(selectable.first().copied());
    }

    pub fn select_last(&mut self, catalog: &Catalog, filter: &FilterState) {
        let selectable = selectable_indices(&build_display_list(catalog, filter));
        if let Some(&last) = selectable.last() {
            self.list_state.select(Some(last));
        }
    }

    /// Keep the cursor on `id` after the list changed, else go to the top
    pub fn reselect(&mut self, catalog: &Catalog, filter: &FilterState, id: Option<&OperatorId>) {
        let items = build_display_list(catalog, filter);
        let position = id.and_then(|id| {
            items
                .iter()
                .position(|item| matches!(item, DisplayListItem::Operator(op) if op.char_id == *id))
        });
        match position {
            Some(i) => self.list_state.select(Some(i)),
            None => self.list_state.select(selectable_indices(&items).first().copied()),
        }
    }

    pub fn toggle_descriptions(&mut self) {
        self.show_descriptions = !self.show_descriptions;
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for OperatorsComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstItem),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastItem),
            KeyCode::Tab | KeyCode::BackTab => Some(Action::NextTab),

            // Filters
            KeyCode::Char('c') => Some(Action::OpenClassMenu),
            KeyCode::Char('b') => Some(Action::OpenBranchMenu),
            KeyCode::Char('f') | KeyCode::Enter => Some(Action::FilterBySelectedBranch),
            KeyCode::Char(' ') => Some(Action::ToggleGuideOnly),
            KeyCode::Char('r') => Some(Action::ResetFilters),
            KeyCode::Char('d') => Some(Action::ToggleClassDescriptions),

            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing needs the catalog; see draw_operators_screen
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering Functions
// ═══════════════════════════════════════════════════════════════════════════════

pub struct OperatorsRenderContext<'a> {
    pub catalog: &'a Catalog,
    pub filter: &'a FilterState,
}

/// Whether the description panel takes screen space
pub fn descriptions_visible(operators: &OperatorsComponent, filter: &FilterState) -> bool {
    operators.show_descriptions && filter.selected_profession().is_some()
}

pub fn draw_operators_screen(
    frame: &mut Frame,
    layout: &MainLayout,
    operators: &mut OperatorsComponent,
    ctx: &OperatorsRenderContext,
) {
    render_filter_bar(frame, layout.toolbar, operators, ctx);
    render_operator_list(frame, layout.body, operators, ctx);
    if let Some(area) = layout.descriptions {
        render_description_cards(frame, area, ctx);
    }
}

fn button<'a>(key: &'a str, label: String, enabled: bool) -> Vec<Span<'a>> {
    let label_style = if enabled {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    vec![
        Span::styled(
            format!("{} ", key),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("[ {} ▾ ]", label), label_style),
        Span::raw("  "),
    ]
}

fn render_filter_bar(
    frame: &mut Frame,
    area: Rect,
    operators: &OperatorsComponent,
    ctx: &OperatorsRenderContext,
) {
    let filter = ctx.filter;
    let class_label = filter
        .selected_profession()
        .map_or_else(|| "All Classes".to_string(), |p| p.class_name().to_string());
    let branch_label = filter
        .selected_sub_profession_id()
        .map_or_else(|| "All Branches".to_string(), |id| ctx.catalog.branch_name(id));

    let mut spans = vec![Span::styled("Filters  ", Style::default().fg(Color::DarkGray))];
    spans.extend(button("c", class_label, true));
    spans.extend(button("b", branch_label, filter.selected_profession().is_some()));
    if filter.settings().has_class_filter() {
        spans.push(Span::styled(
            "r ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled("Reset  ", Style::default().fg(Color::Yellow)));
    }
    spans.extend(
        Checkbox::new("Guide available", filter.show_only_guide_available())
            .hotkey("space")
            .line()
            .spans,
    );
    if filter.selected_profession().is_some() {
        let arrow = if operators.show_descriptions { "▾" } else { "▸" };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            "d ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!("Class Description {}", arrow),
            Style::default().fg(Color::White),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(paragraph, area);
}

fn render_operator_list(
    frame: &mut Frame,
    area: Rect,
    operators: &mut OperatorsComponent,
    ctx: &OperatorsRenderContext,
) {
    let display_items = build_display_list(ctx.catalog, ctx.filter);
    let count = display_items
        .iter()
        .filter(|item| matches!(item, DisplayListItem::Operator(_)))
        .count();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Operators ({}) ", count))
        .border_style(Style::default().fg(Color::DarkGray));

    if count == 0 {
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  No operators match the current filters",
                Style::default().fg(Color::Yellow),
            )),
        ];
        if ctx.filter.show_only_guide_available() {
            lines.push(Line::from(Span::styled(
                "  Press space to include operators without a guide",
                Style::default().fg(Color::DarkGray),
            )));
        }
        frame.render_widget(Paragraph::new(lines).block(block), area);
        return;
    }

    let items: Vec<ListItem> = display_items
        .iter()
        .map(|item| match item {
            DisplayListItem::Header(name) => ListItem::new(Line::from(vec![
                Span::styled(
                    format!("── {} ", name),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::styled("──────────────────────", Style::default().fg(Color::DarkGray)),
            ])),
            DisplayListItem::Operator(op) => {
                let mut spans = vec![
                    Span::styled(format!("{:6} ", op.stars()), Style::default().fg(Color::Yellow)),
                    Span::styled(format!("{:20}", op.name), Style::default().fg(Color::White)),
                    Span::styled(
                        ctx.catalog.branch_name(&op.sub_profession_id),
                        Style::default().fg(Color::DarkGray),
                    ),
                ];
                if let Some(slug) = ctx.catalog.guide_slug(op) {
                    spans.push(Span::styled(
                        format!(" [guide: {}]", slug),
                        Style::default().fg(Color::Green),
                    ));
                }
                if op.is_cn_only {
                    spans.push(Span::styled(" [CN]", Style::default().fg(Color::Magenta)));
                }
                ListItem::new(Line::from(spans))
            }
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, area, &mut operators.list_state);
}

fn render_description_cards(frame: &mut Frame, area: Rect, ctx: &OperatorsRenderContext) {
    let Some(profession) = ctx.filter.selected_profession() else {
        return;
    };
    let branch = ctx
        .filter
        .selected_sub_profession_id()
        .and_then(|id| ctx.catalog.branch(id));

    let chunks = if branch.is_some() {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(100)])
            .split(area)
    };

    let class_text = ctx
        .catalog
        .classes
        .get(&profession)
        .map(|c| c.analysis.as_str())
        .filter(|a| !a.is_empty())
        .unwrap_or("No class description available.");
    let class_card = Paragraph::new(class_text.to_string())
        .wrap(Wrap { trim: true })
        .block(card_block(profession.class_name(), "Class"));
    frame.render_widget(class_card, chunks[0]);

    if let Some(branch) = branch {
        let mut lines = vec![
            Line::from(vec![
                Span::styled("Trait: ", Style::default().fg(Color::Yellow)),
                Span::raw(branch.r#trait.clone()),
            ]),
            Line::from(""),
        ];
        if let Some(analysis) = &branch.analysis {
            let text = render_branch_analysis(analysis, &branch.name, profession.class_name());
            lines.extend(text.lines().map(|l| Line::from(l.to_string())));
        }
        let branch_card = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(card_block(&branch.name, "Branch"));
        frame.render_widget(branch_card, chunks[1]);
    }
}

fn card_block<'a>(name: &'a str, kind: &'a str) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Line::from(vec![
            Span::styled(
                format!(" {} ", name),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("{} ", kind), Style::default().fg(Color::DarkGray)),
        ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::fixtures::sample_catalog;
    use crate::model::SubProfessionId;

    fn names(items: &[DisplayListItem]) -> Vec<String> {
        items
            .iter()
            .map(|item| match item {
                DisplayListItem::Header(h) => format!("# {}", h),
                DisplayListItem::Operator(op) => op.name.clone(),
            })
            .collect()
    }

    #[test]
    fn test_display_list_groups_by_class_in_profession_order() {
        let catalog = sample_catalog();
        let filter = FilterState::new(false);

        assert_eq!(
            names(&build_display_list(&catalog, &filter)),
            vec![
                "# Guard",
                "Blaze",
                "Surtr",
                "Specter",
                "# Caster",
                "Amiya",
                "# Medic",
                "Ptilopsis",
            ]
        );
    }

    #[test]
    fn test_display_list_groups_by_branch_within_class() {
        let catalog = sample_catalog();
        let mut filter = FilterState::new(false);
        filter.set_profession(Some(Profession::Warrior));

        assert_eq!(
            names(&build_display_list(&catalog, &filter)),
            vec!["# Arts Fighter", "Surtr", "# Centurion", "Blaze", "Specter"]
        );
    }

    #[test]
    fn test_navigation_skips_headers_and_wraps() {
        let catalog = sample_catalog();
        let filter = FilterState::new(true);
        let mut operators = OperatorsComponent::new(true);

        operators.select_first(&catalog, &filter);
        assert_eq!(operators.selected_operator(&catalog, &filter).unwrap().name, "Blaze");
        operators.next(&catalog, &filter);
        assert_eq!(operators.selected_operator(&catalog, &filter).unwrap().name, "Ptilopsis");
        operators.next(&catalog, &filter);
        assert_eq!(operators.selected_operator(&catalog, &filter).unwrap().name, "Blaze");
        operators.previous(&catalog, &filter);
        assert_eq!(operators.selected_operator(&catalog, &filter).unwrap().name, "Ptilopsis");
    }

    #[test]
    fn test_reselect_follows_operator_into_branch_view() {
        let catalog = sample_catalog();
        let mut filter = FilterState::new(false);
        let mut operators = OperatorsComponent::new(true);
        operators.select_last(&catalog, &filter);
        operators.previous(&catalog, &filter);
        operators.previous(&catalog, &filter);
        let specter = operators.selected_operator(&catalog, &filter).unwrap().char_id.clone();

        filter.filter_by_branch(Profession::Warrior, SubProfessionId::new("centurion"));
        operators.reselect(&catalog, &filter, Some(&specter));

        assert_eq!(operators.selected_operator(&catalog, &filter).unwrap().name, "Specter");
    }

    #[test]
    fn test_empty_list_has_no_selection() {
        let catalog = sample_catalog();
        let mut filter = FilterState::new(true);
        filter.set_profession(Some(Profession::Caster));
        let mut operators = OperatorsComponent::new(true);

        operators.select_first(&catalog, &filter);
        assert!(operators.list_state.selected().is_none());
        assert!(operators.selected_operator(&catalog, &filter).is_none());
    }

    #[test]
    fn test_branch_analysis_substitutes_plural_name() {
        let text = render_branch_analysis(
            "<BranchNamePlural /> hit several enemies. <BranchNamePlural/> excel at lanes.",
            "Centurion",
            "Guard",
        );
        assert_eq!(text, "Centurion Guards hit several enemies. Centurion Guards excel at lanes.");
    }
}
