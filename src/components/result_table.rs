//! Result table component - DPS comparison
//!
//! One column per compared operator, one row per derived metric. A trailing
//! "+" column is shown while more operators can be added.

use crate::action::Action;
use crate::component::Component;
use crate::model::dps::{round2, DerivedCalc, RosterEntry};
use crate::model::{DpsCalculator, OperatorId};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const ROW_HEADER: &str = "Operator";
const ADD_COLUMN: &str = "+";
/// Longest operator names are cut to this many columns
const MAX_COLUMN_WIDTH: usize = 18;

/// Metric rows, in display order
const METRICS: [(&str, fn(&DerivedCalc) -> String); 6] = [
    ("Skill Cycle", |c: &DerivedCalc| {
        format!(
            "{}s + {}s",
            format_number(c.skill_cycle.downtime),
            format_number(c.skill_cycle.uptime)
        )
    }),
    ("Skill ATK", |c: &DerivedCalc| format_number(c.skill_atk)),
    ("Skill Total DMG", |c: &DerivedCalc| format_number(c.skill_total_damage)),
    ("Skill DPS", |c: &DerivedCalc| format_number(c.skill_dps)),
    ("Basic Attack DPS", |c: &DerivedCalc| format_number(c.basic_attack_dps)),
    ("Average DPS", |c: &DerivedCalc| format_number(c.average_dps)),
];

/// Two decimals at most, no trailing zeros
pub fn format_number(value: f64) -> String {
    let formatted = format!("{:.2}", round2(value));
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    for c in text.chars() {
        if out.width() + c.to_string().width() + 1 > width {
            break;
        }
        out.push(c);
    }
    out.push('…');
    out
}

fn pad(text: &str, width: usize) -> String {
    format!("{}{}", text, " ".repeat(width.saturating_sub(text.width())))
}

/// Build the comparison grid as lines
///
/// `selected` highlights one operator column.
pub fn build_table_lines(
    entries: &[RosterEntry],
    calcs: &[DerivedCalc],
    can_add: bool,
    selected: Option<usize>,
) -> Vec<Line<'static>> {
    let header_cells: Vec<String> = entries
        .iter()
        .map(|e| truncate(&e.operator.name, MAX_COLUMN_WIDTH))
        .collect();
    let value_rows: Vec<Vec<String>> = METRICS
        .iter()
        .map(|(_, metric)| calcs.iter().map(metric).collect())
        .collect();

    let label_width = METRICS
        .iter()
        .map(|(label, _)| label.width())
        .chain(std::iter::once(ROW_HEADER.width()))
        .max()
        .unwrap_or(0);
    let col_widths: Vec<usize> = (0..entries.len())
        .map(|i| {
            value_rows
                .iter()
                .map(|row| row[i].width())
                .chain(std::iter::once(header_cells[i].width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let cell_style = |i: usize, base: Style| {
        if selected == Some(i) {
            base.bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            base
        }
    };
    let separator = || Span::styled(" │ ", Style::default().fg(Color::DarkGray));

    let mut lines = Vec::new();

    // Header row
    let mut spans = vec![Span::styled(
        pad(ROW_HEADER, label_width),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )];
    for (i, name) in header_cells.iter().enumerate() {
        spans.push(separator());
        spans.push(Span::styled(
            pad(name, col_widths[i]),
            cell_style(i, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        ));
    }
    if can_add {
        spans.push(separator());
        spans.push(Span::styled(
            ADD_COLUMN,
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ));
    }
    lines.push(Line::from(spans));

    let mut rule = "─".repeat(label_width);
    for width in &col_widths {
        rule.push_str("─┼─");
        rule.push_str(&"─".repeat(*width));
    }
    if can_add {
        rule.push_str("─┼─");
        rule.push_str(&"─".repeat(ADD_COLUMN.width()));
    }
    lines.push(Line::from(Span::styled(rule, Style::default().fg(Color::DarkGray))));

    // Metric rows
    for ((label, _), values) in METRICS.iter().zip(&value_rows) {
        let mut spans = vec![Span::styled(
            pad(label, label_width),
            Style::default().fg(Color::Yellow),
        )];
        for (i, value) in values.iter().enumerate() {
            spans.push(separator());
            spans.push(Span::styled(
                pad(value, col_widths[i]),
                cell_style(i, Style::default().fg(Color::White)),
            ));
        }
        lines.push(Line::from(spans));
    }

    lines
}

// ═══════════════════════════════════════════════════════════════════════════════
// Result Table Component
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct ResultTable {
    /// Highlighted operator column
    pub selected_column: usize,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_operator_id<'a>(&self, dps: &'a DpsCalculator) -> Option<&'a OperatorId> {
        dps.entries()
            .get(self.selected_column)
            .map(|e| &e.operator.char_id)
    }

    pub fn next(&mut self, roster_len: usize) {
        if roster_len > 0 {
            self.selected_column = (self.selected_column + 1) % roster_len;
        }
    }

    pub fn previous(&mut self, roster_len: usize) {
        if roster_len > 0 {
            self.selected_column = (self.selected_column + roster_len - 1) % roster_len;
        }
    }

    pub fn select_first(&mut self) {
        self.selected_column = 0;
    }

    pub fn select_last(&mut self, roster_len: usize) {
        self.selected_column = roster_len.saturating_sub(1);
    }

    /// Keep the cursor inside the roster after a removal
    pub fn clamp(&mut self, roster_len: usize) {
        self.selected_column = self.selected_column.min(roster_len.saturating_sub(1));
    }

    pub fn draw_with_state(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        dps: &DpsCalculator,
    ) -> Result<()> {
        self.clamp(dps.len());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(METRICS.len() as u16 + 4), Constraint::Min(0)])
            .split(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" DPS Comparison ({}) ", dps.len()))
            .border_style(Style::default().fg(Color::DarkGray));

        if dps.is_empty() {
            let hint = if dps.can_add_operators() {
                "  No operators compared yet. Press a to add one."
            } else {
                "  No operators available."
            };
            let paragraph = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(hint, Style::default().fg(Color::Yellow))),
            ])
            .block(block);
            frame.render_widget(paragraph, area);
            return Ok(());
        }

        let lines = build_table_lines(
            dps.entries(),
            dps.calcs(),
            dps.can_add_operators(),
            Some(self.selected_column),
        );
        frame.render_widget(Paragraph::new(lines).block(block), chunks[0]);

        if let Some(entry) = dps.entries().get(self.selected_column) {
            render_parameters(frame, chunks[1], entry);
        }
        Ok(())
    }
}

fn render_parameters(frame: &mut Frame, area: Rect, entry: &RosterEntry) {
    let p = &entry.parameters;
    let field = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{:20}", label), Style::default().fg(Color::DarkGray)),
            Span::styled(value, Style::default().fg(Color::White)),
        ])
    };
    let lines = vec![
        field("Damage type", entry.operator.damage_type.name().to_string()),
        field("ATK", format_number(p.atk)),
        field("Attack interval", format!("{}s", format_number(p.attack_interval))),
        field("Skill multiplier", format!("{}x", format_number(p.skill_multiplier))),
        field("Skill duration", format!("{}s", format_number(p.skill_duration))),
        field("Skill cooldown", format!("{}s", format_number(p.skill_cooldown))),
        field("Enemy DEF", format_number(p.enemy_defense)),
        field("Enemy RES", format_number(p.enemy_resistance)),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} Parameters ", entry.operator.name))
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(paragraph, area);
}

impl Component for ResultTable {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Char('j') | KeyCode::Down => {
                Some(Action::NextItem)
            }
            KeyCode::Char('h') | KeyCode::Left | KeyCode::Char('k') | KeyCode::Up => {
                Some(Action::PrevItem)
            }
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstItem),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastItem),
            KeyCode::Tab | KeyCode::BackTab => Some(Action::NextTab),

            KeyCode::Char('a') | KeyCode::Char('+') => Some(Action::OpenAddOperator),
            KeyCode::Char('e') | KeyCode::Enter => Some(Action::OpenEditParameters),
            KeyCode::Delete | KeyCode::Char('-') | KeyCode::Char('D') => {
                Some(Action::RemoveSelectedOperator)
            }
            KeyCode::Char('x') => Some(Action::ExportComparison),

            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing needs the roster; see draw_with_state
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::fixtures::sample_catalog;
    use crate::model::OperatorParameters;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn buffer_text(buffer: &Buffer) -> String {
        let mut text = String::new();
        for row in buffer.content.chunks(buffer.area.width as usize) {
            for cell in row {
                text.push_str(cell.symbol());
            }
            text.push('\n');
        }
        text
    }

    fn render(table: &mut ResultTable, dps: &DpsCalculator) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 24)).unwrap();
        terminal
            .draw(|frame| {
                table.draw_with_state(frame, frame.area(), dps).unwrap();
            })
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(200.0), "200");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(2.0 / 3.0), "0.67");
        assert_eq!(format_number(-0.001), "0");
    }

    #[test]
    fn test_table_shows_metric_rows_and_add_column() {
        let catalog = sample_catalog();
        let mut dps = DpsCalculator::new(catalog.len());
        let blaze = OperatorId::new("char_017_huang");
        dps.add_operator(&catalog, &blaze).unwrap();
        dps.update_parameters(
            &blaze,
            OperatorParameters {
                atk: 100.0,
                skill_multiplier: 2.0,
                skill_duration: 2.0,
                skill_cooldown: 10.0,
                ..OperatorParameters::default()
            },
        )
        .unwrap();

        let text = render(&mut ResultTable::new(), &dps);

        for label in [
            "Skill Cycle",
            "Skill ATK",
            "Skill Total DMG",
            "Skill DPS",
            "Basic Attack DPS",
            "Average DPS",
        ] {
            assert!(text.contains(label), "missing row {label}");
        }
        assert!(text.contains("Blaze"));
        assert!(text.contains("8s + 2s"));
        assert!(text.contains("│ 200"));
        assert!(text.contains("│ +"));
    }

    #[test]
    fn test_add_column_hidden_when_roster_is_full() {
        let catalog = sample_catalog();
        let mut dps = DpsCalculator::new(catalog.len());
        for op in catalog.operators() {
            dps.add_operator(&catalog, &op.char_id).unwrap();
        }
        assert!(!dps.can_add_operators());

        let lines = build_table_lines(dps.entries(), dps.calcs(), dps.can_add_operators(), None);
        let header: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(!header.trim_end().ends_with('+'));
        assert!(header.contains("Ptilopsis"));
    }

    #[test]
    fn test_columns_follow_insertion_order() {
        let catalog = sample_catalog();
        let mut dps = DpsCalculator::new(catalog.len());
        dps.add_operator(&catalog, &OperatorId::new("char_010_chen")).unwrap();
        dps.add_operator(&catalog, &OperatorId::new("char_017_huang")).unwrap();

        let lines = build_table_lines(dps.entries(), dps.calcs(), true, None);
        let header: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        let amiya = header.find("Amiya").unwrap();
        let blaze = header.find("Blaze").unwrap();
        assert!(amiya < blaze);
    }

    #[test]
    fn test_empty_roster_shows_hint() {
        let dps = DpsCalculator::new(3);
        let text = render(&mut ResultTable::new(), &dps);
        assert!(text.contains("Press a to add one"));
    }

    #[test]
    fn test_selection_wraps_and_clamps() {
        let mut table = ResultTable::new();
        table.previous(3);
        assert_eq!(table.selected_column, 2);
        table.next(3);
        assert_eq!(table.selected_column, 0);
        table.select_last(3);
        table.clamp(1);
        assert_eq!(table.selected_column, 0);
    }

    #[test]
    fn test_long_names_are_truncated() {
        let cut = truncate("Very Long Operator Name Indeed", 10);
        assert_eq!(cut.width(), 10);
        assert!(cut.ends_with('…'));
    }
}
