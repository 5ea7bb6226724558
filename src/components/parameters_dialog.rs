//! Parameter editor dialog
//!
//! Edits the combat parameters of one compared operator. Each field keeps
//! its own text buffer; values are parsed when the form is submitted.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::{OperatorId, OperatorParameters};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Atk,
    AttackInterval,
    SkillMultiplier,
    SkillDuration,
    SkillCooldown,
    EnemyDefense,
    EnemyResistance,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Atk,
        Field::AttackInterval,
        Field::SkillMultiplier,
        Field::SkillDuration,
        Field::SkillCooldown,
        Field::EnemyDefense,
        Field::EnemyResistance,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Atk => "ATK",
            Field::AttackInterval => "Attack interval (s)",
            Field::SkillMultiplier => "Skill multiplier",
            Field::SkillDuration => "Skill duration (s)",
            Field::SkillCooldown => "Skill cooldown (s)",
            Field::EnemyDefense => "Enemy DEF",
            Field::EnemyResistance => "Enemy RES (%)",
        }
    }

    fn get(&self, p: &OperatorParameters) -> f64 {
        match self {
            Field::Atk => p.atk,
            Field::AttackInterval => p.attack_interval,
            Field::SkillMultiplier => p.skill_multiplier,
            Field::SkillDuration => p.skill_duration,
            Field::SkillCooldown => p.skill_cooldown,
            Field::EnemyDefense => p.enemy_defense,
            Field::EnemyResistance => p.enemy_resistance,
        }
    }

    fn set(&self, p: &mut OperatorParameters, value: f64) {
        match self {
            Field::Atk => p.atk = value,
            Field::AttackInterval => p.attack_interval = value,
            Field::SkillMultiplier => p.skill_multiplier = value,
            Field::SkillDuration => p.skill_duration = value,
            Field::SkillCooldown => p.skill_cooldown = value,
            Field::EnemyDefense => p.enemy_defense = value,
            Field::EnemyResistance => p.enemy_resistance = value,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ParameterInputError {
    #[error("{field}: '{input}' is not a number")]
    NotANumber { field: &'static str, input: String },

    #[error("{field} must not be negative")]
    Negative { field: &'static str },

    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },

    #[error("{field} must be at most 100")]
    AbovePercent { field: &'static str },
}

/// Parse and range-check one field
fn parse_field(field: Field, input: &str) -> Result<f64, ParameterInputError> {
    let value: f64 = input
        .trim()
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or_else(|| ParameterInputError::NotANumber {
            field: field.label(),
            input: input.to_string(),
        })?;
    if value < 0.0 {
        return Err(ParameterInputError::Negative { field: field.label() });
    }
    match field {
        Field::AttackInterval if value == 0.0 => {
            Err(ParameterInputError::NotPositive { field: field.label() })
        }
        Field::EnemyResistance if value > 100.0 => {
            Err(ParameterInputError::AbovePercent { field: field.label() })
        }
        _ => Ok(value),
    }
}

#[derive(Default)]
pub struct ParametersDialog {
    operator_id: Option<OperatorId>,
    operator_name: String,
    base: OperatorParameters,
    inputs: Vec<String>,
    pub selected_field: usize,
    pub error: Option<String>,
}

impl ParametersDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(
        &mut self,
        operator_id: OperatorId,
        operator_name: &str,
        parameters: &OperatorParameters,
    ) {
        self.operator_id = Some(operator_id);
        self.operator_name = operator_name.to_string();
        self.base = parameters.clone();
        // Shortest round-tripping form, so untouched fields submit unchanged
        self.inputs = Field::ALL
            .iter()
            .map(|f| f.get(parameters).to_string())
            .collect();
        self.selected_field = 0;
        self.error = None;
    }

    /// Parse every buffer into a parameter set
    pub fn parameters(&self) -> Result<OperatorParameters, ParameterInputError> {
        let mut params = self.base.clone();
        for (field, input) in Field::ALL.iter().zip(&self.inputs) {
            field.set(&mut params, parse_field(*field, input)?);
        }
        Ok(params)
    }

    fn submit(&mut self) -> Option<Action> {
        let id = self.operator_id.clone()?;
        match self.parameters() {
            Ok(params) => Some(Action::UpdateParameters(id, params)),
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    fn current_input(&mut self) -> Option<&mut String> {
        self.inputs.get_mut(self.selected_field)
    }
}

impl Component for ParametersDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => self.submit(),
            KeyCode::Up | KeyCode::BackTab => Some(Action::ModalUp),
            KeyCode::Down | KeyCode::Tab => Some(Action::ModalDown),
            KeyCode::Backspace => {
                if let Some(input) = self.current_input() {
                    input.pop();
                }
                None
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
                if let Some(input) = self.current_input() {
                    input.push(c);
                }
                self.error = None;
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::ModalUp => {
                self.selected_field = self.selected_field.saturating_sub(1);
            }
            Action::ModalDown => {
                if self.selected_field + 1 < Field::ALL.len() {
                    self.selected_field += 1;
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 52, Field::ALL.len() as u16 + 8);
        frame.render_widget(Clear, popup_area);

        let mut lines = vec![Line::from("")];
        for (i, (field, input)) in Field::ALL.iter().zip(&self.inputs).enumerate() {
            let selected = i == self.selected_field;
            let (marker, value_style) = if selected {
                ("▶ ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            } else {
                ("  ", Style::default().fg(Color::White))
            };
            let cursor = if selected { "_" } else { "" };
            lines.push(Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Cyan)),
                Span::styled(format!("{:22}", field.label()), Style::default().fg(Color::DarkGray)),
                Span::styled(format!("{}{}", input, cursor), value_style),
            ]));
        }
        lines.push(Line::from(""));
        match &self.error {
            Some(error) => lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            ))),
            None => lines.push(Line::from(vec![
                Span::styled(
                    " Enter ",
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
                Span::raw("Apply  "),
                Span::styled(
                    " ↑/↓ ",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::raw("Field  "),
                Span::styled(
                    " Esc ",
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                Span::raw("Cancel"),
            ])),
        }

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Green))
                    .title(format!(" {} Parameters ", self.operator_name))
                    .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            )
            .alignment(Alignment::Left);

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}
