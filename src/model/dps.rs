//! DPS calculator state
//!
//! A roster of operators under comparison, each with user-editable
//! combat parameters, plus the metrics derived from them. The metric
//! formula sits behind the `DpsModel` trait so it can be swapped out.

use super::catalog::Catalog;
use super::operator::{DamageType, Operator, OperatorId};
use super::store::{Listeners, Subscription};
use thiserror::Error;

/// Minimum fraction of damage that always gets through defense/resistance
const MIN_DAMAGE_RATIO: f64 = 0.05;

#[derive(Debug, Error, PartialEq)]
pub enum DpsError {
    #[error("Unknown operator: {0}")]
    UnknownOperator(OperatorId),

    #[error("Operator not in comparison: {0}")]
    NotInRoster(OperatorId),
}

/// Parameters the user can tweak per operator
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorParameters {
    pub atk: f64,
    pub attack_interval: f64,
    pub skill_multiplier: f64,
    /// Seconds the skill stays active
    pub skill_duration: f64,
    /// Seconds from one activation to the next
    pub skill_cooldown: f64,
    pub enemy_defense: f64,
    pub enemy_resistance: f64,
}

impl Default for OperatorParameters {
    fn default() -> Self {
        Self {
            atk: 0.0,
            attack_interval: 1.0,
            skill_multiplier: 1.0,
            skill_duration: 0.0,
            skill_cooldown: 0.0,
            enemy_defense: 0.0,
            enemy_resistance: 0.0,
        }
    }
}

impl OperatorParameters {
    /// Defaults from the operator's base stats and its last skill
    pub fn for_operator(operator: &Operator) -> Self {
        let mut params = Self {
            atk: operator.stats.atk,
            attack_interval: operator.stats.attack_interval,
            ..Self::default()
        };
        if let Some(skill) = operator.skills.last() {
            params.skill_multiplier = skill.multiplier;
            params.skill_duration = skill.duration;
            params.skill_cooldown = skill.cooldown;
        }
        params
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SkillCycle {
    pub uptime: f64,
    pub downtime: f64,
}

/// Metrics derived from one roster entry
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DerivedCalc {
    pub skill_cycle: SkillCycle,
    pub skill_atk: f64,
    pub skill_total_damage: f64,
    pub skill_dps: f64,
    pub basic_attack_dps: f64,
    pub average_dps: f64,
}

/// The damage formula
pub trait DpsModel {
    fn compute_dps(&self, operator: &Operator, params: &OperatorParameters) -> DerivedCalc;
}

/// Default formula: flat defense subtraction for physical damage,
/// percentage resistance for arts, both floored at 5% of the attack.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardDpsModel;

impl StandardDpsModel {
    fn hit_damage(damage_type: DamageType, atk: f64, params: &OperatorParameters) -> f64 {
        let floor = atk * MIN_DAMAGE_RATIO;
        match damage_type {
            DamageType::Physical => (atk - params.enemy_defense).max(floor),
            DamageType::Arts => (atk * (1.0 - params.enemy_resistance / 100.0)).max(floor),
            DamageType::True => atk,
        }
    }
}

impl DpsModel for StandardDpsModel {
    fn compute_dps(&self, operator: &Operator, params: &OperatorParameters) -> DerivedCalc {
        let interval = if params.attack_interval > 0.0 {
            params.attack_interval
        } else {
            1.0
        };
        let uptime = params.skill_duration.max(0.0);
        let downtime = (params.skill_cooldown - uptime).max(0.0);

        let skill_atk = params.atk * params.skill_multiplier;
        let skill_hits = if uptime > 0.0 { uptime / interval } else { 1.0 };
        let skill_total_damage =
            Self::hit_damage(operator.damage_type, skill_atk, params) * skill_hits;
        let skill_dps = if uptime > 0.0 {
            skill_total_damage / uptime
        } else {
            0.0
        };
        let basic_attack_dps =
            Self::hit_damage(operator.damage_type, params.atk, params) / interval;

        let cycle = uptime + downtime;
        let average_dps = if cycle > 0.0 {
            (skill_total_damage + basic_attack_dps * downtime) / cycle
        } else {
            basic_attack_dps
        };

        DerivedCalc {
            skill_cycle: SkillCycle { uptime, downtime },
            skill_atk,
            skill_total_damage,
            skill_dps,
            basic_attack_dps,
            average_dps,
        }
    }
}

/// One operator in the comparison
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub operator: Operator,
    pub parameters: OperatorParameters,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

/// Snapshot handed to listeners
#[derive(Debug, Clone, PartialEq)]
pub struct DpsState {
    pub entries: Vec<RosterEntry>,
    pub calcs: Vec<DerivedCalc>,
    pub can_add_operators: bool,
}

pub struct DpsCalculator {
    entries: Vec<RosterEntry>,
    /// Parallel to `entries`
    calcs: Vec<DerivedCalc>,
    total_operators: usize,
    model: Box<dyn DpsModel>,
    listeners: Listeners<DpsState>,
}

impl DpsCalculator {
    pub fn new(total_operators: usize) -> Self {
        Self::with_model(total_operators, Box::new(StandardDpsModel))
    }

    pub fn with_model(total_operators: usize, model: Box<dyn DpsModel>) -> Self {
        Self {
            entries: Vec::new(),
            calcs: Vec::new(),
            total_operators,
            model,
            listeners: Listeners::new(),
        }
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    /// Derived metrics, in roster insertion order
    pub fn calcs(&self) -> &[DerivedCalc] {
        &self.calcs
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &OperatorId) -> bool {
        self.position(id).is_some()
    }

    pub fn can_add_operators(&self) -> bool {
        self.entries.len() < self.total_operators
    }

    pub fn get_state(&self) -> DpsState {
        DpsState {
            entries: self.entries.clone(),
            calcs: self.calcs.clone(),
            can_add_operators: self.can_add_operators(),
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&DpsState) + 'static) -> Subscription {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.listeners.unsubscribe(subscription)
    }

    fn position(&self, id: &OperatorId) -> Option<usize> {
        self.entries.iter().position(|e| e.operator.char_id == *id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Append an operator with default parameters; duplicates are a no-op
    pub fn add_operator(
        &mut self,
        catalog: &Catalog,
        id: &OperatorId,
    ) -> Result<AddOutcome, DpsError> {
        if self.contains(id) {
            return Ok(AddOutcome::AlreadyPresent);
        }
        let operator = catalog
            .get(id)
            .ok_or_else(|| DpsError::UnknownOperator(id.clone()))?
            .clone();

        let parameters = OperatorParameters::for_operator(&operator);
        let calc = self.model.compute_dps(&operator, &parameters);
        tracing::info!(operator = %operator.name, "Added operator to comparison");
        self.entries.push(RosterEntry {
            operator,
            parameters,
        });
        self.calcs.push(calc);
        self.publish();
        Ok(AddOutcome::Added)
    }

    /// Returns whether an entry was removed
    pub fn remove_operator(&mut self, id: &OperatorId) -> bool {
        match self.position(id) {
            Some(i) => {
                let entry = self.entries.remove(i);
                self.calcs.remove(i);
                tracing::info!(operator = %entry.operator.name, "Removed operator from comparison");
                self.publish();
                true
            }
            None => false,
        }
    }

    pub fn update_parameters(
        &mut self,
        id: &OperatorId,
        parameters: OperatorParameters,
    ) -> Result<(), DpsError> {
        let i = self
            .position(id)
            .ok_or_else(|| DpsError::NotInRoster(id.clone()))?;

        self.calcs[i] = self.model.compute_dps(&self.entries[i].operator, &parameters);
        self.entries[i].parameters = parameters;
        tracing::debug!(operator = %id, "Updated operator parameters");
        self.publish();
        Ok(())
    }

    fn publish(&mut self) {
        if !self.listeners.is_empty() {
            let state = self.get_state();
            self.listeners.notify(&state);
        }
    }
}

/// Round for display
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
