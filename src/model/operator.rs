//! Data models for operators, classes and branches

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operator class, serialized with the game's profession identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Profession {
    #[serde(rename = "PIONEER")]
    Pioneer,
    #[serde(rename = "WARRIOR")]
    Warrior,
    #[serde(rename = "TANK")]
    Tank,
    #[serde(rename = "SNIPER")]
    Sniper,
    #[serde(rename = "CASTER")]
    Caster,
    #[serde(rename = "MEDIC")]
    Medic,
    #[serde(rename = "SUPPORT")]
    Support,
    #[serde(rename = "SPECIAL")]
    Special,
}

impl Profession {
    pub fn all() -> Vec<Profession> {
        vec![
            Profession::Pioneer,
            Profession::Warrior,
            Profession::Tank,
            Profession::Sniper,
            Profession::Caster,
            Profession::Medic,
            Profession::Support,
            Profession::Special,
        ]
    }

    /// Player-facing class name
    pub fn class_name(&self) -> &'static str {
        match self {
            Profession::Pioneer => "Vanguard",
            Profession::Warrior => "Guard",
            Profession::Tank => "Defender",
            Profession::Sniper => "Sniper",
            Profession::Caster => "Caster",
            Profession::Medic => "Medic",
            Profession::Support => "Supporter",
            Profession::Special => "Specialist",
        }
    }

    /// Look up a profession by class name, ignoring case
    pub fn from_class_name(name: &str) -> Option<Profession> {
        Profession::all()
            .into_iter()
            .find(|p| p.class_name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Profession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class_name())
    }
}

/// Branch identifier, e.g. `artsfghter`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubProfessionId(pub String);

impl SubProfessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubProfessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique operator identifier (`char_002_amiya`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperatorId(pub String);

impl OperatorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OperatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageType {
    #[default]
    Physical,
    Arts,
    True,
}

impl DamageType {
    pub fn name(&self) -> &str {
        match self {
            DamageType::Physical => "Physical",
            DamageType::Arts => "Arts",
            DamageType::True => "True",
        }
    }
}

/// Base combat stats at max level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatStats {
    pub atk: f64,
    /// Seconds between basic attacks
    pub attack_interval: f64,
}

impl Default for CombatStats {
    fn default() -> Self {
        Self {
            atk: 0.0,
            attack_interval: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    /// ATK multiplier while the skill is active
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
    /// Active time in seconds; 0 for instant skills
    #[serde(default)]
    pub duration: f64,
    /// Full cycle length in seconds, activation included
    #[serde(default)]
    pub cooldown: f64,
}

fn default_multiplier() -> f64 {
    1.0
}

/// A playable operator, as exported by the data preparation stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operator {
    pub char_id: OperatorId,
    pub name: String,
    pub profession: Profession,
    pub sub_profession_id: SubProfessionId,
    /// Star count, 1-6
    pub rarity: u8,
    #[serde(default)]
    pub is_cn_only: bool,
    #[serde(default)]
    pub damage_type: DamageType,
    #[serde(default)]
    pub stats: CombatStats,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

impl Operator {
    pub fn stars(&self) -> String {
        "★".repeat(self.rarity.clamp(1, 6) as usize)
    }
}

/// Class description entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassInfo {
    pub class_name: String,
    pub profession: Profession,
    #[serde(default)]
    pub analysis: String,
}

/// Branch (sub-profession) metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub sub_profession_id: SubProfessionId,
    /// Display name, e.g. "Arts Fighter"
    pub name: String,
    pub class: Profession,
    #[serde(default)]
    pub r#trait: String,
    #[serde(default)]
    pub analysis: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profession_class_name_round_trip_is_case_insensitive() {
        for profession in Profession::all() {
            let upper = profession.class_name().to_uppercase();
            assert_eq!(Profession::from_class_name(&upper), Some(profession));
        }
        assert_eq!(Profession::from_class_name("Warlock"), None);
    }

    #[test]
    fn test_operator_deserializes_game_identifiers() {
        let json = r#"{
            "charId": "char_017_huang",
            "name": "Blaze",
            "profession": "WARRIOR",
            "subProfessionId": "centurion",
            "rarity": 6,
            "stats": { "atk": 745, "attackInterval": 1.2 },
            "skills": [{ "name": "Chainsaw Extension", "multiplier": 1.9, "duration": 0, "cooldown": 0 }]
        }"#;

        let op: Operator = serde_json::from_str(json).unwrap();
        assert_eq!(op.profession, Profession::Warrior);
        assert_eq!(op.sub_profession_id.as_str(), "centurion");
        assert_eq!(op.damage_type, DamageType::Physical);
        assert!(!op.is_cn_only);
        assert_eq!(op.stars(), "★★★★★★");
    }
}
