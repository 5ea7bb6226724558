//! Catalog - the immutable operator, branch, class and guide tables

use super::operator::{Branch, ClassInfo, Operator, OperatorId, Profession, SubProfessionId};
use std::collections::{BTreeMap, HashMap};

/// Read-only data loaded once at start-up
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Operators in display order (class, then rarity descending, then name)
    operators: Vec<Operator>,
    /// Operator id -> index into `operators`
    index: HashMap<OperatorId, usize>,
    pub branches: BTreeMap<SubProfessionId, Branch>,
    pub classes: BTreeMap<Profession, ClassInfo>,
    /// Operator name -> guide slug
    pub guides: HashMap<String, String>,
}

impl Catalog {
    pub fn new(
        operators: Vec<Operator>,
        branches: BTreeMap<SubProfessionId, Branch>,
        classes: BTreeMap<Profession, ClassInfo>,
        guides: HashMap<String, String>,
    ) -> Self {
        let mut operators = operators;
        operators.sort_by(|a, b| {
            a.profession
                .cmp(&b.profession)
                .then_with(|| b.rarity.cmp(&a.rarity))
                .then_with(|| a.name.cmp(&b.name))
        });
        // Later duplicates of an id are dropped
        let mut index = HashMap::new();
        let mut unique = Vec::with_capacity(operators.len());
        for op in operators {
            if index.contains_key(&op.char_id) {
                tracing::warn!(id = %op.char_id, "Duplicate operator id in data, skipping");
                continue;
            }
            index.insert(op.char_id.clone(), unique.len());
            unique.push(op);
        }

        Self {
            operators: unique,
            index,
            branches,
            classes,
            guides,
        }
    }

    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    /// Total number of distinct operators
    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    pub fn get(&self, id: &OperatorId) -> Option<&Operator> {
        self.index.get(id).map(|&i| &self.operators[i])
    }

    #[cfg(test)]
    pub fn find_by_name(&self, name: &str) -> Option<&Operator> {
        self.operators.iter().find(|op| op.name == name)
    }

    pub fn has_guide(&self, operator: &Operator) -> bool {
        self.guides.contains_key(&operator.name)
    }

    pub fn guide_slug(&self, operator: &Operator) -> Option<&str> {
        self.guides.get(&operator.name).map(|s| s.as_str())
    }

    pub fn branch(&self, id: &SubProfessionId) -> Option<&Branch> {
        self.branches.get(id)
    }

    /// Branch display name, falling back to the raw id
    pub fn branch_name(&self, id: &SubProfessionId) -> String {
        self.branches
            .get(id)
            .map(|b| b.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Branches belonging to a class, sorted by name
    pub fn branches_of(&self, profession: Profession) -> Vec<&Branch> {
        let mut branches: Vec<&Branch> = self
            .branches
            .values()
            .filter(|b| b.class == profession)
            .collect();
        branches.sort_by(|a, b| a.name.cmp(&b.name));
        branches
    }

    /// Resolve a branch by display name, ignoring case
    pub fn branch_by_name(&self, name: &str) -> Option<&Branch> {
        self.branches
            .values()
            .find(|b| b.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Classes present in the data, in profession order
    pub fn professions(&self) -> Vec<Profession> {
        let mut professions: Vec<Profession> = self.classes.keys().copied().collect();
        for op in &self.operators {
            if !professions.contains(&op.profession) {
                professions.push(op.profession);
            }
        }
        professions.sort();
        professions
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::model::operator::{CombatStats, DamageType, Skill};

    pub fn operator(
        id: &str,
        name: &str,
        profession: Profession,
        branch: &str,
        rarity: u8,
    ) -> Operator {
        Operator {
            char_id: OperatorId::new(id),
            name: name.to_string(),
            profession,
            sub_profession_id: SubProfessionId::new(branch),
            rarity,
            is_cn_only: false,
            damage_type: DamageType::Physical,
            stats: CombatStats {
                atk: 500.0,
                attack_interval: 1.0,
            },
            skills: vec![Skill {
                name: "Power Strike".to_string(),
                multiplier: 2.0,
                duration: 10.0,
                cooldown: 40.0,
            }],
        }
    }

    fn branch(id: &str, name: &str, class: Profession) -> (SubProfessionId, Branch) {
        (
            SubProfessionId::new(id),
            Branch {
                sub_profession_id: SubProfessionId::new(id),
                name: name.to_string(),
                class,
                r#trait: String::new(),
                analysis: None,
            },
        )
    }

    /// Small catalog: two Guard branches, one Medic branch, one Caster
    pub fn sample_catalog() -> Catalog {
        let operators = vec![
            operator("char_017_huang", "Blaze", Profession::Warrior, "centurion", 6),
            operator("char_350_surtr", "Surtr", Profession::Warrior, "artsfghter", 6),
            operator("char_143_ghost", "Specter", Profession::Warrior, "centurion", 5),
            operator("char_128_plosis", "Ptilopsis", Profession::Medic, "ringhealer", 5),
            operator("char_010_chen", "Amiya", Profession::Caster, "corecaster", 5),
        ];
        let branches = [
            branch("centurion", "Centurion", Profession::Warrior),
            branch("artsfghter", "Arts Fighter", Profession::Warrior),
            branch("ringhealer", "Multi-target Medic", Profession::Medic),
            branch("corecaster", "Core Caster", Profession::Caster),
        ]
        .into_iter()
        .collect();
        let guides = [("Blaze", "blaze"), ("Ptilopsis", "ptilopsis")]
            .into_iter()
            .map(|(n, s)| (n.to_string(), s.to_string()))
            .collect();

        Catalog::new(operators, branches, BTreeMap::new(), guides)
    }
}
