//! CSV export of the DPS comparison

use crate::model::dps::{round2, DerivedCalc, RosterEntry};
use anyhow::Result;
use chrono::Local;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// One exported row per compared operator
#[derive(Debug, Serialize)]
struct ComparisonRecord<'a> {
    operator: &'a str,
    damage_type: &'a str,
    atk: f64,
    attack_interval: f64,
    skill_multiplier: f64,
    enemy_defense: f64,
    enemy_resistance: f64,
    skill_uptime: f64,
    skill_downtime: f64,
    skill_atk: f64,
    skill_total_damage: f64,
    skill_dps: f64,
    basic_attack_dps: f64,
    average_dps: f64,
}

/// Write the comparison as CSV to any writer
pub fn write_comparison<W: Write>(
    writer: W,
    entries: &[RosterEntry],
    calcs: &[DerivedCalc],
) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (entry, calc) in entries.iter().zip(calcs) {
        let params = &entry.parameters;
        csv_writer.serialize(ComparisonRecord {
            operator: &entry.operator.name,
            damage_type: entry.operator.damage_type.name(),
            atk: params.atk,
            attack_interval: params.attack_interval,
            skill_multiplier: params.skill_multiplier,
            enemy_defense: params.enemy_defense,
            enemy_resistance: params.enemy_resistance,
            skill_uptime: calc.skill_cycle.uptime,
            skill_downtime: calc.skill_cycle.downtime,
            skill_atk: round2(calc.skill_atk),
            skill_total_damage: round2(calc.skill_total_damage),
            skill_dps: round2(calc.skill_dps),
            basic_attack_dps: round2(calc.basic_attack_dps),
            average_dps: round2(calc.average_dps),
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Export to a timestamped file in `dir`, returning its path
pub fn export_comparison(
    dir: &Path,
    entries: &[RosterEntry],
    calcs: &[DerivedCalc],
) -> Result<PathBuf> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
    }
    let file_name = format!("dps-comparison-{}.csv", Local::now().format("%Y%m%d-%H%M%S"));
    let path = dir.join(file_name);
    let file = std::fs::File::create(&path)?;
    write_comparison(file, entries, calcs)?;
    tracing::info!(path = %path.display(), rows = entries.len(), "Exported DPS comparison");
    Ok(path)
}
