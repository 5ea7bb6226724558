//! Data table loading
//!
//! Reads the JSON tables produced by the data preparation stage:
//! - `operators.json` (required) - operator name -> operator record
//! - `branches.json` - sub-profession id -> branch record
//! - `classes.json` - profession id -> class description
//! - `guides.json` - operator name -> guide slug

use crate::model::{Branch, Catalog, ClassInfo, Operator};
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const OPERATORS_FILE: &str = "operators.json";
pub const BRANCHES_FILE: &str = "branches.json";
pub const CLASSES_FILE: &str = "classes.json";
pub const GUIDES_FILE: &str = "guides.json";

#[derive(Debug, Error)]
pub enum DataError {
    #[error("{} not found", .0.display())]
    MissingFile(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn read_table<T: DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let contents = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| DataError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Optional tables load as empty when the file is absent
fn read_optional_table<T: DeserializeOwned + Default>(path: &Path) -> Result<T, DataError> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "Optional data table missing");
        return Ok(T::default());
    }
    read_table(path)
}

/// Load every table from `data_dir` into a catalog
pub fn load_catalog<P: AsRef<Path>>(data_dir: P) -> Result<Catalog, DataError> {
    let dir = data_dir.as_ref();
    let operators_path = dir.join(OPERATORS_FILE);
    if !operators_path.exists() {
        return Err(DataError::MissingFile(operators_path));
    }

    let operators: HashMap<String, Operator> = read_table(&operators_path)?;
    let branches: HashMap<String, Branch> = read_optional_table(&dir.join(BRANCHES_FILE))?;
    let classes: HashMap<String, ClassInfo> = read_optional_table(&dir.join(CLASSES_FILE))?;
    let guides: HashMap<String, String> = read_optional_table(&dir.join(GUIDES_FILE))?;

    let branches: BTreeMap<_, _> = branches
        .into_values()
        .map(|b| (b.sub_profession_id.clone(), b))
        .collect();
    let classes: BTreeMap<_, _> = classes.into_values().map(|c| (c.profession, c)).collect();

    let catalog = Catalog::new(operators.into_values().collect(), branches, classes, guides);
    tracing::info!(
        dir = %dir.display(),
        operators = catalog.len(),
        branches = catalog.branches.len(),
        guides = catalog.guides.len(),
        "Loaded data tables"
    );
    Ok(catalog)
}
