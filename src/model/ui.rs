//! UI state - presentation enums shared by components

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Operators,
    DpsCalculator,
}

impl Tab {
    pub fn all() -> Vec<Tab> {
        vec![Tab::Operators, Tab::DpsCalculator]
    }

    pub fn name(&self) -> &str {
        match self {
            Tab::Operators => "Operators",
            Tab::DpsCalculator => "DPS Calculator",
        }
    }

    pub fn next(&self) -> Tab {
        match self {
            Tab::Operators => Tab::DpsCalculator,
            Tab::DpsCalculator => Tab::Operators,
        }
    }
}
