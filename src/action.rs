//! Action enum - All possible application actions
//!
//! Components emit Actions in response to events, and the App processes
//! them against the filter and DPS stores.

use crate::model::{OperatorId, OperatorParameters, Profession, SubProfessionId};
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for animations/updates
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Force quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Move to next item in list
    NextItem,
    /// Move to previous item in list
    PrevItem,
    /// Jump to first item
    FirstItem,
    /// Jump to last item
    LastItem,
    /// Switch between the operator list and the DPS calculator
    NextTab,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Close the current modal
    CloseModal,
    /// Navigate up in modal
    ModalUp,
    /// Navigate down in modal
    ModalDown,
    /// Open help dialog showing all keyboard shortcuts
    OpenHelp,

    // ─────────────────────────────────────────────────────────────────────────
    // Operator Filter
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the class menu
    OpenClassMenu,
    /// Open the branch menu for the selected class
    OpenBranchMenu,
    /// Select a class, or clear it with `None`
    SetProfession(Option<Profession>),
    /// Select a branch, or clear it with `None`
    SetSubProfession(Option<SubProfessionId>),
    /// Jump to the branch of the highlighted operator
    FilterBySelectedBranch,
    /// Toggle the "Guide available" checkbox
    ToggleGuideOnly,
    /// Clear class and branch selections
    ResetFilters,
    /// Show or hide the class/branch description cards
    ToggleClassDescriptions,

    // ─────────────────────────────────────────────────────────────────────────
    // DPS Calculator
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the operator picker
    OpenAddOperator,
    /// Add an operator to the comparison
    AddOperator(OperatorId),
    /// Remove the highlighted operator from the comparison
    RemoveSelectedOperator,
    /// Open the parameter editor for the highlighted operator
    OpenEditParameters,
    /// Replace an operator's parameters
    UpdateParameters(OperatorId, OperatorParameters),
    /// Write the comparison to a CSV file
    ExportComparison,
}

impl Action {
    /// Actions that may change the operator filter
    pub fn changes_filter(&self) -> bool {
        matches!(
            self,
            Action::SetProfession(_)
                | Action::SetSubProfession(_)
                | Action::FilterBySelectedBranch
                | Action::ToggleGuideOnly
                | Action::ResetFilters
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::NextItem => write!(f, "NextItem"),
            Action::PrevItem => write!(f, "PrevItem"),
            Action::FirstItem => write!(f, "FirstItem"),
            Action::LastItem => write!(f, "LastItem"),
            Action::NextTab => write!(f, "NextTab"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ModalUp => write!(f, "ModalUp"),
            Action::ModalDown => write!(f, "ModalDown"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::OpenClassMenu => write!(f, "OpenClassMenu"),
            Action::OpenBranchMenu => write!(f, "OpenBranchMenu"),
            Action::SetProfession(Some(p)) => write!(f, "SetProfession({})", p),
            Action::SetProfession(None) => write!(f, "SetProfession(All)"),
            Action::SetSubProfession(Some(id)) => write!(f, "SetSubProfession({})", id),
            Action::SetSubProfession(None) => write!(f, "SetSubProfession(All)"),
            Action::FilterBySelectedBranch => write!(f, "FilterBySelectedBranch"),
            Action::ToggleGuideOnly => write!(f, "ToggleGuideOnly"),
            Action::ResetFilters => write!(f, "ResetFilters"),
            Action::ToggleClassDescriptions => write!(f, "ToggleClassDescriptions"),
            Action::OpenAddOperator => write!(f, "OpenAddOperator"),
            Action::AddOperator(id) => write!(f, "AddOperator({})", id),
            Action::RemoveSelectedOperator => write!(f, "RemoveSelectedOperator"),
            Action::OpenEditParameters => write!(f, "OpenEditParameters"),
            Action::UpdateParameters(id, _) => write!(f, "UpdateParameters({})", id),
            Action::ExportComparison => write!(f, "ExportComparison"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_selection() {
        assert_eq!(
            Action::SetProfession(Some(Profession::Medic)).to_string(),
            "SetProfession(Medic)"
        );
        assert_eq!(Action::SetSubProfession(None).to_string(), "SetSubProfession(All)");
        assert_eq!(
            Action::AddOperator(OperatorId::new("char_017_huang")).to_string(),
            "AddOperator(char_017_huang)"
        );
    }
}
