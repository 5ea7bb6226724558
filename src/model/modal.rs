//! Modal stack for managing overlays
//!
//! Menus and dialogs are pushed on top of the current screen; only the top
//! modal receives key events.

use super::operator::OperatorId;

/// A modal overlay drawn on top of the main UI
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Quit confirmation dialog
    QuitConfirm,
    /// Class selection menu
    ClassMenu,
    /// Branch selection menu for the selected class
    BranchMenu,
    /// Pick an operator to add to the DPS comparison
    AddOperator,
    /// Edit the combat parameters of one compared operator
    EditParameters { operator_id: OperatorId },
    /// Keyboard shortcuts
    Help,
}

/// Modals render bottom to top
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_stack_push_pop() {
        let mut stack = ModalStack::new();
        assert!(stack.top().is_none());

        stack.push(Modal::ClassMenu);
        stack.push(Modal::QuitConfirm);
        assert_eq!(stack.top(), Some(&Modal::QuitConfirm));

        assert_eq!(stack.pop(), Some(Modal::QuitConfirm));
        assert_eq!(stack.pop(), Some(Modal::ClassMenu));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_edit_parameters_modal_carries_operator() {
        let mut stack = ModalStack::new();
        stack.push(Modal::EditParameters {
            operator_id: OperatorId::new("char_017_huang"),
        });

        match stack.top() {
            Some(Modal::EditParameters { operator_id }) => {
                assert_eq!(operator_id.as_str(), "char_017_huang")
            }
            other => panic!("unexpected modal: {:?}", other),
        }
    }
}
