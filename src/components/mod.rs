//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod add_operator_dialog;
pub mod checkbox;
pub mod filter_menu;
pub mod help_dialog;
pub mod layout;
pub mod operators;
pub mod parameters_dialog;
pub mod quit_dialog;
pub mod result_table;

pub use add_operator_dialog::AddOperatorDialog;
pub use filter_menu::FilterMenu;
pub use help_dialog::HelpDialog;
pub use layout::{calculate_main_layout, centered_popup};
pub use operators::{
    descriptions_visible, draw_operators_screen, OperatorsComponent, OperatorsRenderContext,
};
pub use parameters_dialog::ParametersDialog;
pub use quit_dialog::QuitDialog;
pub use result_table::ResultTable;
