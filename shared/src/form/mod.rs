//! Form state
//!
//! [`FormState`] owns the draft for one create/edit session together with
//! the dependent option lists derived from it.

pub mod dependent;
pub mod state;

pub use dependent::{DependentKind, DependentList, DependentRequest};
pub use state::{FormMode, FormState, StalePolicy};
