//! Shared types for the onboarding client
//!
//! Field catalogue, draft and master-data models, step validation,
//! payload normalization and form state. Nothing in this crate performs I/O;
//! the HTTP side lives in `onboard-client`.

pub mod error;
pub mod form;
pub mod models;
pub mod payload;
pub mod response;
pub mod validation;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::ValidationError;
pub use form::{DependentKind, DependentList, DependentRequest, FormMode, FormState, StalePolicy};
pub use models::{
    DraftField, EmployeeDraft, EmployeeRecord, Gender, ManagerCandidate, MasterDataSet, MasterItem,
    MasterList, SERVER_MANAGED_FIELDS, Section, find_item,
};
pub use payload::{Payload, normalize};
pub use response::ApiEnvelope;
pub use validation::{
    FormStep, StepContext, SubmissionReady, validate_step, validate_step_in, validate_step_on, validate_submission,
};
