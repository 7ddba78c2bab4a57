//! Onboard Client - HTTP client for the employee onboarding backend
//!
//! Master data, employee records and the create/edit session that ties the
//! form state from `shared` to the backend.

pub mod cli;
pub mod config;
pub mod employees;
pub mod error;
pub mod http;
pub mod logger;
pub mod masters;
pub mod session;

pub use config::ClientConfig;
pub use employees::EmployeeService;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
pub use masters::MasterDataGateway;
pub use session::OnboardingSession;
