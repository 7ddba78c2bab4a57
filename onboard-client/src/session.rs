//! Onboarding session
//!
//! One create or edit run of the two-step form: master data, the form state
//! and the submit path. Dependent fetches are returned to the caller as
//! [`DependentRequest`]s so they can run outside any borrow of the session;
//! the form state discards answers that were overtaken by a newer selection.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use shared::{
    DependentRequest, DraftField, EmployeeDraft, EmployeeRecord, FormMode, FormState, FormStep,
    MasterDataSet, MasterItem, StalePolicy, ValidationError,
};

use crate::{ClientError, ClientResult, EmployeeService, HttpClient, MasterDataGateway};

/// Create/edit session against a backend
#[derive(Debug)]
pub struct OnboardingSession<C> {
    gateway: MasterDataGateway<C>,
    employees: EmployeeService<C>,
    masters: MasterDataSet,
    form: FormState,
    submitting: AtomicBool,
}

impl<C: HttpClient> OnboardingSession<C> {
    /// Load master data and start an empty form
    pub async fn create(client: Arc<C>, policy: StalePolicy) -> ClientResult<Self> {
        let gateway = MasterDataGateway::new(Arc::clone(&client));
        let masters = gateway.fetch_all().await?;
        tracing::info!("Create session ready");

        Ok(Self {
            gateway,
            employees: EmployeeService::new(client),
            masters,
            form: FormState::create().with_policy(policy),
            submitting: AtomicBool::new(false),
        })
    }

    /// Load master data and the record concurrently, then the dependent
    /// lists for the record's department and country
    pub async fn edit(client: Arc<C>, id: &str, policy: StalePolicy) -> ClientResult<Self> {
        let gateway = MasterDataGateway::new(Arc::clone(&client));
        let employees = EmployeeService::new(client);
        let (masters, record) = futures::try_join!(gateway.fetch_all(), employees.get(id))?;

        let (form, requests) = FormState::edit(id.trim(), EmployeeDraft::from_record(&record));
        let mut form = form.with_policy(policy);
        let results =
            futures::future::try_join_all(requests.iter().map(|r| gateway.fetch_dependent(r))).await?;
        for (request, items) in requests.iter().zip(results) {
            form.apply_dependent(request, items);
        }
        tracing::info!(id = %id.trim(), "Edit session ready");

        Ok(Self {
            gateway,
            employees,
            masters,
            form,
            submitting: AtomicBool::new(false),
        })
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn draft(&self) -> &EmployeeDraft {
        self.form.draft()
    }

    pub fn masters(&self) -> &MasterDataSet {
        &self.masters
    }

    pub fn designations(&self) -> &[MasterItem] {
        self.form.designations()
    }

    pub fn states(&self) -> &[MasterItem] {
        self.form.states()
    }

    pub fn step(&self) -> FormStep {
        self.form.step()
    }

    /// Handle for performing dependent fetches
    pub fn gateway(&self) -> MasterDataGateway<C> {
        self.gateway.clone()
    }

    /// Replace one field; see [`FormState::set`]
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) -> Option<DependentRequest> {
        self.form.set(field, value)
    }

    /// Perform a dependent fetch
    pub async fn load_dependent(&self, request: &DependentRequest) -> ClientResult<Vec<MasterItem>> {
        self.gateway.fetch_dependent(request).await
    }

    /// Apply a fetch result; returns `false` when it was superseded
    pub fn apply_dependent(&mut self, request: &DependentRequest, items: Vec<MasterItem>) -> bool {
        self.form.apply_dependent(request, items)
    }

    /// Set a field and, when it scopes a dependent list, load that list
    pub async fn update(&mut self, field: DraftField, value: impl Into<String>) -> ClientResult<()> {
        if let Some(request) = self.form.set(field, value) {
            let items = self.gateway.fetch_dependent(&request).await?;
            self.form.apply_dependent(&request, items);
        }
        Ok(())
    }

    /// [`OnboardingSession::update`] by wire field name
    pub async fn update_by_name(&mut self, name: &str, value: impl Into<String>) -> ClientResult<()> {
        let field = name
            .parse::<DraftField>()
            .map_err(|e| ClientError::InvalidInput(e.to_string()))?;
        self.update(field, value).await
    }

    /// Validate the active step and advance
    pub fn next(&mut self) -> Result<FormStep, ValidationError> {
        self.form.next()
    }

    pub fn back(&mut self) -> FormStep {
        self.form.back()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Validate everything, normalize and send
    ///
    /// Creates with `POST /employees` or updates with `PUT /employees/:id`
    /// depending on the session mode. The draft is left untouched whatever
    /// the outcome.
    ///
    /// # Errors
    ///
    /// [`ClientError::Validation`] before any request is made,
    /// [`ClientError::SubmissionInFlight`] while another submit on this
    /// session is outstanding, otherwise the transport error.
    pub async fn submit(&self) -> ClientResult<EmployeeRecord> {
        let ready = self.form.check_all()?;
        let _guard = SubmitGuard::acquire(&self.submitting).ok_or(ClientError::SubmissionInFlight)?;
        let payload = ready.payload();

        let result = match self.form.mode() {
            FormMode::Create => self.employees.create(&payload).await,
            FormMode::Edit { id } => self.employees.update(id, &payload).await,
        };
        if let Err(e) = &result {
            tracing::warn!(error = %e, "Submission failed");
        }
        result
    }
}

/// Holds the submitting flag for the lifetime of one submit
struct SubmitGuard<'a>(&'a AtomicBool);

impl<'a> SubmitGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
