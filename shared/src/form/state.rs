//! Form state store
//!
//! Holds one create/edit session: the draft, the active wizard step and the
//! two dependent option lists. There is a single writer (the user's input
//! stream), so updates are plain replacements with no locking. Validation
//! only happens at the explicit checkpoints [`FormState::next`] and
//! [`FormState::check_all`].

use chrono::{Local, NaiveDate};

use super::dependent::{DependentKind, DependentList, DependentRequest};
use crate::error::{UnknownField, ValidationError};
use crate::models::{DraftField, EmployeeDraft, MasterItem};
use crate::validation::{FormStep, StepContext, SubmissionReady, validate_step_in, validate_submission};

/// What the session will do on submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    /// `POST /employees`
    Create,
    /// `PUT /employees/:id`
    Edit { id: String },
}

/// What happens to a dependent selection when its option list is replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StalePolicy {
    /// Leave the selection alone even if the new list lacks it
    Keep,
    /// Empty the selection when the new list does not contain it
    #[default]
    ClearIfAbsent,
}

impl std::str::FromStr for StalePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keep" => Ok(Self::Keep),
            "clear" | "clear-if-absent" | "clear_if_absent" => Ok(Self::ClearIfAbsent),
            other => Err(format!("unknown stale policy: {other}")),
        }
    }
}

/// In-progress create/edit session
#[derive(Debug, Clone)]
pub struct FormState {
    mode: FormMode,
    draft: EmployeeDraft,
    step: FormStep,
    designations: DependentList,
    states: DependentList,
    policy: StalePolicy,
    /// Joining date as loaded in edit mode; exempt from the not-in-the-past rule
    stored_joining_date: Option<String>,
}

impl FormState {
    /// Empty form for a new employee
    pub fn create() -> Self {
        Self::with_draft(FormMode::Create, EmployeeDraft::empty())
    }

    /// Form pre-filled from an existing record
    ///
    /// Returns the dependent fetches needed for the loaded department and
    /// country, mirroring what a user selection would trigger.
    pub fn edit(id: impl Into<String>, draft: EmployeeDraft) -> (Self, Vec<DependentRequest>) {
        let stored = Some(draft.joining_date.trim().to_string()).filter(|date| !date.is_empty());
        let mut state = Self::with_draft(FormMode::Edit { id: id.into() }, draft);
        state.stored_joining_date = stored;
        let requests = state.refresh_dependents();
        (state, requests)
    }

    fn with_draft(mode: FormMode, draft: EmployeeDraft) -> Self {
        Self {
            mode,
            draft,
            step: FormStep::PersonalAndJob,
            designations: DependentList::new(DependentKind::Designations),
            states: DependentList::new(DependentKind::States),
            policy: StalePolicy::default(),
            stored_joining_date: None,
        }
    }

    pub fn with_policy(mut self, policy: StalePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn draft(&self) -> &EmployeeDraft {
        &self.draft
    }

    pub fn step(&self) -> FormStep {
        self.step
    }

    pub fn is_last_step(&self) -> bool {
        self.step.is_last()
    }

    pub fn policy(&self) -> StalePolicy {
        self.policy
    }

    pub fn dependent(&self, kind: DependentKind) -> &DependentList {
        match kind {
            DependentKind::Designations => &self.designations,
            DependentKind::States => &self.states,
        }
    }

    fn dependent_mut(&mut self, kind: DependentKind) -> &mut DependentList {
        match kind {
            DependentKind::Designations => &mut self.designations,
            DependentKind::States => &mut self.states,
        }
    }

    pub fn designations(&self) -> &[MasterItem] {
        self.designations.items()
    }

    pub fn states(&self) -> &[MasterItem] {
        self.states.items()
    }

    /// Replace one field
    ///
    /// When the field scopes a dependent list and its value actually
    /// changed, the list is reset and the fetch to perform is returned.
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) -> Option<DependentRequest> {
        let value = value.into();
        let changed = self.draft.get(field) != value;
        self.draft.set(field, value);

        let kind = DependentKind::for_parent(field).filter(|_| changed)?;
        let parent = self.draft.get(field).to_string();
        let request = self.dependent_mut(kind).request(&parent);
        if request.is_none() {
            // parent cleared: nothing left to pick from
            self.enforce_policy(kind);
        }
        request
    }

    /// Replace one field by wire name
    pub fn set_by_name(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<Option<DependentRequest>, UnknownField> {
        let field = name.parse::<DraftField>()?;
        Ok(self.set(field, value))
    }

    /// Re-issue fetches for every dependent list whose parent is set
    pub fn refresh_dependents(&mut self) -> Vec<DependentRequest> {
        DependentKind::ALL
            .into_iter()
            .filter_map(|kind| {
                let parent = self.draft.get(kind.parent_field()).to_string();
                self.dependent_mut(kind).request(&parent)
            })
            .collect()
    }

    /// Apply a fetch result; stale results are dropped
    pub fn apply_dependent(&mut self, request: &DependentRequest, items: Vec<MasterItem>) -> bool {
        let applied = self.dependent_mut(request.kind).apply(request, items);
        if applied {
            self.enforce_policy(request.kind);
        }
        applied
    }

    fn enforce_policy(&mut self, kind: DependentKind) {
        if self.policy == StalePolicy::Keep {
            return;
        }
        let child = kind.child_field();
        let selected = self.draft.get(child);
        if !selected.is_empty() && !self.dependent(kind).contains(selected) {
            tracing::info!(field = %child, value = %selected, "Clearing selection missing from refreshed list");
            self.draft.set(child, String::new());
        }
    }

    /// Validate the active step and advance to the next one
    ///
    /// On the last step a successful check leaves the step unchanged.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule of the active step; the step does not
    /// change.
    pub fn next(&mut self) -> Result<FormStep, ValidationError> {
        self.next_on(Local::now().date_naive())
    }

    /// [`FormState::next`] against an explicit reference date
    ///
    /// # Errors
    ///
    /// Returns the first violated rule of the active step.
    pub fn next_on(&mut self, today: NaiveDate) -> Result<FormStep, ValidationError> {
        validate_step_in(&self.draft, self.step.index(), &self.context(today))?;
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    /// Go back one step; never validates
    pub fn back(&mut self) -> FormStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    /// Every step's rules, then the submission check
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn check_all(&self) -> Result<SubmissionReady, ValidationError> {
        self.check_all_on(Local::now().date_naive())
    }

    /// [`FormState::check_all`] against an explicit reference date
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn check_all_on(&self, today: NaiveDate) -> Result<SubmissionReady, ValidationError> {
        let ctx = self.context(today);
        for step in FormStep::ALL {
            validate_step_in(&self.draft, step.index(), &ctx)?;
        }
        validate_submission(&self.draft)
    }

    fn context(&self, today: NaiveDate) -> StepContext<'_> {
        StepContext {
            today,
            stored_joining_date: self.stored_joining_date.as_deref(),
        }
    }
}
