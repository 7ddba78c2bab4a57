//! Form validation
//!
//! Two checkpoints guard the form:
//!
//! - [`validate_step`] runs the format and business rules of one wizard
//!   step before the user may move on.
//! - [`validate_submission`] runs right before a create/update call and turns
//!   the raw draft into a [`SubmissionReady`] record.
//!
//! Both report the **first** failing rule only. Rules are evaluated in a
//! fixed order and evaluation stops at the first failure.

use std::sync::LazyLock;

use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;
use validator::Validate;

use crate::error::ValidationError;
use crate::models::{DraftField, EmployeeDraft, Gender};
use crate::payload::{Payload, normalize};

/// Calendar date format used by date inputs
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Minimum age, in calendar years, of a new employee
pub const MIN_AGE_YEARS: i32 = 18;

// ── Patterns ────────────────────────────────────────────────────────
// ASCII classes on purpose: `\d` would also accept non-Latin digits.

static MOBILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("mobile pattern"));
static PINCODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{6}$").expect("pincode pattern"));
static PAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").expect("PAN pattern"));
static AADHAAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{12}$").expect("Aadhaar pattern"));
static ACCOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{9,18}$").expect("account pattern"));
static IFSC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{4}0[A-Z0-9]{6}$").expect("IFSC pattern"));

// ── Steps ───────────────────────────────────────────────────────────

/// Wizard steps, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormStep {
    PersonalAndJob,
    AddressAndBank,
}

impl FormStep {
    pub const ALL: [FormStep; 2] = [Self::PersonalAndJob, Self::AddressAndBank];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::PersonalAndJob),
            1 => Some(Self::AddressAndBank),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::PersonalAndJob => 0,
            Self::AddressAndBank => 1,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::PersonalAndJob => "Personal & Job Information",
            Self::AddressAndBank => "Address & Bank Information",
        }
    }

    pub const fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::PersonalAndJob => None,
            Self::AddressAndBank => Some(Self::PersonalAndJob),
        }
    }

    pub const fn is_last(self) -> bool {
        self.next().is_none()
    }

    fn rules(self) -> &'static [Rule] {
        match self {
            Self::PersonalAndJob => PERSONAL_AND_JOB_RULES,
            Self::AddressAndBank => ADDRESS_AND_BANK_RULES,
        }
    }
}

// ── Rule table ──────────────────────────────────────────────────────

/// What the step rules are evaluated against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepContext<'a> {
    pub today: NaiveDate,
    /// Joining date already stored on the record being edited. Left as is,
    /// it is not held to the not-in-the-past rule.
    pub stored_joining_date: Option<&'a str>,
}

impl StepContext<'_> {
    pub const fn on(today: NaiveDate) -> Self {
        Self {
            today,
            stored_joining_date: None,
        }
    }
}

type Check = fn(&EmployeeDraft, &StepContext<'_>) -> Result<(), &'static str>;

struct Rule {
    field: DraftField,
    check: Check,
}

const PERSONAL_AND_JOB_RULES: &[Rule] = &[
    Rule { field: DraftField::Dob, check: check_adult },
    Rule { field: DraftField::MobileNumber, check: check_mobile },
    Rule { field: DraftField::JoiningDate, check: check_joining_date },
];

const ADDRESS_AND_BANK_RULES: &[Rule] = &[
    Rule { field: DraftField::Pincode, check: check_pincode },
    Rule { field: DraftField::PanNumber, check: check_pan },
    Rule { field: DraftField::AadhaarNumber, check: check_aadhaar },
    Rule { field: DraftField::AccountNumber, check: check_account },
    Rule { field: DraftField::IfscCode, check: check_ifsc },
];

fn pattern(re: &Regex, value: &str, message: &'static str) -> Result<(), &'static str> {
    if re.is_match(value) { Ok(()) } else { Err(message) }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Age is the difference of calendar years; month and day are ignored.
fn check_adult(draft: &EmployeeDraft, ctx: &StepContext<'_>) -> Result<(), &'static str> {
    const MESSAGE: &str = "Employee must be at least 18 years old";
    let dob = parse_date(&draft.dob).ok_or(MESSAGE)?;
    if ctx.today.year() - dob.year() < MIN_AGE_YEARS {
        return Err(MESSAGE);
    }
    Ok(())
}

fn check_mobile(draft: &EmployeeDraft, _: &StepContext<'_>) -> Result<(), &'static str> {
    pattern(&MOBILE_RE, &draft.mobile_number, "Mobile number must be 10 digits")
}

/// Optional; when present it may be today but not earlier, unless it is the
/// unchanged stored date of the record being edited.
fn check_joining_date(draft: &EmployeeDraft, ctx: &StepContext<'_>) -> Result<(), &'static str> {
    let value = draft.joining_date.trim();
    if value.is_empty() {
        return Ok(());
    }
    let joining = parse_date(value).ok_or("Joining date is not a valid date")?;
    if ctx.stored_joining_date.is_some_and(|stored| stored.trim() == value) {
        return Ok(());
    }
    if joining < ctx.today {
        return Err("Joining date cannot be in the past");
    }
    Ok(())
}

fn check_pincode(draft: &EmployeeDraft, _: &StepContext<'_>) -> Result<(), &'static str> {
    pattern(&PINCODE_RE, &draft.pincode, "Pincode must be 6 digits")
}

fn check_pan(draft: &EmployeeDraft, _: &StepContext<'_>) -> Result<(), &'static str> {
    pattern(&PAN_RE, &draft.pan_number, "Invalid PAN format")
}

fn check_aadhaar(draft: &EmployeeDraft, _: &StepContext<'_>) -> Result<(), &'static str> {
    pattern(&AADHAAR_RE, &draft.aadhaar_number, "Aadhaar must be 12 digits")
}

fn check_account(draft: &EmployeeDraft, _: &StepContext<'_>) -> Result<(), &'static str> {
    pattern(&ACCOUNT_RE, &draft.account_number, "Invalid account number")
}

fn check_ifsc(draft: &EmployeeDraft, _: &StepContext<'_>) -> Result<(), &'static str> {
    pattern(&IFSC_RE, &draft.ifsc_code, "Invalid IFSC code")
}

// ── Step validation ─────────────────────────────────────────────────

/// Validate one wizard step against today's local date
///
/// Indices that do not name a step have no rules and always pass.
///
/// # Errors
///
/// Returns the first violated rule of the step.
pub fn validate_step(draft: &EmployeeDraft, step_index: usize) -> Result<(), ValidationError> {
    validate_step_on(draft, step_index, Local::now().date_naive())
}

/// Validate one wizard step against an explicit reference date
///
/// # Errors
///
/// Returns the first violated rule of the step.
pub fn validate_step_on(
    draft: &EmployeeDraft,
    step_index: usize,
    today: NaiveDate,
) -> Result<(), ValidationError> {
    validate_step_in(draft, step_index, &StepContext::on(today))
}

/// Validate one wizard step against a full [`StepContext`]
///
/// # Errors
///
/// Returns the first violated rule of the step.
pub fn validate_step_in(
    draft: &EmployeeDraft,
    step_index: usize,
    ctx: &StepContext<'_>,
) -> Result<(), ValidationError> {
    let Some(step) = FormStep::from_index(step_index) else {
        return Ok(());
    };

    for rule in step.rules() {
        if let Err(message) = (rule.check)(draft, ctx) {
            tracing::debug!(step = step_index, field = %rule.field, "Step validation failed");
            return Err(ValidationError::new(rule.field, message));
        }
    }
    Ok(())
}

// ── Submission ──────────────────────────────────────────────────────

/// A draft that passed the submission check
///
/// Only this type is accepted by the submit path, so an unchecked draft
/// cannot reach the backend. Typed views of the parsed fields are exposed
/// alongside the checked draft, which is what gets normalized and sent. The
/// draft carries the email exactly as it was checked (trimmed).
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct SubmissionReady {
    pub dob: NaiveDate,
    pub gender: Gender,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub joining_date: NaiveDate,
    pub reporting_manager_id: Option<String>,
    draft: EmployeeDraft,
}

impl SubmissionReady {
    pub fn draft(&self) -> &EmployeeDraft {
        &self.draft
    }

    /// The normalized request body for this record
    pub fn payload(&self) -> Payload {
        normalize(&self.draft)
    }
}

/// Check that a draft is complete enough to submit
///
/// Every field except `address_line2` and `reporting_manager_id` must be
/// filled (checked in form order), the email must be well formed and the
/// gender must be one of the offered options. Step rules are not repeated
/// here; callers run [`validate_step`] for each step first.
///
/// # Errors
///
/// Returns the first violated rule.
pub fn validate_submission(draft: &EmployeeDraft) -> Result<SubmissionReady, ValidationError> {
    if let Some(field) = DraftField::ALL
        .into_iter()
        .find(|field| !field.is_optional() && draft.is_blank(*field))
    {
        return Err(ValidationError::required(field));
    }

    let dob = parse_date(&draft.dob)
        .ok_or_else(|| ValidationError::new(DraftField::Dob, "DOB is not a valid date"))?;
    let joining_date = parse_date(&draft.joining_date).ok_or_else(|| {
        ValidationError::new(DraftField::JoiningDate, "Joining date is not a valid date")
    })?;
    let gender = draft.gender.parse::<Gender>().map_err(|_| {
        ValidationError::new(DraftField::Gender, "Gender must be Male, Female or Other")
    })?;
    let reporting_manager_id = Some(draft.reporting_manager_id.trim())
        .filter(|id| !id.is_empty())
        .map(str::to_string);

    let email = draft.email.trim().to_string();
    let ready = SubmissionReady {
        dob,
        gender,
        joining_date,
        reporting_manager_id,
        draft: draft.clone().with(DraftField::Email, email.clone()),
        email,
    };

    if let Err(errors) = ready.validate() {
        let field_errors = errors.field_errors();
        let first = DraftField::ALL.into_iter().find_map(|field| {
            field_errors
                .get(field.as_str())
                .and_then(|errs| errs.first())
                .map(|err| (field, err))
        });
        return Err(match first {
            Some((field, err)) => match &err.message {
                Some(message) => ValidationError::with_message(field, message.to_string()),
                None => ValidationError::with_message(field, format!("Invalid {}", field.label())),
            },
            None => ValidationError::with_message(DraftField::Email, errors.to_string()),
        });
    }

    Ok(ready)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    /// A draft that passes both steps and the submission check
    fn valid_draft() -> EmployeeDraft {
        EmployeeDraft::empty()
            .with(DraftField::FirstName, "Asha")
            .with(DraftField::LastName, "Rao")
            .with(DraftField::Dob, "1995-06-15")
            .with(DraftField::Gender, "Female")
            .with(DraftField::Email, "asha.rao@example.com")
            .with(DraftField::MobileNumber, "9876543210")
            .with(DraftField::DepartmentId, "1")
            .with(DraftField::DesignationId, "4")
            .with(DraftField::EmploymentTypeId, "1")
            .with(DraftField::JoiningDate, "2026-11-01")
            .with(DraftField::LocationId, "2")
            .with(DraftField::PreferredShiftId, "1")
            .with(DraftField::RoleId, "3")
            .with(DraftField::AddressLine1, "12 MG Road")
            .with(DraftField::CountryId, "1")
            .with(DraftField::StateId, "10")
            .with(DraftField::City, "Bengaluru")
            .with(DraftField::Pincode, "560001")
            .with(DraftField::PanNumber, "ABCDE1234F")
            .with(DraftField::AadhaarNumber, "123456789012")
            .with(DraftField::BankId, "5")
            .with(DraftField::AccountNumber, "123456789")
            .with(DraftField::IfscCode, "HDFC0ABCDEF")
    }

    fn step0(draft: &EmployeeDraft) -> Result<(), ValidationError> {
        validate_step_on(draft, 0, today())
    }

    fn step1(draft: &EmployeeDraft) -> Result<(), ValidationError> {
        validate_step_on(draft, 1, today())
    }

    fn step1_with(field: DraftField, value: &str) -> Result<(), ValidationError> {
        step1(&valid_draft().with(field, value))
    }

    #[test]
    fn test_valid_draft_passes_both_steps() {
        let draft = valid_draft();
        assert_eq!(step0(&draft), Ok(()));
        assert_eq!(step1(&draft), Ok(()));
    }

    #[test]
    fn test_age_uses_calendar_years_only() {
        // 2008 -> 18 by year difference, even though the birthday is later in the year
        let eighteen = valid_draft().with(DraftField::Dob, "2008-12-31");
        assert_eq!(step0(&eighteen), Ok(()));

        let seventeen = valid_draft().with(DraftField::Dob, "2009-01-01");
        let err = step0(&seventeen).unwrap_err();
        assert_eq!(err.field, DraftField::Dob);
        assert_eq!(err.to_string(), "Employee must be at least 18 years old");
    }

    #[test]
    fn test_missing_or_garbled_dob_fails() {
        for dob in ["", "not-a-date", "31/12/1990"] {
            let err = step0(&valid_draft().with(DraftField::Dob, dob)).unwrap_err();
            assert_eq!(err.field, DraftField::Dob, "dob = {dob:?}");
        }
    }

    #[test]
    fn test_mobile_number_rule() {
        let check = |mobile: &str| step0(&valid_draft().with(DraftField::MobileNumber, mobile));
        assert!(check("1234567890").is_ok());
        for bad in ["12345", "12345678901", "12a4567890", ""] {
            let err = check(bad).unwrap_err();
            assert_eq!(err.field, DraftField::MobileNumber, "mobile = {bad:?}");
            assert_eq!(err.to_string(), "Mobile number must be 10 digits");
        }
    }

    #[test]
    fn test_joining_date_rule() {
        let check = |date: &str| step0(&valid_draft().with(DraftField::JoiningDate, date));
        assert!(check("").is_ok());
        assert!(check("2026-10-19").is_ok(), "same-day joining is allowed");
        assert!(check("2027-01-01").is_ok());

        let past = check("2026-10-18").unwrap_err();
        assert_eq!(past.to_string(), "Joining date cannot be in the past");

        let garbled = check("soon").unwrap_err();
        assert_eq!(garbled.field, DraftField::JoiningDate);
    }

    #[test]
    fn test_unchanged_stored_joining_date_is_accepted() {
        let draft = valid_draft().with(DraftField::JoiningDate, "2024-01-15");
        let ctx = StepContext { today: today(), stored_joining_date: Some("2024-01-15") };
        assert_eq!(validate_step_in(&draft, 0, &ctx), Ok(()));

        let moved = draft.with(DraftField::JoiningDate, "2024-02-01");
        let err = validate_step_in(&moved, 0, &ctx).unwrap_err();
        assert_eq!(err.to_string(), "Joining date cannot be in the past");

        let garbled = valid_draft().with(DraftField::JoiningDate, "soon");
        let ctx = StepContext { stored_joining_date: Some("soon"), ..ctx };
        assert_eq!(validate_step_in(&garbled, 0, &ctx).unwrap_err().field, DraftField::JoiningDate);
    }

    #[test]
    fn test_step0_reports_first_failure_only() {
        let draft = valid_draft()
            .with(DraftField::Dob, "2015-01-01")
            .with(DraftField::MobileNumber, "1")
            .with(DraftField::JoiningDate, "2000-01-01");
        assert_eq!(step0(&draft).unwrap_err().field, DraftField::Dob);

        let draft = draft.with(DraftField::Dob, "1990-01-01");
        assert_eq!(step0(&draft).unwrap_err().field, DraftField::MobileNumber);
    }

    #[test]
    fn test_step0_ignores_address_and_bank() {
        let draft = valid_draft().with(DraftField::Pincode, "x");
        assert!(step0(&draft).is_ok());
    }

    #[test]
    fn test_pincode_rule() {
        assert!(step1_with(DraftField::Pincode, "560001").is_ok());
        for bad in ["5600", "56000a"] {
            let err = step1_with(DraftField::Pincode, bad).unwrap_err();
            assert_eq!(err.field, DraftField::Pincode);
            assert_eq!(err.to_string(), "Pincode must be 6 digits");
        }
    }

    #[test]
    fn test_pan_rule() {
        assert!(step1_with(DraftField::PanNumber, "ABCDE1234F").is_ok());
        for bad in ["abcde1234f", "ABCDE123F"] {
            let err = step1_with(DraftField::PanNumber, bad).unwrap_err();
            assert_eq!(err.field, DraftField::PanNumber);
            assert_eq!(err.to_string(), "Invalid PAN format");
        }
    }

    #[test]
    fn test_aadhaar_rule() {
        assert!(step1_with(DraftField::AadhaarNumber, "123456789012").is_ok());
        let err = step1_with(DraftField::AadhaarNumber, "12345678901").unwrap_err();
        assert_eq!(err.to_string(), "Aadhaar must be 12 digits");
    }

    #[test]
    fn test_account_number_length_bounds() {
        let digits = |n: usize| "1".repeat(n);
        assert!(step1_with(DraftField::AccountNumber, &digits(9)).is_ok());
        assert!(step1_with(DraftField::AccountNumber, &digits(18)).is_ok());
        for n in [8, 19] {
            let err = step1_with(DraftField::AccountNumber, &digits(n)).unwrap_err();
            assert_eq!(err.field, DraftField::AccountNumber, "length {n}");
        }
    }

    #[test]
    fn test_ifsc_rule() {
        assert!(step1_with(DraftField::IfscCode, "HDFC0ABCDEF").is_ok());
        assert!(step1_with(DraftField::IfscCode, "SBIN0001234").is_ok());
        for bad in ["HDFC1ABCDEF", "HDF0ABCDEF", "hdfc0abcdef"] {
            let err = step1_with(DraftField::IfscCode, bad).unwrap_err();
            assert_eq!(err.to_string(), "Invalid IFSC code", "ifsc = {bad:?}");
        }
    }

    #[test]
    fn test_non_ascii_digits_rejected() {
        // Devanagari digits are decimal digits to Unicode but not to the backend
        assert!(step1_with(DraftField::Pincode, "५६०००१").is_err());
    }

    #[test]
    fn test_unknown_step_always_valid() {
        let draft = EmployeeDraft::empty();
        assert_eq!(validate_step_on(&draft, 2, today()), Ok(()));
        assert_eq!(validate_step_on(&draft, usize::MAX, today()), Ok(()));
    }

    #[test]
    fn test_step_navigation() {
        assert_eq!(FormStep::PersonalAndJob.next(), Some(FormStep::AddressAndBank));
        assert_eq!(FormStep::AddressAndBank.next(), None);
        assert!(FormStep::AddressAndBank.is_last());
        assert_eq!(FormStep::AddressAndBank.previous(), Some(FormStep::PersonalAndJob));
        assert_eq!(FormStep::from_index(1).map(FormStep::title), Some("Address & Bank Information"));
    }

    #[test]
    fn test_submission_accepts_complete_draft() {
        let ready = validate_submission(&valid_draft()).unwrap();
        assert_eq!(ready.gender, Gender::Female);
        assert_eq!(ready.dob, NaiveDate::from_ymd_opt(1995, 6, 15).unwrap());
        assert_eq!(ready.reporting_manager_id, None);
        assert!(!ready.payload().contains_key("reporting_manager_id"));
    }

    #[test]
    fn test_submission_requires_fields_in_form_order() {
        let draft = valid_draft()
            .with(DraftField::City, "")
            .with(DraftField::LastName, "  ");
        let err = validate_submission(&draft).unwrap_err();
        assert_eq!(err.field, DraftField::LastName);
        assert_eq!(err.to_string(), "Last Name is required");
    }

    #[test]
    fn test_submission_allows_optional_fields_empty() {
        let draft = valid_draft()
            .with(DraftField::AddressLine2, "")
            .with(DraftField::ReportingManagerId, "");
        assert!(validate_submission(&draft).is_ok());
    }

    #[test]
    fn test_submission_rejects_bad_email_and_gender() {
        let err = validate_submission(&valid_draft().with(DraftField::Email, "asha@")).unwrap_err();
        assert_eq!(err.field, DraftField::Email);
        assert_eq!(err.to_string(), "Invalid email address");

        let err = validate_submission(&valid_draft().with(DraftField::Gender, "F")).unwrap_err();
        assert_eq!(err.field, DraftField::Gender);
    }

    #[test]
    fn test_submission_sends_trimmed_email() {
        let ready =
            validate_submission(&valid_draft().with(DraftField::Email, "  asha.rao@example.com ")).unwrap();
        assert_eq!(ready.email, "asha.rao@example.com");
        assert_eq!(ready.payload().get("email"), Some("asha.rao@example.com"));
    }

    #[test]
    fn test_submission_keeps_manager_when_set() {
        let ready =
            validate_submission(&valid_draft().with(DraftField::ReportingManagerId, "17")).unwrap();
        assert_eq!(ready.reporting_manager_id.as_deref(), Some("17"));
        assert_eq!(ready.payload().get("reporting_manager_id"), Some("17"));
    }

    #[test]
    fn test_pincode_correction_scenario() {
        let draft = valid_draft().with(DraftField::Pincode, "123");
        assert!(step0(&draft).is_ok());
        let err = step1(&draft).unwrap_err();
        assert_eq!(err.field, DraftField::Pincode);
        assert!(err.to_string().to_lowercase().contains("pincode"));

        let draft = draft.with(DraftField::Pincode, "560001");
        assert_eq!(step1(&draft), Ok(()));

        let payload = normalize(&draft);
        assert!(!payload.contains_key("employee_id"));
        assert_eq!(payload.get("pincode"), Some("560001"));
    }
}
