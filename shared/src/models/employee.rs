//! Employee Model
//!
//! The form works on a flat set of string-valued fields. [`DraftField`] is the
//! closed catalogue of those fields, [`EmployeeDraft`] holds one raw value per
//! field, and [`EmployeeRecord`] is whatever the backend returns for an
//! employee (its shape is owned by the server, so it stays a JSON object).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::UnknownField;

/// Keys the backend owns. The client never sends these.
pub const SERVER_MANAGED_FIELDS: [&str; 3] = ["employee_id", "created_at", "updated_at"];

/// Logical group a field is rendered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Personal,
    Job,
    Address,
    Bank,
}

impl Section {
    pub const fn title(self) -> &'static str {
        match self {
            Self::Personal => "Personal Details",
            Self::Job => "Job Details",
            Self::Address => "Address",
            Self::Bank => "Bank & Identity",
        }
    }
}

/// Every field of the employee form, in form order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DraftField {
    // Personal
    FirstName,
    LastName,
    Dob,
    Gender,
    Email,
    MobileNumber,
    // Job
    DepartmentId,
    DesignationId,
    EmploymentTypeId,
    JoiningDate,
    LocationId,
    PreferredShiftId,
    RoleId,
    ReportingManagerId,
    // Address
    AddressLine1,
    AddressLine2,
    CountryId,
    StateId,
    City,
    Pincode,
    // Bank
    PanNumber,
    AadhaarNumber,
    BankId,
    AccountNumber,
    IfscCode,
}

impl DraftField {
    pub const ALL: [DraftField; 25] = [
        Self::FirstName,
        Self::LastName,
        Self::Dob,
        Self::Gender,
        Self::Email,
        Self::MobileNumber,
        Self::DepartmentId,
        Self::DesignationId,
        Self::EmploymentTypeId,
        Self::JoiningDate,
        Self::LocationId,
        Self::PreferredShiftId,
        Self::RoleId,
        Self::ReportingManagerId,
        Self::AddressLine1,
        Self::AddressLine2,
        Self::CountryId,
        Self::StateId,
        Self::City,
        Self::Pincode,
        Self::PanNumber,
        Self::AadhaarNumber,
        Self::BankId,
        Self::AccountNumber,
        Self::IfscCode,
    ];

    /// Wire name used by the backend
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Dob => "dob",
            Self::Gender => "gender",
            Self::Email => "email",
            Self::MobileNumber => "mobile_number",
            Self::DepartmentId => "department_id",
            Self::DesignationId => "designation_id",
            Self::EmploymentTypeId => "employment_type_id",
            Self::JoiningDate => "joining_date",
            Self::LocationId => "location_id",
            Self::PreferredShiftId => "preferred_shift_id",
            Self::RoleId => "role_id",
            Self::ReportingManagerId => "reporting_manager_id",
            Self::AddressLine1 => "address_line1",
            Self::AddressLine2 => "address_line2",
            Self::CountryId => "country_id",
            Self::StateId => "state_id",
            Self::City => "city",
            Self::Pincode => "pincode",
            Self::PanNumber => "pan_number",
            Self::AadhaarNumber => "aadhaar_number",
            Self::BankId => "bank_id",
            Self::AccountNumber => "account_number",
            Self::IfscCode => "ifsc_code",
        }
    }

    /// Human label, as shown next to the input
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Dob => "DOB",
            Self::Gender => "Gender",
            Self::Email => "Email",
            Self::MobileNumber => "Mobile Number",
            Self::DepartmentId => "Department",
            Self::DesignationId => "Designation",
            Self::EmploymentTypeId => "Employment Type",
            Self::JoiningDate => "Joining Date",
            Self::LocationId => "Location",
            Self::PreferredShiftId => "Preferred Shift",
            Self::RoleId => "Role",
            Self::ReportingManagerId => "Reporting Manager",
            Self::AddressLine1 => "Address Line 1",
            Self::AddressLine2 => "Address Line 2",
            Self::CountryId => "Country",
            Self::StateId => "State",
            Self::City => "City",
            Self::Pincode => "Pincode",
            Self::PanNumber => "PAN",
            Self::AadhaarNumber => "Aadhaar",
            Self::BankId => "Bank",
            Self::AccountNumber => "Account Number",
            Self::IfscCode => "IFSC",
        }
    }

    pub const fn section(self) -> Section {
        match self {
            Self::FirstName
            | Self::LastName
            | Self::Dob
            | Self::Gender
            | Self::Email
            | Self::MobileNumber => Section::Personal,
            Self::DepartmentId
            | Self::DesignationId
            | Self::EmploymentTypeId
            | Self::JoiningDate
            | Self::LocationId
            | Self::PreferredShiftId
            | Self::RoleId
            | Self::ReportingManagerId => Section::Job,
            Self::AddressLine1
            | Self::AddressLine2
            | Self::CountryId
            | Self::StateId
            | Self::City
            | Self::Pincode => Section::Address,
            Self::PanNumber
            | Self::AadhaarNumber
            | Self::BankId
            | Self::AccountNumber
            | Self::IfscCode => Section::Bank,
        }
    }

    /// Fields that may stay empty on submission
    pub const fn is_optional(self) -> bool {
        matches!(self, Self::AddressLine2 | Self::ReportingManagerId)
    }

    /// Calendar-date fields
    pub const fn is_date(self) -> bool {
        matches!(self, Self::Dob | Self::JoiningDate)
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DraftField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Gender options offered by the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

impl FromStr for Gender {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Self::Male),
            "Female" => Ok(Self::Female),
            "Other" => Ok(Self::Other),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

/// Employee record as returned by `GET /employees` and `GET /employees/:id`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeRecord(pub Map<String, Value>);

impl EmployeeRecord {
    /// Record identifier, stringified
    pub fn id(&self) -> Option<String> {
        self.0
            .get("employee_id")
            .map(value_to_text)
            .filter(|id| !id.is_empty())
    }

    /// Any field as text (missing and `null` are empty)
    pub fn text(&self, key: &str) -> String {
        self.0.get(key).map(value_to_text).unwrap_or_default()
    }

    pub fn first_name(&self) -> String {
        self.text("first_name")
    }

    pub fn last_name(&self) -> String {
        self.text("last_name")
    }

    pub fn email(&self) -> String {
        self.text("email")
    }

    pub fn department_id(&self) -> String {
        self.text("department_id")
    }
}

impl From<Map<String, Value>> for EmployeeRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Existing employee offered as a reporting manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerCandidate {
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
}

impl ManagerCandidate {
    /// Project a listed record; records without an id cannot be referenced
    pub fn from_record(record: &EmployeeRecord) -> Option<Self> {
        Some(Self {
            employee_id: record.id()?,
            first_name: record.first_name(),
            last_name: record.last_name(),
        })
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// In-progress employee form
///
/// Every field is kept as the raw string the user typed or picked; an empty
/// string means unset. Keys the backend sent that are not form fields
/// (record id, timestamps, server extras) are carried in `extra` as the raw
/// JSON the backend sent, so an edit session hands them back to the
/// normalizer unchanged and the normalizer decides what is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeDraft {
    pub first_name: String,
    pub last_name: String,
    pub dob: String,
    pub gender: String,
    pub email: String,
    pub mobile_number: String,
    pub department_id: String,
    pub designation_id: String,
    pub employment_type_id: String,
    pub joining_date: String,
    pub location_id: String,
    pub preferred_shift_id: String,
    pub role_id: String,
    pub reporting_manager_id: String,
    pub address_line1: String,
    pub address_line2: String,
    pub country_id: String,
    pub state_id: String,
    pub city: String,
    pub pincode: String,
    pub pan_number: String,
    pub aadhaar_number: String,
    pub bank_id: String,
    pub account_number: String,
    pub ifsc_code: String,
    pub extra: BTreeMap<String, Value>,
}

impl EmployeeDraft {
    /// Create-mode initial state: every field empty
    pub fn empty() -> Self {
        Self::default()
    }

    /// Edit-mode initial state built from a fetched record
    ///
    /// Missing and `null` fields become empty strings, ids and other scalars
    /// are stringified, and timestamps in date fields are cut down to their
    /// `YYYY-MM-DD` part.
    pub fn from_record(record: &EmployeeRecord) -> Self {
        let mut draft = Self::empty();
        for (key, value) in &record.0 {
            match key.parse::<DraftField>() {
                Ok(field) if field.is_date() => draft.set(field, calendar_date_part(&value_to_text(value))),
                Ok(field) => draft.set(field, value_to_text(value)),
                Err(_) => {
                    draft.extra.insert(key.clone(), value.clone());
                }
            }
        }
        draft
    }

    pub fn get(&self, field: DraftField) -> &str {
        self.slot(field)
    }

    /// Replace one field in place
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    /// Replace one field, returning the new state
    pub fn with(mut self, field: DraftField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Set a field by wire name
    pub fn set_by_name(&mut self, name: &str, value: impl Into<String>) -> Result<(), UnknownField> {
        let field = name.parse::<DraftField>()?;
        self.set(field, value);
        Ok(())
    }

    /// Whether the field holds nothing but whitespace
    pub fn is_blank(&self, field: DraftField) -> bool {
        self.get(field).trim().is_empty()
    }

    /// Flat mapping of every form field to its text, plus the extras as received
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        for field in DraftField::ALL {
            map.insert(field.as_str().to_string(), Value::String(self.get(field).to_string()));
        }
        for (key, value) in &self.extra {
            map.insert(key.clone(), value.clone());
        }
        map
    }

    fn slot(&self, field: DraftField) -> &String {
        match field {
            DraftField::FirstName => &self.first_name,
            DraftField::LastName => &self.last_name,
            DraftField::Dob => &self.dob,
            DraftField::Gender => &self.gender,
            DraftField::Email => &self.email,
            DraftField::MobileNumber => &self.mobile_number,
            DraftField::DepartmentId => &self.department_id,
            DraftField::DesignationId => &self.designation_id,
            DraftField::EmploymentTypeId => &self.employment_type_id,
            DraftField::JoiningDate => &self.joining_date,
            DraftField::LocationId => &self.location_id,
            DraftField::PreferredShiftId => &self.preferred_shift_id,
            DraftField::RoleId => &self.role_id,
            DraftField::ReportingManagerId => &self.reporting_manager_id,
            DraftField::AddressLine1 => &self.address_line1,
            DraftField::AddressLine2 => &self.address_line2,
            DraftField::CountryId => &self.country_id,
            DraftField::StateId => &self.state_id,
            DraftField::City => &self.city,
            DraftField::Pincode => &self.pincode,
            DraftField::PanNumber => &self.pan_number,
            DraftField::AadhaarNumber => &self.aadhaar_number,
            DraftField::BankId => &self.bank_id,
            DraftField::AccountNumber => &self.account_number,
            DraftField::IfscCode => &self.ifsc_code,
        }
    }

    fn slot_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::FirstName => &mut self.first_name,
            DraftField::LastName => &mut self.last_name,
            DraftField::Dob => &mut self.dob,
            DraftField::Gender => &mut self.gender,
            DraftField::Email => &mut self.email,
            DraftField::MobileNumber => &mut self.mobile_number,
            DraftField::DepartmentId => &mut self.department_id,
            DraftField::DesignationId => &mut self.designation_id,
            DraftField::EmploymentTypeId => &mut self.employment_type_id,
            DraftField::JoiningDate => &mut self.joining_date,
            DraftField::LocationId => &mut self.location_id,
            DraftField::PreferredShiftId => &mut self.preferred_shift_id,
            DraftField::RoleId => &mut self.role_id,
            DraftField::ReportingManagerId => &mut self.reporting_manager_id,
            DraftField::AddressLine1 => &mut self.address_line1,
            DraftField::AddressLine2 => &mut self.address_line2,
            DraftField::CountryId => &mut self.country_id,
            DraftField::StateId => &mut self.state_id,
            DraftField::City => &mut self.city,
            DraftField::Pincode => &mut self.pincode,
            DraftField::PanNumber => &mut self.pan_number,
            DraftField::AadhaarNumber => &mut self.aadhaar_number,
            DraftField::BankId => &mut self.bank_id,
            DraftField::AccountNumber => &mut self.account_number,
            DraftField::IfscCode => &mut self.ifsc_code,
        }
    }
}

/// Text form of a JSON scalar as a form input would hold it
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// `1990-05-01T00:00:00.000Z` -> `1990-05-01`; anything else is returned as is
fn calendar_date_part(text: &str) -> String {
    if text.len() > 10
        && let Some(prefix) = text.get(..10)
        && text[10..].starts_with(['T', ' '])
        && NaiveDate::parse_from_str(prefix, "%Y-%m-%d").is_ok()
    {
        return prefix.to_string();
    }
    text.to_string()
}
