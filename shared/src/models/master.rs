//! Master data Model
//!
//! Read-only reference lists that populate the form's dropdowns.

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

use super::employee::{DraftField, ManagerCandidate};

/// One selectable option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterItem {
    /// Backends send numeric or string ids; both are kept as text
    #[serde(deserialize_with = "id_as_text")]
    pub id: String,
    pub name: String,
}

impl MasterItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Independent reference lists, fetched once when a form loads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MasterList {
    Departments,
    EmploymentTypes,
    Shifts,
    Locations,
    Roles,
    Countries,
    Banks,
}

impl MasterList {
    pub const ALL: [MasterList; 7] = [
        Self::Departments,
        Self::EmploymentTypes,
        Self::Shifts,
        Self::Locations,
        Self::Roles,
        Self::Countries,
        Self::Banks,
    ];

    /// Endpoint path relative to the API base
    pub const fn path(self) -> &'static str {
        match self {
            Self::Departments => "masters/departments",
            Self::EmploymentTypes => "masters/employment-types",
            Self::Shifts => "masters/shifts",
            Self::Locations => "masters/locations",
            Self::Roles => "masters/roles",
            Self::Countries => "masters/countries",
            Self::Banks => "masters/banks",
        }
    }

    /// The list a select field picks from, if it has a fixed one
    pub const fn for_field(field: DraftField) -> Option<MasterList> {
        match field {
            DraftField::DepartmentId => Some(Self::Departments),
            DraftField::EmploymentTypeId => Some(Self::EmploymentTypes),
            DraftField::PreferredShiftId => Some(Self::Shifts),
            DraftField::LocationId => Some(Self::Locations),
            DraftField::RoleId => Some(Self::Roles),
            DraftField::CountryId => Some(Self::Countries),
            DraftField::BankId => Some(Self::Banks),
            _ => None,
        }
    }
}

/// Everything a form needs besides the dependent lists
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MasterDataSet {
    pub departments: Vec<MasterItem>,
    pub employment_types: Vec<MasterItem>,
    pub shifts: Vec<MasterItem>,
    pub locations: Vec<MasterItem>,
    pub roles: Vec<MasterItem>,
    pub countries: Vec<MasterItem>,
    pub banks: Vec<MasterItem>,
    pub managers: Vec<ManagerCandidate>,
}

impl MasterDataSet {
    pub fn list(&self, list: MasterList) -> &[MasterItem] {
        match list {
            MasterList::Departments => &self.departments,
            MasterList::EmploymentTypes => &self.employment_types,
            MasterList::Shifts => &self.shifts,
            MasterList::Locations => &self.locations,
            MasterList::Roles => &self.roles,
            MasterList::Countries => &self.countries,
            MasterList::Banks => &self.banks,
        }
    }

    pub fn manager(&self, employee_id: &str) -> Option<&ManagerCandidate> {
        self.managers.iter().find(|m| m.employee_id == employee_id)
    }
}

/// Look up an option by id
pub fn find_item<'a>(items: &'a [MasterItem], id: &str) -> Option<&'a MasterItem> {
    items.iter().find(|item| item.id == id)
}

fn id_as_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "expected string or numeric id, got {other}"
        ))),
    }
}
