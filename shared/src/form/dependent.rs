//! Dependent option lists
//!
//! Designations depend on the selected department and states on the
//! selected country. Each list is derived state: a function of the current
//! parent id, replaced wholesale whenever the parent changes.
//!
//! Fetches for a list may overlap when the user changes the parent quickly.
//! Every request carries the list's generation at the time it was issued;
//! a response is applied only if no newer request has been issued since, so
//! a late answer for a stale parent can never overwrite a newer selection.

use crate::models::{DraftField, MasterItem};

/// Which dependent list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependentKind {
    Designations,
    States,
}

impl DependentKind {
    pub const ALL: [DependentKind; 2] = [Self::Designations, Self::States];

    /// Field whose value scopes the list
    pub const fn parent_field(self) -> DraftField {
        match self {
            Self::Designations => DraftField::DepartmentId,
            Self::States => DraftField::CountryId,
        }
    }

    /// Field that picks from the list
    pub const fn child_field(self) -> DraftField {
        match self {
            Self::Designations => DraftField::DesignationId,
            Self::States => DraftField::StateId,
        }
    }

    /// The list scoped by `field`, if any
    pub fn for_parent(field: DraftField) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.parent_field() == field)
    }

    /// Endpoint path relative to the API base
    pub const fn path(self) -> &'static str {
        match self {
            Self::Designations => "masters/designations",
            Self::States => "masters/states",
        }
    }

    /// Query parameter carrying the parent id
    pub const fn query_key(self) -> &'static str {
        match self {
            Self::Designations => "department",
            Self::States => "country",
        }
    }
}

/// A fetch the caller must perform for a dependent list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependentRequest {
    pub kind: DependentKind,
    pub parent_id: String,
    pub generation: u64,
}

/// Option list scoped by a parent selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependentList {
    kind: DependentKind,
    parent: Option<String>,
    generation: u64,
    pending: bool,
    items: Vec<MasterItem>,
}

impl DependentList {
    pub fn new(kind: DependentKind) -> Self {
        Self {
            kind,
            parent: None,
            generation: 0,
            pending: false,
            items: Vec::new(),
        }
    }

    pub fn kind(&self) -> DependentKind {
        self.kind
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// A request has been issued and not yet answered
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn items(&self) -> &[MasterItem] {
        &self.items
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Point the list at a new parent
    ///
    /// Previous options are discarded immediately and every outstanding
    /// request becomes stale. Returns the fetch to perform, or `None` when
    /// the parent was cleared (the list then stays empty).
    pub fn request(&mut self, parent_id: &str) -> Option<DependentRequest> {
        self.generation += 1;
        self.items.clear();

        let parent_id = parent_id.trim();
        if parent_id.is_empty() {
            self.parent = None;
            self.pending = false;
            return None;
        }

        self.parent = Some(parent_id.to_string());
        self.pending = true;
        Some(DependentRequest {
            kind: self.kind,
            parent_id: parent_id.to_string(),
            generation: self.generation,
        })
    }

    /// Whether a response to `request` would still be applied
    pub fn is_current(&self, request: &DependentRequest) -> bool {
        request.kind == self.kind && request.generation == self.generation
    }

    /// Replace the options with a fetch result
    ///
    /// Returns `false`, leaving the list untouched, when the request has been
    /// superseded.
    pub fn apply(&mut self, request: &DependentRequest, items: Vec<MasterItem>) -> bool {
        if !self.is_current(request) {
            tracing::debug!(
                kind = ?request.kind,
                parent = %request.parent_id,
                stale = request.generation,
                current = self.generation,
                "Discarding superseded dependent list response"
            );
            return false;
        }
        self.items = items;
        self.pending = false;
        true
    }
}
