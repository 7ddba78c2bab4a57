//! Master data gateway
//!
//! Reference lists for the form's dropdowns. The seven independent lists
//! and the manager candidates are loaded together when a form opens;
//! designations and states are fetched per parent selection.

use std::sync::Arc;

use shared::{
    ApiEnvelope, DependentKind, DependentRequest, ManagerCandidate, MasterDataSet, MasterItem,
    MasterList,
};

use crate::employees::list_records;
use crate::{ClientError, ClientResult, HttpClient};

/// Master data gateway
#[derive(Debug)]
pub struct MasterDataGateway<C> {
    client: Arc<C>,
}

impl<C> Clone for MasterDataGateway<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<C: HttpClient> MasterDataGateway<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Load one independent list
    pub async fn fetch_list(&self, list: MasterList) -> ClientResult<Vec<MasterItem>> {
        let envelope: ApiEnvelope<Vec<MasterItem>> = self.client.get(list.path()).await?;
        envelope
            .data
            .ok_or_else(|| ClientError::InvalidResponse(format!("missing data for {}", list.path())))
    }

    /// Existing employees that can be picked as reporting manager
    pub async fn fetch_managers(&self) -> ClientResult<Vec<ManagerCandidate>> {
        let records = list_records(self.client.as_ref()).await?;
        Ok(records.iter().filter_map(ManagerCandidate::from_record).collect())
    }

    /// Everything a form needs on open, requested concurrently
    ///
    /// Fails with the first error; no partial set is returned.
    pub async fn fetch_all(&self) -> ClientResult<MasterDataSet> {
        let (departments, employment_types, shifts, locations, roles, countries, banks, managers) = futures::try_join!(
            self.fetch_list(MasterList::Departments),
            self.fetch_list(MasterList::EmploymentTypes),
            self.fetch_list(MasterList::Shifts),
            self.fetch_list(MasterList::Locations),
            self.fetch_list(MasterList::Roles),
            self.fetch_list(MasterList::Countries),
            self.fetch_list(MasterList::Banks),
            self.fetch_managers(),
        )?;

        tracing::info!(
            departments = departments.len(),
            countries = countries.len(),
            managers = managers.len(),
            "Master data loaded"
        );

        Ok(MasterDataSet {
            departments,
            employment_types,
            shifts,
            locations,
            roles,
            countries,
            banks,
            managers,
        })
    }

    /// `GET /masters/designations?department=<id>`
    pub async fn fetch_designations(&self, department_id: &str) -> ClientResult<Vec<MasterItem>> {
        self.fetch_scoped(DependentKind::Designations, department_id).await
    }

    /// `GET /masters/states?country=<id>`
    pub async fn fetch_states(&self, country_id: &str) -> ClientResult<Vec<MasterItem>> {
        self.fetch_scoped(DependentKind::States, country_id).await
    }

    /// Perform a fetch issued by the form state
    pub async fn fetch_dependent(&self, request: &DependentRequest) -> ClientResult<Vec<MasterItem>> {
        self.fetch_scoped(request.kind, &request.parent_id).await
    }

    async fn fetch_scoped(&self, kind: DependentKind, parent_id: &str) -> ClientResult<Vec<MasterItem>> {
        let envelope: ApiEnvelope<Vec<MasterItem>> = self
            .client
            .get_with_query(kind.path(), &[(kind.query_key(), parent_id)])
            .await?;
        envelope
            .data
            .ok_or_else(|| ClientError::InvalidResponse(format!("missing data for {}", kind.path())))
    }
}
