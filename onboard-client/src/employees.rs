//! Employee record service
//!
//! CRUD over `employees` and `employees/:id`. Bodies are normalized
//! [`Payload`]s; responses are `{ "data": ... }` envelopes.

use std::sync::Arc;

use serde_json::Value;
use shared::{ApiEnvelope, EmployeeRecord, Payload};

use crate::{ClientError, ClientResult, HttpClient};

const EMPLOYEES_PATH: &str = "employees";

/// Employee record service
#[derive(Debug)]
pub struct EmployeeService<C> {
    client: Arc<C>,
}

impl<C> Clone for EmployeeService<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<C: HttpClient> EmployeeService<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// `GET /employees`; a missing `data` is an empty list
    pub async fn list(&self) -> ClientResult<Vec<EmployeeRecord>> {
        list_records(self.client.as_ref()).await
    }

    /// `GET /employees/:id`
    pub async fn get(&self, id: &str) -> ClientResult<EmployeeRecord> {
        let path = record_path(id)?;
        let envelope: ApiEnvelope<EmployeeRecord> = self.client.get(&path).await?;
        envelope.data.ok_or_else(|| ClientError::NotFound {
            body: format!("employee {} not found", id.trim()),
        })
    }

    /// `POST /employees`
    ///
    /// Returns the stored record when the backend echoes it, otherwise an
    /// empty record.
    pub async fn create(&self, payload: &Payload) -> ClientResult<EmployeeRecord> {
        let envelope: Option<ApiEnvelope<EmployeeRecord>> =
            self.client.post(EMPLOYEES_PATH, payload).await?;
        let record = envelope.and_then(|e| e.data).unwrap_or_default();
        tracing::info!(id = ?record.id(), "Employee created");
        Ok(record)
    }

    /// `PUT /employees/:id`
    pub async fn update(&self, id: &str, payload: &Payload) -> ClientResult<EmployeeRecord> {
        let path = record_path(id)?;
        let envelope: Option<ApiEnvelope<EmployeeRecord>> = self.client.put(&path, payload).await?;
        tracing::info!(id = %id.trim(), "Employee updated");
        Ok(envelope.and_then(|e| e.data).unwrap_or_default())
    }

    /// `DELETE /employees/:id`
    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        let path = record_path(id)?;
        let _: Value = self.client.delete(&path).await?;
        tracing::info!(id = %id.trim(), "Employee deleted");
        Ok(())
    }
}

/// Shared with the master data gateway, which derives manager candidates
/// from the same listing
pub(crate) async fn list_records<C: HttpClient>(client: &C) -> ClientResult<Vec<EmployeeRecord>> {
    let envelope: ApiEnvelope<Vec<EmployeeRecord>> = client.get(EMPLOYEES_PATH).await?;
    Ok(envelope.into_data_or_default())
}

/// Ids are opaque path segments; anything that would change the route is refused
fn record_path(id: &str) -> ClientResult<String> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ClientError::InvalidInput("employee id is empty".into()));
    }
    if id.chars().any(|c| matches!(c, '/' | '?' | '#' | '%') || c.is_whitespace()) {
        return Err(ClientError::InvalidInput(format!("invalid employee id: {id}")));
    }
    Ok(format!("{EMPLOYEES_PATH}/{id}"))
}
