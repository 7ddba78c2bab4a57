//! In-process onboarding backend for integration tests
//!
//! Serves the same routes as the real API from memory on an ephemeral port.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Map, Value, json};

type HandlerResult = Result<Json<Value>, (StatusCode, String)>;

#[derive(Debug, Default)]
pub struct BackendState {
    pub employees: BTreeMap<u64, Map<String, Value>>,
    pub next_id: u64,
    /// Bodies received by POST and PUT, in arrival order
    pub bodies: Vec<Map<String, Value>>,
    /// Raw parent ids received by the dependent list endpoints
    pub parent_queries: Vec<String>,
    /// Master lists that answer 500
    pub failing: HashSet<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Backend {
    state: Arc<Mutex<BackendState>>,
}

impl Backend {
    /// Backend with one existing employee who can be picked as manager
    pub fn seeded() -> Self {
        let backend = Self::default();
        {
            let mut state = backend.state();
            state.next_id = 1;
            state.employees.insert(
                1,
                object(json!({
                    "employee_id": 1,
                    "first_name": "Meera",
                    "last_name": "Iyer",
                    "email": "meera@example.com",
                    "department_id": 1,
                    "created_at": "2025-03-01T09:00:00.000Z"
                })),
            );
        }
        backend
    }

    pub fn state(&self) -> MutexGuard<'_, BackendState> {
        self.state.lock().unwrap()
    }

/// Store a record as if it had been created earlier
    pub fn insert_employee(&self, id: u64, record: Value) {
        let mut state = self.state();
        state.next_id = state.next_id.max(id);
        state.employees.insert(id, object(record));
    }

        pub fn fail_list(&self, list: &str) {
        self.state().failing.insert(list.to_string());
    }

    /// Serve on 127.0.0.1 and return the API root URL
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/api/employees", get(list_employees).post(create_employee))
            .route(
                "/api/employees/{id}",
                get(get_employee).put(update_employee).delete(delete_employee),
            )
            .route("/api/masters/designations", get(designations))
            .route("/api/masters/states", get(states))
            .route("/api/masters/{list}", get(master_list))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/api")
    }
}

pub fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

fn not_found() -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, "Employee not found".to_string())
}

async fn list_employees(State(backend): State<Backend>) -> Json<Value> {
    let state = backend.state();
    let records: Vec<_> = state.employees.values().cloned().collect();
    Json(json!({ "data": records }))
}

async fn create_employee(
    State(backend): State<Backend>,
    Json(body): Json<Map<String, Value>>,
) -> (StatusCode, Json<Value>) {
    let mut state = backend.state();
    state.bodies.push(body.clone());
    state.next_id += 1;
    let id = state.next_id;

    let mut record = body;
    record.insert("employee_id".into(), json!(id));
    record.insert("created_at".into(), json!("2026-10-19T09:00:00.000Z"));
    state.employees.insert(id, record.clone());
    (StatusCode::CREATED, Json(json!({ "data": record })))
}

async fn get_employee(State(backend): State<Backend>, Path(id): Path<u64>) -> HandlerResult {
    let state = backend.state();
    let record = state.employees.get(&id).ok_or_else(not_found)?;
    Ok(Json(json!({ "data": record })))
}

async fn update_employee(
    State(backend): State<Backend>,
    Path(id): Path<u64>,
    Json(body): Json<Map<String, Value>>,
) -> HandlerResult {
    let mut state = backend.state();
    state.bodies.push(body.clone());
    let record = state.employees.get_mut(&id).ok_or_else(not_found)?;
    record.extend(body);
    record.insert("updated_at".into(), json!("2026-10-19T10:00:00.000Z"));
    Ok(Json(json!({ "data": record.clone() })))
}

async fn delete_employee(State(backend): State<Backend>, Path(id): Path<u64>) -> HandlerResult {
    let mut state = backend.state();
    state.employees.remove(&id).ok_or_else(not_found)?;
    Ok(Json(json!({ "message": "Employee deleted" })))
}

async fn master_list(State(backend): State<Backend>, Path(list): Path<String>) -> HandlerResult {
    if backend.state().failing.contains(&list) {
        return Err((StatusCode::INTERNAL_SERVER_ERROR, "database unavailable".to_string()));
    }
    let items = match list.as_str() {
        "departments" => json!([{ "id": 1, "name": "Engineering" }, { "id": 2, "name": "Finance" }]),
        "employment-types" => json!([{ "id": 1, "name": "Full-time" }, { "id": 2, "name": "Contract" }]),
        "shifts" => json!([{ "id": 1, "name": "Day" }, { "id": 2, "name": "Night" }]),
        "locations" => json!([{ "id": 1, "name": "Bengaluru" }]),
        "roles" => json!([{ "id": 1, "name": "Individual Contributor" }, { "id": 2, "name": "Manager" }]),
        "countries" => json!([{ "id": 1, "name": "India" }, { "id": 2, "name": "United States" }]),
        "banks" => json!([{ "id": 1, "name": "HDFC Bank" }, { "id": "SBI", "name": "State Bank of India" }]),
        _ => return Err((StatusCode::NOT_FOUND, format!("unknown master list {list}"))),
    };
    Ok(Json(json!({ "data": items })))
}

#[derive(Deserialize)]
struct DepartmentQuery {
    department: String,
}

async fn designations(State(backend): State<Backend>, Query(query): Query<DepartmentQuery>) -> Json<Value> {
    backend.state().parent_queries.push(query.department.clone());
    let items = match query.department.as_str() {
        "1" => json!([{ "id": 10, "name": "Engineer" }, { "id": 11, "name": "Team Lead" }]),
        "2" => json!([{ "id": 20, "name": "Accountant" }, { "id": 11, "name": "Team Lead" }]),
        _ => json!([]),
    };
    Json(json!({ "data": items }))
}

#[derive(Deserialize)]
struct CountryQuery {
    country: String,
}

async fn states(State(backend): State<Backend>, Query(query): Query<CountryQuery>) -> Json<Value> {
    backend.state().parent_queries.push(query.country.clone());
    let items = match query.country.as_str() {
        "1" => json!([{ "id": 5, "name": "Karnataka" }, { "id": 6, "name": "Maharashtra" }]),
        "2" => json!([{ "id": 7, "name": "California" }]),
        _ => json!([]),
    };
    Json(json!({ "data": items }))
}
