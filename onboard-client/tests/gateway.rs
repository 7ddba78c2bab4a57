//! Master data gateway and employee service against an in-process backend

mod support;

use std::sync::Arc;

use onboard_client::{ClientConfig, ClientError, EmployeeService, MasterDataGateway, NetworkHttpClient};
use shared::{DependentKind, DependentRequest, Payload};
use support::{Backend, object};

async fn connect(backend: &Backend) -> Arc<NetworkHttpClient> {
    let base_url = backend.spawn().await;
    let config = ClientConfig::new(base_url).with_timeout(5);
    Arc::new(config.build_http_client().unwrap())
}

#[tokio::test]
async fn test_fetch_all_loads_every_list() {
    let backend = Backend::seeded();
    let gateway = MasterDataGateway::new(connect(&backend).await);

    let masters = gateway.fetch_all().await.unwrap();
    assert_eq!(masters.departments.len(), 2);
    assert_eq!(masters.employment_types.len(), 2);
    assert_eq!(masters.shifts.len(), 2);
    assert_eq!(masters.locations.len(), 1);
    assert_eq!(masters.roles.len(), 2);
    assert_eq!(masters.countries.len(), 2);
    assert_eq!(masters.banks[1].id, "SBI", "string ids are kept as is");
    assert_eq!(masters.banks[0].id, "1", "numeric ids become text");

    assert_eq!(masters.managers.len(), 1);
    assert_eq!(masters.managers[0].employee_id, "1");
    assert_eq!(masters.managers[0].display_name(), "Meera Iyer");
}

#[tokio::test]
async fn test_fetch_all_fails_when_one_list_fails() {
    let backend = Backend::seeded();
    backend.fail_list("shifts");
    let gateway = MasterDataGateway::new(connect(&backend).await);

    let err = gateway.fetch_all().await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 500, .. }));
    assert_eq!(err.to_string(), "API error: 500 - database unavailable");
}

#[tokio::test]
async fn test_dependent_lists_are_scoped_by_parent() {
    let backend = Backend::seeded();
    let gateway = MasterDataGateway::new(connect(&backend).await);

    let engineering = gateway.fetch_designations("1").await.unwrap();
    let names: Vec<_> = engineering.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Engineer", "Team Lead"]);

    let india = gateway.fetch_states("1").await.unwrap();
    assert_eq!(india.len(), 2);
    assert!(gateway.fetch_states("99").await.unwrap().is_empty());

    let request = DependentRequest {
        kind: DependentKind::Designations,
        parent_id: "2".to_string(),
        generation: 1,
    };
    let finance = gateway.fetch_dependent(&request).await.unwrap();
    assert_eq!(finance[0].name, "Accountant");
}

#[tokio::test]
async fn test_parent_id_is_url_encoded() {
    let backend = Backend::seeded();
    let gateway = MasterDataGateway::new(connect(&backend).await);

    let states = gateway.fetch_states("1&department=2 x").await.unwrap();
    assert!(states.is_empty());
    assert_eq!(backend.state().parent_queries, vec!["1&department=2 x".to_string()]);
}

#[tokio::test]
async fn test_employee_lifecycle() {
    let backend = Backend::seeded();
    let service = EmployeeService::new(connect(&backend).await);

    let payload = Payload::from_map(object(serde_json::json!({
        "first_name": "Asha",
        "last_name": "Rao",
        "email": "asha@example.com",
    })));
    let created = service.create(&payload).await.unwrap();
    let id = created.id().unwrap();
    assert_eq!(id, "2");

    let listed = service.list().await.unwrap();
    assert_eq!(listed.len(), 2);

    let fetched = service.get(&id).await.unwrap();
    assert_eq!(fetched.first_name(), "Asha");

    let change = Payload::from_map(object(serde_json::json!({ "last_name": "Rao-Menon" })));
    let updated = service.update(&id, &change).await.unwrap();
    assert_eq!(updated.last_name(), "Rao-Menon");
    assert_eq!(updated.first_name(), "Asha");

    service.delete(&id).await.unwrap();
    let err = service.get(&id).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "API error: 404 - Employee not found");
}

#[tokio::test]
async fn test_missing_employee_on_update_and_delete() {
    let backend = Backend::seeded();
    let service = EmployeeService::new(connect(&backend).await);
    let payload = Payload::from_map(object(serde_json::json!({ "city": "Pune" })));

    assert!(service.update("404", &payload).await.unwrap_err().is_not_found());
    assert!(service.delete("404").await.unwrap_err().is_not_found());
    assert!(backend.state().employees.contains_key(&1));
}

#[tokio::test]
async fn test_network_failure_is_http_error() {
    // Nothing listens on the discard port
    let config = ClientConfig::new("http://127.0.0.1:9/api").with_timeout(2);
    let service = EmployeeService::new(Arc::new(config.build_http_client().unwrap()));

    let err = service.list().await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
}
