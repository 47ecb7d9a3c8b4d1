//! End-to-end tests of the entity CRUD surface over the in-memory
//! reference service.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use emr_rest_sdk::identity::{TENANT_ID_HEADER, USER_ID_HEADER};
use emr_rest_sdk::{common_routes, entities, entity_routes, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

fn app() -> Router {
    let registry = entities::in_memory_registry().expect("catalog builds");
    Router::new()
        .merge(common_routes())
        .nest("/api", entity_routes(AppState::new(registry)))
}

fn urlencode(s: &str) -> String {
    let mut out = String::new();
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

fn request(method: &str, uri: &str, tenant: Option<Uuid>, user: Option<Uuid>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = tenant {
        builder = builder.header(TENANT_ID_HEADER, t.to_string());
    }
    if let Some(u) = user {
        builder = builder.header(USER_ID_HEADER, u.to_string());
    }
    match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .expect("request builds"),
        None => builder.body(Body::empty()).expect("request builds"),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.expect("router serves");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

async fn create_generic(app: &Router, tenant: Uuid, user: Option<Uuid>, name: &str) -> Uuid {
    let (status, body) = send(
        app,
        request("POST", "/api/generic", Some(tenant), user, Some(json!({"itemName": name}))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
    Uuid::parse_str(body["id"].as_str().expect("id in body")).expect("id is a uuid")
}

#[tokio::test]
async fn create_returns_id_and_stamps_tenant_and_audit() {
    let app = app();
    let tenant = Uuid::new_v4();
    let user = Uuid::new_v4();
    let id = create_generic(&app, tenant, Some(user), "Gauze").await;

    let (status, body) = send(
        &app,
        request("GET", &format!("/api/generic/{}", id), Some(tenant), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["itemName"], json!("Gauze"));
    assert_eq!(data["tenantId"], json!(tenant.to_string()));
    assert_eq!(data["createdBy"], json!(user.to_string()));
    assert!(data["createdOn"].is_string());
    assert!(data["updatedOn"].is_null());
}

#[tokio::test]
async fn body_supplied_tenant_is_overridden() {
    let app = app();
    let tenant = Uuid::new_v4();
    let spoofed = Uuid::new_v4();
    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/generic",
            Some(tenant),
            None,
            Some(json!({"itemName": "Splint", "tenantId": spoofed.to_string()})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_str().unwrap().to_string();

    let (_, body) = send(
        &app,
        request("GET", &format!("/api/generic/{}", id), Some(tenant), None, None),
    )
    .await;
    assert_eq!(body["data"]["tenantId"], json!(tenant.to_string()));
}

#[tokio::test]
async fn pagination_below_one_is_rejected() {
    let app = app();
    let tenant = Uuid::new_v4();

    let (status, body) = send(
        &app,
        request("GET", "/api/generic?pageNumber=0", Some(tenant), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], json!("bad_request"));
    assert!(body["error"]["message"].as_str().unwrap().contains("pageNumber"));

    let (status, body) = send(
        &app,
        request("GET", "/api/generic?pageSize=0", Some(tenant), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"].as_str().unwrap().contains("pageSize"));
}

#[tokio::test]
async fn list_pages_and_reports_totals() {
    let app = app();
    let tenant = Uuid::new_v4();
    for name in ["a", "b", "c"] {
        create_generic(&app, tenant, None, name).await;
    }

    let (status, body) = send(
        &app,
        request("GET", "/api/generic?pageSize=2", Some(tenant), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["meta"]["totalCount"], json!(3));
    assert_eq!(body["meta"]["pageNumber"], json!(1));
    assert_eq!(body["meta"]["pageSize"], json!(2));

    let (_, body) = send(
        &app,
        request("GET", "/api/generic?pageSize=2&pageNumber=2", Some(tenant), None, None),
    )
    .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["meta"]["pageNumber"], json!(2));
}

#[tokio::test]
async fn list_applies_eq_filters_and_rejects_malformed_json() {
    let app = app();
    let tenant = Uuid::new_v4();
    for (number, status_val) in [("INV-1", "open"), ("INV-2", "paid"), ("INV-3", "open")] {
        let (status, body) = send(
            &app,
            request(
                "POST",
                "/api/invoice",
                Some(tenant),
                None,
                Some(json!({"invoiceNumber": number, "status": status_val})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
    }

    let filters = urlencode(r#"[{"field":"status","operator":"eq","value":"open"}]"#);
    let (status, body) = send(
        &app,
        request(
            "GET",
            &format!("/api/invoice?filters={}", filters),
            Some(tenant),
            None,
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["totalCount"], json!(2));

    let (status, body) = send(
        &app,
        request(
            "GET",
            &format!("/api/invoice?filters={}", urlencode("{not json")),
            Some(tenant),
            None,
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"].as_str().unwrap().contains("filters"));
}

#[tokio::test]
async fn list_supports_search_and_sorting() {
    let app = app();
    let tenant = Uuid::new_v4();
    for name in ["alpha bandage", "gauze roll", "cotton"] {
        create_generic(&app, tenant, None, name).await;
    }

    let (status, body) = send(
        &app,
        request("GET", "/api/generic?searchTerm=GAUZE", Some(tenant), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["totalCount"], json!(1));
    assert_eq!(body["data"][0]["itemName"], json!("gauze roll"));

    let (_, body) = send(
        &app,
        request(
            "GET",
            "/api/generic?sortField=itemName&sortOrder=desc",
            Some(tenant),
            None,
            None,
        ),
    )
    .await;
    assert_eq!(body["data"][0]["itemName"], json!("gauze roll"));
    assert_eq!(body["data"][2]["itemName"], json!("alpha bandage"));
}

#[tokio::test]
async fn put_requires_matching_body_id() {
    let app = app();
    let tenant = Uuid::new_v4();
    let id = create_generic(&app, tenant, None, "Gauze").await;

    let (status, body) = send(
        &app,
        request(
            "PUT",
            &format!("/api/generic/{}", id),
            Some(tenant),
            None,
            Some(json!({"id": Uuid::new_v4().to_string(), "itemName": "Swab"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"].as_str().unwrap().contains("mismatched id"));

    // missing body id is also a mismatch
    let (status, _) = send(
        &app,
        request(
            "PUT",
            &format!("/api/generic/{}", id),
            Some(tenant),
            None,
            Some(json!({"itemName": "Swab"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn put_replaces_record_and_stamps_updated() {
    let app = app();
    let tenant = Uuid::new_v4();
    let user = Uuid::new_v4();
    let id = create_generic(&app, tenant, Some(user), "Gauze").await;

    let (status, body) = send(
        &app,
        request(
            "PUT",
            &format!("/api/generic/{}", id),
            Some(tenant),
            Some(user),
            Some(json!({"id": id.to_string(), "itemName": "Gauze roll"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["itemName"], json!("Gauze roll"));
    assert_eq!(body["data"]["updatedBy"], json!(user.to_string()));
    assert!(body["data"]["updatedOn"].is_string());

    let (_, body) = send(
        &app,
        request("GET", &format!("/api/generic/{}", id), Some(tenant), None, None),
    )
    .await;
    assert_eq!(body["data"]["itemName"], json!("Gauze roll"));
}

#[tokio::test]
async fn put_unknown_id_is_not_found() {
    let app = app();
    let tenant = Uuid::new_v4();
    let id = Uuid::new_v4();
    let (status, _) = send(
        &app,
        request(
            "PUT",
            &format!("/api/generic/{}", id),
            Some(tenant),
            None,
            Some(json!({"id": id.to_string(), "itemName": "x"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patch_rejects_null_and_empty_documents() {
    let app = app();
    let tenant = Uuid::new_v4();
    let id = create_generic(&app, tenant, None, "Gauze").await;

    let (status, body) = send(
        &app,
        request(
            "PATCH",
            &format!("/api/generic/{}", id),
            Some(tenant),
            None,
            Some(Value::Null),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"].as_str().unwrap().contains("patch document"));

    let (status, _) = send(
        &app,
        request(
            "PATCH",
            &format!("/api/generic/{}", id),
            Some(tenant),
            None,
            Some(json!([])),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        request(
            "PATCH",
            &format!("/api/generic/{}", id),
            Some(tenant),
            None,
            Some(json!([{"op": "merge", "path": "/itemName", "value": "x"}])),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"].as_str().unwrap().contains("patch document"));
}

#[tokio::test]
async fn patch_applies_operations() {
    let app = app();
    let tenant = Uuid::new_v4();
    let id = create_generic(&app, tenant, None, "Gauze").await;

    let (status, body) = send(
        &app,
        request(
            "PATCH",
            &format!("/api/generic/{}", id),
            Some(tenant),
            None,
            Some(json!([{"op": "replace", "path": "/itemName", "value": "Gauze roll"}])),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["itemName"], json!("Gauze roll"));

    let (status, _) = send(
        &app,
        request(
            "PATCH",
            &format!("/api/generic/{}", Uuid::new_v4()),
            Some(tenant),
            None,
            Some(json!([{"op": "replace", "path": "/itemName", "value": "x"}])),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_reports_status_then_not_found() {
    let app = app();
    let tenant = Uuid::new_v4();
    let id = create_generic(&app, tenant, None, "Gauze").await;

    let (status, body) = send(
        &app,
        request("DELETE", &format!("/api/generic/{}", id), Some(tenant), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!(true));

    let (status, _) = send(
        &app,
        request("DELETE", &format!("/api/generic/{}", id), Some(tenant), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        request("GET", &format!("/api/generic/{}", id), Some(tenant), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_entity_and_malformed_ids_are_rejected() {
    let app = app();
    let tenant = Uuid::new_v4();

    let (status, body) = send(
        &app,
        request("GET", "/api/timemachine", Some(tenant), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], json!("not_found"));

    let (status, _) = send(
        &app,
        request("GET", "/api/generic/not-a-uuid", Some(tenant), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn tenant_header_is_required_and_must_be_uuid() {
    let app = app();

    let (status, body) = send(&app, request("GET", "/api/generic", None, None, None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"].as_str().unwrap().contains("X-Tenant-ID"));

    let mut req = Request::builder()
        .method("GET")
        .uri("/api/generic")
        .header(TENANT_ID_HEADER, "acme");
    req = req.header(USER_ID_HEADER, Uuid::new_v4().to_string());
    let (status, _) = send(&app, req.body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn declared_field_rules_are_enforced() {
    let app = app();
    let tenant = Uuid::new_v4();

    let (status, body) = send(
        &app,
        request("POST", "/api/invoice", Some(tenant), None, Some(json!({"status": "open"}))),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], json!("validation_error"));
    assert!(body["error"]["message"].as_str().unwrap().contains("invoiceNumber"));

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/invoice",
            Some(tenant),
            None,
            Some(json!({"invoiceNumber": "INV-9"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn tenants_are_isolated_over_http() {
    let app = app();
    let tenant_a = Uuid::new_v4();
    let tenant_b = Uuid::new_v4();
    let id = create_generic(&app, tenant_a, None, "Gauze").await;

    let (status, _) = send(
        &app,
        request("GET", &format!("/api/generic/{}", id), Some(tenant_b), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, request("GET", "/api/generic", Some(tenant_b), None, None)).await;
    assert_eq!(body["meta"]["totalCount"], json!(0));
}

#[tokio::test]
async fn common_routes_respond() {
    let app = app();
    let (status, body) = send(&app, request("GET", "/health", None, None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));

    let (status, body) = send(&app, request("GET", "/version", None, None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], json!("emr-rest-sdk"));
}
