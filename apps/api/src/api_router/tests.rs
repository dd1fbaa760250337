use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use fleetdesk_application::PasswordHasher;
use fleetdesk_core::{CompanyId, UserId};
use fleetdesk_infrastructure::{Argon2PasswordHasher, InMemoryStore, NewUserAccount};
use serde_json::{Value, json};
use tower::ServiceExt;

use super::build_router;
use crate::api_services::{build_app_state, in_memory_ports};
use crate::state::AppState;

const PASSWORD: &str = "correct horse battery";
const ROOT_EMAIL: &str = "root@fleetdesk.test";

struct TestApp {
    store: Arc<InMemoryStore>,
    state: AppState,
    router: Router,
    password_hash: String,
}

impl TestApp {
    async fn new() -> Self {
        let store = Arc::new(InMemoryStore::seeded().unwrap_or_else(|_| unreachable!()));
        let state = build_app_state(in_memory_ports(&store), chrono::Duration::hours(1), None);
        let router = build_router(state.clone(), "http://localhost:3000")
            .unwrap_or_else(|_| unreachable!());
        let password_hash = Argon2PasswordHasher::new()
            .hash_password(PASSWORD)
            .unwrap_or_else(|_| unreachable!());

        Self {
            store,
            state,
            router,
            password_hash,
        }
    }

    async fn company(&self, name: &str) -> CompanyId {
        self.store.insert_company(name).await
    }

    async fn user(&self, company_id: CompanyId, email: &str, role: &str) -> UserId {
        self.store
            .insert_user(NewUserAccount {
                name: email.to_owned(),
                email: email.to_owned(),
                password_hash: self.password_hash.clone(),
                company_id,
                role: role.to_owned(),
            })
            .await
            .unwrap_or_else(|_| unreachable!())
    }

    async fn super_admin_token(&self) -> String {
        self.state
            .user_service
            .bootstrap_super_admin(ROOT_EMAIL, "Root", PASSWORD)
            .await
            .unwrap_or_else(|_| unreachable!());
        self.login(ROOT_EMAIL).await
    }

    async fn login(&self, email: &str) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/auth/login",
                None,
                Some(json!({ "email": email, "password": PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        assert_eq!(body["token_type"], "Bearer");

        body["token"].as_str().unwrap_or_default().to_owned()
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let body = body.map(|value| value.to_string());
        self.send_raw(method, uri, token, body).await
    }

    async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<String>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body)),
            None => builder.body(Body::empty()),
        }
        .unwrap_or_else(|_| unreachable!());

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|_| unreachable!());
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_else(|_| unreachable!());
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, value)
    }
}

fn names(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(ToOwned::to_owned))
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn health_reports_disabled_database_without_a_pool() {
    let app = TestApp::new().await;

    let (status, body) = app.send(Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["postgres"]["status"], "disabled");
}

#[tokio::test]
async fn login_then_read_own_identity_and_permissions() {
    let app = TestApp::new().await;
    let company_id = app.company("North Fleet").await;
    app.user(company_id, "Agent@North.test", "rental_agent").await;

    let token = app.login("agent@north.test").await;

    let (status, me) = app.send(Method::GET, "/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "agent@north.test");
    assert_eq!(me["role"], "rental_agent");
    assert_eq!(me["company_id"], company_id.to_string());

    let (status, permissions) = app
        .send(Method::GET, "/me/permissions", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        names(&permissions),
        vec!["create_rentals", "view_rentals", "view_vehicles"]
    );
}

#[tokio::test]
async fn wrong_password_and_missing_token_are_unauthorized() {
    let app = TestApp::new().await;
    let company_id = app.company("North Fleet").await;
    app.user(company_id, "agent@north.test", "rental_agent").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": "agent@north.test", "password": "not the password" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["message"].is_string());

    let (status, _) = app.send(Method::GET, "/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(Method::GET, "/me", Some("not-a-real-token"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_revokes_the_presented_token() {
    let app = TestApp::new().await;
    let company_id = app.company("North Fleet").await;
    app.user(company_id, "agent@north.test", "rental_agent").await;
    let token = app.login("agent@north.test").await;

    let (status, _) = app
        .send(Method::POST, "/auth/logout", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.send(Method::GET, "/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_json_is_a_validation_error() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send_raw(
            Method::POST,
            "/auth/login",
            None,
            Some("{\"email\": ".to_owned()),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(
        body["message"]
            .as_str()
            .is_some_and(|message| message.contains("invalid request body"))
    );
}

#[tokio::test]
async fn tiers_guard_admin_routes() {
    let app = TestApp::new().await;
    let company_id = app.company("North Fleet").await;
    app.user(company_id, "admin@north.test", "company_admin").await;
    app.user(company_id, "mechanic@north.test", "mechanic").await;
    let admin = app.login("admin@north.test").await;
    let mechanic = app.login("mechanic@north.test").await;

    let (status, _) = app.send(Method::GET, "/users", Some(&mechanic), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, roles) = app.send(Method::GET, "/roles", Some(&mechanic), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(roles.as_array().map(Vec::len), Some(5));

    let (status, _) = app.send(Method::GET, "/users", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .send(
            Method::PUT,
            "/roles/rental_agent/permissions",
            Some(&admin),
            Some(json!(["view_vehicles"])),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn super_admin_replaces_role_defaults_but_not_system_roles() {
    let app = TestApp::new().await;
    let root = app.super_admin_token().await;

    let (status, role) = app
        .send(
            Method::PUT,
            "/roles/rental_agent/permissions",
            Some(&root),
            Some(json!(["view_rentals", "edit_rentals", "view_rentals"])),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&role["permissions"]), vec!["edit_rentals", "view_rentals"]);

    let (status, role) = app
        .send(Method::GET, "/roles/rental_agent", Some(&root), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&role["permissions"]), vec!["edit_rentals", "view_rentals"]);

    let (status, _) = app
        .send(
            Method::PUT,
            "/roles/employee/permissions",
            Some(&root),
            Some(json!(["view_vehicles"])),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(
            Method::PUT,
            "/roles/rental_agent/permissions",
            Some(&root),
            Some(json!(["fly_helicopters"])),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(Method::GET, "/roles/astronaut", Some(&root), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn override_beats_role_default_and_notifies_company_admins() {
    let app = TestApp::new().await;
    let root = app.super_admin_token().await;
    let company_id = app.company("North Fleet").await;
    app.user(company_id, "admin@north.test", "company_admin").await;
    let agent_id = app.user(company_id, "agent@north.test", "rental_agent").await;

    let (status, breakdown) = app
        .send(
            Method::PUT,
            &format!("/users/{agent_id}/permissions"),
            Some(&root),
            Some(json!({ "overrides": { "create_rentals": false, "edit_rentals": null } })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let entry = breakdown["permissions"]
        .as_array()
        .and_then(|entries| {
            entries
                .iter()
                .find(|entry| entry["permission"]["name"] == "create_rentals")
        })
        .cloned()
        .unwrap_or(Value::Null);
    assert_eq!(entry["role_default"], true);
    assert_eq!(entry["override_grant"], false);
    assert_eq!(entry["effective"], false);

    let agent = app.login("agent@north.test").await;
    let (_, permissions) = app
        .send(Method::GET, "/me/permissions", Some(&agent), None)
        .await;
    assert_eq!(names(&permissions), vec!["view_rentals", "view_vehicles"]);

    let admin = app.login("admin@north.test").await;
    let (status, notifications) = app
        .send(Method::GET, "/notifications", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(notifications[0]["kind"], "user_permissions_changed");
    assert!(notifications[0]["read_at"].is_null());

    let notification_id = notifications[0]["id"].as_str().unwrap_or_default().to_owned();
    let (status, _) = app
        .send(
            Method::POST,
            &format!("/notifications/{notification_id}/read"),
            Some(&agent),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, read) = app
        .send(
            Method::POST,
            &format!("/notifications/{notification_id}/read"),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(read["read_at"].is_string());
}

#[tokio::test]
async fn company_admin_cannot_write_overrides() {
    let app = TestApp::new().await;
    let company_id = app.company("North Fleet").await;
    app.user(company_id, "admin@north.test", "company_admin").await;
    let agent_id = app.user(company_id, "agent@north.test", "rental_agent").await;
    let admin = app.login("admin@north.test").await;

    let (status, breakdown) = app
        .send(
            Method::GET,
            &format!("/users/{agent_id}/permissions"),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(breakdown["role"], "rental_agent");
    assert_eq!(breakdown["permissions"].as_array().map(Vec::len), Some(20));

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/users/{agent_id}/permissions"),
            Some(&admin),
            Some(json!({ "overrides": { "delete_vehicles": true } })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn deactivated_account_is_rejected_then_logged_out() {
    let app = TestApp::new().await;
    let company_id = app.company("North Fleet").await;
    app.user(company_id, "admin@north.test", "company_admin").await;
    let agent_id = app.user(company_id, "agent@north.test", "rental_agent").await;
    let admin = app.login("admin@north.test").await;
    let agent = app.login("agent@north.test").await;

    let (status, updated) = app
        .send(
            Method::PATCH,
            &format!("/users/{agent_id}/status"),
            Some(&admin),
            Some(json!({ "is_active": false })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["is_active"], false);

    let (status, _) = app.send(Method::GET, "/me", Some(&agent), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.send(Method::GET, "/me", Some(&agent), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, notifications) = app
        .send(Method::GET, "/notifications", Some(&admin), None)
        .await;
    assert_eq!(notifications[0]["kind"], "user_deactivated");
}

#[tokio::test]
async fn disabled_company_locks_out_its_users() {
    let app = TestApp::new().await;
    let company_id = app.company("North Fleet").await;
    app.user(company_id, "agent@north.test", "rental_agent").await;
    let agent = app.login("agent@north.test").await;

    app.store
        .set_company_active(company_id, false)
        .await
        .unwrap_or_else(|_| unreachable!());

    let (status, _) = app.send(Method::GET, "/me", Some(&agent), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn company_admins_only_see_their_own_tenant() {
    let app = TestApp::new().await;
    let root = app.super_admin_token().await;
    let north = app.company("North Fleet").await;
    let south = app.company("South Fleet").await;
    app.user(north, "admin@north.test", "company_admin").await;
    app.user(north, "agent@north.test", "rental_agent").await;
    let south_mechanic = app.user(south, "mechanic@south.test", "mechanic").await;
    let admin = app.login("admin@north.test").await;

    let (_, users) = app.send(Method::GET, "/users", Some(&admin), None).await;
    let emails: Vec<&str> = users
        .as_array()
        .map(|rows| rows.iter().filter_map(|row| row["email"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(emails.len(), 2);
    assert!(emails.iter().all(|email| email.ends_with("@north.test")));

    let (status, _) = app
        .send(
            Method::GET,
            &format!("/users/{south_mechanic}/permissions"),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(
            Method::PATCH,
            &format!("/users/{south_mechanic}/status"),
            Some(&admin),
            Some(json!({ "is_active": false })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, companies) = app.send(Method::GET, "/companies", Some(&admin), None).await;
    assert_eq!(companies.as_array().map(Vec::len), Some(1));
    assert_eq!(companies[0]["name"], "North Fleet");

    let (_, companies) = app.send(Method::GET, "/companies", Some(&root), None).await;
    assert_eq!(companies.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn malformed_path_ids_are_not_found_with_a_json_message() {
    let app = TestApp::new().await;
    let root = app.super_admin_token().await;

    let requests = [
        (Method::GET, "/users/not-a-uuid/permissions", None),
        (
            Method::PATCH,
            "/users/not-a-uuid/status",
            Some(json!({ "is_active": false })),
        ),
        (Method::POST, "/notifications/not-a-uuid/read", None),
    ];

    for (method, uri, body) in requests {
        let (status, body) = app.send(method, uri, Some(&root), body).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert!(
            body["message"]
                .as_str()
                .is_some_and(|message| message.starts_with("not found: ")),
            "{uri}: {body}"
        );
    }
}
