pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::candidates::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/candidates",
            get(handlers::handle_list_candidates).post(handlers::handle_create_candidate),
        )
        .route(
            "/api/v1/candidates/search",
            get(handlers::handle_search_candidates),
        )
        .route(
            "/api/v1/candidates/:id",
            get(handlers::handle_get_candidate).put(handlers::handle_update_candidate),
        )
        .route(
            "/api/v1/candidates/:id/strength",
            get(handlers::handle_candidate_strength),
        )
        .route(
            "/api/v1/candidates/:id/contact",
            post(handlers::handle_contact_candidate),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{header::CONTENT_TYPE, Method, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::candidates::service::CandidateService;
    use crate::candidates::store::{CandidateRepository, InMemoryRepository, JsonFileRepository};
    use crate::config::{Config, IN_MEMORY_STORAGE};

    fn test_app_with(repo: Arc<dyn CandidateRepository>) -> Router {
        let config = Config {
            storage_path: IN_MEMORY_STORAGE.to_string(),
            simulated_latency: Duration::ZERO,
            contact_delay: Duration::ZERO,
            ..Config::default()
        };
        let candidates =
            CandidateService::new(repo, config.simulated_latency, config.max_profile_strength);
        build_router(AppState { candidates, config })
    }

    fn test_app() -> Router {
        test_app_with(Arc::new(InMemoryRepository::new()))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        app.clone().oneshot(request).await.unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn profile(name: &str, skills: &str) -> Value {
        json!({
            "name": name,
            "skills": skills,
            "domain": "Frontend Development",
            "projects": [{ "id": "1", "name": "Portfolio site" }]
        })
    }

    async fn create(app: &Router, name: &str, skills: &str) -> Value {
        let response = send(app, Method::POST, "/api/v1/candidates", Some(profile(name, skills))).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }

    #[tokio::test]
    async fn test_health() {
        let response = send(&test_app(), Method::GET, "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "skillmatch-api");
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let app = test_app();
        let created = create(&app, "Jane Doe", "React, TypeScript").await;
        assert_eq!(created["message"], "Candidate added successfully!");
        assert_eq!(created["candidate"]["profileStrength"], 3);
        assert_eq!(created["candidate"]["skills"], json!(["React", "TypeScript"]));

        let response = send(&app, Method::GET, "/api/v1/candidates", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let list = body_json(response).await;
        assert_eq!(list.as_array().unwrap().len(), 1);
        assert_eq!(list[0]["name"], "Jane Doe");
        assert_eq!(list[0]["strength"]["percentage"], 30.0);
        assert_eq!(list[0]["strength"]["level"], "intermediate");
    }

    #[tokio::test]
    async fn test_create_rejects_missing_name() {
        let response = send(
            &test_app(),
            Method::POST,
            "/api/v1/candidates",
            Some(profile("  ", "Rust")),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(json["error"]["message"], "Name is required");
    }

    #[tokio::test]
    async fn test_search_by_skill_substring() {
        let app = test_app();
        create(&app, "Ada", "JavaScript, CSS").await;
        create(&app, "Lin", "Python").await;
        create(&app, "Sam", "java").await;

        let response = send(&app, Method::GET, "/api/v1/candidates/search?skill=JAVA", None).await;
        let hits = body_json(response).await;
        let names: Vec<_> = hits
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Ada", "Sam"]);

        let response = send(&app, Method::GET, "/api/v1/candidates/search?skill=", None).await;
        assert_eq!(body_json(response).await.as_array().unwrap().len(), 3);

        let response = send(&app, Method::GET, "/api/v1/candidates?skill=pyth", None).await;
        let hits = body_json(response).await;
        assert_eq!(hits.as_array().unwrap().len(), 1);
        assert_eq!(hits[0]["name"], "Lin");
    }

    #[tokio::test]
    async fn test_update_replaces_profile() {
        let app = test_app();
        let created = create(&app, "Ada", "Rust").await;
        let id = created["candidate"]["id"].as_str().unwrap().to_string();

        let mut edited = profile("Ada Lovelace", "Rust, C, Haskell");
        edited["projects"] = json!([
            { "id": "1", "name": "Analytical engine" },
            { "name": "Notes" }
        ]);
        let response = send(
            &app,
            Method::PUT,
            &format!("/api/v1/candidates/{id}"),
            Some(edited),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Candidate updated successfully!");
        assert_eq!(json["candidate"]["id"], id.as_str());
        assert_eq!(json["candidate"]["profileStrength"], 5);
        assert!(!json["candidate"]["projects"][1]["id"]
            .as_str()
            .unwrap()
            .is_empty());

        let response = send(&app, Method::GET, &format!("/api/v1/candidates/{id}"), None).await;
        assert_eq!(body_json(response).await["name"], "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_update_unknown_is_404() {
        let response = send(
            &test_app(),
            Method::PUT,
            "/api/v1/candidates/does-not-exist",
            Some(profile("Ghost", "Go")),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_strength_endpoint() {
        let app = test_app();
        let created = create(
            &app,
            "Ada",
            "Rust, Go, C, C++, Zig, OCaml, Haskell, Lisp, Prolog, Ada, Fortran",
        )
        .await;
        let id = created["candidate"]["id"].as_str().unwrap();

        let response = send(
            &app,
            Method::GET,
            &format!("/api/v1/candidates/{id}/strength"),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let report = body_json(response).await;
        assert_eq!(report["strength"], 12);
        assert_eq!(report["max_strength"], 10);
        assert_eq!(report["percentage"], 100.0);
        assert_eq!(report["level"], "expert");
    }

    #[tokio::test]
    async fn test_contact_flow() {
        let app = test_app();
        let created = create(&app, "Jane Doe", "Rust").await;
        let id = created["candidate"]["id"].as_str().unwrap();
        let uri = format!("/api/v1/candidates/{id}/contact");

        let bad = json!({
            "recruiter_name": "Sam",
            "recruiter_email": "sam-at-acme",
            "message": "Hello"
        });
        let response = send(&app, Method::POST, &uri, Some(bad)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"]["message"],
            "Please enter a valid email address"
        );

        let missing = json!({ "recruiter_name": "Sam", "recruiter_email": "", "message": "" });
        let response = send(&app, Method::POST, &uri, Some(missing)).await;
        assert_eq!(
            body_json(response).await["error"]["message"],
            "Please fill in all required fields"
        );

        let good = json!({
            "recruiter_name": "Sam",
            "recruiter_email": "sam@acme.io",
            "company": "Acme",
            "message": "Hi Jane, I'm interested in your profile..."
        });
        let response = send(&app, Method::POST, &uri, Some(good)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let receipt = body_json(response).await;
        assert_eq!(receipt["message"], "Your message to Jane Doe has been sent!");
        assert_eq!(receipt["company"], "Acme");
    }

    #[tokio::test]
    async fn test_contact_unknown_candidate() {
        let good = json!({
            "recruiter_name": "Sam",
            "recruiter_email": "sam@acme.io",
            "message": "Hi"
        });
        let response = send(
            &test_app(),
            Method::POST,
            "/api/v1/candidates/123/contact",
            Some(good),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_contact_validates_before_lookup() {
        let bad = json!({
            "recruiter_name": "Sam",
            "recruiter_email": "sam-at-acme",
            "message": "Hi"
        });
        let response = send(
            &test_app(),
            Method::POST,
            "/api/v1/candidates/123/contact",
            Some(bad),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"]["message"],
            "Please enter a valid email address"
        );
    }

    #[tokio::test]
    async fn test_corrupt_storage_surfaces_fetch_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("candidates.json");
        std::fs::write(&path, "[{").unwrap();
        let app = test_app_with(Arc::new(JsonFileRepository::new(&path)));

        let response = send(&app, Method::GET, "/api/v1/candidates", None).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "STORAGE_ERROR");
        assert_eq!(json["error"]["message"], "Failed to fetch candidates");
    }

    #[tokio::test]
    async fn test_file_backed_app_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("candidates.json");

        let app = test_app_with(Arc::new(JsonFileRepository::new(&path)));
        create(&app, "Ada", "Rust").await;

        let reopened = test_app_with(Arc::new(JsonFileRepository::new(&path)));
        let response = send(&reopened, Method::GET, "/api/v1/candidates", None).await;
        let list = body_json(response).await;
        assert_eq!(list[0]["name"], "Ada");
    }
}
