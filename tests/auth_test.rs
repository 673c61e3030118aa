//! End-to-end auth tests over the real router: login failure modes and the
//! bearer gate on admin routes. The S3 client is built offline and never
//! touched by these paths.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
};
use sqlx::PgPool;
use tower::ServiceExt;

use loopz_back::{queries::user_queries, routes, AppState};

fn test_app(pool: PgPool) -> axum::Router {
    let s3_config = aws_sdk_s3::Config::builder()
        .behavior_version(aws_sdk_s3::config::BehaviorVersion::latest())
        .build();

    let state = AppState {
        db: pool,
        s3_client: aws_sdk_s3::Client::from_conf(s3_config),
        s3_bucket: "test-bucket".to_string(),
        assets_url: "https://assets.test".to_string(),
    };

    routes::create_router().with_state(state)
}

async fn seed_admin(pool: &PgPool) {
    let hash = bcrypt::hash("secreto123", 4).unwrap();
    user_queries::create_admin(pool, "admin@inears.com", "Admin", &hash)
        .await
        .unwrap();
}

fn login_request(email: &str, password: &str) -> Request<Body> {
    let body = serde_json::json!({ "email": email, "password": password });

    Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[sqlx::test]
async fn login_failures_are_indistinguishable(pool: PgPool) {
    std::env::set_var("JWT_SECRET", "test-secret");
    seed_admin(&pool).await;
    let app = test_app(pool);

    let unknown_email = app
        .clone()
        .oneshot(login_request("nadie@inears.com", "secreto123"))
        .await
        .unwrap();
    let wrong_password = app
        .oneshot(login_request("admin@inears.com", "incorrecta"))
        .await
        .unwrap();

    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);

    // identical bodies, so callers cannot enumerate accounts
    let unknown_body = to_bytes(unknown_email.into_body(), 1024).await.unwrap();
    let wrong_body = to_bytes(wrong_password.into_body(), 1024).await.unwrap();
    assert_eq!(unknown_body, wrong_body);
}

#[sqlx::test]
async fn valid_login_opens_admin_routes(pool: PgPool) {
    std::env::set_var("JWT_SECRET", "test-secret");
    seed_admin(&pool).await;
    let app = test_app(pool);

    let response = app
        .clone()
        .oneshot(login_request("admin@inears.com", "secreto123"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value =
        serde_json::from_slice(&to_bytes(response.into_body(), 4096).await.unwrap()).unwrap();
    let token = body["token"].as_str().unwrap().to_string();

    let stats = Request::builder()
        .method("GET")
        .uri("/api/admin/stats")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(stats).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bare = Request::builder()
        .method("GET")
        .uri("/api/admin/stats")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(bare).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
