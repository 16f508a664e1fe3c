//! Response-shape tests: every rejection renders the problem-details body
//! with a machine-readable code and a trace id.

use actix_web::{test, web, App, HttpResponse};
use backend::errors::domain::{ConflictKind, DomainError, ValidationKind};
use backend::{AppError, ErrorCode};

async fn must_follow_suit() -> Result<HttpResponse, AppError> {
    Err(DomainError::validation(
        ValidationKind::MustFollowSuit,
        "Seat 2 holds hearts and must follow",
    )
    .into())
}

async fn stale_version() -> Result<HttpResponse, AppError> {
    Err(DomainError::conflict(ConflictKind::OptimisticLock, "Table was modified").into())
}

async fn missing_table() -> Result<HttpResponse, AppError> {
    Err(AppError::not_found(
        ErrorCode::TableNotFound,
        "Table 42 not found",
    ))
}

fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .route("/_test/follow", web::get().to(must_follow_suit))
        .route("/_test/stale", web::get().to(stale_version))
        .route("/_test/missing", web::get().to(missing_table))
}

#[actix_web::test]
async fn gameplay_rejection_renders_problem_details() {
    let app = test::init_service(test_app()).await;

    let req = test::TestRequest::get().uri("/_test/follow").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 422);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "MUST_FOLLOW_SUIT");
    assert_eq!(body["status"], 422);
    assert_eq!(body["title"], "Must Follow Suit");
    assert!(body["detail"].as_str().unwrap().contains("hearts"));
    assert!(!body["trace_id"].as_str().unwrap().is_empty());
    assert!(body["type"]
        .as_str()
        .unwrap()
        .ends_with("MUST_FOLLOW_SUIT"));
}

#[actix_web::test]
async fn stale_version_renders_conflict() {
    let app = test::init_service(test_app()).await;

    let req = test::TestRequest::get().uri("/_test/stale").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 409);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "OPTIMISTIC_LOCK");
}

#[actix_web::test]
async fn missing_table_renders_404() {
    let app = test::init_service(test_app()).await;

    let req = test::TestRequest::get().uri("/_test/missing").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "TABLE_NOT_FOUND");
}
