use super::*;
use uuid::Uuid;

use crate::state::test_helpers::test_app_state;

#[test]
fn service_error_to_status_maps_not_found() {
    let err = ServiceError::NotFound(Uuid::nil());
    assert_eq!(service_error_to_status(err), StatusCode::NOT_FOUND);
}

#[test]
fn service_error_to_status_maps_invalid() {
    let err = ServiceError::Invalid("bad".into());
    assert_eq!(service_error_to_status(err), StatusCode::BAD_REQUEST);
}

#[test]
fn service_error_to_status_maps_database() {
    let err = ServiceError::Database(sqlx::Error::RowNotFound);
    assert_eq!(service_error_to_status(err), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn healthz_returns_ok() {
    assert_eq!(healthz().await, StatusCode::OK);
}

#[tokio::test]
async fn app_builds_with_lazy_pool() {
    let _router: Router = app(test_app_state());
}
