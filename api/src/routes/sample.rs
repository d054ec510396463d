//! Demo endpoints under `/api/v1/samples` exercising the envelope and the
//! error conversion without touching storage.

use std::sync::atomic::{AtomicI64, Ordering};

use actix_web::web;
use chrono::{Duration, Local};
use mall_core::repositories::Storage;
use mall_shared::{ErrorCode, PageResponse, Sort, SortParams};

use crate::dto::sample::{SampleRequest, SampleResponse};
use crate::dto::{validated, PageParams};
use crate::handlers::error::business;
use crate::handlers::{ApiError, ApiResult, AxResponseEntity};
use crate::state::AppState;

const GENERATED_SAMPLES: i64 = 50;
const MAX_SAMPLE_ID: i64 = 100;
const DUPLICATE_NAME: &str = "duplicate";
const SORT_FIELDS: &[&str] = &["id", "name", "createdAt"];

/// Hands out sample ids, starting at 1
#[derive(Debug)]
pub struct SampleIdGenerator(AtomicI64);

impl Default for SampleIdGenerator {
    fn default() -> Self {
        Self(AtomicI64::new(1))
    }
}

impl SampleIdGenerator {
    pub fn next_id(&self) -> i64 {
        self.0.fetch_add(1, Ordering::SeqCst)
    }
}

pub fn configure<S: Storage>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/samples")
            .route("", web::get().to(list))
            .route("", web::post().to(create::<S>))
            .route("/validation-test", web::post().to(validation_test))
            .route("/business-error-test", web::get().to(business_error_test))
            .route("/auth-error-test", web::get().to(auth_error_test))
            .route("/permission-error-test", web::get().to(permission_error_test))
            .route("/server-error-test", web::get().to(server_error_test))
            .route("/{id}", web::get().to(get))
            .route("/{id}", web::put().to(update))
            .route("/{id}", web::delete().to(delete)),
    );
}

fn generate(id: i64) -> SampleResponse {
    SampleResponse {
        id,
        name: format!("샘플 {}", id),
        description: format!("샘플 설명 {}", id),
        status: "ACTIVE".to_string(),
        created_at: (Local::now() - Duration::days(id)).naive_local(),
    }
}

fn ensure_exists(id: i64) -> Result<(), ApiError> {
    if id > MAX_SAMPLE_ID {
        return Err(business(ErrorCode::SampleNotFound, format!("ID: {}", id)));
    }
    Ok(())
}

async fn list(params: web::Query<PageParams>) -> ApiResult<PageResponse<SampleResponse>> {
    let query = params.to_query(SORT_FIELDS, Sort::by(SortParams::asc("id")))?;
    let samples: Vec<SampleResponse> = (1..=GENERATED_SAMPLES).map(generate).collect();
    let page = query.paginate(samples);
    Ok(AxResponseEntity::ok_page(
        PageResponse::from_page(page, |sample| sample),
        "샘플 목록을 성공적으로 조회했습니다.",
    ))
}

async fn get(id: web::Path<i64>) -> ApiResult<SampleResponse> {
    let id = id.into_inner();
    ensure_exists(id)?;
    Ok(AxResponseEntity::ok(generate(id), "샘플 정보를 성공적으로 조회했습니다."))
}

async fn create<S: Storage>(
    state: web::Data<AppState<S>>,
    body: web::Json<SampleRequest>,
) -> ApiResult<SampleResponse> {
    let request = validated(body)?;
    let name = request.name.unwrap_or_default();
    if name == DUPLICATE_NAME {
        return Err(business(ErrorCode::SampleAlreadyExists, format!("이름: {}", name)));
    }
    let sample = SampleResponse {
        id: state.sample_ids.next_id(),
        name,
        description: request.description.unwrap_or_default(),
        status: "ACTIVE".to_string(),
        created_at: Local::now().naive_local(),
    };
    Ok(AxResponseEntity::created(sample, "샘플이 성공적으로 생성되었습니다."))
}

async fn update(id: web::Path<i64>, body: web::Json<SampleRequest>) -> ApiResult<SampleResponse> {
    let id = id.into_inner();
    ensure_exists(id)?;
    let request = validated(body)?;
    let sample = SampleResponse {
        name: request.name.unwrap_or_default(),
        description: request.description.unwrap_or_default(),
        ..generate(id)
    };
    Ok(AxResponseEntity::updated(sample, "샘플 정보가 성공적으로 수정되었습니다."))
}

async fn delete(id: web::Path<i64>) -> ApiResult<()> {
    let id = id.into_inner();
    ensure_exists(id)?;
    Ok(AxResponseEntity::deleted("샘플이 성공적으로 삭제되었습니다."))
}

async fn validation_test(body: web::Json<SampleRequest>) -> ApiResult<()> {
    validated(body)?;
    Ok(AxResponseEntity::ok_message("검증 성공"))
}

async fn business_error_test() -> AxResponseEntity<()> {
    AxResponseEntity::conflict(ErrorCode::BusinessRuleViolation)
}

async fn auth_error_test() -> AxResponseEntity<()> {
    AxResponseEntity::unauthorized(ErrorCode::AuthenticationFailed)
}

async fn permission_error_test() -> AxResponseEntity<()> {
    AxResponseEntity::forbidden(ErrorCode::AccessDenied)
}

async fn server_error_test() -> AxResponseEntity<()> {
    AxResponseEntity::internal_server_error(ErrorCode::InternalServerError)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_start_at_one() {
        let ids = SampleIdGenerator::default();
        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.next_id(), 2);
    }

    #[test]
    fn test_ids_above_limit_are_missing() {
        assert!(ensure_exists(MAX_SAMPLE_ID).is_ok());
        assert!(ensure_exists(MAX_SAMPLE_ID + 1).is_err());
    }
}
