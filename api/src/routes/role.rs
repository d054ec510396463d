//! Role endpoints under `/api/v1/roles`

use actix_web::web;
use mall_core::domain::value_objects::RoleResponse;
use mall_core::repositories::Storage;
use mall_core::services::{default_role_sort, ROLE_SORT_FIELDS};
use mall_shared::PageResponse;

use crate::dto::role::{RoleCreateRequest, RoleUpdateRequest};
use crate::dto::{validated, KeywordParams, PageParams};
use crate::handlers::{ApiResult, AxResponseEntity};
use crate::middleware::CurrentActor;
use crate::state::AppState;

pub fn configure<S: Storage>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/roles")
            .route("", web::post().to(create::<S>))
            .route("", web::get().to(list::<S>))
            .route("/active", web::get().to(list_active::<S>))
            .route("/search", web::get().to(search::<S>))
            .route("/default", web::get().to(get_default::<S>))
            .route("/name/{role_name}", web::get().to(get_by_name::<S>))
            .route("/{id}", web::get().to(get::<S>))
            .route("/{id}", web::put().to(update::<S>))
            .route("/{id}", web::delete().to(delete::<S>))
            .route("/{id}/restore", web::patch().to(restore::<S>))
            .route("/{id}/default", web::put().to(set_default::<S>)),
    );
}

async fn create<S: Storage>(
    state: web::Data<AppState<S>>,
    actor: CurrentActor,
    body: web::Json<RoleCreateRequest>,
) -> ApiResult<RoleResponse> {
    let request = validated(body)?;
    let role = state.role_service.create(actor.context(), request.into()).await?;
    Ok(AxResponseEntity::created(role, "역할이 성공적으로 등록되었습니다."))
}

async fn get<S: Storage>(state: web::Data<AppState<S>>, id: web::Path<i64>) -> ApiResult<RoleResponse> {
    let role = state.role_service.get(id.into_inner()).await?;
    Ok(AxResponseEntity::ok(role, "역할 정보를 성공적으로 조회했습니다."))
}

async fn get_by_name<S: Storage>(
    state: web::Data<AppState<S>>,
    role_name: web::Path<String>,
) -> ApiResult<RoleResponse> {
    let role = state.role_service.get_by_name(&role_name).await?;
    Ok(AxResponseEntity::ok(role, "역할 정보를 성공적으로 조회했습니다."))
}

async fn update<S: Storage>(
    state: web::Data<AppState<S>>,
    actor: CurrentActor,
    id: web::Path<i64>,
    body: web::Json<RoleUpdateRequest>,
) -> ApiResult<RoleResponse> {
    let request = validated(body)?;
    let role = state
        .role_service
        .update(actor.context(), id.into_inner(), request.into())
        .await?;
    Ok(AxResponseEntity::updated(role, "역할 정보가 성공적으로 수정되었습니다."))
}

async fn delete<S: Storage>(
    state: web::Data<AppState<S>>,
    actor: CurrentActor,
    id: web::Path<i64>,
) -> ApiResult<()> {
    state.role_service.delete(actor.context(), id.into_inner()).await?;
    Ok(AxResponseEntity::deleted("역할이 성공적으로 삭제되었습니다."))
}

async fn restore<S: Storage>(
    state: web::Data<AppState<S>>,
    actor: CurrentActor,
    id: web::Path<i64>,
) -> ApiResult<RoleResponse> {
    let role = state.role_service.restore(actor.context(), id.into_inner()).await?;
    Ok(AxResponseEntity::updated(role, "역할이 성공적으로 복원되었습니다."))
}

async fn list<S: Storage>(
    state: web::Data<AppState<S>>,
    params: web::Query<PageParams>,
) -> ApiResult<PageResponse<RoleResponse>> {
    let query = params.to_query(ROLE_SORT_FIELDS, default_role_sort())?;
    let page = state.role_service.list(&query).await?;
    Ok(AxResponseEntity::ok_page(page, "역할 목록을 성공적으로 조회했습니다."))
}

async fn list_active<S: Storage>(state: web::Data<AppState<S>>) -> ApiResult<Vec<RoleResponse>> {
    let roles = state.role_service.list_active().await?;
    Ok(AxResponseEntity::ok(roles, "활성 역할 목록을 성공적으로 조회했습니다."))
}

async fn search<S: Storage>(
    state: web::Data<AppState<S>>,
    keyword: web::Query<KeywordParams>,
    params: web::Query<PageParams>,
) -> ApiResult<PageResponse<RoleResponse>> {
    let query = params.to_query(ROLE_SORT_FIELDS, default_role_sort())?;
    let page = state.role_service.search(&keyword.keyword, &query).await?;
    Ok(AxResponseEntity::ok_page(page, "역할 검색을 성공적으로 완료했습니다."))
}

async fn set_default<S: Storage>(state: web::Data<AppState<S>>, id: web::Path<i64>) -> ApiResult<()> {
    state.role_service.set_default(id.into_inner()).await?;
    Ok(AxResponseEntity::ok_message("기본 역할이 성공적으로 설정되었습니다."))
}

async fn get_default<S: Storage>(state: web::Data<AppState<S>>) -> ApiResult<RoleResponse> {
    let entity = match state.role_service.get_default().await? {
        Some(role) => AxResponseEntity::ok(role, "기본 역할을 성공적으로 조회했습니다."),
        None => AxResponseEntity::ok_message("설정된 기본 역할이 없습니다"),
    };
    Ok(entity)
}
