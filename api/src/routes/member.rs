//! Member endpoints under `/api/v1/members`

use actix_web::web;
use mall_core::domain::value_objects::MemberResponse;
use mall_core::repositories::Storage;
use mall_core::services::{default_member_sort, MEMBER_SORT_FIELDS};
use mall_shared::PageResponse;

use crate::dto::member::{MemberCreateRequest, MemberUpdateRequest, PasswordChangeRequest};
use crate::dto::{validated, KeywordParams, PageParams};
use crate::handlers::{ApiResult, AxResponseEntity};
use crate::middleware::CurrentActor;
use crate::state::AppState;

pub fn configure<S: Storage>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/members")
            .route("", web::post().to(create::<S>))
            .route("", web::get().to(list::<S>))
            .route("/search", web::get().to(search::<S>))
            .route("/{email}", web::get().to(get::<S>))
            .route("/{email}", web::put().to(update::<S>))
            .route("/{email}", web::delete().to(delete::<S>))
            .route("/{email}/password", web::put().to(change_password::<S>))
            .route("/{email}/roles/{role}", web::post().to(add_role::<S>))
            .route("/{email}/roles/{role}", web::delete().to(remove_role::<S>)),
    );
}

async fn create<S: Storage>(
    state: web::Data<AppState<S>>,
    actor: CurrentActor,
    body: web::Json<MemberCreateRequest>,
) -> ApiResult<MemberResponse> {
    let request = validated(body)?;
    let member = state.member_service.create(actor.context(), request.into()).await?;
    Ok(AxResponseEntity::created(member, "회원이 성공적으로 등록되었습니다."))
}

async fn get<S: Storage>(state: web::Data<AppState<S>>, email: web::Path<String>) -> ApiResult<MemberResponse> {
    let member = state.member_service.get(&email).await?;
    Ok(AxResponseEntity::ok(member, "회원 정보를 성공적으로 조회했습니다."))
}

async fn update<S: Storage>(
    state: web::Data<AppState<S>>,
    actor: CurrentActor,
    email: web::Path<String>,
    body: web::Json<MemberUpdateRequest>,
) -> ApiResult<MemberResponse> {
    let request = validated(body)?;
    let member = state
        .member_service
        .update(actor.context(), &email, request.into())
        .await?;
    Ok(AxResponseEntity::updated(member, "회원 정보가 성공적으로 수정되었습니다."))
}

async fn delete<S: Storage>(state: web::Data<AppState<S>>, email: web::Path<String>) -> ApiResult<()> {
    state.member_service.delete(&email).await?;
    Ok(AxResponseEntity::deleted("회원이 성공적으로 삭제되었습니다."))
}

async fn list<S: Storage>(
    state: web::Data<AppState<S>>,
    params: web::Query<PageParams>,
) -> ApiResult<PageResponse<MemberResponse>> {
    let query = params.to_query(MEMBER_SORT_FIELDS, default_member_sort())?;
    let page = state.member_service.list(&query).await?;
    Ok(AxResponseEntity::ok_page(page, "회원 목록을 성공적으로 조회했습니다."))
}

async fn search<S: Storage>(
    state: web::Data<AppState<S>>,
    keyword: web::Query<KeywordParams>,
    params: web::Query<PageParams>,
) -> ApiResult<PageResponse<MemberResponse>> {
    let query = params.to_query(MEMBER_SORT_FIELDS, default_member_sort())?;
    let page = state.member_service.search(&keyword.keyword, &query).await?;
    Ok(AxResponseEntity::ok_page(page, "회원 검색을 성공적으로 완료했습니다."))
}

async fn change_password<S: Storage>(
    state: web::Data<AppState<S>>,
    actor: CurrentActor,
    email: web::Path<String>,
    body: web::Json<PasswordChangeRequest>,
) -> ApiResult<()> {
    let request = validated(body)?;
    state
        .member_service
        .change_password(actor.context(), &email, request.into())
        .await?;
    Ok(AxResponseEntity::ok_message("비밀번호가 성공적으로 변경되었습니다."))
}

async fn add_role<S: Storage>(
    state: web::Data<AppState<S>>,
    actor: CurrentActor,
    path: web::Path<(String, String)>,
) -> ApiResult<MemberResponse> {
    let (email, role) = path.into_inner();
    let member = state.member_service.add_role(actor.context(), &email, &role).await?;
    Ok(AxResponseEntity::updated(member, "회원 역할이 성공적으로 추가되었습니다."))
}

async fn remove_role<S: Storage>(
    state: web::Data<AppState<S>>,
    actor: CurrentActor,
    path: web::Path<(String, String)>,
) -> ApiResult<MemberResponse> {
    let (email, role) = path.into_inner();
    let member = state.member_service.remove_role(actor.context(), &email, &role).await?;
    Ok(AxResponseEntity::updated(member, "회원 역할이 성공적으로 제거되었습니다."))
}
