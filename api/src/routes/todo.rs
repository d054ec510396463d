//! Todo endpoints under `/api/v1/todos`

use actix_web::web;
use mall_core::domain::value_objects::TodoResponse;
use mall_core::repositories::Storage;
use mall_core::services::{default_todo_sort, TODO_SORT_FIELDS};
use mall_shared::PageResponse;

use crate::dto::todo::{TitleParams, TodoCreateRequest, TodoSearchParams, TodoUpdateRequest};
use crate::dto::{validated, PageParams};
use crate::handlers::{ApiResult, AxResponseEntity};
use crate::middleware::CurrentActor;
use crate::state::AppState;

/// Literal segments are registered ahead of `/{tno}`.
pub fn configure<S: Storage>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/todos")
            .route("", web::post().to(create::<S>))
            .route("", web::get().to(list::<S>))
            .route("/list", web::get().to(list_all::<S>))
            .route("/search", web::get().to(search::<S>))
            .route("/search/title", web::get().to(search_by_title::<S>))
            .route("/count", web::get().to(count::<S>))
            .route("/count/writer/{writer}", web::get().to(count_by_writer::<S>))
            .route("/count/status/{complete}", web::get().to(count_by_complete::<S>))
            .route("/writer/{writer}", web::get().to(list_by_writer::<S>))
            .route("/writer/{writer}", web::delete().to(delete_by_writer::<S>))
            .route("/status/{complete}", web::get().to(list_by_complete::<S>))
            .route("/all", web::delete().to(delete_all::<S>))
            .route("/{tno}", web::get().to(get::<S>))
            .route("/{tno}", web::put().to(update::<S>))
            .route("/{tno}", web::delete().to(delete::<S>))
            .route("/{tno}/toggle", web::patch().to(toggle::<S>)),
    );
}

async fn create<S: Storage>(
    state: web::Data<AppState<S>>,
    actor: CurrentActor,
    body: web::Json<TodoCreateRequest>,
) -> ApiResult<TodoResponse> {
    let request = validated(body)?;
    let todo = state.todo_service.create(actor.context(), request.into()).await?;
    Ok(AxResponseEntity::created(todo, "할일이 성공적으로 생성되었습니다."))
}

async fn get<S: Storage>(state: web::Data<AppState<S>>, tno: web::Path<i64>) -> ApiResult<TodoResponse> {
    let todo = state.todo_service.get(tno.into_inner()).await?;
    Ok(AxResponseEntity::ok(todo, "할일을 성공적으로 조회했습니다."))
}

async fn list<S: Storage>(
    state: web::Data<AppState<S>>,
    params: web::Query<PageParams>,
) -> ApiResult<PageResponse<TodoResponse>> {
    let query = params.to_query(TODO_SORT_FIELDS, default_todo_sort())?;
    let page = state.todo_service.list(&query).await?;
    Ok(AxResponseEntity::ok_page(page, "할일 목록을 성공적으로 조회했습니다."))
}

async fn update<S: Storage>(
    state: web::Data<AppState<S>>,
    actor: CurrentActor,
    tno: web::Path<i64>,
    body: web::Json<TodoUpdateRequest>,
) -> ApiResult<TodoResponse> {
    let request = validated(body)?;
    let todo = state
        .todo_service
        .update(actor.context(), tno.into_inner(), request.into())
        .await?;
    Ok(AxResponseEntity::updated(todo, "할일이 성공적으로 수정되었습니다."))
}

async fn delete<S: Storage>(state: web::Data<AppState<S>>, tno: web::Path<i64>) -> ApiResult<()> {
    state.todo_service.delete(tno.into_inner()).await?;
    Ok(AxResponseEntity::deleted("할일이 성공적으로 삭제되었습니다."))
}

async fn toggle<S: Storage>(
    state: web::Data<AppState<S>>,
    actor: CurrentActor,
    tno: web::Path<i64>,
) -> ApiResult<TodoResponse> {
    let todo = state.todo_service.toggle(actor.context(), tno.into_inner()).await?;
    Ok(AxResponseEntity::updated(todo, "할일 상태가 성공적으로 변경되었습니다."))
}

async fn list_by_writer<S: Storage>(
    state: web::Data<AppState<S>>,
    writer: web::Path<String>,
    params: web::Query<PageParams>,
) -> ApiResult<PageResponse<TodoResponse>> {
    let query = params.to_query(TODO_SORT_FIELDS, default_todo_sort())?;
    let page = state.todo_service.list_by_writer(&writer, &query).await?;
    Ok(AxResponseEntity::ok_page(page, "작성자별 할일 목록을 성공적으로 조회했습니다."))
}

async fn list_by_complete<S: Storage>(
    state: web::Data<AppState<S>>,
    complete: web::Path<bool>,
    params: web::Query<PageParams>,
) -> ApiResult<PageResponse<TodoResponse>> {
    let query = params.to_query(TODO_SORT_FIELDS, default_todo_sort())?;
    let page = state.todo_service.list_by_complete(complete.into_inner(), &query).await?;
    Ok(AxResponseEntity::ok_page(page, "완료 상태별 할일 목록을 성공적으로 조회했습니다."))
}

async fn search<S: Storage>(
    state: web::Data<AppState<S>>,
    filter: web::Query<TodoSearchParams>,
    params: web::Query<PageParams>,
) -> ApiResult<PageResponse<TodoResponse>> {
    let query = params.to_query(TODO_SORT_FIELDS, default_todo_sort())?;
    let page = state
        .todo_service
        .search(filter.writer.as_deref(), filter.complete, &query)
        .await?;
    Ok(AxResponseEntity::ok_page(page, "할일 검색을 성공적으로 완료했습니다."))
}

async fn search_by_title<S: Storage>(
    state: web::Data<AppState<S>>,
    title: web::Query<TitleParams>,
    params: web::Query<PageParams>,
) -> ApiResult<PageResponse<TodoResponse>> {
    let query = params.to_query(TODO_SORT_FIELDS, default_todo_sort())?;
    let page = state.todo_service.search_by_title(&title.title, &query).await?;
    Ok(AxResponseEntity::ok_page(page, "제목 검색을 성공적으로 완료했습니다."))
}

async fn count<S: Storage>(state: web::Data<AppState<S>>) -> ApiResult<u64> {
    let count = state.todo_service.count().await?;
    Ok(AxResponseEntity::ok(count, "할일 개수를 성공적으로 조회했습니다."))
}

async fn count_by_writer<S: Storage>(state: web::Data<AppState<S>>, writer: web::Path<String>) -> ApiResult<u64> {
    let count = state.todo_service.count_by_writer(&writer).await?;
    Ok(AxResponseEntity::ok(count, "작성자별 할일 개수를 성공적으로 조회했습니다."))
}

async fn count_by_complete<S: Storage>(state: web::Data<AppState<S>>, complete: web::Path<bool>) -> ApiResult<u64> {
    let count = state.todo_service.count_by_complete(complete.into_inner()).await?;
    Ok(AxResponseEntity::ok(count, "완료 상태별 할일 개수를 성공적으로 조회했습니다."))
}

async fn delete_all<S: Storage>(state: web::Data<AppState<S>>) -> ApiResult<()> {
    let removed = state.todo_service.delete_all().await?;
    log::info!("Deleted {} todos", removed);
    Ok(AxResponseEntity::deleted("모든 할일이 성공적으로 삭제되었습니다."))
}

async fn delete_by_writer<S: Storage>(state: web::Data<AppState<S>>, writer: web::Path<String>) -> ApiResult<()> {
    let removed = state.todo_service.delete_by_writer(&writer).await?;
    log::info!("Deleted {} todos of {}", removed, writer.as_str());
    Ok(AxResponseEntity::deleted("작성자별 할일이 성공적으로 삭제되었습니다."))
}

async fn list_all<S: Storage>(state: web::Data<AppState<S>>) -> ApiResult<Vec<TodoResponse>> {
    let todos = state.todo_service.list_all().await?;
    Ok(AxResponseEntity::ok(todos, "할일 전체 목록을 성공적으로 조회했습니다."))
}
