//! Product endpoints under `/api/v1/products`

use actix_web::web;
use mall_core::domain::value_objects::ProductResponse;
use mall_core::repositories::Storage;
use mall_core::services::{default_product_sort, PRODUCT_SORT_FIELDS};
use mall_shared::PageResponse;

use crate::dto::product::{PriceRangeParams, ProductCreateRequest, ProductUpdateRequest};
use crate::dto::{validated, KeywordParams, PageParams};
use crate::handlers::{ApiResult, AxResponseEntity};
use crate::middleware::CurrentActor;
use crate::state::AppState;

pub fn configure<S: Storage>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/products")
            .route("", web::post().to(create::<S>))
            .route("", web::get().to(list::<S>))
            .route("/search", web::get().to(search::<S>))
            .route("/price-range", web::get().to(list_by_price_range::<S>))
            .route("/{pno}", web::get().to(get::<S>))
            .route("/{pno}", web::put().to(update::<S>))
            .route("/{pno}", web::delete().to(delete::<S>))
            .route("/{pno}/restore", web::patch().to(restore::<S>)),
    );
}

async fn create<S: Storage>(
    state: web::Data<AppState<S>>,
    actor: CurrentActor,
    body: web::Json<ProductCreateRequest>,
) -> ApiResult<ProductResponse> {
    let request = validated(body)?;
    let product = state.product_service.create(actor.context(), request.into()).await?;
    Ok(AxResponseEntity::created(product, "상품이 성공적으로 등록되었습니다."))
}

async fn get<S: Storage>(state: web::Data<AppState<S>>, pno: web::Path<i64>) -> ApiResult<ProductResponse> {
    let product = state.product_service.get(pno.into_inner()).await?;
    Ok(AxResponseEntity::ok(product, "상품 정보를 성공적으로 조회했습니다."))
}

async fn update<S: Storage>(
    state: web::Data<AppState<S>>,
    actor: CurrentActor,
    pno: web::Path<i64>,
    body: web::Json<ProductUpdateRequest>,
) -> ApiResult<ProductResponse> {
    let request = validated(body)?;
    let product = state
        .product_service
        .update(actor.context(), pno.into_inner(), request.into())
        .await?;
    Ok(AxResponseEntity::updated(product, "상품 정보가 성공적으로 수정되었습니다."))
}

async fn delete<S: Storage>(
    state: web::Data<AppState<S>>,
    actor: CurrentActor,
    pno: web::Path<i64>,
) -> ApiResult<()> {
    state.product_service.delete(actor.context(), pno.into_inner()).await?;
    Ok(AxResponseEntity::deleted("상품이 성공적으로 삭제되었습니다."))
}

async fn restore<S: Storage>(
    state: web::Data<AppState<S>>,
    actor: CurrentActor,
    pno: web::Path<i64>,
) -> ApiResult<ProductResponse> {
    let product = state.product_service.restore(actor.context(), pno.into_inner()).await?;
    Ok(AxResponseEntity::updated(product, "상품이 성공적으로 복원되었습니다."))
}

async fn list<S: Storage>(
    state: web::Data<AppState<S>>,
    params: web::Query<PageParams>,
) -> ApiResult<PageResponse<ProductResponse>> {
    let query = params.to_query(PRODUCT_SORT_FIELDS, default_product_sort())?;
    let page = state.product_service.list(&query).await?;
    Ok(AxResponseEntity::ok_page(page, "상품 목록을 성공적으로 조회했습니다."))
}

async fn search<S: Storage>(
    state: web::Data<AppState<S>>,
    keyword: web::Query<KeywordParams>,
    params: web::Query<PageParams>,
) -> ApiResult<PageResponse<ProductResponse>> {
    let query = params.to_query(PRODUCT_SORT_FIELDS, default_product_sort())?;
    let page = state.product_service.search(&keyword.keyword, &query).await?;
    Ok(AxResponseEntity::ok_page(page, "상품 검색을 성공적으로 완료했습니다."))
}

async fn list_by_price_range<S: Storage>(
    state: web::Data<AppState<S>>,
    range: web::Query<PriceRangeParams>,
    params: web::Query<PageParams>,
) -> ApiResult<PageResponse<ProductResponse>> {
    let query = params.to_query(PRODUCT_SORT_FIELDS, default_product_sort())?;
    let page = state
        .product_service
        .list_by_price_range(range.min_price, range.max_price, &query)
        .await?;
    Ok(AxResponseEntity::ok_page(page, "가격 범위 상품을 성공적으로 조회했습니다."))
}
