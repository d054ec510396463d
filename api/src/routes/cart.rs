//! Cart endpoints under `/api/v1/carts/{email}`

use actix_web::web;
use mall_core::domain::value_objects::{CartItemResponse, CartResponse};
use mall_core::repositories::Storage;

use crate::dto::cart::{CartItemAddRequest, CartItemUpdateRequest};
use crate::dto::validated;
use crate::handlers::{ApiResult, AxResponseEntity};
use crate::middleware::CurrentActor;
use crate::state::AppState;

pub fn configure<S: Storage>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/carts/{email}")
            .route("", web::get().to(get::<S>))
            .route("/total", web::get().to(total::<S>))
            .route("/items", web::post().to(add_item::<S>))
            .route("/items", web::delete().to(clear::<S>))
            .route("/items/batch", web::delete().to(remove_items::<S>))
            .route("/items/{item_id}", web::put().to(update_item::<S>))
            .route("/items/{item_id}", web::delete().to(remove_item::<S>)),
    );
}

async fn get<S: Storage>(
    state: web::Data<AppState<S>>,
    actor: CurrentActor,
    email: web::Path<String>,
) -> ApiResult<CartResponse> {
    let cart = state.cart_service.get_or_create(actor.context(), &email).await?;
    Ok(AxResponseEntity::ok(cart, "장바구니를 성공적으로 조회했습니다."))
}

async fn add_item<S: Storage>(
    state: web::Data<AppState<S>>,
    actor: CurrentActor,
    email: web::Path<String>,
    body: web::Json<CartItemAddRequest>,
) -> ApiResult<CartItemResponse> {
    let request = validated(body)?;
    let item = state
        .cart_service
        .add_item(actor.context(), &email, request.into())
        .await?;
    Ok(AxResponseEntity::created(item, "장바구니에 상품이 성공적으로 추가되었습니다."))
}

async fn update_item<S: Storage>(
    state: web::Data<AppState<S>>,
    actor: CurrentActor,
    path: web::Path<(String, i64)>,
    body: web::Json<CartItemUpdateRequest>,
) -> ApiResult<CartItemResponse> {
    let (email, item_id) = path.into_inner();
    let request = validated(body)?;
    let item = state
        .cart_service
        .update_item(actor.context(), &email, item_id, request.quantity.unwrap_or_default())
        .await?;
    Ok(AxResponseEntity::updated(item, "장바구니 아이템이 성공적으로 수정되었습니다."))
}

async fn remove_item<S: Storage>(state: web::Data<AppState<S>>, path: web::Path<(String, i64)>) -> ApiResult<()> {
    let (email, item_id) = path.into_inner();
    state.cart_service.remove_item(&email, item_id).await?;
    Ok(AxResponseEntity::deleted("장바구니 아이템이 성공적으로 삭제되었습니다."))
}

async fn clear<S: Storage>(state: web::Data<AppState<S>>, email: web::Path<String>) -> ApiResult<()> {
    let removed = state.cart_service.clear(&email).await?;
    log::debug!("Cleared {} items from the cart of {}", removed, email.as_str());
    Ok(AxResponseEntity::deleted("장바구니가 성공적으로 비워졌습니다."))
}

async fn remove_items<S: Storage>(
    state: web::Data<AppState<S>>,
    email: web::Path<String>,
    item_ids: web::Json<Vec<i64>>,
) -> ApiResult<()> {
    let removed = state.cart_service.remove_items(&email, &item_ids).await?;
    log::debug!("Removed {} items from the cart of {}", removed, email.as_str());
    Ok(AxResponseEntity::deleted("선택된 장바구니 아이템들이 성공적으로 삭제되었습니다."))
}

async fn total<S: Storage>(state: web::Data<AppState<S>>, email: web::Path<String>) -> ApiResult<i64> {
    let amount = state.cart_service.total_amount(&email).await?;
    Ok(AxResponseEntity::ok(amount, "장바구니 총 금액을 성공적으로 조회했습니다."))
}
