//! Cart request bodies

use mall_core::services::AddCartItem;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CartItemAddRequest {
    #[validate(required(message = "상품 번호는 필수입니다"))]
    pub product_id: Option<i64>,

    #[validate(
        required(message = "수량은 필수입니다"),
        range(min = 1, max = 9999, message = "수량은 1 이상 9999 이하여야 합니다")
    )]
    pub quantity: Option<i32>,
}

impl From<CartItemAddRequest> for AddCartItem {
    fn from(request: CartItemAddRequest) -> Self {
        AddCartItem {
            product_id: request.product_id.unwrap_or_default(),
            quantity: request.quantity.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CartItemUpdateRequest {
    #[validate(
        required(message = "수량은 필수입니다"),
        range(min = 1, max = 9999, message = "수량은 1 이상 9999 이하여야 합니다")
    )]
    pub quantity: Option<i32>,
}
