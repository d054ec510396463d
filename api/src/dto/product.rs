//! Product request bodies and query parameters

use mall_core::services::{CreateProduct, UpdateProduct};
use serde::Deserialize;
use validator::Validate;

use super::not_blank;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreateRequest {
    #[validate(
        required(message = "상품명은 필수입니다"),
        custom(function = "not_blank", message = "상품명은 필수입니다"),
        length(min = 1, max = 100, message = "상품명은 1자 이상 100자 이하로 입력해주세요")
    )]
    pub product_name: Option<String>,

    #[validate(length(max = 1000, message = "상품 설명은 1000자 이하로 입력해주세요"))]
    pub description: Option<String>,

    #[validate(
        required(message = "상품 가격은 필수입니다"),
        range(min = 0, message = "상품 가격은 0 이상이어야 합니다")
    )]
    pub price: Option<i64>,

    #[validate(length(max = 50, message = "카테고리는 50자 이하로 입력해주세요"))]
    pub category: Option<String>,

    #[validate(range(min = 0, message = "재고 수량은 0 이상이어야 합니다"))]
    pub stock_quantity: Option<i32>,

    #[validate(length(max = 500, message = "이미지 URL은 500자 이하로 입력해주세요"))]
    pub image_url: Option<String>,

    pub member_id: Option<i64>,

    #[serde(default)]
    pub images: Vec<String>,
}

impl From<ProductCreateRequest> for CreateProduct {
    fn from(request: ProductCreateRequest) -> Self {
        CreateProduct {
            product_name: request.product_name.unwrap_or_default(),
            description: request.description,
            price: request.price.unwrap_or_default(),
            category: request.category,
            stock_quantity: request.stock_quantity.unwrap_or_default(),
            image_url: request.image_url,
            member_id: request.member_id,
            images: request.images,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdateRequest {
    #[validate(length(min = 1, max = 100, message = "상품명은 1자 이상 100자 이하로 입력해주세요"))]
    pub product_name: Option<String>,

    #[validate(length(max = 1000, message = "상품 설명은 1000자 이하로 입력해주세요"))]
    pub description: Option<String>,

    #[validate(range(min = 0, message = "상품 가격은 0 이상이어야 합니다"))]
    pub price: Option<i64>,

    #[validate(length(max = 50, message = "카테고리는 50자 이하로 입력해주세요"))]
    pub category: Option<String>,

    #[validate(range(min = 0, message = "재고 수량은 0 이상이어야 합니다"))]
    pub stock_quantity: Option<i32>,

    #[validate(length(max = 500, message = "이미지 URL은 500자 이하로 입력해주세요"))]
    pub image_url: Option<String>,

    pub is_available: Option<bool>,

    pub images: Option<Vec<String>>,
}

impl From<ProductUpdateRequest> for UpdateProduct {
    fn from(request: ProductUpdateRequest) -> Self {
        UpdateProduct {
            product_name: request.product_name,
            description: request.description,
            price: request.price,
            category: request.category,
            stock_quantity: request.stock_quantity,
            image_url: request.image_url,
            is_available: request.is_available,
            images: request.images,
        }
    }
}

/// `GET /api/v1/products/price-range?minPrice&maxPrice`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRangeParams {
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_is_required_and_non_negative() {
        let request: ProductCreateRequest = serde_json::from_str(r#"{"productName":"키보드"}"#).unwrap();
        let errors = request.validate().unwrap_err();
        assert_eq!(
            errors.field_errors()["price"][0].message.as_deref(),
            Some("상품 가격은 필수입니다")
        );

        let request = ProductCreateRequest {
            product_name: Some("키보드".to_string()),
            price: Some(-1),
            ..Default::default()
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(
            errors.field_errors()["price"][0].message.as_deref(),
            Some("상품 가격은 0 이상이어야 합니다")
        );
    }

    #[test]
    fn test_create_command_keeps_images_in_order() {
        let request: ProductCreateRequest =
            serde_json::from_str(r#"{"productName":"키보드","price":1000,"images":["a.png","b.png"]}"#).unwrap();
        assert!(request.validate().is_ok());
        let command = CreateProduct::from(request);
        assert_eq!(command.images, vec!["a.png", "b.png"]);
        assert_eq!(command.stock_quantity, 0);
    }
}
