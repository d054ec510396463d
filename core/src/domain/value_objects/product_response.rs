use serde::{Deserialize, Serialize};

use super::audit_dto::{map_audit, AuditDto};
use crate::domain::entities::Product;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i64,
    pub product_name: String,
    pub description: Option<String>,
    pub price: i64,
    pub category: String,
    pub stock_quantity: i32,
    pub image_url: Option<String>,
    pub is_available: bool,
    pub status: String,
    pub member_id: Option<i64>,
    /// Image file names in display order
    pub images: Vec<String>,
    #[serde(flatten)]
    pub audit: AuditDto,
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            product_name: product.product_name.clone(),
            description: product.description.clone(),
            price: product.price,
            category: product.category.clone(),
            stock_quantity: product.stock_quantity,
            image_url: product
                .image_url
                .clone()
                .or_else(|| product.images.first().map(|image| image.file_name.clone())),
            is_available: product.is_available,
            status: product.status.to_string(),
            member_id: product.member_id,
            images: product.image_file_names(),
            audit: map_audit(product),
        }
    }
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self::from(&product)
    }
}
