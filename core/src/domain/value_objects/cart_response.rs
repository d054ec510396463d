use serde::{Deserialize, Serialize};

use super::audit_dto::{format_timestamp, map_audit, AuditDto};
use crate::domain::entities::{Cart, CartItem, Product};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemResponse {
    pub item_id: i64,
    pub cart_id: i64,
    pub product_id: i64,
    pub product_name: Option<String>,
    pub product_price: i64,
    pub product_image: Option<String>,
    pub quantity: i32,
    /// `product_price * quantity`
    pub total_price: i64,
    #[serde(flatten)]
    pub audit: AuditDto,
}

impl CartItemResponse {
    /// `product` is `None` when the referenced product no longer exists
    pub fn new(item: &CartItem, product: Option<&Product>) -> Self {
        let product_price = product.map(|p| p.price).unwrap_or(0);
        Self {
            item_id: item.cino,
            cart_id: item.cno,
            product_id: item.product_id,
            product_name: product.map(|p| p.product_name.clone()),
            product_price,
            product_image: product.and_then(|p| {
                p.images
                    .first()
                    .map(|image| image.file_name.clone())
                    .or_else(|| p.image_url.clone())
            }),
            quantity: item.qty,
            total_price: product_price.saturating_mul(i64::from(item.qty)),
            audit: map_audit(item),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub cno: i64,
    /// Email of the owning member
    pub member_id: String,
    pub items: Vec<CartItemResponse>,
    /// Sum of item quantities
    pub total_item_count: i64,
    pub total_amount: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl CartResponse {
    pub fn new(cart: &Cart, items: Vec<CartItemResponse>) -> Self {
        let total_item_count = items.iter().map(|item| item.quantity as i64).sum();
        let total_amount = items.iter().fold(0i64, |sum, item| sum.saturating_add(item.total_price));
        Self {
            cno: cart.cno,
            member_id: cart.owner_email.clone(),
            items,
            total_item_count,
            total_amount,
            created_at: format_timestamp(cart.audit.created_at),
            updated_at: format_timestamp(cart.audit.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::AuditFields;

    #[test]
    fn test_totals() {
        let mut cart = Cart::new("user@example.com", AuditFields::default());
        cart.cno = 3;
        let mut product = Product::new("키보드", 30_000, AuditFields::default());
        product.id = 9;
        product.add_image("kb.jpg");

        let items = vec![
            CartItemResponse::new(&CartItem::new(3, 9, 2, AuditFields::default()), Some(&product)),
            CartItemResponse::new(&CartItem::new(3, 10, 5, AuditFields::default()), None),
        ];
        assert_eq!(items[0].total_price, 60_000);
        assert_eq!(items[0].product_image.as_deref(), Some("kb.jpg"));
        assert_eq!(items[1].product_price, 0);

        let response = CartResponse::new(&cart, items);
        assert_eq!(response.total_item_count, 7);
        assert_eq!(response.total_amount, 60_000);
        assert_eq!(response.member_id, "user@example.com");
    }

    #[test]
    fn test_line_total_saturates() {
        let product = Product::new("금괴", i64::MAX / 2, AuditFields::default());
        let item = CartItemResponse::new(&CartItem::new(1, 1, 9999, AuditFields::default()), Some(&product));
        assert_eq!(item.total_price, i64::MAX);
    }
}
