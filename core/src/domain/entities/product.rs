//! Product entity and its image list

use std::fmt;
use std::str::FromStr;

use mall_shared::ErrorCode;
use serde::{Deserialize, Serialize};

use super::audit::{AuditFields, Auditable};
use crate::errors::{DomainError, DomainResult};

/// Category assigned when none is given
pub const DEFAULT_CATEGORY: &str = "기본";

/// Sales status of a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    New,
    Sale,
    SoldOut,
    Unavailable,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::New => "NEW",
            ProductStatus::Sale => "SALE",
            ProductStatus::SoldOut => "SOLD_OUT",
            ProductStatus::Unavailable => "UNAVAILABLE",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEW" => Ok(ProductStatus::New),
            "SALE" => Ok(ProductStatus::Sale),
            "SOLD_OUT" => Ok(ProductStatus::SoldOut),
            "UNAVAILABLE" => Ok(ProductStatus::Unavailable),
            other => Err(format!("Invalid product status: {}", other)),
        }
    }
}

/// Image attached to a product; `ord` is its position in the list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub file_name: String,
    pub ord: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Identifier, 0 until the record is first saved
    pub id: i64,
    pub product_name: String,
    pub description: Option<String>,
    pub price: i64,
    pub category: String,
    pub stock_quantity: i32,
    pub image_url: Option<String>,
    pub is_available: bool,
    pub status: ProductStatus,
    /// Seller who registered the product
    pub member_id: Option<i64>,
    pub images: Vec<ProductImage>,
    pub audit: AuditFields,
}

impl Product {
    pub fn new(product_name: impl Into<String>, price: i64, audit: AuditFields) -> Self {
        Self {
            id: 0,
            product_name: product_name.into(),
            description: None,
            price,
            category: DEFAULT_CATEGORY.to_string(),
            stock_quantity: 0,
            image_url: None,
            is_available: true,
            status: ProductStatus::New,
            member_id: None,
            images: Vec::new(),
            audit,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_stock(mut self, stock_quantity: i32) -> Self {
        self.stock_quantity = stock_quantity;
        self
    }

    /// Remove stock; fails with P003 when fewer than `quantity` remain
    pub fn decrease_stock(&mut self, quantity: i32) -> DomainResult<()> {
        if self.stock_quantity < quantity {
            return Err(DomainError::business(ErrorCode::ProductOutOfStock).with_details(format!(
                "요청 수량 {}개, 현재 재고 {}개",
                quantity, self.stock_quantity
            )));
        }
        self.stock_quantity -= quantity;
        if self.stock_quantity == 0 {
            self.status = ProductStatus::SoldOut;
            self.is_available = false;
        }
        Ok(())
    }

    pub fn increase_stock(&mut self, quantity: i32) -> DomainResult<()> {
        let current = self.stock_quantity;
        self.stock_quantity = current.checked_add(quantity).ok_or_else(|| {
            DomainError::business(ErrorCode::InvalidInputValue)
                .with_details(format!("재고 {}에 {}개를 더할 수 없습니다", current, quantity))
        })?;
        if self.status == ProductStatus::SoldOut && self.stock_quantity > 0 {
            self.status = ProductStatus::Sale;
            self.is_available = true;
        }
        Ok(())
    }

    pub fn change_availability(&mut self, available: bool) {
        self.is_available = available;
        if !available {
            self.status = ProductStatus::Unavailable;
        } else if self.stock_quantity > 0 {
            self.status = ProductStatus::Sale;
        }
    }

    pub fn change_name(&mut self, product_name: impl Into<String>) {
        self.product_name = product_name.into();
    }

    pub fn change_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    /// Fails with P004 for negative prices
    pub fn change_price(&mut self, price: i64) -> DomainResult<()> {
        if price < 0 {
            return Err(DomainError::business(ErrorCode::ProductPriceInvalid)
                .with_details(format!("가격은 0 이상이어야 합니다: {}", price)));
        }
        self.price = price;
        Ok(())
    }

    pub fn change_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    /// Append an image at the end of the list
    pub fn add_image(&mut self, file_name: impl Into<String>) {
        let ord = self.images.len() as i32;
        self.images.push(ProductImage {
            file_name: file_name.into(),
            ord,
        });
    }

    pub fn clear_images(&mut self) {
        self.images.clear();
    }

    /// Replace the image list, renumbering positions from zero
    pub fn replace_images<I, S>(&mut self, file_names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clear_images();
        for file_name in file_names {
            self.add_image(file_name);
        }
    }

    pub fn image_file_names(&self) -> Vec<String> {
        self.images.iter().map(|image| image.file_name.clone()).collect()
    }
}

impl Auditable for Product {
    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditFields {
        &mut self.audit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product::new("무선 이어폰", 59_000, AuditFields::default()).with_stock(3)
    }

    #[test]
    fn test_defaults() {
        let product = Product::new("노트북", 1_200_000, AuditFields::default());
        assert_eq!(product.category, DEFAULT_CATEGORY);
        assert_eq!(product.status, ProductStatus::New);
        assert!(product.is_available);
        assert_eq!(product.stock_quantity, 0);
    }

    #[test]
    fn test_decrease_stock_to_zero_sells_out() {
        let mut product = product();
        product.decrease_stock(3).unwrap();
        assert_eq!(product.stock_quantity, 0);
        assert_eq!(product.status, ProductStatus::SoldOut);
        assert!(!product.is_available);
    }

    #[test]
    fn test_decrease_stock_insufficient() {
        let mut product = product();
        let err = product.decrease_stock(4).unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::ProductOutOfStock);
        assert_eq!(product.stock_quantity, 3);
    }

    #[test]
    fn test_increase_stock_after_sold_out() {
        let mut product = product();
        product.decrease_stock(3).unwrap();
        product.increase_stock(2).unwrap();
        assert_eq!(product.status, ProductStatus::Sale);
        assert!(product.is_available);
    }

    #[test]
    fn test_increase_stock_rejects_overflow() {
        let mut product = product();
        let err = product.increase_stock(i32::MAX).unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::InvalidInputValue);
        assert_eq!(product.stock_quantity, 3);
    }

    #[test]
    fn test_change_availability() {
        let mut product = product();
        product.change_availability(false);
        assert_eq!(product.status, ProductStatus::Unavailable);
        product.change_availability(true);
        assert_eq!(product.status, ProductStatus::Sale);
    }

    #[test]
    fn test_change_price_rejects_negative() {
        let mut product = product();
        assert_eq!(
            product.change_price(-1).unwrap_err().error_code(),
            ErrorCode::ProductPriceInvalid
        );
        product.change_price(0).unwrap();
        assert_eq!(product.price, 0);
    }

    #[test]
    fn test_images_keep_order() {
        let mut product = product();
        product.add_image("a.jpg");
        product.add_image("b.jpg");
        assert_eq!(product.images[1].ord, 1);

        product.replace_images(["c.jpg"]);
        assert_eq!(product.image_file_names(), vec!["c.jpg".to_string()]);
        assert_eq!(product.images[0].ord, 0);
    }
}
