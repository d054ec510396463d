//! Cart service: one cart per member, items keyed by product.

use std::collections::HashMap;
use std::sync::Arc;

use mall_shared::ErrorCode;

use crate::domain::entities::{AuditContext, AuditFields, Auditable, Cart, CartItem, Product};
use crate::domain::value_objects::{CartItemResponse, CartResponse};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{CartItemRepository, CartRepository, MemberRepository, ProductRepository};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddCartItem {
    pub product_id: i64,
    pub quantity: i32,
}

/// Service for member carts
pub struct CartService<C, I, M, P>
where
    C: CartRepository,
    I: CartItemRepository,
    M: MemberRepository,
    P: ProductRepository,
{
    carts: Arc<C>,
    items: Arc<I>,
    members: Arc<M>,
    products: Arc<P>,
}

impl<C, I, M, P> CartService<C, I, M, P>
where
    C: CartRepository + 'static,
    I: CartItemRepository + 'static,
    M: MemberRepository + 'static,
    P: ProductRepository + 'static,
{
    pub fn new(carts: Arc<C>, items: Arc<I>, members: Arc<M>, products: Arc<P>) -> Self {
        Self {
            carts,
            items,
            members,
            products,
        }
    }

    /// The member's cart, created empty on first access
    ///
    /// # Errors
    /// * M001 when no member has that email
    pub async fn get_or_create(&self, ctx: &AuditContext, email: &str) -> DomainResult<CartResponse> {
        let cart = self.cart_for(ctx, email).await?;
        let items = self.items.find_by_cart(cart.cno).await?;
        let responses = self.describe(&items).await?;
        Ok(CartResponse::new(&cart, responses))
    }

    /// Put a product in the cart, adding to the quantity of an existing line
    ///
    /// # Errors
    /// * M001 when the member does not exist
    /// * P001 when the product is missing or deleted
    pub async fn add_item(&self, ctx: &AuditContext, email: &str, request: AddCartItem) -> DomainResult<CartItemResponse> {
        if request.quantity <= 0 {
            return Err(invalid_quantity(request.quantity));
        }
        let cart = self.cart_for(ctx, email).await?;
        let product = self.find_product(request.product_id).await?;

        let item = match self.items.find_by_cart_and_product(cart.cno, product.id).await? {
            Some(mut existing) => {
                existing.add_qty(request.quantity)?;
                existing.touch(ctx);
                self.store(&existing).await?;
                tracing::info!(cino = existing.cino, qty = existing.qty, "Cart item quantity merged");
                existing
            }
            None => {
                let item = CartItem::new(cart.cno, product.id, request.quantity, AuditFields::created(ctx));
                let saved = self.items.save(item).await?;
                tracing::info!(cino = saved.cino, email, product_id = product.id, "Cart item added");
                saved
            }
        };
        Ok(CartItemResponse::new(&item, Some(&product)))
    }

    /// Set the quantity of a line
    ///
    /// # Errors
    /// * C003 when the item does not exist
    /// * A002 when the item belongs to another member's cart
    pub async fn update_item(
        &self,
        ctx: &AuditContext,
        email: &str,
        item_id: i64,
        quantity: i32,
    ) -> DomainResult<CartItemResponse> {
        if quantity <= 0 {
            return Err(invalid_quantity(quantity));
        }
        let mut item = self.owned_item(email, item_id).await?;
        item.change_qty(quantity);
        item.touch(ctx);
        self.store(&item).await?;
        tracing::info!(cino = item_id, qty = quantity, "Cart item updated");
        self.respond(&item).await
    }

    pub async fn increase_quantity(
        &self,
        ctx: &AuditContext,
        email: &str,
        item_id: i64,
        amount: i32,
    ) -> DomainResult<CartItemResponse> {
        if amount <= 0 {
            return Err(invalid_quantity(amount));
        }
        let mut item = self.owned_item(email, item_id).await?;
        item.add_qty(amount)?;
        item.touch(ctx);
        self.store(&item).await?;
        self.respond(&item).await
    }

    /// Lower the quantity, removing the line once it reaches zero
    ///
    /// # Returns
    /// * `None` when the line was removed
    pub async fn decrease_quantity(
        &self,
        ctx: &AuditContext,
        email: &str,
        item_id: i64,
        amount: i32,
    ) -> DomainResult<Option<CartItemResponse>> {
        if amount <= 0 {
            return Err(invalid_quantity(amount));
        }
        let mut item = self.owned_item(email, item_id).await?;
        let remaining = item.qty - amount;
        if remaining <= 0 {
            self.items.delete_by_id(item_id).await?;
            tracing::info!(cino = item_id, "Cart item removed at zero quantity");
            return Ok(None);
        }
        item.change_qty(remaining);
        item.touch(ctx);
        self.store(&item).await?;
        Ok(Some(self.respond(&item).await?))
    }

    pub async fn remove_item(&self, email: &str, item_id: i64) -> DomainResult<()> {
        self.owned_item(email, item_id).await?;
        self.items.delete_by_id(item_id).await?;
        tracing::info!(cino = item_id, email, "Cart item removed");
        Ok(())
    }

    /// Remove several lines; nothing is removed unless every id is valid
    pub async fn remove_items(&self, email: &str, item_ids: &[i64]) -> DomainResult<u64> {
        let mut cno = None;
        for item_id in item_ids {
            cno = Some(self.owned_item(email, *item_id).await?.cno);
        }
        let removed = match cno {
            Some(cno) => self.items.delete_by_ids(cno, item_ids).await?,
            None => 0,
        };
        tracing::info!(removed, email, "Cart items removed");
        Ok(removed)
    }

    /// Empty the member's cart
    ///
    /// # Errors
    /// * C003 when the member has no cart yet
    pub async fn clear(&self, email: &str) -> DomainResult<u64> {
        let cart = self.carts.find_by_owner(email).await?.ok_or_else(|| {
            DomainError::business(ErrorCode::ResourceNotFound).with_details("장바구니를 찾을 수 없습니다")
        })?;
        let removed = self.items.delete_by_cart(cart.cno).await?;
        tracing::info!(removed, email, "Cart cleared");
        Ok(removed)
    }

    pub async fn has_product(&self, email: &str, product_id: i64) -> DomainResult<bool> {
        Ok(self.product_quantity(email, product_id).await? > 0)
    }

    pub async fn product_quantity(&self, email: &str, product_id: i64) -> DomainResult<i32> {
        let Some(cart) = self.carts.find_by_owner(email).await? else {
            return Ok(0);
        };
        Ok(self
            .items
            .find_by_cart_and_product(cart.cno, product_id)
            .await?
            .map_or(0, |item| item.qty))
    }

    /// Number of distinct lines in the cart
    pub async fn item_count(&self, email: &str) -> DomainResult<usize> {
        match self.carts.find_by_owner(email).await? {
            Some(cart) => Ok(self.items.find_by_cart(cart.cno).await?.len()),
            None => Ok(0),
        }
    }

    pub async fn is_empty(&self, email: &str) -> DomainResult<bool> {
        Ok(self.item_count(email).await? == 0)
    }

    /// Sum of price times quantity over every line; 0 without a cart
    pub async fn total_amount(&self, email: &str) -> DomainResult<i64> {
        let Some(cart) = self.carts.find_by_owner(email).await? else {
            return Ok(0);
        };
        let items = self.items.find_by_cart(cart.cno).await?;
        Ok(self
            .describe(&items)
            .await?
            .iter()
            .fold(0, |sum, item| sum.saturating_add(item.total_price)))
    }

    async fn cart_for(&self, ctx: &AuditContext, email: &str) -> DomainResult<Cart> {
        if !self.members.exists_by_email(email).await? {
            return Err(DomainError::business(ErrorCode::MemberNotFound)
                .with_details(format!("존재하지 않는 회원입니다: {}", email)));
        }
        match self.carts.find_by_owner(email).await? {
            Some(cart) => Ok(cart),
            None => {
                let cart = self.carts.save(Cart::new(email, AuditFields::created(ctx))).await?;
                tracing::debug!(cno = cart.cno, email, "Cart created");
                Ok(cart)
            }
        }
    }

    async fn owned_item(&self, email: &str, item_id: i64) -> DomainResult<CartItem> {
        let item = self.items.find_by_id(item_id).await?.ok_or_else(|| {
            DomainError::business(ErrorCode::ResourceNotFound)
                .with_details(format!("존재하지 않는 장바구니 아이템입니다: {}", item_id))
        })?;
        let owned = self
            .carts
            .find_by_id(item.cno)
            .await?
            .map_or(false, |cart| cart.is_owned_by(email));
        if !owned {
            tracing::warn!(cino = item_id, email, "Cart item accessed by non-owner");
            return Err(DomainError::business(ErrorCode::AccessDenied)
                .with_details("해당 장바구니 아이템에 접근할 권한이 없습니다"));
        }
        Ok(item)
    }

    async fn find_product(&self, id: i64) -> DomainResult<Product> {
        match self.products.find_by_id(id).await? {
            Some(product) if !product.is_deleted() => Ok(product),
            _ => Err(DomainError::business(ErrorCode::ProductNotFound)
                .with_details(format!("존재하지 않는 상품입니다: {}", id))),
        }
    }

    async fn respond(&self, item: &CartItem) -> DomainResult<CartItemResponse> {
        let product = self.products.find_by_id(item.product_id).await?;
        Ok(CartItemResponse::new(item, product.as_ref()))
    }

    async fn describe(&self, items: &[CartItem]) -> DomainResult<Vec<CartItemResponse>> {
        let ids: Vec<i64> = items.iter().map(|item| item.product_id).collect();
        let products: HashMap<i64, Product> = self
            .products
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|product| (product.id, product))
            .collect();
        Ok(items
            .iter()
            .map(|item| CartItemResponse::new(item, products.get(&item.product_id)))
            .collect())
    }

    async fn store(&self, item: &CartItem) -> DomainResult<()> {
        if self.items.update(item).await? {
            Ok(())
        } else {
            Err(DomainError::business(ErrorCode::ResourceNotFound)
                .with_details(format!("존재하지 않는 장바구니 아이템입니다: {}", item.cino)))
        }
    }
}

fn invalid_quantity(quantity: i32) -> DomainError {
    DomainError::business(ErrorCode::InvalidInputValue)
        .with_details(format!("수량은 1 이상이어야 합니다: {}", quantity))
}
