use std::sync::Arc;

use mall_shared::ErrorCode;

use super::*;
use crate::domain::entities::{AuditContext, AuditFields, Auditable, Member, Product};
use crate::repositories::{
    InMemoryCartItemRepository, InMemoryCartRepository, InMemoryMemberRepository, InMemoryProductRepository,
    MemberRepository, ProductRepository,
};

type Service = CartService<
    InMemoryCartRepository,
    InMemoryCartItemRepository,
    InMemoryMemberRepository,
    InMemoryProductRepository,
>;

struct Fixture {
    service: Service,
    products: Arc<InMemoryProductRepository>,
    keyboard: i64,
    mouse: i64,
}

const KIM: &str = "kim@mall.com";
const LEE: &str = "lee@mall.com";

fn ctx() -> AuditContext {
    AuditContext::system()
}

async fn fixture() -> Fixture {
    let members = Arc::new(InMemoryMemberRepository::new());
    let products = Arc::new(InMemoryProductRepository::new());
    for (email, nickname) in [(KIM, "철수"), (LEE, "영희")] {
        members
            .save(Member::new(email, nickname, None, AuditFields::created(&ctx())))
            .await
            .unwrap();
    }
    let keyboard = products
        .save(Product::new("키보드", 30_000, AuditFields::created(&ctx())).with_stock(5))
        .await
        .unwrap()
        .id;
    let mouse = products
        .save(Product::new("마우스", 10_000, AuditFields::created(&ctx())).with_stock(5))
        .await
        .unwrap()
        .id;

    let service = CartService::new(
        Arc::new(InMemoryCartRepository::new()),
        Arc::new(InMemoryCartItemRepository::new()),
        members,
        Arc::clone(&products),
    );
    Fixture {
        service,
        products,
        keyboard,
        mouse,
    }
}

fn add(product_id: i64, quantity: i32) -> AddCartItem {
    AddCartItem { product_id, quantity }
}

#[tokio::test]
async fn test_get_or_create_is_idempotent() {
    let f = fixture().await;

    let first = f.service.get_or_create(&ctx(), KIM).await.unwrap();
    let second = f.service.get_or_create(&ctx(), KIM).await.unwrap();

    assert_eq!(first.cno, second.cno);
    assert_eq!(first.member_id, KIM);
    assert!(first.items.is_empty());
    assert_eq!(first.total_amount, 0);
}

#[tokio::test]
async fn test_unknown_member_has_no_cart() {
    let f = fixture().await;

    let err = f.service.get_or_create(&ctx(), "ghost@mall.com").await.unwrap_err();

    assert_eq!(err.error_code(), ErrorCode::MemberNotFound);
}

#[tokio::test]
async fn test_adding_same_product_merges_quantity() {
    let f = fixture().await;

    let first = f.service.add_item(&ctx(), KIM, add(f.keyboard, 1)).await.unwrap();
    let merged = f.service.add_item(&ctx(), KIM, add(f.keyboard, 2)).await.unwrap();
    f.service.add_item(&ctx(), KIM, add(f.mouse, 1)).await.unwrap();

    assert_eq!(first.item_id, merged.item_id);
    assert_eq!(merged.quantity, 3);
    assert_eq!(merged.total_price, 90_000);
    let cart = f.service.get_or_create(&ctx(), KIM).await.unwrap();
    assert_eq!(cart.items.len(), 2);
    assert_eq!(cart.total_item_count, 4);
    assert_eq!(cart.total_amount, 100_000);
    assert_eq!(f.service.total_amount(KIM).await.unwrap(), 100_000);
}

#[tokio::test]
async fn test_missing_or_deleted_product_is_rejected() {
    let f = fixture().await;
    let mut mouse = f.products.find_by_id(f.mouse).await.unwrap().unwrap();
    mouse.soft_delete(&ctx());
    f.products.update(&mouse).await.unwrap();

    let missing = f.service.add_item(&ctx(), KIM, add(999, 1)).await.unwrap_err();
    let deleted = f.service.add_item(&ctx(), KIM, add(f.mouse, 1)).await.unwrap_err();

    assert_eq!(missing.error_code(), ErrorCode::ProductNotFound);
    assert_eq!(deleted.error_code(), ErrorCode::ProductNotFound);
}

#[tokio::test]
async fn test_other_members_items_are_off_limits() {
    let f = fixture().await;
    let item = f.service.add_item(&ctx(), KIM, add(f.keyboard, 1)).await.unwrap();

    let update = f.service.update_item(&ctx(), LEE, item.item_id, 5).await.unwrap_err();
    let remove = f.service.remove_item(LEE, item.item_id).await.unwrap_err();
    let missing = f.service.remove_item(KIM, 12345).await.unwrap_err();

    assert_eq!(update.error_code(), ErrorCode::AccessDenied);
    assert_eq!(remove.error_code(), ErrorCode::AccessDenied);
    assert_eq!(missing.error_code(), ErrorCode::ResourceNotFound);
    assert_eq!(f.service.product_quantity(KIM, f.keyboard).await.unwrap(), 1);
}

#[tokio::test]
async fn test_update_and_remove_item() {
    let f = fixture().await;
    let item = f.service.add_item(&ctx(), KIM, add(f.keyboard, 1)).await.unwrap();

    let updated = f.service.update_item(&ctx(), KIM, item.item_id, 4).await.unwrap();
    assert_eq!(updated.quantity, 4);

    f.service.remove_item(KIM, item.item_id).await.unwrap();
    assert!(f.service.is_empty(KIM).await.unwrap());
    assert!(!f.service.has_product(KIM, f.keyboard).await.unwrap());
}

#[tokio::test]
async fn test_decrease_to_zero_removes_line() {
    let f = fixture().await;
    let item = f.service.add_item(&ctx(), KIM, add(f.keyboard, 2)).await.unwrap();

    let lowered = f.service.decrease_quantity(&ctx(), KIM, item.item_id, 1).await.unwrap();
    let raised = f.service.increase_quantity(&ctx(), KIM, item.item_id, 2).await.unwrap();
    let gone = f.service.decrease_quantity(&ctx(), KIM, item.item_id, 3).await.unwrap();

    assert_eq!(lowered.map(|i| i.quantity), Some(1));
    assert_eq!(raised.quantity, 3);
    assert!(gone.is_none());
    assert_eq!(f.service.item_count(KIM).await.unwrap(), 0);
}

#[tokio::test]
async fn test_merging_past_i32_range_is_invalid_input() {
    let f = fixture().await;
    let item = f.service.add_item(&ctx(), KIM, add(f.keyboard, 2_000_000_000)).await.unwrap();

    let err = f.service.add_item(&ctx(), KIM, add(f.keyboard, 2_000_000_000)).await.unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::InvalidInputValue);

    let err = f.service.increase_quantity(&ctx(), KIM, item.item_id, i32::MAX).await.unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::InvalidInputValue);
    assert_eq!(f.service.product_quantity(KIM, f.keyboard).await.unwrap(), 2_000_000_000);
}

#[tokio::test]
async fn test_batch_remove_and_clear() {
    let f = fixture().await;
    let keyboard = f.service.add_item(&ctx(), KIM, add(f.keyboard, 1)).await.unwrap();
    let mouse = f.service.add_item(&ctx(), KIM, add(f.mouse, 1)).await.unwrap();
    let others = f.service.add_item(&ctx(), LEE, add(f.mouse, 1)).await.unwrap();

    let rejected = f
        .service
        .remove_items(KIM, &[keyboard.item_id, others.item_id])
        .await
        .unwrap_err();
    assert_eq!(rejected.error_code(), ErrorCode::AccessDenied);
    assert_eq!(f.service.item_count(KIM).await.unwrap(), 2);

    let removed = f.service.remove_items(KIM, &[keyboard.item_id]).await.unwrap();
    assert_eq!(removed, 1);
    assert!(f.service.has_product(KIM, f.mouse).await.unwrap());
    assert_eq!(mouse.quantity, 1);

    assert_eq!(f.service.clear(KIM).await.unwrap(), 1);
    assert!(f.service.is_empty(KIM).await.unwrap());
    assert_eq!(f.service.item_count(LEE).await.unwrap(), 1);
}

#[tokio::test]
async fn test_clear_without_cart_fails() {
    let f = fixture().await;

    let err = f.service.clear(KIM).await.unwrap_err();

    assert_eq!(err.error_code(), ErrorCode::ResourceNotFound);
    assert_eq!(f.service.total_amount(KIM).await.unwrap(), 0);
}

#[tokio::test]
async fn test_non_positive_quantity_is_rejected() {
    let f = fixture().await;

    let err = f.service.add_item(&ctx(), KIM, add(f.keyboard, 0)).await.unwrap_err();

    assert_eq!(err.error_code(), ErrorCode::InvalidInputValue);
}
