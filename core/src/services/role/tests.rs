use std::sync::Arc;

use mall_shared::{ErrorCode, PageQuery};

use super::*;
use crate::domain::entities::{AuditContext, AuditFields, Member, MemberRole};
use crate::repositories::{InMemoryMemberRepository, InMemoryRoleRepository, MemberRepository};

struct Fixture {
    service: RoleService<InMemoryRoleRepository, InMemoryMemberRepository>,
    members: Arc<InMemoryMemberRepository>,
}

fn fixture() -> Fixture {
    let members = Arc::new(InMemoryMemberRepository::new());
    let service = RoleService::new(Arc::new(InMemoryRoleRepository::new()), Arc::clone(&members));
    Fixture { service, members }
}

fn ctx() -> AuditContext {
    AuditContext::system()
}

fn role(name: &str, description: &str) -> CreateRole {
    CreateRole {
        role_name: name.to_string(),
        description: Some(description.to_string()),
    }
}

fn query() -> PageQuery {
    PageQuery::new(0, 20).with_sort(default_role_sort())
}

#[tokio::test]
async fn test_create_and_duplicate() {
    let f = fixture();

    let created = f.service.create(&ctx(), role("ROLE_USER", "일반 사용자")).await.unwrap();
    let duplicate = f
        .service
        .create(&ctx(), role("ROLE_USER", "again"))
        .await
        .unwrap_err();

    assert!(created.is_default);
    assert_eq!(created.member_count, 0);
    assert_eq!(duplicate.error_code(), ErrorCode::RoleAlreadyExists);
}

#[tokio::test]
async fn test_default_role_cannot_be_deleted() {
    let f = fixture();
    let user = f.service.create(&ctx(), role("ROLE_USER", "일반 사용자")).await.unwrap();

    let err = f.service.delete(&ctx(), user.id).await.unwrap_err();

    assert_eq!(err.error_code(), ErrorCode::RoleInUse);
    assert!(f.service.get(user.id).await.is_ok());
}

#[tokio::test]
async fn test_soft_delete_and_restore() {
    let f = fixture();
    let admin = f.service.create(&ctx(), role("ROLE_ADMIN", "관리자")).await.unwrap();

    f.service.delete(&ctx(), admin.id).await.unwrap();

    assert_eq!(
        f.service.get(admin.id).await.unwrap_err().error_code(),
        ErrorCode::RoleNotFound
    );
    assert!(f.service.get_by_name("ROLE_ADMIN").await.is_err());
    assert_eq!(f.service.list(&query()).await.unwrap().total_elements, 0);
    assert!(f.service.set_default(admin.id).await.is_err());

    let restored = f.service.restore(&ctx(), admin.id).await.unwrap();

    assert!(!restored.audit.deleted);
    assert_eq!(f.service.list_active().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_checks_new_name() {
    let f = fixture();
    let seller = f.service.create(&ctx(), role("ROLE_SELLER", "판매자")).await.unwrap();
    f.service.create(&ctx(), role("ROLE_MANAGER", "매니저")).await.unwrap();

    let taken = f
        .service
        .update(
            &ctx(),
            seller.id,
            UpdateRole {
                role_name: Some("ROLE_MANAGER".to_string()),
                description: None,
            },
        )
        .await
        .unwrap_err();
    let described = f
        .service
        .update(
            &ctx(),
            seller.id,
            UpdateRole {
                role_name: None,
                description: Some("입점 판매자".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(taken.error_code(), ErrorCode::RoleAlreadyExists);
    assert_eq!(described.role_name, "ROLE_SELLER");
    assert_eq!(described.description.as_deref(), Some("입점 판매자"));
}

#[tokio::test]
async fn test_member_count_follows_member_roles() {
    let f = fixture();
    let admin = f.service.create(&ctx(), role("ROLE_ADMIN", "관리자")).await.unwrap();
    let seller = f.service.create(&ctx(), role("ROLE_SELLER", "판매자")).await.unwrap();
    let mut member = Member::new("boss@mall.com", "사장", None, AuditFields::created(&ctx()));
    member.add_role(MemberRole::Admin);
    f.members.save(member).await.unwrap();

    assert_eq!(f.service.member_count(admin.id).await.unwrap(), 1);
    assert_eq!(f.service.get(admin.id).await.unwrap().member_count, 1);
    assert_eq!(f.service.member_count(seller.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_default_lookup() {
    let f = fixture();
    assert!(f.service.get_default().await.unwrap().is_none());

    let user = f.service.create(&ctx(), role("ROLE_USER", "일반 사용자")).await.unwrap();

    let default = f.service.get_default().await.unwrap().unwrap();
    assert_eq!(default.id, user.id);
    assert!(f.service.is_default(user.id).await.unwrap());
    f.service.set_default(user.id).await.unwrap();
    assert_eq!(
        f.service.unset_default(999).await.unwrap_err().error_code(),
        ErrorCode::RoleNotFound
    );
}

#[tokio::test]
async fn test_search_matches_name_or_description() {
    let f = fixture();
    f.service.create(&ctx(), role("ROLE_ADMIN", "관리자")).await.unwrap();
    f.service.create(&ctx(), role("ROLE_SELLER", "Store owner")).await.unwrap();

    let by_name = f.service.search("admin", &query()).await.unwrap();
    let by_description = f.service.search("STORE", &query()).await.unwrap();

    assert_eq!(by_name.total_elements, 1);
    assert_eq!(by_description.content[0].role_name, "ROLE_SELLER");
    assert_eq!(f.service.active_count().await.unwrap(), 2);
    assert!(f.service.exists_by_name("ROLE_ADMIN").await.unwrap());
}
