use std::sync::Arc;

use mall_shared::{ErrorCode, PageQuery};

use super::*;
use crate::domain::entities::{Actor, AuditContext};
use crate::repositories::InMemoryTodoRepository;

fn service() -> TodoService<InMemoryTodoRepository> {
    TodoService::new(Arc::new(InMemoryTodoRepository::new()), TodoServiceConfig::default())
}

fn ctx() -> AuditContext {
    AuditContext::for_actor(Actor::new("kim@mall.com", "김철수"))
}

fn create(title: &str, writer: &str, complete: bool) -> CreateTodo {
    CreateTodo {
        title: title.to_string(),
        writer: writer.to_string(),
        complete,
    }
}

fn newest_first() -> PageQuery {
    PageQuery::new(0, 20).with_sort(default_todo_sort())
}

#[tokio::test]
async fn test_create_assigns_number_and_audit() {
    let service = service();

    let todo = service.create(&ctx(), create("  장보기  ", "kim", false)).await.unwrap();

    assert!(todo.tno > 0);
    assert_eq!(todo.title, "장보기");
    assert!(!todo.complete);
    assert_eq!(todo.complete_status, "미완료");
    assert_eq!(todo.audit.created_by.as_deref(), Some("kim@mall.com"));
    assert_eq!(todo.audit.created_by_nickname.as_deref(), Some("김철수"));
}

#[tokio::test]
async fn test_get_missing_todo_is_business_error() {
    let service = service();

    let err = service.get(999).await.unwrap_err();

    assert!(err.is_business());
    assert_eq!(err.error_code(), ErrorCode::TodoNotFound);
    assert_eq!(
        err.details(),
        Some("할일번호 999에 해당하는 할일을 찾을 수 없습니다.")
    );
}

#[tokio::test]
async fn test_update_changes_only_given_fields() {
    let service = service();
    let created = service.create(&ctx(), create("원래 제목", "kim", false)).await.unwrap();

    let updated = service
        .update(
            &AuditContext::for_actor(Actor::new("lee@mall.com", "이영희")),
            created.tno,
            UpdateTodo {
                title: Some("새 제목".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "새 제목");
    assert_eq!(updated.writer, "kim");
    assert_eq!(updated.audit.created_by.as_deref(), Some("kim@mall.com"));
    assert_eq!(updated.audit.updated_by.as_deref(), Some("lee@mall.com"));
}

#[tokio::test]
async fn test_toggle_twice_restores_flag() {
    let service = service();
    let created = service.create(&ctx(), create("운동", "kim", false)).await.unwrap();

    let first = service.toggle(&ctx(), created.tno).await.unwrap();
    let second = service.toggle(&ctx(), created.tno).await.unwrap();

    assert!(first.complete);
    assert_eq!(first.complete_status, "완료");
    assert_eq!(second.complete, created.complete);
}

#[tokio::test]
async fn test_delete_then_get_fails() {
    let service = service();
    let created = service.create(&ctx(), create("청소", "kim", false)).await.unwrap();

    service.delete(created.tno).await.unwrap();

    assert_eq!(
        service.get(created.tno).await.unwrap_err().error_code(),
        ErrorCode::TodoNotFound
    );
    assert_eq!(
        service.delete(created.tno).await.unwrap_err().error_code(),
        ErrorCode::TodoNotFound
    );
}

#[tokio::test]
async fn test_list_pages_newest_first() {
    let service = service();
    for i in 0..25 {
        service
            .create(&ctx(), create(&format!("할일 {}", i), "kim", false))
            .await
            .unwrap();
    }

    let first = service.list(&newest_first()).await.unwrap();
    let second = service
        .list(&PageQuery::new(1, 20).with_sort(default_todo_sort()))
        .await
        .unwrap();

    assert_eq!(first.content.len(), 20);
    assert_eq!(first.total_elements, 25);
    assert_eq!(first.total_pages, 2);
    assert!(first.first);
    assert!(!first.last);
    assert!(first.content[0].tno > first.content[1].tno);
    assert_eq!(second.content.len(), 5);
    assert!(second.last);
    assert_eq!(first.pageable.sort, "tno: DESC");
}

#[tokio::test]
async fn test_search_and_filters() {
    let service = service();
    service.create(&ctx(), create("Rust 공부", "kim", true)).await.unwrap();
    service.create(&ctx(), create("rust 복습", "lee", false)).await.unwrap();
    service.create(&ctx(), create("산책", "kim", false)).await.unwrap();

    let by_writer = service.list_by_writer("kim", &newest_first()).await.unwrap();
    let done = service.list_by_complete(true, &newest_first()).await.unwrap();
    let both = service
        .search(Some("kim"), Some(false), &newest_first())
        .await
        .unwrap();
    let everything = service.search(None, None, &newest_first()).await.unwrap();
    let titled = service.search_by_title("RUST", &newest_first()).await.unwrap();

    assert_eq!(by_writer.total_elements, 2);
    assert_eq!(done.total_elements, 1);
    assert_eq!(both.total_elements, 1);
    assert_eq!(both.content[0].title, "산책");
    assert_eq!(everything.total_elements, 3);
    assert_eq!(titled.total_elements, 2);
}

#[tokio::test]
async fn test_counts() {
    let service = service();
    service.create(&ctx(), create("a", "kim", true)).await.unwrap();
    service.create(&ctx(), create("b", "kim", false)).await.unwrap();
    service.create(&ctx(), create("c", "lee", false)).await.unwrap();

    assert_eq!(service.count().await.unwrap(), 3);
    assert_eq!(service.count_by_writer("kim").await.unwrap(), 2);
    assert_eq!(service.count_by_complete(false).await.unwrap(), 2);
    assert_eq!(service.completed_count_by_writer("kim").await.unwrap(), 1);
    assert_eq!(service.incomplete_count_by_writer("kim").await.unwrap(), 1);
    assert_eq!(service.count_by_writer("nobody").await.unwrap(), 0);
}

#[tokio::test]
async fn test_bulk_delete() {
    let service = service();
    service.create(&ctx(), create("a", "kim", false)).await.unwrap();
    service.create(&ctx(), create("b", "kim", false)).await.unwrap();
    service.create(&ctx(), create("c", "lee", false)).await.unwrap();

    assert_eq!(service.delete_by_writer("kim").await.unwrap(), 2);
    assert_eq!(service.list_all().await.unwrap().len(), 1);
    assert_eq!(service.delete_all().await.unwrap(), 1);
    assert!(service.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_all_by_writer_is_newest_first() {
    let service = service();
    let older = service.create(&ctx(), create("a", "kim", false)).await.unwrap();
    let newer = service.create(&ctx(), create("b", "kim", false)).await.unwrap();
    service.create(&ctx(), create("c", "lee", false)).await.unwrap();

    let listed = service.list_all_by_writer("kim").await.unwrap();

    let numbers: Vec<i64> = listed.iter().map(|t| t.tno).collect();
    assert_eq!(numbers, vec![newer.tno, older.tno]);
}

#[tokio::test]
async fn test_recently_completed_respects_limit() {
    let service = service();
    for i in 0..4 {
        service
            .create(&ctx(), create(&format!("done {}", i), "kim", true))
            .await
            .unwrap();
    }
    service.create(&ctx(), create("open", "kim", false)).await.unwrap();

    let recent = service.recently_completed(Some(3)).await.unwrap();
    let default_limit = service.recently_completed(None).await.unwrap();

    assert_eq!(recent.len(), 3);
    assert!(recent.iter().all(|t| t.complete));
    assert_eq!(default_limit.len(), 4);
}
