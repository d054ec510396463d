//! Sample data loaded at startup when `seed.enabled` is set
//!
//! Everything goes through the services so the audit trail and invariants
//! match what the API would produce. Each group is skipped when its table
//! already holds data.

use mall_core::domain::entities::{Actor, AuditContext, BUILT_IN_ROLES};
use mall_core::errors::DomainResult;
use mall_core::repositories::Storage;
use mall_core::services::{AddCartItem, CreateMember, CreateProduct, CreateRole, CreateTodo, UpdateMember};
use mall_shared::SeedConfig;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::state::AppState;

pub const SYSTEM_EMAIL: &str = "system@admin.com";
const SYSTEM_NICKNAME: &str = "시스템관리자";
const SYSTEM_PASSWORD: &str = "system123!";
const MEMBER_PASSWORD: &str = "password123";
const CART_ITEMS: usize = 100;

const TODO_TITLES: &[&str] = &[
    "프로젝트 설정하기",
    "데이터베이스 연결 확인하기",
    "REST API 엔드포인트 작성하기",
    "엔티티 매핑 완료하기",
    "단위 테스트 작성하기",
    "통합 테스트 구현하기",
    "로깅 설정 최적화하기",
    "보안 설정 강화하기",
    "예외 처리 로직 개선하기",
    "API 문서화 완료하기",
    "코드 리뷰 진행하기",
    "성능 최적화 작업하기",
    "배포 스크립트 작성하기",
    "모니터링 설정하기",
    "검색 기능 구현하기",
    "페이징 처리 최적화하기",
    "캐싱 전략 적용하기",
    "CI/CD 파이프라인 구축하기",
    "버그 수정 작업하기",
    "프로젝트 마무리 작업하기",
];

const AUTHORS: &[&str] = &[
    "김개발", "이프로", "박코더", "최엔지", "정데브", "한테크", "윤시스템", "장솔루션", "임아키텍트", "서풀스택",
];

const EMAIL_DOMAINS: &[&str] = &["@gmail.com", "@naver.com", "@kakao.com", "@daum.net", "@outlook.com"];

const NICKNAME_PREFIXES: &[&str] = &["Cool", "Smart", "Happy", "Super", "Bright", "Quick", "Clever", "Lucky"];

const PRODUCT_CATEGORIES: &[&str] = &["전자기기", "의류", "도서", "스포츠", "가구", "화장품", "식품", "완구"];

const PRODUCT_PREFIXES: &[&str] = &["프리미엄", "신상", "베스트", "인기", "추천", "특가", "한정판", "스마트"];

const PRODUCT_NAMES: &[&str] = &[
    "무선 이어폰", "스마트 워치", "블루투스 스피커", "노트북", "키보드", "모니터", "티셔츠", "운동화", "책상", "의자",
];

/// Load the sample data with a freshly seeded random generator
pub async fn run<S: Storage>(state: &AppState<S>, config: &SeedConfig) -> DomainResult<()> {
    run_with_rng(state, config, &mut StdRng::from_entropy()).await
}

pub async fn run_with_rng<S: Storage>(
    state: &AppState<S>,
    config: &SeedConfig,
    rng: &mut StdRng,
) -> DomainResult<()> {
    log::info!("Loading sample data");
    let system = AuditContext::system();

    seed_roles(state, &system).await?;
    seed_system_member(state, &system).await?;
    let members = seed_members(state, &system, config.members, rng).await?;
    let products = seed_products(state, &members, config.products, rng).await?;
    if !members.is_empty() && !products.is_empty() {
        seed_carts(state, &members, &products, rng).await?;
    }
    seed_todos(state, &members, config.todos, rng).await?;

    log::info!("Sample data loaded");
    Ok(())
}

async fn seed_roles<S: Storage>(state: &AppState<S>, ctx: &AuditContext) -> DomainResult<()> {
    for (role_name, description) in BUILT_IN_ROLES {
        if state.role_service.exists_by_name(role_name).await? {
            continue;
        }
        state
            .role_service
            .create(
                ctx,
                CreateRole {
                    role_name: role_name.to_string(),
                    description: Some(description.to_string()),
                },
            )
            .await?;
        log::debug!("Seeded role {}", role_name);
    }
    Ok(())
}

async fn seed_system_member<S: Storage>(state: &AppState<S>, ctx: &AuditContext) -> DomainResult<()> {
    if state.member_service.exists(SYSTEM_EMAIL).await? {
        return Ok(());
    }
    state
        .member_service
        .create(
            ctx,
            CreateMember {
                email: SYSTEM_EMAIL.to_string(),
                password: SYSTEM_PASSWORD.to_string(),
                nickname: SYSTEM_NICKNAME.to_string(),
                picture_url: None,
                social: false,
            },
        )
        .await?;
    state.member_service.add_role(ctx, SYSTEM_EMAIL, "ADMIN").await?;
    log::info!("Seeded system member {}", SYSTEM_EMAIL);
    Ok(())
}

/// Create `count` members unless only the system member exists; returns the
/// actors of the active ones
async fn seed_members<S: Storage>(
    state: &AppState<S>,
    ctx: &AuditContext,
    count: usize,
    rng: &mut StdRng,
) -> DomainResult<Vec<Actor>> {
    let existing = state.member_service.count().await?;
    if existing > 1 {
        log::info!("Skipping members, {} already exist", existing);
        return Ok(Vec::new());
    }

    let mut active = Vec::with_capacity(count);
    for i in 1..=count {
        let nickname = format!("{}{}{}", pick(NICKNAME_PREFIXES, rng), pick(AUTHORS, rng), i);
        let email = format!("testuser{}{}", i, pick(EMAIL_DOMAINS, rng));
        let social = rng.gen_bool(0.3);
        let is_active = rng.gen_bool(if social { 0.9 } else { 0.95 });
        let admin = !social && rng.gen_bool(0.1);

        state
            .member_service
            .create(
                ctx,
                CreateMember {
                    email: email.clone(),
                    password: MEMBER_PASSWORD.to_string(),
                    nickname: nickname.clone(),
                    picture_url: None,
                    social,
                },
            )
            .await?;
        if admin {
            state.member_service.add_role(ctx, &email, "ADMIN").await?;
        }
        if is_active {
            active.push(Actor::new(email, nickname));
        } else {
            let update = UpdateMember {
                is_active: Some(false),
                ..Default::default()
            };
            state.member_service.update(ctx, &email, update).await?;
        }
    }
    log::info!("Seeded {} members ({} active)", count, active.len());
    Ok(active)
}

/// Create `count` products with 1..=3 images each, soft deleting about one
/// in ten; returns the ids still for sale
async fn seed_products<S: Storage>(
    state: &AppState<S>,
    actors: &[Actor],
    count: usize,
    rng: &mut StdRng,
) -> DomainResult<Vec<i64>> {
    let existing = state.product_service.active_count().await?;
    if existing > 0 {
        log::info!("Skipping products, {} already exist", existing);
        return Ok(Vec::new());
    }

    let mut ctx = acting(actors, rng);
    let mut available = Vec::with_capacity(count);
    for i in 1..=count {
        if i % 10 == 1 {
            ctx = acting(actors, rng);
        }
        let category = pick(PRODUCT_CATEGORIES, rng);
        let product_name = format!("{} {} #{}", pick(PRODUCT_PREFIXES, rng), pick(PRODUCT_NAMES, rng), i);
        let image_count = rng.gen_range(1..=3);
        let request = CreateProduct {
            description: Some(format!(
                "{} 카테고리의 {}입니다. 고품질 소재와 뛰어난 기능성을 자랑합니다.",
                category, product_name
            )),
            product_name,
            price: rng.gen_range(1..500) * 1000,
            category: Some(category.to_string()),
            stock_quantity: rng.gen_range(0..=100),
            images: (1..=image_count)
                .map(|j| format!("product_{}_image_{}.jpg", i, j))
                .collect(),
            ..Default::default()
        };
        let product = state.product_service.create(&ctx, request).await?;

        if rng.gen_bool(0.1) {
            state.product_service.delete(&acting(actors, rng), product.id).await?;
        } else if product.is_available {
            available.push(product.id);
        }
    }
    log::info!("Seeded {} products ({} available)", count, available.len());
    Ok(available)
}

/// Give about 70% of the active members a cart, then spread items over them
async fn seed_carts<S: Storage>(
    state: &AppState<S>,
    actors: &[Actor],
    products: &[i64],
    rng: &mut StdRng,
) -> DomainResult<()> {
    let owners: Vec<&Actor> = actors.iter().filter(|_| rng.gen_bool(0.7)).collect();
    if owners.is_empty() {
        return Ok(());
    }
    for owner in &owners {
        let ctx = AuditContext::for_actor((*owner).clone());
        state.cart_service.get_or_create(&ctx, &owner.email).await?;
    }

    for _ in 0..CART_ITEMS {
        let Some(owner) = owners.choose(rng) else {
            break;
        };
        let Some(&product_id) = products.choose(rng) else {
            break;
        };
        let ctx = AuditContext::for_actor((*owner).clone());
        let request = AddCartItem {
            product_id,
            quantity: rng.gen_range(1..=5),
        };
        state.cart_service.add_item(&ctx, &owner.email, request).await?;
    }
    log::info!("Seeded {} carts with {} item additions", owners.len(), CART_ITEMS);
    Ok(())
}

async fn seed_todos<S: Storage>(
    state: &AppState<S>,
    actors: &[Actor],
    count: usize,
    rng: &mut StdRng,
) -> DomainResult<()> {
    let existing = state.todo_service.count().await?;
    if existing > 0 {
        log::info!("Skipping todos, {} already exist", existing);
        return Ok(());
    }

    for i in 1..=count {
        let request = CreateTodo {
            title: format!("{} #{}", pick(TODO_TITLES, rng), i),
            writer: pick(AUTHORS, rng).to_string(),
            complete: rng.gen_bool(0.3),
        };
        state.todo_service.create(&acting(actors, rng), request).await?;
    }
    log::info!("Seeded {} todos", count);
    Ok(())
}

fn pick<'a>(values: &[&'a str], rng: &mut StdRng) -> &'a str {
    values.choose(rng).copied().unwrap_or_default()
}

/// A random seeded member as the acting user, the system member when none exist
fn acting(actors: &[Actor], rng: &mut StdRng) -> AuditContext {
    match actors.choose(rng) {
        Some(actor) => AuditContext::for_actor(actor.clone()),
        None => AuditContext::system(),
    }
}
