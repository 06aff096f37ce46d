//! Authentication and user service tests.

mod common;

use std::sync::Arc;

use mockall::predicate::eq;
use uuid::Uuid;

use finance_tracker::config::Config;
use finance_tracker::domain::{Password, User};
use finance_tracker::errors::AppError;
use finance_tracker::infra::MockUserRepository;
use finance_tracker::services::{AuthService, Authenticator, UserManager, UserService};

use common::TestUnitOfWork;

const SECRET: &str = "integration-test-secret-32-chars!!";

fn stored_user(username: &str, password: &str) -> User {
    let hash = Password::new(password, username).unwrap().into_string();
    User::new(username.to_string(), hash)
}

fn authenticator(repo: MockUserRepository) -> (Arc<TestUnitOfWork>, Authenticator<TestUnitOfWork>) {
    let uow = Arc::new(TestUnitOfWork::with_users(repo));
    let service = Authenticator::new(uow.clone(), Config::with_secret(SECRET));
    (uow, service)
}

// =============================================================================
// Registration
// =============================================================================

#[tokio::test]
async fn test_register_rejects_taken_username() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username()
        .with(eq("budi"))
        .returning(|name| Ok(Some(User::new(name.to_string(), "hash".to_string()))));

    let (uow, service) = authenticator(repo);
    let result = service
        .register("budi".to_string(), "long-enough".to_string())
        .await;

    assert!(matches!(result, Err(AppError::Conflict(ref entity)) if entity == "Username"));
    assert_eq!(uow.attempted_transactions(), 0);
}

#[tokio::test]
async fn test_register_rejects_password_equal_to_username() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username().returning(|_| Ok(None));

    let (uow, service) = authenticator(repo);
    let result = service
        .register("budisantoso".to_string(), "BudiSantoso".to_string())
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(uow.attempted_transactions(), 0);
}

#[tokio::test]
async fn test_register_writes_user_and_seeds_in_one_transaction() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username().returning(|_| Ok(None));

    let (uow, service) = authenticator(repo);
    let result = service
        .register("siti".to_string(), "long-enough".to_string())
        .await;

    // The user row is only written inside the transaction, which the mock refuses
    assert!(matches!(result, Err(AppError::Internal(_))));
    assert_eq!(uow.attempted_transactions(), 1);
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_login_issues_verifiable_token() {
    let user = stored_user("budi", "correct-horse");
    let user_id = user.id;

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username()
        .with(eq("budi"))
        .returning(move |_| Ok(Some(user.clone())));

    let (_, service) = authenticator(repo);
    let token = service
        .login("budi".to_string(), "correct-horse".to_string())
        .await
        .unwrap();

    assert_eq!(token.token_type, "Bearer");
    assert_eq!(token.user.id, user_id);

    let claims = service.verify_token(&token.access_token).unwrap();
    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.username, "budi");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let user = stored_user("budi", "correct-horse");

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username()
        .returning(move |_| Ok(Some(user.clone())));

    let (_, service) = authenticator(repo);
    let result = service
        .login("budi".to_string(), "battery-staple".to_string())
        .await;

    assert!(matches!(result, Err(AppError::InvalidCredentials)));
}

#[tokio::test]
async fn test_login_unknown_user_gives_same_error() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username().returning(|_| Ok(None));

    let (_, service) = authenticator(repo);
    let result = service
        .login("ghost".to_string(), "whatever-it-is".to_string())
        .await;

    assert!(matches!(result, Err(AppError::InvalidCredentials)));
}

#[tokio::test]
async fn test_verify_rejects_garbage_token() {
    let (_, service) = authenticator(MockUserRepository::new());
    assert!(service.verify_token("not-a-jwt").is_err());
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn test_get_user_success() {
    let user_id = Uuid::new_v4();

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().with(eq(user_id)).returning(|id| {
        let mut user = User::new("budi".to_string(), "hash".to_string());
        user.id = id;
        Ok(Some(user))
    });

    let service = UserManager::new(Arc::new(TestUnitOfWork::with_users(repo)));
    let user = service.get_user(user_id).await.unwrap();

    assert_eq!(user.id, user_id);
}

#[tokio::test]
async fn test_get_user_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().returning(|_| Ok(None));

    let service = UserManager::new(Arc::new(TestUnitOfWork::with_users(repo)));
    let result = service.get_user(Uuid::new_v4()).await;

    assert!(matches!(result, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_delete_user_success() {
    let user_id = Uuid::new_v4();

    let mut repo = MockUserRepository::new();
    repo.expect_delete()
        .with(eq(user_id))
        .times(1)
        .returning(|_| Ok(()));

    let service = UserManager::new(Arc::new(TestUnitOfWork::with_users(repo)));
    assert!(service.delete_user(user_id).await.is_ok());
}
