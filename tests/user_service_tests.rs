//! User repository and service tests against a migrated MySQL database.

mod common;

use brewery_server_lib::api::controllers::dto::user_dto::CreateUserRequest;
use brewery_server_lib::data::database::Database;
use brewery_server_lib::data::models::user::UserKind;
use brewery_server_lib::data::repos::implementors::user_repo::UserRepo;
use brewery_server_lib::services::errors::ServiceError;
use brewery_server_lib::services::user_service::UserService;
use diesel::result;
use diesel_async::RunQueryDsl;

async fn setup() -> Result<Database, result::Error> {
    let db = Database::connect(&common::test_config().database_url)
        .expect("Failed to create the pool");

    let mut conn = db
        .get_connection()
        .await
        .expect("Failed to get a database connection");

    use brewery_server_lib::data::models::schema::{
        sale_items, sales, stock_operation_items, stock_operations, users,
    };

    diesel::delete(stock_operation_items::table).execute(&mut conn).await?;
    diesel::delete(stock_operations::table).execute(&mut conn).await?;
    diesel::delete(sale_items::table).execute(&mut conn).await?;
    diesel::delete(sales::table).execute(&mut conn).await?;
    diesel::delete(users::table).execute(&mut conn).await?;

    Ok(db)
}

fn new_user(email: &str, password: &str) -> CreateUserRequest {
    CreateUserRequest {
        name: "Ana".to_string(),
        email: email.to_string(),
        password: password.to_string(),
        kind: UserKind::Individual,
        document: None,
        state_registration: None,
        administrator: false,
        guest: false,
    }
}

#[tokio::test]
#[serial_test::serial]
#[ignore = "needs a MySQL database at DATABASE_URL"]
async fn test_database_connection() {
    let db = setup().await.expect("Setup failed");

    assert!(db.get_connection().await.is_ok());
}

#[tokio::test]
#[serial_test::serial]
#[ignore = "needs a MySQL database at DATABASE_URL"]
async fn test_create_user_stores_hash() {
    let db = setup().await.expect("Setup failed");
    let service = UserService::new(db.clone());

    let created = service
        .create_user(new_user("ana@brewery.local", "securepassword"))
        .await
        .expect("Failed to create user");

    let stored = UserRepo::new(db)
        .get_by_email("ana@brewery.local")
        .await
        .expect("Failed to retrieve user")
        .expect("User not found");

    assert_eq!(stored.id, created.id);
    assert_ne!(stored.password_hash, "securepassword");
}

#[tokio::test]
#[serial_test::serial]
#[ignore = "needs a MySQL database at DATABASE_URL"]
async fn test_duplicate_email_is_rejected() {
    let db = setup().await.expect("Setup failed");
    let service = UserService::new(db);

    service
        .create_user(new_user("ana@brewery.local", "securepassword"))
        .await
        .expect("Failed to create user");

    let result = service
        .create_user(new_user("ana@brewery.local", "otherpassword"))
        .await;

    assert!(matches!(result, Err(ServiceError::UserAlreadyExists)));
}

#[tokio::test]
#[serial_test::serial]
#[ignore = "needs a MySQL database at DATABASE_URL"]
async fn test_authenticate() {
    let db = setup().await.expect("Setup failed");
    let service = UserService::new(db);

    service
        .create_user(new_user("ana@brewery.local", "securepassword"))
        .await
        .expect("Failed to create user");

    assert!(service.authenticate("ana@brewery.local", "securepassword").await.is_ok());
    assert!(matches!(
        service.authenticate("ana@brewery.local", "wrongpassword").await,
        Err(ServiceError::PasswordMismatch)
    ));
    assert!(matches!(
        service.authenticate("nobody@brewery.local", "securepassword").await,
        Err(ServiceError::UserNotFound)
    ));
}
