use diesel::result;
use diesel_async::AsyncMysqlConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::deadpool::{Object, Pool};

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("failed to create database connection pool: {0}")]
    Pool(String),
}

/// Handle to the MySQL connection pool. Cloning shares the same pool.
#[derive(Clone)]
pub struct Database {
    pool: Pool<AsyncMysqlConnection>,
}

impl Database {
    /// Builds the pool. No connection is opened until the first checkout.
    pub fn connect(database_url: &str) -> Result<Self, DatabaseError> {
        let config = AsyncDieselConnectionManager::<AsyncMysqlConnection>::new(database_url);
        let pool = Pool::builder(config)
            .build()
            .map_err(|e| DatabaseError::Pool(e.to_string()))?;

        tracing::info!("DB connection pool created");

        Ok(Database { pool })
    }

    pub async fn get_connection(&self) -> Result<Object<AsyncMysqlConnection>, result::Error> {
        self.pool.get().await.map_err(|e| {
            tracing::error!("Failed to check out a database connection: {}", e);
            result::Error::DatabaseError(
                result::DatabaseErrorKind::UnableToSendCommand,
                Box::new(e.to_string()),
            )
        })
    }
}

/// Id generated by the last insert on this connection.
pub async fn last_insert_id(conn: &mut AsyncMysqlConnection) -> Result<i32, result::Error> {
    use diesel_async::RunQueryDsl;

    let id: i64 = diesel::select(diesel::dsl::sql::<diesel::sql_types::BigInt>(
        "CAST(LAST_INSERT_ID() AS SIGNED)",
    ))
    .get_result(conn)
    .await?;

    i32::try_from(id).map_err(|e| result::Error::DeserializationError(Box::new(e)))
}
