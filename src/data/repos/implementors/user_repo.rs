use crate::data::database::{Database, last_insert_id};
use crate::data::models::user::{NewUser, UpdateProfile, UpdateUser, User};
use crate::data::repos::traits::repository::{Page, Repository};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

pub struct UserRepo {
    db: Database,
}

impl UserRepo {
    pub fn new(db: Database) -> Self {
        UserRepo { db }
    }

    pub async fn get_by_email(&self, email_query: &str) -> Result<Option<User>, result::Error> {
        use crate::data::models::schema::users::dsl::{email, users};

        let mut conn = self.db.get_connection().await?;

        match users
            .filter(email.eq(email_query))
            .select(User::as_select())
            .first(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn get_all(&self) -> Result<Vec<User>, result::Error> {
        use crate::data::models::schema::users::dsl::{id, users};

        let mut conn = self.db.get_connection().await?;

        users
            .order(id.asc())
            .select(User::as_select())
            .load(&mut conn)
            .await
    }

    /// Updates name and email, optionally replacing the password hash in the
    /// same transaction.
    pub async fn update_profile(
        &self,
        user_id: i32,
        profile: UpdateProfile,
        new_hash: Option<String>,
    ) -> Result<Option<User>, result::Error> {
        use crate::data::models::schema::users::dsl::{password_hash, users};

        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                if !exists(connection, user_id).await? {
                    return Ok(None);
                }

                diesel::update(users.find(user_id))
                    .set(&profile)
                    .execute(connection)
                    .await?;

                if let Some(hash) = new_hash {
                    diesel::update(users.find(user_id))
                        .set(password_hash.eq(hash))
                        .execute(connection)
                        .await?;
                }

                users
                    .find(user_id)
                    .select(User::as_select())
                    .first(connection)
                    .await
                    .map(Some)
            }
            .scope_boxed()
        })
        .await
    }
}

async fn exists(
    conn: &mut diesel_async::AsyncMysqlConnection,
    user_id: i32,
) -> Result<bool, result::Error> {
    use crate::data::models::schema::users::dsl::{id, users};

    users
        .find(user_id)
        .select(id)
        .first::<i32>(conn)
        .await
        .optional()
        .map(|found| found.is_some())
}

#[async_trait]
impl Repository for UserRepo {
    type Id = i32;
    type Item = User;
    type NewItem = NewUser;
    type UpdateForm = (UpdateUser, Option<String>);

    async fn get_page(&self, page: Page) -> Result<(Vec<Self::Item>, i64), result::Error> {
        use crate::data::models::schema::users::dsl::{id, users};

        let mut conn = self.db.get_connection().await?;

        let total = users.count().get_result::<i64>(&mut conn).await?;
        let rows = users
            .order(id.asc())
            .limit(page.per_page)
            .offset(page.offset())
            .select(User::as_select())
            .load(&mut conn)
            .await?;

        Ok((rows, total))
    }

    async fn get_by_id(&self, user_id: Self::Id) -> Result<Option<Self::Item>, result::Error> {
        use crate::data::models::schema::users::dsl::users;

        let mut conn = self.db.get_connection().await?;

        match users
            .find(user_id)
            .select(User::as_select())
            .first(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn add(&self, item: Self::NewItem) -> Result<Self::Item, result::Error> {
        use crate::data::models::schema::users::dsl::users;

        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                diesel::insert_into(users)
                    .values(&item)
                    .execute(connection)
                    .await?;
                let new_id = last_insert_id(connection).await?;

                users
                    .find(new_id)
                    .select(User::as_select())
                    .first(connection)
                    .await
            }
            .scope_boxed()
        })
        .await
    }

    /// The optional second half of the form is a new password hash.
    async fn update(
        &self,
        user_id: Self::Id,
        item: Self::UpdateForm,
    ) -> Result<Option<Self::Item>, result::Error> {
        use crate::data::models::schema::users::dsl::{password_hash, users};

        let (form, new_hash) = item;
        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                if !exists(connection, user_id).await? {
                    return Ok(None);
                }

                diesel::update(users.find(user_id))
                    .set(&form)
                    .execute(connection)
                    .await?;
                if let Some(hash) = new_hash {
                    diesel::update(users.find(user_id))
                        .set(password_hash.eq(hash))
                        .execute(connection)
                        .await?;
                }

                users
                    .find(user_id)
                    .select(User::as_select())
                    .first(connection)
                    .await
                    .map(Some)
            }
            .scope_boxed()
        })
        .await
    }
}
