use crate::data::database::{Database, last_insert_id};
use crate::data::models::size::{NewSize, Size, UpdateSize};
use crate::data::repos::traits::repository::{Page, Repository};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

pub struct SizeRepo {
    db: Database,
}

impl SizeRepo {
    pub fn new(db: Database) -> Self {
        SizeRepo { db }
    }

    pub async fn get_all(&self) -> Result<Vec<Size>, result::Error> {
        use crate::data::models::schema::sizes::dsl::{id, sizes};

        let mut conn = self.db.get_connection().await?;

        sizes
            .order(id.asc())
            .select(Size::as_select())
            .load(&mut conn)
            .await
    }
}

#[async_trait]
impl Repository for SizeRepo {
    type Id = i32;
    type Item = Size;
    type NewItem = NewSize;
    type UpdateForm = UpdateSize;

    async fn get_page(&self, page: Page) -> Result<(Vec<Self::Item>, i64), result::Error> {
        use crate::data::models::schema::sizes::dsl::{id, sizes};

        let mut conn = self.db.get_connection().await?;

        let total = sizes.count().get_result::<i64>(&mut conn).await?;
        let rows = sizes
            .order(id.asc())
            .limit(page.per_page)
            .offset(page.offset())
            .select(Size::as_select())
            .load(&mut conn)
            .await?;

        Ok((rows, total))
    }

    async fn get_by_id(&self, size_id: Self::Id) -> Result<Option<Self::Item>, result::Error> {
        use crate::data::models::schema::sizes::dsl::sizes;

        let mut conn = self.db.get_connection().await?;

        sizes
            .find(size_id)
            .select(Size::as_select())
            .first(&mut conn)
            .await
            .optional()
    }

    async fn add(&self, item: Self::NewItem) -> Result<Self::Item, result::Error> {
        use crate::data::models::schema::sizes::dsl::sizes;

        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                diesel::insert_into(sizes)
                    .values(&item)
                    .execute(connection)
                    .await?;
                let new_id = last_insert_id(connection).await?;

                sizes
                    .find(new_id)
                    .select(Size::as_select())
                    .first(connection)
                    .await
            }
            .scope_boxed()
        })
        .await
    }

    async fn update(
        &self,
        size_id: Self::Id,
        item: Self::UpdateForm,
    ) -> Result<Option<Self::Item>, result::Error> {
        use crate::data::models::schema::sizes::dsl::{id, sizes};

        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                let found = sizes
                    .find(size_id)
                    .select(id)
                    .first::<i32>(connection)
                    .await
                    .optional()?;
                if found.is_none() {
                    return Ok(None);
                }

                diesel::update(sizes.find(size_id))
                    .set(&item)
                    .execute(connection)
                    .await?;

                sizes
                    .find(size_id)
                    .select(Size::as_select())
                    .first(connection)
                    .await
                    .map(Some)
            }
            .scope_boxed()
        })
        .await
    }
}
