use crate::data::database::{Database, last_insert_id};
use crate::data::models::package::{NewPackage, Package, UpdatePackage};
use crate::data::repos::traits::repository::{Page, Repository};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

pub struct PackageRepo {
    db: Database,
}

impl PackageRepo {
    pub fn new(db: Database) -> Self {
        PackageRepo { db }
    }

    pub async fn get_all(&self) -> Result<Vec<Package>, result::Error> {
        use crate::data::models::schema::packages::dsl::{id, packages};

        let mut conn = self.db.get_connection().await?;

        packages
            .order(id.asc())
            .select(Package::as_select())
            .load(&mut conn)
            .await
    }
}

#[async_trait]
impl Repository for PackageRepo {
    type Id = i32;
    type Item = Package;
    type NewItem = NewPackage;
    type UpdateForm = UpdatePackage;

    async fn get_page(&self, page: Page) -> Result<(Vec<Self::Item>, i64), result::Error> {
        use crate::data::models::schema::packages::dsl::{id, packages};

        let mut conn = self.db.get_connection().await?;

        let total = packages.count().get_result::<i64>(&mut conn).await?;
        let rows = packages
            .order(id.asc())
            .limit(page.per_page)
            .offset(page.offset())
            .select(Package::as_select())
            .load(&mut conn)
            .await?;

        Ok((rows, total))
    }

    async fn get_by_id(&self, package_id: Self::Id) -> Result<Option<Self::Item>, result::Error> {
        use crate::data::models::schema::packages::dsl::packages;

        let mut conn = self.db.get_connection().await?;

        packages
            .find(package_id)
            .select(Package::as_select())
            .first(&mut conn)
            .await
            .optional()
    }

    async fn add(&self, item: Self::NewItem) -> Result<Self::Item, result::Error> {
        use crate::data::models::schema::packages::dsl::packages;

        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                diesel::insert_into(packages)
                    .values(&item)
                    .execute(connection)
                    .await?;
                let new_id = last_insert_id(connection).await?;

                packages
                    .find(new_id)
                    .select(Package::as_select())
                    .first(connection)
                    .await
            }
            .scope_boxed()
        })
        .await
    }

    async fn update(
        &self,
        package_id: Self::Id,
        item: Self::UpdateForm,
    ) -> Result<Option<Self::Item>, result::Error> {
        use crate::data::models::schema::packages::dsl::{id, packages};

        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                let found = packages
                    .find(package_id)
                    .select(id)
                    .first::<i32>(connection)
                    .await
                    .optional()?;
                if found.is_none() {
                    return Ok(None);
                }

                diesel::update(packages.find(package_id))
                    .set(&item)
                    .execute(connection)
                    .await?;

                packages
                    .find(package_id)
                    .select(Package::as_select())
                    .first(connection)
                    .await
                    .map(Some)
            }
            .scope_boxed()
        })
        .await
    }
}
