use crate::data::database::{Database, last_insert_id};
use crate::data::models::price::{NewProductPrice, ProductPrice, UpdateProductPrice};
use crate::data::repos::traits::repository::{Page, Repository};
use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::result;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

pub struct PriceRepo {
    db: Database,
}

impl PriceRepo {
    pub fn new(db: Database) -> Self {
        PriceRepo { db }
    }

    pub async fn get_page_for_product(
        &self,
        owner_id: i32,
        page: Page,
    ) -> Result<(Vec<ProductPrice>, i64), result::Error> {
        use crate::data::models::schema::products_prices::dsl::{id, product_id, products_prices};

        let mut conn = self.db.get_connection().await?;

        let total = products_prices
            .filter(product_id.eq(owner_id))
            .count()
            .get_result::<i64>(&mut conn)
            .await?;
        let rows = products_prices
            .filter(product_id.eq(owner_id))
            .order(id.asc())
            .limit(page.per_page)
            .offset(page.offset())
            .select(ProductPrice::as_select())
            .load(&mut conn)
            .await?;

        Ok((rows, total))
    }

    /// The price in effect for a product/size on `on`. When windows
    /// overlap the one that started last wins.
    pub async fn find_valid(
        &self,
        product: i32,
        size: i32,
        on: NaiveDate,
    ) -> Result<Option<ProductPrice>, result::Error> {
        use crate::data::models::schema::products_prices::dsl::*;

        let mut conn = self.db.get_connection().await?;

        products_prices
            .filter(product_id.eq(product))
            .filter(size_id.eq(size))
            .filter(start_date.le(on))
            .filter(end_date.is_null().or(end_date.ge(on)))
            .order((start_date.desc(), id.desc()))
            .select(ProductPrice::as_select())
            .first(&mut conn)
            .await
            .optional()
    }
}

#[async_trait]
impl Repository for PriceRepo {
    type Id = i32;
    type Item = ProductPrice;
    type NewItem = NewProductPrice;
    type UpdateForm = UpdateProductPrice;

    async fn get_page(&self, page: Page) -> Result<(Vec<Self::Item>, i64), result::Error> {
        use crate::data::models::schema::products_prices::dsl::{id, products_prices};

        let mut conn = self.db.get_connection().await?;

        let total = products_prices.count().get_result::<i64>(&mut conn).await?;
        let rows = products_prices
            .order(id.asc())
            .limit(page.per_page)
            .offset(page.offset())
            .select(ProductPrice::as_select())
            .load(&mut conn)
            .await?;

        Ok((rows, total))
    }

    async fn get_by_id(&self, price_id: Self::Id) -> Result<Option<Self::Item>, result::Error> {
        use crate::data::models::schema::products_prices::dsl::products_prices;

        let mut conn = self.db.get_connection().await?;

        products_prices
            .find(price_id)
            .select(ProductPrice::as_select())
            .first(&mut conn)
            .await
            .optional()
    }

    async fn add(&self, item: Self::NewItem) -> Result<Self::Item, result::Error> {
        use crate::data::models::schema::products_prices::dsl::products_prices;

        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                diesel::insert_into(products_prices)
                    .values(&item)
                    .execute(connection)
                    .await?;
                let new_id = last_insert_id(connection).await?;

                products_prices
                    .find(new_id)
                    .select(ProductPrice::as_select())
                    .first(connection)
                    .await
            }
            .scope_boxed()
        })
        .await
    }

    async fn update(
        &self,
        price_id: Self::Id,
        item: Self::UpdateForm,
    ) -> Result<Option<Self::Item>, result::Error> {
        use crate::data::models::schema::products_prices::dsl::{id, products_prices};

        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                let found = products_prices
                    .find(price_id)
                    .select(id)
                    .first::<i32>(connection)
                    .await
                    .optional()?;
                if found.is_none() {
                    return Ok(None);
                }

                diesel::update(products_prices.find(price_id))
                    .set(&item)
                    .execute(connection)
                    .await?;

                products_prices
                    .find(price_id)
                    .select(ProductPrice::as_select())
                    .first(connection)
                    .await
                    .map(Some)
            }
            .scope_boxed()
        })
        .await
    }
}
