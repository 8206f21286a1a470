use crate::data::database::{Database, last_insert_id};
use crate::data::models::product::{
    NewProduct, NewProductImage, Product, ProductImage, ProductSize, UpdateProduct,
};
use crate::data::repos::traits::repository::{Page, Repository};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncMysqlConnection, RunQueryDsl};
use std::collections::HashMap;

pub struct ProductRepo {
    db: Database,
}

impl ProductRepo {
    pub fn new(db: Database) -> Self {
        ProductRepo { db }
    }

    pub async fn get_all(&self) -> Result<Vec<Product>, result::Error> {
        use crate::data::models::schema::products::dsl::{id, products};

        let mut conn = self.db.get_connection().await?;

        products
            .order(id.asc())
            .select(Product::as_select())
            .load(&mut conn)
            .await
    }

    /// Size ids offered for each of the given products.
    pub async fn get_size_ids(
        &self,
        product_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<i32>>, result::Error> {
        use crate::data::models::schema::product_sizes::dsl::{product_id, product_sizes, size_id};

        let mut conn = self.db.get_connection().await?;

        let rows = product_sizes
            .filter(product_id.eq_any(product_ids.to_vec()))
            .order((product_id.asc(), size_id.asc()))
            .select(ProductSize::as_select())
            .load(&mut conn)
            .await?;

        let mut grouped: HashMap<i32, Vec<i32>> = HashMap::new();
        for row in rows {
            grouped.entry(row.product_id).or_default().push(row.size_id);
        }

        Ok(grouped)
    }

    pub async fn get_images(&self, owner_id: i32) -> Result<Vec<ProductImage>, result::Error> {
        use crate::data::models::schema::product_images::dsl::{id, product_id, product_images};

        let mut conn = self.db.get_connection().await?;

        product_images
            .filter(product_id.eq(owner_id))
            .order(id.asc())
            .select(ProductImage::as_select())
            .load(&mut conn)
            .await
    }

    pub async fn add_image(&self, image: NewProductImage) -> Result<ProductImage, result::Error> {
        use crate::data::models::schema::product_images::dsl::product_images;

        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                diesel::insert_into(product_images)
                    .values(&image)
                    .execute(connection)
                    .await?;
                let new_id = last_insert_id(connection).await?;

                product_images
                    .find(new_id)
                    .select(ProductImage::as_select())
                    .first(connection)
                    .await
            }
            .scope_boxed()
        })
        .await
    }
}

/// Replaces the product's size list with `size_ids`.
async fn replace_sizes(
    conn: &mut AsyncMysqlConnection,
    owner_id: i32,
    size_ids: &[i32],
) -> Result<(), result::Error> {
    use crate::data::models::schema::product_sizes::dsl::{product_id, product_sizes};

    diesel::delete(product_sizes.filter(product_id.eq(owner_id)))
        .execute(conn)
        .await?;

    if size_ids.is_empty() {
        return Ok(());
    }

    let rows: Vec<ProductSize> = size_ids
        .iter()
        .map(|&size_id| ProductSize {
            product_id: owner_id,
            size_id,
        })
        .collect();

    diesel::insert_into(product_sizes)
        .values(&rows)
        .execute(conn)
        .await?;

    Ok(())
}

#[async_trait]
impl Repository for ProductRepo {
    type Id = i32;
    type Item = Product;
    /// Product columns plus the ids of the sizes it is sold in.
    type NewItem = (NewProduct, Vec<i32>);
    type UpdateForm = (UpdateProduct, Vec<i32>);

    async fn get_page(&self, page: Page) -> Result<(Vec<Self::Item>, i64), result::Error> {
        use crate::data::models::schema::products::dsl::{id, products};

        let mut conn = self.db.get_connection().await?;

        let total = products.count().get_result::<i64>(&mut conn).await?;
        let rows = products
            .order(id.asc())
            .limit(page.per_page)
            .offset(page.offset())
            .select(Product::as_select())
            .load(&mut conn)
            .await?;

        Ok((rows, total))
    }

    async fn get_by_id(&self, product_id: Self::Id) -> Result<Option<Self::Item>, result::Error> {
        use crate::data::models::schema::products::dsl::products;

        let mut conn = self.db.get_connection().await?;

        products
            .find(product_id)
            .select(Product::as_select())
            .first(&mut conn)
            .await
            .optional()
    }

    async fn add(&self, item: Self::NewItem) -> Result<Self::Item, result::Error> {
        use crate::data::models::schema::products::dsl::products;

        let (product, size_ids) = item;
        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                diesel::insert_into(products)
                    .values(&product)
                    .execute(connection)
                    .await?;
                let new_id = last_insert_id(connection).await?;
                replace_sizes(connection, new_id, &size_ids).await?;

                products
                    .find(new_id)
                    .select(Product::as_select())
                    .first(connection)
                    .await
            }
            .scope_boxed()
        })
        .await
    }

    async fn update(
        &self,
        product_id: Self::Id,
        item: Self::UpdateForm,
    ) -> Result<Option<Self::Item>, result::Error> {
        use crate::data::models::schema::products::dsl::{id, products};

        let (product, size_ids) = item;
        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                let found = products
                    .find(product_id)
                    .select(id)
                    .first::<i32>(connection)
                    .await
                    .optional()?;
                if found.is_none() {
                    return Ok(None);
                }

                diesel::update(products.find(product_id))
                    .set(&product)
                    .execute(connection)
                    .await?;
                replace_sizes(connection, product_id, &size_ids).await?;

                products
                    .find(product_id)
                    .select(Product::as_select())
                    .first(connection)
                    .await
                    .map(Some)
            }
            .scope_boxed()
        })
        .await
    }
}
