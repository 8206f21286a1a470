use crate::data::database::{Database, last_insert_id};
use crate::data::models::coupon::{Coupon, CouponProduct, NewCoupon, UpdateCoupon};
use crate::data::repos::traits::repository::{Page, Repository};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncMysqlConnection, RunQueryDsl};
use std::collections::HashMap;

pub struct CouponRepo {
    db: Database,
}

impl CouponRepo {
    pub fn new(db: Database) -> Self {
        CouponRepo { db }
    }

    pub async fn get_all(&self) -> Result<Vec<Coupon>, result::Error> {
        use crate::data::models::schema::coupons::dsl::{coupons, id};

        let mut conn = self.db.get_connection().await?;

        coupons
            .order(id.asc())
            .select(Coupon::as_select())
            .load(&mut conn)
            .await
    }

    /// Eligible product ids per coupon. Coupons without rows apply to every
    /// product.
    pub async fn get_product_ids(
        &self,
        coupon_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<i32>>, result::Error> {
        use crate::data::models::schema::coupon_products::dsl::{
            coupon_id, coupon_products, product_id,
        };

        let mut conn = self.db.get_connection().await?;

        let rows = coupon_products
            .filter(coupon_id.eq_any(coupon_ids.to_vec()))
            .order((coupon_id.asc(), product_id.asc()))
            .select(CouponProduct::as_select())
            .load(&mut conn)
            .await?;

        let mut grouped: HashMap<i32, Vec<i32>> = HashMap::new();
        for row in rows {
            grouped.entry(row.coupon_id).or_default().push(row.product_id);
        }

        Ok(grouped)
    }
}

async fn replace_products(
    conn: &mut AsyncMysqlConnection,
    owner_id: i32,
    product_ids: &[i32],
) -> Result<(), result::Error> {
    use crate::data::models::schema::coupon_products::dsl::{coupon_id, coupon_products};

    diesel::delete(coupon_products.filter(coupon_id.eq(owner_id)))
        .execute(conn)
        .await?;

    if product_ids.is_empty() {
        return Ok(());
    }

    let rows: Vec<CouponProduct> = product_ids
        .iter()
        .map(|&product_id| CouponProduct {
            coupon_id: owner_id,
            product_id,
        })
        .collect();

    diesel::insert_into(coupon_products)
        .values(&rows)
        .execute(conn)
        .await?;

    Ok(())
}

#[async_trait]
impl Repository for CouponRepo {
    type Id = i32;
    type Item = Coupon;
    /// Coupon columns plus the eligible product ids.
    type NewItem = (NewCoupon, Vec<i32>);
    type UpdateForm = (UpdateCoupon, Vec<i32>);

    async fn get_page(&self, page: Page) -> Result<(Vec<Self::Item>, i64), result::Error> {
        use crate::data::models::schema::coupons::dsl::{coupons, id};

        let mut conn = self.db.get_connection().await?;

        let total = coupons.count().get_result::<i64>(&mut conn).await?;
        let rows = coupons
            .order(id.asc())
            .limit(page.per_page)
            .offset(page.offset())
            .select(Coupon::as_select())
            .load(&mut conn)
            .await?;

        Ok((rows, total))
    }

    async fn get_by_id(&self, coupon_id: Self::Id) -> Result<Option<Self::Item>, result::Error> {
        use crate::data::models::schema::coupons::dsl::coupons;

        let mut conn = self.db.get_connection().await?;

        coupons
            .find(coupon_id)
            .select(Coupon::as_select())
            .first(&mut conn)
            .await
            .optional()
    }

    async fn add(&self, item: Self::NewItem) -> Result<Self::Item, result::Error> {
        use crate::data::models::schema::coupons::dsl::coupons;

        let (coupon, product_ids) = item;
        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                diesel::insert_into(coupons)
                    .values(&coupon)
                    .execute(connection)
                    .await?;
                let new_id = last_insert_id(connection).await?;
                replace_products(connection, new_id, &product_ids).await?;

                coupons
                    .find(new_id)
                    .select(Coupon::as_select())
                    .first(connection)
                    .await
            }
            .scope_boxed()
        })
        .await
    }

    async fn update(
        &self,
        coupon_id: Self::Id,
        item: Self::UpdateForm,
    ) -> Result<Option<Self::Item>, result::Error> {
        use crate::data::models::schema::coupons::dsl::{coupons, id};

        let (coupon, product_ids) = item;
        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                let found = coupons
                    .find(coupon_id)
                    .select(id)
                    .first::<i32>(connection)
                    .await
                    .optional()?;
                if found.is_none() {
                    return Ok(None);
                }

                diesel::update(coupons.find(coupon_id))
                    .set(&coupon)
                    .execute(connection)
                    .await?;
                replace_products(connection, coupon_id, &product_ids).await?;

                coupons
                    .find(coupon_id)
                    .select(Coupon::as_select())
                    .first(connection)
                    .await
                    .map(Some)
            }
            .scope_boxed()
        })
        .await
    }
}
