use crate::data::database::{Database, last_insert_id};
use crate::data::models::sale::{NewSale, Sale, SaleItem, SaleLine, SaleStatus, UpdateSale};
use crate::data::models::stock::{
    NewStockOperation, StockLine, StockOperation, StockOperationKind, UpdateStockOperation,
};
use crate::data::repos::errors::StockError;
use crate::data::repos::implementors::stock_repo::{insert_operation, set_canceled};
use crate::data::repos::traits::repository::Page;
use diesel::prelude::*;
use diesel::result;
use diesel::sql_query;
use diesel::sql_types::Integer;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncMysqlConnection, RunQueryDsl};
use std::collections::HashMap;
use std::str::FromStr;

pub struct SaleRepo {
    db: Database,
}

impl SaleRepo {
    pub fn new(db: Database) -> Self {
        SaleRepo { db }
    }

    pub async fn get_page(&self, page: Page) -> Result<(Vec<Sale>, i64), result::Error> {
        use crate::data::models::schema::sales::dsl::{id, sales};

        let mut conn = self.db.get_connection().await?;

        let total = sales.count().get_result::<i64>(&mut conn).await?;
        let rows = sales
            .order(id.asc())
            .limit(page.per_page)
            .offset(page.offset())
            .select(Sale::as_select())
            .load(&mut conn)
            .await?;

        Ok((rows, total))
    }

    pub async fn get_all(&self) -> Result<Vec<Sale>, result::Error> {
        use crate::data::models::schema::sales::dsl::{id, sales};

        let mut conn = self.db.get_connection().await?;

        sales
            .order(id.asc())
            .select(Sale::as_select())
            .load(&mut conn)
            .await
    }

    pub async fn get_items(
        &self,
        sale_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<SaleItem>>, result::Error> {
        use crate::data::models::schema::sale_items::dsl::{
            product_id, sale_id, sale_items, size_id,
        };

        let mut conn = self.db.get_connection().await?;

        let rows = sale_items
            .filter(sale_id.eq_any(sale_ids.to_vec()))
            .order((sale_id.asc(), product_id.asc(), size_id.asc()))
            .select(SaleItem::as_select())
            .load(&mut conn)
            .await?;

        let mut grouped: HashMap<i32, Vec<SaleItem>> = HashMap::new();
        for row in rows {
            grouped.entry(row.sale_id).or_default().push(row);
        }

        Ok(grouped)
    }

    /// Stores the sale with its items, consumes one coupon use and records
    /// the exit of the sold stock, all in one transaction.
    pub async fn create(
        &self,
        sale: NewSale,
        lines: Vec<SaleLine>,
        operator_id: i32,
    ) -> Result<Sale, StockError> {
        use crate::data::models::schema::sale_items::dsl::sale_items;
        use crate::data::models::schema::sales::dsl::sales;

        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                if let Some(coupon) = sale.coupon_id {
                    consume_coupon(connection, coupon).await?;
                }

                diesel::insert_into(sales)
                    .values(&sale)
                    .execute(connection)
                    .await?;
                let new_id = last_insert_id(connection).await?;

                let stock_lines: Vec<StockLine> = lines
                    .iter()
                    .map(|line| StockLine {
                        product_id: line.product_id,
                        size_id: line.size_id,
                        amount: line.quantity,
                    })
                    .collect();
                let items: Vec<SaleItem> =
                    lines.into_iter().map(|line| line.into_item(new_id)).collect();
                diesel::insert_into(sale_items)
                    .values(&items)
                    .execute(connection)
                    .await?;

                let operation = NewStockOperation {
                    kind: StockOperationKind::Exit.as_str().to_string(),
                    date: sale.date,
                    user_id: operator_id,
                    sale_id: Some(new_id),
                };
                insert_operation(connection, &operation, &stock_lines).await?;

                let created = sales
                    .find(new_id)
                    .select(Sale::as_select())
                    .first(connection)
                    .await?;
                Ok(created)
            }
            .scope_boxed()
        })
        .await
    }

    /// Moves the sale to `next` and sets its payment method. The sale row is
    /// locked while the transition is checked; entering `Canceled` returns
    /// the stock taken by the sale.
    pub async fn update(
        &self,
        sale_id: i32,
        next: SaleStatus,
        payment_method: String,
    ) -> Result<Option<Sale>, StockError> {
        use crate::data::models::schema::sales::dsl::sales;

        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                let Some(current) = sales
                    .find(sale_id)
                    .select(Sale::as_select())
                    .for_update()
                    .first(connection)
                    .await
                    .optional()?
                else {
                    return Ok(None);
                };

                let status = SaleStatus::from_str(&current.status)
                    .map_err(|_| StockError::InvalidTransition)?;
                if !status.can_transition_to(next) {
                    return Err(StockError::InvalidTransition);
                }

                if next == SaleStatus::Canceled && status != SaleStatus::Canceled {
                    restore_stock(connection, sale_id).await?;
                    tracing::info!("Sale {} canceled, stock restored", sale_id);
                }

                let form = UpdateSale {
                    status: next.as_str().to_string(),
                    payment_method,
                };

                diesel::update(sales.find(sale_id))
                    .set(&form)
                    .execute(connection)
                    .await?;

                let updated = sales
                    .find(sale_id)
                    .select(Sale::as_select())
                    .first(connection)
                    .await?;
                Ok(Some(updated))
            }
            .scope_boxed()
        })
        .await
    }
}

async fn consume_coupon(conn: &mut AsyncMysqlConnection, coupon_id: i32) -> Result<(), StockError> {
    let updated = sql_query(
        "UPDATE coupons SET uses = uses + 1 \
         WHERE id = ? AND (use_limit IS NULL OR uses < use_limit)",
    )
    .bind::<Integer, _>(coupon_id)
    .execute(conn)
    .await?;

    if updated == 0 {
        return Err(StockError::CouponExhausted(coupon_id));
    }

    Ok(())
}

async fn restore_stock(conn: &mut AsyncMysqlConnection, owner_id: i32) -> Result<(), StockError> {
    use crate::data::models::schema::stock_operations::dsl::{canceled, sale_id, stock_operations};

    let operations = stock_operations
        .filter(sale_id.eq(owner_id))
        .filter(canceled.eq(false))
        .select(StockOperation::as_select())
        .for_update()
        .load(conn)
        .await?;

    for operation in operations {
        let form = UpdateStockOperation {
            date: operation.date,
            canceled: true,
        };
        set_canceled(conn, operation.id, &form).await?;
    }

    Ok(())
}
