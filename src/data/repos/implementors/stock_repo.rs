use crate::data::database::{Database, last_insert_id};
use crate::data::models::stock::{
    NewStockOperation, StockAmount, StockLine, StockOperation, StockOperationItem,
    StockOperationKind, UpdateStockOperation,
};
use crate::data::repos::errors::StockError;
use crate::data::repos::traits::repository::Page;
use diesel::prelude::*;
use diesel::result;
use diesel::sql_query;
use diesel::sql_types::Integer;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncMysqlConnection, RunQueryDsl};
use std::collections::HashMap;
use std::str::FromStr;

/// Applies `lines` to the running amounts. Exits only succeed when every
/// row holds enough stock; callers run this inside their transaction so a
/// failing line rolls back the whole operation.
pub(crate) async fn apply_movement(
    conn: &mut AsyncMysqlConnection,
    kind: StockOperationKind,
    lines: &[StockLine],
) -> Result<(), StockError> {
    for line in lines {
        match kind {
            StockOperationKind::Entry => {
                sql_query(
                    "INSERT INTO product_stock_amounts (product_id, size_id, amount) \
                     VALUES (?, ?, ?) ON DUPLICATE KEY UPDATE amount = amount + ?",
                )
                .bind::<Integer, _>(line.product_id)
                .bind::<Integer, _>(line.size_id)
                .bind::<Integer, _>(line.amount)
                .bind::<Integer, _>(line.amount)
                .execute(conn)
                .await?;
            }
            StockOperationKind::Exit => {
                let updated = sql_query(
                    "UPDATE product_stock_amounts SET amount = amount - ? \
                     WHERE product_id = ? AND size_id = ? AND amount >= ?",
                )
                .bind::<Integer, _>(line.amount)
                .bind::<Integer, _>(line.product_id)
                .bind::<Integer, _>(line.size_id)
                .bind::<Integer, _>(line.amount)
                .execute(conn)
                .await?;

                if updated == 0 {
                    tracing::warn!(
                        "Insufficient stock for product {} size {}",
                        line.product_id,
                        line.size_id
                    );
                    return Err(StockError::Insufficient {
                        product_id: line.product_id,
                        size_id: line.size_id,
                    });
                }
            }
        }
    }

    Ok(())
}

/// Inserts an operation with its items and applies it. Returns the new id.
pub(crate) async fn insert_operation(
    conn: &mut AsyncMysqlConnection,
    operation: &NewStockOperation,
    lines: &[StockLine],
) -> Result<i32, StockError> {
    use crate::data::models::schema::stock_operation_items::dsl::stock_operation_items;
    use crate::data::models::schema::stock_operations::dsl::stock_operations;

    let kind = parse_kind(&operation.kind)?;

    diesel::insert_into(stock_operations)
        .values(operation)
        .execute(conn)
        .await?;
    let new_id = last_insert_id(conn).await?;

    let items: Vec<StockOperationItem> = lines
        .iter()
        .map(|line| StockOperationItem {
            operation_id: new_id,
            product_id: line.product_id,
            size_id: line.size_id,
            amount: line.amount,
        })
        .collect();
    diesel::insert_into(stock_operation_items)
        .values(&items)
        .execute(conn)
        .await?;

    apply_movement(conn, kind, lines).await?;

    Ok(new_id)
}

/// Reads an operation and holds its row lock until the transaction ends.
async fn lock_operation(
    conn: &mut AsyncMysqlConnection,
    operation_id: i32,
) -> Result<Option<StockOperation>, result::Error> {
    use crate::data::models::schema::stock_operations::dsl::stock_operations;

    stock_operations
        .find(operation_id)
        .select(StockOperation::as_select())
        .for_update()
        .first(conn)
        .await
        .optional()
}

/// Sets the canceled flag, reversing or re-applying the movement when it
/// changes. Returns `None` for an unknown id. The row is locked first, so
/// concurrent cancels of one operation move stock once.
pub(crate) async fn set_canceled(
    conn: &mut AsyncMysqlConnection,
    operation_id: i32,
    form: &UpdateStockOperation,
) -> Result<Option<StockOperation>, StockError> {
    use crate::data::models::schema::stock_operations::dsl::stock_operations;

    let Some(current) = lock_operation(conn, operation_id).await? else {
        return Ok(None);
    };

    if current.canceled != form.canceled {
        let kind = parse_kind(&current.kind)?;
        let lines: Vec<StockLine> = load_items(conn, &[operation_id])
            .await?
            .remove(&operation_id)
            .unwrap_or_default()
            .iter()
            .map(StockOperationItem::line)
            .collect();

        let movement = if form.canceled { kind.reversed() } else { kind };
        apply_movement(conn, movement, &lines).await?;
        tracing::info!(
            "Stock operation {} {}",
            operation_id,
            if form.canceled { "canceled" } else { "restored" }
        );
    }

    diesel::update(stock_operations.find(operation_id))
        .set(form)
        .execute(conn)
        .await?;

    let updated = stock_operations
        .find(operation_id)
        .select(StockOperation::as_select())
        .first(conn)
        .await?;

    Ok(Some(updated))
}

async fn load_items(
    conn: &mut AsyncMysqlConnection,
    operation_ids: &[i32],
) -> Result<HashMap<i32, Vec<StockOperationItem>>, result::Error> {
    use crate::data::models::schema::stock_operation_items::dsl::{
        operation_id, product_id, size_id, stock_operation_items,
    };

    let rows = stock_operation_items
        .filter(operation_id.eq_any(operation_ids.to_vec()))
        .order((operation_id.asc(), product_id.asc(), size_id.asc()))
        .select(StockOperationItem::as_select())
        .load(conn)
        .await?;

    let mut grouped: HashMap<i32, Vec<StockOperationItem>> = HashMap::new();
    for row in rows {
        grouped.entry(row.operation_id).or_default().push(row);
    }

    Ok(grouped)
}

fn parse_kind(kind: &str) -> Result<StockOperationKind, StockError> {
    StockOperationKind::from_str(kind).map_err(|_| {
        StockError::Database(result::Error::DeserializationError(
            format!("unknown stock operation type `{kind}`").into(),
        ))
    })
}

pub struct StockOperationRepo {
    db: Database,
}

impl StockOperationRepo {
    pub fn new(db: Database) -> Self {
        StockOperationRepo { db }
    }

    pub async fn get_page(&self, page: Page) -> Result<(Vec<StockOperation>, i64), result::Error> {
        use crate::data::models::schema::stock_operations::dsl::{id, stock_operations};

        let mut conn = self.db.get_connection().await?;

        let total = stock_operations.count().get_result::<i64>(&mut conn).await?;
        let rows = stock_operations
            .order(id.asc())
            .limit(page.per_page)
            .offset(page.offset())
            .select(StockOperation::as_select())
            .load(&mut conn)
            .await?;

        Ok((rows, total))
    }

    pub async fn get_items(
        &self,
        operation_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<StockOperationItem>>, result::Error> {
        let mut conn = self.db.get_connection().await?;

        load_items(&mut conn, operation_ids).await
    }

    pub async fn add(
        &self,
        operation: NewStockOperation,
        lines: Vec<StockLine>,
    ) -> Result<StockOperation, StockError> {
        use crate::data::models::schema::stock_operations::dsl::stock_operations;

        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                let new_id = insert_operation(connection, &operation, &lines).await?;

                let created = stock_operations
                    .find(new_id)
                    .select(StockOperation::as_select())
                    .first(connection)
                    .await?;
                Ok(created)
            }
            .scope_boxed()
        })
        .await
    }

    pub async fn update(
        &self,
        operation_id: i32,
        form: UpdateStockOperation,
    ) -> Result<Option<StockOperation>, StockError> {
        let mut conn = self.db.get_connection().await?;

        conn.transaction(|connection| {
            async move {
                let Some(current) = lock_operation(connection, operation_id).await? else {
                    return Ok(None);
                };
                if let Some(sale_id) = current.sale_id {
                    if current.canceled != form.canceled {
                        return Err(StockError::OwnedBySale(sale_id));
                    }
                }

                set_canceled(connection, operation_id, &form).await
            }
            .scope_boxed()
        })
        .await
    }
}

pub struct StockAmountRepo {
    db: Database,
}

impl StockAmountRepo {
    pub fn new(db: Database) -> Self {
        StockAmountRepo { db }
    }

    pub async fn get_page(&self, page: Page) -> Result<(Vec<StockAmount>, i64), result::Error> {
        use crate::data::models::schema::product_stock_amounts::dsl::{
            product_id, product_stock_amounts, size_id,
        };

        let mut conn = self.db.get_connection().await?;

        let total = product_stock_amounts
            .count()
            .get_result::<i64>(&mut conn)
            .await?;
        let rows = product_stock_amounts
            .order((product_id.asc(), size_id.asc()))
            .limit(page.per_page)
            .offset(page.offset())
            .select(StockAmount::as_select())
            .load(&mut conn)
            .await?;

        Ok((rows, total))
    }

    pub async fn get_all(&self) -> Result<Vec<StockAmount>, result::Error> {
        use crate::data::models::schema::product_stock_amounts::dsl::{
            product_id, product_stock_amounts, size_id,
        };

        let mut conn = self.db.get_connection().await?;

        product_stock_amounts
            .order((product_id.asc(), size_id.asc()))
            .select(StockAmount::as_select())
            .load(&mut conn)
            .await
    }
}
