use crate::data::models::schema::*;
use chrono::NaiveDate;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Queryable, Selectable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = stock_operations)]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct StockOperation {
    pub id: i32,
    pub kind: String,
    pub date: NaiveDate,
    pub user_id: i32,
    pub canceled: bool,
    pub sale_id: Option<i32>,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = stock_operations)]
pub struct NewStockOperation {
    pub kind: String,
    pub date: NaiveDate,
    pub user_id: i32,
    pub sale_id: Option<i32>,
}

#[derive(AsChangeset, PartialEq, Debug)]
#[diesel(table_name = stock_operations)]
pub struct UpdateStockOperation {
    pub date: NaiveDate,
    pub canceled: bool,
}

#[derive(Queryable, Selectable, Insertable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = stock_operation_items)]
#[diesel(belongs_to(StockOperation, foreign_key = operation_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct StockOperationItem {
    pub operation_id: i32,
    pub product_id: i32,
    pub size_id: i32,
    pub amount: i32,
}

impl StockOperationItem {
    pub fn line(&self) -> StockLine {
        StockLine {
            product_id: self.product_id,
            size_id: self.size_id,
            amount: self.amount,
        }
    }
}

/// One (product, size, amount) movement before it belongs to an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockLine {
    pub product_id: i32,
    pub size_id: i32,
    pub amount: i32,
}

impl StockLine {
    /// Collapses repeated (product, size) pairs by summing their amounts,
    /// keeping first-seen order. `None` when a sum does not fit an `i32`.
    pub fn merge(lines: Vec<StockLine>) -> Option<Vec<StockLine>> {
        let mut merged: Vec<StockLine> = Vec::with_capacity(lines.len());
        for line in lines {
            match merged
                .iter_mut()
                .find(|m| m.product_id == line.product_id && m.size_id == line.size_id)
            {
                Some(existing) => existing.amount = existing.amount.checked_add(line.amount)?,
                None => merged.push(line),
            }
        }
        Some(merged)
    }
}

/// Running amount for one (product, size) pair.
#[derive(Queryable, Selectable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = product_stock_amounts)]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct StockAmount {
    pub id: i32,
    pub product_id: i32,
    pub size_id: i32,
    pub amount: i32,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockOperationKind {
    Entry,
    Exit,
}

impl StockOperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockOperationKind::Entry => "entry",
            StockOperationKind::Exit => "exit",
        }
    }

    /// The movement that undoes this one.
    pub fn reversed(&self) -> StockOperationKind {
        match self {
            StockOperationKind::Entry => StockOperationKind::Exit,
            StockOperationKind::Exit => StockOperationKind::Entry,
        }
    }
}

impl FromStr for StockOperationKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "entry" => Ok(StockOperationKind::Entry),
            "exit" => Ok(StockOperationKind::Exit),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_sums_repeated_pairs() {
        let lines = vec![
            StockLine { product_id: 1, size_id: 2, amount: 3 },
            StockLine { product_id: 4, size_id: 2, amount: 1 },
            StockLine { product_id: 1, size_id: 2, amount: 5 },
        ];

        assert_eq!(
            StockLine::merge(lines),
            Some(vec![
                StockLine { product_id: 1, size_id: 2, amount: 8 },
                StockLine { product_id: 4, size_id: 2, amount: 1 },
            ])
        );
    }

    #[test]
    fn merge_refuses_sums_past_i32() {
        let lines = vec![
            StockLine { product_id: 1, size_id: 1, amount: i32::MAX },
            StockLine { product_id: 1, size_id: 1, amount: 1 },
        ];

        assert_eq!(StockLine::merge(lines), None);
    }

    #[test]
    fn kinds_reverse_each_other() {
        assert_eq!(StockOperationKind::Entry.reversed(), StockOperationKind::Exit);
        assert_eq!("EXIT".parse::<StockOperationKind>(), Ok(StockOperationKind::Exit));
    }
}
