use diesel::result;

/// Failures of writes that move stock or consume coupons.
#[derive(Debug, thiserror::Error)]
pub enum StockError {
    #[error("insufficient stock for product {product_id} size {size_id}")]
    Insufficient { product_id: i32, size_id: i32 },
    #[error("coupon {0} has no uses left")]
    CouponExhausted(i32),
    /// Operations created by a sale are canceled through the sale.
    #[error("stock operation belongs to sale {0}")]
    OwnedBySale(i32),
    #[error("invalid sale status transition")]
    InvalidTransition,
    #[error(transparent)]
    Database(#[from] result::Error),
}
