pub mod coupon_repo;
pub mod package_repo;
pub mod price_repo;
pub mod product_repo;
pub mod sale_repo;
pub mod size_repo;
pub mod stock_repo;
pub mod user_repo;
