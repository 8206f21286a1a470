pub mod coupon_service;
pub mod errors;
pub mod product_service;
pub mod report_service;
pub mod sale_service;
pub mod stock_service;
pub mod user_service;
