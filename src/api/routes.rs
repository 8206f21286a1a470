pub mod coupon_routes;
pub mod package_routes;
pub mod price_routes;
pub mod product_routes;
pub mod profile_routes;
pub mod report_routes;
pub mod sale_routes;
pub mod session_routes;
pub mod size_routes;
pub mod stock_routes;
pub mod user_routes;
