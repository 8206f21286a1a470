pub mod coupon_controller;
pub mod dto;
pub mod package_controller;
pub mod price_controller;
pub mod product_controller;
pub mod profile_controller;
pub mod report_controller;
pub mod sale_controller;
pub mod session_controller;
pub mod size_controller;
pub mod stock_controller;
pub mod user_controller;
