pub mod coupon_dto;
pub mod package_dto;
pub mod price_dto;
pub mod product_dto;
pub mod sale_dto;
pub mod session_dto;
pub mod size_dto;
pub mod stock_dto;
pub mod user_dto;
pub mod validation;
