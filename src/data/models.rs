pub mod coupon;
pub mod package;
pub mod price;
pub mod product;
pub mod sale;
pub mod schema;
pub mod size;
pub mod stock;
pub mod user;
