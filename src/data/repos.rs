pub mod errors;
pub mod implementors;
pub mod traits;
