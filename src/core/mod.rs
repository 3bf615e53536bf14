pub mod catalog;
pub mod companies;
pub mod fetch;
pub mod pdf;

pub use companies::{Company, CompanyRegistry};
pub use fetch::HttpSource;
