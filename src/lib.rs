pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use app::{create_router, AppState};
pub use config::CliConfig;
pub use core::{Company, CompanyRegistry, HttpSource};
pub use utils::error::{ApiError, Result};
