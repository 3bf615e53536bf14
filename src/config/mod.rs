use crate::utils::error::Result;
use crate::utils::validation::{validate_positive_number, Validate};
use clap::Parser;
use std::time::Duration;

pub trait ServiceConfig: Send + Sync {
    fn bind_host(&self) -> &str;
    fn port(&self) -> u16;
    fn request_timeout(&self) -> Duration;
}

#[derive(Debug, Clone, Parser)]
#[command(name = "investor-pdf-api")]
#[command(
    about = "Official investor PDFs + text/table extraction for Hays, PageGroup, and Robert Walters"
)]
pub struct CliConfig {
    #[arg(long, default_value = "0.0.0.0")]
    pub bind: String,

    #[arg(long, default_value = "8000")]
    pub port: u16,

    #[arg(long, default_value = "30", help = "Upstream request timeout in seconds")]
    pub timeout_secs: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ServiceConfig for CliConfig {
    fn bind_host(&self) -> &str {
        &self.bind
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_positive_number("port", u64::from(self.port), 1)?;
        validate_positive_number("timeout_secs", self.timeout_secs, 1)?;
        Ok(())
    }
}
