use clap::Parser;
use std::path::PathBuf;

use crate::error::{DashboardError, Result};

#[derive(Parser, Debug, Clone)]
#[command(name = "student-dashboard")]
#[command(about = "Student performance dashboard API", long_about = None)]
pub struct Config {
    #[arg(long, env = "DASHBOARD_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "DASHBOARD_PORT", default_value_t = 8080)]
    pub port: u16,

    /// File holding the signed-in user
    #[arg(long, env = "DASHBOARD_SESSION_FILE", default_value = ".dashboard-session.json")]
    pub session_file: PathBuf,

    /// Load the roster from CSV instead of generating one
    #[arg(long, env = "DASHBOARD_STUDENTS_CSV")]
    pub students_csv: Option<PathBuf>,

    #[arg(long, default_value_t = 50)]
    pub roster_size: usize,

    #[arg(long, default_value_t = 10)]
    pub page_size: usize,

    /// Seed for generated data and predictions
    #[arg(long, env = "DASHBOARD_SEED")]
    pub seed: Option<u64>,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(DashboardError::validation("page size must be greater than zero"));
        }
        if self.roster_size == 0 {
            return Err(DashboardError::validation("roster size must be greater than zero"));
        }
        Ok(())
    }
}
