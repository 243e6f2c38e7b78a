pub mod api;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod feedback;
pub mod guard;
pub mod mock;
pub mod prediction;
pub mod session;
pub mod students;
pub mod trend;
