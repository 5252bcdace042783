//! Greeny Credit backend server.
//!
//! HTTP API behind the Greeny Credit Co-operative Bank website.
//!
//! ## Features
//!
//! - Contact form submission with per-client rate limiting and SMTP delivery
//! - Loan EMI and deposit maturity calculators
//! - Health check
//! - Configuration from environment variables and `.env`
//!
//! ## Usage
//!
//! ```bash
//! # Start server with .env in the working directory
//! greeny-server
//!
//! # Custom env file and debug logging
//! greeny-server --env-file deploy/.env.production --verbose
//! ```

pub mod config;
pub mod error;
pub mod rate_limit;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use rate_limit::RateLimiter;
pub use server::{create_router, run_server};
pub use state::AppState;
