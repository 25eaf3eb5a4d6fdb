//! CRM Server - customers, products and orders over SQLite
//!
//! # Module layout
//!
//! ```text
//! crm-server/src/
//! ├── core/          # config, state, server lifecycle
//! ├── db/            # pool, migrations, repositories
//! ├── query/         # filter tables, sort, cursors, paginator
//! ├── services/      # customer, product, order workflow, node lookup, seed
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # logging, validation, money
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod query;
pub mod services;
pub mod utils;

pub use core::{Config, Server, ServerState};
pub use db::DbService;
pub use services::{OrderWorkflow, Services};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode, ErrorKind};

pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env` and install the logger described by the environment
pub fn setup_environment() -> Config {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger_with_file(
        Some(&config.log_level),
        config.is_production(),
        config.log_dir.as_deref(),
    );
    config
}
