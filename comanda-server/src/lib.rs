//! Comanda Server - order lifecycle and table billing engine
//!
//! # Architecture overview
//!
//! The server owns the full life of a restaurant order, from creation to the
//! moment a table is settled and closed:
//!
//! - **Order store** (`store`): pluggable persistence seam with an in-memory
//!   implementation
//! - **Order engine** (`orders`): state machine, billing consolidation,
//!   tip/split settlement and the table closing orchestrator
//! - **Notifications** (`notify`): fire-and-forget customer status messages
//! - **HTTP API** (`api`): RESTful interface for terminals
//!
//! # Module structure
//!
//! ```text
//! comanda-server/src/
//! ├── core/          # config, state, server
//! ├── api/           # HTTP routes and handlers
//! ├── orders/        # lifecycle, consolidator, settlement, closing
//! ├── store/         # OrderStore trait + memory backend
//! ├── notify/        # notification dispatch
//! └── utils/         # errors, logging, time
//! ```

pub mod api;
pub mod core;
pub mod notify;
pub mod orders;
pub mod store;
pub mod utils;

// Re-export common types
pub use crate::core::{Config, Server, ServerState};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load .env and initialize logging from LOG_LEVEL / LOG_DIR.
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   ______                                 __
  / ____/___  ____ ___  ____ _____  ____/ /___ _
 / /   / __ \/ __ `__ \/ __ `/ __ \/ __  / __ `/
/ /___/ /_/ / / / / / / /_/ / / / / /_/ / /_/ /
\____/\____/_/ /_/ /_/\__,_/_/ /_/\__,_/\__,_/
    "#
    );
}
