//! # Promind Database Library
//!
//! Storage layer for the prompt optimization loop: versioned system prompts
//! with a single-active-row invariant, the agent registry, and the append-only
//! agent run log, all over local SQLite (Turso).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use promind_db::{DatabaseConfig, DatabaseWriter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::new("path/to/promind.db");
//!     let db = DatabaseWriter::new(config).await?;
//!
//!     let prompt = db.get_latest_prompt("planner", "default").await?;
//!     println!("active v{}: {}", prompt.version, prompt.system_prompt);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod reader;
pub mod writer;

// Re-export commonly used types
pub use config::DatabaseConfig;
pub use error::{Result, StoreError};
pub use reader::DatabaseReader;
pub use writer::DatabaseWriter;
