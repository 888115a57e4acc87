//! # stockroom-service: Inventory Orchestration
//!
//! Ties the pure model in `stockroom-core` to the stores in `stockroom-db`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockroom_service::{Inventory, InventoryConfig, UseOutcome};
//! use stockroom_core::{Money, NewItem, NewUser};
//!
//! stockroom_service::telemetry::init_tracing();
//!
//! let inventory = Inventory::open(InventoryConfig::from_env()?).await?;
//! inventory
//!     .create_item(NewItem::tool("Hammer", 1, Money::from_cents(1500), "Nails", 100))
//!     .await?;
//! inventory.create_user(NewUser::new("alice", 30)).await?;
//!
//! match inventory.use_item("alice", "Hammer").await? {
//!     UseOutcome::Borrowed { condition } => println!("lent, condition {condition}"),
//!     other => println!("not lent: {other:?}"),
//! }
//! ```

pub mod config;
pub mod error;
pub mod inventory;
pub mod telemetry;

pub use config::{ConfigError, InventoryConfig};
pub use error::{ErrorCode, ServiceError, ServiceResult};
pub use inventory::{Inventory, UseOutcome};
