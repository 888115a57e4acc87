//! # stockroom-core: Pure Domain Model for Stockroom
//!
//! This crate holds the inventory model as plain data plus the rules that
//! mutate it. It never touches a database; persistence lives in
//! `stockroom-db` and orchestration in `stockroom-service`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                stockroom-service (Inventory)                    │   │
//! │  │    create_item, update_item, use_item, used_items, ...          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ stockroom-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   item    │  │   user    │  │  update   │  │ validation│  │   │
//! │  │   │   Tool    │  │   User    │  │ ItemUpdate│  │   rules   │  │   │
//! │  │   │ Material  │  │ used_items│  │  policy   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 stockroom-db (Database Layer)                   │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`item`] - The `Item` sum type and its `Tool` / `Material` variants
//! - [`user`] - Users and the derived usage query
//! - [`update`] - Partial item updates and the zero-value policy
//! - [`money`] - Integer-cent money type
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation for new records
//!
//! ## Example Usage
//!
//! ```rust
//! use stockroom_core::{BorrowOutcome, ItemRecord, Money, Tool};
//! use chrono::Utc;
//!
//! let record = ItemRecord::new("id-1", "Hammer", 2, Money::from_cents(1250), Utc::now());
//! let mut hammer = Tool::new(record, "Driving nails", 100);
//!
//! assert_eq!(hammer.borrow("alice"), BorrowOutcome::Borrowed { condition: 90 });
//! assert_eq!(hammer.borrowed_by, vec!["alice".to_string()]);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod item;
pub mod money;
pub mod update;
pub mod user;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use item::{BorrowOutcome, Item, ItemKind, ItemRecord, Material, NewItem, Stocked, Tool};
pub use money::Money;
pub use update::{ItemUpdate, UpdatePolicy};
pub use user::{NewUser, User};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Upper bound of a tool's condition at rest.
pub const MAX_CONDITION: u32 = 100;

/// A tool can only be borrowed while its condition is strictly above this.
pub const MIN_BORROW_CONDITION: u32 = 15;

/// Condition lost on every successful borrow.
pub const BORROW_WEAR: u32 = 10;

/// Condition regained by one repair.
pub const REPAIR_BOOST: u32 = 20;

/// Maximum length of item and user names.
pub const MAX_NAME_LENGTH: usize = 200;
