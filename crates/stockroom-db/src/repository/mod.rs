//! # Repository Module
//!
//! Storage contracts and their SQLite implementations.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Inventory (stockroom-service)                                          │
//! │       │                                                                 │
//! │       │  items.find_one(&ItemFilter::by_name("Hammer"))                 │
//! │       ▼                                                                 │
//! │  ItemStore / UserStore (traits, this module)                           │
//! │  ├── create(&record)                                                   │
//! │  ├── find_one(&filter)   first match in insertion order                │
//! │  ├── find_all(&filter)   insertion order                               │
//! │  ├── save(&record)       one write per record                          │
//! │  └── delete_one(&filter) returns the removed record                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ItemRepository / UserRepository (SQLite)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ItemRepository`](item::ItemRepository) - tools and materials
//! - [`UserRepository`](user::UserRepository) - borrowers

use async_trait::async_trait;
use stockroom_core::{Item, ItemKind, User};

use crate::error::DbResult;

pub mod item;
pub mod user;

// =============================================================================
// Filters
// =============================================================================

/// Item selection. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub name: Option<String>,
    pub kind: Option<ItemKind>,
}

impl ItemFilter {
    /// Matches every item.
    pub fn all() -> Self {
        ItemFilter::default()
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        ItemFilter {
            name: Some(name.into()),
            kind: None,
        }
    }

    pub fn kind(mut self, kind: ItemKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// User selection. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub name: Option<String>,
}

impl UserFilter {
    pub fn all() -> Self {
        UserFilter::default()
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        UserFilter {
            name: Some(name.into()),
        }
    }
}

// =============================================================================
// Store Traits
// =============================================================================

/// Persistence contract for items.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Inserts a fully built item and returns it as stored.
    async fn create(&self, item: &Item) -> DbResult<Item>;

    /// First item matching `filter`, in insertion order.
    async fn find_one(&self, filter: &ItemFilter) -> DbResult<Option<Item>>;

    /// Every item matching `filter`, in insertion order.
    async fn find_all(&self, filter: &ItemFilter) -> DbResult<Vec<Item>>;

    /// Overwrites the stored row with `item`, matched by id.
    ///
    /// Fails with `DbError::NotFound` if the row is gone.
    async fn save(&self, item: &Item) -> DbResult<()>;

    /// Removes the first item matching `filter` and returns it.
    async fn delete_one(&self, filter: &ItemFilter) -> DbResult<Option<Item>>;
}

/// Persistence contract for users.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: &User) -> DbResult<User>;

    /// First user matching `filter`, in insertion order.
    async fn find_one(&self, filter: &UserFilter) -> DbResult<Option<User>>;

    async fn find_all(&self, filter: &UserFilter) -> DbResult<Vec<User>>;
}
