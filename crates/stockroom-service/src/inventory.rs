//! # Inventory
//!
//! Name-keyed operations over the item and user stores.
//!
//! ## Operation Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  find_one(name) ──► None ─────────────────────────────► Ok(None)        │
//! │       │                                                                 │
//! │       ▼ Some(item)                                                      │
//! │  match item { Tool(..) => .., Material(..) => .. }                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  touch(updated_at) ──► save(item) ─────────────────────► Ok(Some(item)) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutating operation does at most one `save`. Nothing is saved when
//! the variant operation fails or declines.

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use stockroom_core::{
    BorrowOutcome, CoreError, Item, ItemUpdate, Money, NewItem, NewUser, Stocked, User,
    MAX_CONDITION,
};
use stockroom_db::{
    Database, ItemFilter, ItemRepository, ItemStore, UserFilter, UserRepository, UserStore,
};

use crate::config::InventoryConfig;
use crate::error::ServiceResult;

/// What happened when a user asked to use an item.
///
/// Only `Borrowed` changes stored state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum UseOutcome {
    ItemNotFound,
    UserNotFound,
    /// The item is a material; nothing was recorded.
    NotATool,
    /// Logged and worn; `condition` is the value after wear.
    Borrowed { condition: u32 },
    /// The tool is too worn to lend.
    Declined { condition: u32 },
}

/// Inventory orchestration over an item store and a user store.
pub struct Inventory<I = ItemRepository, U = UserRepository> {
    items: I,
    users: U,
    config: InventoryConfig,
}

impl Inventory {
    /// Opens (and migrates) the configured database.
    pub async fn open(config: InventoryConfig) -> ServiceResult<Self> {
        let db = Database::connect(config.db_config()).await?;
        Ok(Self::from_database(&db, config))
    }

    /// Builds on an existing database handle.
    pub fn from_database(db: &Database, config: InventoryConfig) -> Self {
        Inventory::new(db.items(), db.users(), config)
    }
}

impl<I, U> Inventory<I, U>
where
    I: ItemStore,
    U: UserStore,
{
    pub fn new(items: I, users: U, config: InventoryConfig) -> Self {
        Inventory {
            items,
            users,
            config,
        }
    }

    // -------------------------------------------------------------------------
    // Items
    // -------------------------------------------------------------------------

    /// Validates and stores a new item.
    ///
    /// The kind tag is checked before anything else, so an unknown tag is
    /// always [`CoreError::InvalidVariant`] whatever the other fields hold.
    pub async fn create_item(&self, new_item: NewItem) -> ServiceResult<Item> {
        let item = new_item.into_item(Uuid::new_v4().to_string(), Utc::now())?;
        let stored = self.items.create(&item).await?;

        info!(id = %stored.id(), name = %stored.name(), kind = %stored.kind(), "Item created");
        Ok(stored)
    }

    /// Every item, oldest first.
    pub async fn list_items(&self) -> ServiceResult<Vec<Item>> {
        Ok(self.items.find_all(&ItemFilter::all()).await?)
    }

    /// First item with this name.
    pub async fn find_item(&self, name: &str) -> ServiceResult<Option<Item>> {
        Ok(self.items.find_one(&ItemFilter::by_name(name)).await?)
    }

    /// Applies a partial update to the first item named `name`.
    ///
    /// Fields for the other variant are ignored. How zero and empty values
    /// are read depends on [`InventoryConfig::update_policy`].
    pub async fn update_item(
        &self,
        name: &str,
        update: &ItemUpdate,
    ) -> ServiceResult<Option<Item>> {
        let Some(mut item) = self.find_item(name).await? else {
            return Ok(None);
        };

        let written = update.apply(&mut item, self.config.update_policy)?;
        if written.is_empty() {
            debug!(%name, "Update carried no effective fields");
            return Ok(Some(item));
        }

        self.persist(&mut item).await?;
        info!(id = %item.id(), fields = ?written, "Item updated");
        Ok(Some(item))
    }

    /// Removes the first item named `name` and returns it.
    pub async fn delete_item(&self, name: &str) -> ServiceResult<Option<Item>> {
        let removed = self.items.delete_one(&ItemFilter::by_name(name)).await?;

        if let Some(item) = &removed {
            info!(id = %item.id(), %name, "Item deleted");
        }
        Ok(removed)
    }

    /// Adds `delta` units to either kind of item.
    pub async fn restock(&self, name: &str, delta: u32) -> ServiceResult<Option<Item>> {
        let Some(mut item) = self.find_item(name).await? else {
            return Ok(None);
        };

        item.restock(delta);
        self.persist(&mut item).await?;

        info!(id = %item.id(), delta, amount = item.record().amount, "Item restocked");
        Ok(Some(item))
    }

    /// Draws `quantity` units from a material.
    ///
    /// ## Errors
    /// - [`CoreError::NotAMaterial`] for a tool
    /// - [`CoreError::InsufficientStock`] when not enough is on hand; the
    ///   stored amount is unchanged
    pub async fn consume(&self, name: &str, quantity: u32) -> ServiceResult<Option<Item>> {
        let Some(mut item) = self.find_item(name).await? else {
            return Ok(None);
        };

        match &mut item {
            Item::Material(material) => material.consume(quantity)?,
            Item::Tool(tool) => return Err(CoreError::NotAMaterial(tool.record.name.clone()).into()),
        }

        self.persist(&mut item).await?;
        info!(id = %item.id(), quantity, amount = item.record().amount, "Material consumed");
        Ok(Some(item))
    }

    /// Repairs a tool, capping at full condition when `clamp_repairs` is on.
    pub async fn repair(&self, name: &str) -> ServiceResult<Option<Item>> {
        let Some(mut item) = self.find_item(name).await? else {
            return Ok(None);
        };

        let condition = match &mut item {
            Item::Tool(tool) => {
                let repaired = tool.repair();
                if self.config.clamp_repairs && repaired > MAX_CONDITION {
                    tool.condition = MAX_CONDITION;
                }
                tool.condition
            }
            Item::Material(material) => {
                return Err(CoreError::NotATool(material.record.name.clone()).into())
            }
        };

        self.persist(&mut item).await?;
        info!(id = %item.id(), condition, "Tool repaired");
        Ok(Some(item))
    }

    /// Sum of `amount × cost` across every item.
    pub async fn inventory_worth(&self) -> ServiceResult<Money> {
        let items = self.list_items().await?;
        Ok(items.iter().map(|item| item.worth()).sum())
    }

    // -------------------------------------------------------------------------
    // Users
    // -------------------------------------------------------------------------

    pub async fn create_user(&self, new_user: NewUser) -> ServiceResult<User> {
        let user = new_user.into_user(Uuid::new_v4().to_string(), Utc::now())?;
        let stored = self.users.create(&user).await?;

        info!(id = %stored.id, name = %stored.name, "User created");
        Ok(stored)
    }

    pub async fn find_user(&self, name: &str) -> ServiceResult<Option<User>> {
        Ok(self.users.find_one(&UserFilter::by_name(name)).await?)
    }

    /// Lends the item named `item_name` to the user named `user_name`.
    ///
    /// The item is looked up before the user. Only a successful borrow is
    /// saved.
    pub async fn use_item(&self, user_name: &str, item_name: &str) -> ServiceResult<UseOutcome> {
        let Some(mut item) = self.find_item(item_name).await? else {
            debug!(%item_name, "Use requested for unknown item");
            return Ok(UseOutcome::ItemNotFound);
        };

        let Some(user) = self.find_user(user_name).await? else {
            debug!(%user_name, "Use requested by unknown user");
            return Ok(UseOutcome::UserNotFound);
        };

        let outcome = match &mut item {
            Item::Tool(tool) => tool.borrow(&user.name),
            Item::Material(_) => {
                debug!(%item_name, "Materials cannot be borrowed");
                return Ok(UseOutcome::NotATool);
            }
        };

        match outcome {
            BorrowOutcome::Borrowed { condition } => {
                self.persist(&mut item).await?;
                info!(user = %user.name, item = %item_name, condition, "Tool borrowed");
                Ok(UseOutcome::Borrowed { condition })
            }
            BorrowOutcome::Declined { condition } => {
                warn!(user = %user.name, item = %item_name, condition, "Tool is in poor condition");
                Ok(UseOutcome::Declined { condition })
            }
        }
    }

    /// Names of the items `user_name` has borrowed, in item order.
    ///
    /// `None` when the user does not exist.
    pub async fn used_items(&self, user_name: &str) -> ServiceResult<Option<Vec<String>>> {
        let Some(user) = self.find_user(user_name).await? else {
            return Ok(None);
        };

        let items = self.list_items().await?;
        Ok(Some(user.used_items(&items)))
    }

    async fn persist(&self, item: &mut Item) -> ServiceResult<()> {
        item.record_mut().touch(Utc::now());
        self.items.save(item).await?;
        Ok(())
    }
}
