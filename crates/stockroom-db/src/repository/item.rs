//! # Item Repository
//!
//! SQLite storage for tools and materials.
//!
//! ## Single-Table Layout
//! ```text
//! ┌──────────┬──────────┬────────┬────────┬──────┬───────────┬─────────────────┬──────────┬─────────┐
//! │ id       │ kind     │ name   │ amount │ cost │ condition │ borrowed_by     │ supplier │ quality │
//! ├──────────┼──────────┼────────┼────────┼──────┼───────────┼─────────────────┼──────────┼─────────┤
//! │ 7f3e...  │ tool     │ Hammer │ 2      │ 1500 │ 80        │ ["alice","bob"] │ NULL     │ NULL    │
//! │ a91c...  │ material │ Glue   │ 10     │ 300  │ NULL      │ []              │ Acme     │ B       │
//! └──────────┴──────────┴────────┴────────┴──────┴───────────┴─────────────────┴──────────┴─────────┘
//! ```
//!
//! Rows come back in insertion order (`rowid`), which is what gives
//! `find_one` its first-match meaning when names repeat.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::{ItemFilter, ItemStore};
use stockroom_core::{Item, ItemKind, ItemRecord, Material, Money, Stocked, Tool};

const ITEM_COLUMNS: &str = "id, kind, name, amount, cost_cents, usage, condition, \
     borrowed_by, supplier, quality, created_at, updated_at";

const FILTER_CLAUSE: &str = "(?1 IS NULL OR name = ?1) AND (?2 IS NULL OR kind = ?2)";

// =============================================================================
// Row Mapping
// =============================================================================

#[derive(Debug, FromRow)]
struct ItemRow {
    id: String,
    kind: ItemKind,
    name: String,
    amount: i64,
    cost_cents: i64,
    usage: Option<String>,
    condition: Option<i64>,
    borrowed_by: String,
    supplier: Option<String>,
    quality: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ItemRow {
    fn into_item(self) -> DbResult<Item> {
        let id = self.id;
        let corrupt = |reason: &str| DbError::corrupt("Item", id.as_str(), reason);

        let amount = u32::try_from(self.amount).map_err(|_| corrupt("amount out of range"))?;

        let record = ItemRecord {
            id: id.clone(),
            name: self.name,
            amount,
            cost: Money::from_cents(self.cost_cents),
            created_at: self.created_at,
            updated_at: self.updated_at,
        };

        let item = match self.kind {
            ItemKind::Tool => {
                let usage = self.usage.ok_or_else(|| corrupt("tool without usage"))?;
                let condition = self
                    .condition
                    .ok_or_else(|| corrupt("tool without condition"))
                    .and_then(|c| u32::try_from(c).map_err(|_| corrupt("condition out of range")))?;
                let borrowed_by: Vec<String> = serde_json::from_str(&self.borrowed_by)
                    .map_err(|e| corrupt(&format!("borrower log: {e}")))?;

                Item::Tool(Tool {
                    record,
                    usage,
                    condition,
                    borrowed_by,
                })
            }
            ItemKind::Material => {
                let supplier = self
                    .supplier
                    .ok_or_else(|| corrupt("material without supplier"))?;
                let quality = self
                    .quality
                    .ok_or_else(|| corrupt("material without quality"))?;

                Item::Material(Material::new(record, supplier, quality))
            }
        };

        Ok(item)
    }
}

/// Variant columns flattened for binding.
struct VariantColumns<'a> {
    usage: Option<&'a str>,
    condition: Option<i64>,
    borrowed_by: String,
    supplier: Option<&'a str>,
    quality: Option<&'a str>,
}

impl<'a> VariantColumns<'a> {
    fn of(item: &'a Item) -> DbResult<Self> {
        let columns = match item {
            Item::Tool(tool) => VariantColumns {
                usage: Some(&tool.usage),
                condition: Some(i64::from(tool.condition)),
                borrowed_by: serde_json::to_string(&tool.borrowed_by)?,
                supplier: None,
                quality: None,
            },
            Item::Material(material) => VariantColumns {
                usage: None,
                condition: None,
                borrowed_by: "[]".to_string(),
                supplier: Some(&material.supplier),
                quality: Some(&material.quality),
            },
        };
        Ok(columns)
    }
}

// =============================================================================
// Repository
// =============================================================================

/// SQLite-backed [`ItemStore`].
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Counts stored items (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl ItemStore for ItemRepository {
    async fn create(&self, item: &Item) -> DbResult<Item> {
        debug!(id = %item.id(), name = %item.name(), kind = %item.kind(), "Inserting item");

        let record = item.record();
        let variant = VariantColumns::of(item)?;

        sqlx::query(
            r#"
            INSERT INTO items (
                id, kind, name, amount, cost_cents,
                usage, condition, borrowed_by,
                supplier, quality,
                created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5,
                ?6, ?7, ?8,
                ?9, ?10,
                ?11, ?12
            )
            "#,
        )
        .bind(&record.id)
        .bind(item.kind())
        .bind(&record.name)
        .bind(i64::from(record.amount))
        .bind(record.cost.cents())
        .bind(variant.usage)
        .bind(variant.condition)
        .bind(&variant.borrowed_by)
        .bind(variant.supplier)
        .bind(variant.quality)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(item.clone())
    }

    async fn find_one(&self, filter: &ItemFilter) -> DbResult<Option<Item>> {
        debug!(?filter, "Finding first item");

        let sql = format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE {FILTER_CLAUSE} ORDER BY rowid LIMIT 1"
        );

        let row = sqlx::query_as::<_, ItemRow>(&sql)
            .bind(filter.name.as_deref())
            .bind(filter.kind)
            .fetch_optional(&self.pool)
            .await?;

        row.map(ItemRow::into_item).transpose()
    }

    async fn find_all(&self, filter: &ItemFilter) -> DbResult<Vec<Item>> {
        let sql = format!("SELECT {ITEM_COLUMNS} FROM items WHERE {FILTER_CLAUSE} ORDER BY rowid");

        let rows = sqlx::query_as::<_, ItemRow>(&sql)
            .bind(filter.name.as_deref())
            .bind(filter.kind)
            .fetch_all(&self.pool)
            .await?;

        debug!(?filter, count = rows.len(), "Listed items");
        rows.into_iter().map(ItemRow::into_item).collect()
    }

    async fn save(&self, item: &Item) -> DbResult<()> {
        debug!(id = %item.id(), "Saving item");

        let record = item.record();
        let variant = VariantColumns::of(item)?;

        let result = sqlx::query(
            r#"
            UPDATE items SET
                name = ?2,
                amount = ?3,
                cost_cents = ?4,
                usage = ?5,
                condition = ?6,
                borrowed_by = ?7,
                supplier = ?8,
                quality = ?9,
                updated_at = ?10
            WHERE id = ?1
            "#,
        )
        .bind(&record.id)
        .bind(&record.name)
        .bind(i64::from(record.amount))
        .bind(record.cost.cents())
        .bind(variant.usage)
        .bind(variant.condition)
        .bind(&variant.borrowed_by)
        .bind(variant.supplier)
        .bind(variant.quality)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", &record.id));
        }

        Ok(())
    }

    async fn delete_one(&self, filter: &ItemFilter) -> DbResult<Option<Item>> {
        let Some(item) = self.find_one(filter).await? else {
            return Ok(None);
        };

        debug!(id = %item.id(), name = %item.name(), "Deleting item");

        sqlx::query("DELETE FROM items WHERE id = ?1")
            .bind(item.id())
            .execute(&self.pool)
            .await?;

        Ok(Some(item))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn repo() -> (Database, ItemRepository) {
        let db = Database::connect(DbConfig::in_memory()).await.unwrap();
        let items = db.items();
        (db, items)
    }

    fn tool(id: &str, name: &str, condition: u32) -> Item {
        let record = ItemRecord::new(id, name, 1, Money::from_cents(1500), Utc::now());
        Item::Tool(Tool::new(record, "General", condition))
    }

    fn material(id: &str, name: &str, amount: u32) -> Item {
        let record = ItemRecord::new(id, name, amount, Money::from_cents(300), Utc::now());
        Item::Material(Material::new(record, "Acme", "B"))
    }

    #[tokio::test]
    async fn test_create_and_find_one() {
        let (_db, items) = repo().await;
        let hammer = tool("t-1", "Hammer", 90);
        items.create(&hammer).await.unwrap();

        let found = items
            .find_one(&ItemFilter::by_name("Hammer"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id(), "t-1");
        assert_eq!(found.as_tool().unwrap().condition, 90);

        assert!(items
            .find_one(&ItemFilter::by_name("Wrench"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_find_one_takes_first_of_duplicates() {
        let (_db, items) = repo().await;
        items.create(&tool("t-1", "Hammer", 90)).await.unwrap();
        items.create(&material("m-1", "Hammer", 3)).await.unwrap();

        let found = items
            .find_one(&ItemFilter::by_name("Hammer"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id(), "t-1");

        let found = items
            .find_one(&ItemFilter::by_name("Hammer").kind(ItemKind::Material))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id(), "m-1");
    }

    #[tokio::test]
    async fn test_find_all_keeps_insertion_order() {
        let (_db, items) = repo().await;
        items.create(&material("m-1", "Glue", 10)).await.unwrap();
        items.create(&tool("t-1", "Saw", 50)).await.unwrap();
        items.create(&tool("t-2", "Drill", 70)).await.unwrap();

        let all = items.find_all(&ItemFilter::all()).await.unwrap();
        let names: Vec<&str> = all.iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["Glue", "Saw", "Drill"]);

        let tools = items
            .find_all(&ItemFilter::all().kind(ItemKind::Tool))
            .await
            .unwrap();
        assert_eq!(tools.len(), 2);
        assert_eq!(items.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_save_round_trips_borrower_log() {
        let (_db, items) = repo().await;
        let mut hammer = tool("t-1", "Hammer", 90);
        items.create(&hammer).await.unwrap();

        let lent = hammer.as_tool_mut().unwrap();
        assert!(lent.borrow("alice").is_borrowed());
        assert!(lent.borrow("bob").is_borrowed());
        hammer.restock(4);
        items.save(&hammer).await.unwrap();

        let found = items
            .find_one(&ItemFilter::by_name("Hammer"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found, hammer);
        assert_eq!(found.borrowed_by(), ["alice", "bob"]);
        assert_eq!(found.record().amount, 5);
    }

    #[tokio::test]
    async fn test_save_missing_row_is_not_found() {
        let (_db, items) = repo().await;
        let err = items.save(&tool("ghost", "Ghost", 50)).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_one_returns_removed_item() {
        let (_db, items) = repo().await;
        items.create(&material("m-1", "Glue", 10)).await.unwrap();
        items.create(&material("m-2", "Glue", 20)).await.unwrap();

        let removed = items
            .delete_one(&ItemFilter::by_name("Glue"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(removed.id(), "m-1");

        let remaining = items.find_all(&ItemFilter::by_name("Glue")).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id(), "m-2");

        assert!(items
            .delete_one(&ItemFilter::by_name("Nails"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_corrupt_borrower_log() {
        let (db, items) = repo().await;
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO items (id, kind, name, amount, cost_cents, usage, condition, \
             borrowed_by, created_at, updated_at) \
             VALUES ('t-9', 'tool', 'Broken', 1, 100, 'x', 50, 'not json', ?1, ?1)",
        )
        .bind(now)
        .execute(db.pool())
        .await
        .unwrap();

        let err = items
            .find_one(&ItemFilter::by_name("Broken"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Corrupt { .. }));
    }
}
