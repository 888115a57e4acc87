//! # Items
//!
//! The inventory record and its two variants.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Item (sum type)                                 │
//! │                                                                         │
//! │            ┌─────────────────────────────────────────┐                  │
//! │            │              ItemRecord                 │                  │
//! │            │  id, name, amount, cost, timestamps     │                  │
//! │            │  worth() = amount × cost                │                  │
//! │            └───────────────┬─────────────────────────┘                  │
//! │                 embedded   │   embedded                                 │
//! │          ┌─────────────────┴──────────────┐                             │
//! │  ┌───────▼─────────┐              ┌───────▼─────────┐                   │
//! │  │      Tool       │              │    Material     │                   │
//! │  │  usage          │              │  supplier       │                   │
//! │  │  condition 0-100│              │  quality        │                   │
//! │  │  borrowed_by[]  │              │                 │                   │
//! │  │  borrow/repair  │              │  consume        │                   │
//! │  └─────────────────┘              └─────────────────┘                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Shared behaviour comes from the [`Stocked`] trait; variant behaviour
//! lives on the variant structs. Callers holding an [`Item`] match on it
//! to reach the variant operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::{
    require_text, validate_condition, validate_cost, validate_name, validate_quantity,
};
use crate::{BORROW_WEAR, MIN_BORROW_CONDITION, REPAIR_BOOST};

// =============================================================================
// Item Kind
// =============================================================================

/// Discriminator stored alongside every item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Tool,
    Material,
}

impl ItemKind {
    /// Parses a user supplied kind tag.
    ///
    /// Accepts `tool` and `material` in any case, surrounding whitespace
    /// ignored. Anything else is [`CoreError::InvalidVariant`].
    pub fn parse(tag: &str) -> CoreResult<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "tool" => Ok(ItemKind::Tool),
            "material" => Ok(ItemKind::Material),
            _ => Err(CoreError::InvalidVariant(tag.to_string())),
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Tool => "tool",
            ItemKind::Material => "material",
        }
    }
}

impl FromStr for ItemKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemKind::parse(s)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Item Record
// =============================================================================

/// Fields shared by every item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemRecord {
    /// Storage identity (UUID v4).
    pub id: String,

    /// Lookup key used by callers. Not unique.
    pub name: String,

    /// Quantity on hand.
    pub amount: u32,

    /// Unit cost.
    pub cost: Money,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl ItemRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        amount: u32,
        cost: Money,
        now: DateTime<Utc>,
    ) -> Self {
        ItemRecord {
            id: id.into(),
            name: name.into(),
            amount,
            cost,
            created_at: now,
            updated_at: now,
        }
    }

    /// Total value of the stock on hand.
    #[inline]
    pub fn worth(&self) -> Money {
        self.cost * self.amount
    }

    /// Adds `delta` units to the stock. Nothing is persisted.
    pub fn restock(&mut self, delta: u32) {
        self.amount = self.amount.saturating_add(delta);
    }

    /// Stamps the record as modified.
    pub fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

// =============================================================================
// Shared Behaviour
// =============================================================================

/// Behaviour common to anything that carries an [`ItemRecord`].
pub trait Stocked {
    fn record(&self) -> &ItemRecord;

    fn record_mut(&mut self) -> &mut ItemRecord;

    fn name(&self) -> &str {
        &self.record().name
    }

    /// `amount × cost`. Never fails.
    fn worth(&self) -> Money {
        self.record().worth()
    }

    fn restock(&mut self, delta: u32) {
        self.record_mut().restock(delta);
    }
}

// =============================================================================
// Tool
// =============================================================================

/// Result of asking a tool to be lent out.
///
/// A worn tool declines without raising an error, so callers must look at
/// the outcome (or at the borrower log) before assuming the borrow happened.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BorrowOutcome {
    /// The borrower was logged; `condition` is the value after wear.
    Borrowed { condition: u32 },
    /// The tool is in poor condition; nothing changed.
    Declined { condition: u32 },
}

impl BorrowOutcome {
    pub const fn is_borrowed(&self) -> bool {
        matches!(self, BorrowOutcome::Borrowed { .. })
    }
}

/// A reusable item that wears out as it is lent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Tool {
    #[serde(flatten)]
    pub record: ItemRecord,

    /// What the tool is for.
    pub usage: String,

    /// Wear level, 0-100 at rest.
    pub condition: u32,

    /// Every successful borrow, oldest first. Names may repeat.
    pub borrowed_by: Vec<String>,
}

impl Tool {
    pub fn new(record: ItemRecord, usage: impl Into<String>, condition: u32) -> Self {
        Tool {
            record,
            usage: usage.into(),
            condition,
            borrowed_by: Vec::new(),
        }
    }

    /// Whether the tool is in good enough shape to lend.
    #[inline]
    pub fn can_borrow(&self) -> bool {
        self.condition > MIN_BORROW_CONDITION
    }

    /// Lends the tool to `user_name`.
    ///
    /// ## Rules
    /// ```text
    /// condition > 15 ──► condition -= 10, push user_name ──► Borrowed
    /// otherwise      ──► no change                      ──► Declined
    /// ```
    pub fn borrow(&mut self, user_name: &str) -> BorrowOutcome {
        if !self.can_borrow() {
            return BorrowOutcome::Declined {
                condition: self.condition,
            };
        }

        self.condition -= BORROW_WEAR;
        self.borrowed_by.push(user_name.to_string());
        BorrowOutcome::Borrowed {
            condition: self.condition,
        }
    }

    /// Adds 20 to the condition and returns the new value.
    ///
    /// No upper clamp at this level; repeated repairs can exceed 100.
    /// `Inventory` clamps at the call site when configured to.
    pub fn repair(&mut self) -> u32 {
        self.condition = self.condition.saturating_add(REPAIR_BOOST);
        self.condition
    }

    /// Whether `user_name` appears anywhere in the borrower log.
    pub fn was_borrowed_by(&self, user_name: &str) -> bool {
        self.borrowed_by.iter().any(|name| name == user_name)
    }
}

impl Stocked for Tool {
    fn record(&self) -> &ItemRecord {
        &self.record
    }

    fn record_mut(&mut self) -> &mut ItemRecord {
        &mut self.record
    }
}

// =============================================================================
// Material
// =============================================================================

/// A consumable item drawn down from stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Material {
    #[serde(flatten)]
    pub record: ItemRecord,

    pub supplier: String,

    /// Free-form quality rating.
    pub quality: String,
}

impl Material {
    pub fn new(
        record: ItemRecord,
        supplier: impl Into<String>,
        quality: impl Into<String>,
    ) -> Self {
        Material {
            record,
            supplier: supplier.into(),
            quality: quality.into(),
        }
    }

    /// Takes `quantity` units out of stock.
    ///
    /// Check and decrement happen together: on error the amount is untouched.
    ///
    /// ## Errors
    /// - [`CoreError::Validation`] when `quantity` is zero
    /// - [`CoreError::InsufficientStock`] when fewer than `quantity` are on hand
    pub fn consume(&mut self, quantity: u32) -> CoreResult<()> {
        validate_quantity(quantity)?;

        let available = self.record.amount;
        if available < quantity {
            return Err(CoreError::InsufficientStock {
                name: self.record.name.clone(),
                available,
                requested: quantity,
            });
        }

        self.record.amount = available - quantity;
        Ok(())
    }
}

impl Stocked for Material {
    fn record(&self) -> &ItemRecord {
        &self.record
    }

    fn record_mut(&mut self) -> &mut ItemRecord {
        &mut self.record
    }
}

// =============================================================================
// Item
// =============================================================================

/// Any inventory item, discriminated by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Item {
    Tool(Tool),
    Material(Material),
}

impl Item {
    pub const fn kind(&self) -> ItemKind {
        match self {
            Item::Tool(_) => ItemKind::Tool,
            Item::Material(_) => ItemKind::Material,
        }
    }

    pub fn id(&self) -> &str {
        &self.record().id
    }

    /// The borrower log. Materials have none and return an empty slice.
    pub fn borrowed_by(&self) -> &[String] {
        match self {
            Item::Tool(tool) => &tool.borrowed_by,
            Item::Material(_) => &[],
        }
    }

    pub fn as_tool(&self) -> Option<&Tool> {
        match self {
            Item::Tool(tool) => Some(tool),
            Item::Material(_) => None,
        }
    }

    pub fn as_tool_mut(&mut self) -> Option<&mut Tool> {
        match self {
            Item::Tool(tool) => Some(tool),
            Item::Material(_) => None,
        }
    }

    pub fn as_material(&self) -> Option<&Material> {
        match self {
            Item::Material(material) => Some(material),
            Item::Tool(_) => None,
        }
    }
}

impl Stocked for Item {
    fn record(&self) -> &ItemRecord {
        match self {
            Item::Tool(tool) => &tool.record,
            Item::Material(material) => &material.record,
        }
    }

    fn record_mut(&mut self) -> &mut ItemRecord {
        match self {
            Item::Tool(tool) => &mut tool.record,
            Item::Material(material) => &mut material.record,
        }
    }
}

impl From<Tool> for Item {
    fn from(tool: Tool) -> Self {
        Item::Tool(tool)
    }
}

impl From<Material> for Item {
    fn from(material: Material) -> Self {
        Item::Material(material)
    }
}

// =============================================================================
// New Item
// =============================================================================

/// Creation request for an item.
///
/// `kind` is the raw tag as typed by the user. It is checked first; the
/// remaining fields are only read once the kind is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewItem {
    pub kind: String,
    pub name: String,
    pub amount: u32,
    pub cost: Money,
    /// Tool only.
    pub usage: Option<String>,
    /// Tool only.
    pub condition: Option<u32>,
    /// Material only.
    pub supplier: Option<String>,
    /// Material only.
    pub quality: Option<String>,
}

impl NewItem {
    pub fn tool(
        name: impl Into<String>,
        amount: u32,
        cost: Money,
        usage: impl Into<String>,
        condition: u32,
    ) -> Self {
        NewItem {
            kind: ItemKind::Tool.as_str().to_string(),
            name: name.into(),
            amount,
            cost,
            usage: Some(usage.into()),
            condition: Some(condition),
            supplier: None,
            quality: None,
        }
    }

    pub fn material(
        name: impl Into<String>,
        amount: u32,
        cost: Money,
        supplier: impl Into<String>,
        quality: impl Into<String>,
    ) -> Self {
        NewItem {
            kind: ItemKind::Material.as_str().to_string(),
            name: name.into(),
            amount,
            cost,
            usage: None,
            condition: None,
            supplier: Some(supplier.into()),
            quality: Some(quality.into()),
        }
    }

    /// Builds the item, validating every field the kind requires.
    ///
    /// ## Errors
    /// - [`CoreError::InvalidVariant`] for an unknown kind tag, before any
    ///   other field is looked at
    /// - [`CoreError::Validation`] for missing or out-of-range fields
    pub fn into_item(self, id: impl Into<String>, now: DateTime<Utc>) -> CoreResult<Item> {
        let kind = ItemKind::parse(&self.kind)?;

        validate_name("name", &self.name)?;
        validate_cost(self.cost)?;
        let record = ItemRecord::new(id, self.name.trim(), self.amount, self.cost, now);

        let item = match kind {
            ItemKind::Tool => {
                let usage = require_text("usage", self.usage)?;
                let condition = self.condition.ok_or_else(|| ValidationError::Missing {
                    field: "condition".to_string(),
                })?;
                validate_condition(condition)?;
                Item::Tool(Tool::new(record, usage, condition))
            }
            ItemKind::Material => {
                let supplier = require_text("supplier", self.supplier)?;
                let quality = require_text("quality", self.quality)?;
                Item::Material(Material::new(record, supplier, quality))
            }
        };

        Ok(item)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, amount: u32, cost_cents: i64) -> ItemRecord {
        ItemRecord::new("test-id", name, amount, Money::from_cents(cost_cents), Utc::now())
    }

    fn hammer(condition: u32) -> Tool {
        Tool::new(record("Hammer", 1, 1500), "Driving nails", condition)
    }

    fn plywood(amount: u32) -> Material {
        Material::new(record("Plywood", amount, 2000), "Acme Timber", "A")
    }

    #[test]
    fn test_worth() {
        assert_eq!(record("Saw", 3, 1250).worth().cents(), 3750);
        assert_eq!(record("Saw", 0, 1250).worth().cents(), 0);
        assert_eq!(record("Saw", 3, 0).worth().cents(), 0);

        let item = Item::from(plywood(4));
        assert_eq!(item.worth().cents(), 8000);
    }

    #[test]
    fn test_restock() {
        let mut item = Item::from(plywood(2));
        item.restock(5);
        assert_eq!(item.record().amount, 7);
        item.restock(0);
        assert_eq!(item.record().amount, 7);
    }

    #[test]
    fn test_borrow_above_threshold() {
        let mut tool = hammer(16);
        let outcome = tool.borrow("alice");

        assert_eq!(outcome, BorrowOutcome::Borrowed { condition: 6 });
        assert!(outcome.is_borrowed());
        assert_eq!(tool.condition, 6);
        assert_eq!(tool.borrowed_by, vec!["alice".to_string()]);
    }

    #[test]
    fn test_borrow_at_threshold_is_declined() {
        let mut tool = hammer(15);
        let outcome = tool.borrow("alice");

        assert_eq!(outcome, BorrowOutcome::Declined { condition: 15 });
        assert_eq!(tool.condition, 15);
        assert!(tool.borrowed_by.is_empty());
    }

    #[test]
    fn test_nine_borrows_then_decline() {
        let mut tool = hammer(100);
        let users = ["alice", "bob"];

        for i in 0..9 {
            let outcome = tool.borrow(users[i % 2]);
            assert!(outcome.is_borrowed(), "borrow {} should succeed", i + 1);
        }
        assert_eq!(tool.condition, 10);
        assert_eq!(tool.borrowed_by.len(), 9);
        assert_eq!(tool.borrowed_by[0], "alice");
        assert_eq!(tool.borrowed_by[1], "bob");

        let before = tool.clone();
        let outcome = tool.borrow("alice");
        assert_eq!(outcome, BorrowOutcome::Declined { condition: 10 });
        assert_eq!(tool, before);
    }

    #[test]
    fn test_repair_is_unclamped() {
        let mut tool = hammer(10);
        assert_eq!(tool.repair(), 30);

        let mut tool = hammer(95);
        assert_eq!(tool.repair(), 115);
        assert_eq!(tool.condition, 115);
    }

    #[test]
    fn test_consume() {
        let mut material = plywood(5);
        material.consume(3).unwrap();
        assert_eq!(material.record.amount, 2);

        let err = material.consume(3).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 2,
                requested: 3,
                ..
            }
        ));
        assert_eq!(material.record.amount, 2);

        material.consume(2).unwrap();
        assert_eq!(material.record.amount, 0);
    }

    #[test]
    fn test_consume_zero_rejected() {
        let mut material = plywood(5);
        let err = material.consume(0).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Zero { .. })
        ));
        assert_eq!(material.record.amount, 5);
    }

    #[test]
    fn test_item_kind_parse() {
        assert_eq!(ItemKind::parse("tool").unwrap(), ItemKind::Tool);
        assert_eq!(ItemKind::parse(" Material ").unwrap(), ItemKind::Material);
        assert_eq!("TOOL".parse::<ItemKind>().unwrap(), ItemKind::Tool);
        assert!(matches!(
            ItemKind::parse("gadget"),
            Err(CoreError::InvalidVariant(tag)) if tag == "gadget"
        ));
    }

    #[test]
    fn test_new_item_unknown_kind_checked_first() {
        let mut new_item = NewItem::tool("", 0, Money::from_cents(-5), "", 500);
        new_item.kind = "gadget".to_string();

        let err = new_item.into_item("id", Utc::now()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidVariant(_)));
    }

    #[test]
    fn test_new_tool() {
        let item = NewItem::tool(" Drill ", 2, Money::from_cents(8999), "Holes", 100)
            .into_item("id-1", Utc::now())
            .unwrap();

        assert_eq!(item.kind(), ItemKind::Tool);
        assert_eq!(item.name(), "Drill");
        let tool = item.as_tool().unwrap();
        assert_eq!(tool.condition, 100);
        assert!(tool.borrowed_by.is_empty());
    }

    #[test]
    fn test_new_tool_requires_valid_condition() {
        let mut new_item = NewItem::tool("Drill", 1, Money::zero(), "Holes", 100);
        new_item.condition = None;
        assert!(matches!(
            new_item.clone().into_item("id", Utc::now()),
            Err(CoreError::Validation(ValidationError::Missing { .. }))
        ));

        new_item.condition = Some(101);
        assert!(matches!(
            new_item.into_item("id", Utc::now()),
            Err(CoreError::Validation(ValidationError::AboveMaximum { .. }))
        ));
    }

    #[test]
    fn test_new_material_requires_supplier_and_quality() {
        let mut new_item = NewItem::material("Glue", 10, Money::from_cents(300), "Acme", "B");
        new_item.quality = Some(String::new());

        assert!(matches!(
            new_item.into_item("id", Utc::now()),
            Err(CoreError::Validation(ValidationError::Missing { field })) if field == "quality"
        ));
    }

    #[test]
    fn test_material_has_no_borrower_log() {
        let item = Item::from(plywood(1));
        assert!(item.borrowed_by().is_empty());
        assert!(item.as_tool().is_none());
    }

    #[test]
    fn test_serialized_shape() {
        let item = Item::from(hammer(80));
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["kind"], "tool");
        assert_eq!(json["name"], "Hammer");
        assert_eq!(json["condition"], 80);
        assert_eq!(json["cost"], 1500);

        let back: Item = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }
}
