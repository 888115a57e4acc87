//! # Partial Updates
//!
//! An [`ItemUpdate`] carries only the fields a caller wants to change.
//!
//! ## Zero-Value Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Request { name: "X", amount: Some(0) }                                 │
//! │                                                                         │
//! │  UpdatePolicy::Strict  (default)                                        │
//! │    presence decides  ──► name = "X", amount = 0                         │
//! │                                                                         │
//! │  UpdatePolicy::Lenient (compatibility)                                  │
//! │    blank text, 0 and $0.00 mean "not supplied"                          │
//! │                      ──► name = "X", amount unchanged                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Under `Lenient` a caller cannot set a number to zero or a string to
//! empty through an update; those values are indistinguishable from
//! "no change requested".
//!
//! Fields that belong to the other variant are ignored: a `condition` sent
//! to a material is dropped, as is a `supplier` sent to a tool.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::item::{Item, Stocked};
use crate::money::Money;
use crate::validation::{validate_condition, validate_cost, validate_name};

// =============================================================================
// Update Policy
// =============================================================================

/// How an update treats zero and empty values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum UpdatePolicy {
    /// Only presence matters; `Some(0)` writes zero.
    #[default]
    Strict,
    /// Empty strings and zero numbers are treated as absent.
    Lenient,
}

impl FromStr for UpdatePolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(UpdatePolicy::Strict),
            "lenient" => Ok(UpdatePolicy::Lenient),
            other => Err(ValidationError::Unrecognized {
                field: "update policy".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for UpdatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdatePolicy::Strict => f.write_str("strict"),
            UpdatePolicy::Lenient => f.write_str("lenient"),
        }
    }
}

// =============================================================================
// Item Update
// =============================================================================

/// Field-by-field update request.
///
/// ## Example
/// ```rust
/// use stockroom_core::ItemUpdate;
///
/// let update = ItemUpdate::new().name("Claw Hammer").condition(80);
/// assert!(!update.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub amount: Option<u32>,
    pub cost: Option<Money>,
    pub usage: Option<String>,
    pub condition: Option<u32>,
    pub supplier: Option<String>,
    pub quality: Option<String>,
}

impl ItemUpdate {
    pub fn new() -> Self {
        ItemUpdate::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn amount(mut self, amount: u32) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn cost(mut self, cost: Money) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn condition(mut self, condition: u32) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = Some(supplier.into());
        self
    }

    pub fn quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = Some(quality.into());
        self
    }

    /// True when no field is present at all.
    pub fn is_empty(&self) -> bool {
        *self == ItemUpdate::default()
    }

    /// The request with the policy applied: under `Lenient`, zero numbers
    /// and blank (empty or whitespace-only) text are dropped.
    pub fn effective(&self, policy: UpdatePolicy) -> ItemUpdate {
        match policy {
            UpdatePolicy::Strict => self.clone(),
            UpdatePolicy::Lenient => ItemUpdate {
                name: non_empty(&self.name),
                amount: self.amount.filter(|v| *v != 0),
                cost: self.cost.filter(|v| !v.is_zero()),
                usage: non_empty(&self.usage),
                condition: self.condition.filter(|v| *v != 0),
                supplier: non_empty(&self.supplier),
                quality: non_empty(&self.quality),
            },
        }
    }

    /// Writes the present fields into `item`.
    ///
    /// Every field that would be written is validated first, so an error
    /// leaves the item untouched.
    ///
    /// ## Returns
    /// Names of the fields that were written, in a fixed order.
    pub fn apply(&self, item: &mut Item, policy: UpdatePolicy) -> CoreResult<Vec<&'static str>> {
        let update = self.effective(policy);
        update.validate_for(item)?;

        let mut written = Vec::new();

        let record = item.record_mut();
        if let Some(name) = update.name {
            record.name = name.trim().to_string();
            written.push("name");
        }
        if let Some(amount) = update.amount {
            record.amount = amount;
            written.push("amount");
        }
        if let Some(cost) = update.cost {
            record.cost = cost;
            written.push("cost");
        }

        match item {
            Item::Tool(tool) => {
                if let Some(usage) = update.usage {
                    tool.usage = usage;
                    written.push("usage");
                }
                if let Some(condition) = update.condition {
                    tool.condition = condition;
                    written.push("condition");
                }
            }
            Item::Material(material) => {
                if let Some(supplier) = update.supplier {
                    material.supplier = supplier;
                    written.push("supplier");
                }
                if let Some(quality) = update.quality {
                    material.quality = quality;
                    written.push("quality");
                }
            }
        }

        Ok(written)
    }

    fn validate_for(&self, item: &Item) -> CoreResult<()> {
        if let Some(name) = &self.name {
            validate_name("name", name)?;
        }
        if let Some(cost) = self.cost {
            validate_cost(cost)?;
        }

        match item {
            Item::Tool(_) => {
                require_non_blank("usage", &self.usage)?;
                if let Some(condition) = self.condition {
                    validate_condition(condition)?;
                }
            }
            Item::Material(_) => {
                require_non_blank("supplier", &self.supplier)?;
                require_non_blank("quality", &self.quality)?;
            }
        }

        Ok(())
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}

fn require_non_blank(field: &str, value: &Option<String>) -> Result<(), ValidationError> {
    match value {
        Some(text) if text.trim().is_empty() => Err(ValidationError::Missing {
            field: field.to_string(),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::item::{ItemRecord, Material, Tool};
    use chrono::Utc;

    fn tool() -> Item {
        let record = ItemRecord::new("t-1", "Hammer", 4, Money::from_cents(1500), Utc::now());
        Item::Tool(Tool::new(record, "Nails", 70))
    }

    fn material() -> Item {
        let record = ItemRecord::new("m-1", "Glue", 10, Money::from_cents(300), Utc::now());
        Item::Material(Material::new(record, "Acme", "B"))
    }

    #[test]
    fn test_name_only_leaves_numbers() {
        let mut item = tool();
        let written = ItemUpdate::new()
            .name("X")
            .apply(&mut item, UpdatePolicy::Strict)
            .unwrap();

        assert_eq!(written, vec!["name"]);
        assert_eq!(item.record().name, "X");
        assert_eq!(item.record().amount, 4);
        assert_eq!(item.record().cost.cents(), 1500);
    }

    #[test]
    fn test_zero_amount_strict_writes_zero() {
        let mut item = tool();
        ItemUpdate::new()
            .amount(0)
            .apply(&mut item, UpdatePolicy::Strict)
            .unwrap();
        assert_eq!(item.record().amount, 0);
    }

    #[test]
    fn test_zero_amount_lenient_is_ignored() {
        let mut item = tool();
        let written = ItemUpdate::new()
            .amount(0)
            .cost(Money::zero())
            .condition(0)
            .apply(&mut item, UpdatePolicy::Lenient)
            .unwrap();

        assert!(written.is_empty());
        assert_eq!(item.record().amount, 4);
        assert_eq!(item.record().cost.cents(), 1500);
        assert_eq!(item.as_tool().unwrap().condition, 70);
    }

    #[test]
    fn test_empty_strings_lenient_are_ignored() {
        let mut item = material();
        let before = item.clone();
        let written = ItemUpdate::new()
            .name("")
            .supplier("")
            .quality("")
            .apply(&mut item, UpdatePolicy::Lenient)
            .unwrap();

        assert!(written.is_empty());
        assert_eq!(item, before);
    }

    #[test]
    fn test_blank_name_lenient_keeps_other_fields() {
        let mut item = tool();
        let written = ItemUpdate::new()
            .name("  ")
            .amount(7)
            .apply(&mut item, UpdatePolicy::Lenient)
            .unwrap();

        assert_eq!(written, vec!["amount"]);
        assert_eq!(item.record().name, "Hammer");
        assert_eq!(item.record().amount, 7);
    }

    #[test]
    fn test_empty_name_strict_is_rejected() {
        let mut item = material();
        let before = item.clone();
        let err = ItemUpdate::new()
            .name("")
            .amount(1)
            .apply(&mut item, UpdatePolicy::Strict)
            .unwrap_err();

        assert!(matches!(err, CoreError::Validation(ValidationError::Missing { .. })));
        assert_eq!(item, before);
    }

    #[test]
    fn test_variant_fields_are_routed() {
        let mut item = tool();
        let update = ItemUpdate::new()
            .usage("Framing")
            .condition(90)
            .supplier("Ignored")
            .quality("Ignored");
        let written = update.apply(&mut item, UpdatePolicy::Strict).unwrap();
        assert_eq!(written, vec!["usage", "condition"]);
        let tool = item.as_tool().unwrap();
        assert_eq!(tool.usage, "Framing");
        assert_eq!(tool.condition, 90);

        let mut item = material();
        let written = update.apply(&mut item, UpdatePolicy::Strict).unwrap();
        assert_eq!(written, vec!["supplier", "quality"]);
        assert_eq!(item.as_material().unwrap().supplier, "Ignored");
    }

    #[test]
    fn test_condition_out_of_range_is_rejected() {
        let mut item = tool();
        let err = ItemUpdate::new()
            .name("Renamed")
            .condition(150)
            .apply(&mut item, UpdatePolicy::Strict)
            .unwrap_err();

        assert!(matches!(err, CoreError::Validation(ValidationError::AboveMaximum { .. })));
        assert_eq!(item.record().name, "Hammer");
    }

    #[test]
    fn test_condition_ignored_for_material() {
        let mut item = material();
        let written = ItemUpdate::new()
            .condition(150)
            .apply(&mut item, UpdatePolicy::Strict)
            .unwrap();
        assert!(written.is_empty());
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("strict".parse::<UpdatePolicy>().unwrap(), UpdatePolicy::Strict);
        assert_eq!("Lenient".parse::<UpdatePolicy>().unwrap(), UpdatePolicy::Lenient);
        assert!("loose".parse::<UpdatePolicy>().is_err());
        assert_eq!(UpdatePolicy::default(), UpdatePolicy::Strict);
    }

    #[test]
    fn test_is_empty() {
        assert!(ItemUpdate::new().is_empty());
        assert!(!ItemUpdate::new().amount(0).is_empty());
    }
}
