//! # Users
//!
//! People who borrow tools, and the query that rebuilds what they used.
//!
//! ## Usage Query
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  No edge is stored from a user to the items they used. The history     │
//! │  is derived by scanning every item's borrower log:                     │
//! │                                                                         │
//! │  items:  Hammer  [alice, bob]   ──► match                               │
//! │          Glue    (material)     ──► never matches                       │
//! │          Saw     [bob]          ──► no match                            │
//! │          Drill   [alice]        ──► match                               │
//! │                                                                         │
//! │  alice.used_items(items) = ["Hammer", "Drill"]   (input order)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::item::{Item, Stocked};
use crate::validation::validate_name;

/// A borrower.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    /// Storage identity (UUID v4).
    pub id: String,

    /// Lookup key, and the value written into borrower logs.
    pub name: String,

    pub age: u32,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        age: u32,
        now: DateTime<Utc>,
    ) -> Self {
        User {
            id: id.into(),
            name: name.into(),
            age,
            created_at: now,
        }
    }

    /// Appends this user's name to a tool's borrower log.
    ///
    /// Unlike [`Tool::borrow`](crate::item::Tool::borrow) there is no
    /// condition check and no wear.
    ///
    /// ## Errors
    /// [`CoreError::NotATool`] for a material, which has no borrower log.
    /// The material is left untouched.
    pub fn record_usage(&self, item: &mut Item) -> CoreResult<()> {
        match item {
            Item::Tool(tool) => {
                tool.borrowed_by.push(self.name.clone());
                Ok(())
            }
            Item::Material(material) => Err(CoreError::NotATool(material.name().to_string())),
        }
    }

    /// Names of the items whose borrower log contains this user, in the
    /// order the items were supplied.
    pub fn used_items<'a, I>(&self, items: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a Item>,
    {
        items
            .into_iter()
            .filter(|item| item.as_tool().is_some_and(|tool| tool.was_borrowed_by(&self.name)))
            .map(|item| item.name().to_string())
            .collect()
    }
}

/// Creation request for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewUser {
    pub name: String,
    pub age: u32,
}

impl NewUser {
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        NewUser {
            name: name.into(),
            age,
        }
    }

    pub fn into_user(self, id: impl Into<String>, now: DateTime<Utc>) -> CoreResult<User> {
        validate_name("name", &self.name)?;
        Ok(User::new(id, self.name.trim(), self.age, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemRecord, Material, Tool};
    use crate::money::Money;

    fn tool(name: &str, borrowers: &[&str]) -> Item {
        let record = ItemRecord::new(name, name, 1, Money::from_cents(100), Utc::now());
        let mut tool = Tool::new(record, "General", 100);
        tool.borrowed_by = borrowers.iter().map(|b| b.to_string()).collect();
        Item::Tool(tool)
    }

    fn material(name: &str) -> Item {
        let record = ItemRecord::new(name, name, 10, Money::from_cents(50), Utc::now());
        Item::Material(Material::new(record, "Acme", "A"))
    }

    fn user(name: &str) -> User {
        User::new("u-1", name, 30, Utc::now())
    }

    #[test]
    fn test_used_items_in_supplied_order() {
        let items = vec![
            tool("Hammer", &["alice", "bob"]),
            material("Glue"),
            tool("Saw", &["bob"]),
            tool("Drill", &["carol", "alice", "alice"]),
        ];

        assert_eq!(user("alice").used_items(&items), vec!["Hammer", "Drill"]);
        assert_eq!(user("bob").used_items(&items), vec!["Hammer", "Saw"]);
    }

    #[test]
    fn test_used_items_empty_for_unknown_borrower() {
        let items = vec![tool("Hammer", &["alice"]), material("Glue")];
        assert!(user("dave").used_items(&items).is_empty());
        assert!(user("dave").used_items(&Vec::<Item>::new()).is_empty());
    }

    #[test]
    fn test_used_items_matches_exact_names() {
        let items = vec![tool("Hammer", &["alice"])];
        assert!(user("ali").used_items(&items).is_empty());
    }

    #[test]
    fn test_record_usage_skips_condition_check() {
        let mut item = tool("Chisel", &[]);
        item.as_tool_mut().unwrap().condition = 0;

        user("alice").record_usage(&mut item).unwrap();

        let tool = item.as_tool().unwrap();
        assert_eq!(tool.borrowed_by, vec!["alice".to_string()]);
        assert_eq!(tool.condition, 0);
    }

    #[test]
    fn test_record_usage_rejects_material() {
        let mut item = material("Glue");
        let before = item.clone();

        let err = user("alice").record_usage(&mut item).unwrap_err();
        assert!(matches!(err, CoreError::NotATool(name) if name == "Glue"));
        assert_eq!(item, before);
    }

    #[test]
    fn test_new_user_validates_name() {
        let user = NewUser::new(" alice ", 30).into_user("u-1", Utc::now()).unwrap();
        assert_eq!(user.name, "alice");
        assert!(NewUser::new("", 30).into_user("u-2", Utc::now()).is_err());
    }
}
