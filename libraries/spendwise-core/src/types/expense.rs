//! Expense types
//!
//! Wire format follows the remote store: camelCase JSON with the owner id and
//! creation timestamp assigned around the editable fields.

use super::ids::{ExpenseId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// An expense as stored remotely
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,
    pub created_at: DateTime<Utc>,
    pub title: String,
    #[serde(deserialize_with = "lenient_amount")]
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub owner_id: UserId,
}

impl Expense {
    /// Copy the fields present in `changes` onto this expense.
    pub fn apply(&mut self, changes: &UpdateExpense) {
        if let Some(title) = &changes.title {
            self.title.clone_from(title);
        }
        if let Some(amount) = changes.amount {
            self.amount = amount;
        }
        if let Some(category) = &changes.category {
            self.category.clone_from(category);
        }
        if let Some(description) = &changes.description {
            self.description.clone_from(description);
        }
    }
}

/// User-entered expense fields, before an owner is attached
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpenseDraft {
    pub title: String,
    pub amount: f64,
    pub category: String,
    pub description: String,
}

impl ExpenseDraft {
    /// Attach an owner, producing the payload sent to the store.
    pub fn into_create(self, owner_id: UserId) -> CreateExpense {
        CreateExpense {
            title: self.title,
            amount: self.amount,
            category: self.category,
            description: self.description,
            owner_id,
        }
    }
}

/// Data for creating a new expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpense {
    pub title: String,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub owner_id: UserId,
}

/// Data for updating an expense (all fields optional)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExpense {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UpdateExpense {
    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.amount.is_none()
            && self.category.is_none()
            && self.description.is_none()
    }
}

impl From<ExpenseDraft> for UpdateExpense {
    fn from(draft: ExpenseDraft) -> Self {
        Self {
            title: Some(draft.title),
            amount: Some(draft.amount),
            category: Some(draft.category),
            description: Some(draft.description),
        }
    }
}

/// The mock API stores amounts as numbers, but records edited by hand come
/// back as numeric strings.
fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(f64),
        Text(String),
    }

    match Amount::deserialize(deserializer)? {
        Amount::Number(value) => Ok(value),
        Amount::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid amount: {text:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "id": "e1",
            "createdAt": "2025-05-27T05:23:47.813Z",
            "title": "Coffee",
            "amount": 4.5,
            "category": "Food",
            "description": "",
            "ownerId": "u1"
        })
    }

    #[test]
    fn deserializes_store_record() {
        let expense: Expense = serde_json::from_value(sample()).unwrap();
        assert_eq!(expense.id, ExpenseId::new("e1"));
        assert_eq!(expense.owner_id, UserId::new("u1"));
        assert_eq!(expense.amount, 4.5);
        assert_eq!(expense.created_at.to_rfc3339(), "2025-05-27T05:23:47.813+00:00");
    }

    #[test]
    fn accepts_string_amounts_and_missing_description() {
        let mut value = sample();
        value["amount"] = json!("12.25");
        value.as_object_mut().unwrap().remove("description");

        let expense: Expense = serde_json::from_value(value).unwrap();
        assert_eq!(expense.amount, 12.25);
        assert_eq!(expense.description, "");
    }

    #[test]
    fn rejects_garbage_amounts() {
        let mut value = sample();
        value["amount"] = json!("lots");
        assert!(serde_json::from_value::<Expense>(value).is_err());
    }

    #[test]
    fn update_payload_omits_unset_fields() {
        let changes = UpdateExpense {
            amount: Some(10.0),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&changes).unwrap(), json!({ "amount": 10.0 }));
    }

    #[test]
    fn create_payload_carries_owner() {
        let draft = ExpenseDraft {
            title: "Coffee".into(),
            amount: 4.5,
            category: "Food".into(),
            description: String::new(),
        };
        let value = serde_json::to_value(draft.into_create(UserId::new("u1"))).unwrap();
        assert_eq!(value["ownerId"], "u1");
        assert_eq!(value["amount"], 4.5);
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut expense: Expense = serde_json::from_value(sample()).unwrap();
        expense.apply(&UpdateExpense {
            title: Some("Tea".into()),
            ..Default::default()
        });
        assert_eq!(expense.title, "Tea");
        assert_eq!(expense.category, "Food");
        assert_eq!(expense.amount, 4.5);
    }
}
