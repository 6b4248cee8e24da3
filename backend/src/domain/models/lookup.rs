//! Domain models for the read-mostly lookup tables: wallets and
//! categories. Reminders reference these by id; nothing client-side
//! enforces that the reference stays valid.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::reminder::ReminderKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: String,
    pub user_id: String,
    pub name: String,
    /// ISO 4217 code, defaults to "VND".
    pub currency: String,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub created_at: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub user_id: String,
    pub name: String,
    /// Whether the category classifies income (`Thu`) or expense (`Chi`).
    pub kind: ReminderKind,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub created_at: DateTime<FixedOffset>,
}
