//! Records kept in the backing store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A registered account. The email doubles as the login key and the owner
/// reference on projects; nothing enforces that it is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Stored and compared in clear text.
    pub password: String,
    pub phone: String,
}

/// A fundraising campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub details: String,
    /// Free-text amount, never parsed
    pub target: String,
    /// Serialized as `YYYY-MM-DD`
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Email of the creating user
    pub owner: String,
}

impl Project {
    /// Inclusive on both ends.
    pub fn runs_on(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn is_owned_by(&self, email: &str) -> bool {
        self.owner == email
    }

    /// One line for the project listing.
    pub fn format_listing(&self, currency: &str) -> String {
        format!(
            "- Title : {}, Details : {}, Target : {} {}, Start : {}, End : {}",
            self.title,
            self.details,
            self.target,
            currency,
            self.start_date.format(crate::validation::DATE_FORMAT),
            self.end_date.format(crate::validation::DATE_FORMAT)
        )
    }

    /// One line for search results.
    pub fn format_match(&self, currency: &str) -> String {
        format!("Title : {}, Target : {} {}", self.title, self.target, currency)
    }
}

/// The whole persisted document: two named collections, no version field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub projects: Vec<Project>,
}
