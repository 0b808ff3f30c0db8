/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Core data types of the queue engine.
//!
//! Salespeople are identified by an opaque [`SalespersonId`]; sales by a
//! [`SaleId`]. All instants are [`Timestamp`]s in milliseconds since the Unix
//! epoch, always supplied by the caller.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Milliseconds since the Unix epoch.
pub type Timestamp = i64;

/// Opaque, stable identifier of a salesperson.
///
/// # Examples
///
/// ```
/// use turnqueue::SalespersonId;
///
/// let id = SalespersonId::from("ana");
/// assert_eq!(id.as_str(), "ana");
/// assert_eq!(id.to_string(), "ana");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SalespersonId(String);

impl SalespersonId {
    /// Creates an id from anything string-like.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SalespersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SalespersonId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for SalespersonId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Unique identifier of a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaleId(Uuid);

impl SaleId {
    /// Generates a fresh random sale id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SaleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sale-{}", self.0)
    }
}

/// A salesperson profile known to the queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Salesperson {
    /// Stable identity.
    pub id: SalespersonId,
    /// Display name cached on the profile.
    pub name: String,
    /// Optional avatar reference (URL or asset key).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Salesperson {
    /// Creates a profile without an avatar.
    #[must_use]
    pub fn new(id: impl Into<SalespersonId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar: None,
        }
    }

    /// Sets the avatar reference.
    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }
}

/// Partial update applied to an existing [`Salesperson`].
///
/// `None` fields are left untouched. `avatar: Some(None)` clears the avatar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalespersonUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar: Option<Option<String>>,
}

impl SalespersonUpdate {
    pub(crate) fn apply_to(&self, profile: &mut Salesperson) {
        if let Some(name) = &self.name {
            profile.name.clone_from(name);
        }
        if let Some(avatar) = &self.avatar {
            profile.avatar.clone_from(avatar);
        }
    }
}

/// A recorded sale.
///
/// `timestamp` is the immutable creation instant that drives the queue.
/// `last_modified` and `order` are bookkeeping fields touched only by a
/// manual reorder. `last_modified >= timestamp` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: SaleId,
    pub salesperson_id: SalespersonId,
    pub timestamp: Timestamp,
    pub last_modified: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<usize>,
}

impl Sale {
    /// Creates a sale stamped at `at`, with no explicit order.
    #[must_use]
    pub fn new(id: SaleId, salesperson_id: SalespersonId, at: Timestamp) -> Self {
        Self {
            id,
            salesperson_id,
            timestamp: at,
            last_modified: at,
            order: None,
        }
    }

    /// Marks the sale as touched at `now`, never moving `last_modified`
    /// before the creation instant.
    pub(crate) fn touch(&mut self, now: Timestamp) {
        self.last_modified = now.max(self.timestamp);
    }

    /// Returns `true` when the bookkeeping invariant holds.
    #[inline]
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.last_modified >= self.timestamp
    }
}

impl fmt::Display for Sale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} by {} at {}",
            self.id,
            self.salesperson_id,
            super::time::format_timestamp(self.timestamp, 0)
        )
    }
}

/// One position of the computed queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntry {
    pub id: SalespersonId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Timestamp of the person's most recent sale, `0` if none.
    pub last_sale_at: Timestamp,
}
