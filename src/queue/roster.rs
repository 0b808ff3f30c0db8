/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Roster lookup and the "in service today" filter.
//!
//! The roster belongs to the surrounding application. The engine only reads
//! it through [`RosterLookup`] to decide eligibility, activity and the
//! current display name.

use super::log::EventLog;
use super::time::start_of_day;
use super::types::{QueueEntry, SalespersonId, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Roster attributes consumed by the filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    /// Current display name, always preferred over the profile name.
    pub name: String,
    /// Selling permission.
    pub can_sell: bool,
    /// Last login or activity instant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_active_at: Option<Timestamp>,
}

impl RosterEntry {
    /// Creates an entry that has never been active.
    #[must_use]
    pub fn new(name: impl Into<String>, can_sell: bool) -> Self {
        Self {
            name: name.into(),
            can_sell,
            last_active_at: None,
        }
    }

    /// Sets the last activity instant.
    #[must_use]
    pub fn active_at(mut self, at: Timestamp) -> Self {
        self.last_active_at = Some(at);
        self
    }
}

/// Read-only access to roster entries by salesperson id.
pub trait RosterLookup {
    /// Returns the roster entry for `id`, if the person is on the roster.
    fn lookup(&self, id: &SalespersonId) -> Option<RosterEntry>;
}

impl<T: RosterLookup + ?Sized> RosterLookup for &T {
    fn lookup(&self, id: &SalespersonId) -> Option<RosterEntry> {
        (**self).lookup(id)
    }
}

impl RosterLookup for HashMap<SalespersonId, RosterEntry> {
    fn lookup(&self, id: &SalespersonId) -> Option<RosterEntry> {
        self.get(id).cloned()
    }
}

/// Adapter that turns a closure into a [`RosterLookup`].
#[derive(Debug, Clone, Copy)]
pub struct FnRoster<F>(F);

impl<F> RosterLookup for FnRoster<F>
where
    F: Fn(&SalespersonId) -> Option<RosterEntry>,
{
    fn lookup(&self, id: &SalespersonId) -> Option<RosterEntry> {
        (self.0)(id)
    }
}

/// Wraps a closure as a roster lookup.
///
/// # Examples
///
/// ```
/// use turnqueue::queue::{RosterEntry, RosterLookup, roster_fn};
/// use turnqueue::SalespersonId;
///
/// let roster = roster_fn(|id: &SalespersonId| {
///     (id.as_str() == "ana").then(|| RosterEntry::new("Ana", true))
/// });
/// assert!(roster.lookup(&SalespersonId::from("ana")).is_some());
/// assert!(roster.lookup(&SalespersonId::from("bob")).is_none());
/// ```
pub fn roster_fn<F>(lookup: F) -> FnRoster<F>
where
    F: Fn(&SalespersonId) -> Option<RosterEntry>,
{
    FnRoster(lookup)
}

/// Simple in-memory roster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    entries: HashMap<SalespersonId, RosterEntry>,
}

impl Roster {
    /// Creates an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an entry, returning the previous one.
    pub fn upsert(&mut self, id: impl Into<SalespersonId>, entry: RosterEntry) -> Option<RosterEntry> {
        self.entries.insert(id.into(), entry)
    }

    /// Removes an entry.
    pub fn remove(&mut self, id: &SalespersonId) -> Option<RosterEntry> {
        self.entries.remove(id)
    }

    /// Returns the entry for `id`.
    #[must_use]
    pub fn get(&self, id: &SalespersonId) -> Option<&RosterEntry> {
        self.entries.get(id)
    }

    /// Grants or revokes selling permission. Returns `false` for unknown ids.
    pub fn set_can_sell(&mut self, id: &SalespersonId, can_sell: bool) -> bool {
        match self.entries.get_mut(id) {
            Some(entry) => {
                entry.can_sell = can_sell;
                true
            }
            None => false,
        }
    }

    /// Records the first activity of the day.
    ///
    /// `last_active_at` is set to `now` only when it is absent or earlier
    /// than the start of the local day containing `now`. Returns `true` if
    /// the entry changed.
    pub fn touch_active(&mut self, id: &SalespersonId, now: Timestamp, utc_offset_minutes: i32) -> bool {
        let today_start = start_of_day(now, utc_offset_minutes);
        match self.entries.get_mut(id) {
            Some(entry) if entry.last_active_at.is_none_or(|at| at < today_start) => {
                entry.last_active_at = Some(now);
                true
            }
            _ => false,
        }
    }

    /// Number of roster entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the roster is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl RosterLookup for Roster {
    fn lookup(&self, id: &SalespersonId) -> Option<RosterEntry> {
        self.entries.get(id).cloned()
    }
}

/// Narrows a raw queue to the people visibly in service.
///
/// A candidate survives when it has a roster entry with `can_sell`, and it
/// was either active since local midnight or has a sale since local
/// midnight. Survivors keep the raw queue's relative order and always carry
/// the roster's current name.
pub struct RosterFilter<'a, R: RosterLookup + ?Sized> {
    roster: &'a R,
    log: &'a EventLog,
    utc_offset_minutes: i32,
}

impl<'a, R: RosterLookup + ?Sized> RosterFilter<'a, R> {
    /// Creates a filter reading activity from `roster` and sales from `log`.
    #[must_use]
    pub fn new(roster: &'a R, log: &'a EventLog, utc_offset_minutes: i32) -> Self {
        Self {
            roster,
            log,
            utc_offset_minutes,
        }
    }

    /// Filters `queue` as of `now`, keeping at most `limit` entries.
    #[must_use]
    pub fn apply(&self, queue: Vec<QueueEntry>, now: Timestamp, limit: Option<usize>) -> Vec<QueueEntry> {
        let today_start = start_of_day(now, self.utc_offset_minutes);

        let mut filtered: Vec<QueueEntry> = queue
            .into_iter()
            .filter_map(|mut candidate| {
                let entry = self.roster.lookup(&candidate.id)?;
                if !entry.can_sell {
                    return None;
                }
                let active_today = entry.last_active_at.is_some_and(|at| at >= today_start);
                let sold_today = || {
                    self.log
                        .sales_for(&candidate.id)
                        .any(|sale| sale.timestamp >= today_start)
                };
                if !active_today && !sold_today() {
                    return None;
                }
                candidate.name = entry.name;
                Some(candidate)
            })
            .collect();

        if let Some(limit) = limit {
            filtered.truncate(limit);
        }
        filtered
    }
}
