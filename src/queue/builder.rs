/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Serving-order computation.
//!
//! The queue is recomputed from scratch on every call: whoever sold least
//! recently is served next, and someone who never sold is due before anyone
//! who did.

use super::log::EventLog;
use super::types::{QueueEntry, Salesperson, SalespersonId, Timestamp};
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// Pure function object that derives the serving order.
///
/// Candidates are the registered profiles (in registration order) followed by
/// ids that only appear in sales (by earliest sale, then id). The candidates
/// are then stable-sorted ascending by their most recent sale timestamp, an
/// absent sale counting as `0`. Equal keys therefore keep registration order.
///
/// # Examples
///
/// ```
/// use turnqueue::queue::{EventLog, QueueBuilder};
/// use turnqueue::{Sale, SaleId, Salesperson, SalespersonId};
///
/// let profiles = vec![Salesperson::new("ana", "Ana"), Salesperson::new("bob", "Bob")];
/// let mut log = EventLog::new();
/// log.append(Sale::new(SaleId::new(), SalespersonId::from("ana"), 1_000));
///
/// let queue = QueueBuilder::new(&profiles, &log).build();
/// assert_eq!(queue[0].id.as_str(), "bob");
/// assert_eq!(queue[1].id.as_str(), "ana");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct QueueBuilder<'a> {
    profiles: &'a [Salesperson],
    log: &'a EventLog,
    placeholder_name: &'a str,
}

impl<'a> QueueBuilder<'a> {
    /// Name given to salespeople without a profile unless overridden.
    pub const DEFAULT_PLACEHOLDER_NAME: &'static str = "Salesperson";

    /// Creates a builder over registered profiles and the sale log.
    #[must_use]
    pub fn new(profiles: &'a [Salesperson], log: &'a EventLog) -> Self {
        Self {
            profiles,
            log,
            placeholder_name: Self::DEFAULT_PLACEHOLDER_NAME,
        }
    }

    /// Overrides the name synthesized for ids without a profile.
    #[must_use]
    pub fn with_placeholder_name(mut self, name: &'a str) -> Self {
        self.placeholder_name = name;
        self
    }

    /// Computes the serving order. Index `0` is next to serve.
    #[must_use]
    pub fn build(&self) -> Vec<QueueEntry> {
        let mut last_sale: HashMap<&SalespersonId, Timestamp> = HashMap::new();
        let mut first_sale: HashMap<&SalespersonId, Timestamp> = HashMap::new();
        for sale in self.log {
            last_sale
                .entry(&sale.salesperson_id)
                .and_modify(|ts| *ts = (*ts).max(sale.timestamp))
                .or_insert(sale.timestamp);
            first_sale
                .entry(&sale.salesperson_id)
                .and_modify(|ts| *ts = (*ts).min(sale.timestamp))
                .or_insert(sale.timestamp);
        }

        let mut seen: HashSet<&SalespersonId> = HashSet::with_capacity(self.profiles.len());
        let mut entries: Vec<QueueEntry> = Vec::with_capacity(self.profiles.len() + last_sale.len());

        for profile in self.profiles {
            if !seen.insert(&profile.id) {
                continue;
            }
            entries.push(QueueEntry {
                id: profile.id.clone(),
                name: profile.name.clone(),
                avatar: profile.avatar.clone(),
                last_sale_at: last_sale.get(&profile.id).copied().unwrap_or(0),
            });
        }

        let mut unregistered: Vec<(&SalespersonId, Timestamp)> = first_sale
            .into_iter()
            .filter(|(id, _)| !seen.contains(id))
            .collect();
        unregistered.sort_by(|(a_id, a_ts), (b_id, b_ts)| a_ts.cmp(b_ts).then_with(|| a_id.cmp(b_id)));

        for (id, _) in unregistered {
            entries.push(QueueEntry {
                id: id.clone(),
                name: self.placeholder_name.to_string(),
                avatar: None,
                last_sale_at: last_sale.get(id).copied().unwrap_or(0),
            });
        }

        entries.sort_by_key(|entry| entry.last_sale_at);

        trace!(
            candidates = entries.len(),
            sales = self.log.len(),
            "queue computed"
        );
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::types::{Sale, SaleId};

    fn ids(queue: &[QueueEntry]) -> Vec<&str> {
        queue.iter().map(|entry| entry.id.as_str()).collect()
    }

    fn record(log: &mut EventLog, person: &str, at: Timestamp) {
        log.append(Sale::new(SaleId::new(), SalespersonId::from(person), at));
    }

    #[test]
    fn test_empty_inputs_give_empty_queue() {
        let log = EventLog::new();
        assert!(QueueBuilder::new(&[], &log).build().is_empty());
    }

    #[test]
    fn test_unregistered_seller_gets_placeholder() {
        let mut log = EventLog::new();
        record(&mut log, "ghost", 10);
        let queue = QueueBuilder::new(&[], &log)
            .with_placeholder_name("Vendedor")
            .build();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].name, "Vendedor");
        assert_eq!(queue[0].avatar, None);
        assert_eq!(queue[0].last_sale_at, 10);
    }

    #[test]
    fn test_profile_data_is_used_when_present() {
        let profiles = vec![Salesperson::new("ana", "Ana").with_avatar("ana.png")];
        let mut log = EventLog::new();
        record(&mut log, "ana", 10);
        let queue = QueueBuilder::new(&profiles, &log).build();
        assert_eq!(queue[0].name, "Ana");
        assert_eq!(queue[0].avatar.as_deref(), Some("ana.png"));
    }

    #[test]
    fn test_unregistered_ids_follow_profiles_on_ties() {
        let profiles = vec![Salesperson::new("ana", "Ana")];
        let mut log = EventLog::new();
        record(&mut log, "zed", 5);
        record(&mut log, "ana", 5);
        record(&mut log, "bob", 5);
        let queue = QueueBuilder::new(&profiles, &log).build();
        assert_eq!(ids(&queue), vec!["ana", "bob", "zed"]);
    }

    #[test]
    fn test_unregistered_ids_ordered_by_first_sale() {
        let mut log = EventLog::new();
        record(&mut log, "zed", 1);
        record(&mut log, "bob", 2);
        record(&mut log, "zed", 9);
        record(&mut log, "bob", 9);
        let queue = QueueBuilder::new(&[], &log).build();
        assert_eq!(ids(&queue), vec!["zed", "bob"]);
    }

    #[test]
    fn test_duplicate_profiles_collapse() {
        let profiles = vec![Salesperson::new("ana", "Ana"), Salesperson::new("ana", "Other")];
        let log = EventLog::new();
        let queue = QueueBuilder::new(&profiles, &log).build();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].name, "Ana");
    }
}
