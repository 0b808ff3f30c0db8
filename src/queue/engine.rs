/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! The queue engine: owner of the sale log and the salesperson profiles.
//!
//! All mutations are plain synchronous calls on `&mut self`. Unknown ids are
//! never an error: operations on them are no-ops reported through the return
//! value. Queue reads are recomputed from the current state on every call.

use super::builder::QueueBuilder;
use super::config::QueueConfig;
use super::log::EventLog;
use super::reorder;
use super::roster::{RosterFilter, RosterLookup};
use super::time::start_of_day;
use super::types::{QueueEntry, Sale, SaleId, Salesperson, SalespersonId, SalespersonUpdate, Timestamp};
use tracing::debug;

/// Which sales a history listing covers.
///
/// The caller decides the scope; the engine does not authorize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryScope {
    /// Every sale in the log.
    All,
    /// Only the sales of one salesperson.
    Salesperson(SalespersonId),
}

/// In-memory queue-ordering engine.
///
/// # Examples
///
/// ```
/// use turnqueue::{QueueEngine, Salesperson, SalespersonId};
///
/// let mut engine = QueueEngine::new();
/// engine.add_salesperson(Salesperson::new("ana", "Ana"));
/// engine.add_salesperson(Salesperson::new("bob", "Bob"));
///
/// engine.register_sale(SalespersonId::from("ana"), 9 * 3_600_000);
///
/// let queue = engine.queue();
/// assert_eq!(queue[0].id.as_str(), "bob");
/// assert_eq!(queue[1].id.as_str(), "ana");
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueueEngine {
    config: QueueConfig,
    salespeople: Vec<Salesperson>,
    log: EventLog,
}

impl QueueEngine {
    /// Creates an empty engine with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty engine with the given configuration.
    #[must_use]
    pub fn with_config(config: QueueConfig) -> Self {
        Self {
            config,
            salespeople: Vec::new(),
            log: EventLog::new(),
        }
    }

    pub(crate) fn from_parts(config: QueueConfig, salespeople: Vec<Salesperson>, log: EventLog) -> Self {
        Self {
            config,
            salespeople,
            log,
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    /// Returns the sale log.
    #[must_use]
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Registered profiles, in registration order.
    #[must_use]
    pub fn salespeople(&self) -> &[Salesperson] {
        &self.salespeople
    }

    /// Looks up a registered profile.
    #[must_use]
    pub fn salesperson(&self, id: &SalespersonId) -> Option<&Salesperson> {
        self.salespeople.iter().find(|profile| profile.id == *id)
    }

    // ------------------------------------------------------------------
    // Sales
    // ------------------------------------------------------------------

    /// Records a sale for `salesperson_id` at `now` and returns its id.
    ///
    /// The salesperson does not need a profile. Sales are never
    /// deduplicated: every call adds one.
    pub fn register_sale(&mut self, salesperson_id: SalespersonId, now: Timestamp) -> SaleId {
        loop {
            let sale_id = SaleId::new();
            if self.log.append(Sale::new(sale_id, salesperson_id.clone(), now)) {
                debug!(sale_id = %sale_id, salesperson = %salesperson_id, at = now, "sale registered");
                return sale_id;
            }
        }
    }

    /// Inserts a fully formed sale, e.g. when replaying a journal.
    ///
    /// Returns `false` if a sale with the same id exists or the sale breaks
    /// the `last_modified >= timestamp` invariant.
    pub fn insert_sale(&mut self, sale: Sale) -> bool {
        if !sale.is_consistent() {
            return false;
        }
        let sale_id = sale.id;
        let inserted = self.log.append(sale);
        if inserted {
            debug!(sale_id = %sale_id, "sale inserted");
        }
        inserted
    }

    /// Deletes a sale. Unknown ids are a no-op and return `None`.
    pub fn delete_sale(&mut self, sale_id: &SaleId) -> Option<Sale> {
        let removed = self.log.remove(sale_id);
        if removed.is_some() {
            debug!(sale_id = %sale_id, "sale deleted");
        }
        removed
    }

    /// Moves a sale to `new_index` in the log and renumbers every sale.
    ///
    /// See [`reorder::reorder`] for the clamping rule. Returns the index
    /// the sale landed on, or `None` for an unknown sale.
    pub fn reorder(&mut self, sale_id: &SaleId, new_index: i64, now: Timestamp) -> Option<usize> {
        reorder::reorder(&mut self.log, sale_id, new_index, now)
    }

    /// Empties the sale log. Profiles are kept. Returns the number removed.
    pub fn clear_all(&mut self) -> usize {
        let removed = self.log.clear();
        debug!(removed, "sale log cleared");
        removed
    }

    // ------------------------------------------------------------------
    // Profiles
    // ------------------------------------------------------------------

    /// Registers a profile. Returns `false` if the id is already registered.
    pub fn add_salesperson(&mut self, profile: Salesperson) -> bool {
        if self.salesperson(&profile.id).is_some() {
            return false;
        }
        debug!(salesperson = %profile.id, "salesperson added");
        self.salespeople.push(profile);
        true
    }

    /// Session-start hook: registers `profile` only if its id is unknown.
    ///
    /// Returns the stored profile, which is the existing one if present.
    pub fn ensure_salesperson(&mut self, profile: Salesperson) -> &Salesperson {
        let position = match self.salespeople.iter().position(|p| p.id == profile.id) {
            Some(position) => position,
            None => {
                debug!(salesperson = %profile.id, "salesperson registered on session start");
                self.salespeople.push(profile);
                self.salespeople.len() - 1
            }
        };
        &self.salespeople[position]
    }

    /// Applies a partial update to a profile. Returns `false` for unknown ids.
    pub fn update_salesperson(&mut self, id: &SalespersonId, update: &SalespersonUpdate) -> bool {
        match self.salespeople.iter_mut().find(|profile| profile.id == *id) {
            Some(profile) => {
                update.apply_to(profile);
                debug!(salesperson = %id, "salesperson updated");
                true
            }
            None => false,
        }
    }

    /// Removes a profile. The person's sales stay in the log.
    pub fn remove_salesperson(&mut self, id: &SalespersonId) -> Option<Salesperson> {
        let position = self.salespeople.iter().position(|profile| profile.id == *id)?;
        debug!(salesperson = %id, "salesperson removed");
        Some(self.salespeople.remove(position))
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Raw serving order over every known salesperson.
    ///
    /// Depends only on the current log and profiles, never on the clock.
    #[must_use]
    pub fn queue(&self) -> Vec<QueueEntry> {
        QueueBuilder::new(&self.salespeople, &self.log)
            .with_placeholder_name(&self.config.placeholder_name)
            .build()
    }

    /// Serving order narrowed to eligible people active today.
    ///
    /// The result is an order-preserving subsequence of [`queue`](Self::queue)
    /// carrying roster names, truncated to `limit` when given.
    #[must_use]
    pub fn filtered_queue<R: RosterLookup + ?Sized>(
        &self,
        now: Timestamp,
        roster: &R,
        limit: Option<usize>,
    ) -> Vec<QueueEntry> {
        RosterFilter::new(roster, &self.log, self.config.utc_offset_minutes).apply(self.queue(), now, limit)
    }

    /// A salesperson's sales, most recently modified first.
    ///
    /// Ties keep log display order.
    #[must_use]
    pub fn recent_sales(&self, salesperson_id: &SalespersonId, limit: usize) -> Vec<Sale> {
        let mut sales: Vec<Sale> = self.log.sales_for(salesperson_id).cloned().collect();
        sales.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
        sales.truncate(limit);
        sales
    }

    /// [`recent_sales`](Self::recent_sales) with the configured default limit.
    #[must_use]
    pub fn recent_sales_default(&self, salesperson_id: &SalespersonId) -> Vec<Sale> {
        self.recent_sales(salesperson_id, self.config.recent_sales_limit)
    }

    /// Sales within `scope`, newest creation time first.
    #[must_use]
    pub fn sales_history(&self, scope: &HistoryScope, limit: usize) -> Vec<Sale> {
        let mut sales: Vec<Sale> = self
            .log
            .iter()
            .filter(|sale| match scope {
                HistoryScope::All => true,
                HistoryScope::Salesperson(id) => sale.salesperson_id == *id,
            })
            .cloned()
            .collect();
        sales.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        sales.truncate(limit);
        sales
    }

    /// [`sales_history`](Self::sales_history) with the configured default limit.
    #[must_use]
    pub fn sales_history_default(&self, scope: &HistoryScope) -> Vec<Sale> {
        self.sales_history(scope, self.config.history_limit)
    }

    /// Number of sales `salesperson_id` made since local midnight.
    #[must_use]
    pub fn sales_today(&self, salesperson_id: &SalespersonId, now: Timestamp) -> usize {
        let today_start = start_of_day(now, self.config.utc_offset_minutes);
        self.log
            .sales_for(salesperson_id)
            .filter(|sale| sale.timestamp >= today_start)
            .count()
    }
}
