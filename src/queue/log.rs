/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! The sale event log.
//!
//! [`EventLog`] keeps sales in display order (newest first) and indexes them
//! by id. The display order carries no meaning for the queue itself: the
//! builder re-derives the serving order from sale timestamps on every call.
//! It does carry the explicit ranking written by a manual reorder.

use super::types::{Sale, SaleId, SalespersonId, Timestamp};
use std::collections::{HashSet, VecDeque};

/// Ordered collection of sales plus an id index.
///
/// # Examples
///
/// ```
/// use turnqueue::queue::EventLog;
/// use turnqueue::{Sale, SaleId, SalespersonId};
///
/// let mut log = EventLog::new();
/// let id = SaleId::new();
/// log.append(Sale::new(id, SalespersonId::from("ana"), 1_000));
/// assert!(log.contains(&id));
/// assert!(log.remove(&id).is_some());
/// assert!(log.remove(&id).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    sales: VecDeque<Sale>,
    index: HashSet<SaleId>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a log from sales already in display order.
    ///
    /// Sales whose id was already seen are dropped and returned.
    #[must_use]
    pub fn from_sales(sales: impl IntoIterator<Item = Sale>) -> (Self, Vec<Sale>) {
        let mut log = Self::new();
        let mut duplicates = Vec::new();
        for sale in sales {
            if log.index.insert(sale.id) {
                log.sales.push_back(sale);
            } else {
                duplicates.push(sale);
            }
        }
        (log, duplicates)
    }

    /// Puts a sale at the front (newest) end of the log.
    ///
    /// Returns `false` and leaves the log untouched if a sale with the same
    /// id is already present.
    pub fn append(&mut self, sale: Sale) -> bool {
        if !self.index.insert(sale.id) {
            return false;
        }
        self.sales.push_front(sale);
        true
    }

    /// Removes the sale with the given id. Unknown ids are a no-op.
    pub fn remove(&mut self, id: &SaleId) -> Option<Sale> {
        if !self.index.remove(id) {
            return None;
        }
        let position = self.position(id)?;
        self.sales.remove(position)
    }

    /// Drops every sale and returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.sales.len();
        self.sales.clear();
        self.index.clear();
        removed
    }

    /// Returns `true` if a sale with the given id exists.
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &SaleId) -> bool {
        self.index.contains(id)
    }

    /// Looks up a sale by id.
    #[must_use]
    pub fn get(&self, id: &SaleId) -> Option<&Sale> {
        if !self.contains(id) {
            return None;
        }
        self.sales.iter().find(|sale| sale.id == *id)
    }

    /// Display position of a sale, newest first.
    #[must_use]
    pub fn position(&self, id: &SaleId) -> Option<usize> {
        self.sales.iter().position(|sale| sale.id == *id)
    }

    /// Number of sales in the log.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.sales.len()
    }

    /// Returns `true` if the log holds no sales.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    /// Iterates sales in display order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Sale> + ExactSizeIterator + '_ {
        self.sales.iter()
    }

    /// Iterates one salesperson's sales in display order.
    pub fn sales_for<'a>(&'a self, salesperson: &'a SalespersonId) -> impl Iterator<Item = &'a Sale> + 'a {
        self.sales
            .iter()
            .filter(move |sale| sale.salesperson_id == *salesperson)
    }

    /// Timestamp of the most recent sale attributed to `salesperson`.
    #[must_use]
    pub fn last_sale_at(&self, salesperson: &SalespersonId) -> Option<Timestamp> {
        self.sales_for(salesperson).map(|sale| sale.timestamp).max()
    }

    pub(crate) fn sales_mut(&mut self) -> &mut VecDeque<Sale> {
        &mut self.sales
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a Sale;
    type IntoIter = std::collections::vec_deque::Iter<'a, Sale>;

    fn into_iter(self) -> Self::IntoIter {
        self.sales.iter()
    }
}
