/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Manual reorder of the sale log.
//!
//! A privileged actor can move one sale to an explicit rank. The whole log is
//! then renumbered so that every sale's `order` equals its position, giving a
//! contiguous `0..n` ranking.
//!
//! Out-of-range targets are clamped: negative indices land at `0`, indices
//! past the end land at `n - 1`.

use super::log::EventLog;
use super::types::{SaleId, Timestamp};
use tracing::debug;

/// Clamps a requested index into `0..len`. Returns `0` for an empty range.
///
/// # Examples
///
/// ```
/// use turnqueue::queue::clamp_index;
///
/// assert_eq!(clamp_index(-3, 4), 0);
/// assert_eq!(clamp_index(2, 4), 2);
/// assert_eq!(clamp_index(99, 4), 3);
/// assert_eq!(clamp_index(5, 0), 0);
/// ```
#[inline]
#[must_use]
pub fn clamp_index(requested: i64, len: usize) -> usize {
    let last = len.saturating_sub(1);
    usize::try_from(requested).map_or(0, |index| index.min(last))
}

/// Moves `sale_id` to `new_index` and renumbers every sale.
///
/// The moved sale's `last_modified` becomes `now` (never earlier than its
/// creation instant). Returns the clamped index the sale now occupies, or
/// `None` when the sale is unknown, in which case the log is untouched.
pub fn reorder(log: &mut EventLog, sale_id: &SaleId, new_index: i64, now: Timestamp) -> Option<usize> {
    let current = log.position(sale_id)?;
    let total = log.len();
    let target = clamp_index(new_index, total);

    let sales = log.sales_mut();
    let mut sale = sales.remove(current)?;
    sale.touch(now);
    sale.order = Some(target);
    sales.insert(target, sale);

    for (position, sale) in sales.iter_mut().enumerate() {
        sale.order = Some(position);
    }

    debug!(
        sale_id = %sale_id,
        from = current,
        to = target,
        requested = new_index,
        "sale reordered"
    );
    Some(target)
}
