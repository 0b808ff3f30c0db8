use turnqueue::queue::{FnRoster, roster_fn};
use turnqueue::{
    HistoryScope, QueueConfig, QueueEngine, Roster, RosterEntry, SaleId, Salesperson,
    SalespersonId,
};

#[cfg(test)]
mod tests {
    use super::*;

    const MINUTE: i64 = 60_000;
    const HOUR: i64 = 60 * MINUTE;
    const DAY: i64 = 24 * HOUR;
    /// Midnight UTC of an arbitrary day.
    const MIDNIGHT: i64 = 20_100 * DAY;

    fn id(raw: &str) -> SalespersonId {
        SalespersonId::from(raw)
    }

    fn order(engine: &QueueEngine) -> Vec<String> {
        engine.queue().iter().map(|e| e.id.to_string()).collect()
    }

    fn engine_with(people: &[&str]) -> QueueEngine {
        let mut engine = QueueEngine::new();
        for person in people {
            engine.add_salesperson(Salesperson::new(*person, person.to_uppercase()));
        }
        engine
    }

    // --- serving order ---

    #[test]
    fn test_least_recent_seller_is_served_first() {
        let mut engine = engine_with(&["a", "b"]);
        engine.register_sale(id("a"), MIDNIGHT + 9 * HOUR);
        engine.register_sale(id("b"), MIDNIGHT + 9 * HOUR + 15 * MINUTE);
        engine.register_sale(id("a"), MIDNIGHT + 9 * HOUR + 30 * MINUTE);

        let queue = engine.queue();
        assert_eq!(order(&engine), ["b", "a"]);
        assert_eq!(queue[0].last_sale_at, MIDNIGHT + 9 * HOUR + 15 * MINUTE);
        assert_eq!(queue[1].last_sale_at, MIDNIGHT + 9 * HOUR + 30 * MINUTE);
    }

    #[test]
    fn test_no_sales_keeps_registration_order() {
        let engine = engine_with(&["x", "y", "z"]);
        let queue = engine.queue();
        assert_eq!(order(&engine), ["x", "y", "z"]);
        assert!(queue.iter().all(|e| e.last_sale_at == 0));
    }

    #[test]
    fn test_seller_goes_to_the_back() {
        let mut engine = engine_with(&["x", "y", "z"]);
        engine.register_sale(id("x"), MIDNIGHT + 10 * HOUR);
        assert_eq!(order(&engine), ["y", "z", "x"]);

        engine.register_sale(id("z"), MIDNIGHT + 11 * HOUR);
        assert_eq!(order(&engine), ["y", "x", "z"]);
    }

    #[test]
    fn test_unregistered_seller_appears_with_placeholder() {
        let config = QueueConfig::default().with_placeholder_name("Vendedor");
        let mut engine = QueueEngine::with_config(config);
        engine.add_salesperson(Salesperson::new("a", "Alice"));
        engine.register_sale(id("ghost"), MIDNIGHT + HOUR);

        let queue = engine.queue();
        assert_eq!(queue.len(), 2);
        assert_eq!(queue[1].id, id("ghost"));
        assert_eq!(queue[1].name, "Vendedor");
        assert_eq!(queue[1].avatar, None);
    }

    #[test]
    fn test_deleting_last_sale_restores_previous_rank() {
        let mut engine = engine_with(&["a", "b"]);
        engine.register_sale(id("a"), MIDNIGHT + 9 * HOUR);
        engine.register_sale(id("b"), MIDNIGHT + 10 * HOUR);
        let late = engine.register_sale(id("a"), MIDNIGHT + 11 * HOUR);
        assert_eq!(order(&engine), ["b", "a"]);

        assert!(engine.delete_sale(&late).is_some());
        assert_eq!(order(&engine), ["a", "b"]);
        assert!(engine.delete_sale(&late).is_none());
    }

    #[test]
    fn test_clear_all_resets_to_registration_order() {
        let mut engine = engine_with(&["a", "b", "c"]);
        engine.register_sale(id("a"), MIDNIGHT + HOUR);
        engine.register_sale(id("b"), MIDNIGHT + 2 * HOUR);
        assert_eq!(engine.clear_all(), 2);
        assert_eq!(order(&engine), ["a", "b", "c"]);
        assert_eq!(engine.clear_all(), 0);
    }

    // --- reorder ---

    #[test]
    fn test_reorder_renumbers_and_does_not_change_serving_order() {
        let mut engine = engine_with(&["a", "b"]);
        let first = engine.register_sale(id("a"), MIDNIGHT + HOUR);
        engine.register_sale(id("b"), MIDNIGHT + 2 * HOUR);
        let before = engine.queue();

        assert_eq!(engine.reorder(&first, 0, MIDNIGHT + 3 * HOUR), Some(0));
        let orders: Vec<Option<usize>> = engine.log().iter().map(|s| s.order).collect();
        assert_eq!(orders, [Some(0), Some(1)]);
        assert_eq!(engine.queue(), before);

        let moved = engine.log().get(&first).map(|s| s.last_modified);
        assert_eq!(moved, Some(MIDNIGHT + 3 * HOUR));
    }

    #[test]
    fn test_reorder_unknown_sale_is_noop() {
        let mut engine = engine_with(&["a"]);
        engine.register_sale(id("a"), MIDNIGHT + HOUR);
        assert_eq!(engine.reorder(&SaleId::new(), 0, MIDNIGHT + 2 * HOUR), None);
        assert!(engine.log().iter().all(|s| s.order.is_none()));
    }

    #[test]
    fn test_recent_sales_follow_last_modified() {
        let mut engine = engine_with(&["a"]);
        let old = engine.register_sale(id("a"), MIDNIGHT + HOUR);
        let new = engine.register_sale(id("a"), MIDNIGHT + 2 * HOUR);

        let recent: Vec<SaleId> = engine.recent_sales(&id("a"), 5).iter().map(|s| s.id).collect();
        assert_eq!(recent, [new, old]);

        engine.reorder(&old, 1, MIDNIGHT + 3 * HOUR);
        let recent: Vec<SaleId> = engine.recent_sales(&id("a"), 5).iter().map(|s| s.id).collect();
        assert_eq!(recent, [old, new]);
        assert_eq!(engine.recent_sales(&id("a"), 1).len(), 1);
    }

    // --- filtered queue ---

    #[test]
    fn test_filtered_queue_requires_permission_and_activity() {
        let mut engine = engine_with(&["a", "b", "c", "d"]);
        engine.register_sale(id("c"), MIDNIGHT + 8 * HOUR);

        let now = MIDNIGHT + 12 * HOUR;
        let mut roster = Roster::new();
        roster.upsert("a", RosterEntry::new("Ana", true).active_at(MIDNIGHT + 7 * HOUR));
        roster.upsert("b", RosterEntry::new("Bea", false).active_at(MIDNIGHT + 7 * HOUR));
        roster.upsert("c", RosterEntry::new("Cris", true));
        roster.upsert("d", RosterEntry::new("Dani", true).active_at(MIDNIGHT - HOUR));

        let filtered = engine.filtered_queue(now, &roster, None);
        let names: Vec<&str> = filtered.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Ana", "Cris"]);
    }

    #[test]
    fn test_filtered_queue_is_subsequence_with_limit() {
        let mut engine = engine_with(&["a", "b", "c"]);
        engine.register_sale(id("a"), MIDNIGHT + HOUR);

        let now = MIDNIGHT + 2 * HOUR;
        let roster: FnRoster<_> = roster_fn(move |_: &SalespersonId| {
            Some(RosterEntry::new("On duty", true).active_at(now))
        });

        let full = engine.filtered_queue(now, &roster, None);
        let ids: Vec<String> = full.iter().map(|e| e.id.to_string()).collect();
        assert_eq!(ids, ["b", "c", "a"]);

        let limited = engine.filtered_queue(now, &roster, Some(2));
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[..], full[..2]);
    }

    #[test]
    fn test_filtered_queue_respects_local_offset() {
        let config = QueueConfig::default().with_utc_offset_minutes(-180);
        let mut engine = QueueEngine::with_config(config);
        engine.add_salesperson(Salesperson::new("a", "A"));

        // 02:00 UTC is 23:00 of the previous local day at UTC-3.
        let active = MIDNIGHT + 2 * HOUR;
        let mut roster = Roster::new();
        roster.upsert("a", RosterEntry::new("A", true).active_at(active));

        assert_eq!(engine.filtered_queue(MIDNIGHT + 4 * HOUR, &roster, None).len(), 0);
        assert_eq!(engine.filtered_queue(MIDNIGHT + 2 * HOUR + MINUTE, &roster, None).len(), 1);
    }

    // --- history ---

    #[test]
    fn test_history_and_sales_today() {
        let mut engine = engine_with(&["a", "b"]);
        engine.register_sale(id("a"), MIDNIGHT - HOUR);
        engine.register_sale(id("b"), MIDNIGHT + HOUR);
        engine.register_sale(id("a"), MIDNIGHT + 2 * HOUR);

        let all = engine.sales_history(&HistoryScope::All, 10);
        let stamps: Vec<i64> = all.iter().map(|s| s.timestamp).collect();
        assert_eq!(stamps, [MIDNIGHT + 2 * HOUR, MIDNIGHT + HOUR, MIDNIGHT - HOUR]);

        let mine = engine.sales_history(&HistoryScope::Salesperson(id("a")), 1);
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].timestamp, MIDNIGHT + 2 * HOUR);

        assert_eq!(engine.sales_today(&id("a"), MIDNIGHT + 3 * HOUR), 1);
        assert_eq!(engine.sales_today(&id("b"), MIDNIGHT + 3 * HOUR), 1);
    }
}
