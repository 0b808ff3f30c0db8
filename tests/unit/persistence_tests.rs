use turnqueue::persistence::{JsonFileStore, SnapshotStore};
use turnqueue::{PersistenceError, QueueConfig, QueueEngine, Salesperson, SalespersonId};

#[cfg(test)]
mod tests {
    use super::*;

    fn busy_engine() -> QueueEngine {
        let mut engine = QueueEngine::new();
        engine.add_salesperson(Salesperson::new("a", "Alice").with_avatar("alice.png"));
        engine.add_salesperson(Salesperson::new("b", "Bruno"));
        engine.add_salesperson(Salesperson::new("c", "Carla"));
        let first = engine.register_sale(SalespersonId::from("a"), 1_000);
        engine.register_sale(SalespersonId::from("b"), 2_000);
        engine.register_sale(SalespersonId::from("walk-in"), 3_000);
        engine.reorder(&first, 0, 4_000);
        engine
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("queue.json"));
        assert!(store.load().unwrap().is_none());

        let engine = busy_engine();
        store.save(&engine.snapshot().unwrap()).unwrap();

        let loaded = store.load().unwrap().unwrap();
        let restored = QueueEngine::restore(loaded, QueueConfig::default()).unwrap();
        assert_eq!(restored.queue(), engine.queue());
        assert_eq!(restored.salespeople(), engine.salespeople());

        let orders: Vec<Option<usize>> = restored.log().iter().map(|s| s.order).collect();
        assert_eq!(orders, [Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn test_hand_edited_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("queue.json");
        let mut store = JsonFileStore::new(&path);
        store.save(&busy_engine().snapshot().unwrap()).unwrap();

        let edited = std::fs::read_to_string(&path).unwrap().replace("Bruno", "Bruna");
        std::fs::write(&path, edited).unwrap();

        let loaded = store.load().unwrap().unwrap();
        let result = QueueEngine::restore(loaded, QueueConfig::default());
        assert!(matches!(result, Err(PersistenceError::ChecksumMismatch { .. })));
    }
}
