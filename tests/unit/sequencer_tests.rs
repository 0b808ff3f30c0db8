use std::sync::{Arc, Mutex};
use turnqueue::sequencer::journal::{InMemoryJournal, Journal};
use turnqueue::sequencer::replay::ReplayEngine;
use turnqueue::{
    QueueCommand, QueueConfig, QueueEngine, Roster, RosterEntry, Salesperson, SalespersonId,
    Sequencer,
};

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: i64 = 20_100 * 86_400_000;

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_sales_floor_day() {
        let mut sequencer = Sequencer::new(QueueEngine::new());
        let journal = Arc::new(Mutex::new(InMemoryJournal::new()));
        let journal_clone = Arc::clone(&journal);
        sequencer.add_listener(move |event| {
            journal_clone.lock().unwrap().append(event.clone()).ok();
        });

        let client = sequencer.client();
        let reader = sequencer.reader();
        let handle = sequencer.spawn();

        let mut roster = Roster::new();
        for (id, name) in [("a", "Alice"), ("b", "Bruno"), ("c", "Carla")] {
            client
                .submit(QueueCommand::EnsureSalesperson(Salesperson::new(id, name)))
                .await
                .unwrap();
            roster.upsert(id, RosterEntry::new(name, true));
        }
        roster.touch_active(&SalespersonId::from("a"), DAY + 8 * 3_600_000, 0);
        roster.touch_active(&SalespersonId::from("b"), DAY + 8 * 3_600_000, 0);

        client
            .register_sale(SalespersonId::from("a"), DAY + 9 * 3_600_000)
            .await
            .unwrap();

        let now = DAY + 10 * 3_600_000;
        let on_duty: Vec<String> = reader
            .filtered_queue(now, &roster, None)
            .await
            .iter()
            .map(|e| e.id.to_string())
            .collect();
        assert_eq!(on_duty, ["b", "a"]);

        let raw: Vec<String> = reader.queue().await.iter().map(|e| e.id.to_string()).collect();
        assert_eq!(raw, ["b", "c", "a"]);

        let live = reader.snapshot().await.unwrap();
        drop(client);
        handle.wait().await.unwrap();

        let journal = journal.lock().unwrap();
        assert_eq!(journal.last_sequence(), Some(4));
        let (replayed, _) = ReplayEngine::replay_from(&*journal, 0, QueueConfig::default()).unwrap();
        assert!(replayed.snapshot().unwrap().same_state(&live));
    }
}
