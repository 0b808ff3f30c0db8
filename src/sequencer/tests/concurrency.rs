/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Tests for concurrent command submission.

#[cfg(test)]
mod tests {
    use crate::queue::{QueueEngine, SalespersonId};
    use crate::sequencer::{QueueCommand, Sequencer};
    use std::sync::{Arc, Mutex};

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_submissions() {
        let mut sequencer = Sequencer::new(QueueEngine::new());

        let sequences = Arc::new(Mutex::new(Vec::new()));
        let sequences_clone = sequences.clone();

        sequencer.add_listener(move |event| {
            sequences_clone.lock().unwrap().push(event.sequence_num);
        });

        let client = sequencer.client();
        let reader = sequencer.reader();
        let handle = sequencer.spawn();

        let mut handles = Vec::new();
        for i in 0..10 {
            let client_clone = client.clone();
            let handle = tokio::spawn(async move {
                for j in 0..10 {
                    let command = QueueCommand::RegisterSale {
                        salesperson_id: SalespersonId::new(format!("p{i}")),
                        at: i * 100 + j,
                    };
                    client_clone.submit(command).await.ok();
                }
            });
            handles.push(handle);
        }

        for handle in handles {
            handle.await.ok();
        }

        assert_eq!(reader.read(|engine| engine.log().len()).await, 100);
        assert_eq!(reader.queue().await.len(), 10);

        drop(client);
        handle.wait().await.unwrap();

        let seq_vec = sequences.lock().unwrap();
        assert_eq!(seq_vec.len(), 100);

        for i in 0..seq_vec.len() {
            assert_eq!(seq_vec[i], (i + 1) as u64);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_reorders_keep_contiguous_ranks() {
        let sequencer = Sequencer::new(QueueEngine::new());
        let client = sequencer.client();
        let reader = sequencer.reader();
        let _handle = sequencer.spawn();

        let mut sale_ids = Vec::new();
        for i in 0..20 {
            let receipt = client
                .register_sale(SalespersonId::from("ana"), 1_000 + i)
                .await
                .unwrap();
            sale_ids.extend(receipt.result.registered_sale());
        }

        let mut handles = Vec::new();
        for (i, sale_id) in sale_ids.into_iter().enumerate() {
            let client_clone = client.clone();
            handles.push(tokio::spawn(async move {
                client_clone
                    .reorder(sale_id, (i as i64 * 7) % 25 - 2, 5_000)
                    .await
                    .ok();
            }));
        }
        for handle in handles {
            handle.await.ok();
        }

        let orders: Vec<Option<usize>> = reader
            .read(|engine| engine.log().iter().map(|sale| sale.order).collect())
            .await;
        let expected: Vec<Option<usize>> = (0..20).map(Some).collect();
        assert_eq!(orders, expected);
    }

    #[tokio::test]
    async fn test_multiple_listeners() {
        let mut sequencer = Sequencer::new(QueueEngine::new());

        let count1 = Arc::new(Mutex::new(0));
        let count2 = Arc::new(Mutex::new(0));

        let count1_clone = count1.clone();
        let count2_clone = count2.clone();

        sequencer.add_listener(move |_event| {
            *count1_clone.lock().unwrap() += 1;
        });

        sequencer.add_listener(move |_event| {
            *count2_clone.lock().unwrap() += 1;
        });

        let client = sequencer.client();
        let handle = sequencer.spawn();

        for i in 0..50 {
            client
                .register_sale(SalespersonId::from("ana"), i)
                .await
                .ok();
        }

        drop(client);
        handle.wait().await.unwrap();

        assert_eq!(*count1.lock().unwrap(), 50);
        assert_eq!(*count2.lock().unwrap(), 50);
    }
}
