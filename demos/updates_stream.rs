//! # Updates Stream Example
//!
//! Subscribes to a cell and prints every status change: the snapshot at
//! subscription time, each refreshed value, and the final `Cancelled`
//! write.
//!
//! ## Run
//! ```bash
//! cargo run --example updates_stream
//! ```

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use freshcell::{CellBuilder, ProduceError, ProduceFn};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let counter = Arc::new(AtomicU32::new(0));
    let producer = ProduceFn::arc(move |_ctx: CancellationToken| {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        async move { Ok::<_, ProduceError>(n) }
    });

    let cell = CellBuilder::new(producer, |_: &u32| Duration::from_millis(200))
        .start()
        .await?;

    let mut updates = cell.updates();
    let watcher = tokio::spawn(async move {
        while let Some(change) = updates.recv().await {
            println!("  [watcher] {change:?}");
            if change.is_cancelled() {
                break;
            }
        }
        println!("  [watcher] missed {} writes", updates.missed());
    });

    sleep(Duration::from_millis(900)).await;
    cell.cancel();

    watcher.await?;
    cell.shutdown().await;
    Ok(())
}
