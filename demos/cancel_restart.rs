//! # Cancel / Restart Example
//!
//! Shows the lifecycle surface: cancel stops refreshing and marks the
//! value `Cancelled`, restart spawns a fresh refresher seeded with the
//! last held value. Both report whether this call won the transition.
//!
//! ## Run
//! ```bash
//! cargo run --example cancel_restart
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

    sleep(Duration::from_millis(700)).await;
    println!("before cancel: {:?} status={:?}", cell.get(), cell.status());

    println!("cancel -> {}", cell.cancel());
    println!("cancel again -> {} (already cancelled)", cell.cancel());
    println!("after cancel:  {:?} status={:?}", cell.get(), cell.status());

    sleep(Duration::from_millis(500)).await;

    println!("restart -> {}", cell.restart());
    println!("restart again -> {} (already active)", cell.restart());
    sleep(Duration::from_millis(700)).await;
    println!("after restart: {:?} status={:?}", cell.get(), cell.status());

    cell.shutdown().await;
    Ok(())
}
