//! # Basic Refresh Example
//!
//! A cell that caches a "session token" and refreshes it on a cadence
//! derived from the token itself.
//!
//! ## Run
//! ```bash
//! cargo run --example basic_refresh
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use freshcell::{CellBuilder, ProduceError, ProduceFn};
use tokio_util::sync::CancellationToken;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Token {
    serial: u64,
    ttl_ms: u64,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let issued = Arc::new(AtomicU64::new(0));

    let producer = ProduceFn::arc(move |_ctx: CancellationToken| {
        let serial = issued.fetch_add(1, Ordering::SeqCst);
        async move {
            println!("  [producer] issuing token #{serial}");
            Ok::<_, ProduceError>(Token {
                serial,
                ttl_ms: 300,
            })
        }
    });

    // The cadence comes from the value: refresh when the token expires.
    let cell = CellBuilder::new(producer, |t: &Token| Duration::from_millis(t.ttl_ms))
        .start()
        .await?;

    for _ in 0..4 {
        println!("reader sees: {:?}", cell.get());
        tokio::time::sleep(Duration::from_millis(350)).await;
    }

    cell.shutdown().await;
    println!("final: {:?}", cell.get());
    Ok(())
}
