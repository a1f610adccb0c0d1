//! # Retry & Backoff Example
//!
//! A flaky producer behind a bounded, jittered backoff policy, with the
//! built-in logging hooks showing each retry and the final exhaustion.
//!
//! ## Run
//! ```bash
//! cargo run --example retry_backoff --features "logging"
//! ```

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use freshcell::{
    BackoffPolicy, CellBuilder, JitterPolicy, Limited, LogHooks, ProduceError, ProduceFn,
};
use tokio_util::sync::CancellationToken;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let calls = Arc::new(AtomicU32::new(0));

    // Succeeds on the first call, then fails three times per refresh
    // before succeeding again.
    let producer = ProduceFn::arc(move |_ctx: CancellationToken| {
        let n = calls.fetch_add(1, Ordering::SeqCst);
        async move {
            if n % 4 == 0 {
                Ok(n)
            } else {
                Err(ProduceError::failed(format!("upstream 503 (call #{n})")))
            }
        }
    });

    let backoff = BackoffPolicy {
        first: Duration::from_millis(100),
        max: Duration::from_secs(1),
        factor: 2.0,
        jitter: JitterPolicy::Equal,
    };

    let cell = CellBuilder::new(producer, |_: &u32| Duration::from_millis(500))
        .with_retry(Limited::new(backoff, 5))
        .with_hooks(LogHooks)
        .start()
        .await?;

    tokio::time::sleep(Duration::from_secs(3)).await;
    println!("latest: {:?}", cell.get());

    cell.shutdown().await;
    Ok(())
}
