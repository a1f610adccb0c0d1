//! # Update stream for cell subscribers.
//!
//! [`Updates`] is a lazy sequence of every status change of a cell,
//! starting with the value in effect at subscription time.
//!
//! ## Key characteristics
//! - **First item is the snapshot**: a subscriber that joins at time T
//!   sees the value held at T, then every later write in write order.
//! - **Bounded backlog**: each subscriber buffers at most the cell's
//!   configured backlog (default 16). A slow subscriber drops its oldest
//!   buffered values and resumes at the oldest retained write; the total
//!   number of dropped values is reported by [`Updates::missed`].
//! - **Shared order**: all subscribers observe writes in the same order.

use std::pin::Pin;
use std::task::{ready, Context, Poll};

use futures::Stream;
use tokio::sync::broadcast;
use tokio_util::sync::ReusableBoxFuture;

use crate::value::CachedValue;

/// Resolves one `recv` and hands the receiver back for reuse.
async fn next_write<T: Clone>(
    mut rx: broadcast::Receiver<CachedValue<T>>,
) -> (
    Result<CachedValue<T>, broadcast::error::RecvError>,
    broadcast::Receiver<CachedValue<T>>,
) {
    let result = rx.recv().await;
    (result, rx)
}

/// Stream of every status change of a cell since subscription.
///
/// Obtained from [`Controller::updates`](crate::Controller::updates).
/// Implements [`futures::Stream`]; ends only if the cell is dropped
/// entirely, so with a live cell it is an infinite sequence.
pub struct Updates<T: Clone> {
    snapshot: Option<CachedValue<T>>,
    next: ReusableBoxFuture<
        'static,
        (
            Result<CachedValue<T>, broadcast::error::RecvError>,
            broadcast::Receiver<CachedValue<T>>,
        ),
    >,
    missed: u64,
}

impl<T: Clone + Send + 'static + Unpin> Updates<T> {
    pub(crate) fn new(
        snapshot: CachedValue<T>,
        rx: broadcast::Receiver<CachedValue<T>>,
    ) -> Self {
        Self {
            snapshot: Some(snapshot),
            next: ReusableBoxFuture::new(next_write(rx)),
            missed: 0,
        }
    }

    /// Total number of writes this subscriber has dropped by lagging.
    pub fn missed(&self) -> u64 {
        self.missed
    }

    /// Receives the next status change.
    ///
    /// Returns `None` only once the cell has been dropped and all
    /// buffered writes were consumed.
    pub async fn recv(&mut self) -> Option<CachedValue<T>> {
        std::future::poll_fn(|cx| Pin::new(&mut *self).poll_next(cx)).await
    }
}

impl<T: Clone + Send + 'static + Unpin> Stream for Updates<T> {
    type Item = CachedValue<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if let Some(snapshot) = this.snapshot.take() {
            return Poll::Ready(Some(snapshot));
        }
        loop {
            let (result, rx) = ready!(this.next.poll(cx));
            this.next.set(next_write(rx));
            match result {
                Ok(value) => return Poll::Ready(Some(value)),
                Err(broadcast::error::RecvError::Closed) => return Poll::Ready(None),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    this.missed += n;
                    continue;
                }
            }
        }
    }
}
