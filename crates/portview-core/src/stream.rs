// ── View change subscription ──
//
// The change event carries no payload: subscribers re-query the tree
// through the read contract after each notification. Internally the
// signal is a version counter bumped once per completed rebuild.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// A subscription to tree rebuilds.
///
/// Provides both point-in-time version access and reactive change
/// notification via `changed()` or by converting to a `Stream`.
pub struct ViewUpdates {
    receiver: watch::Receiver<u64>,
}

impl ViewUpdates {
    pub(crate) fn new(receiver: watch::Receiver<u64>) -> Self {
        Self { receiver }
    }

    /// Version of the most recently completed rebuild.
    pub fn version(&self) -> u64 {
        *self.receiver.borrow()
    }

    /// Wait for the next rebuild, returning its version.
    /// Returns `None` once the view has been dropped.
    pub async fn changed(&mut self) -> Option<u64> {
        self.receiver.changed().await.ok()?;
        Some(*self.receiver.borrow_and_update())
    }

    /// Convert into a `Stream` for use with `StreamExt` combinators.
    pub fn into_stream(self) -> ViewUpdateStream {
        ViewUpdateStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
///
/// Yields the rebuild version each time the view is refreshed.
pub struct ViewUpdateStream {
    inner: WatchStream<u64>,
}

impl Stream for ViewUpdateStream {
    type Item = u64;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        // WatchStream<u64> is Unpin, so projecting through Pin is safe.
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
