//! Passthrough body stream that counts and reports forwarded bytes.

use anyhow::Result;
use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use log::{debug, error};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use crate::client::{ClientRegistry, ProgressSink, ProgressUpdate};
use crate::response::ByteStream;

type ResolveFuture = Pin<Box<dyn Future<Output = Result<Arc<dyn ProgressSink>>> + Send>>;

enum RelayState {
    /// Waiting for the client registry to resolve the target.
    Resolving(ResolveFuture),
    /// Forwarding chunks and reporting progress to the resolved sink.
    Relaying(Arc<dyn ProgressSink>),
    /// Closed, errored or fully drained.
    Done,
}

/// Body stream that forwards every source chunk exactly once, in arrival
/// order, and reports `{loaded, total}` to the client after each chunk.
///
/// The target is resolved before the first source read so the first
/// notification never races resolution. Only one read is in flight at a
/// time; a source error is terminal.
pub struct ProgressBody {
    source: ByteStream,
    state: RelayState,
    loaded: u64,
    total: u64,
    reads: u64,
    debug: bool,
}

impl ProgressBody {
    pub fn new(
        registry: Arc<dyn ClientRegistry>,
        client_id: String,
        source: ByteStream,
        total: u64,
        debug: bool,
    ) -> Self {
        let resolve: ResolveFuture =
            Box::pin(async move { registry.get(&client_id).await });
        Self {
            source,
            state: RelayState::Resolving(resolve),
            loaded: 0,
            total,
            reads: 0,
            debug,
        }
    }
}

impl Stream for ProgressBody {
    type Item = Result<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            match &mut this.state {
                RelayState::Resolving(resolve) => match resolve.as_mut().poll(cx) {
                    Poll::Ready(Ok(sink)) => {
                        this.state = RelayState::Relaying(sink);
                    }
                    Poll::Ready(Err(e)) => {
                        error!("Failed to resolve progress target: {e}");
                        this.state = RelayState::Done;
                        return Poll::Ready(Some(Err(e)));
                    }
                    Poll::Pending => return Poll::Pending,
                },
                RelayState::Relaying(sink) => {
                    return match this.source.poll_next_unpin(cx) {
                        Poll::Ready(Some(Ok(chunk))) => {
                            this.reads += 1;
                            if this.debug {
                                debug!("read() {}", this.reads);
                            }
                            this.loaded += chunk.len() as u64;
                            sink.send_progress(ProgressUpdate {
                                loaded: this.loaded,
                                total: this.total,
                            });
                            Poll::Ready(Some(Ok(chunk)))
                        }
                        Poll::Ready(Some(Err(e))) => {
                            // Typically a network failure mid-download
                            error!("Error while reading response body: {e}");
                            this.state = RelayState::Done;
                            Poll::Ready(Some(Err(e)))
                        }
                        Poll::Ready(None) => {
                            this.state = RelayState::Done;
                            Poll::Ready(None)
                        }
                        Poll::Pending => Poll::Pending,
                    };
                }
                RelayState::Done => return Poll::Ready(None),
            }
        }
    }
}

impl Drop for ProgressBody {
    fn drop(&mut self) {
        // The consumer walked away before the source was drained. The
        // source stream is dropped with us, which cancels the underlying
        // transfer; nothing else is cleaned up here.
        if !matches!(self.state, RelayState::Done) {
            debug!(
                "Progress relay abandoned after {} of {} bytes",
                self.loaded, self.total
            );
        }
    }
}
