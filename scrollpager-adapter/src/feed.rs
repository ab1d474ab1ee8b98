use core::pin::Pin;
use core::task::{Context, Poll};

use futures::channel::mpsc;
use futures::stream::{FusedStream, Stream};
use scrollpager::Visibility;

/// Creates a visibility feed.
///
/// Hand the sender to the host's intersection observer callback; hand the feed to
/// [`crate::Driver::run`]. The feed is lazy and unbounded, and cannot be restarted: once every
/// sender is dropped it ends for good.
pub fn visibility_feed() -> (VisibilitySender, VisibilityFeed) {
    let (tx, rx) = mpsc::unbounded();
    (VisibilitySender { tx }, VisibilityFeed { rx })
}

/// Posts sentinel notifications into a [`VisibilityFeed`].
#[derive(Clone, Debug)]
pub struct VisibilitySender {
    tx: mpsc::UnboundedSender<Visibility>,
}

impl VisibilitySender {
    /// Returns `false` when the feed has been dropped.
    pub fn notify(&self, visibility: Visibility) -> bool {
        self.tx.unbounded_send(visibility).is_ok()
    }

    pub fn leading(&self, ratio: f32) -> bool {
        self.notify(Visibility::leading(ratio))
    }

    pub fn trailing(&self, ratio: f32) -> bool {
        self.notify(Visibility::trailing(ratio))
    }

    /// Ends the feed for every sender.
    pub fn close(&self) {
        self.tx.close_channel();
    }
}

/// A stream of sentinel visibility notifications, in the order the host observed them.
#[derive(Debug)]
pub struct VisibilityFeed {
    rx: mpsc::UnboundedReceiver<Visibility>,
}

impl Stream for VisibilityFeed {
    type Item = Visibility;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Visibility>> {
        Pin::new(&mut self.rx).poll_next(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rx.size_hint()
    }
}

impl FusedStream for VisibilityFeed {
    fn is_terminated(&self) -> bool {
        self.rx.is_terminated()
    }
}
