//! The awaitable half of a modal's one-shot resolution channel.

use std::any::Any;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

/// Type-erased value a modal is closed with.
pub(crate) type CloseValue = Option<Box<dyn Any + Send>>;

/// Sending half stored in the registry while a caller waits.
pub(crate) type Resolver = oneshot::Sender<CloseValue>;

/// Future returned by [`ModalRegistry::open`](super::ModalRegistry::open).
///
/// Resolves with the value passed to `close()`. Resolves with `None` when
/// the modal was closed without a value, or with a value of a type other
/// than `T`.
///
/// If the pending resolution is dropped before a close (a second `open()`
/// on the same name, or `unregister()` while open), this future never
/// resolves. Callers that need a bounded wait must race it against their
/// own timeout.
#[must_use = "the modal result is delivered through this future"]
pub struct ModalReply<T> {
    name: String,
    rx: oneshot::Receiver<CloseValue>,
    abandoned: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ModalReply<T> {
    pub(crate) fn new(name: &str, rx: oneshot::Receiver<CloseValue>) -> Self {
        Self {
            name: name.to_string(),
            rx,
            abandoned: false,
            _marker: PhantomData,
        }
    }

    /// Name of the modal this reply belongs to.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T: Any + Send> Future for ModalReply<T> {
    type Output = Option<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if self.abandoned {
            return Poll::Pending;
        }

        let polled = Pin::new(&mut self.rx).poll(cx);
        match polled {
            Poll::Ready(Ok(value)) => Poll::Ready(value.and_then(|boxed| match boxed.downcast::<T>() {
                Ok(value) => Some(*value),
                Err(_) => {
                    log::warn!(
                        "modal '{}' closed with a value that is not a {}",
                        self.name,
                        std::any::type_name::<T>()
                    );
                    None
                }
            })),
            Poll::Ready(Err(_)) => {
                log::debug!("pending resolution for modal '{}' was abandoned", self.name);
                self.abandoned = true;
                Poll::Pending
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
