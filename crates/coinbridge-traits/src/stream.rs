//! Push streams for continuous adapter state.
//!
//! Adapter state lives in `tokio::sync::watch` channels owned by the chain
//! kit. [`watch_updates`] turns a receiver into a hot stream: the current
//! value is yielded first, then every change. The stream owns only the
//! receiver and the mapping closure, so dropping it releases everything.

use futures::Stream;
use std::pin::Pin;
use tokio::sync::watch;

/// Boxed push stream handed out by adapters
pub type UpdateStream<T> = Pin<Box<dyn Stream<Item = T> + Send>>;

/// Hot stream of `map` applied to the current and every later value of `rx`.
///
/// The stream ends when the sending side is dropped.
pub fn watch_updates<T, U, F>(mut rx: watch::Receiver<T>, map: F) -> UpdateStream<U>
where
    T: Send + Sync + 'static,
    U: Send + 'static,
    F: Fn(&T) -> U + Send + 'static,
{
    Box::pin(async_stream::stream! {
        let current = map(&rx.borrow_and_update());
        yield current;

        while rx.changed().await.is_ok() {
            let next = map(&rx.borrow_and_update());
            yield next;
        }
    })
}

/// Hot stream of change signals without a payload
pub fn watch_signals<T>(rx: watch::Receiver<T>) -> UpdateStream<()>
where
    T: Send + Sync + 'static,
{
    watch_updates(rx, |_| ())
}
