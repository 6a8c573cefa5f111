//! Infinite-scroll pagination.
//!
//! [`PaginatedScroll`] watches a scrollable container through a
//! [`ScrollRef`]. When the user reaches the bottom it fetches the next page
//! and appends it; on failure it records the error and nudges the container
//! back up so the next scroll can retry.

mod intent;
mod reducer;
mod state;

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use thiserror::Error;

use crate::config::PaginationConfig;
use crate::mvi::Reducer;

pub use intent::PaginationIntent;
pub use reducer::PaginationReducer;
pub use state::PaginationState;

/// Boxed future returned by page fetchers.
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

type FetchFn<T, E> = dyn Fn() -> BoxFuture<Result<Vec<T>, E>> + Send + Sync;

/// Errors that can occur when configuring pagination.
#[derive(Debug, Error, PartialEq)]
pub enum PaginationError {
    #[error("Scroll-back offset must be within 0.0..=1.0, got {0}")]
    InvalidOffset(f64),
}

/// Fraction of the scroll position to move back up after a failed fetch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Offset(f64);

impl Offset {
    pub fn new(fraction: f64) -> Result<Self, PaginationError> {
        if (0.0..=1.0).contains(&fraction) {
            Ok(Self(fraction))
        } else {
            Err(PaginationError::InvalidOffset(fraction))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for Offset {
    fn default() -> Self {
        Self(0.1)
    }
}

/// Scroll geometry of a container, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub client_height: f64,
    pub scroll_height: f64,
}

impl ScrollMetrics {
    /// The visible area touches the end of the content.
    pub fn at_bottom(&self) -> bool {
        self.scroll_top + self.client_height >= self.scroll_height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

/// A scrollable element provided by the host UI.
pub trait ScrollContainer: Send + Sync {
    fn metrics(&self) -> ScrollMetrics;

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior);
}

/// Settable slot the host fills with its scroll container once mounted.
#[derive(Clone, Default)]
pub struct ScrollRef(Arc<RwLock<Option<Arc<dyn ScrollContainer>>>>);

impl ScrollRef {
    pub fn attach(&self, container: Arc<dyn ScrollContainer>) {
        *self.0.write() = Some(container);
    }

    pub fn detach(&self) {
        *self.0.write() = None;
    }

    pub fn current(&self) -> Option<Arc<dyn ScrollContainer>> {
        self.0.read().clone()
    }

    pub fn is_attached(&self) -> bool {
        self.0.read().is_some()
    }
}

impl fmt::Debug for ScrollRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollRef")
            .field("attached", &self.is_attached())
            .finish()
    }
}

/// Starting point for a paginated list.
#[derive(Debug, Clone)]
pub struct PaginationOptions<T> {
    pub initial_data: Vec<T>,
    pub initial_counter: u32,
    pub offset: Offset,
}

impl<T> Default for PaginationOptions<T> {
    fn default() -> Self {
        Self {
            initial_data: Vec::new(),
            initial_counter: 1,
            offset: Offset::default(),
        }
    }
}

/// What a call to [`PaginatedScroll::on_scroll`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollOutcome {
    /// No container attached or bottom not reached.
    Idle,
    /// A fetch is already in flight.
    Busy,
    /// A page with this many items was appended.
    Loaded(usize),
    /// The fetch failed; see [`PaginationState::error`].
    Failed,
}

/// Infinite-scroll state bound to a page fetcher.
pub struct PaginatedScroll<T, E> {
    fetch: Arc<FetchFn<T, E>>,
    offset: Offset,
    reducer: PaginationReducer<T, E>,
    state: Mutex<PaginationState<T, E>>,
    scroll: ScrollRef,
}

impl<T, E> PaginatedScroll<T, E>
where
    T: Clone + PartialEq + Send + 'static,
    E: Clone + PartialEq + Send + 'static,
{
    pub fn new<F, Fut>(options: PaginationOptions<T>, fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<T>, E>> + Send + 'static,
    {
        let state = PaginationState {
            loading: false,
            counter: options.initial_counter,
            data: options.initial_data,
            error: None,
        };
        Self {
            fetch: Arc::new(move || Box::pin(fetch()) as BoxFuture<Result<Vec<T>, E>>),
            offset: options.offset,
            reducer: PaginationReducer::new(),
            state: Mutex::new(state),
            scroll: ScrollRef::default(),
        }
    }

    /// Build a pager from the `[pagination]` config section.
    pub fn from_config<F, Fut>(
        config: &PaginationConfig,
        initial_data: Vec<T>,
        fetch: F,
    ) -> Result<Self, PaginationError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<T>, E>> + Send + 'static,
    {
        Ok(Self::new(config.options(initial_data)?, fetch))
    }

    pub fn state(&self) -> PaginationState<T, E> {
        self.state.lock().clone()
    }

    pub fn loading(&self) -> bool {
        self.state.lock().loading
    }

    pub fn counter(&self) -> u32 {
        self.state.lock().counter
    }

    pub fn data(&self) -> Vec<T> {
        self.state.lock().data.clone()
    }

    pub fn error(&self) -> Option<E> {
        self.state.lock().error.clone()
    }

    /// Slot for the scrollable container this list renders into.
    pub fn scroll_reference(&self) -> &ScrollRef {
        &self.scroll
    }

    fn dispatch(&self, intent: PaginationIntent<T, E>) {
        let mut guard = self.state.lock();
        let next = self.reducer.reduce(guard.clone(), intent);
        *guard = next;
    }

    /// Scroll event handler. Fetches the next page when the bottom of the
    /// container is reached and no fetch is in flight.
    pub async fn on_scroll(&self) -> ScrollOutcome {
        let Some(container) = self.scroll.current() else {
            return ScrollOutcome::Idle;
        };
        let metrics = container.metrics();
        if !metrics.at_bottom() {
            return ScrollOutcome::Idle;
        }

        {
            let mut guard = self.state.lock();
            if guard.loading {
                return ScrollOutcome::Busy;
            }
            let next = self.reducer.reduce(guard.clone(), PaginationIntent::FetchStarted);
            *guard = next;
        }

        tracing::debug!(scroll_top = metrics.scroll_top, "Fetching next page");
        let in_flight = InFlight { pager: self };
        let result = (self.fetch)().await;
        in_flight.settle();

        match result {
            Ok(items) => {
                let count = items.len();
                self.dispatch(PaginationIntent::FetchSucceeded { items });
                tracing::debug!(count, counter = self.counter(), "Page loaded");
                ScrollOutcome::Loaded(count)
            }
            Err(error) => {
                self.dispatch(PaginationIntent::FetchFailed { error });
                let top = metrics.scroll_top - metrics.scroll_top * self.offset.value();
                tracing::warn!(scroll_back_to = top, "Page fetch failed");
                if let Some(container) = self.scroll.current() {
                    container.scroll_to(top, ScrollBehavior::Smooth);
                }
                ScrollOutcome::Failed
            }
        }
    }
}

/// Marks a fetch as in flight. Dropping it before [`InFlight::settle`]
/// (the scroll future was dropped mid-fetch) clears `loading`.
struct InFlight<'a, T, E>
where
    T: Clone + PartialEq + Send + 'static,
    E: Clone + PartialEq + Send + 'static,
{
    pager: &'a PaginatedScroll<T, E>,
}

impl<T, E> InFlight<'_, T, E>
where
    T: Clone + PartialEq + Send + 'static,
    E: Clone + PartialEq + Send + 'static,
{
    fn settle(self) {
        std::mem::forget(self);
    }
}

impl<T, E> Drop for InFlight<'_, T, E>
where
    T: Clone + PartialEq + Send + 'static,
    E: Clone + PartialEq + Send + 'static,
{
    fn drop(&mut self) {
        tracing::debug!("Page fetch cancelled");
        self.pager.dispatch(PaginationIntent::FetchCancelled);
    }
}

impl<T, E> fmt::Debug for PaginatedScroll<T, E>
where
    T: fmt::Debug,
    E: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaginatedScroll")
            .field("state", &*self.state.lock())
            .field("offset", &self.offset)
            .field("scroll", &self.scroll)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_rejects_out_of_range() {
        assert!(Offset::new(0.25).is_ok());
        assert!(Offset::new(1.0).is_ok());
        assert_eq!(Offset::new(1.5), Err(PaginationError::InvalidOffset(1.5)));
        assert!(Offset::new(-0.1).is_err());
    }

    #[test]
    fn bottom_detection() {
        let at_bottom = ScrollMetrics {
            scroll_top: 600.0,
            client_height: 400.0,
            scroll_height: 1000.0,
        };
        assert!(at_bottom.at_bottom());
        let above = ScrollMetrics {
            scroll_top: 100.0,
            ..at_bottom
        };
        assert!(!above.at_bottom());
    }
}
