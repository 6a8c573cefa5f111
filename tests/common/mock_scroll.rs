//! In-memory scroll container for pagination tests.

use parking_lot::Mutex;
use statehooks::pagination::{ScrollBehavior, ScrollContainer, ScrollMetrics};

/// A container whose geometry is set by the test and which records
/// every programmatic scroll.
#[derive(Debug, Default)]
pub struct MockScroll {
    pub metrics: Mutex<ScrollMetrics>,
    pub scrolls: Mutex<Vec<(f64, ScrollBehavior)>>,
}

impl MockScroll {
    pub fn at(scroll_top: f64, client_height: f64, scroll_height: f64) -> Self {
        Self {
            metrics: Mutex::new(ScrollMetrics {
                scroll_top,
                client_height,
                scroll_height,
            }),
            scrolls: Mutex::new(Vec::new()),
        }
    }

    pub fn set_top(&self, scroll_top: f64) {
        self.metrics.lock().scroll_top = scroll_top;
    }
}

impl ScrollContainer for MockScroll {
    fn metrics(&self) -> ScrollMetrics {
        *self.metrics.lock()
    }

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior) {
        self.scrolls.lock().push((top, behavior));
        self.metrics.lock().scroll_top = top;
    }
}
