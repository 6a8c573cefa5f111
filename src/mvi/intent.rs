//! Base trait for intents (user/system actions) in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User actions (typing, blurring a field, scrolling)
/// - System events (fetch results, debounce timers firing)
///
/// Intents are processed by reducers to produce new states.
pub trait Intent: Send + 'static {}
