//! Headless UI state helpers.
//!
//! - [`form`]: multi-field form state with validation and debounced input
//! - [`pagination`]: infinite-scroll paging over an async fetcher
//! - [`responsive`]: viewport breakpoint tracking
//!
//! All state transitions go through the reducers in [`mvi`], so the logic
//! can be driven and tested without a host UI.

pub mod config;
pub mod debounce;
pub mod form;
pub mod logging;
pub mod mvi;
pub mod pagination;
pub mod responsive;
