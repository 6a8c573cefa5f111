use serde::{Deserialize, Serialize};

use crate::form::FormOptions;
use crate::pagination::{Offset, PaginationError, PaginationOptions};
use crate::responsive::{Breakpoints, Responsive, ResponsiveError};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub form: FormConfig,
    pub pagination: PaginationConfig,
    pub responsive: ResponsiveConfig,
}

/// Form defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Quiet period for debounced fields in milliseconds (default: 500).
    pub debounce_ms: u64,
}

/// Infinite-scroll defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Counter value before the first fetch (default: 1).
    pub initial_counter: u32,
    /// Fraction of the scroll position to move back after a failed fetch
    /// (default: 0.1).
    pub offset: f64,
}

/// Breakpoint thresholds and resize tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponsiveConfig {
    #[serde(flatten)]
    pub breakpoints: Breakpoints,
    /// Recompute on window resize (default: true).
    pub listen_resize: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            initial_counter: 1,
            offset: 0.1,
        }
    }
}

impl Default for ResponsiveConfig {
    fn default() -> Self {
        Self {
            breakpoints: Breakpoints::default(),
            listen_resize: true,
        }
    }
}

fn default_debounce_ms() -> u64 {
    500
}

impl FormConfig {
    pub fn options(&self) -> FormOptions {
        FormOptions {
            debounce: std::time::Duration::from_millis(self.debounce_ms),
        }
    }
}

impl PaginationConfig {
    pub fn options<T>(&self, initial_data: Vec<T>) -> Result<PaginationOptions<T>, PaginationError> {
        Ok(PaginationOptions {
            initial_data,
            initial_counter: self.initial_counter,
            offset: Offset::new(self.offset)?,
        })
    }
}

impl ResponsiveConfig {
    /// A breakpoint tracker starting at `width`, listening for resizes
    /// when `listen_resize` is set.
    pub fn tracker(&self, width: u32) -> Result<Responsive, ResponsiveError> {
        Responsive::new(self.breakpoints, width, self.listen_resize)
    }
}
