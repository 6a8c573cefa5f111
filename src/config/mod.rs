//! Configuration for the helpers, loaded from TOML.
//!
//! ```toml
//! [form]
//! debounce_ms = 300
//!
//! [pagination]
//! initial_counter = 1
//! offset = 0.2
//!
//! [responsive]
//! sm = 600
//! md = 900
//! lg = 1200
//! xl = 1536
//! listen_resize = true
//! ```

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, FormConfig, PaginationConfig, ResponsiveConfig};
