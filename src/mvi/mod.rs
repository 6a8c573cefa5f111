//! Model-View-Intent (MVI) primitives shared by every helper.
//!
//! Each helper keeps its state behind a reducer so that the transition
//! logic is a plain function that can be tested without a host UI.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! - **State**: Cloneable snapshot of everything a view needs
//! - **Intent**: User actions or system events
//! - **Reducer**: Pure function that transforms state based on intents

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
