//! Model-View-Intent (MVI) architecture primitives.
//!
//! Every screen owns one [`Container`]. The container holds the current
//! state, feeds intents to the screen's [`Reducer`] one at a time, and
//! publishes the resulting state and events to subscribers.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Container lane ──→ Reducer ──→ Scope::state ──→ Subscription
//!    ↑                             │                              │
//!    │                             └──→ Scope::emit ──→ on_event  │
//!    └────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **State**: Immutable representation of a screen
//! - **Intent**: User actions or lifecycle triggers
//! - **Event**: One-shot signals, never replayed
//! - **Reducer**: Async function turning intents into state transitions

mod container;
mod event;
mod intent;
mod reducer;
mod scope;
mod state;
mod subscription;

pub use container::Container;
pub use event::UiEvent;
pub use intent::Intent;
pub use reducer::Reducer;
pub use scope::Scope;
pub use state::UiState;
pub use subscription::Subscription;
