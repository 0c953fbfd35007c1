//! Model-View-Intent (MVI) primitives shared by every resource.
//!
//! # Architecture
//!
//! ```text
//! Effect ──→ Intent ──→ Store ──→ Reducer ──→ State ──→ View
//!   ↑                                                     │
//!   └─────────────────────────────────────────────────────┘
//! ```
//!
//! - **State**: immutable snapshot read by consumers
//! - **Intent**: a signal describing one step of a request life-cycle
//! - **Reducer**: pure function folding intents into state

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::ViewState;
