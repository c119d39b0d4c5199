//! View-state types rendered by frontends.
//!
//! Each view-state struct is a plain serializable value: frontends read a
//! snapshot, render it, and dispatch intents back to the session actor.
//! Nothing in this module performs I/O and nothing holds a lock; the actor
//! is the only writer.

pub mod account;
pub mod alerts;
pub mod markup;
pub mod optimistic;
pub mod verification;

pub use account::{AccountAuthState, TotpEnrollment, TotpProvision};
pub use alerts::{AlertLevel, AlertState};
pub use markup::{parse_marked_text, SegmentKind, TextSegment};
pub use optimistic::Optimistic;
pub use verification::{
    ObjectiveKind, ProgressBoard, VerificationObjective, VerificationState,
};
