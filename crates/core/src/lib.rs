//! # LessonAid Core
//!
//! Domain types, traits, and error definitions for the LessonAid
//! assistance widget. This crate has **no transport dependencies**: it
//! defines the model that the service, controller, and gateway crates
//! build on.
//!
//! ## Layout
//!
//! - [`context`]: the loosely-typed context payload sent with each ask
//! - [`request`]: the outbound request and the normalized result
//! - [`transport`]: the seam over the network library
//! - [`state`]: lifecycle state and the snapshots the views render from

pub mod context;
pub mod error;
pub mod request;
pub mod state;
pub mod transport;

// Re-export key types at crate root for ergonomics
pub use context::{ContextInputs, RequestContext, Sequence};
pub use error::{AssistError, ErrorKind, Result};
pub use request::{AssistanceRequest, AssistanceResult};
pub use state::{DebugInfo, LifecycleState, Phase, RequestView, ResponseView};
pub use transport::Transport;
