//! # ordsched-core
//!
//! Platform-agnostic core types for the ordsched order-preserving
//! scheduler: the bounded blocking queue all three channels of the
//! engine are built from, worker identifiers, ambient error types, and
//! environment/logging helpers shared by the rest of the workspace.

pub mod env;
pub mod error;
pub mod id;
#[macro_use]
pub mod qlog;
pub mod queue;

pub use error::{EngineError, EngineResult};
pub use id::{WorkerId, WorkerIdGen};
pub use queue::{BoundedQueue, Peek, UNLIMITED};
