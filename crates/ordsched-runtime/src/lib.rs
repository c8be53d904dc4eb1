//! # ordsched-runtime
//!
//! The feeder and scheduler tasks, the worker pool and factory, and the
//! deferred-result handle that together implement the order-preserving
//! dispatch loop. `ordsched` (the public façade crate) composes these
//! into the `QueueScheduler` API; this crate is usable on its own by
//! anyone who wants the raw session primitives.

pub mod config;
pub mod deferred;
pub mod factory;
pub mod pool;
pub mod scheduler;
pub mod worker;

pub use config::EngineConfig;
pub use deferred::DeferredResult;
pub use factory::WorkerFactory;
pub use pool::WorkerPool;
pub use scheduler::{join_inflight, spawn_session, Session};
pub use worker::{GenResult, Generator, GeneratorError, NewWorker, Worker};
