//! A small stored-program virtual machine over signed 64-bit integers.
//!
//! A [`Machine`] loads a flat sequence of integers as both code and data,
//! executes it in place (programs are self-modifying), and exchanges
//! integers with the caller through in-memory queues: a FIFO input queue
//! consumed by the read-input instruction and an append-only output log
//! returned from [`Machine::run`].

pub mod error;
pub mod instruction;
pub mod machine;

pub use error::Fault;
pub use machine::{Machine, State};
