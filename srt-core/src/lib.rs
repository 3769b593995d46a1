//! SRT Core Runtime Primitives
//!
//! This crate implements the pieces the reliable-delivery machinery stands
//! on: 31-bit wrapping sequence numbers, the sender loss list consulted for
//! retransmission, and the protocol-boundary error taxonomy. Timing and
//! synchronization live in [`srt_sync`], re-exported here as [`sync`].

pub mod error;
pub mod loss;
pub mod sequence;

pub use srt_sync as sync;

pub use error::{CodeMajor, RejectReason, SrtError};
pub use loss::SenderLossList;
pub use sequence::{SeqNumber, MAX_SEQ_NUMBER};
