// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Submission endpoint speaking the CTest client protocol.
//!
//! Normalized jobs are handed to a [`JobSink`]; the transport knows
//! nothing about what happens to them afterwards.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod ack;
mod routes;
mod sink;

pub use routes::router;
pub use sink::{JobSink, SinkError};
