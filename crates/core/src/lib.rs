// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! relay-core: normalized job model shared by the submission parsers
//! and the HTTP surface.

pub mod job_id;
pub mod model;
pub mod pathmap;

pub use job_id::job_id;
pub use model::{
    AttachedFile, Command, Coverage, Cpu, Diagnostic, Host, Job, Os, Severity,
};
pub use pathmap::{clean, rewrite, strip_root, BUILD_PLACEHOLDER};
