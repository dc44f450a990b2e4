// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use async_trait::async_trait;
use thiserror::Error;

use relay_core::Job;

/// Sink failure, reported back to the submitting client verbatim.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct SinkError(String);

impl SinkError {
    pub fn new(message: impl Into<String>) -> Self {
        SinkError(message.into())
    }
}

/// Consumer of normalized jobs.
///
/// A submission is acknowledged to the client only after the sink
/// accepts it, so a sink rejection fails the whole request.
#[async_trait]
pub trait JobSink: Send + Sync {
    async fn submit(&self, job: Job) -> Result<(), SinkError>;
}
