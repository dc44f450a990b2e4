// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::put;
use axum::Router;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use relay_core::job_id;

use crate::ack;
use crate::sink::JobSink;

/// Query fields of `/submit.php`. CTest sends different subsets per
/// request kind; absent fields read as empty.
#[derive(Debug, Default, Deserialize)]
struct SubmitParams {
    #[serde(default)]
    project: String,
    #[serde(default)]
    site: String,
    #[serde(default)]
    stamp: String,
    #[serde(default)]
    build: String,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(rename = "FileName", default)]
    file_name: String,
    #[serde(default)]
    buildid: String,
}

pub fn router(sink: Arc<dyn JobSink>) -> Router {
    Router::new()
        .route("/submit.php", put(submit_put).post(submit_post))
        .with_state(sink)
}

async fn submit_put(
    State(sink): State<Arc<dyn JobSink>>,
    Query(params): Query<SubmitParams>,
    body: Bytes,
) -> Response {
    if params.kind == "GcovTar" {
        return submit_covtar(sink, &params, &body).await;
    }
    if params.file_name.ends_with(".xml") {
        return submit_report(sink, &params, &body).await;
    }
    StatusCode::NOT_FOUND.into_response()
}

async fn submit_covtar(sink: Arc<dyn JobSink>, params: &SubmitParams, body: &[u8]) -> Response {
    let outcome = match relay_covtar::parse(body, &params.buildid) {
        Ok(job) => sink.submit(job).await.map_err(|err| err.to_string()),
        Err(err) => Err(err.to_string()),
    };
    match outcome {
        Ok(()) => {
            info!(build_id = %params.buildid, "coverage archive accepted");
            Json(json!({"status": 0})).into_response()
        }
        Err(message) => {
            warn!(build_id = %params.buildid, error = %message, "coverage archive rejected");
            Json(json!({"error": message})).into_response()
        }
    }
}

async fn submit_report(sink: Arc<dyn JobSink>, params: &SubmitParams, body: &[u8]) -> Response {
    let outcome = match relay_report::parse(body, &params.project) {
        Ok(job) => {
            let build_id = job.job_id.clone();
            sink.submit(job)
                .await
                .map(|()| build_id)
                .map_err(|err| err.to_string())
        }
        Err(err) => Err(err.to_string()),
    };
    match outcome {
        Ok(build_id) => {
            info!(project = %params.project, file = %params.file_name, "report accepted");
            xml_response(StatusCode::OK, ack::xml_ok(&build_id))
        }
        Err(message) => {
            warn!(project = %params.project, error = %message, "report rejected");
            xml_response(StatusCode::INTERNAL_SERVER_ERROR, ack::xml_error(&message))
        }
    }
}

/// Upload handshake: hand out the job id the later submissions will
/// use, skipping checksum verification.
async fn submit_post(Query(params): Query<SubmitParams>) -> Response {
    let build_id = job_id(&params.project, &params.site, &params.stamp, &params.build);
    Json(ack::UploadHandshake::proceed(build_id)).into_response()
}

fn xml_response(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, "application/xml")], body).into_response()
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
