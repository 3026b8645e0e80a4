//! Read endpoints over the Magma release repository.
//!
//! Every response the upstream can influence is derived per request; the
//! only caching is the advisory one-hour `Cache-Control` window on
//! successful responses.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::json;

use magma_maven::repo::{
    check_file_exists, download_url, fetch_version_details, fetch_versions,
    resolve_download_target, DownloadKind, MavenArtifact, USER_AGENT,
};

use crate::error::ApiError;

const CACHE_CONTROL: &str = "public, max-age=3600, s-maxage=3600";
const DEFAULT_LIST_LIMIT: usize = 10;
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

pub struct AppState {
    pub client: reqwest::Client,
    pub repo_url: String,
}

impl AppState {
    pub fn new(repo_url: String) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, repo_url })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/versions", get(list_versions))
        .route("/api/versions/latest", get(latest_version))
        .route("/api/versions/latest/download", get(latest_download))
        .route("/api/versions/:version", get(version_details))
        .route("/api/versions/:version/download", get(version_download))
        .route("/downloads/magma.jar", get(best_download))
        .with_state(Arc::new(state))
}

#[derive(Serialize)]
struct VersionsResponse {
    total: usize,
    limit: usize,
    versions: Vec<MavenArtifact>,
}

/// Successful, cacheable responses advertise the one-hour freshness window.
fn cached<R: IntoResponse>(response: R) -> Response {
    ([(header::CACHE_CONTROL, CACHE_CONTROL)], response).into_response()
}

fn parse_limit(params: &HashMap<String, String>) -> Result<usize, ApiError> {
    match params.get("limit") {
        None => Ok(DEFAULT_LIST_LIMIT),
        Some(raw) => raw.parse::<usize>().map_err(|_| {
            ApiError::bad_request(
                "Invalid query parameters",
                json!({ "limit": "must be a non-negative integer" }),
            )
        }),
    }
}

fn parse_kind(
    params: &HashMap<String, String>,
    default: DownloadKind,
) -> Result<DownloadKind, ApiError> {
    match params.get("type") {
        None => Ok(default),
        Some(raw) => raw.parse::<DownloadKind>().map_err(|_| {
            ApiError::bad_request(
                "Invalid type parameter. Must be one of: jar, installer, launcher, changelog",
                json!({ "type": raw }),
            )
        }),
    }
}

async fn list_versions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let limit = parse_limit(&params)?;
    let catalog = fetch_versions(&state.client, &state.repo_url, limit).await;

    Ok(cached(Json(VersionsResponse {
        total: catalog.total,
        limit,
        versions: catalog.versions,
    })))
}

async fn latest_version(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let catalog = fetch_versions(&state.client, &state.repo_url, 1).await;
    let Some(latest) = catalog.versions.into_iter().next() else {
        return Err(ApiError::not_found("No versions available"));
    };

    let details = fetch_version_details(&state.client, &state.repo_url, &latest.version).await;
    Ok(cached(Json(details.unwrap_or(latest))))
}

async fn version_details(
    State(state): State<Arc<AppState>>,
    Path(version): Path<String>,
) -> Result<Response, ApiError> {
    match fetch_version_details(&state.client, &state.repo_url, &version).await {
        Some(details) => Ok(cached(Json(details))),
        None => Err(ApiError::not_found(format!("Version {} not found", version))),
    }
}

async fn version_download(
    State(state): State<Arc<AppState>>,
    Path(version): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let kind = parse_kind(&params, DownloadKind::Installer)?;

    match resolve_download_target(&state.client, &state.repo_url, &version, kind).await {
        Some(url) => Ok(cached(Redirect::temporary(&url))),
        None => Err(ApiError::not_found(match kind {
            DownloadKind::Installer | DownloadKind::Launcher => {
                format!("No download available for version {}", version)
            }
            _ => format!("{} file not found for version {}", kind, version),
        })),
    }
}

async fn latest_download(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let kind = parse_kind(&params, DownloadKind::Launcher)?;

    let catalog = fetch_versions(&state.client, &state.repo_url, 1).await;
    let Some(latest) = catalog.versions.first() else {
        return Err(ApiError::not_found("No versions available"));
    };

    let target = format!("/api/versions/{}/download?type={}", latest.version, kind);
    Ok(cached(Redirect::temporary(&target)))
}

/// The "current best download": latest version's launcher when published,
/// otherwise its plain server jar.
async fn best_download(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let catalog = fetch_versions(&state.client, &state.repo_url, 1).await;
    let Some(latest) = catalog.versions.first() else {
        return Err(ApiError::not_found("No versions available"));
    };

    let launcher_url = download_url(&state.repo_url, &latest.version, DownloadKind::Launcher);
    if check_file_exists(&state.client, &launcher_url).await {
        return Ok(cached(Redirect::temporary(&launcher_url)));
    }

    let jar_url = download_url(&state.repo_url, &latest.version, DownloadKind::Jar);
    if check_file_exists(&state.client, &jar_url).await {
        return Ok(cached(Redirect::temporary(&jar_url)));
    }

    Err(ApiError::not_found(
        "No download available for the latest version",
    ))
}
