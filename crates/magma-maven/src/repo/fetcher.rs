//! Version catalog resolution.
//!
//! The primary source is the repository's maven-metadata.xml index; when it
//! yields nothing (missing, unreachable, or empty) the human-browsable
//! directory listing is scraped instead. A catalog is always returned;
//! upstream failure degrades to an empty one.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;

use super::types::{MavenArtifact, VersionCatalog};
use crate::utils::version::compare_versions;

#[derive(Debug, serde::Deserialize)]
struct MavenMetadataXml {
    versioning: MavenVersioning,
}

#[derive(Debug, serde::Deserialize)]
struct MavenVersioning {
    versions: Option<MavenVersionList>,
    #[serde(rename = "lastUpdated")]
    last_updated: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct MavenVersionList {
    version: Vec<String>,
}

static LISTING_HREF: Lazy<Regex> = Lazy::new(|| Regex::new(r#"href="([^"]+)""#).unwrap());

/// Fetch the version catalog, sorted descending (latest first).
///
/// `limit > 0` truncates the listing; `limit == 0` returns everything.
/// `total` always reflects the pre-truncation count.
pub async fn fetch_versions(client: &Client, repo: &str, limit: usize) -> VersionCatalog {
    let mut raw_versions = match fetch_index_versions(client, repo).await {
        Ok(versions) => versions,
        Err(e) => {
            log::warn!("Version index unavailable: {:#}", e);
            Vec::new()
        }
    };

    if raw_versions.is_empty() {
        log::info!("Version index empty, falling back to directory listing");
        raw_versions = match fetch_listing_versions(client, repo).await {
            Ok(versions) => versions,
            Err(e) => {
                log::warn!("Directory listing unavailable: {:#}", e);
                Vec::new()
            }
        };
    }

    let mut artifacts: Vec<MavenArtifact> = raw_versions
        .iter()
        .filter_map(|version| MavenArtifact::derive(repo, version))
        .collect();

    artifacts.sort_by(|a, b| compare_versions(&b.version, &a.version));

    let total = artifacts.len();
    if limit > 0 {
        artifacts.truncate(limit);
    }

    VersionCatalog {
        total,
        versions: artifacts,
    }
}

async fn fetch_index_versions(client: &Client, repo: &str) -> Result<Vec<String>> {
    let url = format!("{}/maven-metadata.xml", repo);
    let response = client
        .get(&url)
        .send()
        .await
        .context("Requesting version index")?;

    if !response.status().is_success() {
        anyhow::bail!("HTTP {} from version index", response.status());
    }

    let xml = response.text().await.context("Reading version index body")?;
    parse_version_index(&xml)
}

async fn fetch_listing_versions(client: &Client, repo: &str) -> Result<Vec<String>> {
    let url = format!("{}/", repo);
    let response = client
        .get(&url)
        .send()
        .await
        .context("Requesting directory listing")?;

    if !response.status().is_success() {
        anyhow::bail!("HTTP {} from directory listing", response.status());
    }

    let html = response
        .text()
        .await
        .context("Reading directory listing body")?;
    Ok(extract_listing_versions(&html))
}

pub(crate) fn parse_version_index(xml: &str) -> Result<Vec<String>> {
    let parsed: MavenMetadataXml =
        serde_xml_rs::from_str(xml).context("Parsing maven-metadata.xml")?;

    Ok(parsed
        .versioning
        .versions
        .map(|list| list.version)
        .unwrap_or_default()
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect())
}

pub(crate) fn parse_last_updated(xml: &str) -> Option<String> {
    let parsed: MavenMetadataXml = serde_xml_rs::from_str(xml).ok()?;
    parsed
        .versioning
        .last_updated
        .map(|stamp| stamp.trim().to_string())
        .filter(|stamp| !stamp.is_empty())
}

/// Version directories in a repository listing page.
///
/// Maven directory entries end with `/`; parent links, dot-entries, and the
/// metadata files themselves are skipped.
fn extract_listing_versions(html: &str) -> Vec<String> {
    LISTING_HREF
        .captures_iter(html)
        .map(|caps| caps[1].to_string())
        .filter(|href| href.ends_with('/') && href != "../" && href != "./")
        .filter(|href| !href.contains("maven-metadata"))
        .map(|href| href.trim_end_matches('/').to_string())
        .filter(|version| !version.is_empty() && !version.starts_with('.'))
        .collect()
}
