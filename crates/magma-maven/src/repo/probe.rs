//! Artifact probing and download resolution for a single version.
//!
//! Probes are HEAD requests; a transport error or non-success status means
//! "does not exist" and is never surfaced as an error. Enrichment (file size,
//! release date) degrades field-by-field.

use reqwest::Client;

use super::fetcher::parse_last_updated;
use super::types::{download_url, DownloadKind, MavenArtifact};

/// Whether `url` exists upstream. Failures of any kind resolve to `false`.
pub async fn check_file_exists(client: &Client, url: &str) -> bool {
    match client.head(url).send().await {
        Ok(response) => response.status().is_success(),
        Err(e) => {
            log::debug!("HEAD {} failed: {}", url, e);
            false
        }
    }
}

/// Declared size of `url`, humanized. `None` when the file is missing or the
/// upstream omits Content-Length.
pub async fn fetch_file_size(client: &Client, url: &str) -> Option<String> {
    let response = match client.head(url).send().await {
        Ok(response) if response.status().is_success() => response,
        Ok(response) => {
            log::debug!("HEAD {} returned {}", url, response.status());
            return None;
        }
        Err(e) => {
            log::debug!("HEAD {} failed: {}", url, e);
            return None;
        }
    };

    let bytes = response
        .headers()
        .get(reqwest::header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse::<u64>()
        .ok()?;

    Some(humanize_size(bytes))
}

fn humanize_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;

    if bytes < KIB {
        format!("{} B", bytes)
    } else if bytes < MIB {
        format!("{:.2} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.2} MB", bytes as f64 / MIB as f64)
    }
}

/// Release date from the per-version maven-metadata.xml, as `YYYY-MM-DD`.
///
/// Maven `lastUpdated` stamps are `YYYYMMDDHHMMSS`; only the date part is
/// kept, and it must parse as a real calendar date.
pub async fn fetch_release_date(client: &Client, repo: &str, version: &str) -> Option<String> {
    let url = format!("{}/{}/maven-metadata.xml", repo, version);

    let response = match client.get(&url).send().await {
        Ok(response) if response.status().is_success() => response,
        Ok(response) => {
            log::debug!("GET {} returned {}", url, response.status());
            return None;
        }
        Err(e) => {
            log::debug!("GET {} failed: {}", url, e);
            return None;
        }
    };

    let xml = response.text().await.ok()?;
    let stamp = parse_last_updated(&xml)?;
    format_release_date(&stamp)
}

fn format_release_date(stamp: &str) -> Option<String> {
    if stamp.len() < 8 || !stamp.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let date = chrono::NaiveDate::parse_from_str(&stamp[..8], "%Y%m%d").ok()?;
    Some(date.format("%Y-%m-%d").to_string())
}

/// Probe one version's artifacts and enrich the baseline record.
///
/// Jar, installer, and changelog existence are confirmed concurrently; URLs
/// are cleared for anything missing. Returns `None` only when the baseline
/// itself cannot be derived from the version string.
pub async fn fetch_version_details(
    client: &Client,
    repo: &str,
    version: &str,
) -> Option<MavenArtifact> {
    let mut artifact = MavenArtifact::derive(repo, version)?;

    let jar_url = download_url(repo, version, DownloadKind::Jar);
    let installer_url = download_url(repo, version, DownloadKind::Installer);
    let changelog_url = download_url(repo, version, DownloadKind::Changelog);

    let (has_jar, has_installer, has_changelog) = tokio::join!(
        check_file_exists(client, &jar_url),
        check_file_exists(client, &installer_url),
        check_file_exists(client, &changelog_url),
    );

    artifact.has_jar = has_jar;
    artifact.has_installer = has_installer;
    artifact.has_changelog = has_changelog;
    if !has_jar {
        artifact.jar_url = None;
    }
    if !has_installer {
        artifact.installer_url = None;
    }
    if !has_changelog {
        artifact.changelog_url = None;
    }

    artifact.file_size = if has_installer {
        fetch_file_size(client, &installer_url).await
    } else if has_jar {
        fetch_file_size(client, &jar_url).await
    } else {
        None
    };

    artifact.release_date = fetch_release_date(client, repo, version).await;

    Some(artifact)
}

/// Resolve the upstream URL a download request should redirect to.
///
/// The canonical URL is HEAD-confirmed; installer and launcher requests fall
/// back to the plain server jar before giving up. `None` covers both a
/// missing artifact and an unreachable upstream.
pub async fn resolve_download_target(
    client: &Client,
    repo: &str,
    version: &str,
    kind: DownloadKind,
) -> Option<String> {
    let url = download_url(repo, version, kind);
    if check_file_exists(client, &url).await {
        return Some(url);
    }

    if matches!(kind, DownloadKind::Installer | DownloadKind::Launcher) {
        let jar_url = download_url(repo, version, DownloadKind::Jar);
        if check_file_exists(client, &jar_url).await {
            log::info!("{} missing for {}, serving jar instead", kind, version);
            return Some(jar_url);
        }
    }

    None
}
