use serde::{Deserialize, Serialize};

use super::versioning::{extract_minecraft_version, has_launcher_support, is_stable_version};

pub const DEFAULT_REPO_URL: &str =
    "https://repo.magmafoundation.org/releases/org/magmafoundation/magma";
pub const GROUP_ID: &str = "org.magmafoundation";
pub const ARTIFACT_ID: &str = "magma";
pub const USER_AGENT: &str = "MagmaWebsite/1.0";

/// Downloadable artifact kinds published alongside a Magma release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadKind {
    Jar,
    Installer,
    Launcher,
    Changelog,
}

impl DownloadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DownloadKind::Jar => "jar",
            DownloadKind::Installer => "installer",
            DownloadKind::Launcher => "launcher",
            DownloadKind::Changelog => "changelog",
        }
    }

    /// File suffix appended to `magma-{version}` in the repository.
    fn suffix(&self) -> &'static str {
        match self {
            DownloadKind::Jar => ".jar",
            DownloadKind::Installer => "-installer.jar",
            DownloadKind::Launcher => "-launcher.jar",
            DownloadKind::Changelog => "-changelog.txt",
        }
    }
}

impl std::fmt::Display for DownloadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DownloadKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jar" => Ok(DownloadKind::Jar),
            "installer" => Ok(DownloadKind::Installer),
            "launcher" => Ok(DownloadKind::Launcher),
            "changelog" => Ok(DownloadKind::Changelog),
            _ => Err(anyhow::anyhow!("Unknown download type: {}", s)),
        }
    }
}

/// Canonical URL of one artifact kind for a version.
pub fn download_url(repo: &str, version: &str, kind: DownloadKind) -> String {
    format!("{}/{}/magma-{}{}", repo, version, version, kind.suffix())
}

/// One published Magma release.
///
/// Bulk listings derive every field from the version string alone; the
/// detail probe confirms jar/installer/changelog existence over HTTP and
/// clears the URL of anything that is not actually published.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MavenArtifact {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub minecraft_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installer_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launcher_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changelog_url: Option<String>,
    pub is_stable: bool,
    pub has_jar: bool,
    pub has_installer: bool,
    pub has_launcher: bool,
    pub has_changelog: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

impl MavenArtifact {
    /// Pure derivation from the version string; no network access.
    ///
    /// Returns `None` for strings that cannot name a repository path
    /// (empty, path separators, whitespace).
    pub fn derive(repo: &str, version: &str) -> Option<Self> {
        if version.is_empty()
            || version.contains('/')
            || version.contains("..")
            || version.chars().any(|c| c.is_whitespace())
        {
            return None;
        }

        let launcher = has_launcher_support(version);

        Some(Self {
            group_id: GROUP_ID.to_string(),
            artifact_id: ARTIFACT_ID.to_string(),
            version: version.to_string(),
            minecraft_version: extract_minecraft_version(version),
            jar_url: Some(download_url(repo, version, DownloadKind::Jar)),
            installer_url: Some(download_url(repo, version, DownloadKind::Installer)),
            launcher_url: launcher.then(|| download_url(repo, version, DownloadKind::Launcher)),
            changelog_url: Some(download_url(repo, version, DownloadKind::Changelog)),
            is_stable: is_stable_version(version),
            has_jar: true,
            has_installer: true,
            has_launcher: launcher,
            has_changelog: true,
            file_size: None,
            release_date: None,
        })
    }
}

/// Result of a catalog listing: `total` counts every resolved version,
/// regardless of any limit applied to `versions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionCatalog {
    pub total: usize,
    pub versions: Vec<MavenArtifact>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPO: &str = "https://repo.magmafoundation.org/releases/org/magmafoundation/magma";

    #[test]
    fn test_download_url_construction() {
        let base = format!("{}/21.1.67-beta/magma-21.1.67-beta", REPO);
        assert_eq!(
            download_url(REPO, "21.1.67-beta", DownloadKind::Jar),
            format!("{}.jar", base)
        );
        assert_eq!(
            download_url(REPO, "21.1.67-beta", DownloadKind::Installer),
            format!("{}-installer.jar", base)
        );
        assert_eq!(
            download_url(REPO, "21.1.67-beta", DownloadKind::Launcher),
            format!("{}-launcher.jar", base)
        );
        assert_eq!(
            download_url(REPO, "21.1.67-beta", DownloadKind::Changelog),
            format!("{}-changelog.txt", base)
        );
    }

    #[test]
    fn test_download_kind_round_trip() {
        for kind in [
            DownloadKind::Jar,
            DownloadKind::Installer,
            DownloadKind::Launcher,
            DownloadKind::Changelog,
        ] {
            assert_eq!(kind.as_str().parse::<DownloadKind>().unwrap(), kind);
        }
        assert!("zip".parse::<DownloadKind>().is_err());
    }

    #[test]
    fn test_derive_builds_full_artifact() {
        let artifact = MavenArtifact::derive(REPO, "21.1.67-beta").unwrap();
        assert_eq!(artifact.group_id, "org.magmafoundation");
        assert_eq!(artifact.artifact_id, "magma");
        assert_eq!(artifact.minecraft_version, "1.21.x");
        assert!(!artifact.is_stable);
        assert!(artifact.has_installer);
        assert!(artifact.has_launcher);
        assert!(artifact.installer_url.as_deref().unwrap().ends_with("-installer.jar"));
        assert!(artifact.launcher_url.as_deref().unwrap().ends_with("-launcher.jar"));
        assert!(artifact.changelog_url.as_deref().unwrap().ends_with("-changelog.txt"));
        assert!(artifact.file_size.is_none());
        assert!(artifact.release_date.is_none());
    }

    #[test]
    fn test_derive_gates_launcher_url() {
        let artifact = MavenArtifact::derive(REPO, "21.1.40-beta").unwrap();
        assert!(!artifact.has_launcher);
        assert!(artifact.launcher_url.is_none());
    }

    #[test]
    fn test_derive_rejects_unusable_strings() {
        assert!(MavenArtifact::derive(REPO, "").is_none());
        assert!(MavenArtifact::derive(REPO, "21.1/../secrets").is_none());
        assert!(MavenArtifact::derive(REPO, "21.1 beta").is_none());
    }

    #[test]
    fn test_absent_fields_are_omitted_from_json() {
        let mut artifact = MavenArtifact::derive(REPO, "21.1.40-beta").unwrap();
        artifact.installer_url = None;
        let json = serde_json::to_value(&artifact).unwrap();
        assert!(json.get("installerUrl").is_none());
        assert!(json.get("launcherUrl").is_none());
        assert!(json.get("fileSize").is_none());
        assert_eq!(json["minecraftVersion"], "1.21.x");
        assert_eq!(json["hasLauncher"], false);
    }
}
