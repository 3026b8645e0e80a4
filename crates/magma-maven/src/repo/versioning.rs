use once_cell::sync::Lazy;
use regex::Regex;

/// First major number on Minecraft's year-based versioning scheme.
///
/// The cutoff is purely syntactic and encodes a product assumption, not
/// release history; keep it here so a future scheme change touches one place.
pub const YEAR_BASED_EPOCH: u32 = 26;

/// Earliest 21.1.x build that ships a launcher jar.
const FIRST_LAUNCHER_BUILD: u32 = 41;

static LEADING_PAIR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)\.(\d+)").unwrap());
static LEGACY_21_1_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^21\.1\.(\d+)-").unwrap());

/// Minecraft version a Magma version string targets.
///
/// Magma versions follow `{major}.{minor}.{build}-{tag}`. Majors at or past
/// [`YEAR_BASED_EPOCH`] are year-based ("26.1"); anything below maps onto the
/// legacy "1.{major}.x" line. Unparseable strings classify as "Unknown".
pub fn extract_minecraft_version(version: &str) -> String {
    let Some(caps) = LEADING_PAIR.captures(version) else {
        return "Unknown".to_string();
    };

    let major: u32 = caps[1].parse().unwrap_or(0);
    if major >= YEAR_BASED_EPOCH {
        format!("{}.{}", major, &caps[2])
    } else {
        format!("1.{}.x", major)
    }
}

/// Whether a launcher jar is published for this version.
///
/// Only the legacy 21.1.x line before build 41 is excluded; every other
/// line, year-based included, is presumed launcher-capable.
pub fn has_launcher_support(version: &str) -> bool {
    match LEGACY_21_1_LINE.captures(version) {
        Some(caps) => caps[1]
            .parse::<u32>()
            .map(|build| build >= FIRST_LAUNCHER_BUILD)
            .unwrap_or(false),
        None => true,
    }
}

pub fn is_stable_version(version: &str) -> bool {
    !version.contains("beta") && !version.contains("alpha") && !version.contains("snapshot")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_versions_map_to_1_x_line() {
        assert_eq!(extract_minecraft_version("21.1.67-beta"), "1.21.x");
        assert_eq!(extract_minecraft_version("21.1.41-beta"), "1.21.x");
        assert_eq!(extract_minecraft_version("21.0.1"), "1.21.x");
        assert_eq!(extract_minecraft_version("20.4.5-beta"), "1.20.x");
        assert_eq!(extract_minecraft_version("19.2.3"), "1.19.x");
    }

    #[test]
    fn test_year_based_versions_keep_major_minor() {
        assert_eq!(extract_minecraft_version("26.0.5-beta"), "26.0");
        assert_eq!(extract_minecraft_version("26.1.3-beta"), "26.1");
        assert_eq!(extract_minecraft_version("27.0.1"), "27.0");
        assert_eq!(extract_minecraft_version("30.2.10-alpha"), "30.2");
    }

    #[test]
    fn test_unrecognised_formats_are_unknown() {
        assert_eq!(extract_minecraft_version("unknown"), "Unknown");
        assert_eq!(extract_minecraft_version("abc-def"), "Unknown");
    }

    #[test]
    fn test_launcher_support_from_build_41() {
        assert!(has_launcher_support("21.1.41-beta"));
        assert!(has_launcher_support("21.1.67-beta"));
        assert!(has_launcher_support("21.1.100-beta"));
    }

    #[test]
    fn test_no_launcher_before_build_41() {
        assert!(!has_launcher_support("21.1.40-beta"));
        assert!(!has_launcher_support("21.1.1-beta"));
        assert!(!has_launcher_support("21.1.0-beta"));
    }

    #[test]
    fn test_other_lines_presumed_launcher_capable() {
        assert!(has_launcher_support("1.20.4-0.1.0"));
        assert!(has_launcher_support("1.19.2"));
        assert!(has_launcher_support("26.0.5-beta"));
        assert!(has_launcher_support("26.1.3-beta"));
        assert!(has_launcher_support("27.0.1"));
    }

    #[test]
    fn test_stability_markers() {
        assert!(is_stable_version("21.1.67"));
        assert!(!is_stable_version("21.1.67-beta"));
        assert!(!is_stable_version("26.0.5-alpha"));
        assert!(!is_stable_version("1.20.4-snapshot"));
    }
}
