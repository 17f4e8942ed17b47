//! Named configuration profiles.
//!
//! A project keeps one self-contained file per profile next to each other: `_indigits.yml` for
//! the default profile and `_indigits.<name>.yml` for the others.  Profiles are never merged.

use std::path;

use itertools::Itertools;
use liquid_core::model::KString;

use crate::Result;
use crate::Status;

pub const DEFAULT_PROFILE: &str = "default";

const FILE_STEM: &str = "_indigits";
const FILE_EXT: &str = "yml";

static PROFILE_NAME: once_cell::sync::Lazy<regex::Regex> =
    once_cell::sync::Lazy::new(|| regex::Regex::new(r"^[a-z0-9][a-z0-9_\-]*$").unwrap());

/// File name holding a profile.
pub fn file_name(profile: Option<&str>) -> String {
    match profile {
        None | Some(DEFAULT_PROFILE) => format!("{FILE_STEM}.{FILE_EXT}"),
        Some(name) => format!("{FILE_STEM}.{name}.{FILE_EXT}"),
    }
}

/// Profile name encoded in a file name, if it is a profile file.
pub fn from_file_name(file_name: &str) -> Option<KString> {
    let rest = file_name.strip_prefix(FILE_STEM)?;
    let rest = rest.strip_suffix(FILE_EXT)?.strip_suffix('.')?;
    if rest.is_empty() {
        return Some(KString::from_static(DEFAULT_PROFILE));
    }
    let name = rest.strip_prefix('.')?;
    PROFILE_NAME
        .is_match(name)
        .then(|| KString::from_ref(name))
}

pub fn check_name(name: &str) -> Result<()> {
    if PROFILE_NAME.is_match(name) {
        Ok(())
    } else {
        Err(Status::new("Invalid profile name")
            .context_with(|c| c.insert("Profile", name.to_owned())))
    }
}

/// Profiles present in `dir`, sorted by name.
pub fn list(dir: &path::Path) -> Result<Vec<KString>> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        Status::new("Failed to list profiles")
            .with_source(e)
            .context_with(|c| c.insert("Path", dir.display().to_string()))
    })?;
    let profiles = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
        .filter_map(|entry| entry.file_name().to_str().and_then(from_file_name))
        .sorted()
        .collect();
    Ok(profiles)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn file_names() {
        assert_eq!(file_name(None), "_indigits.yml");
        assert_eq!(file_name(Some("default")), "_indigits.yml");
        assert_eq!(file_name(Some("elegant")), "_indigits.elegant.yml");
    }

    #[test]
    fn parse_file_names() {
        assert_eq!(from_file_name("_indigits.yml").as_deref(), Some("default"));
        assert_eq!(
            from_file_name("_indigits.elegant.yml").as_deref(),
            Some("elegant")
        );
        assert_eq!(from_file_name("_indigits.Elegant.yml"), None);
        assert_eq!(from_file_name("_indigits.yaml"), None);
        assert_eq!(from_file_name("_indigitsyml"), None);
        assert_eq!(from_file_name("pelicanconf.py"), None);
    }

    #[test]
    fn names() {
        assert!(check_name("elegant").is_ok());
        assert!(check_name("publish-2").is_ok());
        assert!(check_name("../etc").is_err());
        assert!(check_name("").is_err());
    }

    #[test]
    fn list_fixture_profiles() {
        let actual = list(path::Path::new("tests/fixtures/config")).unwrap();
        let actual: Vec<_> = actual.iter().map(|p| p.as_str()).collect();
        assert_eq!(actual, ["default", "elegant"]);
    }

    #[test]
    fn list_missing_dir() {
        assert!(list(path::Path::new("tests/fixtures/does-not-exist")).is_err());
    }
}
