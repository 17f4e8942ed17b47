use std::fs;
use std::io::Write as _;
use std::path;

use indigits::config::profile;

use crate::error::*;

const STARTER_CONFIG: &str = "SITENAME: My Site
SITEURL: ''

PATH: content

TIMEZONE: UTC

DEFAULT_LANG: en

# Feed generation is usually not desired when developing
FEED_ALL_ATOM: null
CATEGORY_FEED_ATOM: null
TRANSLATION_FEED_ATOM: null
AUTHOR_FEED_ATOM: null
AUTHOR_FEED_RSS: null

# Blogroll
LINKS: []

# Social widget
SOCIAL: []

DEFAULT_PAGINATION: false
";

/// Write a starter config
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct InitArgs {
    /// Target directory
    #[arg(default_value = "./")]
    pub(crate) directory: path::PathBuf,

    /// Write `_indigits.<NAME>.yml` instead of `_indigits.yml`
    #[arg(short, long, value_name = "NAME")]
    pub(crate) profile: Option<String>,
}

impl InitArgs {
    pub(crate) fn run(&self) -> Result<()> {
        let path = create_starter(&self.directory, self.profile.as_deref())?;
        println!("Created {}", path.display());

        Ok(())
    }
}

fn create_starter(dir: &path::Path, profile_name: Option<&str>) -> Result<path::PathBuf> {
    if let Some(name) = profile_name {
        profile::check_name(name)?;
    }
    fs::create_dir_all(dir)
        .with_context(|| format!("Could not create directory {}", dir.display()))?;

    let path = dir.join(profile::file_name(profile_name));
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .with_context(|| format!("Could not create {}", path.display()))?;
    file.write_all(STARTER_CONFIG.as_bytes())?;
    log::debug!("Wrote {}", path.display());

    Ok(path)
}

#[cfg(test)]
mod test {
    use indigits::config::Config;
    use indigits::config::SourceFormat;

    use super::*;

    #[test]
    fn starter_config_is_valid() {
        let config = Config::from_str(STARTER_CONFIG, SourceFormat::Yaml).unwrap();
        assert!(config.feeds.is_empty());
        assert!(config.links.is_empty());
        assert!(config.extra.is_empty());
    }

    #[test]
    fn create_starter_named_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = create_starter(dir.path(), Some("elegant")).unwrap();
        assert_eq!(path, dir.path().join("_indigits.elegant.yml"));
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.profile, "elegant");
    }

    #[test]
    fn create_starter_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_indigits.yml");
        fs::write(&path, "SITENAME: Kept\n").unwrap();
        assert!(create_starter(dir.path(), None).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "SITENAME: Kept\n");
    }

    #[test]
    fn create_starter_rejects_bad_profile() {
        let dir = tempfile::tempdir().unwrap();
        assert!(create_starter(dir.path(), Some("../escape")).is_err());
    }
}
