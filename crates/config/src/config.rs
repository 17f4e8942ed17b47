use std::collections::BTreeMap;
use std::fmt;
use std::path;

use liquid_core::model::KString;
use serde_yaml::Mapping;
use serde_yaml::Value;

use crate::Result;
use crate::Status;
use crate::decode::check;
use crate::decode::decode;
use crate::decode::encode;
use crate::declarations;
use crate::profile;
use crate::urls;
use crate::*;

const DEFAULT_DATE_FORMAT: &str = "%a %d %B %Y";
const DEFAULT_CATEGORY: &str = "misc";
const DEFAULT_DIRECT_TEMPLATES: &[&str] = &["index", "tags", "categories", "authors", "archives"];

/// How a configuration source is written.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SourceFormat {
    Yaml,
    /// `NAME = literal` assignments, see [`crate::declarations`].
    Declarations,
}

impl SourceFormat {
    pub fn from_path(path: &path::Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        match crate::path::split_ext(name).1 {
            Some("yml" | "yaml") => Some(SourceFormat::Yaml),
            Some("py") => Some(SourceFormat::Declarations),
            _ => None,
        }
    }
}

/// The whole site configuration, loaded once and then only read.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct Config {
    /// Directory the configuration was loaded from; PATH is relative to it.
    pub root: path::PathBuf,
    pub profile: KString,
    pub site: Site,
    pub feeds: Feeds,
    pub links: Vec<Link>,
    pub social: Vec<Link>,
    pub pagination: Pagination,
    pub relative_urls: bool,
    pub urls: UrlPatterns,
    pub direct_templates: Vec<KString>,
    pub date_formats: BTreeMap<KString, String>,
    pub default_date_format: String,
    pub default_category: KString,
    pub use_folder_as_category: bool,
    pub theme: Theme,
    pub sitemap: Option<Sitemap>,
    pub projects: Projects,
    /// Settings this crate does not know, in declaration order.
    pub extra: Mapping,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            root: Default::default(),
            profile: KString::from_static(profile::DEFAULT_PROFILE),
            site: Default::default(),
            feeds: Default::default(),
            links: Default::default(),
            social: Default::default(),
            pagination: Default::default(),
            relative_urls: false,
            urls: Default::default(),
            direct_templates: DEFAULT_DIRECT_TEMPLATES
                .iter()
                .map(|t| KString::from_static(t))
                .collect(),
            date_formats: Default::default(),
            default_date_format: DEFAULT_DATE_FORMAT.to_owned(),
            default_category: KString::from_static(DEFAULT_CATEGORY),
            use_folder_as_category: true,
            theme: Default::default(),
            sitemap: None,
            projects: Default::default(),
            extra: Default::default(),
        }
    }
}

impl Config {
    pub fn from_file<P: Into<path::PathBuf>>(path: P) -> Result<Config> {
        Self::from_file_internal(path.into())
    }

    fn from_file_internal(path: path::PathBuf) -> Result<Config> {
        let format = SourceFormat::from_path(&path).ok_or_else(|| {
            Status::new("Unsupported config format, expected `.yml`, `.yaml` or `.py`")
                .context_with(|c| c.insert("Path", path.display().to_string()))
        })?;
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Status::new("Failed to read config")
                .with_source(e)
                .context_with(|c| c.insert("Path", path.display().to_string()))
        })?;

        let mut config = Self::from_str(&content, format)
            .map_err(|e| e.context_with(|c| c.insert("Path", path.display().to_string())))?;

        if let Some(profile) = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(profile::from_file_name)
        {
            config.profile = profile;
        }

        let mut root = path;
        root.pop(); // Remove filename
        if root == path::Path::new("") {
            root = path::Path::new(".").to_owned();
        }
        config.root = root;

        Ok(config)
    }

    /// Find the profile's file in `cwd` or its ancestors.
    ///
    /// Without a config file the default profile falls back to the default configuration; a
    /// named profile must exist.
    pub fn from_cwd<P: Into<path::PathBuf>>(cwd: P, profile: Option<&str>) -> Result<Config> {
        Self::from_cwd_internal(cwd.into(), profile)
    }

    fn from_cwd_internal(cwd: path::PathBuf, profile: Option<&str>) -> Result<Config> {
        if let Some(profile) = profile {
            profile::check_name(profile)?;
        }
        let file_name = profile::file_name(profile);
        match find_project_file(&cwd, &file_name) {
            Some(p) => {
                log::debug!("Using config file `{}`", p.display());
                Self::from_file(&p)
            }
            None => match profile {
                Some(name) if name != profile::DEFAULT_PROFILE => {
                    Err(Status::new("Profile not found").context_with(|c| {
                        c.insert("Profile", name.to_owned())
                            .insert("File", file_name.clone())
                    }))
                }
                _ => {
                    log::warn!(
                        "No {file_name} file found in current directory, using default config."
                    );
                    Ok(Config {
                        root: cwd,
                        ..Default::default()
                    })
                }
            },
        }
    }

    /// Parse configuration text.  Empty text is the default configuration.
    pub fn from_str(content: &str, format: SourceFormat) -> Result<Config> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        let mapping = match format {
            SourceFormat::Yaml => {
                let value: Value = serde_yaml::from_str(content)
                    .map_err(|e| Status::new("Failed to parse config").with_source(e))?;
                match value {
                    Value::Mapping(mapping) => mapping,
                    Value::Null => Mapping::new(),
                    _ => {
                        return Err(Status::new(
                            "Failed to parse config, expected a mapping of settings",
                        ));
                    }
                }
            }
            SourceFormat::Declarations => declarations::parse(content)
                .map_err(|e| Status::new("Failed to parse config").with_source(e))?,
        };
        Self::from_mapping(mapping)
    }

    /// Decode already-parsed settings, failing on the first invalid value.
    pub fn from_mapping(mapping: Mapping) -> Result<Config> {
        let mut config = Config::default();
        for (key, value) in mapping {
            let Value::String(key) = key else {
                return Err(Status::new("Setting names must be strings")
                    .context_with(|c| c.insert("Key", format!("{key:?}"))));
            };
            config.set(key, value)?;
        }
        Ok(config)
    }

    /// Decode and validate one setting, replacing its current value.
    pub fn set(&mut self, key: impl Into<String>, value: Value) -> Result<()> {
        let key = key.into();
        log::trace!("Decoding `{key}`");
        self.apply(key, value).map_err(|e| {
            let key = e.key().to_owned();
            Status::new("Invalid configuration value")
                .with_source(e)
                .context_with(|c| c.insert("Key", key.clone()))
        })
    }

    fn apply(&mut self, key: String, value: Value) -> Result<(), InvalidValue> {
        let k = key.as_str();
        match k {
            "AUTHOR" => self.site.author = decode(k, value)?,
            "SITENAME" => self.site.sitename = decode(k, value)?,
            "SITEURL" => self.site.siteurl = check(k, normalize_siteurl(decode(k, value)?))?,
            "PATH" => self.site.path = decode(k, value)?,
            "TIMEZONE" => {
                let zone: KString = decode(k, value)?;
                check(k, check_timezone(&zone))?;
                self.site.timezone = zone;
            }
            "DEFAULT_LANG" => {
                let lang: KString = decode(k, value)?;
                check(k, check_lang(&lang))?;
                self.site.default_lang = lang;
            }
            "LINKS" => self.links = decode(k, value)?,
            "SOCIAL" => self.social = decode(k, value)?,
            "DEFAULT_PAGINATION" => self.pagination = decode(k, value)?,
            "RELATIVE_URLS" => self.relative_urls = decode(k, value)?,
            "DIRECT_TEMPLATES" => self.direct_templates = decode(k, value)?,
            "DATE_FORMATS" => {
                let formats: BTreeMap<KString, String> = decode(k, value)?;
                for format in formats.values() {
                    check(k, urls::check_date_format(format))?;
                }
                self.date_formats = formats;
            }
            "DEFAULT_DATE_FORMAT" => {
                let format: String = decode(k, value)?;
                check(k, urls::check_date_format(&format))?;
                self.default_date_format = format;
            }
            "DEFAULT_CATEGORY" => self.default_category = decode(k, value)?,
            "USE_FOLDER_AS_CATEGORY" => self.use_folder_as_category = decode(k, value)?,
            "THEME" => self.theme.name = decode(k, value)?,
            "USE_SHORTCUT_ICONS" => self.theme.use_shortcut_icons = decode(k, value)?,
            "DISQUS_FILTER" => self.theme.comment_filters.disqus = decode(k, value)?,
            "UTTERANCES_FILTER" => self.theme.comment_filters.utterances = decode(k, value)?,
            "COMMENTBOX_FILTER" => self.theme.comment_filters.commentbox = decode(k, value)?,
            "SITEMAP" => {
                let sitemap: Option<Sitemap> = decode(k, value)?;
                if let Some(sitemap) = &sitemap {
                    check(k, sitemap.validate())?;
                }
                self.sitemap = sitemap;
            }
            "PROJECTS_TITLE" => self.projects.title = decode(k, value)?,
            "PROJECTS" => self.projects.entries = decode(k, value)?,
            _ => {
                if let Some(kind) = FeedKind::from_key(k) {
                    let path: Option<String> = decode(k, value)?;
                    if let Some(path) = &path {
                        check(k, urls::check_template(path))?;
                    }
                    self.feeds.set(kind, path);
                } else if let Some(label) = Label::from_key(k) {
                    self.theme.labels.set(label, decode(k, value)?);
                } else if let Some(kind) = url_kind(k, "_SAVE_AS") {
                    let template: String = decode(k, value)?;
                    check(k, urls::check_template(&template))?;
                    self.urls.set_save_as(kind, template);
                } else if let Some(kind) = url_kind(k, "_URL") {
                    let template: String = decode(k, value)?;
                    check(k, urls::check_template(&template))?;
                    self.urls.set_url(kind, template);
                } else {
                    log::warn!("Unrecognized setting `{key}`, passing it through unchecked");
                    self.extra.insert(Value::String(key), value);
                }
            }
        }
        Ok(())
    }

    /// The settings as a mapping keyed by option name; decoding it gives back this config.
    pub fn to_mapping(&self) -> Result<Mapping> {
        let mut mapping = Mapping::new();
        let mut insert = |key: &str, value: Value| {
            mapping.insert(Value::String(key.to_owned()), value);
        };

        if let Some(author) = &self.site.author {
            insert("AUTHOR", encode(author)?);
        }
        insert("SITENAME", encode(&self.site.sitename)?);
        insert("SITEURL", encode(&self.site.siteurl)?);
        insert("PATH", encode(&self.site.path)?);
        insert("TIMEZONE", encode(&self.site.timezone)?);
        insert("DEFAULT_LANG", encode(&self.site.default_lang)?);
        for kind in FeedKind::ALL {
            insert(kind.key(), encode(&self.feeds.get(kind))?);
        }
        insert("LINKS", encode(&self.links)?);
        insert("SOCIAL", encode(&self.social)?);
        insert("DEFAULT_PAGINATION", encode(&self.pagination)?);
        insert("RELATIVE_URLS", encode(&self.relative_urls)?);
        for (kind, pattern) in self.urls.iter() {
            if let Some(url) = &pattern.url {
                insert(&format!("{kind}_URL"), encode(url)?);
            }
            if let Some(save_as) = &pattern.save_as {
                insert(&format!("{kind}_SAVE_AS"), encode(save_as)?);
            }
        }
        insert("DIRECT_TEMPLATES", encode(&self.direct_templates)?);
        insert("DATE_FORMATS", encode(&self.date_formats)?);
        insert("DEFAULT_DATE_FORMAT", encode(&self.default_date_format)?);
        insert("DEFAULT_CATEGORY", encode(&self.default_category)?);
        insert(
            "USE_FOLDER_AS_CATEGORY",
            encode(&self.use_folder_as_category)?,
        );
        if let Some(theme) = &self.theme.name {
            insert("THEME", encode(theme)?);
        }
        for (label, text) in self.theme.labels.iter() {
            insert(label.key(), encode(&text)?);
        }
        insert("USE_SHORTCUT_ICONS", encode(&self.theme.use_shortcut_icons)?);
        let filters = self.theme.comment_filters;
        insert("DISQUS_FILTER", encode(&filters.disqus)?);
        insert("UTTERANCES_FILTER", encode(&filters.utterances)?);
        insert("COMMENTBOX_FILTER", encode(&filters.commentbox)?);
        if let Some(sitemap) = &self.sitemap {
            insert("SITEMAP", encode(sitemap)?);
        }
        if let Some(title) = &self.projects.title {
            insert("PROJECTS_TITLE", encode(title)?);
        }
        insert("PROJECTS", encode(&self.projects.entries)?);
        for (key, value) in &self.extra {
            if let Some(key) = key.as_str() {
                insert(key, value.clone());
            }
        }

        Ok(mapping)
    }

    /// Date format for a language, falling back to DEFAULT_DATE_FORMAT.
    pub fn date_format(&self, lang: &str) -> &str {
        self.date_formats
            .get(lang)
            .map_or(self.default_date_format.as_str(), String::as_str)
    }

    /// Absolute location of PATH.
    pub fn content_dir(&self) -> path::PathBuf {
        self.site.path.to_logical_path(&self.root)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mapping = self.to_mapping().map_err(|_| fmt::Error)?;
        let converted = serde_yaml::to_string(&mapping).map_err(|_| fmt::Error)?;
        write!(f, "{converted}")
    }
}

fn url_kind<'k>(key: &'k str, suffix: &str) -> Option<&'k str> {
    key.strip_suffix(suffix).filter(|kind| {
        !kind.is_empty()
            && kind
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
    })
}

fn find_project_file<P: Into<path::PathBuf>>(dir: P, name: &str) -> Option<path::PathBuf> {
    find_project_file_internal(dir.into(), name)
}

fn find_project_file_internal(dir: path::PathBuf, name: &str) -> Option<path::PathBuf> {
    let mut file_path = dir;
    file_path.push(name);
    while !file_path.exists() {
        file_path.pop(); // filename
        let hit_bottom = !file_path.pop();
        if hit_bottom {
            return None;
        }
        file_path.push(name);
    }
    Some(file_path)
}
