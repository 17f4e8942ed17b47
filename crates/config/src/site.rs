use liquid_core::model::KString;

const DEFAULT_SITENAME: &str = "My Site";
const DEFAULT_PATH: &str = ".";
const DEFAULT_TIMEZONE: &str = "UTC";
const DEFAULT_LANG: &str = "en";

/// Who the site is and where it lives.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct Site {
    pub author: Option<String>,
    pub sitename: String,
    /// Base URL without a trailing `/`; empty while developing locally.
    pub siteurl: String,
    /// Content directory, relative to the configuration file.
    pub path: relative_path::RelativePathBuf,
    pub timezone: KString,
    pub default_lang: KString,
}

impl Default for Site {
    fn default() -> Self {
        Self {
            author: None,
            sitename: DEFAULT_SITENAME.to_owned(),
            siteurl: String::new(),
            path: relative_path::RelativePathBuf::from(DEFAULT_PATH),
            timezone: KString::from_static(DEFAULT_TIMEZONE),
            default_lang: KString::from_static(DEFAULT_LANG),
        }
    }
}

static TIMEZONE_NAME: once_cell::sync::Lazy<regex::Regex> = once_cell::sync::Lazy::new(|| {
    regex::Regex::new(r"^(?:UTC|GMT|[A-Z][A-Za-z_\-]*(?:/[A-Za-z0-9_\-+]+){1,2})$").unwrap()
});

pub(crate) fn normalize_siteurl(mut url: String) -> Result<String, String> {
    if !url.is_empty()
        && !(url.starts_with("http://") || url.starts_with("https://") || url.starts_with('/'))
    {
        return Err(format!(
            "`{url}` must be empty, absolute (`http://`, `https://`) or root-relative (`/`)"
        ));
    }
    if url.len() > 1 && url.ends_with('/') {
        log::warn!("Stripping trailing `/` from SITEURL `{url}`");
        while url.len() > 1 && url.ends_with('/') {
            url.pop();
        }
    }
    Ok(url)
}

pub(crate) fn check_timezone(zone: &str) -> Result<(), String> {
    if TIMEZONE_NAME.is_match(zone) {
        Ok(())
    } else {
        Err(format!(
            "`{zone}` is not a time zone name like `UTC` or `Asia/Kolkata`"
        ))
    }
}

pub(crate) fn check_lang(lang: &str) -> Result<(), String> {
    if lang.trim().is_empty() {
        Err("language must not be empty".to_owned())
    } else {
        Ok(())
    }
}
