use anyhow::Context as _;
use liquid_core::model::KString;

use crate::config::Config;
use crate::config::FeedKind;
use crate::config::UrlAttributes;
use crate::error::Result;

/// A page rendered straight from a template listed in DIRECT_TEMPLATES.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectOutput {
    pub template: KString,
    pub save_as: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedOutput {
    pub kind: FeedKind,
    /// Output path template; per-item feeds still carry `{slug}` and friends.
    pub path: String,
}

/// Everything the renderer gets to see of the configuration.
///
/// Built once from a loaded [`Config`] and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct SiteContext {
    config: Config,
    globals: liquid_core::model::Object,
}

impl SiteContext {
    pub fn new(config: Config) -> Result<Self> {
        let mapping = config.to_mapping()?;
        let globals: liquid_core::model::Object =
            serde_yaml::from_value(template_value(serde_yaml::Value::Mapping(mapping)))
                .context("Failed to build template globals")?;
        log::debug!("Exposing {} settings to templates", globals.len());
        Ok(Self { config, globals })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Template variables keyed by setting name (`SITENAME`, `LINKS`, ...).
    pub fn globals(&self) -> &liquid_core::model::Object {
        &self.globals
    }

    /// Pages to render from DIRECT_TEMPLATES, skipping those whose `<NAME>_SAVE_AS` is empty.
    pub fn direct_outputs(&self) -> Vec<DirectOutput> {
        self.config
            .direct_templates
            .iter()
            .filter_map(|template| {
                let kind = template.to_ascii_uppercase();
                let save_as = match self
                    .config
                    .urls
                    .get(&kind)
                    .and_then(|p| p.save_as.as_deref())
                {
                    Some("") => {
                        log::debug!("Skipping `{template}`, {kind}_SAVE_AS is empty");
                        return None;
                    }
                    Some(save_as) => save_as.to_owned(),
                    None => format!("{template}.html"),
                };
                Some(DirectOutput {
                    template: template.clone(),
                    save_as,
                })
            })
            .collect()
    }

    pub fn feeds(&self) -> Vec<FeedOutput> {
        self.config
            .feeds
            .enabled()
            .map(|(kind, path)| FeedOutput {
                kind,
                path: path.trim_start_matches('/').to_owned(),
            })
            .collect()
    }

    /// Expand `<KIND>_URL`, prefixed with SITEURL unless RELATIVE_URLS is set.
    pub fn url_for(&self, kind: &str, attributes: &UrlAttributes) -> Result<String> {
        let template = self
            .config
            .urls
            .get(kind)
            .and_then(|p| p.url.as_deref())
            .ok_or_else(|| anyhow::format_err!("No `{kind}_URL` is configured"))?;
        let url = crate::config::expand(template, attributes)?;
        if self.config.relative_urls {
            Ok(url)
        } else {
            Ok(format!(
                "{}/{}",
                self.config.site.siteurl.trim_end_matches('/'),
                url.trim_start_matches('/')
            ))
        }
    }
}

/// Templates index objects by string, so scalar keys are stringified and others dropped.
fn template_value(value: serde_yaml::Value) -> serde_yaml::Value {
    match value {
        serde_yaml::Value::Mapping(mapping) => serde_yaml::Value::Mapping(
            mapping
                .into_iter()
                .filter_map(|(key, value)| {
                    let key = match key {
                        serde_yaml::Value::String(key) => key,
                        serde_yaml::Value::Number(key) => key.to_string(),
                        serde_yaml::Value::Bool(key) => key.to_string(),
                        other => {
                            log::warn!("Dropping non-scalar key `{other:?}` from template globals");
                            return None;
                        }
                    };
                    Some((serde_yaml::Value::String(key), template_value(value)))
                })
                .collect(),
        ),
        serde_yaml::Value::Sequence(items) => {
            serde_yaml::Value::Sequence(items.into_iter().map(template_value).collect())
        }
        serde_yaml::Value::Tagged(tagged) => template_value(tagged.value),
        other => other,
    }
}
