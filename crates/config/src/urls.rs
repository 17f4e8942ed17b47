use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Write as _;

use liquid_core::model::KString;

use crate::Result;
use crate::Status;

const DEFAULT_DATE_PLACEHOLDER_FORMAT: &str = "%Y-%m-%d";

/// `<KIND>_URL` and `<KIND>_SAVE_AS` for one content type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlPattern {
    pub url: Option<String>,
    pub save_as: Option<String>,
}

impl UrlPattern {
    fn both(template: &str) -> Self {
        Self {
            url: Some(template.to_owned()),
            save_as: Some(template.to_owned()),
        }
    }

    /// An empty `SAVE_AS` means the output is not written at all.
    pub fn is_disabled(&self) -> bool {
        self.save_as.as_deref() == Some("")
    }
}

/// URL patterns keyed by content-type name (`ARTICLE`, `PAGE`, `TAGS`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlPatterns {
    patterns: BTreeMap<KString, UrlPattern>,
}

impl Default for UrlPatterns {
    fn default() -> Self {
        let patterns = [
            ("ARTICLE", "{slug}.html"),
            ("PAGE", "pages/{slug}.html"),
            ("CATEGORY", "category/{slug}.html"),
            ("TAG", "tag/{slug}.html"),
            ("AUTHOR", "author/{slug}.html"),
        ]
        .into_iter()
        .map(|(kind, template)| (KString::from_static(kind), UrlPattern::both(template)))
        .collect();
        Self { patterns }
    }
}

impl UrlPatterns {
    pub fn get(&self, kind: &str) -> Option<&UrlPattern> {
        self.patterns.get(kind)
    }

    pub fn set_url(&mut self, kind: &str, template: String) {
        self.entry(kind).url = Some(template);
    }

    pub fn set_save_as(&mut self, kind: &str, template: String) {
        self.entry(kind).save_as = Some(template);
    }

    fn entry(&mut self, kind: &str) -> &mut UrlPattern {
        self.patterns
            .entry(KString::from_ref(kind))
            .or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UrlPattern)> + '_ {
        self.patterns.iter().map(|(kind, p)| (kind.as_str(), p))
    }
}

/// Values substituted into URL, save-as and feed templates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlAttributes {
    pub slug: Option<String>,
    pub lang: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub date: Option<chrono::NaiveDateTime>,
}

impl UrlAttributes {
    /// Attributes for an item whose slug is derived from its title.
    pub fn titled(title: &str) -> Self {
        Self {
            slug: Some(crate::path::slugify(title)),
            ..Default::default()
        }
    }
}

static PLACEHOLDER: once_cell::sync::Lazy<regex::Regex> = once_cell::sync::Lazy::new(|| {
    regex::Regex::new(r"\{([a-z_]+)(?::([^{}]*))?\}").unwrap()
});

const PLACEHOLDERS: &[&str] = &["slug", "lang", "category", "author", "date"];

/// Check that a template only uses known placeholders with valid date formats.
pub(crate) fn check_template(template: &str) -> Result<(), String> {
    for caps in PLACEHOLDER.captures_iter(template) {
        let name = &caps[1];
        if !PLACEHOLDERS.contains(&name) {
            return Err(format!(
                "unknown placeholder `{{{name}}}` in `{template}`, expected one of {}",
                PLACEHOLDERS.join(", ")
            ));
        }
        if let Some(format) = caps.get(2) {
            if name != "date" {
                return Err(format!("`{{{name}}}` does not take a format in `{template}`"));
            }
            check_naive_date_format(format.as_str())?;
        }
    }
    let rest = PLACEHOLDER.replace_all(template, "");
    if rest.contains(&['{', '}'][..]) {
        return Err(format!("unbalanced braces in `{template}`"));
    }
    Ok(())
}

pub(crate) fn check_date_format(format: &str) -> Result<(), String> {
    let invalid = chrono::format::StrftimeItems::new(format)
        .any(|item| matches!(item, chrono::format::Item::Error));
    if invalid {
        Err(format!("`{format}` is not a valid strftime format"))
    } else {
        Ok(())
    }
}

/// Template dates carry no offset, so `%z`, `%Z` and friends cannot be rendered.
fn check_naive_date_format(format: &str) -> Result<(), String> {
    check_date_format(format)?;
    format_date(&chrono::NaiveDateTime::default(), format)
        .map(|_| ())
        .map_err(|_| format!("`{format}` needs a time zone, which URL dates do not have"))
}

fn format_date(date: &chrono::NaiveDateTime, format: &str) -> Result<String, fmt::Error> {
    let mut formatted = String::new();
    write!(formatted, "{}", date.format(format))?;
    Ok(formatted)
}

/// Substitute `{slug}`, `{lang}`, `{category}`, `{author}` and `{date}` / `{date:<strftime>}`.
pub fn expand(template: &str, attributes: &UrlAttributes) -> Result<String> {
    check_template(template).map_err(|reason| {
        Status::new("Invalid URL template").context_with(|c| {
            c.insert("Template", template.to_owned())
                .insert("Reason", reason.clone())
        })
    })?;

    let mut expanded = String::with_capacity(template.len());
    let mut last = 0;
    for caps in PLACEHOLDER.captures_iter(template) {
        let whole = caps.get(0).expect("unconditional capture");
        expanded.push_str(&template[last..whole.start()]);
        last = whole.end();

        let name = &caps[1];
        let value = match name {
            "slug" => attributes.slug.clone(),
            "lang" => attributes.lang.clone(),
            "category" => attributes.category.clone(),
            "author" => attributes.author.clone(),
            "date" => match attributes.date {
                Some(date) => {
                    let format = caps
                        .get(2)
                        .map_or(DEFAULT_DATE_PLACEHOLDER_FORMAT, |m| m.as_str());
                    let formatted = format_date(&date, format).map_err(|e| {
                        Status::new("Failed to format URL date")
                            .with_source(e)
                            .context_with(|c| c.insert("Template", template.to_owned()))
                    })?;
                    Some(formatted)
                }
                None => None,
            },
            _ => unreachable!("placeholders are checked above"),
        };
        let value = value.ok_or_else(|| {
            Status::new("Missing URL attribute").context_with(|c| {
                c.insert("Template", template.to_owned())
                    .insert("Attribute", name.to_owned())
            })
        })?;
        expanded.push_str(&value);
    }
    expanded.push_str(&template[last..]);
    Ok(expanded)
}
