/// SITEMAP: how the sitemap is written.  Missing fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct Sitemap {
    pub format: SitemapFormat,
    pub priorities: Priorities,
    pub changefreqs: ChangeFreqs,
}

impl Sitemap {
    pub(crate) fn validate(&self) -> Result<(), String> {
        let Priorities {
            articles,
            indexes,
            pages,
        } = self.priorities;
        for (name, priority) in [("articles", articles), ("indexes", indexes), ("pages", pages)] {
            if !(0.0..=1.0).contains(&priority) {
                return Err(format!(
                    "priority for {name} must be between 0 and 1, got {priority}"
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SitemapFormat {
    #[default]
    Xml,
    Txt,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct Priorities {
    pub articles: f64,
    pub indexes: f64,
    pub pages: f64,
}

impl Default for Priorities {
    fn default() -> Self {
        Self {
            articles: 0.5,
            indexes: 0.5,
            pages: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct ChangeFreqs {
    pub articles: ChangeFreq,
    pub indexes: ChangeFreq,
    pub pages: ChangeFreq,
}

impl Default for ChangeFreqs {
    fn default() -> Self {
        Self {
            articles: ChangeFreq::Monthly,
            indexes: ChangeFreq::Daily,
            pages: ChangeFreq::Monthly,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}
