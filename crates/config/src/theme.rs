use std::collections::BTreeMap;

use liquid_core::model::KString;

/// Theme selection and the text and switches a theme reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct Theme {
    pub name: Option<KString>,
    pub labels: Labels,
    pub use_shortcut_icons: bool,
    pub comment_filters: CommentFilters,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Label {
    SocialProfile,
    RelatedPosts,
    SharePostIntro,
    CommentsIntro,
    EmailSubscription,
    EmailFieldPlaceholder,
    SubscribeButtonTitle,
    LandingPageTitle,
}

impl Label {
    pub const ALL: [Label; 8] = [
        Label::SocialProfile,
        Label::RelatedPosts,
        Label::SharePostIntro,
        Label::CommentsIntro,
        Label::EmailSubscription,
        Label::EmailFieldPlaceholder,
        Label::SubscribeButtonTitle,
        Label::LandingPageTitle,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Label::SocialProfile => "SOCIAL_PROFILE_LABEL",
            Label::RelatedPosts => "RELATED_POSTS_LABEL",
            Label::SharePostIntro => "SHARE_POST_INTRO",
            Label::CommentsIntro => "COMMENTS_INTRO",
            Label::EmailSubscription => "EMAIL_SUBSCRIPTION_LABEL",
            Label::EmailFieldPlaceholder => "EMAIL_FIELD_PLACEHOLDER",
            Label::SubscribeButtonTitle => "SUBSCRIBE_BUTTON_TITLE",
            Label::LandingPageTitle => "LANDING_PAGE_TITLE",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|label| label.key() == key)
    }
}

/// UI strings; a missing label leaves the theme's own wording in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labels {
    values: BTreeMap<Label, String>,
}

impl Labels {
    pub fn get(&self, label: Label) -> Option<&str> {
        self.values.get(&label).map(String::as_str)
    }

    pub fn set(&mut self, label: Label, value: String) {
        self.values.insert(label, value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Label, &str)> + '_ {
        self.values.iter().map(|(label, value)| (*label, value.as_str()))
    }
}

/// Which comment systems the theme filters out of rendered pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommentFilters {
    pub disqus: bool,
    pub utterances: bool,
    pub commentbox: bool,
}

/// One PROJECTS entry.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub name: String,
    pub url: String,
    pub description: String,
}

/// The portfolio section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projects {
    pub title: Option<String>,
    pub entries: Vec<Project>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn label_keys_round_trip() {
        for label in Label::ALL {
            assert_eq!(Label::from_key(label.key()), Some(label));
        }
        assert_eq!(Label::from_key("SITENAME"), None);
    }

    #[test]
    fn labels_iterate_in_table_order() {
        let mut labels = Labels::default();
        labels.set(Label::LandingPageTitle, "Musings".to_owned());
        labels.set(Label::SocialProfile, "Stay in Touch".to_owned());
        let actual: Vec<_> = labels.iter().collect();
        assert_eq!(
            actual,
            [
                (Label::SocialProfile, "Stay in Touch"),
                (Label::LandingPageTitle, "Musings"),
            ]
        );
        assert_eq!(labels.get(Label::CommentsIntro), None);
    }

    #[test]
    fn project_requires_all_fields() {
        let result: Result<Project, _> =
            serde_yaml::from_str("{name: CR-Sparse, url: 'https://github.com/carnotresearch/cr-sparse'}");
        assert!(result.is_err());
    }

    #[test]
    fn project_rejects_unknown_fields() {
        let result: Result<Project, _> =
            serde_yaml::from_str("{name: a, url: b, description: c, stars: 5}");
        assert!(result.is_err());
    }
}
