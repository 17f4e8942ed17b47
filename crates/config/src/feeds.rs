use std::collections::BTreeMap;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeedFormat {
    Atom,
    Rss,
}

/// Feed output settings, each an optional path template.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeedKind {
    All(FeedFormat),
    Category(FeedFormat),
    Tag(FeedFormat),
    Translation(FeedFormat),
    Author(FeedFormat),
}

impl FeedKind {
    pub const ALL: [FeedKind; 10] = [
        FeedKind::All(FeedFormat::Atom),
        FeedKind::All(FeedFormat::Rss),
        FeedKind::Category(FeedFormat::Atom),
        FeedKind::Category(FeedFormat::Rss),
        FeedKind::Tag(FeedFormat::Atom),
        FeedKind::Tag(FeedFormat::Rss),
        FeedKind::Translation(FeedFormat::Atom),
        FeedKind::Translation(FeedFormat::Rss),
        FeedKind::Author(FeedFormat::Atom),
        FeedKind::Author(FeedFormat::Rss),
    ];

    pub fn key(self) -> &'static str {
        match self {
            FeedKind::All(FeedFormat::Atom) => "FEED_ALL_ATOM",
            FeedKind::All(FeedFormat::Rss) => "FEED_ALL_RSS",
            FeedKind::Category(FeedFormat::Atom) => "CATEGORY_FEED_ATOM",
            FeedKind::Category(FeedFormat::Rss) => "CATEGORY_FEED_RSS",
            FeedKind::Tag(FeedFormat::Atom) => "TAG_FEED_ATOM",
            FeedKind::Tag(FeedFormat::Rss) => "TAG_FEED_RSS",
            FeedKind::Translation(FeedFormat::Atom) => "TRANSLATION_FEED_ATOM",
            FeedKind::Translation(FeedFormat::Rss) => "TRANSLATION_FEED_RSS",
            FeedKind::Author(FeedFormat::Atom) => "AUTHOR_FEED_ATOM",
            FeedKind::Author(FeedFormat::Rss) => "AUTHOR_FEED_RSS",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    pub fn format(self) -> FeedFormat {
        match self {
            FeedKind::All(format)
            | FeedKind::Category(format)
            | FeedKind::Tag(format)
            | FeedKind::Translation(format)
            | FeedKind::Author(format) => format,
        }
    }
}

/// Declared feeds.  A feed that is absent, `None` or empty is not generated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feeds {
    paths: BTreeMap<FeedKind, String>,
}

impl Feeds {
    pub fn get(&self, kind: FeedKind) -> Option<&str> {
        self.paths.get(&kind).map(String::as_str)
    }

    pub fn set(&mut self, kind: FeedKind, path: Option<String>) {
        match path.filter(|p| !p.is_empty()) {
            Some(path) => {
                self.paths.insert(kind, path);
            }
            None => {
                self.paths.remove(&kind);
            }
        }
    }

    pub fn is_enabled(&self, kind: FeedKind) -> bool {
        self.paths.contains_key(&kind)
    }

    /// Enabled feeds in declaration-table order.
    pub fn enabled(&self) -> impl Iterator<Item = (FeedKind, &str)> + '_ {
        self.paths.iter().map(|(kind, path)| (*kind, path.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
