/// One `(label, URL)` entry of LINKS (blogroll) or SOCIAL (where the label names the platform).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct Link {
    pub label: String,
    pub url: String,
}

impl Link {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }

    pub fn as_pair(&self) -> (&str, &str) {
        (self.label.as_str(), self.url.as_str())
    }
}

impl From<(String, String)> for Link {
    fn from((label, url): (String, String)) -> Self {
        Self { label, url }
    }
}

impl From<Link> for (String, String) {
    fn from(link: Link) -> Self {
        (link.label, link.url)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn deserialize_pairs_in_order() {
        let links: Vec<Link> = serde_yaml::from_str(
            "- [Optimization Book, 'https://convex.indigits.com']
- [JAX, 'https://github.com/google/jax']",
        )
        .unwrap();
        let pairs: Vec<_> = links.iter().map(Link::as_pair).collect();
        assert_eq!(
            pairs,
            [
                ("Optimization Book", "https://convex.indigits.com"),
                ("JAX", "https://github.com/google/jax"),
            ]
        );
    }

    #[test]
    fn deserialize_rejects_triples() {
        let result: Result<Vec<Link>, _> = serde_yaml::from_str("- [a, b, c]");
        assert!(result.is_err());
    }

    #[test]
    fn deserialize_rejects_bare_strings() {
        let result: Result<Vec<Link>, _> = serde_yaml::from_str("- a");
        assert!(result.is_err());
    }
}
