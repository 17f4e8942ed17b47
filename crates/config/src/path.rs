static SLUG_INVALID_CHARS: once_cell::sync::Lazy<regex::Regex> =
    once_cell::sync::Lazy::new(|| regex::Regex::new(r"([^a-zA-Z0-9]+)").unwrap());

/// Create a URL slug out of a title, category or tag name.
pub fn slugify<S: AsRef<str>>(name: S) -> String {
    slugify_str(name.as_ref())
}

fn slugify_str(name: &str) -> String {
    let name = deunicode::deunicode_with_tofu(name, "-");
    let slug = SLUG_INVALID_CHARS.replace_all(&name, "-");
    slug.trim_matches('-').to_lowercase()
}

/// Split `name.ext` into its stem and extension.
pub fn split_ext(name: &str) -> (&str, Option<&str>) {
    name.rsplit_once('.')
        .map(|(n, e)| (n, Some(e)))
        .unwrap_or_else(|| (name, None))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_slugify() {
        let actual = slugify("___Optimization-Book__09___");
        assert_eq!(actual, "optimization-book-09");
    }

    #[test]
    fn test_slugify_unicode() {
        let actual = slugify("__Æneid__北亰-worlD-__09___");
        assert_eq!(actual, "aeneid-bei-jing-world-09");
    }

    #[test]
    fn test_slugify_punctuation() {
        assert_eq!(slugify("CR-Sparse: Sparse Signals!"), "cr-sparse-sparse-signals");
    }

    #[test]
    fn test_split_ext() {
        assert_eq!(split_ext("pelicanconf.py"), ("pelicanconf", Some("py")));
        assert_eq!(split_ext("_indigits.elegant.yml"), ("_indigits.elegant", Some("yml")));
        assert_eq!(split_ext("Makefile"), ("Makefile", None));
    }
}
