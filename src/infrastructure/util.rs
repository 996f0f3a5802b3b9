// src/infrastructure/util.rs
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::application::ports::util::SlugGenerator;

/// Display-name folding: lowercase, NFD-decompose and drop combining marks,
/// keep only `[a-z0-9\s-]`, collapse whitespace and hyphen runs into single
/// hyphens, trim hyphens. Idempotent; empty output is the caller's problem.
#[derive(Default, Clone)]
pub struct DefaultSlugGenerator;

impl SlugGenerator for DefaultSlugGenerator {
    fn slugify(&self, input: &str) -> String {
        let folded: String = input
            .to_lowercase()
            .nfd()
            .filter(|c| !is_combining_mark(*c))
            .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-')
            .collect();

        let mut slug = String::with_capacity(folded.len());
        let mut pending_hyphen = false;
        for c in folded.chars() {
            if c.is_whitespace() || c == '-' {
                pending_hyphen = !slug.is_empty();
            } else {
                if pending_hyphen {
                    slug.push('-');
                    pending_hyphen = false;
                }
                slug.push(c);
            }
        }
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slugify(input: &str) -> String {
        DefaultSlugGenerator.slugify(input)
    }

    #[test]
    fn folds_accents_to_ascii() {
        assert_eq!(slugify("Córdoba"), "cordoba");
        assert_eq!(slugify("Río Cuarto"), "rio-cuarto");
        assert_eq!(slugify("Ñandú  Ágil"), "nandu-agil");
    }

    #[test]
    fn collapses_separator_runs() {
        assert_eq!(slugify("  San   Martín -- Centro  "), "san-martin-centro");
        assert_eq!(slugify("---a---b---"), "a-b");
    }

    #[test]
    fn drops_everything_outside_the_safe_set() {
        assert_eq!(slugify("Manejo 100% Seguro!"), "manejo-100-seguro");
        assert_eq!(slugify("auto&escuela"), "autoescuela");
    }

    #[test]
    fn symbol_only_input_yields_empty() {
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify("🚗🚗"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn idempotent_over_its_own_output() {
        for input in ["Córdoba", "Río Cuarto", "Manejo 100% Seguro!", "a  b"] {
            let once = slugify(input);
            assert_eq!(slugify(&once), once);
        }
    }

    #[test]
    fn output_charset_is_hyphenated_lowercase_alphanumeric() {
        for input in ["Córdoba Capital", "É!é?123", "  x  ", "ümlaut-Straße"] {
            let slug = slugify(input);
            assert!(!slug.starts_with('-') && !slug.ends_with('-'));
            assert!(!slug.contains("--"));
            assert!(slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        }
    }
}
