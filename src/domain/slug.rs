// src/domain/slug.rs
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::util::SlugGenerator;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::province::ProvinceId;

/// URL-safe identifier: lowercase alphanumeric runs separated by single
/// hyphens, never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::Validation("slug cannot be empty".into()));
        }
        let valid = !value.starts_with('-')
            && !value.ends_with('-')
            && !value.contains("--")
            && value
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !valid {
            return Err(DomainError::Validation(format!("invalid slug: {value}")));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

/// Sibling set a slug must be distinct within: the whole table for
/// provinces/schools/articles, a single province for cities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugScope {
    Global,
    WithinProvince(ProvinceId),
}

/// Point existence check against the backing store. Each repository that
/// owns a slug column implements this.
#[async_trait]
pub trait SlugProbe: Send + Sync {
    async fn slug_taken(
        &self,
        candidate: &str,
        scope: SlugScope,
        exclude_id: Option<i64>,
    ) -> DomainResult<bool>;
}

/// Turns a display name into a slug that is free within the declared scope
/// at the moment of the check, by sequentially probing `base`, `base-1`,
/// `base-2`, ...
///
/// This is a best-effort pre-check that produces a friendly candidate; the
/// storage-level unique index remains the authoritative guarantee against
/// concurrent creations racing past each other's probes.
pub struct UniqueSlugResolver {
    generator: Arc<dyn SlugGenerator>,
}

impl UniqueSlugResolver {
    pub fn new(generator: Arc<dyn SlugGenerator>) -> Self {
        Self { generator }
    }

    pub async fn resolve(
        &self,
        probe: &dyn SlugProbe,
        name: &str,
        scope: SlugScope,
        exclude_id: Option<i64>,
    ) -> DomainResult<Slug> {
        let base = self.generator.slugify(name);
        if base.is_empty() {
            return Err(DomainError::Validation(format!(
                "name {name:?} contains no slug-safe characters"
            )));
        }

        let mut candidate = base.clone();
        let mut suffix = 1u64;
        loop {
            if !probe.slug_taken(&candidate, scope, exclude_id).await? {
                return Slug::new(candidate);
            }
            candidate = format!("{base}-{suffix}");
            suffix += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    struct FixedProbe {
        taken: Mutex<HashSet<(String, Option<i64>)>>,
    }

    impl FixedProbe {
        fn with(slugs: &[&str]) -> Self {
            let taken = slugs
                .iter()
                .map(|s| ((*s).to_string(), None))
                .collect::<HashSet<_>>();
            Self {
                taken: Mutex::new(taken),
            }
        }

        fn with_scoped(slugs: &[(&str, i64)]) -> Self {
            let taken = slugs
                .iter()
                .map(|(s, p)| ((*s).to_string(), Some(*p)))
                .collect::<HashSet<_>>();
            Self {
                taken: Mutex::new(taken),
            }
        }
    }

    #[async_trait]
    impl SlugProbe for FixedProbe {
        async fn slug_taken(
            &self,
            candidate: &str,
            scope: SlugScope,
            _exclude_id: Option<i64>,
        ) -> DomainResult<bool> {
            let key = match scope {
                SlugScope::Global => (candidate.to_string(), None),
                SlugScope::WithinProvince(p) => (candidate.to_string(), Some(i64::from(p))),
            };
            Ok(self.taken.lock().unwrap().contains(&key))
        }
    }

    fn resolver() -> UniqueSlugResolver {
        UniqueSlugResolver::new(Arc::new(
            crate::infrastructure::util::DefaultSlugGenerator,
        ))
    }

    #[tokio::test]
    async fn free_base_is_returned_untouched() {
        let probe = FixedProbe::with(&[]);
        let slug = resolver()
            .resolve(&probe, "Manejo Seguro", SlugScope::Global, None)
            .await
            .unwrap();
        assert_eq!(slug.as_str(), "manejo-seguro");
    }

    #[tokio::test]
    async fn probes_sequentially_past_taken_suffixes() {
        let probe = FixedProbe::with(&["centro", "centro-1"]);
        let slug = resolver()
            .resolve(&probe, "Centro", SlugScope::Global, None)
            .await
            .unwrap();
        assert_eq!(slug.as_str(), "centro-2");
    }

    #[tokio::test]
    async fn scope_isolates_provinces() {
        let cordoba = ProvinceId::new(1).unwrap();
        let mendoza = ProvinceId::new(2).unwrap();
        let probe = FixedProbe::with_scoped(&[("san-martin", 1)]);

        let taken = resolver()
            .resolve(&probe, "San Martín", SlugScope::WithinProvince(cordoba), None)
            .await
            .unwrap();
        assert_eq!(taken.as_str(), "san-martin-1");

        let free = resolver()
            .resolve(&probe, "San Martín", SlugScope::WithinProvince(mendoza), None)
            .await
            .unwrap();
        assert_eq!(free.as_str(), "san-martin");
    }

    #[tokio::test]
    async fn symbol_only_name_is_rejected() {
        let probe = FixedProbe::with(&[]);
        let err = resolver()
            .resolve(&probe, "!!!", SlugScope::Global, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn slug_value_object_rejects_malformed_input() {
        assert!(Slug::new("").is_err());
        assert!(Slug::new("-leading").is_err());
        assert!(Slug::new("trailing-").is_err());
        assert!(Slug::new("double--hyphen").is_err());
        assert!(Slug::new("UPPER").is_err());
        assert!(Slug::new("rio-cuarto").is_ok());
    }
}
