// src/application/ports/util.rs

/// Pure display-name → slug-candidate mapping. Total and deterministic; may
/// return an empty string for input with no slug-safe characters, which the
/// uniqueness resolver rejects before persistence.
pub trait SlugGenerator: Send + Sync {
    fn slugify(&self, input: &str) -> String;
}
