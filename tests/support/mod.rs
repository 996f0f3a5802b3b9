// tests/support/mod.rs
// Shared by multiple integration test binaries; not every test crate uses
// every helper, so silence the resulting dead_code noise here.
#[allow(dead_code, unused_imports)]
pub mod helpers;

#[allow(dead_code, unused_imports)]
pub mod mocks;

#[allow(unused_imports)]
pub use helpers::*;
#[allow(unused_imports)]
pub use mocks::*;
