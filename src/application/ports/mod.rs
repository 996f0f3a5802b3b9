pub mod media;
pub mod search;
pub mod time;
pub mod util;

pub use media::{ImageStore, StoredImage};
pub use search::SearchIndexWriter;
pub use time::Clock;
pub use util::SlugGenerator;
