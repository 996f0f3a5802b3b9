pub mod articles;
pub mod cities;
pub mod contacts;
pub mod provinces;
pub mod schools;
pub mod sitemap;

pub use articles::ArticleQueryService;
pub use cities::CityQueryService;
pub use contacts::ContactQueryService;
pub use provinces::ProvinceQueryService;
pub use schools::{ListSchoolsQuery, SchoolQueryService};
pub use sitemap::SitemapQueryService;
