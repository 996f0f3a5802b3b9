pub mod articles;
pub mod cities;
pub mod contacts;
pub mod pagination;
pub mod provinces;
pub mod schools;
pub mod search;
pub mod sitemap;

pub use articles::ArticleDto;
pub use cities::CityDto;
pub use contacts::ContactDto;
pub use pagination::{Page, PageRequest};
pub use provinces::ProvinceDto;
pub use schools::SchoolDto;
pub use search::{SearchCityDoc, SearchProjection, SearchProvinceDoc, SearchSchoolDoc};
pub use sitemap::{SitemapDto, SitemapEntry};
