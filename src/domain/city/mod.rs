pub mod entity;
pub mod repository;

pub use entity::{City, CityId, CityName, CityUpdate, NewCity};
pub use repository::CityRepository;
