pub mod entity;
pub mod repository;

pub use entity::{NewProvince, Province, ProvinceId, ProvinceName, ProvinceUpdate};
pub use repository::ProvinceRepository;
