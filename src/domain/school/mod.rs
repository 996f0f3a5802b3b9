pub mod entity;
pub mod repository;

pub use entity::{NewSchool, School, SchoolId, SchoolName, SchoolUpdate, SchoolView};
pub use repository::{SchoolFilter, SchoolRepository};
