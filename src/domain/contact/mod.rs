pub mod entity;
pub mod repository;

pub use entity::{Contact, ContactEmail, ContactId, ContactPhone, ContactStatus, NewContact};
pub use repository::ContactRepository;
