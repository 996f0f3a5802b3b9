pub mod articles;
pub mod cities;
pub mod contacts;
pub mod maintenance;
pub mod provinces;
pub mod schools;

pub use articles::{ArticleCommandService, CreateArticleCommand, UpdateArticleCommand};
pub use cities::{CityCommandService, CreateCityCommand, UpdateCityCommand};
pub use contacts::{ContactCommandService, SubmitContactCommand, UpdateContactCommand};
pub use maintenance::{MaintenanceService, ReconcileCountsOutcome, ReindexOutcome};
pub use provinces::{CreateProvinceCommand, ProvinceCommandService, UpdateProvinceCommand};
pub use schools::{CreateSchoolCommand, SchoolCommandService, SchoolLocation, UpdateSchoolCommand};
