// src/application/services.rs
use std::sync::Arc;

use crate::application::commands::{
    ArticleCommandService, CityCommandService, ContactCommandService, MaintenanceService,
    ProvinceCommandService, SchoolCommandService,
};
use crate::application::ports::{
    media::ImageStore, search::SearchIndexWriter, time::Clock, util::SlugGenerator,
};
use crate::application::queries::{
    ArticleQueryService, CityQueryService, ContactQueryService, ProvinceQueryService,
    SchoolQueryService, SitemapQueryService,
};
use crate::domain::article::ArticleRepository;
use crate::domain::city::CityRepository;
use crate::domain::contact::ContactRepository;
use crate::domain::counters::CounterMaintainer;
use crate::domain::province::ProvinceRepository;
use crate::domain::school::SchoolRepository;
use crate::domain::slug::UniqueSlugResolver;

/// Aggregate wiring of every command and query service, built once at
/// bootstrap and shared behind an `Arc`.
pub struct ApplicationServices {
    pub province_commands: Arc<ProvinceCommandService>,
    pub city_commands: Arc<CityCommandService>,
    pub school_commands: Arc<SchoolCommandService>,
    pub contact_commands: Arc<ContactCommandService>,
    pub article_commands: Arc<ArticleCommandService>,
    pub maintenance: Arc<MaintenanceService>,
    pub province_queries: Arc<ProvinceQueryService>,
    pub city_queries: Arc<CityQueryService>,
    pub school_queries: Arc<SchoolQueryService>,
    pub contact_queries: Arc<ContactQueryService>,
    pub article_queries: Arc<ArticleQueryService>,
    pub sitemap_queries: Arc<SitemapQueryService>,
    image_store: Arc<dyn ImageStore>,
}

impl ApplicationServices {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        provinces: Arc<dyn ProvinceRepository>,
        cities: Arc<dyn CityRepository>,
        schools: Arc<dyn SchoolRepository>,
        contacts: Arc<dyn ContactRepository>,
        articles: Arc<dyn ArticleRepository>,
        clock: Arc<dyn Clock>,
        slugger: Arc<dyn SlugGenerator>,
        search: Arc<dyn SearchIndexWriter>,
        image_store: Arc<dyn ImageStore>,
    ) -> Self {
        let slugs = Arc::new(UniqueSlugResolver::new(slugger));
        let counters = Arc::new(CounterMaintainer::new(
            Arc::clone(&provinces),
            Arc::clone(&cities),
            Arc::clone(&schools),
        ));

        let province_commands = Arc::new(ProvinceCommandService::new(
            Arc::clone(&provinces),
            Arc::clone(&cities),
            Arc::clone(&slugs),
            Arc::clone(&clock),
        ));
        let city_commands = Arc::new(CityCommandService::new(
            Arc::clone(&cities),
            Arc::clone(&provinces),
            Arc::clone(&schools),
            Arc::clone(&slugs),
            Arc::clone(&clock),
        ));
        let school_commands = Arc::new(SchoolCommandService::new(
            Arc::clone(&schools),
            Arc::clone(&cities),
            Arc::clone(&provinces),
            Arc::clone(&slugs),
            Arc::clone(&counters),
            Arc::clone(&clock),
        ));
        let contact_commands = Arc::new(ContactCommandService::new(
            Arc::clone(&contacts),
            Arc::clone(&schools),
            Arc::clone(&clock),
        ));
        let article_commands = Arc::new(ArticleCommandService::new(
            Arc::clone(&articles),
            Arc::clone(&slugs),
            Arc::clone(&clock),
        ));
        let maintenance = Arc::new(MaintenanceService::new(
            Arc::clone(&counters),
            search,
            Arc::clone(&provinces),
            Arc::clone(&cities),
            Arc::clone(&schools),
        ));

        let province_queries = Arc::new(ProvinceQueryService::new(Arc::clone(&provinces)));
        let city_queries = Arc::new(CityQueryService::new(
            Arc::clone(&cities),
            Arc::clone(&provinces),
        ));
        let school_queries = Arc::new(SchoolQueryService::new(Arc::clone(&schools)));
        let contact_queries = Arc::new(ContactQueryService::new(Arc::clone(&contacts)));
        let article_queries = Arc::new(ArticleQueryService::new(Arc::clone(&articles)));
        let sitemap_queries = Arc::new(SitemapQueryService::new(
            provinces, cities, schools, articles,
        ));

        Self {
            province_commands,
            city_commands,
            school_commands,
            contact_commands,
            article_commands,
            maintenance,
            province_queries,
            city_queries,
            school_queries,
            contact_queries,
            article_queries,
            sitemap_queries,
            image_store,
        }
    }

    pub fn image_store(&self) -> Arc<dyn ImageStore> {
        Arc::clone(&self.image_store)
    }
}
