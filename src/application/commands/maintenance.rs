// src/application/commands/maintenance.rs
use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::dto::{SearchCityDoc, SearchProjection};
use crate::application::error::ApplicationResult;
use crate::application::ports::search::SearchIndexWriter;
use crate::domain::city::CityRepository;
use crate::domain::counters::CounterMaintainer;
use crate::domain::province::ProvinceRepository;
use crate::domain::school::{SchoolFilter, SchoolRepository};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct ReconcileCountsOutcome {
    pub cities_updated: u64,
    pub provinces_updated: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReindexOutcome {
    /// False when the projection was built but the search collaborator
    /// refused it; the failure is logged and deliberately non-fatal.
    pub indexed: bool,
    pub schools: usize,
    pub provinces: usize,
    pub cities: usize,
}

/// Admin-triggered corrective operations: counter reconciliation and the
/// full search re-projection.
pub struct MaintenanceService {
    counters: Arc<CounterMaintainer>,
    search: Arc<dyn SearchIndexWriter>,
    provinces: Arc<dyn ProvinceRepository>,
    cities: Arc<dyn CityRepository>,
    schools: Arc<dyn SchoolRepository>,
}

impl MaintenanceService {
    pub fn new(
        counters: Arc<CounterMaintainer>,
        search: Arc<dyn SearchIndexWriter>,
        provinces: Arc<dyn ProvinceRepository>,
        cities: Arc<dyn CityRepository>,
        schools: Arc<dyn SchoolRepository>,
    ) -> Self {
        Self {
            counters,
            search,
            provinces,
            cities,
            schools,
        }
    }

    /// Overwrite every cached `schools_count` from the live school rows.
    /// Idempotent; exposed as a first-class operation, not a recovery
    /// script.
    pub async fn reconcile_counts(&self) -> ApplicationResult<ReconcileCountsOutcome> {
        let report = self.counters.reconcile_all().await?;
        tracing::info!(
            cities = report.cities_updated,
            provinces = report.provinces_updated,
            "school counters reconciled"
        );
        Ok(ReconcileCountsOutcome {
            cities_updated: report.cities_updated,
            provinces_updated: report.provinces_updated,
        })
    }

    /// Flatten the active directory into the three search-document arrays.
    pub async fn project_for_search(&self) -> ApplicationResult<SearchProjection> {
        let filter = SchoolFilter {
            only_active: true,
            ..SchoolFilter::default()
        };
        let (school_views, _) = self.schools.list_views(&filter, i64::MAX, 0).await?;

        let provinces = self.provinces.list(false).await?;
        let province_names: HashMap<i64, String> = provinces
            .iter()
            .map(|p| (p.id.into(), p.name.as_str().to_string()))
            .collect();

        let cities = self
            .cities
            .list(None, false)
            .await?
            .into_iter()
            .map(|city| {
                let province = province_names
                    .get(&i64::from(city.province_id))
                    .cloned()
                    .unwrap_or_default();
                SearchCityDoc::from_city(city, province)
            })
            .collect();

        Ok(SearchProjection {
            schools: school_views.into_iter().map(Into::into).collect(),
            provinces: provinces.into_iter().map(Into::into).collect(),
            cities,
        })
    }

    /// Rebuild the external search indexes from the current repository
    /// state. An unreachable or failing search collaborator does not fail
    /// the admin action.
    pub async fn reindex_search(&self) -> ApplicationResult<ReindexOutcome> {
        let projection = self.project_for_search().await?;
        let mut outcome = ReindexOutcome {
            indexed: true,
            schools: projection.schools.len(),
            provinces: projection.provinces.len(),
            cities: projection.cities.len(),
        };

        if let Err(err) = self.search.replace_all(&projection).await {
            tracing::warn!(error = %err, "search reindex failed; indexes left as-is");
            outcome.indexed = false;
        }
        Ok(outcome)
    }
}
