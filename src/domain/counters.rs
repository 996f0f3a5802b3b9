// src/domain/counters.rs
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::city::{CityId, CityRepository};
use crate::domain::errors::DomainResult;
use crate::domain::province::{ProvinceId, ProvinceRepository};
use crate::domain::school::{School, SchoolRepository};

/// Keeps the cached `schools_count` on cities and provinces consistent with
/// the live count of active school rows.
///
/// The incremental hook applies the smallest signed adjustment implied by a
/// single school transition; `reconcile_all` is the authoritative
/// self-healing operation that overwrites every cached value from a fresh
/// count. Incremental failures are tolerated by callers (the school write
/// has already succeeded) and left for reconciliation to correct.
pub struct CounterMaintainer {
    provinces: Arc<dyn ProvinceRepository>,
    cities: Arc<dyn CityRepository>,
    schools: Arc<dyn SchoolRepository>,
}

/// Outcome of a bulk reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterReconciliation {
    pub cities_updated: u64,
    pub provinces_updated: u64,
}

impl CounterMaintainer {
    pub fn new(
        provinces: Arc<dyn ProvinceRepository>,
        cities: Arc<dyn CityRepository>,
        schools: Arc<dyn SchoolRepository>,
    ) -> Self {
        Self {
            provinces,
            cities,
            schools,
        }
    }

    /// Incremental hook for a single school transition. `before` is the row
    /// as it was prior to the write (`None` on create), `after` as it is now
    /// (`None` on delete). Covers create, delete, activation toggles and
    /// city moves uniformly: each active side contributes a signed unit to
    /// its (city, province) pair and offsetting contributions cancel.
    pub async fn apply_school_change(
        &self,
        before: Option<&School>,
        after: Option<&School>,
    ) -> DomainResult<()> {
        let mut city_deltas: BTreeMap<i64, i64> = BTreeMap::new();
        let mut province_deltas: BTreeMap<i64, i64> = BTreeMap::new();

        if let Some(school) = before {
            if school.counts_toward_aggregates() {
                *city_deltas.entry(school.city_id.into()).or_default() -= 1;
                *province_deltas.entry(school.province_id.into()).or_default() -= 1;
            }
        }
        if let Some(school) = after {
            if school.counts_toward_aggregates() {
                *city_deltas.entry(school.city_id.into()).or_default() += 1;
                *province_deltas.entry(school.province_id.into()).or_default() += 1;
            }
        }

        for (city_id, delta) in city_deltas {
            if delta != 0 {
                self.cities
                    .adjust_schools_count(CityId(city_id), delta)
                    .await?;
            }
        }
        for (province_id, delta) in province_deltas {
            if delta != 0 {
                self.provinces
                    .adjust_schools_count(ProvinceId(province_id), delta)
                    .await?;
            }
        }
        Ok(())
    }

    /// Recompute every city's and province's `schools_count` from the live
    /// school rows and overwrite the cached values. Idempotent and safe to
    /// run at any time, including alongside normal traffic.
    pub async fn reconcile_all(&self) -> DomainResult<CounterReconciliation> {
        let mut report = CounterReconciliation::default();

        for city in self.cities.list(None, true).await? {
            let count = self.schools.count_by_city(city.id, true).await?;
            self.cities.set_schools_count(city.id, count).await?;
            report.cities_updated += 1;
        }

        for province in self.provinces.list(true).await? {
            let count = self.schools.count_by_province(province.id, true).await?;
            self.provinces
                .set_schools_count(province.id, count)
                .await?;
            report.provinces_updated += 1;
        }

        Ok(report)
    }
}
