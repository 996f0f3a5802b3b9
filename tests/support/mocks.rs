// tests/support/mocks.rs
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use autoescuelas_core::application::dto::search::SearchProjection;
use autoescuelas_core::application::error::{ApplicationError, ApplicationResult};
use autoescuelas_core::application::ports::{Clock, ImageStore, SearchIndexWriter, StoredImage};
use autoescuelas_core::domain::article::{
    Article, ArticleId, ArticleRepository, ArticleUpdate, NewArticle,
};
use autoescuelas_core::domain::city::{City, CityId, CityRepository, CityUpdate, NewCity};
use autoescuelas_core::domain::contact::{
    Contact, ContactId, ContactRepository, ContactStatus, NewContact,
};
use autoescuelas_core::domain::errors::{DomainError, DomainResult};
use autoescuelas_core::domain::province::{
    NewProvince, Province, ProvinceId, ProvinceRepository, ProvinceUpdate,
};
use autoescuelas_core::domain::school::{
    NewSchool, School, SchoolFilter, SchoolId, SchoolRepository, SchoolUpdate, SchoolView,
};
use autoescuelas_core::domain::slug::{Slug, SlugProbe, SlugScope};

/// Single in-memory backing store shared by every mock repository, so the
/// school view joins and counter behaviour work like they do over Postgres.
#[derive(Default)]
pub struct MemStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    provinces: BTreeMap<i64, Province>,
    cities: BTreeMap<i64, City>,
    schools: BTreeMap<i64, School>,
    contacts: BTreeMap<i64, Contact>,
    articles: BTreeMap<i64, Article>,
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

impl MemStore {
    pub fn province_count(&self, id: ProvinceId) -> i64 {
        self.inner.lock().unwrap().provinces[&i64::from(id)].schools_count
    }

    pub fn city_count(&self, id: CityId) -> i64 {
        self.inner.lock().unwrap().cities[&i64::from(id)].schools_count
    }

    /// Corrupt a cached counter directly, bypassing the repositories.
    pub fn poison_city_count(&self, id: CityId, value: i64) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(city) = inner.cities.get_mut(&i64::from(id)) {
            city.schools_count = value;
        }
    }

    pub fn poison_province_count(&self, id: ProvinceId, value: i64) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(province) = inner.provinces.get_mut(&i64::from(id)) {
            province.schools_count = value;
        }
    }
}

fn view_of(inner: &Inner, school: &School) -> DomainResult<SchoolView> {
    let city = inner
        .cities
        .get(&i64::from(school.city_id))
        .ok_or_else(|| DomainError::Persistence("dangling city reference".into()))?;
    let province = inner
        .provinces
        .get(&i64::from(school.province_id))
        .ok_or_else(|| DomainError::Persistence("dangling province reference".into()))?;
    Ok(SchoolView {
        school: school.clone(),
        city_name: city.name.as_str().to_string(),
        city_slug: city.slug.as_str().to_string(),
        province_name: province.name.as_str().to_string(),
        province_slug: province.slug.as_str().to_string(),
    })
}

fn matches_filter(inner: &Inner, school: &School, filter: &SchoolFilter) -> bool {
    if filter.only_active && !school.is_active {
        return false;
    }
    if let Some(province_slug) = &filter.province_slug {
        match inner.provinces.get(&i64::from(school.province_id)) {
            Some(province) if province.slug.as_str() == province_slug => {}
            _ => return false,
        }
    }
    if let Some(city_slug) = &filter.city_slug {
        match inner.cities.get(&i64::from(school.city_id)) {
            Some(city) if city.slug.as_str() == city_slug => {}
            _ => return false,
        }
    }
    if let Some(verified) = filter.verified {
        if school.is_verified != verified {
            return false;
        }
    }
    if let Some(featured) = filter.featured {
        if school.is_featured != featured {
            return false;
        }
    }
    if let Some(service) = &filter.service {
        if !school.services.iter().any(|s| s == service) {
            return false;
        }
    }
    if let Some(query) = &filter.name_query {
        if !school
            .name
            .as_str()
            .to_lowercase()
            .contains(&query.to_lowercase())
        {
            return false;
        }
    }
    true
}

fn listing_order(a: &School, b: &School) -> std::cmp::Ordering {
    b.is_featured
        .cmp(&a.is_featured)
        .then(a.sort_order.cmp(&b.sort_order))
        .then(b.created_at.cmp(&a.created_at))
        .then(b.id.0.cmp(&a.id.0))
}

// ---------------------------------------------------------------------------
// provinces

pub struct MemProvinceRepo(pub Arc<MemStore>);

#[async_trait]
impl SlugProbe for MemProvinceRepo {
    async fn slug_taken(
        &self,
        candidate: &str,
        _scope: SlugScope,
        exclude_id: Option<i64>,
    ) -> DomainResult<bool> {
        let inner = self.0.inner.lock().unwrap();
        Ok(inner
            .provinces
            .values()
            .any(|p| p.slug.as_str() == candidate && Some(i64::from(p.id)) != exclude_id))
    }
}

#[async_trait]
impl ProvinceRepository for MemProvinceRepo {
    async fn insert(&self, province: NewProvince) -> DomainResult<Province> {
        let mut inner = self.0.inner.lock().unwrap();
        if inner
            .provinces
            .values()
            .any(|p| p.slug == province.slug)
        {
            return Err(DomainError::Conflict("slug already exists".into()));
        }
        let id = inner.next_id();
        let created = Province {
            id: ProvinceId(id),
            name: province.name,
            slug: province.slug,
            description: province.description,
            image_url: province.image_url,
            schools_count: 0,
            is_active: province.is_active,
            sort_order: province.sort_order,
            created_at: province.created_at,
            updated_at: province.updated_at,
        };
        inner.provinces.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, update: ProvinceUpdate) -> DomainResult<Province> {
        let mut inner = self.0.inner.lock().unwrap();
        let province = inner
            .provinces
            .get_mut(&i64::from(update.id))
            .ok_or_else(|| DomainError::NotFound("province not found".into()))?;
        if let Some(name) = update.name {
            province.name = name;
        }
        if let Some(slug) = update.slug {
            province.slug = slug;
        }
        if let Some(description) = update.description {
            province.description = Some(description);
        }
        if let Some(image_url) = update.image_url {
            province.image_url = Some(image_url);
        }
        if let Some(is_active) = update.is_active {
            province.is_active = is_active;
        }
        if let Some(sort_order) = update.sort_order {
            province.sort_order = sort_order;
        }
        province.updated_at = update.updated_at;
        Ok(province.clone())
    }

    async fn delete(&self, id: ProvinceId) -> DomainResult<()> {
        let mut inner = self.0.inner.lock().unwrap();
        inner
            .provinces
            .remove(&i64::from(id))
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound("province not found".into()))
    }

    async fn find_by_id(&self, id: ProvinceId) -> DomainResult<Option<Province>> {
        let inner = self.0.inner.lock().unwrap();
        Ok(inner.provinces.get(&i64::from(id)).cloned())
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Province>> {
        let inner = self.0.inner.lock().unwrap();
        Ok(inner.provinces.values().find(|p| &p.slug == slug).cloned())
    }

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Province>> {
        let inner = self.0.inner.lock().unwrap();
        Ok(inner
            .provinces
            .values()
            .find(|p| p.name.as_str() == name)
            .cloned())
    }

    async fn list(&self, include_inactive: bool) -> DomainResult<Vec<Province>> {
        let inner = self.0.inner.lock().unwrap();
        let mut provinces: Vec<Province> = inner
            .provinces
            .values()
            .filter(|p| include_inactive || p.is_active)
            .cloned()
            .collect();
        provinces.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| a.name.as_str().cmp(b.name.as_str()))
        });
        Ok(provinces)
    }

    async fn adjust_schools_count(&self, id: ProvinceId, delta: i64) -> DomainResult<()> {
        let mut inner = self.0.inner.lock().unwrap();
        if let Some(province) = inner.provinces.get_mut(&i64::from(id)) {
            province.schools_count = (province.schools_count + delta).max(0);
        }
        Ok(())
    }

    async fn set_schools_count(&self, id: ProvinceId, count: i64) -> DomainResult<()> {
        let mut inner = self.0.inner.lock().unwrap();
        if let Some(province) = inner.provinces.get_mut(&i64::from(id)) {
            province.schools_count = count;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// cities

pub struct MemCityRepo(pub Arc<MemStore>);

#[async_trait]
impl SlugProbe for MemCityRepo {
    async fn slug_taken(
        &self,
        candidate: &str,
        scope: SlugScope,
        exclude_id: Option<i64>,
    ) -> DomainResult<bool> {
        let province_id = match scope {
            SlugScope::WithinProvince(id) => i64::from(id),
            SlugScope::Global => {
                return Err(DomainError::Validation(
                    "city slugs are scoped to a province".into(),
                ));
            }
        };
        let inner = self.0.inner.lock().unwrap();
        Ok(inner.cities.values().any(|c| {
            i64::from(c.province_id) == province_id
                && c.slug.as_str() == candidate
                && Some(i64::from(c.id)) != exclude_id
        }))
    }
}

#[async_trait]
impl CityRepository for MemCityRepo {
    async fn insert(&self, city: NewCity) -> DomainResult<City> {
        let mut inner = self.0.inner.lock().unwrap();
        if !inner.provinces.contains_key(&i64::from(city.province_id)) {
            return Err(DomainError::NotFound("province not found".into()));
        }
        if inner
            .cities
            .values()
            .any(|c| c.province_id == city.province_id && c.slug == city.slug)
        {
            return Err(DomainError::Conflict("slug already exists".into()));
        }
        let id = inner.next_id();
        let created = City {
            id: CityId(id),
            province_id: city.province_id,
            name: city.name,
            slug: city.slug,
            schools_count: 0,
            is_active: city.is_active,
            sort_order: city.sort_order,
            created_at: city.created_at,
            updated_at: city.updated_at,
        };
        inner.cities.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, update: CityUpdate) -> DomainResult<City> {
        let mut inner = self.0.inner.lock().unwrap();
        let city = inner
            .cities
            .get_mut(&i64::from(update.id))
            .ok_or_else(|| DomainError::NotFound("city not found".into()))?;
        if let Some(name) = update.name {
            city.name = name;
        }
        if let Some(slug) = update.slug {
            city.slug = slug;
        }
        if let Some(is_active) = update.is_active {
            city.is_active = is_active;
        }
        if let Some(sort_order) = update.sort_order {
            city.sort_order = sort_order;
        }
        city.updated_at = update.updated_at;
        Ok(city.clone())
    }

    async fn delete(&self, id: CityId) -> DomainResult<()> {
        let mut inner = self.0.inner.lock().unwrap();
        inner
            .cities
            .remove(&i64::from(id))
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound("city not found".into()))
    }

    async fn find_by_id(&self, id: CityId) -> DomainResult<Option<City>> {
        let inner = self.0.inner.lock().unwrap();
        Ok(inner.cities.get(&i64::from(id)).cloned())
    }

    async fn find_by_slug(
        &self,
        province_id: ProvinceId,
        slug: &Slug,
    ) -> DomainResult<Option<City>> {
        let inner = self.0.inner.lock().unwrap();
        Ok(inner
            .cities
            .values()
            .find(|c| c.province_id == province_id && &c.slug == slug)
            .cloned())
    }

    async fn find_by_name(
        &self,
        province_id: ProvinceId,
        name: &str,
    ) -> DomainResult<Option<City>> {
        let inner = self.0.inner.lock().unwrap();
        Ok(inner
            .cities
            .values()
            .find(|c| c.province_id == province_id && c.name.as_str() == name)
            .cloned())
    }

    async fn list(
        &self,
        province_id: Option<ProvinceId>,
        include_inactive: bool,
    ) -> DomainResult<Vec<City>> {
        let inner = self.0.inner.lock().unwrap();
        let mut cities: Vec<City> = inner
            .cities
            .values()
            .filter(|c| province_id.map_or(true, |p| c.province_id == p))
            .filter(|c| include_inactive || c.is_active)
            .cloned()
            .collect();
        cities.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| a.name.as_str().cmp(b.name.as_str()))
        });
        Ok(cities)
    }

    async fn adjust_schools_count(&self, id: CityId, delta: i64) -> DomainResult<()> {
        let mut inner = self.0.inner.lock().unwrap();
        if let Some(city) = inner.cities.get_mut(&i64::from(id)) {
            city.schools_count = (city.schools_count + delta).max(0);
        }
        Ok(())
    }

    async fn set_schools_count(&self, id: CityId, count: i64) -> DomainResult<()> {
        let mut inner = self.0.inner.lock().unwrap();
        if let Some(city) = inner.cities.get_mut(&i64::from(id)) {
            city.schools_count = count;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// schools

pub struct MemSchoolRepo(pub Arc<MemStore>);

#[async_trait]
impl SlugProbe for MemSchoolRepo {
    async fn slug_taken(
        &self,
        candidate: &str,
        _scope: SlugScope,
        exclude_id: Option<i64>,
    ) -> DomainResult<bool> {
        let inner = self.0.inner.lock().unwrap();
        Ok(inner
            .schools
            .values()
            .any(|s| s.slug.as_str() == candidate && Some(i64::from(s.id)) != exclude_id))
    }
}

#[async_trait]
impl SchoolRepository for MemSchoolRepo {
    async fn insert(&self, school: NewSchool) -> DomainResult<School> {
        let mut inner = self.0.inner.lock().unwrap();
        if !inner.cities.contains_key(&i64::from(school.city_id)) {
            return Err(DomainError::NotFound("city not found".into()));
        }
        if inner.schools.values().any(|s| s.slug == school.slug) {
            return Err(DomainError::Conflict("slug already exists".into()));
        }
        let id = inner.next_id();
        let created = School {
            id: SchoolId(id),
            name: school.name,
            slug: school.slug,
            city_id: school.city_id,
            province_id: school.province_id,
            rating: school.rating,
            reviews_count: school.reviews_count,
            price_min: school.price_min,
            price_max: school.price_max,
            phone: school.phone,
            email: school.email,
            website: school.website,
            address: school.address,
            services: school.services,
            is_active: school.is_active,
            is_verified: school.is_verified,
            is_featured: school.is_featured,
            sort_order: school.sort_order,
            created_at: school.created_at,
            updated_at: school.updated_at,
        };
        inner.schools.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, update: SchoolUpdate) -> DomainResult<School> {
        let mut inner = self.0.inner.lock().unwrap();
        let school = inner
            .schools
            .get_mut(&i64::from(update.id))
            .ok_or_else(|| DomainError::NotFound("school not found".into()))?;
        if let Some(name) = update.name {
            school.name = name;
        }
        if let Some(slug) = update.slug {
            school.slug = slug;
        }
        if let Some((city_id, province_id)) = update.city_move {
            school.city_id = city_id;
            school.province_id = province_id;
        }
        if let Some(rating) = update.rating {
            school.rating = rating;
        }
        if let Some(reviews_count) = update.reviews_count {
            school.reviews_count = reviews_count;
        }
        if let Some(price_min) = update.price_min {
            school.price_min = Some(price_min);
        }
        if let Some(price_max) = update.price_max {
            school.price_max = Some(price_max);
        }
        if let Some(phone) = update.phone {
            school.phone = Some(phone);
        }
        if let Some(email) = update.email {
            school.email = Some(email);
        }
        if let Some(website) = update.website {
            school.website = Some(website);
        }
        if let Some(address) = update.address {
            school.address = Some(address);
        }
        if let Some(services) = update.services {
            school.services = services;
        }
        if let Some(is_active) = update.is_active {
            school.is_active = is_active;
        }
        if let Some(is_verified) = update.is_verified {
            school.is_verified = is_verified;
        }
        if let Some(is_featured) = update.is_featured {
            school.is_featured = is_featured;
        }
        school.updated_at = update.updated_at;
        Ok(school.clone())
    }

    async fn delete(&self, id: SchoolId) -> DomainResult<()> {
        let mut inner = self.0.inner.lock().unwrap();
        inner
            .schools
            .remove(&i64::from(id))
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound("school not found".into()))
    }

    async fn find_by_id(&self, id: SchoolId) -> DomainResult<Option<School>> {
        let inner = self.0.inner.lock().unwrap();
        Ok(inner.schools.get(&i64::from(id)).cloned())
    }

    async fn find_view_by_id(&self, id: SchoolId) -> DomainResult<Option<SchoolView>> {
        let inner = self.0.inner.lock().unwrap();
        inner
            .schools
            .get(&i64::from(id))
            .map(|school| view_of(&inner, school))
            .transpose()
    }

    async fn find_view_by_slug(&self, slug: &Slug) -> DomainResult<Option<SchoolView>> {
        let inner = self.0.inner.lock().unwrap();
        inner
            .schools
            .values()
            .find(|s| &s.slug == slug)
            .map(|school| view_of(&inner, school))
            .transpose()
    }

    async fn list_views(
        &self,
        filter: &SchoolFilter,
        limit: i64,
        offset: i64,
    ) -> DomainResult<(Vec<SchoolView>, i64)> {
        let inner = self.0.inner.lock().unwrap();
        let mut matched: Vec<&School> = inner
            .schools
            .values()
            .filter(|s| matches_filter(&inner, s, filter))
            .collect();
        matched.sort_by(|a, b| listing_order(a, b));
        let total = matched.len() as i64;

        let offset = usize::try_from(offset).unwrap_or(0);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        let views = matched
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|school| view_of(&inner, school))
            .collect::<DomainResult<Vec<_>>>()?;
        Ok((views, total))
    }

    async fn related_views(
        &self,
        city_id: CityId,
        province_id: ProvinceId,
        exclude: SchoolId,
        limit: i64,
    ) -> DomainResult<Vec<SchoolView>> {
        let inner = self.0.inner.lock().unwrap();
        let mut matched: Vec<&School> = inner
            .schools
            .values()
            .filter(|s| s.is_active && s.id != exclude)
            .filter(|s| s.city_id == city_id || s.province_id == province_id)
            .collect();
        matched.sort_by(|a, b| {
            (b.city_id == city_id)
                .cmp(&(a.city_id == city_id))
                .then_with(|| listing_order(a, b))
        });
        matched
            .into_iter()
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .map(|school| view_of(&inner, school))
            .collect()
    }

    async fn count_by_city(&self, city_id: CityId, active_only: bool) -> DomainResult<i64> {
        let inner = self.0.inner.lock().unwrap();
        Ok(inner
            .schools
            .values()
            .filter(|s| s.city_id == city_id && (!active_only || s.is_active))
            .count() as i64)
    }

    async fn count_by_province(
        &self,
        province_id: ProvinceId,
        active_only: bool,
    ) -> DomainResult<i64> {
        let inner = self.0.inner.lock().unwrap();
        Ok(inner
            .schools
            .values()
            .filter(|s| s.province_id == province_id && (!active_only || s.is_active))
            .count() as i64)
    }
}

// ---------------------------------------------------------------------------
// contacts

pub struct MemContactRepo(pub Arc<MemStore>);

#[async_trait]
impl ContactRepository for MemContactRepo {
    async fn insert(&self, contact: NewContact) -> DomainResult<Contact> {
        let mut inner = self.0.inner.lock().unwrap();
        let id = inner.next_id();
        let created = Contact {
            id: ContactId(id),
            school_id: contact.school_id,
            school_name: contact.school_name,
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
            message: contact.message,
            status: contact.status,
            notes: None,
            created_at: contact.created_at,
            updated_at: contact.updated_at,
        };
        inner.contacts.insert(id, created.clone());
        Ok(created)
    }

    async fn update_status(
        &self,
        id: ContactId,
        status: ContactStatus,
        notes: Option<String>,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<Contact> {
        let mut inner = self.0.inner.lock().unwrap();
        let contact = inner
            .contacts
            .get_mut(&i64::from(id))
            .ok_or_else(|| DomainError::NotFound("contact not found".into()))?;
        contact.status = status;
        if let Some(notes) = notes {
            contact.notes = Some(notes);
        }
        contact.updated_at = updated_at;
        Ok(contact.clone())
    }

    async fn delete(&self, id: ContactId) -> DomainResult<()> {
        let mut inner = self.0.inner.lock().unwrap();
        inner
            .contacts
            .remove(&i64::from(id))
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound("contact not found".into()))
    }

    async fn find_by_id(&self, id: ContactId) -> DomainResult<Option<Contact>> {
        let inner = self.0.inner.lock().unwrap();
        Ok(inner.contacts.get(&i64::from(id)).cloned())
    }

    async fn list(
        &self,
        status: Option<ContactStatus>,
        limit: i64,
        offset: i64,
    ) -> DomainResult<(Vec<Contact>, i64)> {
        let inner = self.0.inner.lock().unwrap();
        let mut matched: Vec<&Contact> = inner
            .contacts
            .values()
            .filter(|c| status.map_or(true, |s| c.status == s))
            .collect();
        matched.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.id.0.cmp(&a.id.0))
        });
        let total = matched.len() as i64;
        let contacts = matched
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(0))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect();
        Ok((contacts, total))
    }
}

// ---------------------------------------------------------------------------
// articles

pub struct MemArticleRepo(pub Arc<MemStore>);

#[async_trait]
impl SlugProbe for MemArticleRepo {
    async fn slug_taken(
        &self,
        candidate: &str,
        _scope: SlugScope,
        exclude_id: Option<i64>,
    ) -> DomainResult<bool> {
        let inner = self.0.inner.lock().unwrap();
        Ok(inner
            .articles
            .values()
            .any(|a| a.slug.as_str() == candidate && Some(i64::from(a.id)) != exclude_id))
    }
}

#[async_trait]
impl ArticleRepository for MemArticleRepo {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let mut inner = self.0.inner.lock().unwrap();
        if inner.articles.values().any(|a| a.slug == article.slug) {
            return Err(DomainError::Conflict("slug already exists".into()));
        }
        let id = inner.next_id();
        let created = Article {
            id: ArticleId(id),
            title: article.title,
            slug: article.slug,
            excerpt: article.excerpt,
            body: article.body,
            cover_image_url: article.cover_image_url,
            published: article.published,
            published_at: article.published_at,
            created_at: article.created_at,
            updated_at: article.updated_at,
        };
        inner.articles.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article> {
        let mut inner = self.0.inner.lock().unwrap();
        let article = inner
            .articles
            .get_mut(&i64::from(update.id))
            .ok_or_else(|| DomainError::NotFound("article not found".into()))?;
        if let Some(title) = update.title {
            article.title = title;
        }
        if let Some(slug) = update.slug {
            article.slug = slug;
        }
        if let Some(excerpt) = update.excerpt {
            article.excerpt = Some(excerpt);
        }
        if let Some(body) = update.body {
            article.body = body;
        }
        if let Some(cover_image_url) = update.cover_image_url {
            article.cover_image_url = Some(cover_image_url);
        }
        if let Some(published) = update.published {
            article.published = published;
        }
        if let Some(published_at) = update.published_at {
            article.published_at = published_at;
        }
        article.updated_at = update.updated_at;
        Ok(article.clone())
    }

    async fn delete(&self, id: ArticleId) -> DomainResult<()> {
        let mut inner = self.0.inner.lock().unwrap();
        inner
            .articles
            .remove(&i64::from(id))
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound("article not found".into()))
    }

    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        let inner = self.0.inner.lock().unwrap();
        Ok(inner.articles.get(&i64::from(id)).cloned())
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Article>> {
        let inner = self.0.inner.lock().unwrap();
        Ok(inner.articles.values().find(|a| &a.slug == slug).cloned())
    }

    async fn list(
        &self,
        include_drafts: bool,
        limit: i64,
        offset: i64,
    ) -> DomainResult<(Vec<Article>, i64)> {
        let inner = self.0.inner.lock().unwrap();
        let mut matched: Vec<&Article> = inner
            .articles
            .values()
            .filter(|a| include_drafts || a.published)
            .collect();
        matched.sort_by(|a, b| {
            b.published_at
                .unwrap_or(b.created_at)
                .cmp(&a.published_at.unwrap_or(a.created_at))
                .then(b.id.0.cmp(&a.id.0))
        });
        let total = matched.len() as i64;
        let articles = matched
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(0))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect();
        Ok((articles, total))
    }
}

// ---------------------------------------------------------------------------
// ports

pub struct FixedClock(pub Mutex<DateTime<Utc>>);

impl FixedClock {
    pub fn new() -> Self {
        Self(Mutex::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()))
    }

    pub fn advance_secs(&self, secs: i64) {
        let mut now = self.0.lock().unwrap();
        *now += chrono::Duration::seconds(secs);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

/// Records every projection it receives; can be flipped into failure mode to
/// exercise the non-fatal reindex path.
#[derive(Default)]
pub struct CapturingSearchWriter {
    pub projections: Mutex<Vec<SearchProjection>>,
    pub fail: AtomicBool,
}

#[async_trait]
impl SearchIndexWriter for CapturingSearchWriter {
    async fn replace_all(&self, projection: &SearchProjection) -> ApplicationResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ApplicationError::infrastructure("search unreachable"));
        }
        self.projections.lock().unwrap().push(projection.clone());
        Ok(())
    }
}

pub struct StubImageStore;

#[async_trait]
impl ImageStore for StubImageStore {
    async fn upload(
        &self,
        _bytes: Vec<u8>,
        filename: &str,
        folder: &str,
    ) -> ApplicationResult<StoredImage> {
        Ok(StoredImage {
            url: format!("https://img.example.test/{folder}/{filename}"),
            public_id: format!("{folder}/{filename}"),
        })
    }
}
