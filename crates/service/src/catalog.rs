//! Read-only service catalog.

use std::{collections::HashMap, path::Path};

use models::{service::parse_services, Service};

use crate::{errors::ServiceError, filter::CatalogQuery, storage::json_table::load_table};

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// Ordered, immutable set of services with an id index built at load time.
#[derive(Debug, Clone)]
pub struct Catalog {
    services: Vec<Service>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Validate every record and reject duplicate ids.
    pub fn new(services: Vec<Service>) -> Result<Self, ServiceError> {
        let mut index = HashMap::with_capacity(services.len());
        for (pos, service) in services.iter().enumerate() {
            service.validate()?;
            if index.insert(service.id.clone(), pos).is_some() {
                return Err(ServiceError::Validation(format!("duplicate service id: {}", service.id)));
            }
        }
        Ok(Self { services, index })
    }

    /// The table compiled into the binary.
    pub fn builtin() -> Result<Self, ServiceError> {
        Self::new(parse_services(BUILTIN_CATALOG)?)
    }

    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ServiceError> {
        Self::new(load_table(path).await?)
    }

    pub fn services(&self) -> &[Service] { &self.services }

    pub fn len(&self) -> usize { self.services.len() }

    pub fn is_empty(&self) -> bool { self.services.is_empty() }

    pub fn get(&self, id: &str) -> Option<&Service> {
        self.index.get(id).map(|&pos| &self.services[pos])
    }

    pub fn lookup(&self, id: &str) -> Result<&Service, ServiceError> {
        self.get(id).ok_or_else(|| ServiceError::not_found("service"))
    }

    /// Matching services in catalog order. No ranking.
    pub fn filter(&self, query: &CatalogQuery) -> Vec<&Service> {
        self.services.iter().filter(|s| query.matches(s)).collect()
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for s in &self.services {
            if !seen.contains(&s.category.as_str()) {
                seen.push(&s.category);
            }
        }
        seen
    }
}
