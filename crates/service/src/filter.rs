//! Text/selector filters shared by the catalog view and the admin board.

use models::{RequestStatus, Service, ServiceRequest};

/// Either everything, or one exact value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector<T> {
    All,
    Exact(T),
}

impl<T> Default for Selector<T> {
    fn default() -> Self { Selector::All }
}

impl<T: PartialEq> Selector<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Selector::All => true,
            Selector::Exact(v) => v == value,
        }
    }
}

pub type CategorySelector = Selector<String>;
pub type StatusSelector = Selector<RequestStatus>;

impl Selector<String> {
    /// `None`, empty and `"all"` select everything; anything else is an exact category.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None => Selector::All,
            Some(s) if s.is_empty() || s == "all" => Selector::All,
            Some(s) => Selector::Exact(s.to_string()),
        }
    }
}

impl Selector<RequestStatus> {
    pub fn parse(raw: Option<&str>) -> Result<Self, models::errors::ModelError> {
        match raw {
            None => Ok(Selector::All),
            Some(s) if s.is_empty() || s == "all" => Ok(Selector::All),
            Some(s) => Ok(Selector::Exact(s.parse()?)),
        }
    }
}

/// Case-insensitive substring test. An empty needle matches anything.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Clone, Debug, Default)]
pub struct CatalogQuery {
    pub text: String,
    pub category: Selector<String>,
    pub popular_only: bool,
}

impl CatalogQuery {
    pub fn matches(&self, service: &Service) -> bool {
        let text_ok = contains_ci(&service.title, &self.text) || contains_ci(&service.description, &self.text);
        text_ok
            && self.category.admits(&service.category)
            && (!self.popular_only || service.is_popular)
    }
}

#[derive(Clone, Debug, Default)]
pub struct RequestQuery {
    pub text: String,
    pub status: Selector<RequestStatus>,
}

impl RequestQuery {
    pub fn matches(&self, req: &ServiceRequest) -> bool {
        let text_ok = contains_ci(&req.customer_name, &self.text)
            || contains_ci(&req.service_title, &self.text)
            || contains_ci(&req.id, &self.text);
        text_ok && self.status.admits(&req.status)
    }
}
