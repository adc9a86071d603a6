//! Text search over a places provider.

use async_trait::async_trait;

use crate::error::ProviderResult;
use crate::types::Coordinates;

/// A search hit as the provider returned it.
///
/// Nothing is guaranteed: conversion into an
/// [`Entity`](crate::types::Entity) checks that an id, a name and a valid
/// location are present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPlace {
    pub id: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub location: Option<Coordinates>,
    pub types: Vec<String>,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub phone: Option<String>,
    pub website: Option<String>,
}

impl RawPlace {
    /// A hit with the minimum fields set.
    pub fn new(id: impl Into<String>, name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            location: Some(Coordinates::new(lat, lng)),
            ..Default::default()
        }
    }

    pub fn with_types(mut self, types: &[&str]) -> Self {
        self.types = types.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_review_count(mut self, count: u32) -> Self {
        self.review_count = Some(count);
        self
    }
}

/// Places text search.
///
/// Implementations make exactly one attempt per call; retry policy belongs to
/// the caller.
#[async_trait]
pub trait PlacesSearch: Send + Sync {
    /// Search for `query` around `center`.
    ///
    /// With a `type_filter`, only hits tagged with at least one of the given
    /// place types come back.
    async fn text_search(
        &self,
        query: &str,
        center: Coordinates,
        radius_meters: f64,
        type_filter: Option<&[String]>,
    ) -> ProviderResult<Vec<RawPlace>>;
}
