//! Query-string assembly shared by every call builder.

use std::collections::BTreeMap;

use url::form_urlencoded;

use crate::feature_type::FeatureType;
use crate::types::{LatLng, PriceLevel};

/// Ordered set of query parameters.
///
/// Keys are emitted in sorted order so the same call always encodes to the
/// same string.
#[derive(Debug, Default, Clone)]
pub(crate) struct Query {
    params: BTreeMap<&'static str, String>,
}

impl Query {
    pub(crate) fn new(key: &str) -> Self {
        let mut query = Self::default();
        query.add("key", key);
        query
    }

    pub(crate) fn add(&mut self, name: &'static str, value: impl Into<String>) -> &mut Self {
        self.params.insert(name, value.into());
        self
    }

    /// Adds `value` unless it is absent or empty.
    pub(crate) fn add_text(&mut self, name: &'static str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.add(name, value);
        }
        self
    }

    pub(crate) fn add_price(&mut self, name: &'static str, level: Option<PriceLevel>) -> &mut Self {
        if let Some(level) = level {
            self.add(name, level.as_u8().to_string());
        }
        self
    }

    pub(crate) fn add_flag(&mut self, name: &'static str, set: bool, value: &str) -> &mut Self {
        if set {
            self.add(name, value);
        }
        self
    }

    pub(crate) fn add_location(&mut self, location: LatLng) -> &mut Self {
        self.add("location", format!("{:.6},{:.6}", location.lat, location.lng))
    }

    pub(crate) fn add_radius(&mut self, radius: f64) -> &mut Self {
        self.add("radius", radius.to_string())
    }

    /// Pipe-joined type filter, omitted when empty.
    pub(crate) fn add_types(&mut self, types: &[FeatureType]) -> &mut Self {
        if !types.is_empty() {
            let joined = types
                .iter()
                .map(FeatureType::as_str)
                .collect::<Vec<_>>()
                .join("|");
            self.add("types", joined);
        }
        self
    }

    pub(crate) fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in &self.params {
            serializer.append_pair(name, value);
        }
        serializer.finish()
    }
}

/// `Some` with a non-empty string.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
