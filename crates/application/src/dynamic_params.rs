use std::collections::BTreeMap;

use gridwire_domain::{ParamReference, QueryParam};

/// Runtime query-param values keyed by parameter name.
pub type DynamicValueMap = BTreeMap<String, String>;

/// Session-owned view of runtime-driven query parameter values.
///
/// The map is never persisted, and every operation produces a new value
/// instead of mutating shared state, so snapshots handed to in-flight
/// requests stay stable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DynamicParams {
    values: DynamicValueMap,
}

impl DynamicParams {
    /// Creates an empty dynamic value set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current values.
    #[must_use]
    pub fn values(&self) -> &DynamicValueMap {
        &self.values
    }

    /// Returns whether any runtime value is present.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.values.is_empty()
    }

    /// Maps every enabled query param bound to `reference` to the new value.
    ///
    /// Several params may share a reference; all of them receive the value.
    #[must_use]
    pub fn update_for_reference(
        query_params: &[QueryParam],
        reference: ParamReference,
        value: &str,
    ) -> DynamicValueMap {
        query_params
            .iter()
            .filter(|param| param.enabled && param.reference == reference)
            .map(|param| (param.name.clone(), value.to_owned()))
            .collect()
    }

    /// Returns a copy with `updates` merged in, right-biased.
    ///
    /// The read-merge-write is one synchronous step; callers never observe a
    /// partial merge.
    #[must_use]
    pub fn merged_with(&self, updates: DynamicValueMap) -> Self {
        let mut values = self.values.clone();
        values.extend(updates);
        Self { values }
    }

    /// Returns the state after a page change.
    #[must_use]
    pub fn with_page(&self, query_params: &[QueryParam], page: u64) -> Self {
        self.merged_with(Self::update_for_reference(
            query_params,
            ParamReference::PageChange,
            page.to_string().as_str(),
        ))
    }

    /// Returns the state after a page-size change.
    #[must_use]
    pub fn with_page_size(&self, query_params: &[QueryParam], page_size: u64) -> Self {
        self.merged_with(Self::update_for_reference(
            query_params,
            ParamReference::PageSizeChange,
            page_size.to_string().as_str(),
        ))
    }

    /// Returns the state after a sort-field change.
    #[must_use]
    pub fn with_sort_field(&self, query_params: &[QueryParam], field: &str) -> Self {
        self.merged_with(Self::update_for_reference(
            query_params,
            ParamReference::SortField,
            field,
        ))
    }

    /// Returns the state after a sort-order change.
    #[must_use]
    pub fn with_sort_order(&self, query_params: &[QueryParam], order: &str) -> Self {
        self.merged_with(Self::update_for_reference(
            query_params,
            ParamReference::SortOrder,
            order,
        ))
    }

    /// Discards runtime overrides and repopulates from the statically
    /// configured values of enabled params.
    #[must_use]
    pub fn reset_from(query_params: &[QueryParam]) -> Self {
        let values = query_params
            .iter()
            .filter(|param| param.enabled)
            .map(|param| (param.name.clone(), param.value.clone()))
            .collect();

        Self { values }
    }
}
