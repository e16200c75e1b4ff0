use std::collections::BTreeMap;

use super::model::{LaunchDataset, Outcome, SiteFilter};

// ---------------------------------------------------------------------------
// Aggregation over (dataset, selection) – both functions are pure
// ---------------------------------------------------------------------------

/// Count launches per outcome class, optionally restricted to one site.
///
/// Raw counts, no normalisation; the proportion chart scales them itself.
/// A filter that matches no records yields an empty map, which renders as an
/// empty chart rather than an error.
pub fn outcome_counts(dataset: &LaunchDataset, site: &SiteFilter) -> BTreeMap<Outcome, usize> {
    let mut counts = BTreeMap::new();
    for record in &dataset.records {
        if site.matches(&record.site) {
            *counts.entry(record.outcome).or_insert(0) += 1;
        }
    }
    counts
}

/// Return indices of records inside `[low, high]` (inclusive both ends) that
/// also pass the site filter, in original order.
///
/// The two predicates are an order-independent conjunction.  `low <= high` is
/// the caller's obligation; the linked range control maintains it.
pub fn filtered_indices(
    dataset: &LaunchDataset,
    site: &SiteFilter,
    low: f64,
    high: f64,
) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| {
            r.payload_mass_kg >= low && r.payload_mass_kg <= high && site.matches(&r.site)
        })
        .map(|(i, _)| i)
        .collect()
}
