use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Outcome – the binary launch class
// ---------------------------------------------------------------------------

/// Launch outcome: class 0 is a failure, class 1 a success.
/// `Ord`/`Hash` so it can key a `BTreeMap` of counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Interpret the dataset's integer `class` column.
    pub fn from_class(class: i64) -> Option<Outcome> {
        match class {
            0 => Some(Outcome::Failure),
            1 => Some(Outcome::Success),
            _ => None,
        }
    }

    /// The integer class this outcome maps back to (0 or 1).
    pub fn class(self) -> i64 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Failure => write!(f, "Failure"),
            Outcome::Success => write!(f, "Success"),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single launch record (one row of the source table).
#[derive(Debug, Clone)]
pub struct LaunchRecord {
    /// Launch-site label, e.g. "CCAFS LC-40".
    pub site: String,
    /// Payload mass in kilograms, non-negative.
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    /// Supplementary columns shown in the records table; absent in minimal
    /// datasets and never consulted by the aggregation functions.
    pub flight_number: Option<u32>,
    pub booster_version: Option<String>,
    pub booster_category: Option<String>,
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with indices derived once at load time.
/// Immutable after construction: nothing mutates `records`.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    /// All records, in file order.
    pub records: Vec<LaunchRecord>,
    /// Sorted unique launch-site labels.
    pub sites: Vec<String>,
    /// Observed (min, max) payload mass; `(0.0, 0.0)` for an empty dataset.
    pub payload_bounds: (f64, f64),
}

impl LaunchDataset {
    /// Build the site index and payload bounds from the loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let sites: BTreeSet<String> = records.iter().map(|r| r.site.clone()).collect();

        let payload_bounds = if records.is_empty() {
            (0.0, 0.0)
        } else {
            records.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), r| {
                (min.min(r.payload_mass_kg), max.max(r.payload_mass_kg))
            })
        };

        LaunchDataset {
            records,
            sites: sites.into_iter().collect(),
            payload_bounds,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// SiteFilter / Selection – the user-controlled inputs
// ---------------------------------------------------------------------------

/// The site selector's value: every site, or exactly one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SiteFilter {
    #[default]
    All,
    Site(String),
}

impl SiteFilter {
    /// Whether a record at `site` passes this filter.  A site label outside
    /// the dataset's known set simply matches nothing.
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteFilter::All => true,
            SiteFilter::Site(s) => s == site,
        }
    }
}

/// The current (site, payload range) pair driving both charts.  Owned by the
/// UI, replaced wholesale on each input event, never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub site: SiteFilter,
    /// Closed interval `[low, high]`; the linked range control keeps
    /// `low <= high`.
    pub payload_range: (f64, f64),
}

impl Selection {
    /// The dashboard's starting selection: all sites, full observed range.
    pub fn full(dataset: &LaunchDataset) -> Self {
        Selection {
            site: SiteFilter::All,
            payload_range: dataset.payload_bounds,
        }
    }
}
