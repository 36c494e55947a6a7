//! Cluster catalog and its filter/search/sort view
//!
//! The catalog is static; everything the table shows is derived from a
//! [`ViewState`] value that is replaced wholesale on every interaction.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Deployment status bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Operational,
    Planned,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Operational => "Operational",
            Category::Planned => "Planned",
        }
    }
}

/// Category filter offered by the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Filter buttons, in display order
    pub const ALL: &'static [CategoryFilter] = &[
        CategoryFilter::All,
        CategoryFilter::Only(Category::Operational),
        CategoryFilter::Only(Category::Planned),
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(c) => c.label(),
        }
    }

    pub fn admits(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }
}

/// One cluster entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cluster {
    pub name: &'static str,
    pub operator: &'static str,
    pub location: &'static str,
    pub accelerator_count: &'static str,
    pub hardware: &'static str,
    pub power: &'static str,
    pub networking: &'static str,
    pub status: &'static str,
    pub category: Category,
}

impl Cluster {
    /// Fields free-text search looks at
    pub fn searchable(&self) -> [&'static str; 5] {
        [
            self.name,
            self.operator,
            self.hardware,
            self.location,
            self.networking,
        ]
    }

    fn matches(&self, needle_lower: &str) -> bool {
        self.searchable()
            .iter()
            .any(|field| field.to_lowercase().contains(needle_lower))
    }
}

/// Known large AI training clusters
pub const CLUSTERS: &[Cluster] = &[
    Cluster {
        name: "Colossus",
        operator: "xAI",
        location: "Memphis, TN",
        accelerator_count: "~555,000 GPUs",
        hardware: "H200 + GB200/GB300",
        power: "~2 GW (target)",
        networking: "Spectrum-X Ethernet",
        status: "Operational (Jan 2026)",
        category: Category::Operational,
    },
    Cluster {
        name: "Project Rainier",
        operator: "AWS (for Anthropic)",
        location: "New Carlisle, IN",
        accelerator_count: "~500,000 chips",
        hardware: "Trainium2",
        power: "2.2 GW (site capacity)",
        networking: "Custom AWS fabric",
        status: "Operational (Oct 2025)",
        category: Category::Operational,
    },
    Cluster {
        name: "Meta Cluster Fleet",
        operator: "Meta",
        location: "Multiple US sites",
        accelerator_count: "~1.3M GPUs (fleet)",
        hardware: "H100, H200",
        power: ">1 GW (aggregate)",
        networking: "InfiniBand + RoCE",
        status: "Operational (distributed)",
        category: Category::Operational,
    },
    Cluster {
        name: "Stargate Phase 1",
        operator: "OpenAI / Oracle",
        location: "Abilene, TX",
        accelerator_count: "Not disclosed",
        hardware: "GB200",
        power: "200 MW+ (Phase 1)",
        networking: "Oracle Acceleron RoCE",
        status: "Operational (Sep 2025)",
        category: Category::Operational,
    },
    Cluster {
        name: "El Capitan",
        operator: "LLNL (DOE)",
        location: "Livermore, CA",
        accelerator_count: "44,544 APUs",
        hardware: "AMD MI300A",
        power: "30 MW",
        networking: "HPE Slingshot-11",
        status: "Operational (Jan 2025)",
        category: Category::Operational,
    },
    Cluster {
        name: "Colossus Expansion",
        operator: "xAI",
        location: "Memphis + Southaven, MS",
        accelerator_count: "1,000,000 GPUs",
        hardware: "GB200/GB300",
        power: "2 GW+",
        networking: "Spectrum-X Ethernet",
        status: "Late 2026 (Medium confidence)",
        category: Category::Planned,
    },
    Cluster {
        name: "Meta Prometheus",
        operator: "Meta",
        location: "New Albany, OH",
        accelerator_count: "300,000-500,000 GPUs",
        hardware: "GB200/GB300",
        power: "1+ GW",
        networking: "InfiniBand + RoCE",
        status: "H2 2026 (Medium confidence)",
        category: Category::Planned,
    },
    Cluster {
        name: "Stargate Expansion",
        operator: "OpenAI / Oracle / SoftBank",
        location: "6 US sites",
        accelerator_count: "450,000+ GPUs (Abilene alone)",
        hardware: "GB200/GB300",
        power: "~7 GW (all sites)",
        networking: "Oracle Acceleron RoCE",
        status: "2026-2027 (High confidence)",
        category: Category::Planned,
    },
    Cluster {
        name: "OCI Zettascale10",
        operator: "Oracle",
        location: "Multiple sites",
        accelerator_count: "Up to 800,000 GPUs",
        hardware: "GB200 / MI450",
        power: "Multi-GW",
        networking: "Oracle fabric",
        status: "H2 2026 (Medium confidence)",
        category: Category::Planned,
    },
    Cluster {
        name: "HUMAIN Flagship",
        operator: "HUMAIN (Saudi PIF)",
        location: "Saudi Arabia + US",
        accelerator_count: "Up to 600,000 GPUs",
        hardware: "GB300 + MI450",
        power: "500 MW+ (Phase 1)",
        networking: "Mixed",
        status: "2026-2027 (Medium confidence)",
        category: Category::Planned,
    },
];

/// Sortable column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Name,
    Operator,
    Location,
    Power,
}

impl SortField {
    pub const ALL: &'static [SortField] = &[
        SortField::Name,
        SortField::Operator,
        SortField::Location,
        SortField::Power,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SortField::Name => "Name",
            SortField::Operator => "Operator",
            SortField::Location => "Location",
            SortField::Power => "Power",
        }
    }

    pub fn value<'a>(&self, cluster: &'a Cluster) -> &'a str {
        match self {
            SortField::Name => cluster.name,
            SortField::Operator => cluster.operator,
            SortField::Location => cluster.location,
            SortField::Power => cluster.power,
        }
    }
}

/// User-controlled inputs that fully determine the visible rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub filter: CategoryFilter,
    pub search: String,
    pub sort_field: SortField,
    pub sort_ascending: bool,
    /// Name of the expanded card, at most one
    pub expanded: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            filter: CategoryFilter::All,
            search: String::new(),
            sort_field: SortField::Name,
            sort_ascending: true,
            expanded: None,
        }
    }
}

impl ViewState {
    pub fn with_filter(&self, filter: CategoryFilter) -> Self {
        debug!(?filter, "Cluster filter");
        Self {
            filter,
            ..self.clone()
        }
    }

    pub fn with_search(&self, text: &str) -> Self {
        Self {
            search: text.to_string(),
            ..self.clone()
        }
    }

    /// Same field flips direction; a new field starts ascending.
    pub fn with_sort(&self, field: SortField) -> Self {
        let sort_ascending = if self.sort_field == field {
            !self.sort_ascending
        } else {
            true
        };
        debug!(?field, sort_ascending, "Cluster sort");
        Self {
            sort_field: field,
            sort_ascending,
            ..self.clone()
        }
    }

    /// Expand `name`, or collapse it if it is the expanded one.
    pub fn with_toggled(&self, name: &str) -> Self {
        let expanded = if self.is_expanded(name) {
            None
        } else {
            Some(name.to_string())
        };
        Self {
            expanded,
            ..self.clone()
        }
    }

    pub fn is_expanded(&self, name: &str) -> bool {
        self.expanded.as_deref() == Some(name)
    }

    /// Header glyph for a sort column
    pub fn sort_indicator(&self, field: SortField) -> &'static str {
        if self.sort_field != field {
            "\u{2195}"
        } else if self.sort_ascending {
            "\u{2191}"
        } else {
            "\u{2193}"
        }
    }

    /// Filter, then search, then stable sort.
    pub fn view<'a>(&self, catalog: &'a [Cluster]) -> Vec<&'a Cluster> {
        let needle = self.search.to_lowercase();
        let mut rows: Vec<(String, &'a Cluster)> = catalog
            .iter()
            .filter(|c| self.filter.admits(c.category))
            .filter(|c| needle.is_empty() || c.matches(&needle))
            .map(|c| (self.sort_field.value(c).to_lowercase(), c))
            .collect();

        let ascending = self.sort_ascending;
        rows.sort_by(|a, b| {
            let ord = a.0.cmp(&b.0);
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        });

        rows.into_iter().map(|(_, c)| c).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(rows: &[&Cluster]) -> Vec<&'static str> {
        rows.iter().map(|c| c.name).collect()
    }

    #[test]
    fn test_default_view_sorted_by_name() {
        let rows = ViewState::default().view(CLUSTERS);
        assert_eq!(
            names(&rows),
            vec![
                "Colossus",
                "Colossus Expansion",
                "El Capitan",
                "HUMAIN Flagship",
                "Meta Cluster Fleet",
                "Meta Prometheus",
                "OCI Zettascale10",
                "Project Rainier",
                "Stargate Expansion",
                "Stargate Phase 1",
            ]
        );
    }

    #[test]
    fn test_view_is_pure() {
        let state = ViewState::default()
            .with_filter(CategoryFilter::Only(Category::Planned))
            .with_sort(SortField::Power)
            .with_sort(SortField::Power);
        let snapshot = state.clone();
        let first = state.view(CLUSTERS);
        let second = state.view(CLUSTERS);
        assert_eq!(first, second);
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_filter_by_category() {
        for &category in &[Category::Operational, Category::Planned] {
            let rows = ViewState::default()
                .with_filter(CategoryFilter::Only(category))
                .view(CLUSTERS);
            assert_eq!(rows.len(), 5);
            assert!(rows.iter().all(|c| c.category == category));
        }
        let all = ViewState::default().with_filter(CategoryFilter::All).view(CLUSTERS);
        assert_eq!(all.len(), CLUSTERS.len());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let once = ViewState::default().with_filter(CategoryFilter::Only(Category::Planned));
        let twice = once.with_filter(CategoryFilter::Only(Category::Planned));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let lower = ViewState::default().with_search("meta").view(CLUSTERS);
        let upper = ViewState::default().with_search("META").view(CLUSTERS);
        assert_eq!(names(&lower), vec!["Meta Cluster Fleet", "Meta Prometheus"]);
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_search_covers_location_and_hardware() {
        let rows = ViewState::default().with_search("abilene").view(CLUSTERS);
        assert_eq!(names(&rows), vec!["Stargate Phase 1"]);
        let rows = ViewState::default().with_search("mi300a").view(CLUSTERS);
        assert_eq!(names(&rows), vec!["El Capitan"]);
    }

    #[test]
    fn test_search_ignores_display_only_fields() {
        // Status text is never searched
        let rows = ViewState::default().with_search("confidence").view(CLUSTERS);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let rows = ViewState::default().with_search("").view(CLUSTERS);
        assert_eq!(rows.len(), CLUSTERS.len());
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let rows = ViewState::default().with_search("no such cluster").view(CLUSTERS);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_filter_then_search_spectrum() {
        let rows = ViewState::default()
            .with_filter(CategoryFilter::Only(Category::Operational))
            .with_search("spectrum")
            .view(CLUSTERS);
        assert_eq!(names(&rows), vec!["Colossus"]);
    }

    #[test]
    fn test_filter_then_search_gb200() {
        let state = ViewState::default()
            .with_filter(CategoryFilter::Only(Category::Operational))
            .with_search("GB200");
        let rows = state.view(CLUSTERS);
        let expected: Vec<&Cluster> = CLUSTERS
            .iter()
            .filter(|c| c.category == Category::Operational)
            .filter(|c| c.searchable().iter().any(|f| f.to_lowercase().contains("gb200")))
            .collect();
        assert_eq!(rows.len(), expected.len());
        for c in &expected {
            assert!(rows.contains(c));
        }
        assert_eq!(names(&rows), vec!["Colossus", "Stargate Phase 1"]);
    }

    #[test]
    fn test_sort_new_field_starts_ascending() {
        let state = ViewState::default().with_sort(SortField::Name);
        assert!(!state.sort_ascending);
        let state = state.with_sort(SortField::Location);
        assert_eq!(state.sort_field, SortField::Location);
        assert!(state.sort_ascending);
    }

    #[test]
    fn test_double_toggle_is_identity() {
        let base = ViewState::default().with_sort(SortField::Operator);
        let ascending = base.view(CLUSTERS);
        let toggled = base.with_sort(SortField::Operator).with_sort(SortField::Operator);
        assert!(toggled.sort_ascending);
        assert_eq!(toggled.view(CLUSTERS), ascending);
    }

    #[test]
    fn test_descending_reverses_distinct_keys() {
        let asc = ViewState::default().view(CLUSTERS);
        let desc = ViewState::default().with_sort(SortField::Name).view(CLUSTERS);
        let mut reversed = asc.clone();
        reversed.reverse();
        assert_eq!(desc, reversed);
    }

    #[test]
    fn test_sort_ties_keep_catalog_order() {
        let asc = ViewState::default().with_sort(SortField::Operator);
        let desc = asc.with_sort(SortField::Operator);
        for state in [asc, desc] {
            let rows = names(&state.view(CLUSTERS));
            let pos = |n: &str| rows.iter().position(|r| *r == n).unwrap();
            // Equal operators: catalog order wins in both directions
            assert!(pos("Meta Cluster Fleet") < pos("Meta Prometheus"));
            assert!(pos("Colossus") < pos("Colossus Expansion"));
        }
    }

    #[test]
    fn test_sort_is_case_insensitive() {
        let rows = ViewState::default().with_sort(SortField::Operator).view(CLUSTERS);
        // "xAI" sorts by its lowercase form, after "Oracle"
        let ops: Vec<&str> = rows.iter().map(|c| c.operator).collect();
        let oracle = ops.iter().position(|o| *o == "Oracle").unwrap();
        let xai = ops.iter().position(|o| *o == "xAI").unwrap();
        assert!(oracle < xai);
        assert_eq!(ops[0], "AWS (for Anthropic)");
    }

    #[test]
    fn test_expand_is_single_select() {
        let state = ViewState::default().with_toggled("Colossus");
        assert!(state.is_expanded("Colossus"));
        let state = state.with_toggled("El Capitan");
        assert!(state.is_expanded("El Capitan"));
        assert!(!state.is_expanded("Colossus"));
        let state = state.with_toggled("El Capitan");
        assert_eq!(state.expanded, None);
    }

    #[test]
    fn test_expand_does_not_change_rows() {
        let base = ViewState::default();
        assert_eq!(base.with_toggled("Colossus").view(CLUSTERS), base.view(CLUSTERS));
    }

    #[test]
    fn test_sort_indicator() {
        let state = ViewState::default();
        assert_eq!(state.sort_indicator(SortField::Name), "\u{2191}");
        assert_eq!(state.sort_indicator(SortField::Power), "\u{2195}");
        assert_eq!(state.with_sort(SortField::Name).sort_indicator(SortField::Name), "\u{2193}");
    }
}
