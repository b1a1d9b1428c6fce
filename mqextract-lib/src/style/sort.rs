use crate::style::owned_css::MediaGroup;
use clap::ValueEnum;
use serde::Deserialize;
use std::cmp::Ordering;

/// How media groups are ordered in the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortPolicy {
    /// Ascending by the first numeric literal; groups without one come first.
    #[default]
    Ascending,
    /// Groups that are not `min-width` queries first, in discovery order,
    /// then the `min-width` groups ascending.
    MinWidthLast,
}

/// Reorder groups for output. Both policies are stable, so groups that
/// compare equal keep their discovery order.
pub fn sort(groups: &mut [MediaGroup], policy: SortPolicy) {
    match policy {
        SortPolicy::Ascending => groups.sort_by(|a, b| compare_values(a.sort_value, b.sort_value)),
        SortPolicy::MinWidthLast => {
            groups.sort_by_key(is_min_width);
            let split = groups.partition_point(|group| !is_min_width(group));
            groups[split..].sort_by(|a, b| compare_values(a.sort_value, b.sort_value));
        }
    }
}

fn is_min_width(group: &MediaGroup) -> bool {
    group.condition.to_ascii_lowercase().contains("min-width")
}

fn compare_values(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.total_cmp(&b),
    }
}
