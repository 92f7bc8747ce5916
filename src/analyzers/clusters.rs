use std::collections::BTreeMap;

use crate::analyzers::types::{ClusterProportion, ClusterShare};
use crate::dataset::{CLUSTER, Dataset};

/// Share of records per cluster label, ascending by label.
///
/// Never fails: a dataset without a `cluster` column yields
/// [`ClusterProportion::Unavailable`], and an empty one yields an empty list.
pub fn cluster_proportion(dataset: &Dataset) -> ClusterProportion {
    if !dataset.has_column(CLUSTER) {
        return ClusterProportion::Unavailable;
    }

    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for cluster in dataset.records().iter().filter_map(|r| r.cluster) {
        *counts.entry(cluster).or_default() += 1;
    }

    let total = dataset.len();
    let shares = counts
        .into_iter()
        .map(|(cluster, count)| ClusterShare {
            cluster,
            count,
            fraction: count as f64 / total as f64,
        })
        .collect();

    ClusterProportion::Available(shares)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_without_column() {
        let ds = Dataset::from_reader("price\n10\n".as_bytes()).unwrap();
        assert_eq!(cluster_proportion(&ds), ClusterProportion::Unavailable);

        let empty = Dataset::default();
        assert_eq!(cluster_proportion(&empty), ClusterProportion::Unavailable);
    }

    #[test]
    fn test_empty_with_column() {
        let ds = Dataset::from_reader("price,cluster\n".as_bytes()).unwrap();
        assert_eq!(cluster_proportion(&ds), ClusterProportion::Available(vec![]));
    }

    #[test]
    fn test_fractions_sorted_and_sum_to_one() {
        let ds = Dataset::from_reader("cluster\n3\n0\n1\n0\n3\n3\n2\n".as_bytes()).unwrap();

        let proportion = cluster_proportion(&ds);
        let shares = proportion.shares().unwrap();

        let ids: Vec<u32> = shares.iter().map(|s| s.cluster).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(shares[3].count, 3);

        let total: f64 = shares.iter().map(|s| s.fraction).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }
}
