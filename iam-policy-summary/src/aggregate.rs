//! Document-wide aggregation of statement summaries.

use std::collections::BTreeSet;

use crate::summary::StatementSummary;

/// Accumulates the unique actions, resources and principals of a policy.
///
/// Accumulation is order-independent: feeding the same statements in any
/// order, or merging partial aggregators in any grouping, yields the same sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregator {
    pub unique_actions: BTreeSet<String>,
    pub unique_resources: BTreeSet<String>,
    /// Excludes statements without a principal.
    pub principals: BTreeSet<String>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one statement into the running sets.
    pub fn add(&mut self, summary: &StatementSummary) {
        self.unique_actions.extend(summary.actions.iter().cloned());
        self.unique_resources.extend(summary.resources.iter().cloned());
        if let Some(principal) = &summary.principal_summary {
            self.principals.insert(principal.clone());
        }
    }

    /// Union of two partial aggregations.
    pub fn merge(mut self, other: Self) -> Self {
        self.unique_actions.extend(other.unique_actions);
        self.unique_resources.extend(other.unique_resources);
        self.principals.extend(other.principals);
        self
    }
}

impl<'a> FromIterator<&'a StatementSummary> for Aggregator {
    fn from_iter<I: IntoIterator<Item = &'a StatementSummary>>(iter: I) -> Self {
        let mut aggregator = Self::new();
        for summary in iter {
            aggregator.add(summary);
        }
        aggregator
    }
}

/// Aggregate a sequence of statement summaries.
pub fn aggregate<'a>(summaries: impl IntoIterator<Item = &'a StatementSummary>) -> Aggregator {
    summaries.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn stmt(actions: &[&str], resources: &[&str], principal: Option<&str>) -> StatementSummary {
        StatementSummary {
            sid: None,
            effect: "Allow".into(),
            actions: actions.iter().map(|s| (*s).to_string()).collect(),
            resources: resources.iter().map(|s| (*s).to_string()).collect(),
            principal_summary: principal.map(str::to_string),
            has_conditions: false,
        }
    }

    #[test]
    fn test_aggregate_deduplicates() {
        let summaries = vec![
            stmt(&["s3:GetObject", "s3:ListBucket"], &["arn:aws:s3:::a"], Some("*")),
            stmt(&["s3:GetObject"], &["arn:aws:s3:::a", "arn:aws:s3:::b"], Some("*")),
            stmt(&["ec2:DescribeInstances"], &["*"], None),
        ];

        let agg = aggregate(&summaries);

        assert_eq!(
            agg.unique_actions,
            BTreeSet::from([
                "ec2:DescribeInstances".to_string(),
                "s3:GetObject".to_string(),
                "s3:ListBucket".to_string(),
            ])
        );
        assert_eq!(agg.unique_resources.len(), 3);
        assert_eq!(agg.principals, BTreeSet::from(["*".to_string()]));
    }

    #[test]
    fn test_aggregate_empty() {
        let agg = aggregate(&Vec::<StatementSummary>::new());
        assert_eq!(agg, Aggregator::new());
    }

    #[test]
    fn test_statements_without_principal_contribute_nothing() {
        let agg = aggregate(&[stmt(&[], &[], None), stmt(&[], &[], None)]);
        assert!(agg.principals.is_empty());
    }

    fn arb_statement() -> impl Strategy<Value = StatementSummary> {
        (
            prop::collection::vec("[a-c]{1,2}:[A-C]", 0..4),
            prop::collection::vec("arn:[a-c]", 0..4),
            prop::option::of("[*a-b]"),
        )
            .prop_map(|(actions, resources, principal)| StatementSummary {
                sid: None,
                effect: "Allow".into(),
                actions,
                resources,
                principal_summary: principal,
                has_conditions: false,
            })
    }

    proptest! {
        #[test]
        fn prop_aggregation_is_order_independent(
            summaries in prop::collection::vec(arb_statement(), 0..8)
        ) {
            let forward = aggregate(&summaries);
            let backward = aggregate(summaries.iter().rev());
            prop_assert_eq!(forward, backward);
        }

        #[test]
        fn prop_merge_matches_single_pass(
            summaries in prop::collection::vec(arb_statement(), 0..8),
            split in 0usize..8,
        ) {
            let split = split.min(summaries.len());
            let (left, right) = summaries.split_at(split);
            let merged = aggregate(right).merge(aggregate(left));
            prop_assert_eq!(merged, aggregate(&summaries));
        }

        #[test]
        fn prop_sets_cover_every_statement(
            summaries in prop::collection::vec(arb_statement(), 0..8)
        ) {
            let agg = aggregate(&summaries);
            for s in &summaries {
                prop_assert!(s.actions.iter().all(|a| agg.unique_actions.contains(a)));
                prop_assert!(s.resources.iter().all(|r| agg.unique_resources.contains(r)));
                if let Some(p) = &s.principal_summary {
                    prop_assert!(agg.principals.contains(p));
                }
            }
        }
    }
}
