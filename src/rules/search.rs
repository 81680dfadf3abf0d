use itertools::Itertools;
use rayon::prelude::*;

use crate::{
    rules::rule::Rule,
    types::{ItemId, ItemsetCounts, SupportCount},
};

/// Generate rules based on frequent itemsets.
///
/// Rules come out grouped by itemset, then by antecedent size, then in
/// lexicographic order of the antecedent. Only rules whose confidence is
/// strictly greater than `min_conf` are kept.
pub fn generate_rules(
    all_frequent: &ItemsetCounts,
    frequent_above_one: &ItemsetCounts,
    min_conf: f64,
    num_baskets: usize,
) -> Vec<Rule> {
    frequent_above_one
        .par_iter()
        .flat_map_iter(|(itemset, &support)| {
            rules_from_itemset(itemset, support, all_frequent, min_conf, num_baskets)
        })
        .collect()
}

/// Every split of one frequent itemset into antecedent and consequent.
pub fn rules_from_itemset(
    itemset: &[ItemId],
    support: SupportCount,
    all_frequent: &ItemsetCounts,
    min_conf: f64,
    num_baskets: usize,
) -> Vec<Rule> {
    (1..itemset.len())
        .flat_map(|size| itemset.iter().copied().combinations(size))
        .map(|antecedent| Rule::from_split(itemset, antecedent, support, all_frequent, num_baskets))
        .filter(|rule| rule.confidence > min_conf)
        .collect()
}
