use std::fmt::{Display, Formatter, Result};

use serde::Serialize;

use crate::types::{ItemId, Itemset, ItemsetCounts, SupportCount};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    pub antecedent: Itemset,
    pub consequent: Itemset,
    /// Support count of antecedent and consequent together.
    pub support: SupportCount,
    pub confidence: f64,
    pub lift: f64,
}

impl Rule {
    /// Split a frequent itemset into `antecedent` and the remaining items.
    ///
    /// `antecedent` must be a sorted, non-empty proper subset of `itemset`.
    /// Both sides are looked up in `all_frequent`; a missing entry means the
    /// frequent itemsets were not closed under subsets and panics.
    pub fn from_split(
        itemset: &[ItemId],
        antecedent: Itemset,
        support: SupportCount,
        all_frequent: &ItemsetCounts,
        num_baskets: usize,
    ) -> Self {
        let consequent: Itemset = itemset
            .iter()
            .copied()
            .filter(|item| antecedent.binary_search(item).is_err())
            .collect();
        debug_assert!(!antecedent.is_empty() && !consequent.is_empty());

        let antecedent_support = support_of(all_frequent, &antecedent) as f64;
        let consequent_support = support_of(all_frequent, &consequent) as f64;
        let union_support = support as f64;

        Self {
            confidence: union_support / antecedent_support,
            lift: union_support * num_baskets as f64 / (antecedent_support * consequent_support),
            antecedent,
            consequent,
            support,
        }
    }

    pub fn get_antecedent(&self) -> &[ItemId] {
        &self.antecedent
    }

    pub fn get_consequent(&self) -> &[ItemId] {
        &self.consequent
    }
}

fn support_of(all_frequent: &ItemsetCounts, itemset: &[ItemId]) -> SupportCount {
    match all_frequent.get(itemset) {
        Some(&count) => count,
        None => panic!("{itemset:?} is a subset of a frequent itemset but was never counted"),
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{:?} => {:?}", self.antecedent, self.consequent)
    }
}
