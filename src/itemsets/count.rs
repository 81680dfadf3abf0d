use std::{collections::HashMap, hash::Hash};

use bitvec::prelude::*;
use itertools::Itertools;
use rayon::prelude::*;

use crate::types::{Basket, ItemCounts, ItemId, Itemset, ItemsetCounts, ItemsetLength};

const APPROX_NUM_UNIQUE_ITEMS: usize = 1024; // arbitrary

/// Which items may appear in a candidate, and optionally the previous level
/// every (k-1)-subset of a candidate must be found in.
#[derive(Debug, Clone, Copy)]
pub struct CandidateFilter<'a> {
    allowed: &'a BitSlice,
    previous: Option<&'a ItemsetCounts>,
}

impl<'a> CandidateFilter<'a> {
    pub fn new(allowed: &'a BitSlice, previous: Option<&'a ItemsetCounts>) -> Self {
        Self { allowed, previous }
    }

    fn allows(&self, item: ItemId) -> bool {
        self.allowed.get(item).map_or(false, |bit| *bit)
    }

    fn admits(&self, candidate: &[ItemId]) -> bool {
        let Some(previous) = self.previous else {
            return true;
        };
        let mut subset: Itemset = Vec::with_capacity(candidate.len() - 1);
        (0..candidate.len()).all(|skip| {
            subset.clear();
            subset.extend(
                candidate
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| i != skip)
                    .map(|(_, &item)| item),
            );
            previous.contains_key(&subset)
        })
    }
}

/// Bitmask over `num_items` ids with a bit set for every item in `itemsets`.
pub fn item_mask<'a, I>(itemsets: I, num_items: usize) -> BitVec
where
    I: IntoIterator<Item = &'a Itemset>,
{
    let mut mask = bitvec![0; num_items];
    for &item in itemsets.into_iter().flatten() {
        mask.set(item, true);
    }
    mask
}

/// C_1: every distinct item counted once per basket containing it.
pub fn generate_1_itemset_counts(baskets: &[Basket], parallel: bool) -> ItemsetCounts {
    let item_counts = if parallel {
        baskets
            .par_iter()
            .fold(ItemCounts::new, |mut counts, basket| {
                count_items(&mut counts, basket);
                counts
            })
            .reduce(ItemCounts::new, merge_counts)
    } else {
        let mut counts = HashMap::with_capacity(APPROX_NUM_UNIQUE_ITEMS);
        for basket in baskets {
            count_items(&mut counts, basket);
        }
        counts
    };

    convert_to_itemset_counts(item_counts)
}

/// C_k for k >= 2, counting only combinations of items the filter allows.
pub fn generate_k_itemset_counts(
    baskets: &[Basket],
    filter: &CandidateFilter<'_>,
    size: ItemsetLength,
    parallel: bool,
) -> ItemsetCounts {
    if parallel {
        baskets
            .par_iter()
            .fold(ItemsetCounts::new, |mut counts, basket| {
                count_candidates(&mut counts, basket, filter, size);
                counts
            })
            .reduce(ItemsetCounts::new, merge_counts)
    } else {
        let mut counts = ItemsetCounts::new();
        for basket in baskets {
            count_candidates(&mut counts, basket, filter, size);
        }
        counts
    }
}

fn count_items(counts: &mut ItemCounts, basket: &Basket) {
    for &item in basket {
        *counts.entry(item).or_insert(0) += 1;
    }
}

fn count_candidates(
    counts: &mut ItemsetCounts,
    basket: &Basket,
    filter: &CandidateFilter<'_>,
    size: ItemsetLength,
) {
    // baskets are sorted, so this stays in canonical order
    let frequent_items: Vec<ItemId> = basket
        .iter()
        .copied()
        .filter(|&item| filter.allows(item))
        .collect();
    if frequent_items.len() < size {
        return;
    }

    for candidate in frequent_items.into_iter().combinations(size) {
        if !is_subset(&candidate, basket) || !filter.admits(&candidate) {
            continue;
        }
        *counts.entry(candidate).or_insert(0) += 1;
    }
}

fn is_subset(candidate: &[ItemId], basket: &Basket) -> bool {
    candidate
        .iter()
        .all(|item| basket.binary_search(item).is_ok())
}

fn merge_counts<K: Hash + Eq>(
    mut left: HashMap<K, u32>,
    mut right: HashMap<K, u32>,
) -> HashMap<K, u32> {
    if left.len() < right.len() {
        std::mem::swap(&mut left, &mut right);
    }
    for (key, count) in right {
        *left.entry(key).or_insert(0) += count;
    }
    left
}

fn convert_to_itemset_counts(item_counts: ItemCounts) -> ItemsetCounts {
    item_counts.into_iter().map(|(k, v)| (vec![k], v)).collect()
}
