use std::time::Instant;

use tracing::{debug, info, warn};

use crate::{
    config::{CandidatePruning, MiningConfig},
    corpus::Corpus,
    error::Result,
    itemsets::{
        count::{generate_1_itemset_counts, generate_k_itemset_counts, item_mask, CandidateFilter},
        filter::filter_candidates,
    },
    types::{ItemsetCounts, ItemsetLength},
};

/// Output of the level-wise search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mining {
    /// Every frequent itemset, all sizes.
    pub all_frequent: ItemsetCounts,
    /// Frequent itemsets of size 2 and above.
    pub frequent_above_one: ItemsetCounts,
    /// `level_counts[i]` is the number of frequent itemsets of size `i + 1`,
    /// up to and including the empty level that ended the search.
    pub level_counts: Vec<usize>,
    /// The last level whose frequent itemsets are known.
    pub last_level: ItemsetLength,
    /// Set when the time budget stopped the search early.
    pub truncated: bool,
}

impl Mining {
    pub fn len(&self) -> usize {
        self.all_frequent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all_frequent.is_empty()
    }
}

/// Count single items, then run the level-wise search.
pub fn generate_frequent_itemsets<T>(
    corpus: &Corpus<T>,
    config: &MiningConfig,
) -> Result<Mining> {
    config.validate()?;
    let item_counts = generate_1_itemset_counts(corpus.baskets(), config.parallel);
    debug!(candidates = item_counts.len(), "counted 1-itemsets");
    apriori(corpus, item_counts, config)
}

/// Level-wise search from precomputed single-item counts.
///
/// Each level is counted and filtered completely before the time budget is
/// consulted, so a truncated result always holds whole levels.
pub fn apriori<T>(
    corpus: &Corpus<T>,
    item_counts: ItemsetCounts,
    config: &MiningConfig,
) -> Result<Mining> {
    config.validate()?;
    let started = Instant::now();
    let budget = config.time_budget();
    Ok(search_levels(corpus, item_counts, config, || {
        budget.map_or(false, |budget| started.elapsed() >= budget)
    }))
}

/// The level loop. `out_of_time` is asked before every level from 2 on.
fn search_levels<T, F>(
    corpus: &Corpus<T>,
    item_counts: ItemsetCounts,
    config: &MiningConfig,
    mut out_of_time: F,
) -> Mining
where
    F: FnMut() -> bool,
{
    let num_items = corpus.num_items();

    let frequent_1 = filter_candidates(item_counts, config.support);
    info!(level = 1, frequent = frequent_1.len(), "frequent itemsets");

    let mut mining = Mining {
        level_counts: vec![frequent_1.len()],
        last_level: 1,
        ..Mining::default()
    };
    if frequent_1.is_empty() {
        return mining;
    }

    let frequent_1_mask = item_mask(frequent_1.keys(), num_items);
    let mut previous_mask = frequent_1_mask.clone();
    let mut previous_len = frequent_1.len();
    mining.all_frequent = frequent_1;

    let mut size: ItemsetLength = 2;
    loop {
        if out_of_time() {
            warn!(
                last_level = mining.last_level,
                "time budget exhausted, returning partial results"
            );
            mining.truncated = true;
            break;
        }

        // a size-k itemset has k subsets of size k-1, all of them frequent
        if previous_len < size {
            debug!(level = size, "too few frequent itemsets at previous level");
            mining.level_counts.push(0);
            mining.last_level = size;
            break;
        }

        let filter = match config.pruning {
            CandidatePruning::LevelOne => CandidateFilter::new(&frequent_1_mask, None),
            CandidatePruning::PreviousLevel => {
                CandidateFilter::new(&previous_mask, Some(&mining.all_frequent))
            }
        };
        let candidate_counts =
            generate_k_itemset_counts(corpus.baskets(), &filter, size, config.parallel);
        debug!(level = size, candidates = candidate_counts.len(), "counted candidates");

        let frequent_k = filter_candidates(candidate_counts, config.support);
        info!(level = size, frequent = frequent_k.len(), "frequent itemsets");

        mining.level_counts.push(frequent_k.len());
        mining.last_level = size;
        if frequent_k.is_empty() {
            break;
        }

        if config.pruning == CandidatePruning::PreviousLevel {
            previous_mask = item_mask(frequent_k.keys(), num_items);
        }
        previous_len = frequent_k.len();
        mining.frequent_above_one.extend(
            frequent_k
                .iter()
                .map(|(itemset, &count)| (itemset.clone(), count)),
        );
        mining.all_frequent.extend(frequent_k);
        size += 1;
    }

    mining
}
