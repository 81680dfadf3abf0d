//! Frequent itemsets and association rules for market-basket data.
//!
//! ```
//! use apriori::{mine, Corpus, MiningConfig};
//!
//! let corpus = Corpus::from_baskets(vec![vec!["a", "b"], vec!["a", "b", "c"], vec!["a"]]);
//! let (mining, rules) = mine(&corpus, &MiningConfig::new(1, 0.5)).unwrap();
//!
//! let ab = corpus.itemset(&["a", "b"]).unwrap();
//! assert_eq!(mining.all_frequent[&ab], 2);
//! assert_eq!(rules.len(), 2);
//! ```

pub mod config;
pub mod corpus;
pub mod error;
pub mod itemsets;
pub mod report;
pub mod rules;
pub mod types;

#[cfg(feature = "python")]
mod wrapper;

use tracing::info;

pub use config::{CandidatePruning, MiningConfig};
pub use corpus::Corpus;
pub use error::{Error, Result};
pub use itemsets::{generate_frequent_itemsets, Mining};
pub use rules::{generate_rules, Rule};

/// Mine frequent itemsets, then derive the rules between their subsets.
pub fn mine<T>(corpus: &Corpus<T>, config: &MiningConfig) -> Result<(Mining, Vec<Rule>)> {
    let mining = generate_frequent_itemsets(corpus, config)?;
    info!(
        itemsets = mining.len(),
        levels = mining.last_level,
        "mined frequent itemsets"
    );

    let rules = generate_rules(
        &mining.all_frequent,
        &mining.frequent_above_one,
        config.confidence,
        corpus.len(),
    );
    info!(rules = rules.len(), "derived association rules");

    Ok((mining, rules))
}
