//! Level-wise frequent itemset search.
//!
//! Single items are counted in one pass over the corpus. Every further level
//! k enumerates, per basket, the k-combinations of that basket's frequent
//! items, counts them, and keeps those above the support threshold. The
//! search ends at the first level with no frequent itemsets.

pub mod count;
pub mod filter;
pub mod search;

pub use filter::filter_candidates;
pub use search::{apriori, generate_frequent_itemsets, Mining};
