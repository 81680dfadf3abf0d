use std::collections::HashMap;

pub type ItemId = usize;
pub type Itemset = Vec<ItemId>;

/// A deduplicated, ascending list of item ids.
pub type Basket = Vec<ItemId>;

pub type SupportCount = u32;
pub type ItemCounts = HashMap<ItemId, SupportCount>;
pub type ItemsetCounts = HashMap<Itemset, SupportCount>;

pub type ItemsetLength = usize;
