//! The transaction corpus: baskets of interned item ids.

use std::{
    collections::{BTreeSet, HashMap},
    fs::File,
    hash::Hash,
    io::{self, BufRead, BufReader},
    path::Path,
};

use crate::{
    error::{Error, Result},
    types::{Basket, ItemId, Itemset},
};

/// An immutable collection of baskets.
///
/// Items are interned in ascending item order, so that ordering itemsets by
/// id is the same as ordering them by the items they stand for.
#[derive(Debug, Clone)]
pub struct Corpus<T = String> {
    baskets: Vec<Basket>,
    inventory: Vec<T>,
    reverse_lookup: HashMap<T, ItemId>,
}

impl<T> Corpus<T> {
    pub fn baskets(&self) -> &[Basket] {
        &self.baskets
    }

    /// Number of baskets, empty ones included.
    pub fn len(&self) -> usize {
        self.baskets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.baskets.is_empty()
    }

    /// Number of distinct items.
    pub fn num_items(&self) -> usize {
        self.inventory.len()
    }

    /// Map ids back to items. Panics on an id this corpus never issued.
    pub fn resolve(&self, itemset: &[ItemId]) -> Vec<&T> {
        itemset.iter().map(|&id| &self.inventory[id]).collect()
    }
}

impl<T: Ord + Hash + Clone> Corpus<T> {
    /// Build a corpus from raw baskets. Repeated items within a basket
    /// collapse, and empty baskets are kept.
    pub fn from_baskets<I, B>(raw_baskets: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: IntoIterator<Item = T>,
    {
        let raw_baskets: Vec<BTreeSet<T>> = raw_baskets
            .into_iter()
            .map(|basket| basket.into_iter().collect())
            .collect();

        let inventory: Vec<T> = raw_baskets
            .iter()
            .flatten()
            .cloned()
            .collect::<BTreeSet<T>>()
            .into_iter()
            .collect();
        let reverse_lookup: HashMap<T, ItemId> = inventory
            .iter()
            .cloned()
            .enumerate()
            .map(|(id, item)| (item, id))
            .collect();

        let baskets = raw_baskets
            .iter()
            .map(|basket| basket.iter().map(|item| reverse_lookup[item]).collect())
            .collect();

        Self {
            baskets,
            inventory,
            reverse_lookup,
        }
    }

    pub fn id_of(&self, item: &T) -> Option<ItemId> {
        self.reverse_lookup.get(item).copied()
    }

    /// The canonical itemset for a group of items, or `None` if any item
    /// never occurs in the corpus.
    pub fn itemset<'a, I>(&self, items: I) -> Option<Itemset>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut itemset = items
            .into_iter()
            .map(|item| self.id_of(item))
            .collect::<Option<Itemset>>()?;
        itemset.sort_unstable();
        itemset.dedup();
        Some(itemset)
    }
}

impl Corpus<String> {
    /// Read one basket per line, items separated by whitespace. A blank line
    /// is an empty basket.
    pub fn parse<R: BufRead>(reader: R) -> io::Result<Self> {
        let raw_baskets = reader
            .lines()
            .map(|line| {
                line.map(|line| {
                    line.split_whitespace()
                        .map(str::to_owned)
                        .collect::<Vec<String>>()
                })
            })
            .collect::<io::Result<Vec<_>>>()?;
        Ok(Self::from_baskets(raw_baskets))
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let io_error = |source| Error::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(io_error)?;
        Self::parse(BufReader::new(file)).map_err(io_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_item_order() {
        let corpus = Corpus::from_baskets(vec![vec!["milk", "bread"], vec!["apple"]]);

        assert_eq!(corpus.id_of(&"apple"), Some(0));
        assert_eq!(corpus.id_of(&"bread"), Some(1));
        assert_eq!(corpus.id_of(&"milk"), Some(2));
        assert_eq!(corpus.baskets(), &[vec![1, 2], vec![0]]);
    }

    #[test]
    fn duplicate_items_collapse() {
        let corpus = Corpus::from_baskets(vec![vec!["a", "a", "b"]]);
        assert_eq!(corpus.baskets(), &[vec![0, 1]]);
        assert_eq!(corpus.num_items(), 2);
    }

    #[test]
    fn empty_baskets_are_kept() {
        let corpus = Corpus::from_baskets(vec![vec![], vec!["x"]]);
        assert_eq!(corpus.len(), 2);
        assert!(corpus.baskets()[0].is_empty());
    }

    #[test]
    fn itemset_is_canonical() {
        let corpus = Corpus::from_baskets(vec![vec!["c", "b", "a"]]);
        assert_eq!(corpus.itemset(&["c", "a"]), Some(vec![0, 2]));
        assert_eq!(corpus.itemset(&["a", "z"]), None);
    }

    #[test]
    fn resolve_maps_back_to_items() {
        let corpus = Corpus::from_baskets(vec![vec![30, 10, 20]]);
        assert_eq!(corpus.resolve(&[0, 2]), vec![&10, &30]);
    }

    #[test]
    fn parse_dat_lines() {
        let input = "10 20 30\n\n20  10 10\n";
        let corpus = Corpus::parse(input.as_bytes()).unwrap();

        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.num_items(), 3);
        assert!(corpus.baskets()[1].is_empty());
        assert_eq!(
            corpus.resolve(&corpus.baskets()[2]),
            vec![&"10".to_owned(), &"20".to_owned()]
        );
    }

    #[test]
    fn open_missing_file_reports_path() {
        let err = Corpus::open("/definitely/not/here.dat").unwrap_err();
        match err {
            Error::Io { path, .. } => assert_eq!(path, Path::new("/definitely/not/here.dat")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
