//! # Item Catalog
//!
//! The catalog is the immutable, ordered list of `(profit, weight)` pairs that every
//! chromosome indexes into: bit `j` of a chromosome selects `items[j]`. It is built
//! once, then shared read-only by all workers for the whole run.

use crate::rng::RandomNumberGenerator;

/// A single item that can be placed in the sack.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub profit: i64,
    pub weight: i64,
}

impl Item {
    pub fn new(profit: i64, weight: i64) -> Self {
        Self { profit, weight }
    }
}

/// An ordered, immutable sequence of items.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Builds a catalog from `(profit, weight)` pairs.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        Self {
            items: pairs
                .into_iter()
                .map(|(profit, weight)| Item::new(profit, weight))
                .collect(),
        }
    }

    /// Generates `len` items with profits in `[1, max_profit]` and weights in
    /// `[1, max_weight]`.
    ///
    /// # Panics
    ///
    /// Panics if `max_profit` or `max_weight` is below 1 while `len > 0`.
    pub fn random(
        len: usize,
        max_profit: i64,
        max_weight: i64,
        rng: &mut RandomNumberGenerator,
    ) -> Self {
        let profits = rng.fetch_uniform(1, max_profit + 1, len);
        let weights = rng.fetch_uniform(1, max_weight + 1, len);
        Self::from_pairs(profits.into_iter().zip(weights))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Sum of all item weights; a capacity at or above this admits every subset.
    pub fn total_weight(&self) -> i64 {
        self.items.iter().map(|item| item.weight).sum()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs_preserves_order() {
        let catalog = Catalog::from_pairs(vec![(3, 1), (5, 2), (7, 4)]);
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get(1), Some(&Item::new(5, 2)));
        assert_eq!(catalog.total_weight(), 7);
    }

    #[test]
    fn test_random_is_reproducible() {
        let mut rng1 = RandomNumberGenerator::from_seed(11);
        let mut rng2 = RandomNumberGenerator::from_seed(11);
        let a = Catalog::random(20, 50, 30, &mut rng1);
        let b = Catalog::random(20, 50, 30, &mut rng2);

        assert_eq!(a, b);
        assert!(a
            .iter()
            .all(|item| (1..=50).contains(&item.profit) && (1..=30).contains(&item.weight)));
    }
}
