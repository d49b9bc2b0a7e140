//! # Chromosome
//!
//! A chromosome is a fixed-length bit string: gene `j` set means item `j` of the
//! catalog goes into the sack. The genetic operators used by the reproduction
//! pipeline are all deterministic functions of the generation index, so the same
//! run always explores the same sequence of candidates.
//!
//! ## Example
//!
//! ```rust
//! use knapsack_evolve::chromosome::Chromosome;
//!
//! let mut genes = Chromosome::zeroed(10);
//! genes.flip(3);
//! genes.flip_every(0, 10, 4);
//!
//! assert_eq!(genes.selected().collect::<Vec<_>>(), vec![0, 3, 4, 8]);
//! assert_eq!(genes.count_selected(), 4);
//! ```

use std::fmt;

/// A fixed-length bit string selecting items from the catalog.
#[derive(Clone, PartialEq, Eq, Default, Hash)]
pub struct Chromosome {
    genes: Vec<bool>,
}

impl Chromosome {
    /// A chromosome of `len` genes with nothing selected.
    pub fn zeroed(len: usize) -> Self {
        Self {
            genes: vec![false; len],
        }
    }

    pub fn from_genes(genes: Vec<bool>) -> Self {
        Self { genes }
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn genes(&self) -> &[bool] {
        &self.genes
    }

    pub fn get(&self, index: usize) -> bool {
        self.genes[index]
    }

    pub fn set(&mut self, index: usize, value: bool) {
        self.genes[index] = value;
    }

    /// Complements a single gene.
    pub fn flip(&mut self, index: usize) {
        self.genes[index] = !self.genes[index];
    }

    /// Complements genes `from, from + step, from + 2*step, ...` below `to`.
    ///
    /// # Panics
    ///
    /// Panics if `step` is zero or `to` exceeds the chromosome length.
    pub fn flip_every(&mut self, from: usize, to: usize, step: usize) {
        for gene in self.genes[from..to].iter_mut().step_by(step) {
            *gene = !*gene;
        }
    }

    /// Number of selected items (the popcount).
    pub fn count_selected(&self) -> usize {
        self.genes.iter().filter(|&&gene| gene).count()
    }

    /// Indices of the selected items, ascending.
    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.genes
            .iter()
            .enumerate()
            .filter_map(|(index, &gene)| gene.then_some(index))
    }

    /// Overwrites this chromosome with `head[..point]` followed by `tail[point..]`.
    ///
    /// # Panics
    ///
    /// Panics if the three chromosomes differ in length or `point` exceeds it.
    pub fn splice_from(&mut self, head: &Chromosome, tail: &Chromosome, point: usize) {
        self.genes[..point].copy_from_slice(&head.genes[..point]);
        self.genes[point..].copy_from_slice(&tail.genes[point..]);
    }
}

impl fmt::Debug for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bits: String = self
            .genes
            .iter()
            .map(|&gene| if gene { '1' } else { '0' })
            .collect();
        write!(f, "Chromosome({})", bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_bits(bits: &str) -> Chromosome {
        Chromosome::from_genes(bits.chars().map(|c| c == '1').collect())
    }

    #[test]
    fn test_flip_every_respects_bounds() {
        let mut genes = Chromosome::zeroed(10);
        genes.flip_every(2, 10, 3);
        assert_eq!(genes, from_bits("0010010010"));
    }

    #[test]
    fn test_flip_every_twice_restores() {
        let original = from_bits("1011001110");
        let mut genes = original.clone();
        genes.flip_every(0, 10, 2);
        assert_ne!(genes, original);
        genes.flip_every(0, 10, 2);
        assert_eq!(genes, original);
    }

    #[test]
    fn test_splice_from() {
        let head = from_bits("1111100000");
        let tail = from_bits("0101010101");
        let mut child = Chromosome::zeroed(10);
        child.splice_from(&head, &tail, 3);
        assert_eq!(child, from_bits("1111010101"));

        // A point equal to the length copies the head verbatim.
        child.splice_from(&head, &tail, 10);
        assert_eq!(child, head);
    }

    #[test]
    fn test_count_and_selected() {
        let genes = from_bits("0110000001");
        assert_eq!(genes.count_selected(), 3);
        assert_eq!(genes.selected().collect::<Vec<_>>(), vec![1, 2, 9]);
        assert_eq!(format!("{:?}", genes), "Chromosome(0110000001)");
    }
}
