//! Deterministic genetic operators. Each one is driven by the generation index
//! alone, so replaying a generation replays exactly the same edits.

use crate::chromosome::Chromosome;
use crate::individual::Individual;

/// Stride between flipped genes for both mutation operators.
///
/// # Panics
///
/// Panics if `chromosome_len < 3`.
pub fn mutation_step(chromosome_len: usize, generation: usize) -> usize {
    1 + generation % (chromosome_len - 2)
}

/// Cut point for one-point crossover, in `1..=chromosome_len`.
pub fn crossover_point(chromosome_len: usize, generation: usize) -> usize {
    1 + generation % chromosome_len
}

/// The two bit-string mutations used to fill the mutant segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// Flips every `step`-th gene of the first 40% of the chromosome when the
    /// individual's `original_index` is even, or of the last 80% when it is odd.
    Split,
    /// Flips every `step`-th gene across the whole chromosome.
    Uniform,
}

impl Mutation {
    pub fn apply(self, individual: &mut Individual, generation: usize) {
        let len = individual.chromosome.len();
        let step = mutation_step(len, generation);

        match self {
            Mutation::Split if individual.original_index % 2 == 0 => {
                individual.chromosome.flip_every(0, len * 4 / 10, step);
            }
            Mutation::Split => {
                let span = len * 8 / 10;
                individual.chromosome.flip_every(len - span, len, step);
            }
            Mutation::Uniform => individual.chromosome.flip_every(0, len, step),
        }
    }
}

/// One-point crossover of `first` and `second` at `crossover_point(len, generation)`.
///
/// `children.0` gets `first`'s head and `second`'s tail, `children.1` the
/// symmetric complement.
pub fn crossover(
    first: &Chromosome,
    second: &Chromosome,
    children: (&mut Chromosome, &mut Chromosome),
    generation: usize,
) {
    let point = crossover_point(first.len(), generation);
    children.0.splice_from(first, second, point);
    children.1.splice_from(second, first, point);
}
