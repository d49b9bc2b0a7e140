//! The generation loop run by every worker thread.
//!
//! All workers execute the same sequence of phases and derive the same segment
//! bounds from `(id, workers, size, generation)`. Worker 0 additionally runs the
//! serial steps (merge, survivor copy, checkpoints) while the others wait on the
//! barrier.

use tracing::{debug, info};

use super::challenge::Challenge;
use super::phase::{Phase, PhaseCoordinator};
use super::report::{is_checkpoint, Checkpoint, CheckpointSink};
use crate::breeding::{
    copy_segment, crossover_segment, mutate_segment, Mutation, SegmentLayout, WorkerSegments,
};
use crate::fitness::evaluate;
use crate::partition::{tiling, Partition};
use crate::population::{Generations, Roles};
use crate::ranking::{sort_shard, Ranker};

/// What worker 0 hands back to the launcher once the run is over.
#[derive(Debug)]
pub(crate) struct WorkerReport {
    pub roles: Roles,
    pub checkpoints: Vec<Checkpoint>,
}

/// Serial state only worker 0 carries.
struct Leader {
    ranker: Ranker,
    runs: Vec<Partition>,
    checkpoints: Vec<Checkpoint>,
}

pub(crate) struct Worker<'a, C, S>
where
    C: Challenge + Sync,
    S: CheckpointSink + ?Sized,
{
    id: usize,
    workers: usize,
    num_generations: usize,
    generations: &'a Generations,
    coordinator: &'a PhaseCoordinator,
    challenge: &'a C,
    sink: &'a S,
}

impl<'a, C, S> Worker<'a, C, S>
where
    C: Challenge + Sync,
    S: CheckpointSink + ?Sized,
{
    pub fn new(
        id: usize,
        num_generations: usize,
        generations: &'a Generations,
        coordinator: &'a PhaseCoordinator,
        challenge: &'a C,
        sink: &'a S,
    ) -> Self {
        Self {
            id,
            workers: coordinator.workers(),
            num_generations,
            generations,
            coordinator,
            challenge,
            sink,
        }
    }

    /// Runs every generation plus the final ranking pass. Returns a report from
    /// worker 0 only.
    pub fn run(self) -> Option<WorkerReport> {
        let size = self.generations.size();
        let own = Partition::of(self.id, self.workers, size);
        let layout = SegmentLayout::new(size);
        let segments = WorkerSegments::new(&layout, self.id, self.workers);
        let mut roles = Roles::initial();
        let mut leader = (self.id == 0).then(|| Leader {
            ranker: Ranker::with_capacity(size),
            runs: tiling(self.workers, size),
            checkpoints: Vec::new(),
        });

        debug!(worker = self.id, start = own.start, stop = own.stop, "worker started");

        self.seed(own, roles);
        self.coordinator.cross(self.id, 0, Phase::Initialized);

        for generation in 0..self.num_generations {
            self.rank(own, roles, generation, false, leader.as_mut());
            self.breed(&layout, &segments, roles, generation);

            roles.swap();
            self.relabel(own, roles);
            self.coordinator.cross(self.id, generation, Phase::Swapped);
        }

        self.rank(own, roles, self.num_generations, true, leader.as_mut());

        debug!(worker = self.id, "worker finished");
        leader.map(|leader| WorkerReport {
            roles,
            checkpoints: leader.checkpoints,
        })
    }

    /// Gives individual `i` of the first generation exactly item `i`.
    fn seed(&self, own: Partition, roles: Roles) {
        // SAFETY: each worker writes only its own partition before the first barrier.
        let shard = unsafe { self.generations.current(roles).shard_mut(own) };
        for (offset, individual) in shard.iter_mut().enumerate() {
            let index = own.start + offset;
            individual.chromosome.set(index, true);
            individual.original_index = index;
            individual.fitness = 0;
        }
    }

    /// Evaluates, sorts and merges the current generation, then records a
    /// checkpoint when one is due.
    fn rank(
        &self,
        own: Partition,
        roles: Roles,
        generation: usize,
        is_final: bool,
        leader: Option<&mut Leader>,
    ) {
        let current = self.generations.current(roles);

        // SAFETY: evaluation and sorting touch only this worker's partition.
        let shard = unsafe { current.shard_mut(own) };
        evaluate(self.challenge, shard);
        self.coordinator.cross(self.id, generation, Phase::Evaluated);

        sort_shard(shard);
        self.coordinator.cross(self.id, generation, Phase::Sorted);

        if let Some(leader) = leader {
            // SAFETY: between the Sorted and Merged barriers only worker 0 touches
            // the current generation.
            let population = unsafe { current.shard_mut(Partition::new(0, current.len())) };
            leader.ranker.merge_runs(population, &leader.runs);

            if is_final || is_checkpoint(generation) {
                let checkpoint = Checkpoint {
                    generation,
                    best_fitness: population[0].fitness,
                    is_final,
                };
                info!(
                    generation,
                    best_fitness = checkpoint.best_fitness,
                    is_final,
                    "checkpoint"
                );
                self.sink.record(checkpoint);
                leader.checkpoints.push(checkpoint);
            } else {
                debug!(generation, best_fitness = population[0].fitness, "generation ranked");
            }
        }
        self.coordinator.cross(self.id, generation, Phase::Merged);
    }

    /// Writes this worker's slices of the next generation.
    fn breed(
        &self,
        layout: &SegmentLayout,
        segments: &WorkerSegments,
        roles: Roles,
        generation: usize,
    ) {
        let next = self.generations.next(roles);
        // SAFETY: nobody writes the current generation until after the Swapped barrier.
        let parents = unsafe { self.generations.current(roles).view() };

        // SAFETY (all `shard_mut` calls below): each segment is partitioned between
        // workers at its own size, and the segments themselves do not overlap.
        let elite = unsafe { next.shard_mut(segments.elite.offset(layout.elite().start)) };
        copy_segment(parents, segments.elite, elite);

        let mutant_a = unsafe { next.shard_mut(segments.mutants.offset(layout.mutant_a().start)) };
        mutate_segment(parents, segments.mutants, mutant_a, Mutation::Split, generation);

        let mutant_b = unsafe { next.shard_mut(segments.mutants.offset(layout.mutant_b().start)) };
        mutate_segment(
            parents,
            segments.mutants.offset(layout.mutant_len()),
            mutant_b,
            Mutation::Uniform,
            generation,
        );
        self.coordinator.cross(self.id, generation, Phase::MutantsWritten);

        if self.id == 0 {
            if let Some(slot) = layout.survivor_slot() {
                let survivor = unsafe { next.shard_mut(Partition::new(slot, slot + 1)) };
                survivor[0].inherit(&parents[layout.size() - 1]);
            }
        }
        self.coordinator.cross(self.id, generation, Phase::CrossoverPlanned);

        let pairs = WorkerSegments::crossover(layout, self.id, self.workers);
        let children = unsafe { next.shard_mut(pairs.offset(layout.crossover().start)) };
        crossover_segment(parents, pairs, children, generation);
        self.coordinator.cross(self.id, generation, Phase::CrossoverWritten);
    }

    /// Labels every individual of the new current generation with its position.
    fn relabel(&self, own: Partition, roles: Roles) {
        // SAFETY: each worker relabels only its own partition.
        let shard = unsafe { self.generations.current(roles).shard_mut(own) };
        for (offset, individual) in shard.iter_mut().enumerate() {
            individual.original_index = own.start + offset;
        }
    }
}
