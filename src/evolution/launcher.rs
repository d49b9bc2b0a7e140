use std::thread;

use tracing::{error, info};

use super::options::EvolutionOptions;
use super::phase::PhaseCoordinator;
use super::report::{CheckpointSink, EvolutionResult};
use super::worker::{Worker, WorkerReport};
use crate::{
    catalog::Catalog,
    error::{GeneticError, OptionExt, Result},
    fitness::Knapsack,
    population::Generations,
};

/// Runs the parallel evolutionary loop over a catalog.
#[derive(Debug, Clone, Copy)]
pub struct EvolutionLauncher<'a> {
    catalog: &'a Catalog,
}

impl<'a> EvolutionLauncher<'a> {
    /// Creates a new `EvolutionLauncher` for the given item catalog.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Evolves the population without streaming checkpoints anywhere; they are
    /// still collected in the returned result.
    pub fn evolve(&self, options: &EvolutionOptions) -> Result<EvolutionResult> {
        self.evolve_with_sink(options, &())
    }

    /// Evolves the population for `options.get_num_generations()` generations on
    /// `options.get_num_workers()` threads, passing each checkpoint to `sink` as
    /// soon as it is taken.
    ///
    /// # Returns
    ///
    /// The top-ranked individual of the final generation and every checkpoint.
    ///
    /// # Errors
    ///
    /// This method will return an error if:
    /// - The options fail validation against the catalog (nothing is run)
    /// - A worker thread panicked after crossing its last barrier
    ///
    /// A worker that panics mid-generation never reaches the next barrier, so the
    /// other workers block on it and this method does not return. If a worker
    /// thread cannot be spawned, the workers already started would wait on the
    /// barrier forever in the same way, so the process is terminated instead.
    pub fn evolve_with_sink<S>(
        &self,
        options: &EvolutionOptions,
        sink: &S,
    ) -> Result<EvolutionResult>
    where
        S: CheckpointSink + ?Sized,
    {
        options.validate(self.catalog)?;

        let size = options.get_population_size();
        let workers = options.get_num_workers();
        let num_generations = options.get_num_generations();
        let challenge = Knapsack::new(self.catalog, options.get_sack_capacity());
        let generations = Generations::new(size);
        let coordinator = PhaseCoordinator::new(workers);

        info!(
            population_size = size,
            sack_capacity = options.get_sack_capacity(),
            num_generations,
            workers,
            "starting evolution"
        );

        let report = thread::scope(|s| -> Result<WorkerReport> {
            let mut handles = Vec::with_capacity(workers);
            for id in 0..workers {
                let worker = Worker::new(
                    id,
                    num_generations,
                    &generations,
                    &coordinator,
                    &challenge,
                    sink,
                );
                let spawned = thread::Builder::new()
                    .name(format!("sack-worker-{}", id))
                    .spawn_scoped(s, move || worker.run());

                match spawned {
                    Ok(handle) => handles.push(handle),
                    Err(e) => {
                        let failure = GeneticError::WorkerSpawn(e.to_string());
                        error!(worker = id, error = %failure, "terminating run");
                        std::process::exit(1);
                    }
                }
            }

            let mut leader_report = None;
            for (id, handle) in handles.into_iter().enumerate() {
                match handle.join() {
                    Ok(Some(report)) => leader_report = Some(report),
                    Ok(None) => {}
                    Err(_) => return Err(GeneticError::WorkerJoin { worker: id }),
                }
            }
            leader_report.ok_or_else_genetic(|| {
                GeneticError::Other("Worker 0 finished without a report".to_string())
            })
        })?;

        let best = generations
            .into_current(report.roles)
            .into_iter()
            .next()
            .ok_or_else_genetic(|| GeneticError::EmptyPopulation)?;

        info!(best_fitness = best.fitness, "evolution finished");

        Ok(EvolutionResult {
            best,
            checkpoints: report.checkpoints,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::Checkpoint;
    use std::sync::Mutex;

    #[test]
    fn test_invalid_options_run_nothing() {
        let catalog = Catalog::from_pairs((0..10).map(|_| (1, 1)));
        let options = EvolutionOptions::new(10, 5, 3, 0);
        let sink = Mutex::new(Vec::<Checkpoint>::new());

        let result = EvolutionLauncher::new(&catalog).evolve_with_sink(&options, &sink);

        assert!(matches!(result, Err(GeneticError::Configuration(_))));
        assert!(sink.into_inner().unwrap().is_empty());
    }

    #[test]
    fn test_sink_sees_every_checkpoint() {
        let catalog = Catalog::from_pairs((0..20).map(|i| (i % 7 + 1, i % 5 + 1)));
        let options = EvolutionOptions::new(20, 15, 11, 3);
        let sink = Mutex::new(Vec::<Checkpoint>::new());

        let result = EvolutionLauncher::new(&catalog)
            .evolve_with_sink(&options, &sink)
            .unwrap();

        let streamed = sink.into_inner().unwrap();
        assert_eq!(streamed, result.checkpoints);
        let generations: Vec<usize> = streamed.iter().map(|c| c.generation).collect();
        assert_eq!(generations, vec![0, 5, 10, 11]);
        assert!(streamed.last().unwrap().is_final);
        assert_eq!(streamed.last().unwrap().best_fitness, result.best_fitness());
    }
}
