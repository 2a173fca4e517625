use super::record::Record;
use super::record::Trial;
use crate::Bases;
use crate::Seed;
use crate::Time;
use crate::simulation::Model;
use crate::simulation::Parameters;
use crate::simulation::StartingState;
use anyhow::Context;
use anyhow::Result;
use rayon::prelude::*;
use serde::Deserialize;
use serde::Serialize;
use std::hash::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;
use std::path::Path;

/// cartesian-product experiment driver: every parameter set runs against
/// every starting state, replicated with independently seeded models.
/// replicates share nothing and fan out across threads; the aggregation
/// stage only reads the finished records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    seed: Seed,
    replicates: usize,
    bin_size: Bases,
    parameters: Vec<(Time, Parameters)>,
    states: Vec<StartingState>,
    results: Vec<Trial>,
}

impl Experiment {
    pub fn new(seed: Seed) -> Self {
        Self {
            seed,
            replicates: 1,
            bin_size: 1,
            parameters: Vec::new(),
            states: Vec::new(),
            results: Vec::new(),
        }
    }

    pub fn add_parameters(&mut self, horizon: Time, parameters: Parameters) {
        self.parameters.push((horizon, parameters));
    }

    pub fn add_starting_state(&mut self, state: StartingState) {
        self.states.push(state);
    }

    pub fn results(&self) -> &[Trial] {
        &self.results
    }

    pub fn bin_size(&self) -> Bases {
        self.bin_size
    }

    /// run every combination, discarding earlier results. configuration
    /// is validated up front so the parallel replicates cannot fail.
    pub fn run(&mut self, replicates: usize, bin_size: Bases) -> Result<()> {
        assert!(replicates > 0);
        assert!(bin_size > 0);
        self.replicates = replicates;
        self.bin_size = bin_size;
        self.results.clear();
        let grid = self.parameters.clone();
        let states = self.states.clone();
        for (p, &(horizon, parameters)) in grid.iter().enumerate() {
            for (s, &start) in states.iter().enumerate() {
                parameters.validate()?;
                start.validate(parameters.n)?;
                log::info!(
                    "trial {}x{}: t={} n={} x{} replicates",
                    p,
                    s,
                    horizon,
                    parameters.n,
                    replicates
                );
                let seed = self.seed;
                let records = (0..replicates)
                    .into_par_iter()
                    .map(|replicate| {
                        let mut model = Model::new(Self::derive(seed, p, s, replicate));
                        model.set_parameters(parameters).expect("validated parameters");
                        model.set_starting_state(start).expect("validated starting state");
                        model.simulate(horizon);
                        Record::harvest(&model, bin_size)
                    })
                    .collect::<Vec<_>>();
                self.results.push(Trial {
                    horizon,
                    parameters,
                    start,
                    replicates: records,
                });
            }
        }
        Ok(())
    }

    /// independent per-replicate seed, derived by hashing the base seed
    /// with the grid coordinates
    fn derive(seed: Seed, parameters: usize, state: usize, replicate: usize) -> Seed {
        let mut hasher = DefaultHasher::new();
        (seed, parameters, state, replicate).hash(&mut hasher);
        hasher.finish()
    }

    /// persist the whole experiment as a binary blob
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = bincode::serialize(self).context("encode experiment")?;
        std::fs::write(path.as_ref(), bytes)
            .with_context(|| format!("write {}", path.as_ref().display()))
    }

    /// load a previously saved experiment
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())
            .with_context(|| format!("read {}", path.as_ref().display()))?;
        bincode::deserialize(&bytes).context("decode experiment")
    }

    /// human-readable dump of the results
    pub fn json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.results).context("encode results")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Category;

    fn small() -> Experiment {
        let mut experiment = Experiment::new(2012);
        experiment.add_parameters(
            10.,
            Parameters {
                n: 100,
                rll: 0.05,
                rld: 0.01,
                ..Parameters::default()
            },
        );
        experiment.add_starting_state(StartingState { garbage: 10, linear: 4, circular: 2 });
        experiment.add_starting_state(StartingState { garbage: 0, linear: 6, circular: 0 });
        experiment
    }

    #[test]
    fn runs_the_whole_grid() {
        let mut experiment = small();
        experiment.run(3, 10).expect("valid grid");
        assert_eq!(experiment.results().len(), 2);
        for trial in experiment.results() {
            assert_eq!(trial.replicates.len(), 3);
            for record in trial.replicates.iter() {
                let all = record.histogram(Category::All).expect("collected");
                let alive = record.histogram(Category::Alive).expect("collected");
                let dead = record.histogram(Category::Dead).expect("collected");
                assert!(all.total() > 0);
                assert_eq!(all.total(), alive.total() + dead.total());
            }
        }
    }

    #[test]
    fn reruns_are_reproducible() {
        let mut one = small();
        let mut two = small();
        one.run(2, 10).expect("valid grid");
        two.run(2, 10).expect("valid grid");
        assert_eq!(one, two);
    }

    #[test]
    fn bad_grids_are_reported() {
        let mut experiment = Experiment::new(0);
        experiment.add_parameters(1., Parameters { n: 10, rll: 0.1, ..Parameters::default() });
        experiment.add_starting_state(StartingState { garbage: 10, linear: 5, circular: 5 });
        assert!(experiment.run(1, 1).is_err());
    }

    #[test]
    fn save_load_round_trips() {
        let mut experiment = small();
        experiment.run(2, 10).expect("valid grid");
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("experiment.bin");
        experiment.save(&path).expect("save");
        let loaded = Experiment::load(&path).expect("load");
        assert_eq!(experiment, loaded);
        assert_eq!(loaded.bin_size(), 10);
    }

    #[test]
    fn json_dump_is_well_formed() {
        let mut experiment = small();
        experiment.run(1, 10).expect("valid grid");
        let dump = experiment.json().expect("encode");
        assert!(serde_json::from_str::<serde_json::Value>(&dump).is_ok());
    }
}
