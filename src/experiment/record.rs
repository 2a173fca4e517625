use crate::Bases;
use crate::Time;
use crate::pool::Category;
use crate::pool::Histogram;
use crate::simulation::Counters;
use crate::simulation::Model;
use crate::simulation::Parameters;
use crate::simulation::StartingState;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// everything kept from one finished replicate: the event tallies and
/// one weight histogram per standard category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub counters: Counters,
    pub categories: BTreeMap<Category, Histogram>,
}

impl Record {
    /// harvest a finished model at the given bin size
    pub fn harvest(model: &Model, bin_size: Bases) -> Self {
        Self {
            counters: *model.counters(),
            categories: Category::all()
                .iter()
                .map(|&category| (category, model.pool().histogram(bin_size, category)))
                .collect(),
        }
    }

    pub fn histogram(&self, category: Category) -> Option<&Histogram> {
        self.categories.get(&category)
    }
}

/// the replicate records for one cell of the experiment grid, keyed by
/// its parameter set and starting state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trial {
    pub horizon: Time,
    pub parameters: Parameters,
    pub start: StartingState,
    pub replicates: Vec<Record>,
}

impl Trial {
    /// mean per-bin contig count across replicates for one category
    pub fn mean(&self, category: Category) -> BTreeMap<Bases, f64> {
        let mut table: BTreeMap<Bases, f64> = BTreeMap::new();
        for record in self.replicates.iter() {
            if let Some(hist) = record.histogram(category) {
                for (bin, count) in hist.iter() {
                    *table.entry(bin).or_insert(0.) += count as f64;
                }
            }
        }
        for value in table.values_mut() {
            *value /= self.replicates.len() as f64;
        }
        table
    }
}
