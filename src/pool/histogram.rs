use crate::Bases;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::ops::AddAssign;

/// counts of contigs binned by sampling weight, bin = weight / bin size
/// for the bin size chosen at collection time
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Histogram {
    bins: BTreeMap<Bases, usize>,
}

impl Histogram {
    pub fn witness(self, bin: Bases) -> Self {
        let mut this = self;
        this.bins.entry(bin).or_insert(0).add_assign(1);
        this
    }

    /// absorb the other histogram into this one
    pub fn absorb(&mut self, other: &Self) {
        for (&bin, &count) in other.bins.iter() {
            self.bins.entry(bin).or_insert(0).add_assign(count);
        }
    }

    pub fn count(&self, bin: Bases) -> usize {
        self.bins.get(&bin).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.bins.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Bases, usize)> + '_ {
        self.bins.iter().map(|(&bin, &count)| (bin, count))
    }
}
