use crate::contig::Contig;
use serde::Deserialize;
use serde::Serialize;

/// the standard liveness and topology filters that partition result
/// histograms
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    All,
    Alive,
    Dead,
    AliveLinear,
    AliveCircular,
    DeadLinear,
    DeadCircular,
}

impl Category {
    pub const fn all() -> &'static [Self] {
        &[
            Self::All,
            Self::Alive,
            Self::Dead,
            Self::AliveLinear,
            Self::AliveCircular,
            Self::DeadLinear,
            Self::DeadCircular,
        ]
    }

    pub fn admits(&self, contig: &Contig) -> bool {
        match self {
            Self::All => true,
            Self::Alive => !contig.is_dead(),
            Self::Dead => contig.is_dead(),
            Self::AliveLinear => !contig.is_dead() && contig.is_linear(),
            Self::AliveCircular => !contig.is_dead() && contig.is_circular(),
            Self::DeadLinear => contig.is_dead() && contig.is_linear(),
            Self::DeadCircular => contig.is_dead() && contig.is_circular(),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Alive => write!(f, "alive"),
            Self::Dead => write!(f, "dead"),
            Self::AliveLinear => write!(f, "alive-linear"),
            Self::AliveCircular => write!(f, "alive-circular"),
            Self::DeadLinear => write!(f, "dead-linear"),
            Self::DeadCircular => write!(f, "dead-circular"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partitions_are_disjoint() {
        let mut garbage = Contig::circular(10);
        garbage.set_dead(true);
        for contig in [
            Contig::linear(10),
            Contig::circular(10),
            garbage,
        ] {
            let fine = [
                Category::AliveLinear,
                Category::AliveCircular,
                Category::DeadLinear,
                Category::DeadCircular,
            ];
            assert_eq!(fine.iter().filter(|c| c.admits(&contig)).count(), 1);
            assert!(Category::All.admits(&contig));
            assert!(Category::Alive.admits(&contig) != Category::Dead.admits(&contig));
        }
    }
}
