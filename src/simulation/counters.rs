use serde::Deserialize;
use serde::Serialize;

/// per-run event tallies, zeroed at the start of every simulate() call.
/// no-op draws (wrong liveness, trivial pool) count nowhere.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    /// neutral live-live rewrites
    pub ll: u64,
    /// telomere gains (stub splits and circle openings)
    pub fg: u64,
    /// telomere losses (circularizations and end-to-end fusions)
    pub fl: u64,
    /// live-dead rewrites that collapsed to a single dead contig
    pub ld_loss: u64,
    /// live-dead rewrites that swapped material across two outputs
    pub ld_swap: u64,
    /// dead-dead fissions that spawned a live piece
    pub dd_gain: u64,
    /// dead-dead rewrites that only shuffled the garbage
    pub dd_swap: u64,
}

impl Counters {
    pub fn total(&self) -> u64 {
        self.ll + self.fg + self.fl + self.ld_loss + self.ld_swap + self.dd_gain + self.dd_swap
    }
}

impl std::fmt::Display for Counters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ll={} fg={} fl={} ld_loss={} ld_swap={} dd_gain={} dd_swap={}",
            self.ll, self.fg, self.fl, self.ld_loss, self.ld_swap, self.dd_gain, self.dd_swap
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_sum_every_field() {
        let counters = Counters {
            ll: 1,
            fg: 2,
            fl: 3,
            ld_loss: 4,
            ld_swap: 5,
            dd_gain: 6,
            dd_swap: 7,
        };
        assert_eq!(counters.total(), 28);
        assert_eq!(Counters::default().total(), 0);
    }
}
