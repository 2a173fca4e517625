use crate::Bases;
use crate::Probability;
use crate::Rate;
use anyhow::Result;
use anyhow::ensure;
use serde::Deserialize;
use serde::Serialize;

/// the fixed rate parameters of a model run. rates are per base; the
/// queue enrolls each kind at rate * n. fl and fg modulate telomere loss
/// and gain inside live-live events; pgain is the chance a dead-dead
/// fission spawns a live piece.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    pub n: Bases,
    pub rll: Rate,
    pub rld: Rate,
    pub rdd: Rate,
    pub fl: Probability,
    pub fg: Probability,
    pub pgain: Probability,
}

impl Parameters {
    /// configuration errors are reported here, at setup time; nothing
    /// validates during the simulation loop
    pub fn validate(&self) -> Result<()> {
        ensure!(self.n > 0, "n must be positive");
        for (name, rate) in [("rll", self.rll), ("rld", self.rld), ("rdd", self.rdd)] {
            ensure!(
                rate.is_finite() && rate >= 0.,
                "rate {} must be finite and non-negative, got {}",
                name,
                rate
            );
        }
        for (name, p) in [("fl", self.fl), ("fg", self.fg), ("pgain", self.pgain)] {
            ensure!(
                (0. ..=1.).contains(&p),
                "probability {} must lie in [0, 1], got {}",
                name,
                p
            );
        }
        Ok(())
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            n: 1,
            rll: 0.,
            rld: 0.,
            rdd: 0.,
            fl: 0.,
            fg: 0.,
            pgain: 0.,
        }
    }
}

/// the initial pool composition: one optional dead circular garbage
/// contig plus live linear and circular contigs sharing the remaining
/// bases
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartingState {
    pub garbage: Bases,
    pub linear: usize,
    pub circular: usize,
}

impl StartingState {
    pub fn validate(&self, n: Bases) -> Result<()> {
        ensure!(
            self.garbage + self.linear as Bases + (self.circular as Bases) < n,
            "garbage size plus contig counts must stay below n = {}",
            n
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_parameters_validate() {
        assert!(Parameters::default().validate().is_ok());
    }

    #[test]
    fn bad_parameters_are_rejected() {
        let good = Parameters {
            n: 100,
            rll: 0.1,
            ..Parameters::default()
        };
        assert!(good.validate().is_ok());
        assert!(Parameters { n: 0, ..good }.validate().is_err());
        assert!(Parameters { rll: -1., ..good }.validate().is_err());
        assert!(Parameters { rld: Rate::NAN, ..good }.validate().is_err());
        assert!(Parameters { fl: 1.5, ..good }.validate().is_err());
        assert!(Parameters { fg: -0.1, ..good }.validate().is_err());
        assert!(Parameters { pgain: 2., ..good }.validate().is_err());
    }

    #[test]
    fn starting_state_must_fit() {
        let state = StartingState {
            garbage: 10,
            linear: 20,
            circular: 5,
        };
        assert!(state.validate(100).is_ok());
        assert!(state.validate(35).is_err());
        assert!(state.validate(36).is_ok());
    }
}
