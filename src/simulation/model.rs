use super::counters::Counters;
use super::event::EventKind;
use super::params::Parameters;
use super::params::StartingState;
use super::queue::EventQueue;
use crate::Bases;
use crate::Edges;
use crate::Probability;
use crate::Rate;
use crate::Seed;
use crate::Time;
use crate::contig::Contig;
use crate::contig::Shape;
use crate::dcj::Outcome;
use crate::dcj::dcj;
use crate::pool::SampleTree;
use crate::pool::Slot;
use anyhow::Result;
use anyhow::ensure;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// one adjacency drawn from the pool: a leaf slot and the edge offset
/// inside its contig
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Draw {
    slot: Slot,
    offset: Edges,
}

/// a rearrangement model over a weighted pool of contigs, driven by an
/// exponential race of live-live, live-dead and dead-dead dcj events.
/// contigs are weighted by their live bases, so adjacencies are sampled
/// uniformly across the genome. the pool owns every contig; an event
/// removes its targets, rewrites them, and reinserts the outputs.
pub struct Model {
    rng: SmallRng,
    pool: SampleTree,
    queue: EventQueue,
    parameters: Parameters,
    counters: Counters,
}

impl Model {
    pub fn new(seed: Seed) -> Self {
        Self::with_degree(seed, crate::DEFAULT_DEGREE)
    }

    pub fn with_degree(seed: Seed, degree: usize) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            pool: SampleTree::new(degree),
            queue: EventQueue::new(),
            parameters: Parameters::default(),
            counters: Counters::default(),
        }
    }

    pub fn pool(&self) -> &SampleTree {
        &self.pool
    }
    pub fn counters(&self) -> &Counters {
        &self.counters
    }
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }
    pub fn time(&self) -> Time {
        self.queue.time()
    }

    /// fix the rate parameters and enroll every kind with a positive
    /// rate, scaled by n
    pub fn set_parameters(&mut self, parameters: Parameters) -> Result<()> {
        parameters.validate()?;
        self.parameters = parameters;
        self.queue.reset();
        let n = parameters.n as Rate;
        for (rate, kind) in [
            (parameters.rll, EventKind::LiveLive),
            (parameters.rld, EventKind::LiveDead),
            (parameters.rdd, EventKind::DeadDead),
        ] {
            if rate > 0. {
                self.queue.enroll(rate * n, kind);
            }
        }
        Ok(())
    }

    /// build the initial pool: an optional dead circular garbage contig,
    /// then the remaining n - garbage bases split between linear and
    /// circular contigs by their count ratio (floor on linear, ceil on
    /// circular), each class dealt floor shares with the extras going to
    /// the front
    pub fn set_starting_state(&mut self, state: StartingState) -> Result<()> {
        state.validate(self.parameters.n)?;
        ensure!(self.pool.size() == 0, "starting state already set");
        if state.garbage > 0 {
            let mut garbage = Contig::circular(state.garbage);
            garbage.set_dead(true);
            self.pool.insert(garbage, garbage.num_bases());
        }
        let remaining = self.parameters.n - state.garbage;
        let contigs = (state.linear + state.circular) as Bases;
        if contigs > 0 {
            let linear = remaining * state.linear as Bases / contigs;
            self.scatter(Shape::Linear, linear, state.linear);
            self.scatter(Shape::Circular, remaining - linear, state.circular);
        }
        let expected = usize::from(state.garbage > 0) + state.linear + state.circular;
        debug_assert_eq!(self.pool.size(), expected);
        debug_assert_eq!(
            self.pool.weight(),
            state.garbage + if contigs > 0 { remaining } else { 0 }
        );
        log::debug!(
            "starting state: {} contigs over {} weighted bases",
            self.pool.size(),
            self.pool.weight()
        );
        Ok(())
    }

    /// deal bases across count contigs of one shape, extras to the front
    fn scatter(&mut self, shape: Shape, bases: Bases, count: usize) {
        if count == 0 {
            return;
        }
        let share = bases / count as Bases;
        let extra = bases % count as Bases;
        for i in 0..count as Bases {
            let dealt = share + Bases::from(i < extra);
            let contig = match shape {
                // one extra edge for the implicit telomeres
                Shape::Linear => Contig::linear(dealt + 1),
                Shape::Circular => Contig::circular(dealt),
            };
            self.pool.insert(contig, contig.num_bases());
        }
    }

    /// run the event race until the horizon. counters restart; the pool
    /// carries over, so successive calls continue the same trajectory.
    pub fn simulate(&mut self, horizon: Time) {
        self.counters = Counters::default();
        self.queue.begin(&mut self.rng);
        while let Some(kind) = self.queue.next(horizon, &mut self.rng) {
            log::trace!("t={:.3} {}", self.queue.time(), kind);
            match kind {
                EventKind::LiveLive => self.live_live(),
                EventKind::LiveDead => self.live_dead(),
                EventKind::DeadDead => self.dead_dead(),
            }
        }
        debug_assert_eq!(
            self.pool.weight(),
            self.pool.contigs().map(Contig::num_bases).sum::<Bases>()
        );
        log::info!(
            "simulated to t={} with {} contigs, {} bases: {}",
            self.queue.time(),
            self.pool.size(),
            self.pool.weight(),
            self.counters
        );
    }

    /// two weighted adjacency draws with the linear telomere offset
    /// repair applied
    fn draw(&mut self) -> Option<(Draw, Draw)> {
        let (slot1, off1) = self.pool.sample(&mut self.rng)?;
        let (slot2, off2) = self.pool.sample(&mut self.rng)?;
        let first = Draw { slot: slot1, offset: off1 };
        let second = Draw { slot: slot2, offset: off2 };
        let (first, second) = if first == second {
            // one coin serves both draws so they keep naming the same edge
            let repaired = self.repair(first);
            (repaired, repaired)
        } else {
            (self.repair(first), self.repair(second))
        };
        assert!(first.offset < self.pool.contig(first.slot).size());
        assert!(second.offset < self.pool.contig(second.slot).size());
        Some((first, second))
    }

    /// the sampling weight of a linear contig covers offsets [0, bases),
    /// which reaches the left telomere edge but not the right one. give
    /// both ends equal probability by promoting a zero offset to the
    /// last edge on a fair coin.
    fn repair(&mut self, draw: Draw) -> Draw {
        let contig = self.pool.contig(draw.slot);
        if contig.is_linear() && draw.offset == 0 && self.rng.random_bool(0.5) {
            Draw {
                offset: contig.num_bases(),
                ..draw
            }
        } else {
            draw
        }
    }

    /// is this offset one of the telomere-adjacent edges of its contig?
    fn telomeric(contig: &Contig, offset: Edges) -> bool {
        contig.is_linear() && (offset == 0 || offset == contig.size() - 1)
    }

    /// dcj between two live adjacencies, with telomere gain and loss
    /// modifiers. sampling the same edge twice offers a gain (split);
    /// sampling two telomeric edges offers a loss (fusion); anything
    /// else is a neutral rewrite with a fair orientation coin.
    fn live_live(&mut self) {
        if self.pool.size() == 0 || self.pool.weight() <= 1 {
            return;
        }
        let Some((first, second)) = self.draw() else { return };
        let one = *self.pool.contig(first.slot);
        let two = *self.pool.contig(second.slot);
        if one.is_dead() || two.is_dead() {
            return;
        }
        let same = first.slot == second.slot;
        self.pool.remove(first.slot);
        if !same {
            self.pool.remove(second.slot);
        }
        if same && first.offset == second.offset && !Self::telomeric(&one, first.offset) {
            // telomere gain: split the shared edge or open the circle
            if self.rng.random::<Probability>() < self.parameters.fg {
                self.counters.fg += 1;
                self.settle(dcj(&one, first.offset, second.offset, true, None));
            } else {
                self.settle(Outcome::One(one));
            }
        } else if Self::telomeric(&one, first.offset) && Self::telomeric(&two, second.offset) {
            // telomere loss: the contig (or pair) fuses into a circle
            if same {
                if self.rng.random::<Probability>() < self.parameters.fl / 4. {
                    self.counters.fl += 1;
                    self.settle(Outcome::One(one.circularize()));
                } else {
                    self.settle(Outcome::One(one));
                }
            } else if self.rng.random::<Probability>() < self.parameters.fl / 2. {
                self.counters.fl += 1;
                let forward = self.rng.random_bool(0.5);
                let (one, two) = (one.circularize(), two.circularize());
                self.settle(dcj(&one, first.offset, second.offset, forward, Some(&two)));
            } else {
                self.settle(Outcome::Two(one, two));
            }
        } else {
            self.counters.ll += 1;
            let forward = self.rng.random_bool(0.5);
            let outcome = match same {
                true => dcj(&one, first.offset, second.offset, forward, None),
                false => dcj(&one, first.offset, second.offset, forward, Some(&two)),
            };
            self.settle(outcome);
        }
    }

    /// dcj between a live and a dead adjacency. a single output absorbs
    /// the live material into the garbage; two outputs swap material,
    /// with the dead mark inherited proportionally to size.
    fn live_dead(&mut self) {
        if self.pool.size() == 0 || self.pool.weight() <= 1 {
            return;
        }
        let Some((first, second)) = self.draw() else { return };
        let one = *self.pool.contig(first.slot);
        let two = *self.pool.contig(second.slot);
        if one.is_dead() == two.is_dead() {
            return;
        }
        // liveness differs, so these are two distinct leaves
        self.pool.remove(first.slot);
        self.pool.remove(second.slot);
        let (live, dead) = match one.is_dead() {
            true => (second, first),
            false => (first, second),
        };
        let (live_contig, dead_contig) = match one.is_dead() {
            true => (two, one),
            false => (one, two),
        };
        let forward = self.rng.random_bool(0.5);
        match dcj(&live_contig, live.offset, dead.offset, forward, Some(&dead_contig)) {
            Outcome::One(mut only) => {
                only.set_dead(true);
                self.counters.ld_loss += 1;
                self.settle(Outcome::One(only));
            }
            Outcome::Two(a, b) => {
                self.counters.ld_swap += 1;
                let (a, b) = self.inherit(a, b);
                self.settle(Outcome::Two(a, b));
            }
        }
    }

    /// dcj between two adjacencies of the same dead contig. with
    /// probability pgain the rewrite runs in the fission direction and
    /// one output re-enters the live pool.
    fn dead_dead(&mut self) {
        if self.pool.size() == 0 || self.pool.weight() <= 1 {
            return;
        }
        let Some((first, second)) = self.draw() else { return };
        let one = *self.pool.contig(first.slot);
        let two = *self.pool.contig(second.slot);
        if !one.is_dead() || !two.is_dead() || first.slot != second.slot {
            return;
        }
        if first.offset == second.offset {
            return;
        }
        self.pool.remove(first.slot);
        let forward = self.rng.random::<Probability>() > self.parameters.pgain;
        match (forward, dcj(&one, first.offset, second.offset, forward, None)) {
            (true, Outcome::One(mut only)) => {
                only.set_dead(true);
                self.counters.dd_swap += 1;
                self.settle(Outcome::One(only));
            }
            (false, Outcome::Two(a, b)) => {
                self.counters.dd_gain += 1;
                let (a, b) = self.inherit(a, b);
                self.settle(Outcome::Two(a, b));
            }
            _ => unreachable!("distinct same-contig cuts yield one output forward, two reversed"),
        }
    }

    /// hand the dead mark to one of two outputs, chosen proportionally
    /// to its share of the output edges
    fn inherit(&mut self, first: Contig, second: Contig) -> (Contig, Contig) {
        let (mut first, mut second) = (first, second);
        let total = first.size() + second.size();
        if self.rng.random_range(0..total) >= first.size() {
            second.set_dead(true);
        } else {
            first.set_dead(true);
        }
        (first, second)
    }

    /// return contigs to the pool at their live-base weight
    fn settle(&mut self, outcome: Outcome) {
        for contig in outcome.contigs() {
            self.pool.insert(contig, contig.num_bases());
        }
    }
}
