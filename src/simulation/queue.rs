use super::event::EventKind;
use crate::Rate;
use crate::Time;
use ordered_float::OrderedFloat;
use rand::Rng;
use rand_distr::Distribution;
use rand_distr::Exp;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::collections::BinaryHeap;

/// an exponential race between event kinds. each fire re-enqueues a
/// fresh exponential waiting time for its kind, so successive next()
/// calls walk a monotone clock, gillespie style.
pub struct EventQueue {
    time: Time,
    rates: BTreeMap<EventKind, Rate>,
    heap: BinaryHeap<Reverse<(OrderedFloat<Time>, EventKind)>>,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            time: 0.,
            rates: BTreeMap::new(),
            heap: BinaryHeap::new(),
        }
    }

    /// zap everything
    pub fn reset(&mut self) {
        self.time = 0.;
        self.rates.clear();
        self.heap.clear();
    }

    /// register an event kind with an exponential rate
    pub fn enroll(&mut self, rate: Rate, kind: EventKind) {
        assert!(rate > 0.);
        assert!(!self.rates.contains_key(&kind));
        self.rates.insert(kind, rate);
    }

    /// (re)start the clock at zero with one pending draw per kind
    pub fn begin<R: Rng>(&mut self, rng: &mut R) {
        self.time = 0.;
        self.heap.clear();
        for (&kind, &rate) in self.rates.iter() {
            let delta = Self::waiting(rate, rng);
            self.heap.push(Reverse((OrderedFloat(delta), kind)));
        }
    }

    /// move the clock forward to the next event and return its kind, or
    /// None once the clock would pass max_time (the clock is then parked
    /// exactly at max_time)
    pub fn next<R: Rng>(&mut self, max_time: Time, rng: &mut R) -> Option<EventKind> {
        let Reverse((OrderedFloat(fire), kind)) = self.heap.pop()?;
        assert!(self.time <= fire);
        if fire > max_time {
            self.time = max_time;
            return None;
        }
        self.time = fire;
        let delta = Self::waiting(self.rates[&kind], rng);
        self.heap.push(Reverse((OrderedFloat(fire + delta), kind)));
        Some(kind)
    }

    pub fn time(&self) -> Time {
        self.time
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn waiting<R: Rng>(rate: Rate, rng: &mut R) -> Time {
        Exp::new(rate).expect("positive finite rate").sample(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn faster_rates_fire_more() {
        let ref mut rng = SmallRng::seed_from_u64(7);
        let mut queue = EventQueue::new();
        queue.enroll(0.01, EventKind::LiveLive);
        queue.enroll(0.001, EventKind::LiveDead);
        queue.enroll(0.0005, EventKind::DeadDead);
        queue.begin(rng);

        let mut counts = std::collections::BTreeMap::new();
        for _ in 0..10_000 {
            let kind = queue.next(Time::INFINITY, rng).expect("unbounded horizon");
            *counts.entry(kind).or_insert(0) += 1;
        }
        assert!(counts[&EventKind::LiveLive] >= counts[&EventKind::LiveDead]);
        assert!(counts[&EventKind::LiveDead] >= counts[&EventKind::DeadDead]);
    }

    #[test]
    fn clock_is_monotone() {
        let ref mut rng = SmallRng::seed_from_u64(11);
        let mut queue = EventQueue::new();
        queue.enroll(2.0, EventKind::LiveLive);
        queue.enroll(1.0, EventKind::DeadDead);
        queue.begin(rng);

        let mut last = 0.;
        while queue.next(100., rng).is_some() {
            assert!(queue.time() >= last);
            assert!(queue.time() <= 100.);
            last = queue.time();
        }
        assert_eq!(queue.time(), 100.);
    }

    #[test]
    fn horizon_parks_the_clock() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        let mut queue = EventQueue::new();
        queue.enroll(0.001, EventKind::LiveLive);
        queue.begin(rng);
        // a rate this low should practically never fire before t = 0.01
        while queue.next(0.01, rng).is_some() {}
        assert_eq!(queue.time(), 0.01);
    }

    #[test]
    fn empty_queue_yields_nothing() {
        let ref mut rng = SmallRng::seed_from_u64(1);
        let mut queue = EventQueue::new();
        queue.begin(rng);
        assert_eq!(queue.next(10., rng), None);
        assert_eq!(queue.time(), 0.);

        queue.enroll(1.0, EventKind::LiveLive);
        queue.begin(rng);
        queue.reset();
        queue.begin(rng);
        assert!(queue.is_empty());
        assert_eq!(queue.next(10., rng), None);
    }

    #[test]
    fn begin_restarts_the_race() {
        let ref mut rng = SmallRng::seed_from_u64(23);
        let mut queue = EventQueue::new();
        queue.enroll(5.0, EventKind::LiveLive);
        queue.begin(rng);
        while queue.next(3., rng).is_some() {}
        assert_eq!(queue.time(), 3.);
        queue.begin(rng);
        assert_eq!(queue.time(), 0.);
        assert!(!queue.is_empty());
    }
}
