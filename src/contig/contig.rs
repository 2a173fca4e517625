use super::shape::Shape;
use crate::Arbitrary;
use crate::Bases;
use crate::Edges;

/// an interval of dna, circular or linear, abstracted to an alternating
/// walk of bases and adjacency edges. only the topology and the edge
/// count are tracked; size reflects the number of edges, and linear
/// contigs pay one extra edge to their implicit telomeres.
///
/// contigs are value-like: every operation returns new contigs and leaves
/// the receiver untouched. new telomeres are not created by cutting a
/// linear contig; that bookkeeping lives with the dcj rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contig {
    shape: Shape,
    size: Edges,
    dead: bool,
}

impl Contig {
    pub const fn linear(size: Edges) -> Self {
        Self {
            shape: Shape::Linear,
            size,
            dead: false,
        }
    }
    pub const fn circular(size: Edges) -> Self {
        Self {
            shape: Shape::Circular,
            size,
            dead: false,
        }
    }

    pub const fn shape(&self) -> Shape {
        self.shape
    }
    pub const fn size(&self) -> Edges {
        self.size
    }
    pub const fn is_linear(&self) -> bool {
        matches!(self.shape, Shape::Linear)
    }
    pub const fn is_circular(&self) -> bool {
        matches!(self.shape, Shape::Circular)
    }

    /// garbage marker. dcj outputs never carry it; the model reassigns.
    pub const fn is_dead(&self) -> bool {
        self.dead
    }
    pub fn set_dead(&mut self, dead: bool) {
        self.dead = dead;
    }

    /// number of bases spanned by the walk. a linear contig of size s has
    /// s - 1 bases between its telomeres; a circular one has s.
    pub const fn num_bases(&self) -> Bases {
        match self.shape {
            Shape::Linear => self.size.saturating_sub(1),
            Shape::Circular => self.size,
        }
    }

    /// remove the edge at position, splitting into left and right pieces
    pub fn cut(&self, position: Edges) -> (Self, Self) {
        assert!(self.is_linear());
        assert!(position < self.size);
        (
            Self::linear(position),
            Self::linear(self.size - position - 1),
        )
    }

    /// the contig in reverse orientation. orientation is not tracked, so
    /// this is an identity copy kept for symmetry with the joins.
    pub const fn reverse(&self) -> Self {
        *self
    }

    /// join the two telomeres into one new edge
    pub fn circularize(&self) -> Self {
        assert!(self.is_linear());
        Self::circular(self.size + 1)
    }

    /// attach another linear contig on the left over one new edge.
    /// forward records the orientation of the other contig for the
    /// caller's bookkeeping; it does not affect the size.
    pub fn join_to_left(&self, other: &Self, _forward: bool) -> Self {
        assert!(self.is_linear());
        assert!(other.is_linear());
        Self::linear(self.size + other.size + 1)
    }

    /// attach another linear contig on the right over one new edge
    pub fn join_to_right(&self, other: &Self, _forward: bool) -> Self {
        assert!(self.is_linear());
        assert!(other.is_linear());
        Self::linear(self.size + other.size + 1)
    }

    /// cut two edges out of a circle, yielding the complementary circles
    pub fn excise(&self, pos1: Edges, pos2: Edges) -> (Self, Self) {
        assert!(self.is_circular());
        assert!(pos1 < self.size);
        assert!(pos2 < self.size);
        assert!(pos1 != pos2);
        let span = pos1.abs_diff(pos2);
        (Self::circular(self.size - span), Self::circular(span))
    }

    /// open the circle at position; the freed ends become telomeres
    pub fn linearize(&self, position: Edges) -> Self {
        assert!(self.is_circular());
        assert!(position < self.size);
        Self::linear(self.size - 1)
    }

    /// dcj two circles into one, replacing one edge in each with two
    /// cross edges
    pub fn join(&self, other: &Self, pos1: Edges, pos2: Edges, _forward: bool) -> Self {
        assert!(self.is_circular());
        assert!(other.is_circular());
        assert!(pos1 < self.size);
        assert!(pos2 < other.size);
        Self::circular(self.size + other.size)
    }
}

impl std::fmt::Display for Contig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.shape, self.dead) {
            (Shape::Linear, false) => write!(f, "L{}", self.size),
            (Shape::Circular, false) => write!(f, "C{}", self.size),
            (Shape::Linear, true) => write!(f, "L{}(dead)", self.size),
            (Shape::Circular, true) => write!(f, "C{}(dead)", self.size),
        }
    }
}

impl Arbitrary for Contig {
    fn random() -> Self {
        let size = 2 + rand::random::<Edges>() % 64;
        match Shape::random() {
            Shape::Linear => Self::linear(size),
            Shape::Circular => Self::circular(size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_bases_and_circularize() {
        let lc = Contig::linear(10);
        assert!(lc.is_linear());
        assert!(!lc.is_circular());
        assert_eq!(lc.num_bases(), 9);
        let cc = lc.circularize();
        assert!(cc.is_circular());
        assert_eq!(cc.size(), 11);
        assert_eq!(cc.num_bases(), 11);
    }

    #[test]
    fn linear_cut_consumes_one_edge() {
        let (l, r) = Contig::linear(10).cut(7);
        assert_eq!((l.size(), r.size()), (7, 2));
        for p in 0..10 {
            let (l, r) = Contig::linear(10).cut(p);
            assert_eq!(l.size() + r.size(), 9);
        }
    }

    #[test]
    fn circular_linearize_and_excise() {
        let cc = Contig::circular(5);
        assert_eq!(cc.num_bases(), 5);
        let lc = cc.linearize(0);
        assert!(lc.is_linear());
        assert_eq!(lc.size(), 4);
        assert_eq!(lc.num_bases(), 3);
        let (a, b) = cc.excise(0, 3);
        assert_eq!((a.size(), b.size()), (2, 3));
    }

    #[test]
    fn join_restores_the_cut_edge() {
        for p in 0..10 {
            let cont = Contig::linear(10);
            let (l, r) = cont.cut(p);
            assert_eq!(l.join_to_right(&r, true).size(), cont.size());
            assert_eq!(l.join_to_left(&r, false).size(), cont.size());
        }
    }

    #[test]
    fn circularize_inverts_linearize() {
        for s in 1..32 {
            let cont = Contig::circular(s);
            assert_eq!(cont.linearize(0).circularize(), cont);
        }
    }

    #[test]
    fn circular_join_sums_edges() {
        let joined = Contig::circular(7).join(&Contig::circular(5), 2, 3, true);
        assert!(joined.is_circular());
        assert_eq!(joined.size(), 12);
    }

    #[test]
    fn stubs_have_no_bases() {
        assert_eq!(Contig::linear(0).num_bases(), 0);
        assert_eq!(Contig::linear(1).num_bases(), 0);
        assert_eq!(Contig::circular(0).num_bases(), 0);
    }

    #[test]
    fn dead_flag_defaults_off() {
        let mut cont = Contig::circular(8);
        assert!(!cont.is_dead());
        cont.set_dead(true);
        assert!(cont.is_dead());
    }

    #[test]
    fn reverse_is_identity() {
        let cont = Contig::linear(6);
        assert_eq!(cont.reverse(), cont);
    }
}
