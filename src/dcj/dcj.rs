use crate::Bases;
use crate::Edges;
use crate::contig::Contig;
use crate::contig::Shape;

/// the one or two contigs produced by a double cut and join
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    One(Contig),
    Two(Contig, Contig),
}

impl Outcome {
    pub const fn count(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Two(..) => 2,
        }
    }
    /// total edges across the outputs
    pub fn size(&self) -> Edges {
        match self {
            Self::One(a) => a.size(),
            Self::Two(a, b) => a.size() + b.size(),
        }
    }
    /// total bases across the outputs
    pub fn bases(&self) -> Bases {
        match self {
            Self::One(a) => a.num_bases(),
            Self::Two(a, b) => a.num_bases() + b.num_bases(),
        }
    }
    pub fn contigs(self) -> Vec<Contig> {
        match self {
            Self::One(a) => vec![a],
            Self::Two(a, b) => vec![a, b],
        }
    }
}

/// general interface to a dcj operation, of which there are six kinds.
/// the positions name the target edges to be cut; forward selects which
/// of the two possible rejoinings of the four freed ends happens. cont2
/// of None puts both cuts in cont1. outputs never carry the dead flag.
pub fn dcj(
    cont1: &Contig,
    pos1: Edges,
    pos2: Edges,
    forward: bool,
    cont2: Option<&Contig>,
) -> Outcome {
    assert!(pos1 < cont1.size());
    match cont2 {
        None => {
            assert!(pos2 < cont1.size());
            match cont1.shape() {
                Shape::Linear => linear_same(cont1, pos1, pos2, forward),
                Shape::Circular => circular_same(cont1, pos1, pos2, forward),
            }
        }
        Some(cont2) => {
            assert!(pos2 < cont2.size());
            match (cont1.shape(), cont2.shape()) {
                (Shape::Linear, Shape::Linear) => linear_linear(cont1, pos1, cont2, pos2, forward),
                (Shape::Linear, Shape::Circular) => {
                    linear_circular(cont1, pos1, cont2, pos2, forward)
                }
                // rewrite circular-linear as linear-circular with the
                // arguments swapped and the orientation inverted
                (Shape::Circular, Shape::Linear) => {
                    linear_circular(cont2, pos2, cont1, pos1, !forward)
                }
                (Shape::Circular, Shape::Circular) => {
                    circular_circular(cont1, pos1, cont2, pos2, forward)
                }
            }
        }
    }
}

/// dcj on a single linear contig.
/// equal cuts split the shared edge into two telomere-capped stubs
/// (forward) or leave a copy untouched. distinct cuts invert the middle
/// segment (forward) or excise it as a circle.
fn linear_same(cont: &Contig, pos1: Edges, pos2: Edges, forward: bool) -> Outcome {
    let p = pos1.min(pos2);
    let q = pos1.max(pos2);
    if p == q {
        if forward {
            Outcome::Two(Contig::linear(p + 1), Contig::linear(cont.size() - p))
        } else {
            Outcome::One(Contig::linear(cont.size()))
        }
    } else {
        let (left, rest) = cont.cut(p);
        let (middle, right) = rest.cut(q - left.size() - 1);
        if forward {
            let spliced = left.join_to_right(&middle, false);
            Outcome::One(spliced.join_to_right(&right, true))
        } else {
            Outcome::Two(left.join_to_right(&right, true), middle.circularize())
        }
    }
}

/// dcj between two linear contigs makes two linear contigs:
/// forward AB + CD => A-C + -BD, otherwise AB + CD => AD + CB
fn linear_linear(cont1: &Contig, pos1: Edges, cont2: &Contig, pos2: Edges, forward: bool) -> Outcome {
    let (a, b) = cont1.cut(pos1);
    let (c, d) = cont2.cut(pos2);
    if forward {
        Outcome::Two(a.join_to_right(&c, false), d.join_to_left(&b, false))
    } else {
        Outcome::Two(a.join_to_right(&d, true), c.join_to_right(&b, true))
    }
}

/// dcj between a linear and a circular contig splices the opened circle
/// into the cut: AB + C => ACB (forward) or A-CB
fn linear_circular(
    cont1: &Contig,
    pos1: Edges,
    cont2: &Contig,
    pos2: Edges,
    forward: bool,
) -> Outcome {
    let (a, b) = cont1.cut(pos1);
    let c = cont2.linearize(pos2);
    if forward {
        Outcome::One(a.join_to_right(&c, true).join_to_right(&b, true))
    } else {
        Outcome::One(a.join_to_right(&c, false).join_to_right(&b, true))
    }
}

/// dcj on a single circular contig.
/// equal cuts open the circle at the shared edge (forward) or leave a
/// copy untouched. distinct cuts recombine into a figure eight (forward)
/// or fission into two circles.
fn circular_same(cont: &Contig, pos1: Edges, pos2: Edges, forward: bool) -> Outcome {
    let p = pos1.min(pos2);
    let q = pos1.max(pos2);
    if p == q {
        if forward {
            Outcome::One(cont.linearize(p))
        } else {
            Outcome::One(Contig::circular(cont.size()))
        }
    } else {
        let temp = cont.linearize(p);
        let (left, right) = temp.cut(q - p - 1);
        if forward {
            Outcome::One(left.join_to_right(&right, false).circularize())
        } else {
            Outcome::Two(left.circularize(), right.circularize())
        }
    }
}

/// dcj on two circular contigs makes a single circular contig
fn circular_circular(
    cont1: &Contig,
    pos1: Edges,
    cont2: &Contig,
    pos2: Edges,
    forward: bool,
) -> Outcome {
    Outcome::One(cont1.join(cont2, pos1, pos2, forward))
}
