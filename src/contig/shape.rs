use crate::Arbitrary;

/// contig topology. a linear contig carries an implicit telomere at each
/// end; a circular contig closes on itself.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Shape {
    Linear,
    Circular,
}

impl Shape {
    pub const fn all() -> &'static [Self] {
        &[Self::Linear, Self::Circular]
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Linear => write!(f, "linear"),
            Self::Circular => write!(f, "circular"),
        }
    }
}

impl Arbitrary for Shape {
    fn random() -> Self {
        match rand::random::<bool>() {
            true => Self::Linear,
            false => Self::Circular,
        }
    }
}
