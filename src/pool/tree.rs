use super::category::Category;
use super::histogram::Histogram;
use super::node::Node;
use super::node::Slot;
use crate::Bases;
use crate::contig::Contig;
use rand::Rng;

/// a b-ary tree over weighted contigs supporting o(log n) weighted
/// uniform sampling, insertion and removal. all contigs live at leaves;
/// internal nodes cache the weight and leaf count of their subtree, so
/// sampling descends by subtracting child weights from a single draw.
///
/// nodes are arena-allocated with stable slot indices; removed slots are
/// recycled by later inserts. an internal node emptied by removals is
/// retained and refilled on the next insert. rebalancing is not
/// performed; the min-count insertion policy keeps depth logarithmic
/// under uniform growth.
pub struct SampleTree {
    degree: usize,
    arena: Vec<Node>,
    spare: Vec<Slot>,
}

impl Default for SampleTree {
    fn default() -> Self {
        Self::new(crate::DEFAULT_DEGREE)
    }
}

impl SampleTree {
    const ROOT: Slot = Slot(0);

    pub fn new(degree: usize) -> Self {
        assert!(degree > 1);
        Self {
            degree,
            arena: vec![Node::internal(None)],
            spare: Vec::new(),
        }
    }

    /// how many contigs are in the tree
    pub fn size(&self) -> usize {
        self.node(Self::ROOT).count
    }

    /// total weight over all contigs. the probability of sampling a
    /// contig is its weight over this total.
    pub fn weight(&self) -> Bases {
        self.node(Self::ROOT).weight
    }

    /// the contig owned by a leaf slot
    pub fn contig(&self, slot: Slot) -> &Contig {
        self.node(slot).data.as_ref().expect("slot holds a leaf")
    }

    /// insert a contig with the given sampling weight
    pub fn insert(&mut self, contig: Contig, weight: Bases) -> Slot {
        let parent = self.hollow(Self::ROOT);
        let slot = self.alloc(Node::leaf(parent, contig, weight));
        self.node_mut(parent).children.push(slot);
        self.refresh(parent);
        slot
    }

    /// detach a leaf, releasing its contig to the caller. the slot is
    /// recycled by a later insert.
    pub fn remove(&mut self, slot: Slot) -> Contig {
        assert!(self.node(slot).is_leaf());
        let parent = self.node(slot).parent.expect("leaves hang below the root");
        let contig = self.node_mut(slot).data.take().expect("leaf payload");
        self.node_mut(parent).children.retain(|&child| child != slot);
        self.spare.push(slot);
        self.refresh(parent);
        contig
    }

    /// weighted uniform draw: the selected leaf and an integer remainder
    /// in [0, leaf weight), which the model reads as an adjacency offset.
    /// None when the tree carries no weight.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Option<(Slot, Bases)> {
        if self.weight() == 0 {
            return None;
        }
        let mut x = rng.random_range(0..self.weight());
        let mut at = Self::ROOT;
        while !self.node(at).is_leaf() {
            let mut tally = 0;
            let mut into = None;
            for &child in self.node(at).children.iter() {
                let weight = self.node(child).weight;
                if x < tally + weight {
                    into = Some(child);
                    break;
                }
                tally += weight;
            }
            at = into.expect("cached weights cover the draw");
            x -= tally;
        }
        Some((at, x))
    }

    /// lazy in-order walk over the leaf slots
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves {
            tree: self,
            stack: vec![Self::ROOT],
        }
    }

    /// iterate the contigs stored in the tree
    pub fn contigs(&self) -> impl Iterator<Item = &Contig> + '_ {
        self.leaves().map(|slot| self.contig(slot))
    }

    /// fold the leaves admitted by the category into weight-binned counts
    pub fn histogram(&self, bin_size: Bases, category: Category) -> Histogram {
        assert!(bin_size > 0);
        self.leaves()
            .filter(|&slot| category.admits(self.contig(slot)))
            .map(|slot| self.node(slot).weight / bin_size)
            .fold(Histogram::default(), |hist, bin| hist.witness(bin))
    }

    /// find a parent with room for one more child:
    /// an internal node below capacity takes it directly; a leaf is
    /// converted by pushing its payload into a new child; a full internal
    /// node recurses into the child with the fewest leaves, leftmost on
    /// ties.
    fn hollow(&mut self, at: Slot) -> Slot {
        if self.node(at).is_leaf() {
            let payload = self.node_mut(at).data.take().expect("leaf payload");
            let weight = self.node(at).weight;
            let count = self.node(at).count;
            let child = self.alloc(Node {
                parent: Some(at),
                children: Vec::new(),
                weight,
                count,
                data: Some(payload),
            });
            self.node_mut(at).children.push(child);
            at
        } else if self.node(at).children.len() < self.degree {
            at
        } else {
            let into = self
                .node(at)
                .children
                .iter()
                .copied()
                .min_by_key(|&child| self.node(child).count)
                .expect("full internal nodes have children");
            self.hollow(into)
        }
    }

    /// recompute cached weights and counts from here up to the root
    fn refresh(&mut self, from: Slot) {
        let mut at = Some(from);
        while let Some(slot) = at {
            assert!(!self.node(slot).is_leaf());
            let (weight, count) = self
                .node(slot)
                .children
                .iter()
                .map(|&child| (self.node(child).weight, self.node(child).count))
                .fold((0, 0), |(w, c), (cw, cc)| (w + cw, c + cc));
            self.node_mut(slot).weight = weight;
            self.node_mut(slot).count = count;
            at = self.node(slot).parent;
        }
    }

    fn alloc(&mut self, node: Node) -> Slot {
        match self.spare.pop() {
            Some(slot) => {
                self.arena[slot.0] = node;
                slot
            }
            None => {
                self.arena.push(node);
                Slot(self.arena.len() - 1)
            }
        }
    }

    fn node(&self, slot: Slot) -> &Node {
        &self.arena[slot.0]
    }
    fn node_mut(&mut self, slot: Slot) -> &mut Node {
        &mut self.arena[slot.0]
    }
}

/// restartable depth-first iterator over leaf slots
pub struct Leaves<'a> {
    tree: &'a SampleTree,
    stack: Vec<Slot>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = Slot;
    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.stack.pop() {
            let node = self.tree.node(slot);
            if node.is_leaf() {
                return Some(slot);
            }
            self.stack.extend(node.children.iter().rev().copied());
        }
        None
    }
}
