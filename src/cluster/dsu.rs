//! cluster::dsu
//!
//! Disjoint-set union (union-find) with union by rank and path halving.
//!
//! Used to turn a thresholded similarity matrix into connected-component
//! cluster labels.

/// Disjoint-set forest over `0..n`.
#[derive(Debug)]
pub struct Dsu {
    parent: Vec<usize>,
    rank: Vec<u32>,
}

impl Dsu {
    /// Create `n` singleton sets.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// True when the forest is empty.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Find the representative of `x`, halving paths along the way.
    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Merge the sets containing `a` and `b`.
    pub fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return;
        }
        if self.rank[ra] < self.rank[rb] {
            self.parent[ra] = rb;
        } else if self.rank[ra] > self.rank[rb] {
            self.parent[rb] = ra;
        } else {
            self.parent[rb] = ra;
            self.rank[ra] += 1;
        }
    }

    /// True when `a` and `b` are in the same set.
    pub fn connected(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// Compact per-element labels: each set gets an id in `0..k`, assigned
    /// in first-seen element order.
    pub fn compact_labels(&mut self) -> Vec<usize> {
        let n = self.len();
        let mut root_to_label = std::collections::HashMap::new();
        let mut labels = Vec::with_capacity(n);
        for i in 0..n {
            let root = self.find(i);
            let next = root_to_label.len();
            let label = *root_to_label.entry(root).or_insert(next);
            labels.push(label);
        }
        labels
    }
}
