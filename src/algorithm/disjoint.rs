//! Union-find over provisional fragment ids

/// Disjoint-set forest with path halving and union by size
#[derive(Debug, Clone)]
pub struct DisjointSets {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSets {
    /// Create `count` singleton sets `0..count`
    pub fn new(count: usize) -> Self {
        Self {
            parent: (0..count).collect(),
            size: vec![1; count],
        }
    }

    /// Number of elements
    pub const fn len(&self) -> usize {
        self.parent.len()
    }

    /// Whether there are no elements
    pub const fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Representative of the set containing `element`
    ///
    /// Elements outside `0..len` are their own representative.
    pub fn find(&mut self, element: usize) -> usize {
        let mut current = element;
        loop {
            let Some(&parent) = self.parent.get(current) else {
                return current;
            };
            if parent == current {
                return current;
            }
            let grandparent = self.parent.get(parent).copied().unwrap_or(parent);
            if let Some(slot) = self.parent.get_mut(current) {
                *slot = grandparent;
            }
            current = grandparent;
        }
    }

    /// Join the sets of `a` and `b`, returning whether they were distinct
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b || root_a >= self.len() || root_b >= self.len() {
            return false;
        }

        let size_a = self.size.get(root_a).copied().unwrap_or(1);
        let size_b = self.size.get(root_b).copied().unwrap_or(1);
        let (big, small) = if size_a >= size_b {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };

        if let Some(slot) = self.parent.get_mut(small) {
            *slot = big;
        }
        if let Some(slot) = self.size.get_mut(big) {
            *slot = size_a + size_b;
        }
        true
    }

    /// Whether `a` and `b` are in the same set
    pub fn connected(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// Number of distinct sets
    pub fn set_count(&mut self) -> usize {
        (0..self.len()).filter(|&e| self.find(e) == e).count()
    }
}
