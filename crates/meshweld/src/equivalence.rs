//! Equivalence Resolver: union-find over the proximity edges.
//!
//! Two indices share a class iff a chain of within-τ edges connects them. This is
//! a transitive closure, not a diameter bound: a chain of points each within τ of
//! the next collapses into one class even when its endpoints are far apart.
//!
//! The union-find is owned by a single run and mutated sequentially.

/// Disjoint-set forest with path halving and union by size.
#[derive(Clone, Debug)]
pub struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Merge the sets of `a` and `b`; returns `false` if they were already joined.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
        true
    }
}

/// Partition of `[0, N)` into equivalence classes.
///
/// Invariant: `root[i]` is the union-find root of `i` after all unions; class
/// identity is root equality. Roots are an artefact of union order and carry no
/// meaning beyond that.
#[derive(Clone, Debug)]
pub struct Partition {
    root: Vec<usize>,
    num_classes: usize,
}

impl Partition {
    /// Resolve the classes for `n` indices connected by `pairs` (applied in order).
    pub fn from_pairs(n: usize, pairs: &[(usize, usize)]) -> Self {
        let mut uf = UnionFind::new(n);
        for &(i, j) in pairs {
            uf.union(i, j);
        }
        Self::from_union_find(uf)
    }

    pub fn from_union_find(mut uf: UnionFind) -> Self {
        let root: Vec<usize> = (0..uf.len()).map(|i| uf.find(i)).collect();
        let num_classes = root.iter().enumerate().filter(|&(i, &r)| i == r).count();
        Self { root, num_classes }
    }

    /// Number of indices partitioned.
    #[inline]
    pub fn len(&self) -> usize {
        self.root.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Opaque class id of `i` (equal ids ⇔ same class).
    #[inline]
    pub fn class_of(&self, i: usize) -> usize {
        self.root[i]
    }

    #[inline]
    pub fn same_class(&self, i: usize, j: usize) -> bool {
        self.root[i] == self.root[j]
    }

    #[inline]
    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    /// Classes with ascending members, ordered by their smallest member.
    pub fn classes(&self) -> Vec<Vec<usize>> {
        let mut slot = vec![usize::MAX; self.len()];
        let mut out: Vec<Vec<usize>> = Vec::with_capacity(self.num_classes);
        for (i, &r) in self.root.iter().enumerate() {
            if slot[r] == usize::MAX {
                slot[r] = out.len();
                out.push(Vec::new());
            }
            out[slot[r]].push(i);
        }
        out
    }
}
