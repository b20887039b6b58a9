/// Ordered set of `i64` keys with amortized-logarithmic insert, erase,
/// membership and contiguous-range sum, backed by a splay tree in which
/// every node caches the sum of keys in its subtree.
///
/// Nodes live in a flat arena addressed by index; `left`/`right` are the
/// owning links and `parent` is a back-reference used only for the upward
/// splay walk. Slots freed by [`erase`](RangeSumSet::erase) are recycled.
///
/// Queries take `&mut self`: a splay tree reshapes itself on every access,
/// including reads.
pub struct RangeSumSet {
    nodes: Vec<Node>,
    free: Vec<usize>,
    root: Option<usize>,
    len: usize,
}

struct Node {
    key: i64,
    sum: i64,
    left: Option<usize>,
    right: Option<usize>,
    parent: Option<usize>,
}

impl RangeSumSet {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            root: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Adds `x` to the set. Inserting a present key is a no-op.
    pub fn insert(&mut self, x: i64) {
        let root = self.root.take();
        let (left, right) = self.split(root, x);
        let fresh = match right {
            Some(r) if self.nodes[r].key == x => None,
            _ => {
                self.len += 1;
                Some(self.alloc(x))
            }
        };
        let merged = self.merge(left, fresh);
        self.root = self.merge(merged, right);
    }

    /// Removes `x` from the set. Erasing an absent key is a no-op.
    pub fn erase(&mut self, x: i64) {
        let root = self.root.take();
        let (left, rest) = self.split(root, x);
        // Keys are integers, so [x, x + 1) isolates at most the node for x.
        let (middle, right) = match x.checked_add(1) {
            Some(bound) => self.split(rest, bound),
            None => (rest, None),
        };
        if let Some(v) = middle {
            debug_assert!(self.nodes[v].left.is_none() && self.nodes[v].right.is_none());
            self.free.push(v);
            self.len -= 1;
        }
        self.root = self.merge(left, right);
    }

    /// Membership test. Splays the deepest node touched by the search, so a
    /// miss still moves the nearest larger key toward the root.
    pub fn contains(&mut self, x: i64) -> bool {
        let Some(root) = self.root else {
            return false;
        };
        let (_, new_root) = self.find_ge(root, x);
        self.root = Some(new_root);
        self.nodes[new_root].key == x
    }

    /// Sum of all keys in the inclusive range `[from, to]`; 0 when the range
    /// covers no keys (including `from > to`). The key set is unchanged.
    pub fn range_sum(&mut self, from: i64, to: i64) -> i64 {
        let root = self.root.take();
        let (left, rest) = self.split(root, from);
        let (middle, right) = match to.checked_add(1) {
            Some(bound) => self.split(rest, bound),
            None => (rest, None),
        };
        let total = self.sum_of(middle);
        let merged = self.merge(left, middle);
        self.root = self.merge(merged, right);
        total
    }

    fn alloc(&mut self, key: i64) -> usize {
        let node = Node {
            key,
            sum: key,
            left: None,
            right: None,
            parent: None,
        };
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn sum_of(&self, v: Option<usize>) -> i64 {
        v.map_or(0, |v| self.nodes[v].sum)
    }

    /// Recomputes `v`'s cached sum from its children and restores the
    /// children's parent links. Must run children-first when a rotation has
    /// moved `v` above a node whose sum also changed.
    fn update(&mut self, v: usize) {
        let left = self.nodes[v].left;
        let right = self.nodes[v].right;
        self.nodes[v].sum = self.nodes[v].key + self.sum_of(left) + self.sum_of(right);
        if let Some(l) = left {
            self.nodes[l].parent = Some(v);
        }
        if let Some(r) = right {
            self.nodes[r].parent = Some(v);
        }
    }

    /// One rotation lifting `v` above its parent, preserving in-order
    /// sequence. No-op at the root.
    fn small_rotation(&mut self, v: usize) {
        let Some(parent) = self.nodes[v].parent else {
            return;
        };
        let grandparent = self.nodes[parent].parent;
        if self.nodes[parent].left == Some(v) {
            let m = self.nodes[v].right;
            self.nodes[v].right = Some(parent);
            self.nodes[parent].left = m;
        } else {
            let m = self.nodes[v].left;
            self.nodes[v].left = Some(parent);
            self.nodes[parent].right = m;
        }
        // The old parent is now below v; update it before v.
        self.update(parent);
        self.update(v);
        self.nodes[v].parent = grandparent;
        if let Some(g) = grandparent {
            if self.nodes[g].left == Some(parent) {
                self.nodes[g].left = Some(v);
            } else {
                self.nodes[g].right = Some(v);
            }
        }
    }

    /// Two-level splay step. Zig-zig (v and parent are same-side children)
    /// rotates the parent first; zig-zag rotates v twice.
    fn big_rotation(&mut self, v: usize, parent: usize, grandparent: usize) {
        let zig_zig = (self.nodes[parent].left == Some(v))
            == (self.nodes[grandparent].left == Some(parent));
        if zig_zig {
            self.small_rotation(parent);
            self.small_rotation(v);
        } else {
            self.small_rotation(v);
            self.small_rotation(v);
        }
    }

    /// Rotates `v` to the root of its tree and returns it. Iterative: one
    /// small rotation when the parent is the root, a big rotation otherwise.
    fn splay(&mut self, v: usize) -> usize {
        while let Some(parent) = self.nodes[v].parent {
            match self.nodes[parent].parent {
                None => {
                    self.small_rotation(v);
                    break;
                }
                Some(grandparent) => self.big_rotation(v, parent, grandparent),
            }
        }
        v
    }

    /// Root-ward search for `key`. Tracks the deepest node visited (splayed
    /// afterwards, hit or miss) and the smallest key `>= key` seen so far.
    /// Returns that boundary node (`None` when every key is smaller) and the
    /// new root.
    fn find_ge(&mut self, root: usize, key: i64) -> (Option<usize>, usize) {
        let mut cursor = Some(root);
        let mut last = root;
        let mut next: Option<usize> = None;
        while let Some(v) = cursor {
            let v_key = self.nodes[v].key;
            if v_key >= key && next.is_none_or(|n| v_key < self.nodes[n].key) {
                next = Some(v);
            }
            last = v;
            if v_key == key {
                break;
            }
            cursor = if v_key < key {
                self.nodes[v].right
            } else {
                self.nodes[v].left
            };
        }
        let new_root = self.splay(last);
        (next, new_root)
    }

    /// Partitions into (keys `< key`, keys `>= key`), both detached and
    /// internally consistent.
    fn split(&mut self, root: Option<usize>, key: i64) -> (Option<usize>, Option<usize>) {
        let Some(root) = root else {
            return (None, None);
        };
        let (boundary, new_root) = self.find_ge(root, key);
        let Some(boundary) = boundary else {
            // Every key is smaller than the split point.
            return (Some(new_root), None);
        };
        let right = self.splay(boundary);
        let left = self.nodes[right].left.take();
        if let Some(l) = left {
            self.nodes[l].parent = None;
            self.update(l);
        }
        self.update(right);
        (left, Some(right))
    }

    /// Concatenates two trees; every key in `left` must be strictly less
    /// than every key in `right` (not re-checked).
    fn merge(&mut self, left: Option<usize>, right: Option<usize>) -> Option<usize> {
        if left.is_none() {
            return right;
        }
        let Some(mut min) = right else {
            return left;
        };
        while let Some(l) = self.nodes[min].left {
            min = l;
        }
        // The minimum ends up at the root with no left child.
        let root = self.splay(min);
        self.nodes[root].left = left;
        self.update(root);
        Some(root)
    }
}

impl Default for RangeSumSet {
    fn default() -> Self {
        Self::new()
    }
}
