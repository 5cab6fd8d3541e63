// --- File: src/core/trie.rs
use crate::core::types::{Direction, TokenId};
use rand::Rng;
use std::mem;

/// One token position in a learned path.
///
/// Children are owned and kept strictly ascending by token id, which is what
/// lets `find` and `find_or_insert` binary-search them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrieNode {
    token: TokenId,
    children: Vec<TrieNode>,
}

impl TrieNode {
    pub fn new(token: TokenId) -> Self {
        Self { token, children: Vec::new() }
    }

    /// Builds a node from decoded parts. Returns `None` unless the children
    /// are strictly ascending.
    pub fn from_parts(token: TokenId, children: Vec<TrieNode>) -> Option<Self> {
        let sorted = children.windows(2).all(|w| w[0].token < w[1].token);
        sorted.then_some(Self { token, children })
    }

    pub fn token(&self) -> TokenId {
        self.token
    }

    pub fn children(&self) -> &[TrieNode] {
        &self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    fn search(&self, token: TokenId) -> Result<usize, usize> {
        self.children.binary_search_by_key(&token, |child| child.token)
    }

    pub fn child(&self, token: TokenId) -> Option<&TrieNode> {
        self.search(token).ok().map(|idx| &self.children[idx])
    }

    /// Returns the child for `token`, inserting it at its sorted position if absent.
    pub fn child_or_insert(&mut self, token: TokenId) -> &mut TrieNode {
        let idx = match self.search(token) {
            Ok(idx) => idx,
            Err(idx) => {
                self.children.insert(idx, TrieNode::new(token));
                idx
            }
        };
        &mut self.children[idx]
    }

    /// Walks `path` from this node, creating whatever is missing, and returns the last node.
    pub fn find_or_insert(&mut self, path: &[TokenId]) -> &mut TrieNode {
        let mut node = self;
        for &token in path {
            node = node.child_or_insert(token);
        }
        node
    }

    /// Walks `path` from this node; `None` as soon as a step is missing.
    pub fn find(&self, path: &[TokenId]) -> Option<&TrieNode> {
        path.iter().try_fold(self, |node, &token| node.child(token))
    }

    /// Uniform choice among the children.
    pub fn pick_random_child<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&TrieNode> {
        if self.children.is_empty() {
            return None;
        }
        Some(&self.children[rng.gen_range(0..self.children.len())])
    }

    /// Nodes exactly `depth` levels below this one (this node is depth 0).
    pub fn count_nodes_at_depth(&self, depth: usize) -> usize {
        match depth {
            0 => 1,
            _ => self
                .children
                .iter()
                .map(|child| child.count_nodes_at_depth(depth - 1))
                .sum(),
        }
    }

    /// This node plus all descendants.
    pub fn count_all_nodes(&self) -> usize {
        1 + self.children.iter().map(TrieNode::count_all_nodes).sum::<usize>()
    }

    /// Rough footprint of this subtree: one node header per node.
    /// Spare `Vec` capacity is not counted.
    pub fn estimate_bytes(&self) -> usize {
        mem::size_of::<TrieNode>()
            + self.children.iter().map(TrieNode::estimate_bytes).sum::<usize>()
    }

    /// Longest path below this node.
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// True if every node in the subtree has strictly ascending children.
    pub fn is_sorted(&self) -> bool {
        self.children.windows(2).all(|w| w[0].token < w[1].token)
            && self.children.iter().all(TrieNode::is_sorted)
    }
}

/// The forward and backward tries of a model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tries {
    forward: TrieNode,
    backward: TrieNode,
}

impl Tries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_roots(forward: TrieNode, backward: TrieNode) -> Self {
        Self { forward, backward }
    }

    pub fn root(&self, direction: Direction) -> &TrieNode {
        match direction {
            Direction::Forward => &self.forward,
            Direction::Backward => &self.backward,
        }
    }

    pub fn root_mut(&mut self, direction: Direction) -> &mut TrieNode {
        match direction {
            Direction::Forward => &mut self.forward,
            Direction::Backward => &mut self.backward,
        }
    }

    pub fn insert(&mut self, direction: Direction, path: &[TokenId]) {
        self.root_mut(direction).find_or_insert(path);
    }

    pub fn find(&self, direction: Direction, path: &[TokenId]) -> Option<&TrieNode> {
        self.root(direction).find(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tokens(node: &TrieNode) -> Vec<TokenId> {
        node.children().iter().map(TrieNode::token).collect()
    }

    #[test]
    fn test_insert_keeps_children_sorted() {
        let mut root = TrieNode::default();
        for t in [5, 1, 9, 3, 1, 7, 0, 9] {
            root.find_or_insert(&[t]);
        }
        assert_eq!(tokens(&root), vec![0, 1, 3, 5, 7, 9]);
        assert!(root.is_sorted());
    }

    #[test]
    fn test_find_walks_full_path() {
        let mut root = TrieNode::default();
        root.find_or_insert(&[1, 2, 3]);
        root.find_or_insert(&[1, 4, 3]);

        assert_eq!(root.find(&[1, 2, 3]).map(TrieNode::token), Some(3));
        assert_eq!(root.find(&[1]).map(TrieNode::child_count), Some(2));
        assert!(root.find(&[1, 3]).is_none());
        assert!(root.find(&[2]).is_none());
        // An empty path finds the node itself.
        assert_eq!(root.find(&[]).map(TrieNode::child_count), Some(1));
    }

    #[test]
    fn test_repeated_paths_do_not_duplicate() {
        let mut root = TrieNode::default();
        root.find_or_insert(&[1, 2, 3]);
        let once = root.count_all_nodes();
        root.find_or_insert(&[1, 2, 3]);
        assert_eq!(root.count_all_nodes(), once);
        assert_eq!(once, 4);
    }

    #[test]
    fn test_counts_by_depth() {
        let mut root = TrieNode::default();
        root.find_or_insert(&[1, 2, 3]);
        root.find_or_insert(&[1, 2, 4]);
        root.find_or_insert(&[2, 2, 4]);

        assert_eq!(root.count_nodes_at_depth(0), 1);
        assert_eq!(root.count_nodes_at_depth(1), 2);
        assert_eq!(root.count_nodes_at_depth(2), 2);
        assert_eq!(root.count_nodes_at_depth(3), 3);
        assert_eq!(root.count_nodes_at_depth(4), 0);
        assert_eq!(root.count_all_nodes(), 8);
        assert_eq!(root.depth(), 3);
        assert_eq!(root.estimate_bytes(), 8 * mem::size_of::<TrieNode>());
    }

    #[test]
    fn test_pick_random_child() {
        let mut root = TrieNode::default();
        let mut rng = StepRng::new(0, 0);
        assert!(root.pick_random_child(&mut rng).is_none());

        for t in [4, 2, 8] {
            root.find_or_insert(&[t]);
        }
        assert_eq!(root.pick_random_child(&mut rng).map(TrieNode::token), Some(2));

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let picked = root.pick_random_child(&mut rng).unwrap().token();
            assert!([2, 4, 8].contains(&picked));
        }
    }

    #[test]
    fn test_from_parts_requires_sorted_children() {
        let ok = TrieNode::from_parts(0, vec![TrieNode::new(1), TrieNode::new(2)]);
        assert!(ok.is_some());
        assert!(TrieNode::from_parts(0, vec![TrieNode::new(2), TrieNode::new(1)]).is_none());
        assert!(TrieNode::from_parts(0, vec![TrieNode::new(2), TrieNode::new(2)]).is_none());
    }

    #[test]
    fn test_directions_are_independent() {
        let mut tries = Tries::new();
        tries.insert(Direction::Forward, &[1, 2, 3]);
        tries.insert(Direction::Backward, &[3, 2, 1]);
        assert!(tries.find(Direction::Forward, &[1, 2]).is_some());
        assert!(tries.find(Direction::Backward, &[1, 2]).is_none());
        assert!(tries.find(Direction::Backward, &[3, 2, 1]).is_some());
    }
}
