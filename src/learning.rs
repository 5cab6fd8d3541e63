// File: src/learning.rs
use crate::core::trie::Tries;
use crate::core::types::{Direction, TokenId};

/// Turns a token sequence into the n-gram paths stored in both tries.
pub struct LearningEngine {
    order: usize,
}

impl LearningEngine {
    pub fn new(order: usize) -> Self {
        Self { order }
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// Inserts every path of `tokens` into `tries`.
    ///
    /// Forward paths are each `order + 1` window. Backward paths are the same
    /// windows reversed, plus one reversed `order`-long prefix followed by
    /// `terminator`, marking where a sentence may begin. Sequences shorter
    /// than `order + 1` are ignored.
    pub fn learn(&self, tries: &mut Tries, tokens: &[TokenId], terminator: TokenId) {
        let order = self.order;
        let n = tokens.len();
        if n < order + 1 {
            return;
        }

        let mut path = Vec::with_capacity(order + 1);
        for i in 0..n {
            if i + order < n {
                tries.insert(Direction::Forward, &tokens[i..=i + order]);
            }
            if i + 1 == order {
                path.clear();
                path.extend(tokens[..order].iter().rev());
                path.push(terminator);
                tries.insert(Direction::Backward, &path);
            }
            if i >= order && tokens[i] != terminator {
                path.clear();
                path.extend(tokens[i - order..=i].iter().rev());
                tries.insert(Direction::Backward, &path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::trie::TrieNode;

    const TERM: TokenId = 4;

    fn leaves(root: &TrieNode, prefix: &mut Vec<TokenId>, out: &mut Vec<Vec<TokenId>>) {
        if root.children().is_empty() {
            out.push(prefix.clone());
        }
        for child in root.children() {
            prefix.push(child.token());
            leaves(child, prefix, out);
            prefix.pop();
        }
    }

    fn paths(tries: &Tries, direction: Direction) -> Vec<Vec<TokenId>> {
        let mut out = Vec::new();
        leaves(tries.root(direction), &mut Vec::new(), &mut out);
        out
    }

    #[test]
    fn test_learn_inserts_forward_and_backward_paths() {
        // THE CAT SAT . <end>
        let tokens = [0, 1, 2, 3, TERM];
        let mut tries = Tries::new();
        LearningEngine::new(2).learn(&mut tries, &tokens, TERM);

        assert_eq!(
            paths(&tries, Direction::Forward),
            vec![vec![0, 1, 2], vec![1, 2, 3], vec![2, 3, TERM]]
        );
        assert_eq!(
            paths(&tries, Direction::Backward),
            vec![vec![1, 0, TERM], vec![2, 1, 0], vec![3, 2, 1]]
        );
    }

    #[test]
    fn test_learn_ignores_short_input() {
        let mut tries = Tries::new();
        LearningEngine::new(2).learn(&mut tries, &[0, TERM], TERM);
        assert_eq!(tries, Tries::new());
    }

    #[test]
    fn test_learn_minimal_sequence() {
        let mut tries = Tries::new();
        LearningEngine::new(2).learn(&mut tries, &[0, 1, TERM], TERM);
        assert_eq!(paths(&tries, Direction::Forward), vec![vec![0, 1, TERM]]);
        assert_eq!(paths(&tries, Direction::Backward), vec![vec![1, 0, TERM]]);
    }
}
