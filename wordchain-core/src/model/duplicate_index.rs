use std::collections::HashMap;

/// A node of the suffix trie.
///
/// Children are arena offsets into [`DuplicateIndex::nodes`].
#[derive(Clone, Debug, Default)]
struct TrieNode {
	children: HashMap<char, usize>,
}

const ROOT: usize = 0;

/// Case fold shared by insertion and lookup.
///
/// Per character and context free; final sigma folds to `σ` so that a
/// substring match does not depend on where the substring ends.
fn fold(c: char) -> impl Iterator<Item = char> {
	c.to_lowercase().map(|l| if l == 'ς' { 'σ' } else { l })
}

/// Substring membership index over the training vocabulary.
///
/// Every suffix of every (lowercased) training word is stored as a path
/// from the root, so any contiguous substring of a training word is a
/// prefix of some stored path. Answering "is `candidate` a substring of a
/// training word" is then a single walk from the root, in
/// O(|candidate|) and independent of the vocabulary size.
///
/// # Invariants
/// - `nodes[0]` is the root and always exists
/// - Nodes are never removed
#[derive(Clone, Debug)]
pub struct DuplicateIndex {
	nodes: Vec<TrieNode>,
}

impl Default for DuplicateIndex {
	fn default() -> Self {
		Self::new()
	}
}

impl DuplicateIndex {
	/// Creates an index holding only the root.
	pub fn new() -> Self {
		Self { nodes: vec![TrieNode::default()] }
	}

	/// Number of trie nodes, root included.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Inserts every suffix of `word`, lowercased.
	///
	/// Suffixes are inserted longest first: the word itself, then the word
	/// minus its first character, down to its last character.
	///
	/// Lowercasing is per character, without context rules, so it folds
	/// exactly like [`is_duplicate`](Self::is_duplicate).
	pub fn insert_word(&mut self, word: &str) {
		let chars: Vec<char> = word.chars().flat_map(fold).collect();
		for start in 0..chars.len() {
			self.insert_path(&chars[start..]);
		}
	}

	fn insert_path(&mut self, path: &[char]) {
		let mut current = ROOT;
		for &c in path {
			current = self.child_or_insert(current, c);
		}
	}

	fn child_or_insert(&mut self, parent: usize, c: char) -> usize {
		if let Some(&child) = self.nodes[parent].children.get(&c) {
			return child;
		}
		let child = self.nodes.len();
		self.nodes.push(TrieNode::default());
		self.nodes[parent].children.insert(c, child);
		child
	}

	/// Returns `true` when `candidate` (lowercased) is a contiguous
	/// substring of at least one training word.
	///
	/// The empty string is a substring of everything and always matches.
	pub fn is_duplicate(&self, candidate: &str) -> bool {
		let mut current = ROOT;
		for c in candidate.chars().flat_map(fold) {
			match self.nodes[current].children.get(&c) {
				Some(&child) => current = child,
				None => return false,
			}
		}
		true
	}

	/// Adds every path of `other` to this index.
	///
	/// Walks both tries in lockstep with an explicit stack.
	pub fn merge(&mut self, other: &Self) {
		let mut stack = vec![(ROOT, ROOT)];
		while let Some((other_id, self_id)) = stack.pop() {
			for (&c, &other_child) in &other.nodes[other_id].children {
				let self_child = self.child_or_insert(self_id, c);
				stack.push((other_child, self_child));
			}
		}
	}
}
