use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;

use log::debug;

use super::duplicate_index::DuplicateIndex;
use super::node::{ChainNode, Edge, NodeId};
use crate::error::ChainError;

/// An order-k character Markov chain built from a training vocabulary.
///
/// The chain manages:
/// - `nodes`: the arena of states, addressed by [`NodeId`]
/// - `table`: the state key (trailing `<= order` characters) of every node
/// - `start`: the edges of the start sentinel, i.e. the first-character
///   distribution of the vocabulary
/// - `duplicates`: the substring index used to reject copies of training words
///
/// States are keyed by their trailing characters, so positions of different
/// words sharing a key share one node: the graph converges instead of
/// forming a tree.
///
/// # Invariants
/// - `order >= 1` and never changes
/// - every key in `table` has at most `order` characters
/// - `table` and `nodes` are in bijection
/// - `Edge::Terminal` only ever appears as an edge target
#[derive(Clone, Debug)]
pub struct Chain {
	order: usize,
	start: Vec<Edge>,
	nodes: Vec<ChainNode>,
	table: HashMap<String, NodeId>,
	duplicates: DuplicateIndex,
}

impl Chain {
	/// Creates an empty chain using `order` trailing characters as context.
	///
	/// A lower order yields more random words, a higher one yields words
	/// closer to the training vocabulary.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `order == 0`.
	pub fn new(order: usize) -> Result<Self, ChainError> {
		if order == 0 {
			return Err(ChainError::invalid("order must be >= 1"));
		}
		Ok(Self::with_order(order))
	}

	fn with_order(order: usize) -> Self {
		Self {
			order,
			start: Vec::new(),
			nodes: Vec::new(),
			table: HashMap::new(),
			duplicates: DuplicateIndex::new(),
		}
	}

	/// Builds a chain from `words` using one worker thread per chunk.
	///
	/// # Behavior
	/// - Splits the vocabulary into chunks (CPU cores * factor).
	/// - Builds a partial chain for each chunk on its own thread.
	/// - Merges the partial chains in chunk order.
	///
	/// Because merging appends in chunk order, the result is identical to
	/// calling [`add_words`](Self::add_words) on a single chain.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `order == 0`.
	pub fn from_words_parallel<S>(order: usize, words: &[S]) -> Result<Self, ChainError>
	where
		S: AsRef<str> + Sync,
	{
		let mut chain = Self::new(order)?;
		if words.is_empty() {
			return Ok(chain);
		}

		let cpus = num_cpus::get();
		let factor = 8;
		let chunks = cpus * factor;
		let chunk_size = words.len().div_ceil(chunks).max(1);

		let (tx, rx) = mpsc::channel();
		thread::scope(|scope| {
			for (index, chunk) in words.chunks(chunk_size).enumerate() {
				let tx = tx.clone();
				scope.spawn(move || {
					let mut partial = Chain::with_order(order);
					partial.add_words(chunk);
					// The receiver outlives the scope
					let _ = tx.send((index, partial));
				});
			}
		});
		drop(tx);

		let mut partials: Vec<(usize, Chain)> = rx.iter().collect();
		partials.sort_by_key(|(index, _)| *index);

		debug!("merging {} partial chains built from {} words", partials.len(), words.len());
		for (_, partial) in &partials {
			chain.merge(partial)?;
		}

		Ok(chain)
	}

	/// Number of trailing characters used as context.
	pub fn order(&self) -> usize {
		self.order
	}

	/// Number of distinct states (start sentinel excluded).
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Returns `true` if no word was ever added.
	pub fn is_empty(&self) -> bool {
		self.start.is_empty()
	}

	/// Edges of the start sentinel.
	pub fn start_edges(&self) -> &[Edge] {
		&self.start
	}

	/// Returns the node stored under `id`, or `None` if `id` does not
	/// belong to this chain.
	pub fn node(&self, id: NodeId) -> Option<&ChainNode> {
		self.nodes.get(id.0)
	}

	/// Indexes the arena. `id` must come from this chain's own edges.
	pub(crate) fn node_at(&self, id: NodeId) -> &ChainNode {
		&self.nodes[id.0]
	}

	/// Looks up the node of a state key.
	pub fn node_for_key(&self, key: &str) -> Option<&ChainNode> {
		self.table.get(key).map(|id| self.node_at(*id))
	}

	/// Substring index over the training vocabulary.
	pub fn duplicates(&self) -> &DuplicateIndex {
		&self.duplicates
	}

	/// Returns `true` if `candidate` is a (case-insensitive) contiguous
	/// substring of some training word.
	pub fn is_duplicate(&self, candidate: &str) -> bool {
		self.duplicates.is_duplicate(candidate)
	}

	/// Adds a training word to the chain.
	///
	/// # Behavior
	/// - Slides a key over the last `min(order, position + 1)` characters.
	/// - Gets or creates the node of each key and appends an edge to it from
	///   the previous node (the start sentinel for the first character).
	/// - Appends a terminal edge from the last node (from the start sentinel
	///   for an empty word).
	/// - Inserts every suffix of the lowercased word into the duplicate index.
	///
	/// # Notes
	/// - Edges are never deduplicated: adding the same word twice doubles
	///   the weight of its transitions.
	/// - UTF-8 safe: keys are built from characters, not bytes.
	pub fn add_word(&mut self, word: &str) {
		self.duplicates.insert_word(word);

		let chars: Vec<char> = word.chars().collect();
		let mut previous: Option<NodeId> = None;

		for (i, &c) in chars.iter().enumerate() {
			let key_start = (i + 1).saturating_sub(self.order);
			let key: String = chars[key_start..=i].iter().collect();
			let current = self.node_id_or_insert(key, c);

			self.push_edge(previous, Edge::Node(current));
			previous = Some(current);
		}

		self.push_edge(previous, Edge::Terminal);
	}

	/// Adds every word of `words`, in order.
	///
	/// Identical words are not filtered out; each occurrence reinforces
	/// its transitions.
	pub fn add_words<I>(&mut self, words: I)
	where
		I: IntoIterator,
		I::Item: AsRef<str>,
	{
		let mut count = 0usize;
		for word in words {
			self.add_word(word.as_ref());
			count += 1;
		}
		debug!("added {} words, chain now has {} states", count, self.nodes.len());
	}

	/// Merges another chain into this one.
	///
	/// # Notes
	/// - Both chains must have the same order.
	/// - States are matched by key; unknown states are appended in the order
	///   `other` created them.
	/// - Edges of `other` are appended after the existing ones, so merging
	///   B into A is the same as adding A's words then B's words.
	///
	/// # Errors
	/// Returns `InvalidArgument` if the orders do not match.
	pub fn merge(&mut self, other: &Self) -> Result<(), ChainError> {
		if self.order != other.order {
			return Err(ChainError::invalid(format!(
				"order mismatch: self={}, other={}",
				self.order, other.order
			)));
		}

		let mut keys: Vec<&str> = vec![""; other.nodes.len()];
		for (key, id) in &other.table {
			keys[id.0] = key.as_str();
		}

		let remap: Vec<NodeId> = keys
			.iter()
			.zip(&other.nodes)
			.map(|(key, node)| self.node_id_or_insert((*key).to_owned(), node.character()))
			.collect();
		let translate = |edge: &Edge| match edge {
			Edge::Node(id) => Edge::Node(remap[id.0]),
			Edge::Terminal => Edge::Terminal,
		};

		self.start.extend(other.start.iter().map(translate));
		for (other_id, node) in other.nodes.iter().enumerate() {
			let target = &mut self.nodes[remap[other_id].0];
			for edge in node.edges() {
				target.push_edge(translate(edge));
			}
		}

		self.duplicates.merge(&other.duplicates);
		Ok(())
	}

	fn node_id_or_insert(&mut self, key: String, c: char) -> NodeId {
		if let Some(id) = self.table.get(&key) {
			return *id;
		}
		let id = NodeId(self.nodes.len());
		self.nodes.push(ChainNode::new(c));
		self.table.insert(key, id);
		id
	}

	fn push_edge(&mut self, from: Option<NodeId>, edge: Edge) {
		match from {
			Some(id) => self.nodes[id.0].push_edge(edge),
			None => self.start.push(edge),
		}
	}
}
