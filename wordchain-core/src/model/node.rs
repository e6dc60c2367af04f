/// Stable identifier of a [`ChainNode`] inside a chain's node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
	/// Position of the node in the arena.
	pub fn index(self) -> usize {
		self.0
	}
}

/// Target of an outgoing transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
	/// Continue the walk at another node.
	Node(NodeId),
	/// End of word.
	Terminal,
}

/// Represents a state of the chain.
///
/// A `ChainNode` is created the first time its state key (the trailing
/// `<= k` characters of a training word) is seen. It emits `character` when
/// visited and continues through one of its `edges`.
///
/// ## Responsibilities:
/// - Accumulate transitions during learning, in insertion order
/// - Select the next transition from a uniform draw in `[0, 1)`
///
/// ## Invariants
/// - Edges are never deduplicated: repeating a target encodes its weight,
///   so a uniform draw over `edges` is a frequency-weighted draw over targets
/// - A node reachable from the start node has at least one edge
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainNode {
	/// Character emitted when the walk visits this node.
	character: char,
	/// Outgoing transitions, with repetitions.
	edges: Vec<Edge>,
}

impl ChainNode {
	/// Creates a node without transitions.
	pub(crate) fn new(character: char) -> Self {
		Self { character, edges: Vec::new() }
	}

	/// Character emitted by this node.
	pub fn character(&self) -> char {
		self.character
	}

	/// Outgoing transitions in insertion order.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Records one more occurrence of a transition.
	pub(crate) fn push_edge(&mut self, edge: Edge) {
		self.edges.push(edge);
	}

	/// Picks a transition from a draw `r` in `[0, 1)`.
	///
	/// See [`pick_edge`].
	pub fn pick(&self, r: f64) -> Edge {
		pick_edge(&self.edges, r)
	}
}

/// Picks `edges[floor(r * len)]`.
///
/// The index is clamped into range, so a misbehaving source (`r >= 1.0`,
/// negative or NaN) cannot index out of bounds. An empty edge list
/// behaves like a single terminal edge.
pub(crate) fn pick_edge(edges: &[Edge], r: f64) -> Edge {
	if edges.is_empty() {
		return Edge::Terminal;
	}
	// `as usize` saturates: negatives and NaN become 0
	let index = ((r * edges.len() as f64).floor() as usize).min(edges.len() - 1);
	edges[index]
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node_with(edges: &[Edge]) -> ChainNode {
		let mut node = ChainNode::new('a');
		for edge in edges {
			node.push_edge(*edge);
		}
		node
	}

	#[test]
	fn pick_indexes_by_floor() {
		let node = node_with(&[Edge::Node(NodeId(0)), Edge::Node(NodeId(1)), Edge::Terminal]);
		assert_eq!(node.pick(0.0), Edge::Node(NodeId(0)));
		assert_eq!(node.pick(0.34), Edge::Node(NodeId(1)));
		assert_eq!(node.pick(0.999), Edge::Terminal);
	}

	#[test]
	fn pick_clamps_out_of_range_draws() {
		let node = node_with(&[Edge::Node(NodeId(3)), Edge::Terminal]);
		assert_eq!(node.pick(1.0), Edge::Terminal);
		assert_eq!(node.pick(7.5), Edge::Terminal);
		assert_eq!(node.pick(-0.5), Edge::Node(NodeId(3)));
		assert_eq!(node.pick(f64::NAN), Edge::Node(NodeId(3)));
	}

	#[test]
	fn empty_edges_terminate() {
		assert_eq!(pick_edge(&[], 0.5), Edge::Terminal);
	}

	#[test]
	fn repeated_edges_are_kept() {
		let node = node_with(&[Edge::Terminal, Edge::Terminal]);
		assert_eq!(node.edges().len(), 2);
		assert_eq!(node.character(), 'a');
	}
}
