use std::fmt;
use std::ops::Index;

use tracing::{debug, info};

use crate::alphabet::{Letter, ALPHABET_SIZE};
use crate::code_table::{CodeEntry, CodeTable};
use crate::config::SymbolPolicy;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::min_heap::MinHeap;

pub const LEAF_COUNT: usize = ALPHABET_SIZE;
pub const INTERNAL_COUNT: usize = LEAF_COUNT - 1;
pub const NODE_COUNT: usize = LEAF_COUNT + INTERNAL_COUNT;

/// Stable index of a node in the tree's arena.
///
/// Leaves sit at `0..26` in alphabetical order, internal node `T<i>` at
/// `26 + i`. The index doubles as the creation sequence used to break
/// frequency ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeLabel {
    Leaf(Letter),
    /// The `i` in `T<i>`.
    Internal(usize),
}

impl fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeLabel::Leaf(letter) => write!(f, "{}", letter),
            NodeLabel::Internal(i) => write!(f, "T{}", i),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffNode {
    label: NodeLabel,
    frequency: u64,
    code: String,
    left: Option<NodeId>,
    right: Option<NodeId>,
    parent: Option<NodeId>,
}

impl HuffNode {
    fn leaf(letter: Letter, frequency: u64) -> Self {
        HuffNode {
            label: NodeLabel::Leaf(letter),
            frequency,
            code: String::new(),
            left: None,
            right: None,
            parent: None,
        }
    }

    fn internal(i: usize, frequency: u64, left: NodeId, right: NodeId) -> Self {
        HuffNode {
            label: NodeLabel::Internal(i),
            frequency,
            code: String::new(),
            left: Some(left),
            right: Some(right),
            parent: None,
        }
    }

    pub fn label(&self) -> NodeLabel {
        self.label
    }

    pub fn letter(&self) -> Option<Letter> {
        match self.label {
            NodeLabel::Leaf(letter) => Some(letter),
            NodeLabel::Internal(_) => None,
        }
    }

    pub fn frequency(&self) -> u64 {
        self.frequency
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// The bit that leads from this node to `child`.
    fn branch_bit(&self, child: NodeId) -> char {
        if self.left == Some(child) {
            '0'
        } else {
            '1'
        }
    }
}

/// Heap key: lowest frequency first, earliest-created first among equals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct MergeCandidate {
    frequency: u64,
    id: NodeId,
}

/// Flat view of one node, with links resolved to names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDescriptor {
    pub name: String,
    pub frequency: u64,
    pub code: String,
    pub left: Option<String>,
    pub right: Option<String>,
    pub parent: Option<String>,
}

impl fmt::Display for NodeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [freq {}] code '{}'", self.name, self.frequency, self.code)?;
        if let (Some(left), Some(right)) = (&self.left, &self.right) {
            write!(f, " children ({}, {})", left, right)?;
        }
        if let Some(parent) = &self.parent {
            write!(f, " parent {}", parent)?;
        }
        Ok(())
    }
}

/// A fully linked Huffman tree over the 26 letters.
///
/// All 51 nodes live in one arena and refer to each other by [`NodeId`].
/// The tree is immutable once built; rebuild it to change frequencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<HuffNode>,
    root: NodeId,
    /// All nodes ascending by `(frequency, creation sequence)`.
    order: Vec<NodeId>,
    frequencies: FrequencyTable,
}

impl HuffmanTree {
    pub fn from_text(text: &str, policy: SymbolPolicy) -> Result<Self> {
        let frequencies = FrequencyTable::from_text(text, policy)?;
        Self::from_frequencies(&frequencies)
    }

    /// Fails with [`HuffmanError::FrequencyOverflow`] when the counts do not
    /// sum within a `u64`; every internal frequency is bounded by that sum.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        if frequencies.checked_total().is_none() {
            return Err(HuffmanError::FrequencyOverflow);
        }

        let mut nodes = Vec::with_capacity(NODE_COUNT);
        nodes.extend(frequencies.iter().map(|(letter, count)| HuffNode::leaf(letter, count)));

        let candidates = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| MergeCandidate { frequency: node.frequency, id: NodeId(i) })
            .collect();
        let heap = MinHeap::build(candidates);

        let tree = Self::build_from_heap(nodes, heap, *frequencies)?;
        info!(
            symbols = frequencies.total(),
            distinct = frequencies.distinct(),
            "built huffman tree"
        );
        Ok(tree)
    }

    fn build_from_heap(
        mut nodes: Vec<HuffNode>,
        mut heap: MinHeap<MergeCandidate>,
        frequencies: FrequencyTable,
    ) -> Result<Self> {
        for i in 0..INTERNAL_COUNT {
            let x = heap.extract_min()?;
            let y = heap.extract_min()?;

            let id = NodeId(nodes.len());
            let frequency = x
                .frequency
                .checked_add(y.frequency)
                .ok_or(HuffmanError::FrequencyOverflow)?;
            debug!(
                node = %NodeLabel::Internal(i),
                left = %nodes[x.id.0].label,
                right = %nodes[y.id.0].label,
                frequency,
                "merge"
            );

            nodes.push(HuffNode::internal(i, frequency, x.id, y.id));
            nodes[x.id.0].parent = Some(id);
            nodes[y.id.0].parent = Some(id);
            heap.insert(MergeCandidate { frequency, id });
        }

        let root = heap.extract_min()?.id;
        debug_assert!(heap.is_empty());

        let codes: Vec<String> = (0..nodes.len()).map(|i| derive_code(&nodes, NodeId(i))).collect();
        for (node, code) in nodes.iter_mut().zip(codes) {
            node.code = code;
        }

        let mut order: Vec<NodeId> = (0..nodes.len()).map(NodeId).collect();
        order.sort_by_key(|id| (nodes[id.0].frequency, *id));

        Ok(HuffmanTree { nodes, root, order, frequencies })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_node(&self) -> &HuffNode {
        &self[self.root]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    pub fn leaf(&self, letter: Letter) -> &HuffNode {
        &self.nodes[letter.index()]
    }

    pub fn code_for(&self, letter: Letter) -> &str {
        self.leaf(letter).code()
    }

    /// Nodes in collection order (ascending frequency, then creation).
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &HuffNode)> + '_ {
        self.order.iter().map(move |&id| (id, &self[id]))
    }

    /// Leaves in collection order.
    pub fn leaves(&self) -> impl Iterator<Item = &HuffNode> + '_ {
        self.nodes().map(|(_, node)| node).filter(|node| node.is_leaf())
    }

    /// The node reached by following `bit` from `from`; `None` at a leaf or
    /// for anything other than '0'/'1'.
    pub fn step(&self, from: NodeId, bit: char) -> Option<NodeId> {
        let node = &self[from];
        match bit {
            '0' => node.left,
            '1' => node.right,
            _ => None,
        }
    }

    pub fn descriptors(&self) -> Vec<NodeDescriptor> {
        let name = |id: Option<NodeId>| id.map(|id| self[id].label.to_string());
        self.nodes()
            .map(|(_, node)| NodeDescriptor {
                name: node.label.to_string(),
                frequency: node.frequency,
                code: node.code.clone(),
                left: name(node.left),
                right: name(node.right),
                parent: name(node.parent),
            })
            .collect()
    }

    pub fn code_table(&self) -> CodeTable {
        self.leaves()
            .filter_map(|node| {
                node.letter().map(|letter| CodeEntry { letter, code: node.code.clone() })
            })
            .collect()
    }

    /// Checks the structural invariants: node counts, frequency sums, a
    /// single parentless root with an empty code, and codes that extend
    /// their parent's by the branch bit.
    pub fn is_valid(&self) -> bool {
        if self.nodes.len() != NODE_COUNT || self.order.len() != NODE_COUNT {
            return false;
        }
        let leaves = self.nodes.iter().filter(|n| n.is_leaf()).count();
        let roots = self.nodes.iter().filter(|n| n.parent.is_none()).count();
        if leaves != LEAF_COUNT || roots != 1 || !self[self.root].code.is_empty() {
            return false;
        }

        self.nodes.iter().enumerate().all(|(i, node)| {
            let sums = match (node.left, node.right) {
                (Some(l), Some(r)) => {
                    self[l].frequency.checked_add(self[r].frequency) == Some(node.frequency)
                }
                (None, None) => true,
                _ => false,
            };
            let extends = match node.parent {
                Some(p) => {
                    let parent = &self[p];
                    let expected = format!("{}{}", parent.code, parent.branch_bit(NodeId(i)));
                    node.code == expected
                }
                None => NodeId(i) == self.root,
            };
            sums && extends
        })
    }

    pub fn print_structure(&self) {
        println!("Huffman Tree Structure:");
        self.print_node(self.root, 0, "root");
    }

    fn print_node(&self, id: NodeId, depth: usize, branch: &str) {
        let indent = "  ".repeat(depth);
        let node = &self[id];
        match (node.left, node.right) {
            (Some(left), Some(right)) => {
                println!("{}{}-> {} [weight: {}]", indent, branch, node.label, node.frequency);
                self.print_node(left, depth + 1, "L");
                self.print_node(right, depth + 1, "R");
            }
            _ => {
                println!(
                    "{}{}-> Leaf '{}' [weight: {}] code {}",
                    indent, branch, node.label, node.frequency, node.code
                );
            }
        }
    }
}

/// Walks parent links from `id` up to the root, collecting branch bits.
fn derive_code(nodes: &[HuffNode], id: NodeId) -> String {
    let mut bits = Vec::new();
    let mut current = id;
    while let Some(parent) = nodes[current.0].parent {
        bits.push(nodes[parent.0].branch_bit(current));
        current = parent;
    }
    bits.iter().rev().collect()
}

impl Index<NodeId> for HuffmanTree {
    type Output = HuffNode;

    fn index(&self, id: NodeId) -> &HuffNode {
        &self.nodes[id.0]
    }
}

impl TryFrom<&str> for HuffmanTree {
    type Error = HuffmanError;

    fn try_from(text: &str) -> Result<Self> {
        HuffmanTree::from_text(text, SymbolPolicy::Reject)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn letter(c: char) -> Letter {
        Letter::from_char(c).unwrap()
    }

    fn all_zero() -> HuffmanTree {
        HuffmanTree::from_frequencies(&FrequencyTable::default()).unwrap()
    }

    #[test]
    fn builds_fifty_one_nodes() {
        let tree = HuffmanTree::try_from("aabbbcccc").unwrap();
        assert_eq!(tree.len(), NODE_COUNT);
        assert!(tree.is_valid());
        assert_eq!(tree.root(), NodeId(NODE_COUNT - 1));
        assert_eq!(tree.root_node().frequency(), 9);
        assert_eq!(tree.root_node().label(), NodeLabel::Internal(24));
        assert!(tree.root_node().parent().is_none());
        assert_eq!(tree.root_node().code(), "");
    }

    #[test]
    fn ties_merge_alphabetically_first() {
        // every letter at zero: the first merge takes 'a' and 'b'
        let tree = all_zero();
        let t0 = &tree[NodeId(LEAF_COUNT)];
        assert_eq!(t0.label(), NodeLabel::Internal(0));
        assert_eq!(t0.left(), Some(NodeId(0)));
        assert_eq!(t0.right(), Some(NodeId(1)));
        assert!(tree.is_valid());
    }

    #[test]
    fn heaviest_letters_get_shortest_codes() {
        let tree = HuffmanTree::try_from("aabbbcccc").unwrap();
        let a = tree.code_for(letter('a')).len();
        let b = tree.code_for(letter('b')).len();
        let c = tree.code_for(letter('c')).len();
        let z = tree.code_for(letter('z')).len();
        assert!(c <= b && b <= a && a <= z);
        assert_eq!(c, 1);
    }

    #[test]
    fn internal_frequencies_are_child_sums() {
        let tree = HuffmanTree::try_from("thequickbrownfoxjumpsoverthelazydog").unwrap();
        for (_, node) in tree.nodes() {
            if let (Some(l), Some(r)) = (node.left(), node.right()) {
                assert_eq!(node.frequency(), tree[l].frequency() + tree[r].frequency());
            }
        }
    }

    #[test]
    fn collection_order_is_ascending() {
        let tree = HuffmanTree::try_from("mississippi").unwrap();
        let freqs: Vec<u64> = tree.nodes().map(|(_, n)| n.frequency()).collect();
        assert!(freqs.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(tree.nodes().last().map(|(id, _)| id), Some(tree.root()));
    }

    #[test]
    fn single_letter_input_never_puts_a_leaf_at_the_root() {
        let tree = HuffmanTree::try_from("aaaa").unwrap();
        assert!(!tree.root_node().is_leaf());
        assert!(Letter::all().all(|l| !tree.code_for(l).is_empty()));
        assert_eq!(tree.code_for(letter('a')), "1");
    }

    #[test]
    fn overflowing_frequencies_are_an_error() {
        let mut counts = [0u64; ALPHABET_SIZE];
        counts[0] = u64::MAX;
        counts[1] = 1;
        let err = HuffmanTree::from_frequencies(&FrequencyTable::from_counts(counts)).unwrap_err();
        assert!(matches!(err, HuffmanError::FrequencyOverflow));

        // a total of exactly u64::MAX still builds
        counts[1] = 0;
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_counts(counts)).unwrap();
        assert!(tree.is_valid());
        assert_eq!(tree.root_node().frequency(), u64::MAX);
    }

    #[test]
    fn descriptors_resolve_links_by_name() {
        let tree = all_zero();
        let dump = tree.descriptors();
        assert_eq!(dump.len(), NODE_COUNT);
        let t0 = dump.iter().find(|d| d.name == "T0").unwrap();
        assert_eq!(t0.left.as_deref(), Some("a"));
        assert_eq!(t0.right.as_deref(), Some("b"));
        let a = dump.iter().find(|d| d.name == "a").unwrap();
        assert_eq!(a.parent.as_deref(), Some("T0"));
        assert!(a.left.is_none());
        assert_eq!(dump.last().map(|d| d.name.as_str()), Some("T24"));
    }
}
