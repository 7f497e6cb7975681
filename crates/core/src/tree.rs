//! Adaptive Huffman tree model.
//!
//! The tree starts as a single NYT (not-yet-transmitted) node and grows as
//! symbols are observed: a first occurrence splits the NYT node into an
//! internal node with a fresh NYT on the left and a fresh weight-1 leaf on
//! the right. A repeat occurrence rebalances by swapping nodes with their
//! block leaders on the walk from leaf to root, incrementing weights as it
//! goes, which keeps frequent symbols on short paths.
//!
//! Encoder and decoder each own one [`HuffmanTree`] and feed it the same
//! symbol sequence, so both trees evolve bit-for-bit identically and no
//! frequency table ever crosses the wire.
//!
//! # Representation
//!
//! Parent/child/NYT/root references form a pointer graph with
//! back-references, so nodes live in a growable arena and reference each
//! other by index ([`NodeId`]). Nodes are never removed; a session only
//! grows the arena, two slots per newly observed symbol (the split NYT
//! slot is re-used as the new internal node).

use crate::bitio::BitReader;
use crate::error::{Error, Result, TreeError};

/// Index of a node in the tree arena.
pub type NodeId = usize;

/// Configuration shared by encoder and decoder.
///
/// `symbol_bits` is the fixed width of the raw symbol value that follows
/// an escape prefix, and it bounds the alphabet: both sides must agree on
/// it or their trees diverge after the first escape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoderConfig {
    /// Bits per raw symbol in an escape sequence (1..=16, default 8)
    pub symbol_bits: u8,
}

impl Default for CoderConfig {
    fn default() -> Self {
        Self { symbol_bits: 8 }
    }
}

impl CoderConfig {
    /// Config with the given raw symbol width.
    pub const fn new(symbol_bits: u8) -> Self {
        Self { symbol_bits }
    }

    /// Check that the symbol width is usable.
    ///
    /// # Errors
    /// Returns `Error::Config` if `symbol_bits` is 0 or above 16.
    pub fn validate(&self) -> Result<()> {
        if self.symbol_bits == 0 || self.symbol_bits > 16 {
            return Err(Error::Config(format!(
                "symbol_bits must be in 1..=16, got {}",
                self.symbol_bits
            )));
        }
        Ok(())
    }

    /// Number of distinct symbol values the config admits.
    pub fn alphabet_size(&self) -> usize {
        1usize << self.symbol_bits
    }

    /// Ceiling of the order numbering space.
    ///
    /// A first occurrence consumes three fresh orders (leaf, internal,
    /// NYT) and construction consumes one, so the lifetime maximum is
    /// `3 * alphabet_size + 1`; four times the alphabet keeps the space
    /// from ever running dry while staying a caller-visible bound.
    pub fn order_ceiling(&self) -> u32 {
        (self.alphabet_size() as u32) * 4
    }
}

/// What a node is: the escape sentinel, a symbol leaf, or an internal
/// branch. Internal nodes always carry both children, which makes a
/// dangling child pointer unrepresentable during traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// The unique not-yet-transmitted sentinel (weight 0, no children)
    Nyt,
    /// A leaf holding one observed symbol (weight >= 1)
    Leaf { symbol: u16 },
    /// An internal node; weight is the sum of both children's weights
    Internal { left: NodeId, right: NodeId },
}

/// One node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    kind: NodeKind,
    weight: u64,
    order: u32,
    parent: Option<NodeId>,
}

impl Node {
    /// The node's role and (for internals) its children.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Occurrence count carried by this node.
    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// Unique rank; exchanged when two nodes swap positions.
    pub fn order(&self) -> u32 {
        self.order
    }

    /// Parent slot, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// True for the NYT sentinel.
    pub fn is_nyt(&self) -> bool {
        matches!(self.kind, NodeKind::Nyt)
    }

    /// True for symbol leaves.
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    /// True for internal branch nodes.
    pub fn is_internal(&self) -> bool {
        matches!(self.kind, NodeKind::Internal { .. })
    }

    /// The symbol held by a leaf, `None` otherwise.
    pub fn symbol(&self) -> Option<u16> {
        match self.kind {
            NodeKind::Leaf { symbol } => Some(symbol),
            _ => None,
        }
    }

    /// `(left, right)` children of an internal node, `None` otherwise.
    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        match self.kind {
            NodeKind::Internal { left, right } => Some((left, right)),
            _ => None,
        }
    }
}

/// The bit sequence a symbol encodes to right now.
///
/// An escape carries only the path to the NYT node; the caller appends
/// the fixed-width raw symbol value after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Code {
    /// Root-to-leaf path of an already-seen symbol
    Leaf(Vec<bool>),
    /// Root-to-NYT path announcing a first occurrence
    Escape(Vec<bool>),
}

impl Code {
    /// The path bits, left edge = 0, right edge = 1, root first.
    pub fn path(&self) -> &[bool] {
        match self {
            Code::Leaf(path) | Code::Escape(path) => path,
        }
    }

    /// True if this code is an escape prefix.
    pub fn is_escape(&self) -> bool {
        matches!(self, Code::Escape(_))
    }
}

/// The weighted prefix-code tree plus its NYT pointer, root pointer and
/// symbol-to-leaf index.
///
/// # Invariants (hold after every operation)
/// 1. Exactly one NYT node exists.
/// 2. Internal weight = left child weight + right child weight.
/// 3. The leaf index is a bijection between seen symbols and leaves.
/// 4. Orders are pairwise distinct.
///
/// The block-leader swap rule drives the tree toward the sibling
/// property (non-decreasing weights listable as level-by-level sibling
/// pairs); the creation path is exempt from rebalancing, so the strict
/// form can lapse transiently between updates.
///
/// Not thread-safe; each tree is mutated by exactly one owning encoder
/// or decoder.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
    nyt: NodeId,
    /// symbol -> leaf slot, `None` until first occurrence
    leaves: Vec<Option<NodeId>>,
    /// next fresh order, handed out by decrementing from the ceiling
    next_order: u32,
    swaps: u64,
    config: CoderConfig,
}

impl HuffmanTree {
    /// Create an empty tree: a single NYT node that is also the root.
    ///
    /// # Errors
    /// Returns `Error::Config` if the config is invalid.
    pub fn new(config: CoderConfig) -> Result<Self> {
        config.validate()?;
        let mut tree = Self {
            nodes: Vec::new(),
            root: 0,
            nyt: 0,
            leaves: vec![None; config.alphabet_size()],
            next_order: config.order_ceiling(),
            swaps: 0,
            config,
        };
        let order = tree.take_order()?;
        tree.nodes.push(Node {
            kind: NodeKind::Nyt,
            weight: 0,
            order,
            parent: None,
        });
        Ok(tree)
    }

    /// The coder configuration this tree was built with.
    pub fn config(&self) -> CoderConfig {
        self.config
    }

    /// Current root slot.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Current NYT slot.
    pub fn nyt(&self) -> NodeId {
        self.nyt
    }

    /// Read a node by id.
    ///
    /// # Panics
    /// Panics on an id not issued by this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Number of nodes in the arena (all of them are live tree nodes).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Iterate over `(id, node)` pairs in arena order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate()
    }

    /// Leaf slot for a symbol, `None` if unseen (or out of range).
    pub fn leaf_of(&self, symbol: u16) -> Option<NodeId> {
        self.leaves.get(symbol as usize).copied().flatten()
    }

    /// Occurrence count of a symbol, `None` if unseen.
    pub fn weight_of(&self, symbol: u16) -> Option<u64> {
        self.leaf_of(symbol).map(|id| self.nodes[id].weight)
    }

    /// Number of distinct symbols observed so far.
    pub fn distinct_symbols(&self) -> usize {
        self.leaves.iter().filter(|slot| slot.is_some()).count()
    }

    /// Total block-leader swaps performed over the tree's lifetime.
    pub fn swap_count(&self) -> u64 {
        self.swaps
    }

    /// Check that a symbol fits the configured alphabet.
    ///
    /// # Errors
    /// Returns `TreeError::SymbolOutOfRange` otherwise.
    pub fn validate_symbol(&self, symbol: u16) -> Result<()> {
        if (symbol as usize) < self.config.alphabet_size() {
            Ok(())
        } else {
            Err(TreeError::SymbolOutOfRange {
                symbol,
                alphabet_size: self.config.alphabet_size(),
            }
            .into())
        }
    }

    /// Bit sequence for a symbol in the current tree state.
    ///
    /// Seen symbols yield the root-to-leaf path; unseen symbols yield the
    /// escape prefix (the path to the NYT node, empty while the root is
    /// still NYT). Does not mutate the tree; call [`HuffmanTree::update`]
    /// afterwards.
    pub fn code_for(&self, symbol: u16) -> Code {
        match self.leaf_of(symbol) {
            Some(leaf) => Code::Leaf(self.path_to(leaf)),
            None => Code::Escape(self.path_to(self.nyt)),
        }
    }

    /// Walk the tree one codeword from the root, consuming bits.
    ///
    /// Returns the decoded symbol, or `None` if the stream ends
    /// mid-traversal or with fewer than `symbol_bits` bits left after
    /// reaching the NYT node. Running dry is the decoder's normal end
    /// condition, not an error. Does not mutate the tree.
    pub fn decode_step(&self, reader: &mut BitReader<'_>) -> Option<u16> {
        let mut current = self.root;
        loop {
            match self.nodes[current].kind {
                NodeKind::Leaf { symbol } => return Some(symbol),
                NodeKind::Nyt => {
                    let raw = reader.try_read_bits(self.config.symbol_bits as usize)?;
                    return Some(raw as u16);
                }
                NodeKind::Internal { left, right } => {
                    let bit = reader.try_read_bit()?;
                    current = if bit { right } else { left };
                }
            }
        }
    }

    /// Account one occurrence of `symbol`, restoring the sibling property.
    ///
    /// First occurrence: the NYT node is split into an internal node with
    /// a fresh NYT (left) and a fresh weight-1 leaf (right), and weights
    /// are propagated to the root with no rebalancing on that path.
    /// Repeat occurrence: walk from the leaf to the root, at each step
    /// swapping with the block leader where required, then incrementing.
    ///
    /// # Errors
    /// - `TreeError::SymbolOutOfRange` for symbols beyond the alphabet
    /// - `TreeError::OrderSpaceExhausted` if the order ceiling is hit
    ///   (unreachable while the alphabet bound holds)
    pub fn update(&mut self, symbol: u16) -> Result<()> {
        self.validate_symbol(symbol)?;
        match self.leaves[symbol as usize] {
            Some(leaf) => {
                self.update_existing(leaf);
                Ok(())
            }
            None => self.add_new_symbol(symbol),
        }
    }

    /// Split the NYT node for a first occurrence.
    ///
    /// Fresh orders are taken in the reference sequence leaf, internal,
    /// NYT, so the new leaf outranks the internal node and NYT created
    /// with it. The old NYT slot is re-used as the internal node.
    fn add_new_symbol(&mut self, symbol: u16) -> Result<()> {
        let leaf_order = self.take_order()?;
        let internal_order = self.take_order()?;
        let nyt_order = self.take_order()?;

        let split = self.nyt;
        let leaf = self.push_node(Node {
            kind: NodeKind::Leaf { symbol },
            weight: 1,
            order: leaf_order,
            parent: Some(split),
        });
        let nyt = self.push_node(Node {
            kind: NodeKind::Nyt,
            weight: 0,
            order: nyt_order,
            parent: Some(split),
        });

        let internal = &mut self.nodes[split];
        debug_assert!(internal.is_nyt());
        internal.kind = NodeKind::Internal { left: nyt, right: leaf };
        internal.order = internal_order;

        self.nyt = nyt;
        self.leaves[symbol as usize] = Some(leaf);

        // weight propagation only; the creation path is exempt from swaps
        let mut current = Some(split);
        while let Some(id) = current {
            self.nodes[id].weight += 1;
            current = self.nodes[id].parent;
        }
        Ok(())
    }

    /// Leaf-to-root walk for a repeat occurrence.
    fn update_existing(&mut self, leaf: NodeId) {
        let mut current = leaf;
        loop {
            let weight = self.nodes[current].weight;
            let leader = self.block_leader(weight, current);
            if leader != current
                && self.nodes[leader].order > self.nodes[current].order
                && !self.is_ancestor(leader, current)
                && !self.is_ancestor(current, leader)
            {
                self.swap_nodes(current, leader);
            }
            self.nodes[current].weight += 1;
            match self.nodes[current].parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
    }

    /// Highest-order node in the block of weight `weight`.
    ///
    /// Scans the whole arena; every arena slot is a live tree node, so
    /// this visits exactly the nodes the reference reaches by breadth
    /// first search, with the same max-order tie break.
    fn block_leader(&self, weight: u64, start: NodeId) -> NodeId {
        let mut leader = start;
        let mut leader_order = self.nodes[start].order;
        for (id, node) in self.nodes.iter().enumerate() {
            if node.weight == weight && node.order > leader_order {
                leader = id;
                leader_order = node.order;
            }
        }
        leader
    }

    /// True if `ancestor` is `node` or an ancestor of it.
    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes[id].parent;
        }
        false
    }

    /// Exchange the tree positions and orders of two nodes.
    ///
    /// Weights and children travel with each node; only position and
    /// order are exchanged. Callers must have excluded ancestor pairs,
    /// since re-parenting across such a pair would detach a subtree.
    fn swap_nodes(&mut self, a: NodeId, b: NodeId) {
        let parent_a = self.nodes[a].parent;
        let parent_b = self.nodes[b].parent;

        // capture sides before relinking; a and b may share a parent
        let a_is_left = parent_a.map(|p| self.is_left_child(p, a));
        let b_is_left = parent_b.map(|p| self.is_left_child(p, b));

        if let (Some(parent), Some(is_left)) = (parent_a, a_is_left) {
            self.set_child(parent, is_left, b);
        }
        if let (Some(parent), Some(is_left)) = (parent_b, b_is_left) {
            self.set_child(parent, is_left, a);
        }

        self.nodes[a].parent = parent_b;
        self.nodes[b].parent = parent_a;

        let order = self.nodes[a].order;
        self.nodes[a].order = self.nodes[b].order;
        self.nodes[b].order = order;

        if self.root == a {
            self.root = b;
        } else if self.root == b {
            self.root = a;
        }
        self.swaps += 1;
    }

    /// Path from the root to `node`, left = 0, right = 1.
    fn path_to(&self, node: NodeId) -> Vec<bool> {
        let mut path = Vec::new();
        let mut current = node;
        while let Some(parent) = self.nodes[current].parent {
            path.push(!self.is_left_child(parent, current));
            current = parent;
        }
        path.reverse();
        path
    }

    fn is_left_child(&self, parent: NodeId, child: NodeId) -> bool {
        match self.nodes[parent].kind {
            NodeKind::Internal { left, .. } => left == child,
            // parent links only ever point at internal nodes
            _ => unreachable!("non-internal node referenced as parent"),
        }
    }

    fn set_child(&mut self, parent: NodeId, is_left: bool, child: NodeId) {
        if let NodeKind::Internal { left, right } = &mut self.nodes[parent].kind {
            if is_left {
                *left = child;
            } else {
                *right = child;
            }
        }
    }

    fn push_node(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn take_order(&mut self) -> Result<u32> {
        if self.next_order == 0 {
            return Err(TreeError::OrderSpaceExhausted {
                ceiling: self.config.order_ceiling(),
            }
            .into());
        }
        let order = self.next_order;
        self.next_order -= 1;
        Ok(order)
    }
}
