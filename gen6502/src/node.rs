//! Intermediate representation: an arena of nodes forming the program tree
//!
//! Every node has a byte length fixed when it is created. Lengths never
//! depend on operand values or on where the node ends up, so one layout
//! pass assigns final addresses and the resolve pass revisits the exact
//! same addresses with the label map complete.

use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::error::{GenError, ensure_in_range};
use crate::opcodes::AddressingMode;
use crate::operand::Operand;

pub type Address = u32;

/// Label name -> absolute address, in program order.
pub type LabelMap = IndexMap<String, Address>;

/// Absolute address -> resolved byte.
pub type ByteMap = BTreeMap<Address, u8>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// What a node contributes to the image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    /// Zero-length marker binding its label to the next address.
    Label,
    /// Opcode byte. Operand bytes are its children.
    Instruction {
        mnemonic: String,
        mode: AddressingMode,
        opcode: u8,
        operand: Option<Operand>,
    },
    Immediate(u8),
    ZeroPage(Operand),
    AbsoluteLow(Operand),
    AbsoluteHigh(Operand),
    BranchOffset(Operand),
    Data(u8),
}

impl NodeKind {
    /// Final byte for a node placed at `address`, or `None` for nodes that
    /// emit nothing.
    pub fn resolve(&self, labels: &LabelMap, address: Address) -> Result<Option<u8>, GenError> {
        match self {
            NodeKind::Root | NodeKind::Label => Ok(None),
            NodeKind::Instruction { opcode, .. } => Ok(Some(*opcode)),
            NodeKind::Immediate(value) | NodeKind::Data(value) => Ok(Some(*value)),
            NodeKind::ZeroPage(operand) => {
                let value = operand.resolve(labels)?;
                ensure_in_range("zero-page address", value, 0, 0xFF)?;
                Ok(Some(value as u8))
            }
            NodeKind::AbsoluteLow(operand) => {
                let value = operand.resolve(labels)?;
                ensure_in_range("absolute address", value, 0, 0xFFFF)?;
                Ok(Some((value & 0xFF) as u8))
            }
            NodeKind::AbsoluteHigh(operand) => {
                let value = operand.resolve(labels)?;
                ensure_in_range("absolute address", value, 0, 0xFFFF)?;
                Ok(Some((value >> 8) as u8))
            }
            NodeKind::BranchOffset(operand) => {
                let target = operand.resolve(labels)?;
                // The offset byte directly follows the one-byte opcode.
                let opcode_address = i64::from(address) - 1;
                branch_offset(opcode_address, target).map(Some)
            }
        }
    }
}

/// Offset byte for a branch whose opcode sits at `from` and jumps to `to`.
///
/// The CPU adds the signed offset to the address after the two-byte
/// instruction, so the reach is 126 bytes back and 129 bytes forward when
/// measured from the opcode.
pub fn branch_offset(from: i64, to: i64) -> Result<u8, GenError> {
    let in_range = if to <= from {
        from - to <= 126
    } else {
        to - from <= 129
    };
    if !in_range {
        return Err(GenError::BranchOutOfRange {
            from: from.max(0) as u32,
            to: to.max(0) as u32,
        });
    }
    Ok((to - from - 2) as i8 as u8)
}

#[derive(Clone, Debug)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub label: Option<String>,
    pub length: u32,
    pub kind: NodeKind,
    pub children: Vec<NodeId>,
}

/// Owns every node of a program. The root is created with the tree.
#[derive(Clone, Debug)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                label: None,
                length: 0,
                kind: NodeKind::Root,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Number of nodes below the root.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a node as the last child of `parent`.
    pub fn push(
        &mut self,
        parent: NodeId,
        label: Option<String>,
        length: u32,
        kind: NodeKind,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            label,
            length,
            kind,
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Own length plus the recursive length of every child.
    pub fn recursive_length(&self, id: NodeId) -> u32 {
        let node = self.node(id);
        node.length
            + node
                .children
                .iter()
                .map(|&child| self.recursive_length(child))
                .sum::<u32>()
    }

    /// Pass one: binds labels to addresses.
    pub fn layout(
        &self,
        id: NodeId,
        labels: &mut LabelMap,
        mut address: Address,
    ) -> Result<(), GenError> {
        let node = self.node(id);
        if let Some(label) = &node.label {
            if labels.contains_key(label) {
                return Err(GenError::DuplicateLabel(label.clone()));
            }
            tracing::trace!(label = %label, "bound to ${:04X}", address);
            labels.insert(label.clone(), address);
        }
        address += node.length;

        for &child in &node.children {
            self.layout(child, labels, address)?;
            address += self.recursive_length(child);
        }
        Ok(())
    }

    /// Pass two: records every node's byte at the address pass one gave it.
    pub fn resolve(
        &self,
        id: NodeId,
        labels: &LabelMap,
        bytes: &mut ByteMap,
        mut address: Address,
    ) -> Result<(), GenError> {
        let node = self.node(id);
        match node.kind.resolve(labels, address)? {
            Some(byte) => {
                bytes.insert(address, byte);
                address += node.length;
            }
            None => {
                if let Some(label) = &node.label {
                    tracing::trace!(label = %label, "at ${:04X}", address);
                }
            }
        }

        for &child in &node.children {
            self.resolve(child, labels, bytes, address)?;
            address += self.recursive_length(child);
        }
        Ok(())
    }
}
