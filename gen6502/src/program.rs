//! Program builder and the two compilation passes

use crate::error::GenError;
use crate::image::Target;
use crate::node::{Address, ByteMap, LabelMap, Tree};
use crate::opcodes::OpcodeTables;

/// A program under construction. Builder calls append nodes to the root
/// in program order; [`Program::compile`] turns the tree into an image.
pub struct Program {
    pub(crate) tree: Tree,
    pub(crate) opcodes: OpcodeTables,
}

/// Output of a successful compilation.
#[derive(Clone, Debug)]
pub struct Assembly {
    pub origin: Address,
    pub labels: LabelMap,
    pub bytes: ByteMap,
    pub image: Vec<u8>,
    pub listing: String,
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

impl Program {
    pub fn new() -> Self {
        Self {
            tree: Tree::new(),
            opcodes: OpcodeTables::new(),
        }
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Total byte length of everything built so far.
    pub fn length(&self) -> u32 {
        self.tree.recursive_length(self.tree.root())
    }

    /// Pass one: address of every label when the program starts at `origin`.
    pub fn layout(&self, origin: Address) -> Result<LabelMap, GenError> {
        let mut labels = LabelMap::new();
        self.tree.layout(self.tree.root(), &mut labels, origin)?;
        Ok(labels)
    }

    /// Pass two: every emitted byte keyed by its address.
    pub fn resolve(&self, labels: &LabelMap, origin: Address) -> Result<ByteMap, GenError> {
        let mut bytes = ByteMap::new();
        self.tree.resolve(self.tree.root(), labels, &mut bytes, origin)?;
        Ok(bytes)
    }

    /// Runs both passes and produces the image and listing for `target`.
    pub fn compile(&self, target: &Target) -> Result<Assembly, GenError> {
        let origin = target.origin()?;
        let length = self.length();
        target.ensure_fits(length)?;

        tracing::debug!(nodes = self.tree.len(), length, "starting pass 1 at ${:04X}", origin);
        let labels = self.layout(origin)?;

        tracing::debug!(labels = labels.len(), "starting pass 2");
        let bytes = self.resolve(&labels, origin)?;

        let image = target.pack(length, &bytes)?;
        let listing = self.render(&bytes, origin);
        tracing::debug!(bytes = bytes.len(), "compiled");

        Ok(Assembly {
            origin,
            labels,
            bytes,
            image,
            listing,
        })
    }
}
