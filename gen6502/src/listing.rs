//! Human-readable listing
//!
//! Labels get a block of their own; every instruction or data byte gets one
//! line with four columns: address, text, decimal bytes, hex bytes.

use std::fmt::Write as _;

use crate::node::{Address, ByteMap, NodeId, NodeKind, Tree};
use crate::opcodes::AddressingMode;
use crate::program::{Assembly, Program};

const TEXT_COLUMN: usize = 40;
const DECIMAL_COLUMN: usize = 15;

fn format_address(address: Address) -> String {
    format!("{:02X} {} : ", address, address)
}

impl Tree {
    /// Appends the listing for `id` and its subtree, placed at `address`.
    pub fn render(&self, id: NodeId, bytes: &ByteMap, mut address: Address, out: &mut String) {
        let node = self.node(id);
        if let Some(line) = self.line(id, bytes, address) {
            out.push_str(&line);
            out.push('\n');
        }
        address += node.length;

        for &child in &node.children {
            self.render(child, bytes, address, out);
            address += self.recursive_length(child);
        }
    }

    fn line(&self, id: NodeId, bytes: &ByteMap, address: Address) -> Option<String> {
        let node = self.node(id);
        match &node.kind {
            NodeKind::Label => {
                let name = node.label.as_deref().unwrap_or_default();
                Some(format!("\n{}{}:\n", format_address(address), name))
            }
            NodeKind::Instruction {
                mnemonic,
                mode,
                operand,
                ..
            } => {
                let mut text = format!("{}{}{}", format_address(address), mnemonic, mode.suffix());
                if let Some(operand) = operand {
                    let _ = write!(text, " {}", operand);
                }
                let codes: Vec<u8> = (address..address + self.recursive_length(id))
                    .filter_map(|a| bytes.get(&a).copied())
                    .collect();
                let mut decimal = join(&codes, |b| b.to_string());
                if *mode == AddressingMode::Relative {
                    if let Some(&offset) = codes.get(1) {
                        let _ = write!(decimal, " [{}]", offset as i8);
                    }
                }
                Some(columns(&text, &decimal, &join(&codes, |b| format!("{:02X}", b))))
            }
            NodeKind::Data(value) => {
                let text = format!("{}.byte {}", format_address(address), value);
                Some(columns(&text, &value.to_string(), &format!("{:02X}", value)))
            }
            _ => None,
        }
    }
}

fn join(codes: &[u8], f: impl Fn(u8) -> String) -> String {
    codes.iter().map(|&b| f(b)).collect::<Vec<_>>().join(" ")
}

fn columns(text: &str, decimal: &str, hex: &str) -> String {
    format!(
        "{:<text_w$}{:<dec_w$}{}",
        text,
        decimal,
        hex,
        text_w = TEXT_COLUMN,
        dec_w = DECIMAL_COLUMN
    )
}

impl Program {
    /// Listing of the whole program; `bytes` must come from pass two.
    pub fn render(&self, bytes: &ByteMap, origin: Address) -> String {
        let mut out = String::new();
        self.tree.render(self.tree.root(), bytes, origin, &mut out);
        out
    }
}

impl Assembly {
    #[cfg(feature = "listing")]
    pub fn print_listing(&self) {
        println!("\nAssembly Listing:");
        println!("{}", "-".repeat(70));
        print!("{}", self.listing);
    }

    #[cfg(feature = "listing")]
    pub fn save_listing(&self, path: impl AsRef<std::path::Path>) -> std::io::Result<()> {
        use std::io::Write;

        let mut f = std::fs::File::create(path)?;
        f.write_all(self.listing.as_bytes())
    }
}
