//! Node factories, one per addressing mode
//!
//! Each factory appends an instruction node to the program root, with the
//! operand bytes as its children, and returns the instruction's id.

use crate::error::{GenError, ensure_in_range};
use crate::node::{NodeId, NodeKind};
use crate::opcodes::AddressingMode;
use crate::operand::Operand;
use crate::program::Program;

impl Program {
    /// Zero-length marker binding `name` to the address of whatever follows.
    pub fn label(&mut self, name: impl Into<String>) -> NodeId {
        let root = self.tree.root();
        self.tree.push(root, Some(name.into()), 0, NodeKind::Label)
    }

    /// Inline table: a label followed by one node per byte.
    pub fn data(&mut self, name: impl Into<String>, values: &[u8]) -> NodeId {
        let id = self.label(name);
        let root = self.tree.root();
        for &value in values {
            self.tree.push(root, None, 1, NodeKind::Data(value));
        }
        id
    }

    pub fn implied(&mut self, mnemonic: &str, opcode: u8) -> NodeId {
        self.instruction(mnemonic, AddressingMode::Implied, opcode, None)
    }

    pub fn accumulator(&mut self, mnemonic: &str, opcode: u8) -> NodeId {
        self.instruction(mnemonic, AddressingMode::Accumulator, opcode, None)
    }

    /// Opcode plus a literal byte. The value is checked here, not at resolve time.
    pub fn immediate(&mut self, mnemonic: &str, opcode: u8, value: i32) -> Result<NodeId, GenError> {
        ensure_in_range("immediate value", value, 0, 0xFF)?;
        let id = self.instruction(
            mnemonic,
            AddressingMode::Immediate,
            opcode,
            Some(Operand::Literal(value)),
        );
        self.tree.push(id, None, 1, NodeKind::Immediate(value as u8));
        Ok(id)
    }

    pub fn zero_page(&mut self, mnemonic: &str, opcode: u8, address: impl Into<Operand>) -> NodeId {
        self.zero_page_mode(AddressingMode::ZeroPage, mnemonic, opcode, address.into())
    }

    pub fn zero_page_x(&mut self, mnemonic: &str, opcode: u8, address: impl Into<Operand>) -> NodeId {
        self.zero_page_mode(AddressingMode::ZeroPageX, mnemonic, opcode, address.into())
    }

    pub fn zero_page_y(&mut self, mnemonic: &str, opcode: u8, address: impl Into<Operand>) -> NodeId {
        self.zero_page_mode(AddressingMode::ZeroPageY, mnemonic, opcode, address.into())
    }

    pub fn absolute(&mut self, mnemonic: &str, opcode: u8, address: impl Into<Operand>) -> NodeId {
        self.absolute_mode(AddressingMode::Absolute, mnemonic, opcode, address.into())
    }

    pub fn absolute_x(&mut self, mnemonic: &str, opcode: u8, address: impl Into<Operand>) -> NodeId {
        self.absolute_mode(AddressingMode::AbsoluteX, mnemonic, opcode, address.into())
    }

    pub fn absolute_y(&mut self, mnemonic: &str, opcode: u8, address: impl Into<Operand>) -> NodeId {
        self.absolute_mode(AddressingMode::AbsoluteY, mnemonic, opcode, address.into())
    }

    /// Branch: opcode plus a signed offset byte, range-checked at resolve time.
    pub fn relative(&mut self, mnemonic: &str, opcode: u8, target: impl Into<Operand>) -> NodeId {
        let target = target.into();
        let id = self.instruction(
            mnemonic,
            AddressingMode::Relative,
            opcode,
            Some(target.clone()),
        );
        self.tree.push(id, None, 1, NodeKind::BranchOffset(target));
        id
    }

    /// Encodes `mnemonic` in `mode`, looking the opcode up in the 6502 table.
    pub fn emit(
        &mut self,
        mnemonic: &str,
        mode: AddressingMode,
        operand: Option<Operand>,
    ) -> Result<NodeId, GenError> {
        let opcode = self
            .opcodes
            .lookup(mnemonic, mode)
            .ok_or_else(|| GenError::UnknownOpcode {
                mnemonic: mnemonic.to_string(),
                mode,
            })?;

        match (mode, operand) {
            (AddressingMode::Implied, None) => Ok(self.implied(mnemonic, opcode)),
            (AddressingMode::Accumulator, None) => Ok(self.accumulator(mnemonic, opcode)),
            (AddressingMode::Immediate, Some(Operand::Literal(value))) => {
                self.immediate(mnemonic, opcode, value)
            }
            (
                AddressingMode::ZeroPage | AddressingMode::ZeroPageX | AddressingMode::ZeroPageY,
                Some(operand),
            ) => Ok(self.zero_page_mode(mode, mnemonic, opcode, operand)),
            (
                AddressingMode::Absolute | AddressingMode::AbsoluteX | AddressingMode::AbsoluteY,
                Some(operand),
            ) => Ok(self.absolute_mode(mode, mnemonic, opcode, operand)),
            (AddressingMode::Relative, Some(operand)) => Ok(self.relative(mnemonic, opcode, operand)),
            _ => Err(GenError::InvalidOperand {
                mnemonic: mnemonic.to_string(),
                mode,
            }),
        }
    }

    fn instruction(
        &mut self,
        mnemonic: &str,
        mode: AddressingMode,
        opcode: u8,
        operand: Option<Operand>,
    ) -> NodeId {
        let root = self.tree.root();
        self.tree.push(
            root,
            None,
            1,
            NodeKind::Instruction {
                mnemonic: mnemonic.to_string(),
                mode,
                opcode,
                operand,
            },
        )
    }

    fn zero_page_mode(
        &mut self,
        mode: AddressingMode,
        mnemonic: &str,
        opcode: u8,
        address: Operand,
    ) -> NodeId {
        let id = self.instruction(mnemonic, mode, opcode, Some(address.clone()));
        self.tree.push(id, None, 1, NodeKind::ZeroPage(address));
        id
    }

    fn absolute_mode(
        &mut self,
        mode: AddressingMode,
        mnemonic: &str,
        opcode: u8,
        address: Operand,
    ) -> NodeId {
        let id = self.instruction(mnemonic, mode, opcode, Some(address.clone()));
        self.tree.push(id, None, 1, NodeKind::AbsoluteLow(address.clone()));
        self.tree.push(id, None, 1, NodeKind::AbsoluteHigh(address));
        id
    }
}

// Named wrappers for the instructions the frame routines and demos use.
impl Program {
    pub fn sei(&mut self) -> Result<NodeId, GenError> {
        self.emit("SEI", AddressingMode::Implied, None)
    }

    pub fn cld(&mut self) -> Result<NodeId, GenError> {
        self.emit("CLD", AddressingMode::Implied, None)
    }

    pub fn txs(&mut self) -> Result<NodeId, GenError> {
        self.emit("TXS", AddressingMode::Implied, None)
    }

    pub fn inx(&mut self) -> Result<NodeId, GenError> {
        self.emit("INX", AddressingMode::Implied, None)
    }

    pub fn dex(&mut self) -> Result<NodeId, GenError> {
        self.emit("DEX", AddressingMode::Implied, None)
    }

    pub fn dey(&mut self) -> Result<NodeId, GenError> {
        self.emit("DEY", AddressingMode::Implied, None)
    }

    pub fn nop(&mut self) -> Result<NodeId, GenError> {
        self.emit("NOP", AddressingMode::Implied, None)
    }

    pub fn rts(&mut self) -> Result<NodeId, GenError> {
        self.emit("RTS", AddressingMode::Implied, None)
    }

    pub fn lda_immediate(&mut self, value: i32) -> Result<NodeId, GenError> {
        self.emit("LDA", AddressingMode::Immediate, Some(Operand::Literal(value)))
    }

    pub fn ldx_immediate(&mut self, value: i32) -> Result<NodeId, GenError> {
        self.emit("LDX", AddressingMode::Immediate, Some(Operand::Literal(value)))
    }

    pub fn ldy_immediate(&mut self, value: i32) -> Result<NodeId, GenError> {
        self.emit("LDY", AddressingMode::Immediate, Some(Operand::Literal(value)))
    }

    pub fn lda_zero_page(&mut self, address: impl Into<Operand>) -> Result<NodeId, GenError> {
        self.emit("LDA", AddressingMode::ZeroPage, Some(address.into()))
    }

    pub fn lda_absolute(&mut self, address: impl Into<Operand>) -> Result<NodeId, GenError> {
        self.emit("LDA", AddressingMode::Absolute, Some(address.into()))
    }

    pub fn lda_absolute_x(&mut self, address: impl Into<Operand>) -> Result<NodeId, GenError> {
        self.emit("LDA", AddressingMode::AbsoluteX, Some(address.into()))
    }

    pub fn sta_zero_page(&mut self, address: impl Into<Operand>) -> Result<NodeId, GenError> {
        self.emit("STA", AddressingMode::ZeroPage, Some(address.into()))
    }

    pub fn sta_zero_page_x(&mut self, address: impl Into<Operand>) -> Result<NodeId, GenError> {
        self.emit("STA", AddressingMode::ZeroPageX, Some(address.into()))
    }

    pub fn sta_absolute(&mut self, address: impl Into<Operand>) -> Result<NodeId, GenError> {
        self.emit("STA", AddressingMode::Absolute, Some(address.into()))
    }

    pub fn jmp_absolute(&mut self, address: impl Into<Operand>) -> Result<NodeId, GenError> {
        self.emit("JMP", AddressingMode::Absolute, Some(address.into()))
    }

    pub fn jsr(&mut self, address: impl Into<Operand>) -> Result<NodeId, GenError> {
        self.emit("JSR", AddressingMode::Absolute, Some(address.into()))
    }

    pub fn bne(&mut self, target: impl Into<Operand>) -> Result<NodeId, GenError> {
        self.emit("BNE", AddressingMode::Relative, Some(target.into()))
    }

    pub fn beq(&mut self, target: impl Into<Operand>) -> Result<NodeId, GenError> {
        self.emit("BEQ", AddressingMode::Relative, Some(target.into()))
    }

    pub fn bpl(&mut self, target: impl Into<Operand>) -> Result<NodeId, GenError> {
        self.emit("BPL", AddressingMode::Relative, Some(target.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn immediate_accepts_byte_bounds() {
        let mut program = Program::new();
        assert!(program.lda_immediate(0).is_ok());
        assert!(program.lda_immediate(255).is_ok());
    }

    #[test]
    fn immediate_rejects_values_outside_a_byte_at_construction() {
        let mut program = Program::new();
        assert!(matches!(
            program.lda_immediate(256),
            Err(GenError::OutOfRange { value: 256, .. })
        ));
        assert!(program.lda_immediate(-1).is_err());
        // nothing was appended for the rejected calls
        assert!(program.tree().is_empty());
    }

    #[test]
    fn composite_lengths_match_addressing_modes() {
        let mut program = Program::new();
        let implied = program.implied("NOP", 0xEA);
        let imm = program.immediate("LDA", 0xA9, 1).unwrap();
        let zp = program.zero_page("STA", 0x85, 0x80u8);
        let abs = program.absolute_y("LDA", 0xB9, "table");
        let rel = program.relative("BNE", 0xD0, "loop");
        let tree = program.tree();

        assert_eq!(tree.recursive_length(implied), 1);
        assert_eq!(tree.recursive_length(imm), 2);
        assert_eq!(tree.recursive_length(zp), 2);
        assert_eq!(tree.recursive_length(abs), 3);
        assert_eq!(tree.recursive_length(rel), 2);
    }

    #[test]
    fn data_is_a_label_plus_one_node_per_byte() {
        let mut program = Program::new();
        let table = program.data("table", &[1, 2, 3]);
        let tree = program.tree();
        assert_eq!(tree.recursive_length(table), 0);
        assert_eq!(tree.recursive_length(tree.root()), 3);
    }

    #[test]
    fn emit_rejects_unknown_combinations() {
        let mut program = Program::new();
        assert!(matches!(
            program.emit("STA", AddressingMode::Immediate, Some(Operand::Literal(1))),
            Err(GenError::UnknownOpcode { .. })
        ));
        assert!(matches!(
            program.emit("LDA", AddressingMode::Immediate, Some(Operand::from("x"))),
            Err(GenError::InvalidOperand { .. })
        ));
        assert!(matches!(
            program.emit("JMP", AddressingMode::Absolute, None),
            Err(GenError::InvalidOperand { .. })
        ));
    }

    #[test]
    fn named_wrappers_pick_their_opcode() {
        type Wrapper = fn(&mut Program) -> Result<NodeId, GenError>;
        let table: [(Wrapper, u8); 24] = [
            (|p| p.sei(), 0x78),
            (|p| p.cld(), 0xD8),
            (|p| p.txs(), 0x9A),
            (|p| p.inx(), 0xE8),
            (|p| p.dex(), 0xCA),
            (|p| p.dey(), 0x88),
            (|p| p.nop(), 0xEA),
            (|p| p.rts(), 0x60),
            (|p| p.lda_immediate(1), 0xA9),
            (|p| p.ldx_immediate(1), 0xA2),
            (|p| p.ldy_immediate(1), 0xA0),
            (|p| p.lda_zero_page(0x80u8), 0xA5),
            (|p| p.lda_absolute(0x0284u16), 0xAD),
            (|p| p.lda_absolute_x(0x0284u16), 0xBD),
            (|p| p.sta_zero_page(0x80u8), 0x85),
            (|p| p.sta_zero_page_x(0x80u8), 0x95),
            (|p| p.sta_absolute(0x0296u16), 0x8D),
            (|p| p.jmp_absolute(0xF000u16), 0x4C),
            (|p| p.jsr(0xF000u16), 0x20),
            (|p| p.bne("here"), 0xD0),
            (|p| p.beq("here"), 0xF0),
            (|p| p.bpl("here"), 0x10),
            (|p| p.emit("BIT", AddressingMode::ZeroPage, Some(Operand::Literal(0x80))), 0x24),
            (|p| p.emit("ASL", AddressingMode::Accumulator, None), 0x0A),
        ];

        for (wrapper, opcode) in table {
            let mut program = Program::new();
            let id = wrapper(&mut program).unwrap();
            match &program.tree().node(id).kind {
                NodeKind::Instruction { opcode: got, .. } => assert_eq!(*got, opcode),
                other => panic!("expected an instruction, got {:?}", other),
            }
        }
    }
}
