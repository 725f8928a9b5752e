//! 6502 opcode tables and addressing modes

use std::collections::HashMap;
use std::fmt;

/// Addressing modes the encoder library can produce.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Relative,
}

impl AddressingMode {
    /// Suffix appended to the mnemonic in listings, e.g. `LDA_zeroPageX`.
    pub fn suffix(self) -> &'static str {
        match self {
            AddressingMode::Implied | AddressingMode::Accumulator | AddressingMode::Relative => "",
            AddressingMode::Immediate => "_immediate",
            AddressingMode::ZeroPage => "_zeroPage",
            AddressingMode::ZeroPageX => "_zeroPageX",
            AddressingMode::ZeroPageY => "_zeroPageY",
            AddressingMode::Absolute => "_absolute",
            AddressingMode::AbsoluteX => "_absoluteX",
            AddressingMode::AbsoluteY => "_absoluteY",
        }
    }
}

impl fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AddressingMode::Implied => "implied",
            AddressingMode::Accumulator => "accumulator",
            AddressingMode::Immediate => "immediate",
            AddressingMode::ZeroPage => "zeropage",
            AddressingMode::ZeroPageX => "zeropage,X",
            AddressingMode::ZeroPageY => "zeropage,Y",
            AddressingMode::Absolute => "absolute",
            AddressingMode::AbsoluteX => "absolute,X",
            AddressingMode::AbsoluteY => "absolute,Y",
            AddressingMode::Relative => "relative",
        };
        f.write_str(name)
    }
}

pub struct OpcodeTables {
    /// Single-mode opcodes (implied, relative)
    pub opcodes: HashMap<&'static str, (AddressingMode, u8)>,
    /// Operand-taking opcodes by mnemonic -> addressing mode -> opcode
    pub extended_opcodes: HashMap<&'static str, HashMap<AddressingMode, u8>>,
}

impl OpcodeTables {
    pub fn new() -> Self {
        let mut tables = Self {
            opcodes: HashMap::new(),
            extended_opcodes: HashMap::new(),
        };
        tables.init_opcodes();
        tables.init_address_modes();
        tables
    }

    pub fn lookup(&self, mnemonic: &str, mode: AddressingMode) -> Option<u8> {
        if let Some(&(m, opcode)) = self.opcodes.get(mnemonic) {
            if m == mode {
                return Some(opcode);
            }
        }
        self.extended_opcodes
            .get(mnemonic)
            .and_then(|modes| modes.get(&mode))
            .copied()
    }

    fn init_opcodes(&mut self) {
        use AddressingMode::{Implied as I, Relative as R};

        self.opcodes = HashMap::from([
            ("BRK", (I, 0x00)), ("NOP", (I, 0xEA)),
            ("RTS", (I, 0x60)), ("RTI", (I, 0x40)),
            ("CLC", (I, 0x18)), ("SEC", (I, 0x38)), ("CLD", (I, 0xD8)), ("SED", (I, 0xF8)),
            ("CLI", (I, 0x58)), ("SEI", (I, 0x78)), ("CLV", (I, 0xB8)),
            ("INX", (I, 0xE8)), ("INY", (I, 0xC8)), ("DEX", (I, 0xCA)), ("DEY", (I, 0x88)),
            ("TAX", (I, 0xAA)), ("TXA", (I, 0x8A)), ("TAY", (I, 0xA8)), ("TYA", (I, 0x98)),
            ("TSX", (I, 0xBA)), ("TXS", (I, 0x9A)),
            ("PHA", (I, 0x48)), ("PLA", (I, 0x68)), ("PHP", (I, 0x08)), ("PLP", (I, 0x28)),
            ("BCC", (R, 0x90)), ("BCS", (R, 0xB0)), ("BEQ", (R, 0xF0)), ("BMI", (R, 0x30)),
            ("BNE", (R, 0xD0)), ("BPL", (R, 0x10)), ("BVC", (R, 0x50)), ("BVS", (R, 0x70)),
        ]);
    }

    fn init_address_modes(&mut self) {
        use AddressingMode::*;

        let lda = HashMap::from([
            (Immediate, 0xA9), (ZeroPage, 0xA5), (ZeroPageX, 0xB5),
            (Absolute, 0xAD), (AbsoluteX, 0xBD), (AbsoluteY, 0xB9),
        ]);
        let ldx = HashMap::from([
            (Immediate, 0xA2), (ZeroPage, 0xA6), (ZeroPageY, 0xB6),
            (Absolute, 0xAE), (AbsoluteY, 0xBE),
        ]);
        let ldy = HashMap::from([
            (Immediate, 0xA0), (ZeroPage, 0xA4), (ZeroPageX, 0xB4),
            (Absolute, 0xAC), (AbsoluteX, 0xBC),
        ]);
        let sta = HashMap::from([
            (ZeroPage, 0x85), (ZeroPageX, 0x95),
            (Absolute, 0x8D), (AbsoluteX, 0x9D), (AbsoluteY, 0x99),
        ]);
        let stx = HashMap::from([(ZeroPage, 0x86), (ZeroPageY, 0x96), (Absolute, 0x8E)]);
        let sty = HashMap::from([(ZeroPage, 0x84), (ZeroPageX, 0x94), (Absolute, 0x8C)]);
        let adc = HashMap::from([
            (Immediate, 0x69), (ZeroPage, 0x65), (ZeroPageX, 0x75),
            (Absolute, 0x6D), (AbsoluteX, 0x7D), (AbsoluteY, 0x79),
        ]);
        let sbc = HashMap::from([
            (Immediate, 0xE9), (ZeroPage, 0xE5), (ZeroPageX, 0xF5),
            (Absolute, 0xED), (AbsoluteX, 0xFD), (AbsoluteY, 0xF9),
        ]);
        let and_ = HashMap::from([
            (Immediate, 0x29), (ZeroPage, 0x25), (ZeroPageX, 0x35),
            (Absolute, 0x2D), (AbsoluteX, 0x3D), (AbsoluteY, 0x39),
        ]);
        let ora = HashMap::from([
            (Immediate, 0x09), (ZeroPage, 0x05), (ZeroPageX, 0x15),
            (Absolute, 0x0D), (AbsoluteX, 0x1D), (AbsoluteY, 0x19),
        ]);
        let eor = HashMap::from([
            (Immediate, 0x49), (ZeroPage, 0x45), (ZeroPageX, 0x55),
            (Absolute, 0x4D), (AbsoluteX, 0x5D), (AbsoluteY, 0x59),
        ]);
        let cmp = HashMap::from([
            (Immediate, 0xC9), (ZeroPage, 0xC5), (ZeroPageX, 0xD5),
            (Absolute, 0xCD), (AbsoluteX, 0xDD), (AbsoluteY, 0xD9),
        ]);
        let cpx = HashMap::from([(Immediate, 0xE0), (ZeroPage, 0xE4), (Absolute, 0xEC)]);
        let cpy = HashMap::from([(Immediate, 0xC0), (ZeroPage, 0xC4), (Absolute, 0xCC)]);
        let bit = HashMap::from([(ZeroPage, 0x24), (Absolute, 0x2C)]);
        let asl = HashMap::from([
            (Accumulator, 0x0A), (ZeroPage, 0x06), (ZeroPageX, 0x16),
            (Absolute, 0x0E), (AbsoluteX, 0x1E),
        ]);
        let lsr = HashMap::from([
            (Accumulator, 0x4A), (ZeroPage, 0x46), (ZeroPageX, 0x56),
            (Absolute, 0x4E), (AbsoluteX, 0x5E),
        ]);
        let rol = HashMap::from([
            (Accumulator, 0x2A), (ZeroPage, 0x26), (ZeroPageX, 0x36),
            (Absolute, 0x2E), (AbsoluteX, 0x3E),
        ]);
        let ror = HashMap::from([
            (Accumulator, 0x6A), (ZeroPage, 0x66), (ZeroPageX, 0x76),
            (Absolute, 0x6E), (AbsoluteX, 0x7E),
        ]);
        let dec = HashMap::from([
            (ZeroPage, 0xC6), (ZeroPageX, 0xD6), (Absolute, 0xCE), (AbsoluteX, 0xDE),
        ]);
        let inc = HashMap::from([
            (ZeroPage, 0xE6), (ZeroPageX, 0xF6), (Absolute, 0xEE), (AbsoluteX, 0xFE),
        ]);
        let jmp = HashMap::from([(Absolute, 0x4C)]);
        let jsr = HashMap::from([(Absolute, 0x20)]);

        self.extended_opcodes = HashMap::from([
            ("LDA", lda), ("LDX", ldx), ("LDY", ldy),
            ("STA", sta), ("STX", stx), ("STY", sty),
            ("ADC", adc), ("SBC", sbc),
            ("AND", and_), ("ORA", ora), ("EOR", eor),
            ("CMP", cmp), ("CPX", cpx), ("CPY", cpy),
            ("BIT", bit),
            ("ASL", asl), ("LSR", lsr), ("ROL", rol), ("ROR", ror),
            ("DEC", dec), ("INC", inc),
            ("JMP", jmp), ("JSR", jsr),
        ]);
    }
}

impl Default for OpcodeTables {
    fn default() -> Self {
        Self::new()
    }
}
