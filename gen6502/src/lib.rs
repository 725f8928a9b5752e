//! 6502 code generator driven by builder calls, with an optional listing
//! printer (feature: "listing")
//!
//! ## Features
//! - **No source text**: programs are built by calling one method per
//!   instruction. Operands are literals or labels, and labels may be
//!   referenced before they are defined.
//! - **Two passes, no relaxation**: every node's length is fixed when it is
//!   built, so pass one assigns final addresses and pass two resolves bytes.
//! - **Addressing modes**: implied, accumulator, immediate, zero page
//!   (`,X`/`,Y`), absolute (`,X`/`,Y`), relative branches, inline data.
//! - **Hard checks**: out-of-range operands, branches beyond -126/+129
//!   bytes, duplicate or undefined labels all fail the compilation.
//! - **Cartridge image**: fixed-size buffer mapped at the top of memory,
//!   zero-filled, with reset/IRQ vectors pointing at the origin.
//! - **Atari 2600 helpers**: TIA/PIA registers, colours, per-object register
//!   groups and frame-timing routines.
//!
//! ## Optional Features
//! - `listing`: enables functions to print and save the listing.
//!
//! ## Basic Usage
//! ```rust
//! use gen6502::{Program, Target};
//!
//! fn main() -> Result<(), gen6502::GenError> {
//!     let mut program = Program::new();
//!     program.label("start");
//!     program.lda_immediate(5)?;
//!     program.sta_zero_page(2)?;
//!     program.jmp_absolute("start")?;
//!
//!     let assembly = program.compile(&Target::default())?;
//!     assert_eq!(&assembly.image[..7], &[0xA9, 0x05, 0x85, 0x02, 0x4C, 0x00, 0xF0]);
//!     Ok(())
//! }
//! ```
//!
//! ## License
//! This project is released under [The Unlicense](https://unlicense.org/).

mod encoder;
mod error;
mod image;
mod listing;
mod node;
mod opcodes;
mod operand;
mod program;
pub mod vcs;

// Public exports
pub use error::{GenError, ensure_equal, ensure_in_range};
pub use image::{Target, VECTOR_BYTES};
pub use node::{Address, ByteMap, LabelMap, Node, NodeId, NodeKind, Tree, branch_offset};
pub use opcodes::{AddressingMode, OpcodeTables};
pub use operand::Operand;
pub use program::{Assembly, Program};
