//! CIL instruction decoding.
//!
//! The disassembler is deliberately linear: it decodes a method body front to
//! back, which is exactly the order an IL listing prints it in. Branch and switch
//! targets are still resolved, so listings can label them, but no basic blocks or
//! control-flow graphs are built.
//!
//! # Example
//!
//! ```rust
//! use cildump::{disassembler::decode_stream, Parser};
//!
//! // ldarg.0, ldc.i4.1, add, ret
//! let code = [0x02, 0x17, 0x58, 0x2A];
//! let mut parser = Parser::new(&code);
//!
//! for instruction in decode_stream(&mut parser, 0)? {
//!     println!("IL_{:04x}: {}", instruction.offset, instruction.mnemonic);
//! }
//! # Ok::<(), cildump::Error>(())
//! ```

mod decoder;
mod instruction;
mod instructions;

pub use decoder::{decode_instruction, decode_stream};
pub use instruction::{
    FlowType, Immediate, Instruction, InstructionCategory, Operand, OperandType,
};
pub use instructions::{Opcode, INSTRUCTIONS, INSTRUCTIONS_FE};
