//! The instruction model produced by the decoder.
//!
//! [`crate::disassembler::Instruction`] is a fully decoded CIL instruction: mnemonic,
//! operand, control-flow class and resolved branch targets. All offsets are relative
//! to whatever base the caller handed to the decoder, which for method bodies is the
//! start of the code stream (the `IL_xxxx` label space).

use crate::metadata::token::Token;

/// Broad functional grouping of a CIL instruction.
///
/// The grouping follows the section structure of ECMA-335 Partition III. It carries
/// no semantics of its own; consumers that only care about control flow should look
/// at [`crate::disassembler::FlowType`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionCategory {
    /// Loads and stores of arguments, locals, constants, fields, elements and
    /// indirect values.
    LoadStore,
    /// Integer and floating-point arithmetic, with and without overflow checks.
    Arithmetic,
    /// Bit-level operations and shifts.
    Bitwise,
    /// Comparisons that push a result value.
    Comparison,
    /// Branches, switches, returns and other transfers of control.
    ControlFlow,
    /// Direct, indirect and virtual calls, and function-pointer loads.
    Call,
    /// Allocation, casting, boxing and the rest of the object model.
    ObjectModel,
    /// Numeric conversions.
    Conversion,
    /// Raw memory allocation and block operations.
    Memory,
    /// Exception raising.
    Exception,
    /// Prefixes that modify the instruction that follows them.
    Prefix,
    /// Instructions without a more specific grouping (`nop`, `dup`, `pop`, ...).
    Misc,
}

/// Control-flow effect of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowType {
    /// Execution continues with the next instruction.
    Sequential,
    /// Execution continues at the branch target.
    UnconditionalBranch,
    /// Execution continues at the branch target or falls through.
    ConditionalBranch,
    /// Execution continues at one of several targets, or falls through.
    Switch,
    /// Control transfers to another method.
    Call,
    /// Control leaves the current method, filter or protected region.
    Return,
    /// An exception is raised.
    Throw,
    /// A debugger trap.
    Break,
    /// No control-flow effect of its own; the instruction is a prefix.
    Meta,
}

/// Encoding of the operand bytes that follow an opcode.
///
/// The variants describe raw widths, not meaning: a short branch and `ldc.i4.s`
/// both carry an [`OperandType::Int8`]. What the value stands for follows from the
/// instruction itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandType {
    /// No operand bytes.
    None,
    /// A signed 8-bit value.
    Int8,
    /// An unsigned 8-bit value.
    UInt8,
    /// A signed 16-bit value.
    Int16,
    /// An unsigned 16-bit value.
    UInt16,
    /// A signed 32-bit value.
    Int32,
    /// An unsigned 32-bit value.
    UInt32,
    /// A signed 64-bit value.
    Int64,
    /// An unsigned 64-bit value.
    UInt64,
    /// A 32-bit IEEE 754 value.
    Float32,
    /// A 64-bit IEEE 754 value.
    Float64,
    /// A 4-byte metadata token.
    Token,
    /// A 4-byte case count followed by that many signed 32-bit jump offsets.
    Switch,
}

/// An inline numeric operand value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Immediate {
    /// A signed 8-bit value.
    Int8(i8),
    /// An unsigned 8-bit value.
    UInt8(u8),
    /// A signed 16-bit value.
    Int16(i16),
    /// An unsigned 16-bit value.
    UInt16(u16),
    /// A signed 32-bit value.
    Int32(i32),
    /// An unsigned 32-bit value.
    UInt32(u32),
    /// A signed 64-bit value.
    Int64(i64),
    /// An unsigned 64-bit value.
    UInt64(u64),
    /// A 32-bit IEEE 754 value.
    Float32(f32),
    /// A 64-bit IEEE 754 value.
    Float64(f64),
}

/// A decoded operand.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// The instruction has no operand.
    None,
    /// An inline numeric value.
    Immediate(Immediate),
    /// A metadata token referencing a table row or heap entry.
    Token(Token),
    /// The relative jump offsets of a `switch` instruction, in case order.
    Switch(Vec<i32>),
}

/// A single decoded CIL instruction.
///
/// Produced by [`crate::disassembler::decode_instruction`]. Branch and switch
/// targets are resolved to absolute positions in the same offset space as
/// [`Instruction::offset`], so consumers never deal with relative jump encodings.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// Offset of the instruction's first byte, relative to the base the decoder
    /// was started with.
    pub offset: u64,
    /// Total encoded size in bytes, prefix and operand included.
    pub size: u64,
    /// `0xFE` for instructions from the extended page, `0` otherwise.
    pub prefix: u8,
    /// The opcode byte. For extended-page instructions this is the byte after
    /// the `0xFE` prefix.
    pub opcode: u8,
    /// Mnemonic as listed in ECMA-335 Partition III.
    pub mnemonic: &'static str,
    /// Functional grouping.
    pub category: InstructionCategory,
    /// Control-flow effect.
    pub flow_type: FlowType,
    /// The decoded operand, if any.
    pub operand: Operand,
    /// Resolved targets of branch and switch instructions; empty for all others.
    pub branch_targets: Vec<u64>,
}

impl Instruction {
    /// Returns `true` if this instruction is a prefix for the one that follows it.
    #[must_use]
    pub fn is_prefix(&self) -> bool {
        self.flow_type == FlowType::Meta
    }
}
