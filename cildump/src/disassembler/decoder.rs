//! Linear CIL instruction decoding.
//!
//! The decoder walks a byte stream front to back and turns it into
//! [`crate::disassembler::Instruction`] values. Offsets are tracked relative to
//! whatever base the caller passes in; for method bodies that base is `0`, which
//! makes every decoded offset an `IL_xxxx` label position.
//!
//! # Decoding one instruction
//!
//! ```rust
//! use cildump::{disassembler::decode_instruction, Parser};
//!
//! let code = [0x2A]; // ret
//! let mut parser = Parser::new(&code);
//! let instruction = decode_instruction(&mut parser, 0)?;
//! assert_eq!(instruction.mnemonic, "ret");
//! # Ok::<(), cildump::Error>(())
//! ```
//!
//! # Decoding a whole body
//!
//! ```rust
//! use cildump::{disassembler::decode_stream, Parser};
//!
//! let code = [0x00, 0x2A]; // nop, ret
//! let mut parser = Parser::new(&code);
//! let instructions = decode_stream(&mut parser, 0)?;
//! assert_eq!(instructions.len(), 2);
//! assert_eq!(instructions[1].offset, 1);
//! # Ok::<(), cildump::Error>(())
//! ```

use crate::{
    disassembler::{
        FlowType, Immediate, Instruction, Operand, OperandType, INSTRUCTIONS, INSTRUCTIONS_FE,
    },
    file::parser::Parser,
    metadata::token::Token,
    Result,
};

/// Decodes the instruction at the parser's current position.
///
/// Handles both the one-byte page and the `0xFE`-prefixed extended page, reads the
/// operand bytes the opcode calls for, and resolves branch and switch targets into
/// the offset space of `offset`. The parser is left positioned at the first byte
/// after the instruction, so sequential calls decode a stream.
///
/// # Arguments
///
/// * `parser` - A parser positioned at the first byte of the instruction
/// * `offset` - Position of that byte in the caller's offset space (`0` for the
///   start of a method body)
///
/// # Errors
///
/// Returns [`crate::Error::Malformed`] for bytes that do not encode an instruction
/// (including the reserved gaps inside the opcode pages) and
/// [`crate::Error::OutOfBounds`] if the operand bytes are truncated.
///
/// # Examples
///
/// ```rust
/// use cildump::{
///     disassembler::{decode_instruction, Immediate, Operand},
///     Parser,
/// };
///
/// // ldc.i4.s -3
/// let code = [0x1F, 0xFD];
/// let mut parser = Parser::new(&code);
///
/// let instruction = decode_instruction(&mut parser, 0x20)?;
/// assert_eq!(instruction.mnemonic, "ldc.i4.s");
/// assert_eq!(instruction.offset, 0x20);
/// assert_eq!(instruction.size, 2);
/// assert_eq!(
///     instruction.operand,
///     Operand::Immediate(Immediate::Int8(-3))
/// );
/// # Ok::<(), cildump::Error>(())
/// ```
pub fn decode_instruction(parser: &mut Parser, offset: u64) -> Result<Instruction> {
    let start = parser.pos();
    let first_byte = parser.read_le::<u8>()?;

    let (spec, prefix, opcode) = match first_byte {
        0xFE => {
            let second_byte = parser.read_le::<u8>()?;

            match INSTRUCTIONS_FE.get(second_byte as usize) {
                Some(spec) => (spec, 0xFE_u8, second_byte),
                None => return Err(malformed_error!("Invalid opcode: FE {:02X}", second_byte)),
            }
        }
        _ => match INSTRUCTIONS.get(first_byte as usize) {
            Some(spec) => (spec, 0_u8, first_byte),
            None => return Err(malformed_error!("Invalid opcode: {:02X}", first_byte)),
        },
    };

    if spec.mnemonic.is_empty() {
        return Err(malformed_error!(
            "Reserved opcode: {:04X}",
            (u16::from(prefix) << 8) | u16::from(opcode)
        ));
    }

    let operand = match spec.operand {
        OperandType::None => Operand::None,
        OperandType::Int8 => Operand::Immediate(Immediate::Int8(parser.read_le::<i8>()?)),
        OperandType::UInt8 => Operand::Immediate(Immediate::UInt8(parser.read_le::<u8>()?)),
        OperandType::Int16 => Operand::Immediate(Immediate::Int16(parser.read_le::<i16>()?)),
        OperandType::UInt16 => Operand::Immediate(Immediate::UInt16(parser.read_le::<u16>()?)),
        OperandType::Int32 => Operand::Immediate(Immediate::Int32(parser.read_le::<i32>()?)),
        OperandType::UInt32 => Operand::Immediate(Immediate::UInt32(parser.read_le::<u32>()?)),
        OperandType::Int64 => Operand::Immediate(Immediate::Int64(parser.read_le::<i64>()?)),
        OperandType::UInt64 => Operand::Immediate(Immediate::UInt64(parser.read_le::<u64>()?)),
        OperandType::Float32 => Operand::Immediate(Immediate::Float32(parser.read_le::<f32>()?)),
        OperandType::Float64 => Operand::Immediate(Immediate::Float64(parser.read_le::<f64>()?)),
        OperandType::Token => Operand::Token(Token::new(parser.read_le::<u32>()?)),
        OperandType::Switch => {
            let case_count = parser.read_le::<u32>()? as usize;

            // The count comes from the input; cap the allocation by what the
            // stream can still deliver before trusting it.
            let mut targets = Vec::with_capacity(case_count.min(parser.remaining() / 4));
            for _ in 0..case_count {
                targets.push(parser.read_le::<i32>()?);
            }

            Operand::Switch(targets)
        }
    };

    let size = (parser.pos() - start) as u64;

    let mut instruction = Instruction {
        offset,
        size,
        prefix,
        opcode,
        mnemonic: spec.mnemonic,
        category: spec.category,
        flow_type: spec.flow,
        operand,
        branch_targets: Vec::new(),
    };

    match instruction.flow_type {
        FlowType::ConditionalBranch | FlowType::UnconditionalBranch => {
            // Relative jumps are taken from the first byte after the instruction.
            let relative = match instruction.operand {
                Operand::Immediate(Immediate::Int8(value)) => Some(i64::from(value)),
                Operand::Immediate(Immediate::Int32(value)) => Some(i64::from(value)),
                _ => None,
            };

            if let Some(relative) = relative {
                let next = offset.wrapping_add(instruction.size);
                instruction
                    .branch_targets
                    .push(next.wrapping_add_signed(relative));
            }
        }
        FlowType::Switch => {
            if let Operand::Switch(targets) = &instruction.operand {
                let next = offset.wrapping_add(instruction.size);
                for &target in targets {
                    instruction
                        .branch_targets
                        .push(next.wrapping_add_signed(i64::from(target)));
                }
            }
        }
        _ => {}
    }

    Ok(instruction)
}

/// Decodes instructions until the parser runs out of data.
///
/// Instructions are decoded in linear order; each one's offset is its distance
/// from `offset`. No control-flow analysis happens here, so unreachable bytes and
/// data trailing the last `ret` decode like everything else.
///
/// # Arguments
///
/// * `parser` - A parser positioned at the first instruction
/// * `offset` - Position of that instruction in the caller's offset space
///
/// # Errors
///
/// Returns [`crate::Error::Malformed`] on invalid or reserved opcodes and
/// [`crate::Error::OutOfBounds`] if the final instruction's operand is truncated.
///
/// # Examples
///
/// ```rust
/// use cildump::{disassembler::decode_stream, Parser};
///
/// // nop, ldloc.0, ret
/// let code = [0x00, 0x06, 0x2A];
/// let mut parser = Parser::new(&code);
///
/// let instructions = decode_stream(&mut parser, 0)?;
/// assert_eq!(instructions.len(), 3);
/// assert_eq!(instructions[1].mnemonic, "ldloc.0");
/// assert_eq!(instructions[2].offset, 2);
/// # Ok::<(), cildump::Error>(())
/// ```
pub fn decode_stream(parser: &mut Parser, offset: u64) -> Result<Vec<Instruction>> {
    let mut current = offset;
    let mut instructions = Vec::new();

    while parser.has_more_data() {
        let instruction = decode_instruction(parser, current)?;

        current = current.wrapping_add(instruction.size);
        instructions.push(instruction);
    }

    Ok(instructions)
}
