//! Opcode tables for the CIL instruction set.
//!
//! Two pages cover every instruction defined by ECMA-335 Partition III: the
//! one-byte page (`0x00..=0xE0`) and the extended page reached through the `0xFE`
//! prefix (`0x00..=0x1E`). The tables are indexed directly by the opcode byte, so
//! encoding gaps keep their slot with an empty mnemonic; the decoder reports those
//! slots as malformed input.

use crate::disassembler::{FlowType, InstructionCategory, OperandType};
use crate::disassembler::{FlowType as Flow, InstructionCategory as Cat, OperandType as Op};

/// Static description of one opcode.
#[derive(Debug, Clone, Copy)]
pub struct Opcode {
    /// Mnemonic as listed in ECMA-335 Partition III; empty for reserved slots.
    pub mnemonic: &'static str,
    /// Encoding of the operand bytes that follow the opcode.
    pub operand: OperandType,
    /// Control-flow effect.
    pub flow: FlowType,
    /// Functional grouping.
    pub category: InstructionCategory,
}

const fn op(
    mnemonic: &'static str,
    operand: OperandType,
    flow: FlowType,
    category: InstructionCategory,
) -> Opcode {
    Opcode {
        mnemonic,
        operand,
        flow,
        category,
    }
}

// Filler for encoding gaps. The empty mnemonic is what the decoder keys on.
const RESERVED: Opcode = op("", Op::None, Flow::Sequential, Cat::Misc);

/// The one-byte opcode page, indexed by the leading byte (`0x00..=0xE0`).
///
/// Bytes past the end of the table do not encode any instruction.
pub static INSTRUCTIONS: [Opcode; 0xE1] = [
    op("nop", Op::None, Flow::Sequential, Cat::Misc),          // 0x00
    op("break", Op::None, Flow::Break, Cat::Misc),             // 0x01
    op("ldarg.0", Op::None, Flow::Sequential, Cat::LoadStore), // 0x02
    op("ldarg.1", Op::None, Flow::Sequential, Cat::LoadStore), // 0x03
    op("ldarg.2", Op::None, Flow::Sequential, Cat::LoadStore), // 0x04
    op("ldarg.3", Op::None, Flow::Sequential, Cat::LoadStore), // 0x05
    op("ldloc.0", Op::None, Flow::Sequential, Cat::LoadStore), // 0x06
    op("ldloc.1", Op::None, Flow::Sequential, Cat::LoadStore), // 0x07
    op("ldloc.2", Op::None, Flow::Sequential, Cat::LoadStore), // 0x08
    op("ldloc.3", Op::None, Flow::Sequential, Cat::LoadStore), // 0x09
    op("stloc.0", Op::None, Flow::Sequential, Cat::LoadStore), // 0x0A
    op("stloc.1", Op::None, Flow::Sequential, Cat::LoadStore), // 0x0B
    op("stloc.2", Op::None, Flow::Sequential, Cat::LoadStore), // 0x0C
    op("stloc.3", Op::None, Flow::Sequential, Cat::LoadStore), // 0x0D
    op("ldarg.s", Op::UInt8, Flow::Sequential, Cat::LoadStore), // 0x0E
    op("ldarga.s", Op::UInt8, Flow::Sequential, Cat::LoadStore), // 0x0F
    op("starg.s", Op::UInt8, Flow::Sequential, Cat::LoadStore), // 0x10
    op("ldloc.s", Op::UInt8, Flow::Sequential, Cat::LoadStore), // 0x11
    op("ldloca.s", Op::UInt8, Flow::Sequential, Cat::LoadStore), // 0x12
    op("stloc.s", Op::UInt8, Flow::Sequential, Cat::LoadStore), // 0x13
    op("ldnull", Op::None, Flow::Sequential, Cat::LoadStore),  // 0x14
    op("ldc.i4.m1", Op::None, Flow::Sequential, Cat::LoadStore), // 0x15
    op("ldc.i4.0", Op::None, Flow::Sequential, Cat::LoadStore), // 0x16
    op("ldc.i4.1", Op::None, Flow::Sequential, Cat::LoadStore), // 0x17
    op("ldc.i4.2", Op::None, Flow::Sequential, Cat::LoadStore), // 0x18
    op("ldc.i4.3", Op::None, Flow::Sequential, Cat::LoadStore), // 0x19
    op("ldc.i4.4", Op::None, Flow::Sequential, Cat::LoadStore), // 0x1A
    op("ldc.i4.5", Op::None, Flow::Sequential, Cat::LoadStore), // 0x1B
    op("ldc.i4.6", Op::None, Flow::Sequential, Cat::LoadStore), // 0x1C
    op("ldc.i4.7", Op::None, Flow::Sequential, Cat::LoadStore), // 0x1D
    op("ldc.i4.8", Op::None, Flow::Sequential, Cat::LoadStore), // 0x1E
    op("ldc.i4.s", Op::Int8, Flow::Sequential, Cat::LoadStore), // 0x1F
    op("ldc.i4", Op::Int32, Flow::Sequential, Cat::LoadStore), // 0x20
    op("ldc.i8", Op::Int64, Flow::Sequential, Cat::LoadStore), // 0x21
    op("ldc.r4", Op::Float32, Flow::Sequential, Cat::LoadStore), // 0x22
    op("ldc.r8", Op::Float64, Flow::Sequential, Cat::LoadStore), // 0x23
    RESERVED,                                                  // 0x24
    op("dup", Op::None, Flow::Sequential, Cat::Misc),          // 0x25
    op("pop", Op::None, Flow::Sequential, Cat::Misc),          // 0x26
    op("jmp", Op::Token, Flow::Call, Cat::Call),               // 0x27
    op("call", Op::Token, Flow::Call, Cat::Call),              // 0x28
    op("calli", Op::Token, Flow::Call, Cat::Call),             // 0x29
    op("ret", Op::None, Flow::Return, Cat::ControlFlow),       // 0x2A
    op("br.s", Op::Int8, Flow::UnconditionalBranch, Cat::ControlFlow), // 0x2B
    op("brfalse.s", Op::Int8, Flow::ConditionalBranch, Cat::ControlFlow), // 0x2C
    op("brtrue.s", Op::Int8, Flow::ConditionalBranch, Cat::ControlFlow), // 0x2D
    op("beq.s", Op::Int8, Flow::ConditionalBranch, Cat::ControlFlow), // 0x2E
    op("bge.s", Op::Int8, Flow::ConditionalBranch, Cat::ControlFlow), // 0x2F
    op("bgt.s", Op::Int8, Flow::ConditionalBranch, Cat::ControlFlow), // 0x30
    op("ble.s", Op::Int8, Flow::ConditionalBranch, Cat::ControlFlow), // 0x31
    op("blt.s", Op::Int8, Flow::ConditionalBranch, Cat::ControlFlow), // 0x32
    op("bne.un.s", Op::Int8, Flow::ConditionalBranch, Cat::ControlFlow), // 0x33
    op("bge.un.s", Op::Int8, Flow::ConditionalBranch, Cat::ControlFlow), // 0x34
    op("bgt.un.s", Op::Int8, Flow::ConditionalBranch, Cat::ControlFlow), // 0x35
    op("ble.un.s", Op::Int8, Flow::ConditionalBranch, Cat::ControlFlow), // 0x36
    op("blt.un.s", Op::Int8, Flow::ConditionalBranch, Cat::ControlFlow), // 0x37
    op("br", Op::Int32, Flow::UnconditionalBranch, Cat::ControlFlow), // 0x38
    op("brfalse", Op::Int32, Flow::ConditionalBranch, Cat::ControlFlow), // 0x39
    op("brtrue", Op::Int32, Flow::ConditionalBranch, Cat::ControlFlow), // 0x3A
    op("beq", Op::Int32, Flow::ConditionalBranch, Cat::ControlFlow), // 0x3B
    op("bge", Op::Int32, Flow::ConditionalBranch, Cat::ControlFlow), // 0x3C
    op("bgt", Op::Int32, Flow::ConditionalBranch, Cat::ControlFlow), // 0x3D
    op("ble", Op::Int32, Flow::ConditionalBranch, Cat::ControlFlow), // 0x3E
    op("blt", Op::Int32, Flow::ConditionalBranch, Cat::ControlFlow), // 0x3F
    op("bne.un", Op::Int32, Flow::ConditionalBranch, Cat::ControlFlow), // 0x40
    op("bge.un", Op::Int32, Flow::ConditionalBranch, Cat::ControlFlow), // 0x41
    op("bgt.un", Op::Int32, Flow::ConditionalBranch, Cat::ControlFlow), // 0x42
    op("ble.un", Op::Int32, Flow::ConditionalBranch, Cat::ControlFlow), // 0x43
    op("blt.un", Op::Int32, Flow::ConditionalBranch, Cat::ControlFlow), // 0x44
    op("switch", Op::Switch, Flow::Switch, Cat::ControlFlow),  // 0x45
    op("ldind.i1", Op::None, Flow::Sequential, Cat::LoadStore), // 0x46
    op("ldind.u1", Op::None, Flow::Sequential, Cat::LoadStore), // 0x47
    op("ldind.i2", Op::None, Flow::Sequential, Cat::LoadStore), // 0x48
    op("ldind.u2", Op::None, Flow::Sequential, Cat::LoadStore), // 0x49
    op("ldind.i4", Op::None, Flow::Sequential, Cat::LoadStore), // 0x4A
    op("ldind.u4", Op::None, Flow::Sequential, Cat::LoadStore), // 0x4B
    op("ldind.i8", Op::None, Flow::Sequential, Cat::LoadStore), // 0x4C
    op("ldind.i", Op::None, Flow::Sequential, Cat::LoadStore), // 0x4D
    op("ldind.r4", Op::None, Flow::Sequential, Cat::LoadStore), // 0x4E
    op("ldind.r8", Op::None, Flow::Sequential, Cat::LoadStore), // 0x4F
    op("ldind.ref", Op::None, Flow::Sequential, Cat::LoadStore), // 0x50
    op("stind.ref", Op::None, Flow::Sequential, Cat::LoadStore), // 0x51
    op("stind.i1", Op::None, Flow::Sequential, Cat::LoadStore), // 0x52
    op("stind.i2", Op::None, Flow::Sequential, Cat::LoadStore), // 0x53
    op("stind.i4", Op::None, Flow::Sequential, Cat::LoadStore), // 0x54
    op("stind.i8", Op::None, Flow::Sequential, Cat::LoadStore), // 0x55
    op("stind.r4", Op::None, Flow::Sequential, Cat::LoadStore), // 0x56
    op("stind.r8", Op::None, Flow::Sequential, Cat::LoadStore), // 0x57
    op("add", Op::None, Flow::Sequential, Cat::Arithmetic),    // 0x58
    op("sub", Op::None, Flow::Sequential, Cat::Arithmetic),    // 0x59
    op("mul", Op::None, Flow::Sequential, Cat::Arithmetic),    // 0x5A
    op("div", Op::None, Flow::Sequential, Cat::Arithmetic),    // 0x5B
    op("div.un", Op::None, Flow::Sequential, Cat::Arithmetic), // 0x5C
    op("rem", Op::None, Flow::Sequential, Cat::Arithmetic),    // 0x5D
    op("rem.un", Op::None, Flow::Sequential, Cat::Arithmetic), // 0x5E
    op("and", Op::None, Flow::Sequential, Cat::Bitwise),       // 0x5F
    op("or", Op::None, Flow::Sequential, Cat::Bitwise),        // 0x60
    op("xor", Op::None, Flow::Sequential, Cat::Bitwise),       // 0x61
    op("shl", Op::None, Flow::Sequential, Cat::Bitwise),       // 0x62
    op("shr", Op::None, Flow::Sequential, Cat::Bitwise),       // 0x63
    op("shr.un", Op::None, Flow::Sequential, Cat::Bitwise),    // 0x64
    op("neg", Op::None, Flow::Sequential, Cat::Arithmetic),    // 0x65
    op("not", Op::None, Flow::Sequential, Cat::Bitwise),       // 0x66
    op("conv.i1", Op::None, Flow::Sequential, Cat::Conversion), // 0x67
    op("conv.i2", Op::None, Flow::Sequential, Cat::Conversion), // 0x68
    op("conv.i4", Op::None, Flow::Sequential, Cat::Conversion), // 0x69
    op("conv.i8", Op::None, Flow::Sequential, Cat::Conversion), // 0x6A
    op("conv.r4", Op::None, Flow::Sequential, Cat::Conversion), // 0x6B
    op("conv.r8", Op::None, Flow::Sequential, Cat::Conversion), // 0x6C
    op("conv.u4", Op::None, Flow::Sequential, Cat::Conversion), // 0x6D
    op("conv.u8", Op::None, Flow::Sequential, Cat::Conversion), // 0x6E
    op("callvirt", Op::Token, Flow::Call, Cat::Call),          // 0x6F
    op("cpobj", Op::Token, Flow::Sequential, Cat::ObjectModel), // 0x70
    op("ldobj", Op::Token, Flow::Sequential, Cat::ObjectModel), // 0x71
    op("ldstr", Op::Token, Flow::Sequential, Cat::LoadStore),  // 0x72
    op("newobj", Op::Token, Flow::Call, Cat::ObjectModel),     // 0x73
    op("castclass", Op::Token, Flow::Sequential, Cat::ObjectModel), // 0x74
    op("isinst", Op::Token, Flow::Sequential, Cat::ObjectModel), // 0x75
    op("conv.r.un", Op::None, Flow::Sequential, Cat::Conversion), // 0x76
    RESERVED,                                                  // 0x77
    RESERVED,                                                  // 0x78
    op("unbox", Op::Token, Flow::Sequential, Cat::ObjectModel), // 0x79
    op("throw", Op::None, Flow::Throw, Cat::Exception),        // 0x7A
    op("ldfld", Op::Token, Flow::Sequential, Cat::LoadStore),  // 0x7B
    op("ldflda", Op::Token, Flow::Sequential, Cat::LoadStore), // 0x7C
    op("stfld", Op::Token, Flow::Sequential, Cat::LoadStore),  // 0x7D
    op("ldsfld", Op::Token, Flow::Sequential, Cat::LoadStore), // 0x7E
    op("ldsflda", Op::Token, Flow::Sequential, Cat::LoadStore), // 0x7F
    op("stsfld", Op::Token, Flow::Sequential, Cat::LoadStore), // 0x80
    op("stobj", Op::Token, Flow::Sequential, Cat::ObjectModel), // 0x81
    op("conv.ovf.i1.un", Op::None, Flow::Sequential, Cat::Conversion), // 0x82
    op("conv.ovf.i2.un", Op::None, Flow::Sequential, Cat::Conversion), // 0x83
    op("conv.ovf.i4.un", Op::None, Flow::Sequential, Cat::Conversion), // 0x84
    op("conv.ovf.i8.un", Op::None, Flow::Sequential, Cat::Conversion), // 0x85
    op("conv.ovf.u1.un", Op::None, Flow::Sequential, Cat::Conversion), // 0x86
    op("conv.ovf.u2.un", Op::None, Flow::Sequential, Cat::Conversion), // 0x87
    op("conv.ovf.u4.un", Op::None, Flow::Sequential, Cat::Conversion), // 0x88
    op("conv.ovf.u8.un", Op::None, Flow::Sequential, Cat::Conversion), // 0x89
    op("conv.ovf.i.un", Op::None, Flow::Sequential, Cat::Conversion), // 0x8A
    op("conv.ovf.u.un", Op::None, Flow::Sequential, Cat::Conversion), // 0x8B
    op("box", Op::Token, Flow::Sequential, Cat::ObjectModel),  // 0x8C
    op("newarr", Op::Token, Flow::Sequential, Cat::ObjectModel), // 0x8D
    op("ldlen", Op::None, Flow::Sequential, Cat::ObjectModel), // 0x8E
    op("ldelema", Op::Token, Flow::Sequential, Cat::LoadStore), // 0x8F
    op("ldelem.i1", Op::None, Flow::Sequential, Cat::LoadStore), // 0x90
    op("ldelem.u1", Op::None, Flow::Sequential, Cat::LoadStore), // 0x91
    op("ldelem.i2", Op::None, Flow::Sequential, Cat::LoadStore), // 0x92
    op("ldelem.u2", Op::None, Flow::Sequential, Cat::LoadStore), // 0x93
    op("ldelem.i4", Op::None, Flow::Sequential, Cat::LoadStore), // 0x94
    op("ldelem.u4", Op::None, Flow::Sequential, Cat::LoadStore), // 0x95
    op("ldelem.i8", Op::None, Flow::Sequential, Cat::LoadStore), // 0x96
    op("ldelem.i", Op::None, Flow::Sequential, Cat::LoadStore), // 0x97
    op("ldelem.r4", Op::None, Flow::Sequential, Cat::LoadStore), // 0x98
    op("ldelem.r8", Op::None, Flow::Sequential, Cat::LoadStore), // 0x99
    op("ldelem.ref", Op::None, Flow::Sequential, Cat::LoadStore), // 0x9A
    op("stelem.i", Op::None, Flow::Sequential, Cat::LoadStore), // 0x9B
    op("stelem.i1", Op::None, Flow::Sequential, Cat::LoadStore), // 0x9C
    op("stelem.i2", Op::None, Flow::Sequential, Cat::LoadStore), // 0x9D
    op("stelem.i4", Op::None, Flow::Sequential, Cat::LoadStore), // 0x9E
    op("stelem.i8", Op::None, Flow::Sequential, Cat::LoadStore), // 0x9F
    op("stelem.r4", Op::None, Flow::Sequential, Cat::LoadStore), // 0xA0
    op("stelem.r8", Op::None, Flow::Sequential, Cat::LoadStore), // 0xA1
    op("stelem.ref", Op::None, Flow::Sequential, Cat::LoadStore), // 0xA2
    op("ldelem", Op::Token, Flow::Sequential, Cat::LoadStore), // 0xA3
    op("stelem", Op::Token, Flow::Sequential, Cat::LoadStore), // 0xA4
    op("unbox.any", Op::Token, Flow::Sequential, Cat::ObjectModel), // 0xA5
    RESERVED,                                                  // 0xA6
    RESERVED,                                                  // 0xA7
    RESERVED,                                                  // 0xA8
    RESERVED,                                                  // 0xA9
    RESERVED,                                                  // 0xAA
    RESERVED,                                                  // 0xAB
    RESERVED,                                                  // 0xAC
    RESERVED,                                                  // 0xAD
    RESERVED,                                                  // 0xAE
    RESERVED,                                                  // 0xAF
    RESERVED,                                                  // 0xB0
    RESERVED,                                                  // 0xB1
    RESERVED,                                                  // 0xB2
    op("conv.ovf.i1", Op::None, Flow::Sequential, Cat::Conversion), // 0xB3
    op("conv.ovf.u1", Op::None, Flow::Sequential, Cat::Conversion), // 0xB4
    op("conv.ovf.i2", Op::None, Flow::Sequential, Cat::Conversion), // 0xB5
    op("conv.ovf.u2", Op::None, Flow::Sequential, Cat::Conversion), // 0xB6
    op("conv.ovf.i4", Op::None, Flow::Sequential, Cat::Conversion), // 0xB7
    op("conv.ovf.u4", Op::None, Flow::Sequential, Cat::Conversion), // 0xB8
    op("conv.ovf.i8", Op::None, Flow::Sequential, Cat::Conversion), // 0xB9
    op("conv.ovf.u8", Op::None, Flow::Sequential, Cat::Conversion), // 0xBA
    RESERVED,                                                  // 0xBB
    RESERVED,                                                  // 0xBC
    RESERVED,                                                  // 0xBD
    RESERVED,                                                  // 0xBE
    RESERVED,                                                  // 0xBF
    RESERVED,                                                  // 0xC0
    RESERVED,                                                  // 0xC1
    op("refanyval", Op::Token, Flow::Sequential, Cat::ObjectModel), // 0xC2
    op("ckfinite", Op::None, Flow::Sequential, Cat::Arithmetic), // 0xC3
    RESERVED,                                                  // 0xC4
    RESERVED,                                                  // 0xC5
    op("mkrefany", Op::Token, Flow::Sequential, Cat::ObjectModel), // 0xC6
    RESERVED,                                                  // 0xC7
    RESERVED,                                                  // 0xC8
    RESERVED,                                                  // 0xC9
    RESERVED,                                                  // 0xCA
    RESERVED,                                                  // 0xCB
    RESERVED,                                                  // 0xCC
    RESERVED,                                                  // 0xCD
    RESERVED,                                                  // 0xCE
    RESERVED,                                                  // 0xCF
    op("ldtoken", Op::Token, Flow::Sequential, Cat::LoadStore), // 0xD0
    op("conv.u2", Op::None, Flow::Sequential, Cat::Conversion), // 0xD1
    op("conv.u1", Op::None, Flow::Sequential, Cat::Conversion), // 0xD2
    op("conv.i", Op::None, Flow::Sequential, Cat::Conversion), // 0xD3
    op("conv.ovf.i", Op::None, Flow::Sequential, Cat::Conversion), // 0xD4
    op("conv.ovf.u", Op::None, Flow::Sequential, Cat::Conversion), // 0xD5
    op("add.ovf", Op::None, Flow::Sequential, Cat::Arithmetic), // 0xD6
    op("add.ovf.un", Op::None, Flow::Sequential, Cat::Arithmetic), // 0xD7
    op("mul.ovf", Op::None, Flow::Sequential, Cat::Arithmetic), // 0xD8
    op("mul.ovf.un", Op::None, Flow::Sequential, Cat::Arithmetic), // 0xD9
    op("sub.ovf", Op::None, Flow::Sequential, Cat::Arithmetic), // 0xDA
    op("sub.ovf.un", Op::None, Flow::Sequential, Cat::Arithmetic), // 0xDB
    op("endfinally", Op::None, Flow::Return, Cat::ControlFlow), // 0xDC
    op("leave", Op::Int32, Flow::UnconditionalBranch, Cat::ControlFlow), // 0xDD
    op("leave.s", Op::Int8, Flow::UnconditionalBranch, Cat::ControlFlow), // 0xDE
    op("stind.i", Op::None, Flow::Sequential, Cat::LoadStore), // 0xDF
    op("conv.u", Op::None, Flow::Sequential, Cat::Conversion), // 0xE0
];

/// The extended opcode page reached through the `0xFE` prefix, indexed by the
/// second byte (`0x00..=0x1E`).
pub static INSTRUCTIONS_FE: [Opcode; 0x1F] = [
    op("arglist", Op::None, Flow::Sequential, Cat::Misc),   // 0x00
    op("ceq", Op::None, Flow::Sequential, Cat::Comparison), // 0x01
    op("cgt", Op::None, Flow::Sequential, Cat::Comparison), // 0x02
    op("cgt.un", Op::None, Flow::Sequential, Cat::Comparison), // 0x03
    op("clt", Op::None, Flow::Sequential, Cat::Comparison), // 0x04
    op("clt.un", Op::None, Flow::Sequential, Cat::Comparison), // 0x05
    op("ldftn", Op::Token, Flow::Sequential, Cat::Call),    // 0x06
    op("ldvirtftn", Op::Token, Flow::Sequential, Cat::Call), // 0x07
    RESERVED,                                               // 0x08
    op("ldarg", Op::UInt16, Flow::Sequential, Cat::LoadStore), // 0x09
    op("ldarga", Op::UInt16, Flow::Sequential, Cat::LoadStore), // 0x0A
    op("starg", Op::UInt16, Flow::Sequential, Cat::LoadStore), // 0x0B
    op("ldloc", Op::UInt16, Flow::Sequential, Cat::LoadStore), // 0x0C
    op("ldloca", Op::UInt16, Flow::Sequential, Cat::LoadStore), // 0x0D
    op("stloc", Op::UInt16, Flow::Sequential, Cat::LoadStore), // 0x0E
    op("localloc", Op::None, Flow::Sequential, Cat::Memory), // 0x0F
    RESERVED,                                               // 0x10
    op("endfilter", Op::None, Flow::Return, Cat::ControlFlow), // 0x11
    op("unaligned.", Op::UInt8, Flow::Meta, Cat::Prefix),   // 0x12
    op("volatile.", Op::None, Flow::Meta, Cat::Prefix),     // 0x13
    op("tail.", Op::None, Flow::Meta, Cat::Prefix),         // 0x14
    op("initobj", Op::Token, Flow::Sequential, Cat::ObjectModel), // 0x15
    op("constrained.", Op::Token, Flow::Meta, Cat::Prefix), // 0x16
    op("cpblk", Op::None, Flow::Sequential, Cat::Memory),   // 0x17
    op("initblk", Op::None, Flow::Sequential, Cat::Memory), // 0x18
    op("no.", Op::UInt8, Flow::Meta, Cat::Prefix),          // 0x19
    op("rethrow", Op::None, Flow::Throw, Cat::Exception),   // 0x1A
    RESERVED,                                               // 0x1B
    op("sizeof", Op::Token, Flow::Sequential, Cat::ObjectModel), // 0x1C
    op("refanytype", Op::None, Flow::Sequential, Cat::ObjectModel), // 0x1D
    op("readonly.", Op::None, Flow::Meta, Cat::Prefix),     // 0x1E
];
