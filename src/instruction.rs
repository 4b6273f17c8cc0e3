//! Instruction-word decoding: opcode selection and per-parameter
//! addressing modes.
//!
//! An instruction is a single decimal-encoded integer. The low two digits
//! select the opcode; each higher digit selects the addressing mode of one
//! parameter, least significant first. `1002` is therefore `multiply` with
//! modes (position, immediate, position) — digits beyond the written word
//! read as zero and default to position mode.

const OPCODE_ADD: i64 = 1;
const OPCODE_MULTIPLY: i64 = 2;
const OPCODE_READ_INPUT: i64 = 3;
const OPCODE_WRITE_OUTPUT: i64 = 4;
const OPCODE_JUMP_IF_TRUE: i64 = 5;
const OPCODE_JUMP_IF_FALSE: i64 = 6;
const OPCODE_LESS_THAN: i64 = 7;
const OPCODE_EQUALS: i64 = 8;
const OPCODE_HALT: i64 = 99;

/// Addressing mode of one parameter slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The word in the slot is an address; dereference it for the value.
    Position,
    /// The word in the slot is the value itself.
    Immediate,
}

/// The closed set of instruction kinds. Decoded once per fetch so the
/// engine dispatches on a tag instead of re-checking magic numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Add,
    Multiply,
    ReadInput,
    WriteOutput,
    JumpIfTrue,
    JumpIfFalse,
    LessThan,
    Equals,
    Halt,
}

impl Opcode {
    /// Decode the opcode selector of an instruction word. Returns `None`
    /// for selectors outside the set; raising the fault is the engine's
    /// job, which also knows the pointer the word was fetched from.
    pub fn decode(word: i64) -> Option<Opcode> {
        match word % 100 {
            OPCODE_ADD => Some(Opcode::Add),
            OPCODE_MULTIPLY => Some(Opcode::Multiply),
            OPCODE_READ_INPUT => Some(Opcode::ReadInput),
            OPCODE_WRITE_OUTPUT => Some(Opcode::WriteOutput),
            OPCODE_JUMP_IF_TRUE => Some(Opcode::JumpIfTrue),
            OPCODE_JUMP_IF_FALSE => Some(Opcode::JumpIfFalse),
            OPCODE_LESS_THAN => Some(Opcode::LessThan),
            OPCODE_EQUALS => Some(Opcode::Equals),
            OPCODE_HALT => Some(Opcode::Halt),
            _ => None,
        }
    }
}

/// Addressing mode of parameter `param` (1-indexed, 1..=3) of `word`.
///
/// The mode digit sits at decimal position `10^(param + 1)`. Only a digit
/// of exactly 1 selects immediate mode; everything else, including digits
/// beyond the word's written length, reads as position mode. Total
/// function, no error conditions.
pub fn mode(word: i64, param: u32) -> Mode {
    debug_assert!((1..=3).contains(&param));
    if (word / 10i64.pow(param + 1)) % 10 == 1 {
        Mode::Immediate
    } else {
        Mode::Position
    }
}
