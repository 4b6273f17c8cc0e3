use thiserror::Error;

/// Unrecoverable runtime conditions that end a run with an error outcome.
///
/// Both variants carry the instruction pointer at the moment of the fault
/// and the offending value, so a caller can report exactly where a program
/// went wrong. Neither is recoverable within a run: the machine stops and
/// memory/output are left as they were when the fault was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    /// The low two decimal digits of the fetched word match no instruction.
    #[error("invalid opcode in word {word} at address {pointer}")]
    InvalidOpcode { word: i64, pointer: usize },

    /// A parameter, store destination, or next instruction pointer resolved
    /// outside the loaded program.
    #[error("address {address} out of bounds (instruction pointer {pointer})")]
    AddressOutOfBounds { address: i64, pointer: usize },
}
