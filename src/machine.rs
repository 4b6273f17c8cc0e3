//! The stored-program machine: linear memory, I/O queues, and the
//! fetch-decode-execute engine.

use std::collections::VecDeque;

use crate::error::Fault;
use crate::instruction::{Mode, Opcode, mode};

/// Linear, zero-indexed storage shared by code and data.
///
/// Addresses arrive as `i64` because memory cells double as addresses;
/// anything negative or past the end is rejected. The buffer never grows:
/// its length is fixed when the program is loaded.
#[derive(Debug, Clone)]
struct Memory {
    cells: Vec<i64>,
}

impl Memory {
    fn new(program: &[i64]) -> Self {
        Memory {
            cells: program.to_vec(),
        }
    }

    fn len(&self) -> usize {
        self.cells.len()
    }

    fn get(&self, address: i64) -> Option<i64> {
        let address = usize::try_from(address).ok()?;
        self.cells.get(address).copied()
    }

    fn set(&mut self, address: i64, value: i64) -> Option<()> {
        let address = usize::try_from(address).ok()?;
        *self.cells.get_mut(address)? = value;
        Some(())
    }
}

/// Where the engine last came to rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Constructed, no run yet.
    Ready,
    /// A run reached opcode 99. Memory and output are final for that run.
    Halted,
    /// A run hit an invalid opcode or an out-of-bounds address. Memory and
    /// output are whatever existed at the moment of the fault.
    Faulted,
}

/// A stored-program machine over signed 64-bit integers.
///
/// The machine owns one memory buffer, copied from the caller's program at
/// construction, plus an input queue and an output log that are rebuilt on
/// every [`run`](Machine::run). Programs are self-modifying by design:
/// every store writes into the same buffer instructions are fetched from,
/// and a run mutates memory destructively. Re-running a halted machine
/// starts again from address 0 against the *mutated* memory, not the
/// original program — construct a fresh machine to start clean.
#[derive(Debug, Clone)]
pub struct Machine {
    memory: Memory,
    pointer: usize,
    input: VecDeque<i64>,
    output: Vec<i64>,
    state: State,
}

impl Machine {
    /// Load `program` into a fresh machine. The program is copied; the
    /// caller's buffer is never aliased or mutated.
    pub fn new(program: &[i64]) -> Self {
        Machine {
            memory: Memory::new(program),
            pointer: 0,
            input: VecDeque::new(),
            output: Vec::new(),
            state: State::Ready,
        }
    }

    /// Execute from address 0 until halt or fault, feeding `inputs` to the
    /// read-input instruction in order.
    ///
    /// Both queues are reset on entry: `inputs` replaces any leftover input
    /// and the output log starts empty. On halt the accumulated outputs are
    /// returned in production order; on fault the error identifies the
    /// offending word or address and the instruction pointer.
    pub fn run(&mut self, inputs: &[i64]) -> Result<Vec<i64>, Fault> {
        self.pointer = 0;
        self.input = inputs.iter().copied().collect();
        self.output.clear();

        loop {
            match self.step() {
                Ok(Some(next)) => self.pointer = next,
                Ok(None) => {
                    self.state = State::Halted;
                    return Ok(self.output.clone());
                }
                Err(fault) => {
                    self.state = State::Faulted;
                    return Err(fault);
                }
            }
        }
    }

    /// Snapshot of current memory contents, not a live alias.
    pub fn memory(&self) -> Vec<i64> {
        self.memory.cells.clone()
    }

    /// Terminal condition of the most recent run, or [`State::Ready`] if
    /// the machine has not run yet.
    pub fn state(&self) -> State {
        self.state
    }

    /// Execute one instruction. Returns the next pointer, or `None` on
    /// halt.
    fn step(&mut self) -> Result<Option<usize>, Fault> {
        let pointer = self.pointer;
        let word = self.load(pointer as i64)?;
        let opcode = Opcode::decode(word).ok_or(Fault::InvalidOpcode { word, pointer })?;

        let next = match opcode {
            Opcode::Add => {
                // Arithmetic wraps in two's complement; overflow is not a
                // fault and must not panic on caller-supplied programs.
                let sum = self.read(word, 1)?.wrapping_add(self.read(word, 2)?);
                self.write(word, 3, sum)?;
                pointer as i64 + 4
            }
            Opcode::Multiply => {
                let product = self.read(word, 1)?.wrapping_mul(self.read(word, 2)?);
                self.write(word, 3, product)?;
                pointer as i64 + 4
            }
            Opcode::ReadInput => {
                // An empty queue yields 0 instead of suspending. Programs
                // depend on this; it is load-bearing, not a bug.
                let value = self.input.pop_front().unwrap_or(0);
                self.write(word, 1, value)?;
                pointer as i64 + 2
            }
            Opcode::WriteOutput => {
                let value = self.read(word, 1)?;
                self.output.push(value);
                pointer as i64 + 2
            }
            Opcode::JumpIfTrue => {
                if self.read(word, 1)? != 0 {
                    self.read(word, 2)?
                } else {
                    pointer as i64 + 3
                }
            }
            Opcode::JumpIfFalse => {
                if self.read(word, 1)? == 0 {
                    self.read(word, 2)?
                } else {
                    pointer as i64 + 3
                }
            }
            Opcode::LessThan => {
                let flag = i64::from(self.read(word, 1)? < self.read(word, 2)?);
                self.write(word, 3, flag)?;
                pointer as i64 + 4
            }
            Opcode::Equals => {
                let flag = i64::from(self.read(word, 1)? == self.read(word, 2)?);
                self.write(word, 3, flag)?;
                pointer as i64 + 4
            }
            Opcode::Halt => return Ok(None),
        };

        // The next pointer may be anywhere in [0, len]. Exactly len is not
        // itself a fault; the fetch at that address raises one.
        if next < 0 || next as usize > self.memory.len() {
            return Err(Fault::AddressOutOfBounds {
                address: next,
                pointer,
            });
        }
        Ok(Some(next as usize))
    }

    /// Resolved value of parameter `param` of the instruction at the
    /// current pointer: position mode dereferences the slot's word as an
    /// address, immediate mode takes it literally.
    fn read(&self, word: i64, param: u32) -> Result<i64, Fault> {
        let slot = self.pointer as i64 + param as i64;
        let operand = self.load(slot)?;
        match mode(word, param) {
            Mode::Immediate => Ok(operand),
            Mode::Position => self.load(operand),
        }
    }

    /// Store `value` through parameter `param`. Position mode stores at
    /// the address held in the slot; immediate mode degenerates to storing
    /// into the slot itself (no real program emits it, but resolution is
    /// mode-agnostic).
    fn write(&mut self, word: i64, param: u32, value: i64) -> Result<(), Fault> {
        let slot = self.pointer as i64 + param as i64;
        let address = match mode(word, param) {
            Mode::Position => self.load(slot)?,
            Mode::Immediate => slot,
        };
        self.store(address, value)
    }

    fn load(&self, address: i64) -> Result<i64, Fault> {
        self.memory.get(address).ok_or(Fault::AddressOutOfBounds {
            address,
            pointer: self.pointer,
        })
    }

    fn store(&mut self, address: i64, value: i64) -> Result<(), Fault> {
        let pointer = self.pointer;
        self.memory
            .set(address, value)
            .ok_or(Fault::AddressOutOfBounds { address, pointer })
    }
}
