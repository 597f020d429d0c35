use thiserror::Error;

use crate::emulator::instruction::Instruction;

/// Reasons a program can be rejected before anything is executed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("ROM is empty")]
    Empty,

    #[error("ROM is too large ({size} bytes), max size is {max_size} bytes")]
    TooLarge { size: usize, max_size: usize },
}

/// A fault raised while stepping. All of them are fatal to the emulator
/// that raised it: it will keep returning the same error from then on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExecutionError {
    #[error("illegal instruction {opcode:#06X} at {address:#05X}")]
    IllegalInstruction { opcode: u16, address: u16 },

    #[error("stack underflow at {address:#05X}, returned with an empty call stack")]
    StackUnderflow { address: u16 },

    #[error("stack overflow at {address:#05X}, too many nested calls")]
    StackOverflow { address: u16 },

    #[error("memory access out of bounds at address {address:#06X}")]
    AddressOutOfBounds { address: usize },

    #[error("operand out of range in {instruction:?} at {address:#05X}")]
    InvalidOperand { instruction: Instruction, address: u16 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emulator::instruction::{Const, Reg};
    use pretty_assertions::assert_eq;

    #[test]
    fn messages_include_the_offending_values() {
        let too_large = LoadError::TooLarge { size: 4000, max_size: 3584 };
        assert_eq!(too_large.to_string(), "ROM is too large (4000 bytes), max size is 3584 bytes");

        let illegal = ExecutionError::IllegalInstruction { opcode: 0x8AB8, address: 0x204 };
        assert_eq!(illegal.to_string(), "illegal instruction 0x8AB8 at 0x204");

        let invalid = ExecutionError::InvalidOperand {
            instruction: Instruction::SetRegToConst(Reg(16), Const(1)),
            address: 0x200,
        };
        assert_eq!(
            invalid.to_string(),
            "operand out of range in SetRegToConst(Reg(16), Const(1)) at 0x200"
        );
    }
}
