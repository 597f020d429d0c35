use crate::util::bit_splitter::BitSplitter;

/// A wrapper for addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addr(pub u16);

/// A wrapper for registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reg(pub u8);

/// A wrapper for constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Const(pub u8);

/// A single instruction from the CHIP-8 instruction set.
/// Two bytes written in hexadecimal, with the following special characters:
/// - NNN: address
/// - NN: 8-bit constant
/// - N: 4-bit constant
/// - X and Y: 4-bit register identifier
/// - PC: Program counter
/// - I: 16 bit register for memory address
/// - VN: One of the 16 available variables (register identifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    ClearScreen, // 00E0
    Return, // 00EE
    Goto(Addr), // 1NNN
    Call(Addr), // 2NNN, and 0NNN as a legacy alias
    IfRegEqConst(Reg, Const), // 3XNN
    IfRegNeqConst(Reg, Const), // 4XNN
    IfRegEqReg(Reg, Reg), // 5XY0
    SetRegToConst(Reg, Const), // 6XNN
    IncRegByConst(Reg, Const), // 7XNN
    SetRegToReg(Reg, Reg), // 8XY0
    BitwiseOr(Reg, Reg), // 8XY1
    BitwiseAnd(Reg, Reg), // 8XY2
    BitwiseXor(Reg, Reg), // 8XY3
    IncRegByReg(Reg, Reg), // 8XY4
    DecRegByReg(Reg, Reg), // 8XY5
    BitshiftRight(Reg), // 8XY6
    SetVxVyMinusVx(Reg, Reg), // 8XY7
    BitshiftLeft(Reg), // 8XYE
    IfRegNeqReg(Reg, Reg), // 9XY0
    SetI(Addr), // ANNN
    SetPcToV0PlusAddr(Addr), // BNNN
    SetVxRand(Reg, Const), // CXNN
    Draw(Reg, Reg, Const), // DXYN
    IfKeyEqVx(Reg), // EX9E
    IfKeyNeqVx(Reg), // EXA1
    SetRegToDelayTimer(Reg), // FX07
    SetRegToGetKey(Reg), // FX0A
    SetDelayTimerToReg(Reg), // FX15
    SetSoundTimerToReg(Reg), // FX18
    AddRegToI(Reg), // FX1E
    SetIToSpriteAddrVx(Reg), // FX29
    SetIToBcdOfReg(Reg), // FX33
    RegDump(Reg), // FX55
    RegLoad(Reg), // FX65
}

impl Instruction {
    pub fn from_two_u8(left: u8, right: u8) -> Option<Instruction> {
        Instruction::decode(BitSplitter::new(left, right))
    }

    pub fn from_u16(value: u16) -> Option<Instruction> {
        Instruction::decode(BitSplitter::from_u16(value))
    }

    /// Whether every register names one of V0..VF, every address fits in 12 bits
    /// and every 4-bit constant fits in a nibble. Always true for decoded opcodes.
    pub fn operands_in_range(&self) -> bool {
        use Instruction::*;
        let reg = |Reg(r): &Reg| *r < 16;
        let addr = |Addr(a): &Addr| *a <= 0x0FFF;
        match self {
            ClearScreen | Return => true,
            Goto(a) | Call(a) | SetI(a) | SetPcToV0PlusAddr(a) => addr(a),
            IfRegEqConst(x, _) | IfRegNeqConst(x, _) | SetRegToConst(x, _)
            | IncRegByConst(x, _) | SetVxRand(x, _) => reg(x),
            IfRegEqReg(x, y) | SetRegToReg(x, y) | BitwiseOr(x, y) | BitwiseAnd(x, y)
            | BitwiseXor(x, y) | IncRegByReg(x, y) | DecRegByReg(x, y)
            | SetVxVyMinusVx(x, y) | IfRegNeqReg(x, y) => reg(x) && reg(y),
            Draw(x, y, Const(n)) => reg(x) && reg(y) && *n < 16,
            BitshiftRight(x) | BitshiftLeft(x) | IfKeyEqVx(x) | IfKeyNeqVx(x)
            | SetRegToDelayTimer(x) | SetRegToGetKey(x) | SetDelayTimerToReg(x)
            | SetSoundTimerToReg(x) | AddRegToI(x) | SetIToSpriteAddrVx(x)
            | SetIToBcdOfReg(x) | RegDump(x) | RegLoad(x) => reg(x),
        }
    }

    /// Map an opcode onto its instruction, or `None` if the opcode
    /// has no meaning in the instruction set.
    fn decode(opcode: BitSplitter) -> Option<Instruction> {
        let instruction = match (opcode.op(), opcode.x(), opcode.y(), opcode.n()) {
            (0, 0, 0xE, 0) => Instruction::ClearScreen,
            (0, 0, 0xE, 0xE) => Instruction::Return,
            (0, _, _, _) => Instruction::Call(Addr(opcode.nnn())),
            (1, _, _, _) => Instruction::Goto(Addr(opcode.nnn())),
            (2, _, _, _) => Instruction::Call(Addr(opcode.nnn())),
            (3, x, _, _) => Instruction::IfRegEqConst(Reg(x), Const(opcode.nn())),
            (4, x, _, _) => Instruction::IfRegNeqConst(Reg(x), Const(opcode.nn())),
            (5, x, y, 0) => Instruction::IfRegEqReg(Reg(x), Reg(y)),
            (6, x, _, _) => Instruction::SetRegToConst(Reg(x), Const(opcode.nn())),
            (7, x, _, _) => Instruction::IncRegByConst(Reg(x), Const(opcode.nn())),
            (8, x, y, 0) => Instruction::SetRegToReg(Reg(x), Reg(y)),
            (8, x, y, 1) => Instruction::BitwiseOr(Reg(x), Reg(y)),
            (8, x, y, 2) => Instruction::BitwiseAnd(Reg(x), Reg(y)),
            (8, x, y, 3) => Instruction::BitwiseXor(Reg(x), Reg(y)),
            (8, x, y, 4) => Instruction::IncRegByReg(Reg(x), Reg(y)),
            (8, x, y, 5) => Instruction::DecRegByReg(Reg(x), Reg(y)),
            (8, x, _, 6) => Instruction::BitshiftRight(Reg(x)),
            (8, x, y, 7) => Instruction::SetVxVyMinusVx(Reg(x), Reg(y)),
            (8, x, _, 0xE) => Instruction::BitshiftLeft(Reg(x)),
            (9, x, y, 0) => Instruction::IfRegNeqReg(Reg(x), Reg(y)),
            (0xA, _, _, _) => Instruction::SetI(Addr(opcode.nnn())),
            (0xB, _, _, _) => Instruction::SetPcToV0PlusAddr(Addr(opcode.nnn())),
            (0xC, x, _, _) => Instruction::SetVxRand(Reg(x), Const(opcode.nn())),
            (0xD, x, y, n) => Instruction::Draw(Reg(x), Reg(y), Const(n)),
            (0xE, x, 9, 0xE) => Instruction::IfKeyEqVx(Reg(x)),
            (0xE, x, 0xA, 1) => Instruction::IfKeyNeqVx(Reg(x)),
            (0xF, x, 0, 7) => Instruction::SetRegToDelayTimer(Reg(x)),
            (0xF, x, 0, 0xA) => Instruction::SetRegToGetKey(Reg(x)),
            (0xF, x, 1, 5) => Instruction::SetDelayTimerToReg(Reg(x)),
            (0xF, x, 1, 8) => Instruction::SetSoundTimerToReg(Reg(x)),
            (0xF, x, 1, 0xE) => Instruction::AddRegToI(Reg(x)),
            (0xF, x, 2, 9) => Instruction::SetIToSpriteAddrVx(Reg(x)),
            (0xF, x, 3, 3) => Instruction::SetIToBcdOfReg(Reg(x)),
            (0xF, x, 5, 5) => Instruction::RegDump(Reg(x)),
            (0xF, x, 6, 5) => Instruction::RegLoad(Reg(x)),
            _ => return None,
        };
        Some(instruction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0x00E0 => Some(Instruction::ClearScreen) ; "clear screen")]
    #[test_case(0x00EE => Some(Instruction::Return) ; "return")]
    #[test_case(0x0123 => Some(Instruction::Call(Addr(0x123))) ; "legacy machine call")]
    #[test_case(0x1025 => Some(Instruction::Goto(Addr(0x25))) ; "goto")]
    #[test_case(0x2037 => Some(Instruction::Call(Addr(0x37))) ; "call")]
    #[test_case(0x3A08 => Some(Instruction::IfRegEqConst(Reg(0xA), Const(8))) ; "skip if eq const")]
    #[test_case(0x4A08 => Some(Instruction::IfRegNeqConst(Reg(0xA), Const(8))) ; "skip if neq const")]
    #[test_case(0x5AB0 => Some(Instruction::IfRegEqReg(Reg(0xA), Reg(0xB))) ; "skip if eq reg")]
    #[test_case(0x6B23 => Some(Instruction::SetRegToConst(Reg(0xB), Const(0x23))) ; "set const")]
    #[test_case(0x7CA1 => Some(Instruction::IncRegByConst(Reg(0xC), Const(0xA1))) ; "add const")]
    #[test_case(0x8AB0 => Some(Instruction::SetRegToReg(Reg(0xA), Reg(0xB))) ; "copy reg")]
    #[test_case(0x8DE1 => Some(Instruction::BitwiseOr(Reg(0xD), Reg(0xE))) ; "or")]
    #[test_case(0x8DE2 => Some(Instruction::BitwiseAnd(Reg(0xD), Reg(0xE))) ; "and")]
    #[test_case(0x8DE3 => Some(Instruction::BitwiseXor(Reg(0xD), Reg(0xE))) ; "xor")]
    #[test_case(0x8AB4 => Some(Instruction::IncRegByReg(Reg(0xA), Reg(0xB))) ; "add reg")]
    #[test_case(0x8AB5 => Some(Instruction::DecRegByReg(Reg(0xA), Reg(0xB))) ; "sub reg")]
    #[test_case(0x8AB6 => Some(Instruction::BitshiftRight(Reg(0xA))) ; "shift right")]
    #[test_case(0x8AB7 => Some(Instruction::SetVxVyMinusVx(Reg(0xA), Reg(0xB))) ; "reverse sub")]
    #[test_case(0x8A0E => Some(Instruction::BitshiftLeft(Reg(0xA))) ; "shift left")]
    #[test_case(0x9AB0 => Some(Instruction::IfRegNeqReg(Reg(0xA), Reg(0xB))) ; "skip if neq reg")]
    #[test_case(0xA025 => Some(Instruction::SetI(Addr(0x25))) ; "set i")]
    #[test_case(0xB025 => Some(Instruction::SetPcToV0PlusAddr(Addr(0x25))) ; "jump plus v0")]
    #[test_case(0xCA23 => Some(Instruction::SetVxRand(Reg(0xA), Const(0x23))) ; "random")]
    #[test_case(0xDABC => Some(Instruction::Draw(Reg(0xA), Reg(0xB), Const(0xC))) ; "draw")]
    #[test_case(0xEA9E => Some(Instruction::IfKeyEqVx(Reg(0xA))) ; "skip if key")]
    #[test_case(0xEAA1 => Some(Instruction::IfKeyNeqVx(Reg(0xA))) ; "skip if not key")]
    #[test_case(0xFA07 => Some(Instruction::SetRegToDelayTimer(Reg(0xA))) ; "read delay")]
    #[test_case(0xFA0A => Some(Instruction::SetRegToGetKey(Reg(0xA))) ; "wait key")]
    #[test_case(0xFA15 => Some(Instruction::SetDelayTimerToReg(Reg(0xA))) ; "write delay")]
    #[test_case(0xFA18 => Some(Instruction::SetSoundTimerToReg(Reg(0xA))) ; "write sound")]
    #[test_case(0xFA1E => Some(Instruction::AddRegToI(Reg(0xA))) ; "add to i")]
    #[test_case(0xFA29 => Some(Instruction::SetIToSpriteAddrVx(Reg(0xA))) ; "font glyph")]
    #[test_case(0xFA33 => Some(Instruction::SetIToBcdOfReg(Reg(0xA))) ; "bcd")]
    #[test_case(0xFA55 => Some(Instruction::RegDump(Reg(0xA))) ; "reg dump")]
    #[test_case(0xFA65 => Some(Instruction::RegLoad(Reg(0xA))) ; "reg load")]
    fn opcodes_are_parsed_correctly(opcode: u16) -> Option<Instruction> {
        Instruction::from_u16(opcode)
    }

    #[test_case(0x5AB1 ; "5xy with nonzero tail")]
    #[test_case(0x8AB8 ; "8xy8")]
    #[test_case(0x8ABF ; "8xyF")]
    #[test_case(0x9AB3 ; "9xy with nonzero tail")]
    #[test_case(0xEA00 ; "unknown key op")]
    #[test_case(0xFA00 ; "unknown misc op")]
    #[test_case(0xFFFF ; "all ones")]
    fn unknown_opcodes_are_rejected(opcode: u16) {
        assert_eq!(Instruction::from_u16(opcode), None);
    }

    #[test]
    fn decoded_operands_are_in_range() {
        for opcode in 0..=u16::MAX {
            if let Some(instruction) = Instruction::from_u16(opcode) {
                assert!(instruction.operands_in_range(), "{:#06x}", opcode);
            }
        }
    }

    #[test_case(Instruction::SetRegToConst(Reg(16), Const(1)) ; "register past vf")]
    #[test_case(Instruction::IfRegEqReg(Reg(0), Reg(0x20)) ; "second register past vf")]
    #[test_case(Instruction::SetPcToV0PlusAddr(Addr(0xFFFF)) ; "address past memory")]
    #[test_case(Instruction::Goto(Addr(0x1000)) ; "goto past memory")]
    #[test_case(Instruction::Draw(Reg(0), Reg(1), Const(16)) ; "sprite taller than a nibble")]
    fn hand_built_operands_out_of_range(instruction: Instruction) {
        assert!(!instruction.operands_in_range());
    }

    #[test]
    fn from_two_u8_equals_from_u16() {
        assert_eq!(Instruction::from_two_u8(0x12, 0x34), Instruction::from_u16(0x1234));
        assert_eq!(Instruction::from_two_u8(0x2F, 0x2F), Instruction::from_u16(0x2F2F));
        assert_eq!(Instruction::from_two_u8(0x10, 0x20), Instruction::from_u16(0x1020));
    }
}
