/// A structure for easily splitting an opcode
/// into its named fields, such as the leading nibble,
/// the register operands, or the trailing address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitSplitter(u8, u8);

impl BitSplitter {
    pub fn from_u16(value: u16) -> BitSplitter {
        BitSplitter((value >> 8) as u8, (value & 0x00FF) as u8)
    }

    pub fn new(left: u8, right: u8) -> BitSplitter {
        BitSplitter(left, right)
    }

    /// Left-shift the first u8-component 8 bits,
    /// then take bitwise or with the second component
    /// in order to store the components in a u16.
    pub fn as_u16(&self) -> u16 {
        ((self.0 as u16) << 8) | self.1 as u16
    }

    /// Bits 12-15, selects the instruction family.
    pub fn op(&self) -> u8 {
        self.0 >> 4
    }

    /// Bits 8-11, the first register operand.
    pub fn x(&self) -> u8 {
        self.0 & 0x0F
    }

    /// Bits 4-7, the second register operand.
    pub fn y(&self) -> u8 {
        self.1 >> 4
    }

    /// Bits 0-3.
    pub fn n(&self) -> u8 {
        self.1 & 0x0F
    }

    /// Bits 0-7.
    pub fn nn(&self) -> u8 {
        self.1
    }

    /// Bits 0-11.
    pub fn nnn(&self) -> u16 {
        self.as_u16() & 0x0FFF
    }
}
