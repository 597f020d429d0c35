//! The CHIP-8 emulator as described at https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.

use std::ops::Range;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::emulator::config::{Config, JumpQuirk};
use crate::emulator::error::{ExecutionError, LoadError};
use crate::emulator::framebuffer::Framebuffer;
use crate::emulator::instruction::*;
use crate::emulator::keypad::Keypad;

pub const MEM_SIZE: usize = 4096;
pub const PC_START: u16 = 0x200;
/// The largest program that fits between `PC_START` and the end of memory.
pub const MAX_PROGRAM_SIZE: usize = MEM_SIZE - PC_START as usize;
pub const FONT_ADDR: usize = 0x050;
const NUM_REGISTERS: usize = 16;
const STACK_SIZE: usize = 256;
const FLAG: usize = 0xF;
const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
const GLYPH_SIZE: u16 = 5;

pub struct Emulator<R: RngCore = StdRng> {
    // Standard fields
    memory: [u8; MEM_SIZE],
    registers: [u8; NUM_REGISTERS],
    delay_timer: u8,
    sound_timer: u8,
    i: u16,
    program_counter: u16,
    stack: Vec<u16>,

    keypad: Keypad,
    framebuffer: Framebuffer,
    redraw: bool,

    // Set once a step has failed, the emulator refuses to go on after that.
    fault: Option<ExecutionError>,
    jump_quirk: JumpQuirk,
    rng: R,
}

impl Emulator<StdRng> {
    /// Create an emulator running `program` with the default configuration.
    pub fn new(program: &[u8]) -> Result<Emulator<StdRng>, LoadError> {
        Emulator::with_config(program, Config::default())
    }

    /// Create an emulator running `program`, with random numbers seeded from the OS.
    pub fn with_config(program: &[u8], config: Config) -> Result<Emulator<StdRng>, LoadError> {
        Emulator::with_rng(program, config, StdRng::from_entropy())
    }
}

impl<R: RngCore> Emulator<R> {
    /// Create an emulator that draws its random numbers from `rng`.
    ///
    /// The font is placed at `FONT_ADDR` and the program at `PC_START`.
    /// Fails if the program is empty or does not fit in memory.
    pub fn with_rng(program: &[u8], config: Config, rng: R) -> Result<Emulator<R>, LoadError> {
        if program.is_empty() {
            return Err(LoadError::Empty);
        }
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(LoadError::TooLarge {
                size: program.len(),
                max_size: MAX_PROGRAM_SIZE,
            });
        }

        let mut memory = [0; MEM_SIZE];
        memory[FONT_ADDR..FONT_ADDR + FONT.len()].copy_from_slice(&FONT);
        let start = PC_START as usize;
        memory[start..start + program.len()].copy_from_slice(program);
        log::debug!("Loaded {} byte program at {:#05x}", program.len(), PC_START);

        Ok(Emulator {
            memory,
            registers: [0; NUM_REGISTERS],
            delay_timer: 0,
            sound_timer: 0,
            i: 0,
            program_counter: PC_START,
            stack: Vec::with_capacity(16),

            keypad: Keypad::new(),
            framebuffer: Framebuffer::new(),
            redraw: false,

            fault: None,
            jump_quirk: config.jump_quirk,
            rng,
        })
    }

    /// Record that a key went down or up.
    pub fn deliver_key_event(&mut self, key: u8, pressed: bool) {
        self.keypad.set(key, pressed);
    }

    /// Count both timers down by one, stopping at zero.
    pub fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }

    pub fn sound_should_play(&self) -> bool {
        self.sound_timer != 0
    }

    /// Whether the screen changed since the last `clear_redraw`.
    pub fn needs_redraw(&self) -> bool {
        self.redraw
    }

    pub fn clear_redraw(&mut self) {
        self.redraw = false;
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn program_counter(&self) -> u16 {
        self.program_counter
    }

    pub fn index(&self) -> u16 {
        self.i
    }

    /// The value of register `V{reg}`.
    pub fn register(&self, reg: u8) -> u8 {
        self.registers[reg as usize & 0xF]
    }

    /// Perform a single step: load the instruction at the program counter and execute it.
    ///
    /// An error is final. Every later call returns it again without doing anything.
    pub fn step(&mut self) -> Result<(), ExecutionError> {
        if let Some(fault) = self.fault {
            return Err(fault);
        }

        let address = self.program_counter;
        let result = self.fetch().and_then(|instruction| {
            log::trace!("{:#05x}: {:?}", address, instruction);
            self.execute(instruction, address)
        });

        if let Err(error) = result {
            self.fault = Some(error);
        }
        result
    }

    /// Execute a single instruction as if it had been fetched at the current program counter.
    pub fn execute_single(&mut self, instruction: Instruction) -> Result<(), ExecutionError> {
        if let Some(fault) = self.fault {
            return Err(fault);
        }
        let result = self.execute(instruction, self.program_counter);
        if let Err(error) = result {
            self.fault = Some(error);
        }
        result
    }

    /// Execute many instructions in order, stopping at the first failure.
    pub fn execute_many(&mut self, instructions: &[Instruction]) -> Result<(), ExecutionError> {
        instructions
            .iter()
            .try_for_each(|instruction| self.execute_single(*instruction))
    }

    /// Read the opcode at the program counter and move past it.
    fn fetch(&mut self) -> Result<Instruction, ExecutionError> {
        let address = self.program_counter;
        let range = self.range(address as usize, 2)?;
        let (left, right) = (self.memory[range.start], self.memory[range.start + 1]);

        // Each opcode is two bytes
        self.program_counter = self.program_counter.wrapping_add(2);

        Instruction::from_two_u8(left, right).ok_or(ExecutionError::IllegalInstruction {
            opcode: u16::from_be_bytes([left, right]),
            address,
        })
    }

    /// The memory range `start..start + len`, if it lies entirely within memory.
    fn range(&self, start: usize, len: usize) -> Result<Range<usize>, ExecutionError> {
        let end = start + len;
        if end > MEM_SIZE {
            return Err(ExecutionError::AddressOutOfBounds {
                address: start.max(MEM_SIZE),
            });
        }
        Ok(start..end)
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.program_counter = self.program_counter.wrapping_add(2);
        }
    }

    fn execute(&mut self, instruction: Instruction, address: u16) -> Result<(), ExecutionError> {
        // Hand-built instructions can carry operands no opcode could encode
        if !instruction.operands_in_range() {
            return Err(ExecutionError::InvalidOperand { instruction, address });
        }

        match instruction {
            // Clear the screen
            Instruction::ClearScreen => {
                self.framebuffer.clear();
                self.redraw = true;
            }

            // Return to the previous call site via the stack.
            Instruction::Return => {
                self.program_counter = self
                    .stack
                    .pop()
                    .ok_or(ExecutionError::StackUnderflow { address })?;
            }

            // Go to a specific memory address
            Instruction::Goto(Addr(addr)) => {
                self.program_counter = addr;
            }

            // Store the current address on the stack, then jump to the specified address
            Instruction::Call(Addr(addr)) => {
                if self.stack.len() >= STACK_SIZE {
                    return Err(ExecutionError::StackOverflow { address });
                }
                self.stack.push(self.program_counter);
                self.program_counter = addr;
            }

            Instruction::IfRegEqConst(Reg(x), Const(n)) => {
                self.skip_if(self.registers[x as usize] == n);
            }

            Instruction::IfRegNeqConst(Reg(x), Const(n)) => {
                self.skip_if(self.registers[x as usize] != n);
            }

            Instruction::IfRegEqReg(Reg(x), Reg(y)) => {
                self.skip_if(self.registers[x as usize] == self.registers[y as usize]);
            }

            Instruction::SetRegToConst(Reg(x), Const(n)) => {
                self.registers[x as usize] = n;
            }

            // Wraps, and leaves VF alone
            Instruction::IncRegByConst(Reg(x), Const(n)) => {
                self.registers[x as usize] = self.registers[x as usize].wrapping_add(n);
            }

            Instruction::SetRegToReg(Reg(x), Reg(y)) => {
                self.registers[x as usize] = self.registers[y as usize];
            }

            Instruction::BitwiseOr(Reg(x), Reg(y)) => {
                self.registers[x as usize] |= self.registers[y as usize];
            }

            Instruction::BitwiseAnd(Reg(x), Reg(y)) => {
                self.registers[x as usize] &= self.registers[y as usize];
            }

            Instruction::BitwiseXor(Reg(x), Reg(y)) => {
                self.registers[x as usize] ^= self.registers[y as usize];
            }

            // VF is the carry
            Instruction::IncRegByReg(Reg(x), Reg(y)) => {
                let (sum, carry) =
                    self.registers[x as usize].overflowing_add(self.registers[y as usize]);
                self.registers[x as usize] = sum;
                self.registers[FLAG] = carry as u8;
            }

            // VF is 1 when there is no borrow
            Instruction::DecRegByReg(Reg(x), Reg(y)) => {
                let (vx, vy) = (self.registers[x as usize], self.registers[y as usize]);
                self.registers[x as usize] = vx.wrapping_sub(vy);
                self.registers[FLAG] = (vx >= vy) as u8;
            }

            // VF gets the bit that is shifted out
            Instruction::BitshiftRight(Reg(x)) => {
                let vx = self.registers[x as usize];
                self.registers[FLAG] = vx & 1;
                self.registers[x as usize] = vx >> 1;
            }

            Instruction::SetVxVyMinusVx(Reg(x), Reg(y)) => {
                let (vx, vy) = (self.registers[x as usize], self.registers[y as usize]);
                self.registers[x as usize] = vy.wrapping_sub(vx);
                self.registers[FLAG] = (vy >= vx) as u8;
            }

            Instruction::BitshiftLeft(Reg(x)) => {
                let vx = self.registers[x as usize];
                self.registers[FLAG] = (vx & 0x80 != 0) as u8;
                self.registers[x as usize] = vx << 1;
            }

            Instruction::IfRegNeqReg(Reg(x), Reg(y)) => {
                self.skip_if(self.registers[x as usize] != self.registers[y as usize]);
            }

            Instruction::SetI(Addr(addr)) => {
                self.i = addr;
            }

            Instruction::SetPcToV0PlusAddr(Addr(addr)) => {
                let target = addr + self.registers[0] as u16;
                self.program_counter = match self.jump_quirk {
                    JumpQuirk::Full => target,
                    JumpQuirk::TruncateToByte => target & 0xFF,
                };
            }

            Instruction::SetVxRand(Reg(x), Const(n)) => {
                self.registers[x as usize] = self.rng.gen::<u8>() & n;
            }

            Instruction::Draw(Reg(x), Reg(y), Const(sprite_height)) => {
                // Get coordinates
                let x_coord = self.registers[x as usize] as usize;
                let y_coord = self.registers[y as usize] as usize;

                // Get sprite, each row is 8 bits
                let sprite = self.range(self.i as usize, sprite_height as usize)?;

                // Toggle every set bit, a pixel turned off is a collision
                let mut any_collisions = false;
                for (dy, row) in self.memory[sprite].iter().enumerate() {
                    for dx in 0..8 {
                        if row & (0x80u8 >> dx) != 0
                            && !self.framebuffer.toggle(x_coord + dx, y_coord + dy)
                        {
                            any_collisions = true;
                        }
                    }
                }

                self.registers[FLAG] = any_collisions as u8;
                self.redraw = true;
            }

            Instruction::IfKeyEqVx(Reg(x)) => {
                self.skip_if(self.keypad.is_pressed(self.registers[x as usize]));
            }

            Instruction::IfKeyNeqVx(Reg(x)) => {
                self.skip_if(!self.keypad.is_pressed(self.registers[x as usize]));
            }

            Instruction::SetRegToDelayTimer(Reg(x)) => {
                self.registers[x as usize] = self.delay_timer;
            }

            // Wait for a key press by running this instruction again until one arrives
            Instruction::SetRegToGetKey(Reg(x)) => match self.keypad.first_pressed() {
                Some(key) => self.registers[x as usize] = key,
                None => self.program_counter = self.program_counter.wrapping_sub(2),
            },

            Instruction::SetDelayTimerToReg(Reg(x)) => {
                self.delay_timer = self.registers[x as usize];
            }

            Instruction::SetSoundTimerToReg(Reg(x)) => {
                self.sound_timer = self.registers[x as usize];
            }

            Instruction::AddRegToI(Reg(x)) => {
                self.i = self.i.wrapping_add(self.registers[x as usize] as u16);
            }

            // Each font glyph is 5 bytes long
            Instruction::SetIToSpriteAddrVx(Reg(x)) => {
                let digit = (self.registers[x as usize] & 0xF) as u16;
                self.i = FONT_ADDR as u16 + GLYPH_SIZE * digit;
            }

            Instruction::SetIToBcdOfReg(Reg(x)) => {
                let range = self.range(self.i as usize, 3)?;
                let value = self.registers[x as usize];
                self.memory[range].copy_from_slice(&[value / 100, value / 10 % 10, value % 10]);
            }

            // Dump register values up to Vx
            Instruction::RegDump(Reg(x)) => {
                let count = x as usize + 1;
                let range = self.range(self.i as usize, count)?;
                self.memory[range].copy_from_slice(&self.registers[..count]);
            }

            // Load register values up to Vx
            Instruction::RegLoad(Reg(x)) => {
                let count = x as usize + 1;
                let range = self.range(self.i as usize, count)?;
                self.registers[..count].copy_from_slice(&self.memory[range]);
            }
        };

        Ok(())
    }
}
