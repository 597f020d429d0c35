/*!

A CHIP-8 emulator as specified at https://en.wikipedia.org/wiki/CHIP-8.

# Terminal Frontend

If you want to try the emulator on some programs, there is a ready-to-use implementation
you can run by using `cargo run --release -- <program>`.
The keypad is mapped onto the keys `1234`, `qwer`, `asdf` and `zxcv`, and `Esc` quits.

# Library

The main way of running a program is to load it as bytes, then step through it.
Loading fails if the program is empty or does not fit in memory.

```rust
use calico_8::emulator::Emulator;

// Load a program at address 0x200.
let clear_display = [0x00, 0xE0];
let mut emulator = Emulator::new(&clear_display).unwrap();
emulator.step().unwrap(); // Will now clear the display
assert!(emulator.needs_redraw());
```

The host decides how fast things go. It should call `step` a number of times per frame,
`tick_timers` once per frame, and redraw the screen whenever `needs_redraw` says so.

```rust
use calico_8::emulator::{Config, Emulator};

let config = Config::default();
let program = [0x60, 0x05, 0xF0, 0x18, 0x12, 0x04]; // V0 = 5, sound = V0, loop
let mut emulator = Emulator::with_config(&program, config).unwrap();

for _ in 0..config.instructions_per_tick() {
    emulator.step().unwrap();
}
emulator.tick_timers();
assert!(emulator.sound_should_play());

emulator.deliver_key_event(0x4, true); // Key 4 was pressed
if emulator.needs_redraw() {
    print!("{}", emulator.framebuffer());
    emulator.clear_redraw();
}
```

Alternatively, you can experiment by executing instructions manually.

```rust
use calico_8::emulator::Emulator;
use calico_8::emulator::instruction::{Instruction, Reg, Const, Addr};

let mut emulator = Emulator::new(&[0x00, 0xE0]).unwrap();

// Execute instructions manually
emulator.execute_single(Instruction::ClearScreen).unwrap();

// Or many sequentially
emulator.execute_many(&[
    Instruction::Goto(Addr(0x250)),
    Instruction::SetRegToConst(Reg(0xA), Const(35)),
    Instruction::SetRegToReg(Reg(0xB), Reg(0xA))
]).unwrap();
assert_eq!(emulator.register(0xB), 35);
```

Failures are final: once `step` returns an error, the emulator will not run anything else.

```rust
use calico_8::emulator::{Emulator, ExecutionError};

let mut emulator = Emulator::new(&[0x00, 0xEE]).unwrap(); // Return, with nowhere to return to
assert_eq!(emulator.step(), Err(ExecutionError::StackUnderflow { address: 0x200 }));
assert!(emulator.step().is_err());
```
*/

pub mod emulator;
pub mod util;
