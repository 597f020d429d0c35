use std::error::Error;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use structopt::StructOpt;

use calico_8::emulator::keypad::key_for_char;
use calico_8::emulator::{Config, Emulator, JumpQuirk};

mod crossterm_io;
mod key_manager;
use crossterm_io::CrosstermOutput;
use key_manager::KeyManager;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

/// How long a key counts as held after the terminal last reported it.
const KEY_TIMEOUT: Duration = Duration::from_millis(150);

/// The program options.
#[derive(StructOpt, Debug)]
#[structopt(name = "calico-8")]
struct Opt {
    /// Instructions executed per second
    #[structopt(long, default_value = "600")]
    clock_speed: u32,

    /// Never ring the bell
    #[structopt(long)]
    no_sound: bool,

    /// Narrow the BNNN jump target to a byte, like some older interpreters
    #[structopt(long)]
    truncate_jump: bool,

    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,
}

impl Opt {
    fn config(&self) -> Config {
        Config {
            clock_speed: self.clock_speed,
            sound: !self.no_sound,
            jump_quirk: if self.truncate_jump {
                JumpQuirk::TruncateToByte
            } else {
                JumpQuirk::Full
            },
            ..Config::default()
        }
    }
}

fn main() {
    env_logger::init();

    let opt = Opt::from_args();
    if let Err(error) = run(&opt) {
        log::error!("{}", error);
        eprintln!("calico-8: {}", error);
        std::process::exit(1);
    }
}

fn run(opt: &Opt) -> Result<(), Box<dyn Error>> {
    // Get configuration and read input file
    log::info!("Executing {:?}", &opt.input);
    let config = opt.config();
    let program = std::fs::read(&opt.input)?;

    // Load instructions into emulator memory
    let mut emulator = Emulator::with_config(&program, config)?;
    let mut output = CrosstermOutput::new()?;
    let mut keys = KeyManager::new(KEY_TIMEOUT);

    let frame = config.frame_duration();
    let mut beeping = false;

    // Start execution
    loop {
        let start = Instant::now();

        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(KeyEvent { code: KeyCode::Esc, .. }) => return Ok(()),
                Event::Key(KeyEvent { code: KeyCode::Char('c'), modifiers, .. })
                    if modifiers.contains(KeyModifiers::CONTROL) =>
                {
                    return Ok(())
                }
                Event::Key(KeyEvent { code: KeyCode::Char(c), .. }) => {
                    if let Some(key) = key_for_char(c) {
                        if keys.press(key, start) {
                            emulator.deliver_key_event(key, true);
                        }
                    }
                }
                _ => {}
            }
        }
        for key in keys.expire(start) {
            emulator.deliver_key_event(key, false);
        }

        for _ in 0..config.instructions_per_tick() {
            emulator.step()?;
        }

        let sounding = config.sound && emulator.sound_should_play();
        if sounding && !beeping {
            output.beep()?;
        }
        beeping = sounding;

        emulator.tick_timers();

        if emulator.needs_redraw() {
            output.draw(emulator.framebuffer())?;
            emulator.clear_redraw();
        }

        if let Some(rest) = frame.checked_sub(start.elapsed()) {
            std::thread::sleep(rest);
        }
    }
}
