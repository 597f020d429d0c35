use std::error::Error;
use std::path::PathBuf;

use structopt::StructOpt;

use calico_8::emulator::{Config, Emulator};

/// Run a program without a screen or keyboard, then print what it drew.
#[derive(StructOpt)]
struct Opt {
    /// Number of frames to run for
    #[structopt(long, default_value = "120")]
    frames: u32,

    /// Instructions executed per second
    #[structopt(long, default_value = "600")]
    clock_speed: u32,

    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    // Get configuration and read input file
    let opt = Opt::from_args();
    log::info!("Executing {:?} for {} frames", &opt.input, opt.frames);
    let program = std::fs::read(&opt.input)?;

    let config = Config {
        clock_speed: opt.clock_speed,
        ..Config::default()
    };
    let mut emulator = Emulator::with_config(&program, config)?;

    // No timing, every frame runs as fast as it can
    for _ in 0..opt.frames {
        for _ in 0..config.instructions_per_tick() {
            emulator.step()?;
        }
        emulator.tick_timers();
    }

    print!("{}", emulator.framebuffer());
    println!(
        "PC={:#05x} I={:#05x} V0..VF={:02x?}",
        emulator.program_counter(),
        emulator.index(),
        (0..16).map(|reg| emulator.register(reg)).collect::<Vec<_>>()
    );
    Ok(())
}
