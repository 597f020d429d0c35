use std::time::Duration;

/// How `BNNN` forms its jump target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpQuirk {
    /// `PC = NNN + V0` as a full address.
    Full,
    /// `PC = (NNN + V0) & 0xFF`, as some interpreters narrow the sum to a byte.
    TruncateToByte,
}

impl Default for JumpQuirk {
    fn default() -> Self {
        JumpQuirk::Full
    }
}

/// Settings that shape how a program is run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Instructions executed per second.
    pub clock_speed: u32,
    /// Timer ticks (and frames) per second.
    pub timer_hz: u32,
    /// Whether the host should make noise while the sound timer runs.
    pub sound: bool,
    pub jump_quirk: JumpQuirk,
}

impl Config {
    /// How many instructions to execute between two timer ticks.
    /// Never less than one, so a program always makes progress.
    pub fn instructions_per_tick(&self) -> u32 {
        (self.clock_speed / self.timer_hz.max(1)).max(1)
    }

    /// Wall-clock length of one frame. A zero timer rate counts as one tick per second.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.timer_hz.max(1)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            clock_speed: 600,
            timer_hz: 60,
            sound: true,
            jump_quirk: JumpQuirk::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(600, 60 => 10 ; "default clock")]
    #[test_case(1000, 60 => 16 ; "rounds down")]
    #[test_case(30, 60 => 1 ; "at least one")]
    #[test_case(600, 0 => 600 ; "zero timer rate")]
    fn instructions_per_tick(clock_speed: u32, timer_hz: u32) -> u32 {
        let config = Config { clock_speed, timer_hz, ..Config::default() };
        config.instructions_per_tick()
    }

    #[test_case(60 => Duration::from_nanos(16_666_666) ; "sixty hertz")]
    #[test_case(1 => Duration::from_secs(1) ; "one hertz")]
    #[test_case(0 => Duration::from_secs(1) ; "zero timer rate")]
    fn frame_duration(timer_hz: u32) -> Duration {
        let config = Config { timer_hz, ..Config::default() };
        config.frame_duration()
    }
}
