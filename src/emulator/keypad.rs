pub const NUM_KEYS: usize = 16;

/// Host keyboard layout, row-major. The character at position `i` drives key `i`.
const LAYOUT: [char; NUM_KEYS] = [
    '1', '2', '3', '4',
    'q', 'w', 'e', 'r',
    'a', 's', 'd', 'f',
    'z', 'x', 'c', 'v',
];

/// The state of the sixteen keys of the CHIP-8 hex keypad.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keypad {
    pressed: [bool; NUM_KEYS],
}

impl Keypad {
    pub fn new() -> Keypad {
        Keypad::default()
    }

    /// Record a key going down or up. Indices outside 0..16 are ignored.
    pub fn set(&mut self, key: u8, pressed: bool) {
        if let Some(state) = self.pressed.get_mut(key as usize) {
            *state = pressed;
        }
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        self.pressed.get(key as usize).copied().unwrap_or(false)
    }

    /// The lowest key index currently held down.
    pub fn first_pressed(&self) -> Option<u8> {
        self.pressed.iter().position(|p| *p).map(|i| i as u8)
    }
}

/// Map a host keyboard character onto a keypad index, using the
/// `1234/qwer/asdf/zxcv` layout. Anything else has no key.
pub fn key_for_char(c: char) -> Option<u8> {
    let c = c.to_ascii_lowercase();
    LAYOUT.iter().position(|k| *k == c).map(|i| i as u8)
}
