use std::time::{Duration, Instant};

use calico_8::emulator::keypad::NUM_KEYS;

/// Terminals report key presses (and their auto-repeats), but never releases.
/// A key is therefore treated as held until no press for it has been seen for `timeout`.
pub struct KeyManager {
    timeout: Duration,
    last_seen: [Option<Instant>; NUM_KEYS],
}

impl KeyManager {
    pub fn new(timeout: Duration) -> KeyManager {
        KeyManager {
            timeout,
            last_seen: [None; NUM_KEYS],
        }
    }

    /// Note a press of `key` at `now`. Returns true if the key was not already held.
    pub fn press(&mut self, key: u8, now: Instant) -> bool {
        match self.last_seen.get_mut(key as usize) {
            Some(last_seen) => last_seen.replace(now).is_none(),
            None => false,
        }
    }

    /// Release every key that has not been seen since `now - timeout`, returning them.
    pub fn expire(&mut self, now: Instant) -> Vec<u8> {
        let timeout = self.timeout;
        let mut released = Vec::new();
        for (key, last_seen) in self.last_seen.iter_mut().enumerate() {
            if let Some(seen) = *last_seen {
                if now.duration_since(seen) >= timeout {
                    *last_seen = None;
                    released.push(key as u8);
                }
            }
        }
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TIMEOUT: Duration = Duration::from_millis(250);

    #[test]
    fn first_press_is_new_and_repeats_are_not() {
        let mut keys = KeyManager::new(TIMEOUT);
        let now = Instant::now();
        assert!(keys.press(0x5, now));
        assert!(!keys.press(0x5, now + Duration::from_millis(30)));
        assert!(!keys.press(0x10, now));
    }

    #[test]
    fn keys_are_released_after_timeout() {
        let mut keys = KeyManager::new(TIMEOUT);
        let now = Instant::now();
        keys.press(0x1, now);
        keys.press(0x2, now + Duration::from_millis(200));

        assert_eq!(keys.expire(now + Duration::from_millis(100)), Vec::<u8>::new());
        assert_eq!(keys.expire(now + Duration::from_millis(300)), vec![0x1]);
        assert_eq!(keys.expire(now + Duration::from_millis(500)), vec![0x2]);
        assert!(keys.press(0x1, now + Duration::from_millis(600)));
    }

    #[test]
    fn repeats_keep_a_key_held() {
        let mut keys = KeyManager::new(TIMEOUT);
        let now = Instant::now();
        keys.press(0x3, now);
        keys.press(0x3, now + Duration::from_millis(200));
        assert_eq!(keys.expire(now + Duration::from_millis(300)), Vec::<u8>::new());
    }
}
