use foundation::Millis;

/// One advance of the session clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub index: u64,
    pub now: Millis,
}

/// Monotonic frame clock. A timestamp earlier than the previous one is
/// clamped to the previous, so time never runs backwards mid-session.
#[derive(Debug, Default)]
pub struct FrameClock {
    next_index: u64,
    last: Option<Millis>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, now: Millis) -> Frame {
        let now = match self.last {
            Some(last) if now.0 < last.0 => last,
            _ => now,
        };
        self.last = Some(now);
        let frame = Frame {
            index: self.next_index,
            now,
        };
        self.next_index += 1;
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::FrameClock;
    use foundation::Millis;

    #[test]
    fn indices_count_up_from_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(Millis(0.0)).index, 0);
        assert_eq!(clock.advance(Millis(16.0)).index, 1);
        assert_eq!(clock.advance(Millis(33.0)).index, 2);
    }

    #[test]
    fn backwards_timestamps_are_clamped() {
        let mut clock = FrameClock::new();
        clock.advance(Millis(100.0));
        let frame = clock.advance(Millis(40.0));
        assert_eq!(frame.now, Millis(100.0));
        let frame = clock.advance(Millis(140.0));
        assert_eq!(frame.now, Millis(140.0));
    }
}
