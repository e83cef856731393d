//! Scroll clock
//!
//! The corridor offset only ever decreases while running. It wraps at
//! `SCROLL_MODULUS` so the float never loses precision on long runs.

use serde::{Deserialize, Serialize};

use crate::consts::SCROLL_MODULUS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollClock {
    /// Current offset, always in (-SCROLL_MODULUS, 0]
    offset: f32,
    /// Completed wraps this run
    wraps: u32,
    /// Total distance travelled this run
    distance: f64,
}

impl Default for ScrollClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollClock {
    pub fn new() -> Self {
        Self {
            offset: 0.0,
            wraps: 0,
            distance: 0.0,
        }
    }

    /// Move the world forward by `travel`, returning how many times the offset wrapped
    pub fn advance(&mut self, travel: f32) -> u32 {
        if !(travel.is_finite() && travel > 0.0) {
            return 0;
        }
        self.distance += f64::from(travel);
        self.offset -= travel;

        let mut wrapped = 0;
        while self.offset <= -SCROLL_MODULUS {
            self.offset += SCROLL_MODULUS;
            wrapped += 1;
        }
        self.wraps += wrapped;
        wrapped
    }

    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    #[inline]
    pub fn wraps(&self) -> u32 {
        self.wraps
    }

    #[inline]
    pub fn distance(&self) -> f64 {
        self.distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_decreases_offset() {
        let mut clock = ScrollClock::new();
        assert_eq!(clock.advance(0.18), 0);
        assert!((clock.offset() + 0.18).abs() < 1e-6);
        assert!((clock.distance() - 0.18).abs() < 1e-6);
    }

    #[test]
    fn test_wraps_at_modulus() {
        let mut clock = ScrollClock::new();
        clock.advance(SCROLL_MODULUS - 1.0);
        assert_eq!(clock.wraps(), 0);
        assert_eq!(clock.advance(2.0), 1);
        assert_eq!(clock.wraps(), 1);
        assert!((clock.offset() + 1.0).abs() < 1e-3);
        assert!(clock.offset() > -SCROLL_MODULUS && clock.offset() <= 0.0);
    }

    #[test]
    fn test_ignores_bad_travel() {
        let mut clock = ScrollClock::new();
        assert_eq!(clock.advance(-5.0), 0);
        assert_eq!(clock.advance(f32::NAN), 0);
        assert_eq!(clock.offset(), 0.0);
        assert_eq!(clock.distance(), 0.0);
    }
}
