//! Cross-dissolve between two hero cards.

use crate::card::HeroCard;
use std::time::{Duration, Instant};

pub const DISSOLVE: Duration = Duration::from_millis(500);

/// What to draw at a point in the dissolve: a card and its opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase<'a> {
    Outgoing(&'a HeroCard, f32),
    Incoming(f32),
}

#[derive(Debug, Clone)]
pub struct Transition {
    from: HeroCard,
    started: Instant,
    duration: Duration,
}

impl Transition {
    pub fn new(from: HeroCard, started: Instant) -> Self {
        Self {
            from,
            started,
            duration: DISSOLVE,
        }
    }

    /// Elapsed fraction of the dissolve, clamped to [0, 1].
    pub fn progress(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    /// The outgoing card fades out over the first half, the incoming card
    /// fades in over the second.
    pub fn phase(&self, now: Instant) -> Phase<'_> {
        let p = self.progress(now);
        if p < 0.5 {
            Phase::Outgoing(&self.from, 1.0 - 2.0 * p)
        } else {
            Phase::Incoming(2.0 * p - 1.0)
        }
    }
}

/// Linear blend from `bg` (opacity 0) to `fg` (opacity 1).
pub fn blend(fg: (u8, u8, u8), bg: (u8, u8, u8), opacity: f32) -> (u8, u8, u8) {
    let a = opacity.clamp(0.0, 1.0);
    let mix = |f: u8, b: u8| (b as f32 + (f as f32 - b as f32) * a).round() as u8;
    (mix(fg.0, bg.0), mix(fg.1, bg.1), mix(fg.2, bg.2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::hero;

    #[test]
    fn progress_runs_over_half_a_second() {
        let t0 = Instant::now();
        let t = Transition::new(HeroCard::from(&hero("Any")), t0);
        assert_eq!(t.progress(t0), 0.0);
        assert!((t.progress(t0 + Duration::from_millis(250)) - 0.5).abs() < 1e-3);
        assert!(!t.is_finished(t0 + Duration::from_millis(499)));
        assert!(t.is_finished(t0 + Duration::from_millis(500)));
        assert_eq!(t.progress(t0 + Duration::from_secs(3)), 1.0);
    }

    #[test]
    fn outgoing_then_incoming() {
        let t0 = Instant::now();
        let old = HeroCard::from(&hero("Old"));
        let t = Transition::new(old.clone(), t0);

        match t.phase(t0 + Duration::from_millis(100)) {
            Phase::Outgoing(card, a) => {
                assert_eq!(card, &old);
                assert!((a - 0.6).abs() < 1e-3);
            }
            other => panic!("unexpected phase {other:?}"),
        }
        match t.phase(t0 + Duration::from_millis(400)) {
            Phase::Incoming(a) => assert!((a - 0.6).abs() < 1e-3),
            other => panic!("unexpected phase {other:?}"),
        }
    }

    #[test]
    fn blend_endpoints() {
        assert_eq!(blend((255, 255, 255), (0, 0, 0), 1.0), (255, 255, 255));
        assert_eq!(blend((255, 255, 255), (0, 0, 0), 0.0), (0, 0, 0));
        assert_eq!(blend((200, 100, 0), (0, 0, 0), 0.5), (100, 50, 0));
        assert_eq!(blend((10, 10, 10), (0, 0, 0), 7.0), (10, 10, 10));
    }
}
