use std::time::Duration;

use crate::config::{CONTRAST_INCREASE, FadePreset, MAX_CONTRAST};

/// Lowers `contrast` for `elapsed` frame time, never below zero.
///
/// Higher scores fade faster by a factor of `exponential^score`.
#[must_use]
pub fn fade(contrast: f64, elapsed: Duration, score: u32, preset: FadePreset) -> f64 {
    let steepness = preset.exponential.powf(f64::from(score));
    let decrease = elapsed.as_secs_f64() * 1000.0 * steepness / preset.fade_ms;
    (contrast - decrease).max(0.0)
}

/// Contrast after eating an apple.
#[must_use]
pub fn boost(contrast: f64) -> f64 {
    (contrast + CONTRAST_INCREASE).min(MAX_CONTRAST)
}

/// Whole-number percentage shown in the HUD.
#[must_use]
pub fn percent(contrast: f64) -> u32 {
    (contrast.clamp(0.0, MAX_CONTRAST) * 100.0).floor() as u32
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::config::Mode;

    use super::{boost, fade, percent};

    #[test]
    fn full_fade_takes_preset_duration_at_score_zero() {
        let easy = fade(1.0, Duration::from_millis(2500), 0, Mode::Easy.fade());
        assert!((easy - 0.5).abs() < 1e-9);

        let hard = fade(1.0, Duration::from_millis(4000), 0, Mode::Hard.fade());
        assert_eq!(hard, 0.0);
    }

    #[test]
    fn fade_speeds_up_with_score() {
        let preset = Mode::Easy.fade();
        let slow = fade(1.0, Duration::from_millis(100), 0, preset);
        let fast = fade(1.0, Duration::from_millis(100), 20, preset);

        assert!(fast < slow);
    }

    #[test]
    fn fade_never_goes_negative() {
        assert_eq!(fade(0.1, Duration::from_secs(60), 3, Mode::Hard.fade()), 0.0);
    }

    #[test]
    fn boost_is_capped() {
        assert_eq!(boost(0.25), 0.75);
        assert_eq!(boost(0.8), 1.0);
        assert_eq!(boost(1.0), 1.0);
    }

    #[test]
    fn percent_floors() {
        assert_eq!(percent(1.0), 100);
        assert_eq!(percent(0.509), 50);
        assert_eq!(percent(0.0), 0);
    }
}
