//! Simulation time: how far the animation has run, and how fast it runs.

/// Multipliers offered by the speed controls, slowest first.
pub const SPEED_PRESETS: [f64; 7] = [0.1, 0.25, 0.5, 1.0, 2.0, 5.0, 10.0];
const DEFAULT_SPEED_IDX: usize = 3;

/// Longest real frame we'll simulate in one go. A stalled window (dragging,
/// minimizing) shouldn't fling the comets across the scene.
pub const MAX_FRAME_TIME: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationClock {
    elapsed: f64,
    speed_idx: usize,
    playing: bool,
}

impl Default for SimulationClock {
    fn default() -> Self {
        SimulationClock {
            elapsed: 0.0,
            speed_idx: DEFAULT_SPEED_IDX,
            playing: true,
        }
    }
}

impl SimulationClock {
    pub fn new() -> Self {
        Default::default()
    }

    /// Simulation seconds since start (or the last reset).
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn speed(&self) -> f64 {
        SPEED_PRESETS[self.speed_idx]
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn toggle_play(&mut self) {
        self.playing = !self.playing;
    }

    pub fn speed_up(&mut self) {
        self.speed_idx = (self.speed_idx + 1).min(SPEED_PRESETS.len() - 1);
        log::info!("Speed is {}x", self.speed());
    }

    pub fn slow_down(&mut self) {
        self.speed_idx = self.speed_idx.saturating_sub(1);
        log::info!("Speed is {}x", self.speed());
    }

    /// Picks the preset closest to `speed`.
    pub fn set_speed(&mut self, speed: f64) {
        let closest = SPEED_PRESETS
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (*a - speed).abs().total_cmp(&(*b - speed).abs()))
            .map(|(idx, _)| idx);
        if let Some(idx) = closest {
            self.speed_idx = idx;
        }
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Advances by one frame that took `real_dt` wall-clock seconds, and
    /// returns the simulation time that passed.
    pub fn advance(&mut self, real_dt: f64) -> f64 {
        if !self.playing {
            return 0.0;
        }
        let dt = real_dt.clamp(0.0, MAX_FRAME_TIME) * self.speed();
        self.elapsed += dt;
        dt
    }
}

/// `mm:ss`, or `hh:mm:ss` once past the first hour.
pub fn format_elapsed(seconds: f64) -> String {
    let mut total_seconds = seconds.max(0.0) as u64;

    macro_rules! count_and_remainder {
        ($variable:ident, $divisor:expr) => {
            let $variable = total_seconds / $divisor;
            total_seconds %= $divisor;
        };
    }

    count_and_remainder!(hours, 3600);
    count_and_remainder!(minutes, 60);

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, total_seconds)
    } else {
        format!("{:02}:{:02}", minutes, total_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0.0), "00:00");
        assert_eq!(format_elapsed(59.9), "00:59");
        assert_eq!(format_elapsed(754.0), "12:34");
        assert_eq!(format_elapsed(3600.0), "01:00:00");
        assert_eq!(format_elapsed(45296.0), "12:34:56");
        assert_eq!(format_elapsed(-3.0), "00:00");
    }

    #[test]
    fn test_advance() {
        let mut clock = SimulationClock::new();
        assert_relative_eq!(clock.advance(0.016), 0.016);

        clock.speed_up();
        assert_eq!(clock.speed(), 2.0);
        assert_relative_eq!(clock.advance(0.05), 0.1);

        // Long frames are clamped
        assert_relative_eq!(clock.advance(3.0), 0.2);
        assert_relative_eq!(clock.elapsed(), 0.316, epsilon = 1e-12);

        clock.toggle_play();
        assert_eq!(clock.advance(0.016), 0.0);
        assert_relative_eq!(clock.elapsed(), 0.316, epsilon = 1e-12);

        clock.reset();
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn test_speed_presets_clamp() {
        let mut clock = SimulationClock::new();
        for _ in 0..20 {
            clock.speed_up();
        }
        assert_eq!(clock.speed(), 10.0);
        for _ in 0..20 {
            clock.slow_down();
        }
        assert_eq!(clock.speed(), 0.1);

        clock.set_speed(4.0);
        assert_eq!(clock.speed(), 5.0);
    }
}
