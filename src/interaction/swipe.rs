/// Drags shorter than this (in pixels, along the dominant axis) are taps.
pub const SWIPE_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    Left,
    Right,
    Up,
    Down,
}

/// Classifies a touch from start to end, in screen coordinates (y grows
/// downwards). Returns `None` for a tap.
pub fn classify(start: (f64, f64), end: (f64, f64)) -> Option<Swipe> {
    let dx = end.0 - start.0;
    let dy = end.1 - start.1;

    if dx.abs() > dy.abs() {
        if dx.abs() < SWIPE_THRESHOLD {
            None
        } else if dx < 0.0 {
            Some(Swipe::Left)
        } else {
            Some(Swipe::Right)
        }
    } else if dy.abs() < SWIPE_THRESHOLD {
        None
    } else if dy < 0.0 {
        Some(Swipe::Up)
    } else {
        Some(Swipe::Down)
    }
}
