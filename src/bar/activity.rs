use std::time::{Duration, Instant};

const SPINNER_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const SPINNER_FRAME_INTERVAL: Duration = Duration::from_millis(80);

/// Busy spinner that only shows up once a search has run for `delay`.
#[derive(Debug, Clone)]
pub struct ActivityIndicator {
    delay: Duration,
    started_at: Option<Instant>,
}

impl ActivityIndicator {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            started_at: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.started_at = Some(now);
    }

    pub fn stop(&mut self) {
        self.started_at = None;
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        self.started_at
            .is_some_and(|started| now.saturating_duration_since(started) >= self.delay)
    }

    pub fn frame(&self, now: Instant) -> Option<char> {
        if !self.is_visible(now) {
            return None;
        }
        let started = self.started_at?;
        let elapsed = now.saturating_duration_since(started + self.delay);
        let step = (elapsed.as_millis() / SPINNER_FRAME_INTERVAL.as_millis()) as usize;
        Some(SPINNER_FRAMES[step % SPINNER_FRAMES.len()])
    }
}
