//! # Gyro History
//!
//! Time-windowed rolling history of gyroscope magnitudes, used for the
//! moving-average target the energy level decays towards.

use std::collections::VecDeque;

/// Ordered (timestamp, gyro magnitude) pairs spanning a fixed trailing window
///
/// Append-only at the tail, pruned from the head on every push. Timestamps are
/// seconds on a monotonic scale chosen by the caller; all entries are at most
/// `window_s` older than the newest push.
#[derive(Debug, Clone)]
pub struct GyroHistory {
    window_s: f32,
    entries: VecDeque<(f32, f32)>,
}

impl GyroHistory {
    /// Create an empty history covering the given trailing window in seconds
    pub fn new(window_s: f32) -> Self {
        Self {
            window_s,
            entries: VecDeque::new(),
        }
    }

    /// Append a reading and prune entries older than the window
    pub fn push(&mut self, now_s: f32, gyro_mag: f32) {
        self.entries.push_back((now_s, gyro_mag));
        while let Some(&(ts, _)) = self.entries.front() {
            if now_s - ts > self.window_s {
                self.entries.pop_front();
            } else {
                break;
            }
        }
    }

    /// Arithmetic mean of the magnitudes in the window, 0.0 if empty
    pub fn average(&self) -> f32 {
        if self.entries.is_empty() {
            return 0.0;
        }
        let total: f32 = self.entries.iter().map(|&(_, mag)| mag).sum();
        total / self.entries.len() as f32
    }

    /// Number of readings currently in the window
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the window holds no readings
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history_averages_zero() {
        let history = GyroHistory::new(10.0);
        assert_eq!(history.average(), 0.0);
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
    }

    #[test]
    fn test_average_of_window() {
        let mut history = GyroHistory::new(10.0);
        history.push(0.0, 100.0);
        history.push(1.0, 200.0);
        history.push(2.0, 300.0);
        assert_eq!(history.average(), 200.0);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_old_entries_are_pruned() {
        let mut history = GyroHistory::new(10.0);
        history.push(0.0, 1000.0);
        history.push(5.0, 2000.0);
        // At t=11 the t=0 entry is 11s old, past the 10s window
        history.push(11.0, 3000.0);
        assert_eq!(history.len(), 2);
        assert_eq!(history.average(), 2500.0);
    }

    #[test]
    fn test_entry_exactly_at_window_edge_is_kept() {
        let mut history = GyroHistory::new(10.0);
        history.push(0.0, 100.0);
        // Age is exactly the window duration, not older
        history.push(10.0, 300.0);
        assert_eq!(history.len(), 2);
        assert_eq!(history.average(), 200.0);
    }

    #[test]
    fn test_prune_removes_multiple_stale_entries() {
        let mut history = GyroHistory::new(2.0);
        history.push(0.0, 10.0);
        history.push(0.5, 20.0);
        history.push(1.0, 30.0);
        history.push(10.0, 40.0);
        assert_eq!(history.len(), 1);
        assert_eq!(history.average(), 40.0);
    }
}
