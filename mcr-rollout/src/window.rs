//! Fixed-capacity ring buffer of recent discounted rewards.
//!
//! `sum` is maintained incrementally on every insert/evict and always equals the
//! sum of the values currently held.

#[derive(Debug, Clone)]
pub struct RewardWindow {
    buf: Vec<f64>,
    cap: usize,
    // Index of the oldest element once the buffer is full.
    head: usize,
    sum: f64,
}

impl RewardWindow {
    /// `capacity` must be > 0.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "reward window capacity must be > 0");
        Self {
            buf: Vec::with_capacity(capacity),
            cap: capacity,
            head: 0,
            sum: 0.0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.buf.len() == self.capacity()
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Window sum divided by the capacity.
    pub fn average(&self) -> f64 {
        self.sum / self.capacity() as f64
    }

    /// Most recently pushed value.
    pub fn latest(&self) -> Option<f64> {
        if self.buf.is_empty() {
            return None;
        }
        let idx = if self.is_full() {
            (self.head + self.capacity() - 1) % self.capacity()
        } else {
            self.buf.len() - 1
        };
        Some(self.buf[idx])
    }

    /// Append `x`, evicting and returning the oldest value when full.
    pub fn push(&mut self, x: f64) -> Option<f64> {
        self.sum += x;
        if !self.is_full() {
            self.buf.push(x);
            return None;
        }
        let evicted = std::mem::replace(&mut self.buf[self.head], x);
        self.sum -= evicted;
        self.head = (self.head + 1) % self.capacity();
        Some(evicted)
    }

    /// Values from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        let (newer, older) = self.buf.split_at(self.head);
        older.iter().chain(newer.iter()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_then_evicts_fifo() {
        let mut w = RewardWindow::new(3);
        assert!(w.is_empty());
        assert_eq!(w.latest(), None);

        assert_eq!(w.push(1.0), None);
        assert_eq!(w.push(2.0), None);
        assert!(!w.is_full());
        assert_eq!(w.push(3.0), None);
        assert!(w.is_full());

        assert_eq!(w.push(4.0), Some(1.0));
        assert_eq!(w.push(5.0), Some(2.0));
        assert_eq!(w.len(), 3);
        assert_eq!(w.iter().collect::<Vec<_>>(), vec![3.0, 4.0, 5.0]);
        assert_eq!(w.latest(), Some(5.0));
    }

    #[test]
    fn running_sum_tracks_held_values() {
        let mut w = RewardWindow::new(4);
        let xs = [0.5, -1.25, 2.0, 8.0, -3.5, 0.75, 1.0, 1.0, -0.25];
        for &x in &xs {
            w.push(x);
            assert!(w.len() <= 4);
            let direct: f64 = w.iter().sum();
            assert!((w.sum() - direct).abs() < 1e-12, "sum={} direct={}", w.sum(), direct);
            assert_eq!(w.latest(), Some(x));
        }
    }

    #[test]
    fn average_divides_by_capacity() {
        let mut w = RewardWindow::new(4);
        w.push(2.0);
        w.push(2.0);
        assert_eq!(w.average(), 1.0);
        w.push(2.0);
        w.push(2.0);
        assert_eq!(w.average(), 2.0);
    }

    #[test]
    fn capacity_one_always_holds_latest() {
        let mut w = RewardWindow::new(1);
        assert_eq!(w.push(7.0), None);
        assert_eq!(w.push(9.0), Some(7.0));
        assert_eq!(w.sum(), 9.0);
        assert_eq!(w.average(), 9.0);
    }

    #[test]
    #[should_panic(expected = "capacity must be > 0")]
    fn zero_capacity_panics() {
        let _ = RewardWindow::new(0);
    }
}
