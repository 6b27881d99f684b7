use std::time::Duration;

/// Fraction of an element that must be visible before it reveals.
pub const REVEAL_THRESHOLD: f64 = 0.10;
/// Pre-trigger margin applied to the viewport edge when observing.
pub const REVEAL_MARGIN_PX: u32 = 50;
/// Stat counters fire at half visibility.
pub const COUNTER_THRESHOLD: f64 = 0.5;
/// Skill bars fire a little earlier.
pub const BAR_THRESHOLD: f64 = 0.3;

/// Ticks a counter takes from zero to its target.
pub const COUNTER_TICKS: u64 = 50;
/// Wall-clock spacing between counter ticks.
pub const COUNTER_INTERVAL: Duration = Duration::from_millis(40);
/// Offset between consecutive skill bars starting their transition.
pub const BAR_STAGGER: Duration = Duration::from_millis(100);

/// One-way reveal state for a set of observed elements. Each element
/// flips to revealed the first time its visible fraction crosses the
/// threshold and never flips back, no matter how often it re-enters
/// the viewport.
pub struct RevealSet {
    threshold: f64,
    revealed: Vec<bool>,
}

impl RevealSet {
    pub fn new(count: usize) -> Self {
        Self::with_threshold(count, REVEAL_THRESHOLD)
    }

    pub fn with_threshold(count: usize, threshold: f64) -> Self {
        Self {
            threshold,
            revealed: vec![false; count],
        }
    }

    /// Records an intersection observation. Returns `true` only when
    /// this observation is the one that reveals the element.
    pub fn observe(&mut self, index: usize, visible_fraction: f64) -> bool {
        if visible_fraction < self.threshold || self.revealed[index] {
            return false;
        }
        self.revealed[index] = true;
        true
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed[index]
    }
}

/// Once-per-page-life trigger, used for the stat counters and the
/// skill bar stagger.
pub struct OneShot {
    threshold: f64,
    fired: bool,
}

impl OneShot {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            fired: false,
        }
    }

    pub fn observe(&mut self, visible_fraction: f64) -> bool {
        if visible_fraction < self.threshold || self.fired {
            return false;
        }
        self.fired = true;
        true
    }
}

/// Linear count-up from zero to a stat's literal value: fixed tick
/// interval, intermediate values floored, final tick snapping exactly
/// to the target.
pub struct CounterAnimation {
    target: u64,
    current: f64,
    done: bool,
}

impl CounterAnimation {
    pub fn new(target: u64) -> Self {
        Self {
            target,
            current: 0.0,
            done: false,
        }
    }

    pub fn value(&self) -> u64 {
        if self.done {
            self.target
        } else {
            self.current as u64
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Advances one tick; returns the interval until the next one, or
    /// `None` once the target is reached.
    pub fn tick(&mut self) -> Option<Duration> {
        if self.done {
            return None;
        }

        self.current += self.target as f64 / COUNTER_TICKS as f64;
        if self.current >= self.target as f64 {
            self.done = true;
            return None;
        }

        Some(COUNTER_INTERVAL)
    }
}

/// Start delay for each skill bar once the bars trigger fires: the Nth
/// bar begins its width transition N x 100ms after the trigger.
pub fn bar_schedule(count: usize) -> Vec<Duration> {
    (0..count as u32).map(|n| n * BAR_STAGGER).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_reveals_exactly_once() {
        let mut set = RevealSet::new(2);
        assert!(!set.observe(0, 0.05));
        assert!(set.observe(0, 0.2));
        assert!(set.is_revealed(0));

        // Leaving and re-entering the viewport never reveals again.
        assert!(!set.observe(0, 0.0));
        assert!(!set.observe(0, 0.9));
        assert!(set.is_revealed(0));
        assert!(!set.is_revealed(1));
    }

    #[test]
    fn one_shot_fires_once_at_its_threshold() {
        let mut shot = OneShot::new(COUNTER_THRESHOLD);
        assert!(!shot.observe(0.4));
        assert!(shot.observe(0.6));
        assert!(!shot.observe(1.0));
    }

    #[test]
    fn counter_floors_until_the_final_snap() {
        let mut c = CounterAnimation::new(3);
        let mut values = Vec::new();
        while c.tick().is_some() {
            values.push(c.value());
        }
        values.push(c.value());

        // Intermediate values are floored, never overshoot.
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
        assert!(values.iter().all(|v| *v <= 3));
        assert_eq!(*values.last().unwrap(), 3);
        assert!(c.is_done());
    }

    #[test]
    fn counter_runs_the_fixed_tick_count() {
        let mut c = CounterAnimation::new(1000);
        let mut ticks = 1u64;
        while c.tick().is_some() {
            ticks += 1;
        }
        assert_eq!(ticks, COUNTER_TICKS);
        assert_eq!(c.value(), 1000);
    }

    #[test]
    fn zero_target_finishes_immediately() {
        let mut c = CounterAnimation::new(0);
        assert_eq!(c.tick(), None);
        assert_eq!(c.value(), 0);
    }

    #[test]
    fn bars_stagger_by_fixed_offsets() {
        let schedule = bar_schedule(4);
        assert_eq!(
            schedule,
            vec![
                Duration::ZERO,
                Duration::from_millis(100),
                Duration::from_millis(200),
                Duration::from_millis(300),
            ]
        );
    }
}
