use std::time::Duration;

// Fixed ticks arrive as f32 seconds; without slack a 1s timer at 60 tps
// could slip to tick 61.
const DUE_SLACK: Duration = Duration::from_micros(50);
const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct TimerEntry<K> {
    handle: TimerHandle,
    key: K,
    remaining: Duration,
    period: Option<Duration>,
    spent: bool,
}

/// Keyed repeating and one-shot timers, advanced explicitly by the owner.
///
/// Firing yields the key instead of running a callback, so the owner
/// dispatches with full mutable access to its own state.
#[derive(Debug, Clone)]
pub struct TimerSet<K> {
    next_handle: u64,
    entries: Vec<TimerEntry<K>>,
}

impl<K> Default for TimerSet<K> {
    fn default() -> Self {
        Self {
            next_handle: 0,
            entries: Vec::new(),
        }
    }
}

impl<K: Clone> TimerSet<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_repeating(&mut self, key: K, period: Duration) -> TimerHandle {
        let period = period.max(MIN_PERIOD);
        self.insert(key, period, Some(period))
    }

    pub fn add_delayed(&mut self, key: K, delay: Duration) -> TimerHandle {
        self.insert(key, delay, None)
    }

    fn insert(&mut self, key: K, remaining: Duration, period: Option<Duration>) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle = self.next_handle.saturating_add(1);
        self.entries.push(TimerEntry {
            handle,
            key,
            remaining,
            period,
            spent: false,
        });
        handle
    }

    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.handle != handle);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|entry| entry.handle == handle)
    }

    /// Advances every timer by `dt` and returns the keys that came due,
    /// ordered by when they fell due inside the step, then by creation.
    /// A repeating timer fires once per period covered by `dt`.
    pub fn advance(&mut self, dt: Duration) -> Vec<K> {
        let mut due: Vec<(Duration, TimerHandle, K)> = Vec::new();

        for entry in &mut self.entries {
            let mut consumed = Duration::ZERO;
            loop {
                let budget = dt.saturating_sub(consumed);
                if entry.remaining > budget.saturating_add(DUE_SLACK) {
                    entry.remaining -= budget;
                    break;
                }
                consumed = consumed.saturating_add(entry.remaining.min(budget));
                due.push((consumed, entry.handle, entry.key.clone()));
                match entry.period {
                    Some(period) => entry.remaining = period,
                    None => {
                        entry.spent = true;
                        break;
                    }
                }
            }
        }

        self.entries.retain(|entry| !entry.spent);
        due.sort_by_key(|(offset, handle, _)| (*offset, *handle));
        due.into_iter().map(|(_, _, key)| key).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Key {
        Tick,
        Once,
        Other,
    }

    fn run_ticks(timers: &mut TimerSet<Key>, ticks: usize) -> Vec<Key> {
        let dt = Duration::from_secs_f32(1.0 / 60.0);
        let mut fired = Vec::new();
        for _ in 0..ticks {
            fired.extend(timers.advance(dt));
        }
        fired
    }

    #[test]
    fn one_second_timer_fires_on_tick_sixty_at_sixty_tps() {
        let mut timers = TimerSet::new();
        timers.add_repeating(Key::Tick, Duration::from_millis(1000));

        assert!(run_ticks(&mut timers, 59).is_empty());
        assert_eq!(run_ticks(&mut timers, 1), vec![Key::Tick]);
        assert_eq!(run_ticks(&mut timers, 60), vec![Key::Tick]);
    }

    #[test]
    fn delayed_timer_fires_once_and_is_removed() {
        let mut timers = TimerSet::new();
        let handle = timers.add_delayed(Key::Once, Duration::from_millis(500));

        assert_eq!(timers.advance(Duration::from_millis(499)), Vec::<Key>::new());
        assert_eq!(timers.advance(Duration::from_millis(1)), vec![Key::Once]);
        assert!(!timers.is_scheduled(handle));
        assert!(timers.advance(Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn large_step_fires_repeating_timer_per_period_in_order() {
        let mut timers = TimerSet::new();
        timers.add_repeating(Key::Tick, Duration::from_millis(100));
        timers.add_delayed(Key::Once, Duration::from_millis(150));

        let fired = timers.advance(Duration::from_millis(300));

        assert_eq!(fired, vec![Key::Tick, Key::Once, Key::Tick, Key::Tick]);
    }

    #[test]
    fn simultaneous_timers_fire_in_creation_order() {
        let mut timers = TimerSet::new();
        timers.add_delayed(Key::Other, Duration::from_millis(250));
        timers.add_delayed(Key::Once, Duration::from_millis(250));

        assert_eq!(
            timers.advance(Duration::from_millis(250)),
            vec![Key::Other, Key::Once]
        );
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut timers = TimerSet::new();
        let handle = timers.add_repeating(Key::Tick, Duration::from_millis(100));
        timers.add_repeating(Key::Other, Duration::from_millis(100));

        assert!(timers.cancel(handle));
        assert!(!timers.cancel(handle));
        assert_eq!(timers.advance(Duration::from_millis(100)), vec![Key::Other]);
    }

    #[test]
    fn zero_period_repeating_timer_does_not_spin_forever() {
        let mut timers = TimerSet::new();
        timers.add_repeating(Key::Tick, Duration::ZERO);

        let fired = timers.advance(Duration::from_millis(10));

        assert_eq!(fired.len(), 10);
    }

    #[test]
    fn clear_drops_everything() {
        let mut timers = TimerSet::new();
        timers.add_repeating(Key::Tick, Duration::from_millis(10));
        timers.add_delayed(Key::Once, Duration::from_millis(10));
        timers.clear();

        assert!(timers.is_empty());
        assert!(timers.advance(Duration::from_secs(1)).is_empty());
    }
}
