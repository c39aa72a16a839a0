/// Periodic-interval dispatch with the current time passed in by the
/// caller, so the telemetry cadence is unit-testable without real
/// wall-clock waits. The control loop polls [`Scheduler::tick`] every
/// iteration; the interval itself is much coarser than the poll rate.
///
/// Fires at most once per `tick` call. Missed intervals (a slow
/// iteration spanning several periods) are not backfilled, and drift
/// is corrected by recording the actual fire time rather than
/// accumulating fixed offsets.
pub struct Scheduler {
    interval_millis: u64,
    last_fire: Option<u64>,
}

impl Scheduler {
    pub fn every(interval_millis: u64) -> Self {
        Self {
            interval_millis,
            last_fire: None,
        }
    }

    /// Returns true when a full interval has elapsed since the last
    /// fire. The first call arms the timer without firing.
    pub fn tick(&mut self, now_millis: u64) -> bool {
        match self.last_fire {
            None => {
                self.last_fire = Some(now_millis);
                false
            }
            Some(last) => {
                if now_millis.saturating_sub(last) >= self.interval_millis {
                    self.last_fire = Some(now_millis);
                    true
                } else {
                    false
                }
            }
        }
    }
}
