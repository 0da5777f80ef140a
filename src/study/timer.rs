//! Pomodoro countdown and stopwatch arithmetic.
//!
//! The timer never reads the clock itself; callers pass `now` into every
//! method so the CLI can drive it from a tick loop and tests can drive it
//! from fixed instants.

use chrono::{DateTime, Duration, Utc};

use super::models::StudyMode;

pub const DEFAULT_POMODORO_MINUTES: u32 = 25;
pub const DEFAULT_MIN_SESSION_SECONDS: u64 = 60;

#[derive(Debug, Clone)]
pub struct StudyTimer {
    mode: StudyMode,
    planned: Duration,
    accumulated: Duration,
    running_since: Option<DateTime<Utc>>,
}

impl StudyTimer {
    pub fn pomodoro(minutes: u32) -> Self {
        Self {
            mode: StudyMode::Pomodoro,
            planned: Duration::minutes(i64::from(minutes)),
            accumulated: Duration::zero(),
            running_since: None,
        }
    }

    pub fn stopwatch() -> Self {
        Self {
            mode: StudyMode::Stopwatch,
            planned: Duration::zero(),
            accumulated: Duration::zero(),
            running_since: None,
        }
    }

    pub fn mode(&self) -> StudyMode {
        self.mode
    }

    pub fn planned_seconds(&self) -> u64 {
        self.planned.num_seconds().max(0) as u64
    }

    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    /// Start or resume. No-op while already running.
    pub fn start(&mut self, now: DateTime<Utc>) {
        if self.running_since.is_none() {
            self.running_since = Some(now);
        }
    }

    pub fn pause(&mut self, now: DateTime<Utc>) {
        if let Some(since) = self.running_since.take() {
            self.accumulated = self.accumulated + (now - since).max(Duration::zero());
        }
    }

    pub fn resume(&mut self, now: DateTime<Utc>) {
        self.start(now);
    }

    fn elapsed_duration(&self, now: DateTime<Utc>) -> Duration {
        let running = self
            .running_since
            .map(|since| (now - since).max(Duration::zero()))
            .unwrap_or_else(Duration::zero);
        let elapsed = self.accumulated + running;
        match self.mode {
            StudyMode::Pomodoro => elapsed.min(self.planned),
            StudyMode::Stopwatch => elapsed,
        }
    }

    /// Whole seconds studied so far
    pub fn elapsed(&self, now: DateTime<Utc>) -> u64 {
        self.elapsed_duration(now).num_seconds() as u64
    }

    /// Seconds left on a Pomodoro countdown, rounded up; `None` for a stopwatch
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<u64> {
        match self.mode {
            StudyMode::Pomodoro => {
                let left = self.planned - self.elapsed_duration(now);
                let millis = left.num_milliseconds().max(0) as u64;
                Some(millis.div_ceil(1000))
            }
            StudyMode::Stopwatch => None,
        }
    }

    /// A zero-length Pomodoro never completes
    pub fn is_complete(&self, now: DateTime<Utc>) -> bool {
        self.mode == StudyMode::Pomodoro
            && self.planned > Duration::zero()
            && self.elapsed_duration(now) >= self.planned
    }

    /// Stop the timer and return the seconds worth saving, if any.
    ///
    /// A completed Pomodoro always yields its full planned length. Otherwise
    /// the elapsed time is kept only when it exceeds `min_seconds`. The timer
    /// is reset either way.
    pub fn finish(&mut self, now: DateTime<Utc>, min_seconds: u64) -> Option<u64> {
        let result = if self.is_complete(now) {
            Some(self.planned_seconds())
        } else {
            let elapsed = self.elapsed(now);
            (elapsed > min_seconds).then_some(elapsed)
        };
        self.reset();
        result
    }

    pub fn reset(&mut self) {
        self.accumulated = Duration::zero();
        self.running_since = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + seconds, 0).unwrap()
    }

    #[test]
    fn test_pomodoro_countdown() {
        let mut timer = StudyTimer::pomodoro(25);
        assert_eq!(timer.remaining(at(0)), Some(1500));

        timer.start(at(0));
        assert_eq!(timer.remaining(at(100)), Some(1400));
        assert!(!timer.is_complete(at(1499)));
        assert!(timer.is_complete(at(1500)));
        assert_eq!(timer.remaining(at(2000)), Some(0));
        assert_eq!(timer.elapsed(at(2000)), 1500);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut timer = StudyTimer::stopwatch();
        timer.start(at(0));
        timer.pause(at(30));
        assert_eq!(timer.elapsed(at(500)), 30);
        assert!(!timer.is_running());

        timer.resume(at(500));
        timer.start(at(510));
        assert_eq!(timer.elapsed(at(540)), 70);
        assert_eq!(timer.remaining(at(540)), None);
    }

    #[test]
    fn test_finish_thresholds() {
        let mut short = StudyTimer::stopwatch();
        short.start(at(0));
        assert_eq!(short.finish(at(60), DEFAULT_MIN_SESSION_SECONDS), None);
        assert_eq!(short.elapsed(at(100)), 0);

        let mut long = StudyTimer::stopwatch();
        long.start(at(0));
        assert_eq!(long.finish(at(61), DEFAULT_MIN_SESSION_SECONDS), Some(61));

        let mut partial = StudyTimer::pomodoro(25);
        partial.start(at(0));
        assert_eq!(partial.finish(at(600), DEFAULT_MIN_SESSION_SECONDS), Some(600));
    }

    #[test]
    fn test_completed_pomodoro_saves_full_length() {
        let mut timer = StudyTimer::pomodoro(1);
        timer.start(at(0));
        assert_eq!(timer.finish(at(90), 600), Some(60));
        assert_eq!(timer.remaining(at(90)), Some(60));
    }

    #[test]
    fn test_zero_length_pomodoro_saves_nothing() {
        let mut timer = StudyTimer::pomodoro(0);
        timer.start(at(0));
        assert!(!timer.is_complete(at(0)));
        assert!(!timer.is_complete(at(5)));
        assert_eq!(timer.finish(at(5), DEFAULT_MIN_SESSION_SECONDS), None);
    }
}
