//! Poll delay schedules for the activation wait.
//!
//! Two distinct schedules: linear for ordinary "still processing" reads,
//! exponential for transient status-read failures. Backing off harder when
//! the service is unreachable than when it is merely still working keeps
//! timeout behavior predictable in both regimes.

use std::time::Duration;

use legajo_types::config::IngestConfig;

/// Delay computation for the polling loop. Pure; attempt numbers are 1-based.
#[derive(Debug, Clone)]
pub struct PollSchedule {
    base_ms: u64,
    linear_cap_ms: u64,
    transient_cap_ms: u64,
}

impl PollSchedule {
    pub fn from_config(config: &IngestConfig) -> Self {
        Self {
            base_ms: config.poll_base_delay_ms,
            linear_cap_ms: config.poll_max_delay_ms,
            transient_cap_ms: config.transient_max_delay_ms,
        }
    }

    /// Delay after attempt `n` read `PROCESSING`: `base * n`, capped.
    pub fn processing_delay(&self, attempt: u32) -> Duration {
        let ms = self
            .base_ms
            .saturating_mul(u64::from(attempt.max(1)))
            .min(self.linear_cap_ms);
        Duration::from_millis(ms)
    }

    /// Delay after attempt `n` failed at the transport level:
    /// `base * 2^(n-1)`, capped.
    pub fn transient_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.max(1) - 1;
        let factor = 1u64.checked_shl(exponent).unwrap_or(u64::MAX);
        let ms = self.base_ms.saturating_mul(factor).min(self.transient_cap_ms);
        Duration::from_millis(ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule() -> PollSchedule {
        PollSchedule::from_config(&IngestConfig::default())
    }

    #[test]
    fn test_linear_schedule() {
        let s = schedule();
        assert_eq!(s.processing_delay(1), Duration::from_secs(1));
        assert_eq!(s.processing_delay(2), Duration::from_secs(2));
        assert_eq!(s.processing_delay(5), Duration::from_secs(5));
        // Capped past attempt 5
        assert_eq!(s.processing_delay(6), Duration::from_secs(5));
        assert_eq!(s.processing_delay(15), Duration::from_secs(5));
    }

    #[test]
    fn test_transient_schedule() {
        let s = schedule();
        assert_eq!(s.transient_delay(1), Duration::from_secs(1));
        assert_eq!(s.transient_delay(2), Duration::from_secs(2));
        assert_eq!(s.transient_delay(3), Duration::from_secs(4));
        assert_eq!(s.transient_delay(4), Duration::from_secs(8));
        // Capped past attempt 4
        assert_eq!(s.transient_delay(5), Duration::from_secs(10));
        assert_eq!(s.transient_delay(15), Duration::from_secs(10));
    }

    #[test]
    fn test_schedules_non_decreasing_and_bounded() {
        let s = schedule();
        for attempt in 1..30 {
            assert!(s.processing_delay(attempt + 1) >= s.processing_delay(attempt));
            assert!(s.transient_delay(attempt + 1) >= s.transient_delay(attempt));
            assert!(s.processing_delay(attempt) <= Duration::from_secs(5));
            assert!(s.transient_delay(attempt) <= Duration::from_secs(10));
        }
    }

    #[test]
    fn test_transient_outgrows_linear_before_caps() {
        let s = schedule();
        // 4s vs 3s at attempt 3, 8s vs 4s at attempt 4
        assert!(s.transient_delay(3) > s.processing_delay(3));
        assert!(s.transient_delay(4) > s.processing_delay(4));
    }

    #[test]
    fn test_huge_attempt_does_not_overflow() {
        let s = schedule();
        assert_eq!(s.transient_delay(u32::MAX), Duration::from_secs(10));
        assert_eq!(s.processing_delay(u32::MAX), Duration::from_secs(5));
    }
}
