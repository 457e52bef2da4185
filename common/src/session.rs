//! Idle and token-expiry rules used by the session watcher.
//!
//! The watcher in the browser only samples clocks; this module decides.
//! All times are milliseconds since the Unix epoch unless noted.

use crate::auth::SessionUser;

/// HTTP status the backend uses for an expired server-side session.
pub const SESSION_TIMEOUT_STATUS: u16 = 440;

/// Statuses that must end the local session.
pub fn is_session_invalidating(status: u16) -> bool {
    status == 401 || status == SESSION_TIMEOUT_STATUS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdlePolicy {
    /// How often the watcher samples the token expiry. Inactivity has its own timer.
    pub poll_interval_ms: u32,
    /// Inactivity window after which the user is logged out.
    pub idle_timeout_ms: u64,
}

impl Default for IdlePolicy {
    fn default() -> Self {
        Self {
            poll_interval_ms: 5_000,
            idle_timeout_ms: 15 * 60 * 1_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionVerdict {
    Active,
    TokenExpired,
    Idle,
}

impl SessionVerdict {
    /// Message shown on the login screen after a forced logout.
    pub fn logout_reason(&self) -> Option<&'static str> {
        match self {
            SessionVerdict::Active => None,
            SessionVerdict::TokenExpired => Some("Your session has expired. Please sign in again."),
            SessionVerdict::Idle => Some("You were signed out after a period of inactivity."),
        }
    }
}

impl IdlePolicy {
    /// Token expiry only; what the periodic poll checks.
    pub fn token_verdict(&self, user: &SessionUser, now_ms: u64) -> SessionVerdict {
        let now_secs = (now_ms / 1_000) as i64;
        if user.is_expired(now_secs) {
            SessionVerdict::TokenExpired
        } else {
            SessionVerdict::Active
        }
    }

    /// Expiry wins over idleness so the user sees the more precise reason.
    pub fn evaluate(&self, user: &SessionUser, now_ms: u64, last_activity_ms: u64) -> SessionVerdict {
        if self.token_verdict(user, now_ms) == SessionVerdict::TokenExpired {
            return SessionVerdict::TokenExpired;
        }
        if now_ms.saturating_sub(last_activity_ms) >= self.idle_timeout_ms {
            return SessionVerdict::Idle;
        }
        SessionVerdict::Active
    }

    /// Milliseconds until the idle timeout fires, for scheduling a one-shot timer.
    pub fn idle_remaining_ms(&self, now_ms: u64, last_activity_ms: u64) -> u64 {
        self.idle_timeout_ms
            .saturating_sub(now_ms.saturating_sub(last_activity_ms))
    }

    /// Delay for the next inactivity timer, clamped to what a browser timer accepts.
    pub fn idle_timer_delay_ms(&self, now_ms: u64, last_activity_ms: u64) -> u32 {
        u32::try_from(self.idle_remaining_ms(now_ms, last_activity_ms))
            .unwrap_or(u32::MAX)
            .max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_expiring_at(secs: i64) -> SessionUser {
        SessionUser {
            expires_at: Some(secs),
            ..Default::default()
        }
    }

    #[test]
    fn active_within_window() {
        let policy = IdlePolicy::default();
        let user = user_expiring_at(10_000);
        assert_eq!(policy.evaluate(&user, 1_000_000, 999_000), SessionVerdict::Active);
    }

    #[test]
    fn expired_token_takes_precedence() {
        let policy = IdlePolicy::default();
        let user = user_expiring_at(1_000);
        let now = 1_000_000;
        assert_eq!(policy.evaluate(&user, now, 0), SessionVerdict::TokenExpired);
    }

    #[test]
    fn inactivity_logs_out() {
        let policy = IdlePolicy {
            poll_interval_ms: 5_000,
            idle_timeout_ms: 60_000,
        };
        let user = SessionUser::default();
        assert_eq!(policy.evaluate(&user, 160_000, 100_000), SessionVerdict::Idle);
        assert_eq!(policy.evaluate(&user, 159_999, 100_000), SessionVerdict::Active);
        assert_eq!(policy.idle_remaining_ms(130_000, 100_000), 30_000);
        assert_eq!(policy.idle_remaining_ms(500_000, 100_000), 0);
    }

    #[test]
    fn poll_ignores_inactivity() {
        let policy = IdlePolicy::default();
        assert_eq!(
            policy.token_verdict(&SessionUser::default(), u64::MAX / 2),
            SessionVerdict::Active
        );
        assert_eq!(
            policy.token_verdict(&user_expiring_at(1_000), 1_000_000),
            SessionVerdict::TokenExpired
        );
    }

    #[test]
    fn idle_timer_is_rescheduled_from_last_activity() {
        let policy = IdlePolicy {
            poll_interval_ms: 5_000,
            idle_timeout_ms: 60_000,
        };
        // Activity at 130s pushes the deadline to 190s.
        assert_eq!(policy.idle_timer_delay_ms(160_000, 130_000), 30_000);
        assert_eq!(policy.idle_timer_delay_ms(200_000, 130_000), 1);
        let long = IdlePolicy {
            poll_interval_ms: 5_000,
            idle_timeout_ms: u64::MAX,
        };
        assert_eq!(long.idle_timer_delay_ms(0, 0), u32::MAX);
    }

    #[test]
    fn invalidating_statuses() {
        assert!(is_session_invalidating(401));
        assert!(is_session_invalidating(440));
        assert!(!is_session_invalidating(403));
        assert!(!is_session_invalidating(500));
        assert!(SessionVerdict::Idle.logout_reason().is_some());
        assert!(SessionVerdict::Active.logout_reason().is_none());
    }
}
