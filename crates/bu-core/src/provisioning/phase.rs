//! Provisioning session phases.
//!
//! A session moves `Idle → Started → {Completed, Error}` and never goes back.
//! A new `start` command opens a new session rather than re-entering
//! `Started`.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Started,
    Completed,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The `started` acknowledgment was sent.
    Started,
    /// The gateway reported success.
    Completed,
    /// The gateway reported an error or timeout.
    Failed,
    /// The host aborted the flow.
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid session transition from {from:?} on {event:?}")]
pub struct InvalidTransition {
    pub from: SessionPhase,
    pub event: SessionEvent,
}

impl SessionPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionPhase::Completed | SessionPhase::Error)
    }

    pub fn transition(self, event: SessionEvent) -> Result<SessionPhase, InvalidTransition> {
        use SessionEvent as E;
        use SessionPhase as P;

        match (self, event) {
            (P::Idle, E::Started) => Ok(P::Started),
            (P::Started, E::Completed) => Ok(P::Completed),
            (P::Started, E::Failed) | (P::Started, E::Aborted) => Ok(P::Error),
            // Aborting with nothing in flight changes nothing.
            (P::Idle, E::Aborted) => Ok(P::Idle),
            (phase, E::Aborted) if phase.is_terminal() => Ok(phase),
            (from, event) => Err(InvalidTransition { from, event }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path() {
        let phase = SessionPhase::Idle
            .transition(SessionEvent::Started)
            .and_then(|p| p.transition(SessionEvent::Completed))
            .unwrap();
        assert_eq!(phase, SessionPhase::Completed);
    }

    #[test]
    fn abort_while_started_is_error() {
        let phase = SessionPhase::Started
            .transition(SessionEvent::Aborted)
            .unwrap();
        assert_eq!(phase, SessionPhase::Error);
    }

    #[test]
    fn abort_is_accepted_in_every_phase() {
        for phase in [
            SessionPhase::Idle,
            SessionPhase::Started,
            SessionPhase::Completed,
            SessionPhase::Error,
        ] {
            assert!(phase.transition(SessionEvent::Aborted).is_ok());
        }
    }

    #[test]
    fn terminal_phases_never_reenter_started() {
        for phase in [SessionPhase::Completed, SessionPhase::Error] {
            assert_eq!(
                phase.transition(SessionEvent::Started),
                Err(InvalidTransition {
                    from: phase,
                    event: SessionEvent::Started
                })
            );
        }
    }

    #[test]
    fn outcome_without_start_is_rejected() {
        assert!(SessionPhase::Idle
            .transition(SessionEvent::Completed)
            .is_err());
        assert!(SessionPhase::Error
            .transition(SessionEvent::Completed)
            .is_err());
    }
}
