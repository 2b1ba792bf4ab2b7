use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;
use bu_core::provisioning::{SessionEvent, SessionPhase};

/// Identifies one `start` flow. Outcomes carrying a stale ticket are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTicket(u64);

impl SessionTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
struct SessionSlot {
    generation: u64,
    phase: SessionPhase,
}

/// Explicit per-bridge provisioning context.
///
/// Holds the state every command needs to see: the phase of the current
/// session, its generation, and the one-shot "plan id cache was cleared"
/// flag read by the clear-complete handler.
#[derive(Debug)]
pub struct ProvisioningContext {
    slot: Mutex<SessionSlot>,
    cache_cleared: AtomicBool,
}

impl ProvisioningContext {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(SessionSlot {
                generation: 0,
                phase: SessionPhase::Idle,
            }),
            cache_cleared: AtomicBool::new(false),
        }
    }

    /// Opens a new session in `Started` and returns its ticket.
    ///
    /// Returns the phase the previous session was left in so the caller can
    /// cancel a flow that is still running.
    pub async fn begin_session(&self) -> (SessionTicket, SessionPhase) {
        let mut slot = self.slot.lock().await;
        let previous = slot.phase;
        slot.generation += 1;
        // A fresh session always starts from Idle.
        slot.phase = SessionPhase::Idle
            .transition(SessionEvent::Started)
            .unwrap_or(SessionPhase::Started);
        (SessionTicket(slot.generation), previous)
    }

    /// Records the terminal outcome of the session identified by `ticket`.
    ///
    /// Returns `false` when the outcome must not be reported: the session was
    /// aborted, already finished, or superseded by a newer `start`.
    pub async fn finish(&self, ticket: SessionTicket, event: SessionEvent) -> bool {
        let mut slot = self.slot.lock().await;
        if slot.generation != ticket.0 {
            return false;
        }
        match slot.phase.transition(event) {
            Ok(next) if slot.phase == SessionPhase::Started => {
                slot.phase = next;
                true
            }
            _ => false,
        }
    }

    /// Whether `ticket` names the newest session and it is still running.
    pub async fn is_current(&self, ticket: SessionTicket) -> bool {
        let slot = self.slot.lock().await;
        slot.generation == ticket.0 && slot.phase == SessionPhase::Started
    }

    /// Moves an outstanding session to `Error`. Returns whether one was active.
    pub async fn abort(&self) -> bool {
        let mut slot = self.slot.lock().await;
        let was_active = slot.phase == SessionPhase::Started;
        if let Ok(next) = slot.phase.transition(SessionEvent::Aborted) {
            slot.phase = next;
        }
        was_active
    }

    pub async fn phase(&self) -> SessionPhase {
        self.slot.lock().await.phase
    }

    pub fn mark_cache_cleared(&self) {
        self.cache_cleared.store(true, Ordering::SeqCst);
    }

    /// Reads and resets the cache-cleared flag.
    pub fn take_cache_cleared(&self) -> bool {
        self.cache_cleared.swap(false, Ordering::SeqCst)
    }
}

impl Default for ProvisioningContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn begin_then_finish_reports_once() {
        let context = ProvisioningContext::new();
        let (ticket, previous) = context.begin_session().await;
        assert_eq!(previous, SessionPhase::Idle);
        assert_eq!(context.phase().await, SessionPhase::Started);

        assert!(context.finish(ticket, SessionEvent::Completed).await);
        assert_eq!(context.phase().await, SessionPhase::Completed);

        // A second outcome for the same session is dropped.
        assert!(!context.finish(ticket, SessionEvent::Failed).await);
    }

    #[tokio::test]
    async fn abort_suppresses_late_outcome() {
        let context = ProvisioningContext::new();
        let (ticket, _) = context.begin_session().await;

        assert!(context.abort().await);
        assert_eq!(context.phase().await, SessionPhase::Error);
        assert!(!context.finish(ticket, SessionEvent::Completed).await);
    }

    #[tokio::test]
    async fn ticket_is_current_until_aborted_or_superseded() {
        let context = ProvisioningContext::new();
        let (first, _) = context.begin_session().await;
        assert!(context.is_current(first).await);

        let (second, _) = context.begin_session().await;
        assert!(!context.is_current(first).await);
        assert!(context.is_current(second).await);

        context.abort().await;
        assert!(!context.is_current(second).await);
    }

    #[tokio::test]
    async fn abort_without_session_reports_inactive() {
        let context = ProvisioningContext::new();
        assert!(!context.abort().await);
        assert_eq!(context.phase().await, SessionPhase::Idle);
    }

    #[tokio::test]
    async fn newer_session_supersedes_older_ticket() {
        let context = ProvisioningContext::new();
        let (old, _) = context.begin_session().await;
        let (new, previous) = context.begin_session().await;
        assert_eq!(previous, SessionPhase::Started);
        assert!(new.generation() > old.generation());

        assert!(!context.finish(old, SessionEvent::Completed).await);
        assert!(context.finish(new, SessionEvent::Completed).await);
    }

    #[test]
    fn cache_cleared_flag_is_consumed_once() {
        let context = ProvisioningContext::new();
        assert!(!context.take_cache_cleared());

        context.mark_cache_cleared();
        assert!(context.take_cache_cleared());
        assert!(!context.take_cache_cleared());
    }
}
