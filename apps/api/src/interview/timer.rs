//! Session clock: one tick per second while the session is active.
//!
//! The tick is independent of the submission flow (it keeps applying during
//! an in-flight evaluation) and stops permanently once the session
//! completes or its context is dropped.

use std::sync::Weak;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::interview::session::SessionState;

pub fn spawn_session_clock(session: Weak<RwLock<SessionState>>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick of a tokio interval fires immediately; consume it so
        // elapsed time starts at zero.
        interval.tick().await;
        loop {
            interval.tick().await;
            let Some(session) = session.upgrade() else {
                break;
            };
            let mut guard = session.write().await;
            if guard.completed {
                break;
            }
            guard.tick();
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::bank::QuestionBank;

    async fn advance_secs(secs: u64) {
        for _ in 0..secs {
            tokio::time::advance(Duration::from_secs(1)).await;
            tokio::task::yield_now().await;
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_clock_ticks_once_per_second() {
        let bank = QuestionBank::default();
        let session = Arc::new(RwLock::new(SessionState::start(&bank, 1).unwrap()));
        let _clock = spawn_session_clock(Arc::downgrade(&session));
        tokio::task::yield_now().await;

        advance_secs(5).await;
        assert_eq!(session.read().await.elapsed_secs, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clock_stops_after_completion() {
        let bank = QuestionBank::default();
        let session = Arc::new(RwLock::new(SessionState::start(&bank, 1).unwrap()));
        let clock = spawn_session_clock(Arc::downgrade(&session));
        tokio::task::yield_now().await;

        advance_secs(2).await;
        session.write().await.completed = true;

        advance_secs(3).await;
        assert_eq!(session.read().await.elapsed_secs, 2);
        assert!(clock.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_clock_exits_when_session_dropped() {
        let bank = QuestionBank::default();
        let session = Arc::new(RwLock::new(SessionState::start(&bank, 1).unwrap()));
        let clock = spawn_session_clock(Arc::downgrade(&session));
        tokio::task::yield_now().await;

        advance_secs(1).await;
        drop(session);
        advance_secs(1).await;
        assert!(clock.is_finished());
    }
}
