use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use advice_cell::services::HealthAdvisor;
use shared_config::DEFAULT_SESSION_IDLE_MINUTES;

use crate::error::ConsultationError;
use crate::models::{BookingConfirmation, ConsultationSnapshot, TurnOutcome, UpdateDraftRequest};
use crate::services::conversation::{ConsultationServices, ConsultationSession};

struct SessionEntry {
    session: ConsultationSession,
    last_touched: DateTime<Utc>,
}

/// Owns the open consultation sessions and drives turns that need the
/// advice collaborator. Sessions left idle longer than the idle timeout
/// are evicted.
pub struct ConsultationOrchestrator {
    services: Arc<ConsultationServices>,
    advisor: Arc<dyn HealthAdvisor>,
    idle_timeout: Duration,
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
}

impl ConsultationOrchestrator {
    pub fn new(services: Arc<ConsultationServices>, advisor: Arc<dyn HealthAdvisor>) -> Self {
        Self {
            services,
            advisor,
            idle_timeout: Duration::minutes(DEFAULT_SESSION_IDLE_MINUTES),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub async fn open_session(&self) -> ConsultationSnapshot {
        let session = ConsultationSession::new(self.services.clone());
        let snapshot = session.snapshot();
        let now = self.services.clock.now();

        let mut sessions = self.sessions.write().await;
        self.evict_idle_locked(&mut sessions, now);
        sessions.insert(
            session.id(),
            SessionEntry {
                session,
                last_touched: now,
            },
        );

        info!("Opened consultation {} ({} open)", snapshot.id, sessions.len());
        snapshot
    }

    pub async fn snapshot(&self, id: Uuid) -> Result<ConsultationSnapshot, ConsultationError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&id)
            .map(|entry| entry.session.snapshot())
            .ok_or(ConsultationError::SessionNotFound(id))
    }

    /// Run one user turn to completion. The session lock is released while
    /// the advisor is awaited; the advice lands only if no newer turn
    /// arrived in the meantime.
    pub async fn handle_turn(&self, id: Uuid, text: &str) -> Result<ConsultationSnapshot, ConsultationError> {
        let outcome = self.with_session(id, |session| session.submit_text(text)).await??;

        let request = match outcome {
            TurnOutcome::Replied => return self.snapshot(id).await,
            TurnOutcome::NeedsAdvice(request) => request,
        };

        debug!("Consultation {} awaiting advice for turn {}", id, request.token);
        let advice = self
            .advisor
            .get_health_advice(&request.query, &request.context)
            .await;

        self.with_session(id, |session| {
            if !session.complete_advice(request.token, advice) {
                debug!("Advice for consultation {} turn {} was superseded", id, request.token);
            }
            session.snapshot()
        })
        .await
        .inspect_err(|_| debug!("Consultation {} closed before advice arrived", id))
    }

    pub async fn select_doctor(&self, id: Uuid, doctor_id: u32) -> Result<ConsultationSnapshot, ConsultationError> {
        self.with_session(id, |session| {
            session.select_doctor(doctor_id)?;
            Ok(session.snapshot())
        })
        .await?
    }

    pub async fn update_draft(
        &self,
        id: Uuid,
        update: UpdateDraftRequest,
    ) -> Result<ConsultationSnapshot, ConsultationError> {
        self.with_session(id, |session| {
            session.update_draft(update);
            session.snapshot()
        })
        .await
    }

    pub async fn submit_booking(
        &self,
        id: Uuid,
    ) -> Result<(BookingConfirmation, ConsultationSnapshot), ConsultationError> {
        self.with_session(id, |session| {
            let confirmation = session.submit_booking()?;
            Ok((confirmation, session.snapshot()))
        })
        .await?
    }

    /// Discard the session. Advice still in flight for it is dropped.
    pub async fn close_session(&self, id: Uuid) -> Result<(), ConsultationError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| info!("Closed consultation {}", id))
            .ok_or(ConsultationError::SessionNotFound(id))
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drop every session idle for longer than the timeout. Returns how
    /// many were removed.
    pub async fn evict_idle(&self) -> usize {
        let now = self.services.clock.now();
        let mut sessions = self.sessions.write().await;
        self.evict_idle_locked(&mut sessions, now)
    }

    /// Sweep idle sessions on a fixed period until the task is aborted.
    pub fn spawn_idle_sweeper(self: Arc<Self>, every: std::time::Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                self.evict_idle().await;
            }
        })
    }

    fn evict_idle_locked(&self, sessions: &mut HashMap<Uuid, SessionEntry>, now: DateTime<Utc>) -> usize {
        let before = sessions.len();
        sessions.retain(|_, entry| now - entry.last_touched <= self.idle_timeout);

        let evicted = before - sessions.len();
        if evicted > 0 {
            info!("Evicted {} idle consultations", evicted);
        }
        evicted
    }

    async fn with_session<T>(
        &self,
        id: Uuid,
        action: impl FnOnce(&mut ConsultationSession) -> T,
    ) -> Result<T, ConsultationError> {
        let now = self.services.clock.now();
        let mut sessions = self.sessions.write().await;
        let entry = sessions
            .get_mut(&id)
            .ok_or(ConsultationError::SessionNotFound(id))?;
        entry.last_touched = now;
        Ok(action(&mut entry.session))
    }
}
