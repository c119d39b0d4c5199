//! Verification session actor.
//!
//! One session actor owns the screen state for the lifetime of a screen
//! mount. Frontends hold a cloneable [`SettingsHandle`]: intents flow in
//! through a bounded queue, state snapshots flow out through a watch
//! channel. The actor is the single writer; no lock ever guards the
//! screen state.
//!
//! The actor also drives the time-based behavior: the verified-badge
//! expiry countdown and the periodic background progress refresh. Both run
//! off [`PhysicalTimeEffects`], so tests drive them with a simulated clock.

use atrio_core::effects::{AccountApiEffects, PhysicalTimeEffects};
use atrio_core::{AtrioError, PhysicalTime};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::core::{AppConfig, SettingsIntent};
use crate::errors::AppError;
use crate::views::VerificationState;
use crate::workflows;

/// Intents queued ahead of the actor before dispatch applies backpressure.
const INTENT_QUEUE_DEPTH: usize = 32;

/// Cloneable handle to a running verification session.
#[derive(Debug, Clone)]
pub struct SettingsHandle {
    intents: mpsc::Sender<SettingsIntent>,
    state: watch::Receiver<VerificationState>,
}

impl SettingsHandle {
    /// Dispatch a user intent to the session actor.
    pub async fn dispatch(&self, intent: SettingsIntent) -> Result<(), AppError> {
        self.intents
            .send(intent)
            .await
            .map_err(|_| AppError::internal("settings session is no longer running"))
    }

    /// Snapshot of the current screen state.
    pub fn state(&self) -> VerificationState {
        self.state.borrow().clone()
    }

    /// Subscribe to state snapshots.
    ///
    /// The receiver observes every published state; frontends typically
    /// re-render on each change notification.
    pub fn watch(&self) -> watch::Receiver<VerificationState> {
        self.state.clone()
    }
}

/// A running verification session and its teardown handle.
///
/// Dropping the session without calling [`close`](Self::close) also stops
/// the actor: the shutdown channel closes and the loop exits on its next
/// iteration.
#[derive(Debug)]
pub struct SettingsSession {
    handle: SettingsHandle,
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SettingsSession {
    /// Spawn the session actor for a screen mount.
    ///
    /// Validates the configuration, then starts the actor: it rehydrates
    /// auth state and the progress board from the server, publishes the
    /// first snapshot, and settles into its intent/tick loop.
    pub fn spawn<A, C>(api: A, clock: C, config: AppConfig) -> Result<Self, AppError>
    where
        A: AccountApiEffects + 'static,
        C: PhysicalTimeEffects + 'static,
    {
        config.validate().map_err(|e| match e {
            AtrioError::Invalid { message } => AppError::validation("config", message),
            other => AppError::internal(other.to_string()),
        })?;

        let session_id = Uuid::new_v4();
        let (intent_tx, intent_rx) = mpsc::channel(INTENT_QUEUE_DEPTH);
        let (state_tx, state_rx) = watch::channel(VerificationState::new(&config.objectives));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(run(
            api,
            clock,
            config,
            session_id,
            intent_rx,
            state_tx,
            shutdown_rx,
        ));

        Ok(Self {
            handle: SettingsHandle {
                intents: intent_tx,
                state: state_rx,
            },
            shutdown_tx,
            task,
        })
    }

    /// Handle for dispatching intents and reading state.
    pub fn handle(&self) -> &SettingsHandle {
        &self.handle
    }

    /// Stop the actor and wait for it to finish.
    ///
    /// Screen unmount teardown: polling stops immediately, even while
    /// cloned handles are still alive. In-flight requests are not
    /// cancelled; the actor finishes its current step and exits.
    pub async fn close(self) {
        let _ = self.shutdown_tx.send(true);
        let _ = self.task.await;
    }
}

async fn run<A, C>(
    api: A,
    clock: C,
    config: AppConfig,
    session_id: Uuid,
    mut intents: mpsc::Receiver<SettingsIntent>,
    state_tx: watch::Sender<VerificationState>,
    mut shutdown_rx: watch::Receiver<bool>,
) where
    A: AccountApiEffects,
    C: PhysicalTimeEffects,
{
    let mut state = VerificationState::new(&config.objectives);
    tracing::info!(session_id = %session_id, "Verification session started");

    // Screen entry: rehydrate from the server before the first snapshot.
    if let Err(err) = workflows::refresh_auth_status(&api, &mut state).await {
        tracing::warn!("Initial auth refresh failed: {}", err);
        state.record_alert(err.to_alert());
    }
    workflows::refresh_progress(&api, &mut state).await;
    let mut last_progress_refresh = now(&clock).await;
    let _ = state_tx.send(state.clone());

    loop {
        let tick_ms = next_tick_ms(&state, &config, now(&clock).await);

        tokio::select! {
            changed = shutdown_rx.changed() => {
                // A dropped sender means the session struct itself is gone;
                // treat it the same as an explicit close.
                if changed.is_err() || *shutdown_rx.borrow() {
                    break;
                }
            }
            intent = intents.recv() => {
                match intent {
                    Some(intent) => handle_intent(&api, &mut state, intent).await,
                    // Every handle dropped; nothing can reach the screen.
                    None => break,
                }
            }
            _ = clock.sleep_ms(tick_ms) => {
                on_tick(&api, &clock, &config, &mut state, &mut last_progress_refresh).await;
            }
        }

        let _ = state_tx.send(state.clone());
    }

    tracing::info!(session_id = %session_id, "Verification session stopped");
}

/// Milliseconds until the next wakeup.
///
/// While a verified badge with an expiry is held, the countdown tick is
/// shortened so the wakeup lands on the expiry instant instead of up to a
/// full tick after it.
fn next_tick_ms(state: &VerificationState, config: &AppConfig, now: PhysicalTime) -> u64 {
    let tick = config.polling.countdown_tick_ms;
    match state.auth.remaining_ms(now) {
        Some(remaining) => tick.min(remaining).max(1),
        None => tick,
    }
}

async fn on_tick<A, C>(
    api: &A,
    clock: &C,
    config: &AppConfig,
    state: &mut VerificationState,
    last_progress_refresh: &mut PhysicalTime,
) where
    A: AccountApiEffects,
    C: PhysicalTimeEffects,
{
    let now = now(clock).await;

    if state.auth.is_expired(now) {
        tracing::info!("Verified status lapsed; resetting locally");
        if let Err(err) = workflows::expire_and_reconcile(api, state).await {
            tracing::warn!("Post-expiry reconciliation failed: {}", err);
            state.record_alert(err.to_alert());
        }
    }

    if now.saturating_since(*last_progress_refresh) >= config.polling.progress_refresh_ms {
        workflows::refresh_progress(api, state).await;
        *last_progress_refresh = now;
    }
}

async fn handle_intent<A>(api: &A, state: &mut VerificationState, intent: SettingsIntent)
where
    A: AccountApiEffects,
{
    let action = intent.description();
    let result = match intent {
        SettingsIntent::RefreshAuthStatus => workflows::refresh_auth_status(api, state).await,
        SettingsIntent::SubmitSelfie { image } => {
            workflows::submit_selfie(api, state, &image).await
        }
        SettingsIntent::RequestTotpSetup => workflows::request_totp_setup(api, state).await,
        SettingsIntent::VerifyTotpCode { code } => {
            workflows::verify_totp_code(api, state, &code).await
        }
        SettingsIntent::RefreshProgress => {
            workflows::refresh_progress(api, state).await;
            Ok(())
        }
        SettingsIntent::SubmitVerification { nationality } => {
            workflows::submit_verification(api, state, &nationality).await
        }
        SettingsIntent::DismissAlert => {
            state.clear_alert();
            Ok(())
        }
    };

    if let Err(err) = result {
        tracing::warn!("Intent '{}' failed: {}", action, err);
        state.record_alert(err.to_alert());
    }
}

async fn now<C: PhysicalTimeEffects>(clock: &C) -> PhysicalTime {
    match clock.physical_time().await {
        Ok(t) => t,
        Err(err) => {
            // A dead clock degrades time-based behavior but must not kill
            // the session; epoch zero disables expiry and refresh checks.
            tracing::warn!("Clock read failed: {}", err);
            PhysicalTime::from_ms(0)
        }
    }
}
