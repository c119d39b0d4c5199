//! Verification progress view-state.
//!
//! Four numeric objectives plus a group-creation flag gate the final
//! "verify account" action. Counters are refreshed from the server and
//! clamped locally; once the backend confirms verified status the board
//! locks, pinning every objective at its target so a stale refresh can
//! never show regression.

use serde::{Deserialize, Serialize};

use crate::core::ObjectiveTargets;
use crate::views::account::AccountAuthState;
use crate::views::alerts::AlertState;
use crate::views::optimistic::Optimistic;

/// The measurable verification objectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveKind {
    /// Posts the account has opened
    PostsOpened,
    /// Posts the account has published
    PostsPublished,
    /// Channels the account has joined
    ChannelsJoined,
    /// Active members across the account's groups
    GroupMembersActive,
}

impl ObjectiveKind {
    /// All objectives in display order.
    pub const ALL: [ObjectiveKind; 4] = [
        ObjectiveKind::PostsOpened,
        ObjectiveKind::PostsPublished,
        ObjectiveKind::ChannelsJoined,
        ObjectiveKind::GroupMembersActive,
    ];

    /// Human-readable objective title.
    pub fn title(&self) -> &'static str {
        match self {
            ObjectiveKind::PostsOpened => "Open posts",
            ObjectiveKind::PostsPublished => "Publish posts",
            ObjectiveKind::ChannelsJoined => "Join channels",
            ObjectiveKind::GroupMembersActive => "Grow an active group",
        }
    }
}

/// One progress counter measured against a fixed target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationObjective {
    /// Which objective this counter measures
    pub kind: ObjectiveKind,
    /// Clamped progress value, always within `[0, target]`
    pub current: u64,
    /// Completion threshold
    pub target: u64,
}

impl VerificationObjective {
    /// Whether the counter has reached its target.
    pub fn is_complete(&self) -> bool {
        self.current >= self.target
    }
}

/// The verification objective board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressBoard {
    /// Objective counters in display order
    objectives: Vec<VerificationObjective>,
    /// Whether the account has created at least one group
    group_created: bool,
    /// One-way completion latch set when the backend confirms verification
    locked: bool,
}

impl ProgressBoard {
    /// Create a board with every counter at zero.
    pub fn new(targets: &ObjectiveTargets) -> Self {
        let objective = |kind, target| VerificationObjective {
            kind,
            current: 0,
            target,
        };
        Self {
            objectives: vec![
                objective(ObjectiveKind::PostsOpened, targets.posts_opened),
                objective(ObjectiveKind::PostsPublished, targets.posts_published),
                objective(ObjectiveKind::ChannelsJoined, targets.channels_joined),
                objective(
                    ObjectiveKind::GroupMembersActive,
                    targets.group_members_active,
                ),
            ],
            group_created: false,
            locked: false,
        }
    }

    /// All objective counters in display order.
    pub fn objectives(&self) -> &[VerificationObjective] {
        &self.objectives
    }

    /// Look up one objective counter.
    pub fn objective(&self, kind: ObjectiveKind) -> Option<&VerificationObjective> {
        self.objectives.iter().find(|o| o.kind == kind)
    }

    /// Whether the account has created at least one group.
    pub fn group_created(&self) -> bool {
        self.group_created
    }

    /// Record a refreshed counter value.
    ///
    /// The raw server value is floored to an integer and clamped to
    /// `[0, target]`. Ignored once the board is locked.
    pub fn update_progress(&mut self, kind: ObjectiveKind, raw_value: f64) {
        if self.locked {
            return;
        }
        if let Some(objective) = self.objectives.iter_mut().find(|o| o.kind == kind) {
            objective.current = clamp_to_target(raw_value, objective.target);
        }
    }

    /// Record whether the account has created a group. Ignored once locked.
    pub fn set_group_created(&mut self, created: bool) {
        if self.locked {
            return;
        }
        self.group_created = created;
    }

    /// Whether one objective is complete. Unconditionally true once locked.
    pub fn is_objective_complete(&self, kind: ObjectiveKind) -> bool {
        if self.locked {
            return true;
        }
        self.objective(kind).is_some_and(|o| o.is_complete())
    }

    /// Latch the board into its completed terminal state.
    ///
    /// Every counter is pinned at its target and the group flag forced on,
    /// so a refresh racing the verification confirmation can never make the
    /// screen show regression.
    pub fn lock(&mut self) {
        self.locked = true;
        for objective in &mut self.objectives {
            objective.current = objective.target;
        }
        self.group_created = true;
    }

    /// Whether the board has latched into its completed state.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Whether every requirement is met and the verify action may unlock.
    ///
    /// Gated on `account_verified`: authentication must complete before
    /// objective progress counts for anything.
    pub fn all_complete(&self, account_verified: bool) -> bool {
        if !account_verified {
            return false;
        }
        if self.locked {
            return true;
        }
        self.group_created && self.objectives.iter().all(|o| o.is_complete())
    }

    /// Unlock and zero the board after the verified status lapses.
    pub fn reset(&mut self) {
        self.locked = false;
        self.group_created = false;
        for objective in &mut self.objectives {
            objective.current = 0;
        }
    }
}

impl Default for ProgressBoard {
    fn default() -> Self {
        Self::new(&ObjectiveTargets::default())
    }
}

/// Floor to an integer, then clamp to `[0, target]`. Non-finite values
/// resolve to the nearest bound.
fn clamp_to_target(raw_value: f64, target: u64) -> u64 {
    let floored = raw_value.floor();
    if floored.is_nan() || floored <= 0.0 {
        0
    } else if floored >= target as f64 {
        target
    } else {
        floored as u64
    }
}

/// Everything the verification screen renders, owned by the session actor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VerificationState {
    /// Selfie review, TOTP enrollment, and the verified badge
    pub auth: AccountAuthState,
    /// Objective counters and the completion latch
    pub progress: ProgressBoard,
    /// In-flight selfie upload
    pub selfie_upload: Optimistic<()>,
    /// In-flight TOTP code check
    pub totp_verify: Optimistic<()>,
    /// Current alert banner, if any
    pub alert: Option<AlertState>,
}

impl VerificationState {
    /// Create the initial screen state for the configured targets.
    pub fn new(targets: &ObjectiveTargets) -> Self {
        Self {
            progress: ProgressBoard::new(targets),
            ..Default::default()
        }
    }

    /// Whether the final verify action is available.
    pub fn eligible_to_verify(&self) -> bool {
        !self.progress.is_locked() && self.progress.all_complete(self.auth.account_verified)
    }

    /// Show an alert banner, replacing any current one.
    pub fn record_alert(&mut self, alert: AlertState) {
        self.alert = Some(alert);
    }

    /// Clear the alert banner.
    pub fn clear_alert(&mut self) {
        self.alert = None;
    }

    /// Hard local reset after the verified status lapses.
    ///
    /// Auth returns to its unauthenticated initial values, the board
    /// unlocks and zeroes, and in-flight outcome cells clear.
    pub fn expire(&mut self) {
        self.auth.reset();
        self.progress.reset();
        self.selfie_upload.reset();
        self.totp_verify.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> ProgressBoard {
        ProgressBoard::new(&ObjectiveTargets::default())
    }

    fn complete_board() -> ProgressBoard {
        let mut board = board();
        for objective in ObjectiveKind::ALL {
            board.update_progress(objective, 1e9);
        }
        board.set_group_created(true);
        board
    }

    #[test]
    fn test_new_board_starts_at_zero() {
        let board = board();
        assert_eq!(board.objectives().len(), 4);
        for objective in board.objectives() {
            assert_eq!(objective.current, 0);
            assert!(objective.target > 0);
            assert!(!objective.is_complete());
        }
        assert!(!board.group_created());
        assert!(!board.is_locked());
    }

    #[test]
    fn test_update_floors_and_clamps() {
        let mut board = board();
        let kind = ObjectiveKind::PostsPublished; // target 5

        board.update_progress(kind, 3.9);
        assert_eq!(board.objective(kind).unwrap().current, 3);

        board.update_progress(kind, -12.0);
        assert_eq!(board.objective(kind).unwrap().current, 0);

        board.update_progress(kind, 700.0);
        assert_eq!(board.objective(kind).unwrap().current, 5);

        board.update_progress(kind, f64::NAN);
        assert_eq!(board.objective(kind).unwrap().current, 0);

        board.update_progress(kind, f64::INFINITY);
        assert_eq!(board.objective(kind).unwrap().current, 5);

        board.update_progress(kind, f64::NEG_INFINITY);
        assert_eq!(board.objective(kind).unwrap().current, 0);
    }

    #[test]
    fn test_completion_at_exact_target() {
        let mut board = board();
        board.update_progress(ObjectiveKind::ChannelsJoined, 3.0);
        assert!(board.is_objective_complete(ObjectiveKind::ChannelsJoined));
        assert!(!board.is_objective_complete(ObjectiveKind::PostsOpened));
    }

    #[test]
    fn test_lock_pins_every_counter_at_target() {
        let mut board = board();
        board.update_progress(ObjectiveKind::PostsOpened, 12.0);
        board.lock();

        assert!(board.is_locked());
        assert!(board.group_created());
        for objective in board.objectives() {
            assert_eq!(objective.current, objective.target);
        }
        for kind in ObjectiveKind::ALL {
            assert!(board.is_objective_complete(kind));
        }
    }

    #[test]
    fn test_locked_board_ignores_updates() {
        let mut board = board();
        board.lock();

        board.update_progress(ObjectiveKind::PostsOpened, 1.0);
        board.set_group_created(false);

        assert_eq!(
            board.objective(ObjectiveKind::PostsOpened).unwrap().current,
            ObjectiveTargets::default().posts_opened
        );
        assert!(board.group_created());
    }

    #[test]
    fn test_all_complete_requires_account_verified() {
        let board = complete_board();
        assert!(!board.all_complete(false));
        assert!(board.all_complete(true));
    }

    #[test]
    fn test_all_complete_requires_group_creation() {
        let mut board = board();
        for kind in ObjectiveKind::ALL {
            board.update_progress(kind, 1e9);
        }
        assert!(!board.all_complete(true));

        board.set_group_created(true);
        assert!(board.all_complete(true));
    }

    #[test]
    fn test_reset_unlocks_and_zeroes() {
        let mut board = complete_board();
        board.lock();
        board.reset();

        assert!(!board.is_locked());
        assert!(!board.group_created());
        for objective in board.objectives() {
            assert_eq!(objective.current, 0);
        }
    }

    #[test]
    fn test_eligibility_gates() {
        let mut state = VerificationState::default();
        state.progress = complete_board();
        assert!(!state.eligible_to_verify());

        state.auth.account_verified = true;
        assert!(state.eligible_to_verify());

        state.progress.lock();
        assert!(!state.eligible_to_verify());
    }

    #[test]
    fn test_expire_resets_the_whole_screen() {
        let mut state = VerificationState::default();
        state.auth.account_verified = true;
        state.progress = complete_board();
        state.progress.lock();
        state.selfie_upload.resolve(());
        state.totp_verify.reject("bad code");

        state.expire();

        assert_eq!(state.auth, AccountAuthState::default());
        assert!(!state.progress.is_locked());
        assert_eq!(state.selfie_upload, Optimistic::Idle);
        assert_eq!(state.totp_verify, Optimistic::Idle);
    }

    #[test]
    fn test_alert_replace_and_dismiss() {
        use crate::views::alerts::AlertLevel;

        let mut state = VerificationState::default();
        state.record_alert(AlertState::new(AlertLevel::Error, "A", "first"));
        state.record_alert(AlertState::new(AlertLevel::Info, "B", "second"));
        assert_eq!(state.alert.as_ref().map(|a| a.code.as_str()), Some("B"));

        state.clear_alert();
        assert!(state.alert.is_none());
    }
}

/// Property tests for counter clamping
#[cfg(test)]
mod proptest_clamp {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// A refreshed counter never lands outside `[0, target]`
        #[test]
        fn update_stays_in_bounds(raw in proptest::num::f64::ANY, target in 1u64..10_000) {
            let clamped = clamp_to_target(raw, target);
            prop_assert!(clamped <= target);
        }

        /// In-range integral values pass through unchanged
        #[test]
        fn in_range_values_floor_exactly(value in 0u64..10_000, extra in 0.0f64..0.99) {
            let target = 10_000u64;
            let clamped = clamp_to_target(value as f64 + extra, target);
            prop_assert_eq!(clamped, value);
        }
    }
}
