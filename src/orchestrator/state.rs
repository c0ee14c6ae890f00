//! Lifecycle state machine states and control actions.

/// Lifecycle of the estimator owned by the orchestrator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    /// No estimator; sensors still update the view
    #[default]
    Idle,
    /// Estimator active and integrating observations
    Running,
    /// Estimator active but told to pause
    Paused,
}

impl LifecycleState {
    /// An estimator exists in this state
    pub fn has_estimator(&self) -> bool {
        !matches!(self, LifecycleState::Idle)
    }

    /// State name for logging
    pub fn name(&self) -> &'static str {
        match self {
            LifecycleState::Idle => "Idle",
            LifecycleState::Running => "Running",
            LifecycleState::Paused => "Paused",
        }
    }
}

/// User-facing control actions (the view's buttons).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlAction {
    /// Start a fresh estimator (resetting any existing one)
    Start,
    /// Drop the estimator
    Reset,
    /// Pause the running estimator
    Pause,
    /// Resume a paused estimator
    Resume,
}

impl ControlAction {
    /// Every action, in display order
    pub const ALL: [ControlAction; 4] = [
        ControlAction::Start,
        ControlAction::Reset,
        ControlAction::Pause,
        ControlAction::Resume,
    ];

    /// Whether the control for this action is usable in `state`
    pub fn enabled_in(&self, state: LifecycleState) -> bool {
        match self {
            ControlAction::Start => state == LifecycleState::Idle,
            ControlAction::Reset => state.has_estimator(),
            ControlAction::Pause => state == LifecycleState::Running,
            ControlAction::Resume => state == LifecycleState::Paused,
        }
    }
}

/// Result of a control operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlOutcome {
    /// The transition happened
    Applied,
    /// The operation does not apply in the current state; nothing changed
    Ignored,
}

impl ControlOutcome {
    /// The transition happened
    pub fn is_applied(&self) -> bool {
        matches!(self, ControlOutcome::Applied)
    }
}
