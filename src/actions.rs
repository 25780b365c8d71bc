use std::time::{Duration, Instant};

/// Care actions a player can trigger on a monster. Each runs a
/// fixed-length animation; only one may be in flight at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ActionKind {
    Feed,
    Comfort,
    Cuddle,
    Wake,
}

impl ActionKind {
    pub(crate) const ALL: [ActionKind; 4] = [
        ActionKind::Feed,
        ActionKind::Comfort,
        ActionKind::Cuddle,
        ActionKind::Wake,
    ];

    pub(crate) fn duration(self) -> Duration {
        let ms = match self {
            ActionKind::Feed => 2000,
            ActionKind::Comfort => 1500,
            ActionKind::Cuddle => 2500,
            ActionKind::Wake => 1800,
        };
        Duration::from_millis(ms)
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            ActionKind::Feed => "feed",
            ActionKind::Comfort => "comfort",
            ActionKind::Cuddle => "cuddle",
            ActionKind::Wake => "wake",
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Phase {
    Idle,
    Performing { kind: ActionKind, deadline: Instant },
}

/// Serializes actions: one at a time, fixed duration, terminal
/// transition driven solely by the deadline. The clock is passed in on
/// every call so tests can drive time explicitly; dropping the
/// orchestrator discards any pending deadline.
#[derive(Debug)]
pub(crate) struct ActionOrchestrator {
    phase: Phase,
}

impl ActionOrchestrator {
    pub(crate) fn new() -> Self {
        Self { phase: Phase::Idle }
    }

    /// Starts `kind` if idle and reports `true` (the "animation start"
    /// notification). A trigger while another action runs is a silent
    /// no-op: no queueing, no error.
    pub(crate) fn trigger(&mut self, kind: ActionKind, now: Instant) -> bool {
        match self.phase {
            Phase::Idle => {
                self.phase = Phase::Performing {
                    kind,
                    deadline: now + kind.duration(),
                };
                true
            }
            Phase::Performing { .. } => false,
        }
    }

    /// Advances the machine. Returns the finished action exactly once,
    /// when its duration has elapsed; the caller fires the
    /// "animation end" and "action performed" notifications off it.
    pub(crate) fn tick(&mut self, now: Instant) -> Option<ActionKind> {
        if let Phase::Performing { kind, deadline } = self.phase {
            if now >= deadline {
                self.phase = Phase::Idle;
                return Some(kind);
            }
        }
        None
    }

    /// Discards any pending action; its completion never fires. Used
    /// when the display restarts, since a running animation belongs to
    /// the monster it was triggered on.
    pub(crate) fn cancel(&mut self) {
        self.phase = Phase::Idle;
    }

    pub(crate) fn active(&self) -> Option<ActionKind> {
        match self.phase {
            Phase::Idle => None,
            Phase::Performing { kind, .. } => Some(kind),
        }
    }
}
