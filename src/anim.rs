use crate::actions::ActionKind;
use crate::color::adjust_brightness;
use crate::model::Mood;
use crate::traits::Traits;

// Idle breathing motion, always applied.
pub(crate) const IDLE_BOUNCE_FREQ: f64 = 0.05;
pub(crate) const IDLE_BOUNCE_AMPL: f64 = 3.0;

// Vertical anchor of the body before bounce offsets.
pub(crate) const BODY_ANCHOR_Y: f64 = 55.0;

/// Everything the part renderers need for one frame, derived from the
/// mood, the global clock and the optional in-flight action. Pure data;
/// two identical inputs always produce an identical `FrameParams`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct FrameParams {
    pub(crate) body_y: f64,
    pub(crate) scale: f64,
    pub(crate) rotation: f64,
    pub(crate) body_color: String,
    pub(crate) accent_color: String,
}

/// Brightness delta a mood applies to the body and accent colors.
pub(crate) fn mood_color_delta(mood: Mood) -> i32 {
    match mood {
        Mood::Happy => 0,
        Mood::Sad => -20,
        Mood::Hungry => 10,
        Mood::Sleepy => -10,
        Mood::Angry => 15,
        Mood::Unknown => 0,
    }
}

/// Per-action sinusoids: (extra bounce, color shift, scale, rotation).
fn action_params(kind: ActionKind, f: f64) -> (f64, i32, f64, f64) {
    match kind {
        ActionKind::Feed => ((f * 0.3).sin() * 8.0, 15, 1.0 + (f * 0.2).sin() * 0.1, 0.0),
        ActionKind::Comfort => ((f * 0.15).sin() * 4.0, 10, 1.0 + (f * 0.1).sin() * 0.05, 0.0),
        ActionKind::Cuddle => (
            (f * 0.25).sin() * 6.0,
            20,
            1.0 + (f * 0.15).sin() * 0.08,
            (f * 0.1).sin() * 0.1,
        ),
        ActionKind::Wake => ((f * 0.4).sin() * 10.0, 25, 1.0 + (f * 0.3).sin() * 0.12, 0.0),
    }
}

/// The frame compositor: folds mood tone, idle bounce and any active
/// action into the derived parameters for one frame. `action_frame` is
/// the number of frames elapsed since the action started.
pub(crate) fn compose(
    mood: Mood,
    frame: u64,
    traits: &Traits,
    action: Option<ActionKind>,
    action_frame: u64,
) -> FrameParams {
    let base_bounce = (frame as f64 * IDLE_BOUNCE_FREQ).sin() * IDLE_BOUNCE_AMPL;

    let (extra_bounce, color_shift, scale, rotation) = match action {
        Some(kind) => action_params(kind, action_frame as f64),
        None => (0.0, 0, 1.0, 0.0),
    };

    let mood_delta = mood_color_delta(mood);
    let mut body_color = adjust_brightness(&traits.body_color, mood_delta);
    let mut accent_color = adjust_brightness(&traits.accent_color, mood_delta);
    if action.is_some() {
        body_color = adjust_brightness(&body_color, color_shift);
        accent_color = adjust_brightness(&accent_color, color_shift);
    }

    FrameParams {
        body_y: BODY_ANCHOR_Y + base_bounce + extra_bounce,
        scale,
        rotation,
        body_color,
        accent_color,
    }
}

/// The per-display animation clock. Owned state, ticked explicitly by
/// the host loop; stopping guarantees the frame counter no longer
/// advances. The counter resets on restart and is never persisted.
#[derive(Debug)]
pub(crate) struct AnimationDriver {
    frame: u64,
    running: bool,
}

impl AnimationDriver {
    pub(crate) fn new() -> Self {
        Self {
            frame: 0,
            running: false,
        }
    }

    pub(crate) fn start(&mut self) {
        self.running = true;
    }

    pub(crate) fn stop(&mut self) {
        self.running = false;
    }

    /// Resets the clock, e.g. when the displayed monster changes.
    pub(crate) fn restart(&mut self) {
        self.frame = 0;
        self.running = true;
    }

    pub(crate) fn tick(&mut self) {
        if self.running {
            self.frame += 1;
        }
    }

    pub(crate) fn frame(&self) -> u64 {
        self.frame
    }
}
