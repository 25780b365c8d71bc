use crate::actions::ActionKind;
use crate::anim::compose;
use crate::canvas::{Pixel, PixelCanvas};
use crate::model::Mood;
use crate::traits::{Accessory, AntennaStyle, BodyStyle, EyeStyle, Traits};

/// Logical pixel unit of the sprite grid.
pub(crate) const PX: f64 = 6.0;

const WHITE: Pixel = Pixel::rgb(255, 255, 255);
const RUMBLE_INK: Pixel = Pixel::rgb(0x2c, 0x2c, 0x2c);
const SLEEP_TINT: Pixel = Pixel::rgb(0x9b, 0x8f, 0xd4);
const TEAR_BLUE: Pixel = Pixel::rgb(0x7d, 0xd3, 0xfc);
const FLASH_RED: Pixel = Pixel::rgb(0xff, 0x6b, 0x6b);
const HEART_PINK: Pixel = Pixel::rgb(0xff, 0x69, 0xb4);
const SUN_GOLD: Pixel = Pixel::rgb(0xff, 0xd7, 0x00);
const FOOD_COLORS: [Pixel; 3] = [
    Pixel::rgb(0xff, 0x6b, 0x6b),
    Pixel::rgb(0x4e, 0xcd, 0xc4),
    Pixel::rgb(0x45, 0xb7, 0xd1),
];

// Frames over which the eyes open during a wake animation.
const WAKE_EYE_OPEN_FRAMES: f64 = 30.0;
// Blink cadence: one 80-frame window out of every 12 is a blink.
const BLINK_WINDOW: u64 = 80;
const BLINK_PERIOD: u64 = 12;

/// Renders one full frame of a monster into the canvas: compositor
/// first, then the part renderers in fixed order. Unknown styles and
/// unparseable colors skip their part; the rest of the frame still
/// renders. `level` is a display parameter with no effect on geometry.
pub(crate) fn draw_monster(
    canvas: &mut PixelCanvas,
    traits: &Traits,
    mood: Mood,
    _level: u32,
    frame: u64,
    action: Option<ActionKind>,
    action_frame: u64,
) {
    canvas.clear();

    let params = compose(mood, frame, traits, action, action_frame);
    canvas.set_transform(params.scale, params.rotation);
    let body_y = params.body_y;

    draw_body(
        canvas,
        traits.body_style,
        &params.body_color,
        &params.accent_color,
        body_y,
    );
    draw_eyes(
        canvas,
        traits.eye_style,
        &traits.eye_color,
        mood,
        body_y,
        frame,
        action,
        action_frame,
    );
    draw_mouth(
        canvas,
        mood,
        &traits.eye_color,
        &traits.cheek_color,
        body_y,
        action,
        action_frame,
    );
    draw_arms(canvas, &params.body_color, body_y, frame, action, action_frame);
    draw_antenna(
        canvas,
        traits.antenna_style,
        &traits.antenna_color,
        &traits.bobble_color,
        body_y,
        frame,
        action,
        action_frame,
    );
    draw_accessory(
        canvas,
        traits.accessory,
        &params.accent_color,
        body_y,
        frame,
        action,
        action_frame,
    );
    draw_effects(canvas, mood, body_y, frame, action, action_frame);

    canvas.reset_transform();
}

/* -----------------------------
   Body: data-driven cell masks
------------------------------ */

// Inclusive horizontal cell span on one row of the body grid.
struct Span {
    row: i32,
    x0: i32,
    x1: i32,
}

const fn sp(row: i32, x0: i32, x1: i32) -> Span {
    Span { row, x0, x1 }
}

struct BodyTemplate {
    origin_x: f64,
    // Offset added to the body anchor before the row grid starts.
    origin_dy: f64,
    outline: &'static [Span],
    fill: &'static [Span],
}

const ROUND_BODY: BodyTemplate = BodyTemplate {
    origin_x: 45.0,
    origin_dy: 0.0,
    outline: &[
        sp(0, 3, 7),
        sp(1, 2, 8),
        sp(2, 1, 9),
        sp(3, 1, 9),
        sp(4, 1, 9),
        sp(5, 1, 9),
        sp(6, 1, 9),
        sp(7, 1, 9),
        sp(8, 2, 8),
    ],
    fill: &[
        sp(1, 3, 7),
        sp(2, 2, 8),
        sp(3, 2, 8),
        sp(4, 2, 8),
        sp(5, 2, 8),
        sp(6, 2, 8),
        sp(7, 3, 7),
    ],
};

const SQUARE_BODY: BodyTemplate = BodyTemplate {
    origin_x: 45.0,
    origin_dy: 0.0,
    outline: &[
        sp(0, 1, 9),
        sp(1, 1, 9),
        sp(2, 1, 9),
        sp(3, 1, 9),
        sp(4, 1, 9),
        sp(5, 1, 9),
        sp(6, 1, 9),
        sp(7, 1, 9),
        sp(8, 1, 9),
    ],
    fill: &[
        sp(1, 2, 8),
        sp(2, 2, 8),
        sp(3, 2, 8),
        sp(4, 2, 8),
        sp(5, 2, 8),
        sp(6, 2, 8),
        sp(7, 2, 8),
    ],
};

const TALL_BODY: BodyTemplate = BodyTemplate {
    origin_x: 51.0,
    origin_dy: -12.0,
    outline: &[
        sp(0, 2, 6),
        sp(1, 1, 7),
        sp(2, 1, 7),
        sp(3, 1, 7),
        sp(4, 1, 7),
        sp(5, 1, 7),
        sp(6, 1, 7),
        sp(7, 1, 7),
        sp(8, 1, 7),
        sp(9, 1, 7),
        sp(10, 2, 6),
    ],
    fill: &[
        sp(1, 3, 5),
        sp(2, 2, 6),
        sp(3, 2, 6),
        sp(4, 2, 6),
        sp(5, 2, 6),
        sp(6, 2, 6),
        sp(7, 2, 6),
        sp(8, 2, 6),
        sp(9, 3, 5),
    ],
};

const WIDE_BODY: BodyTemplate = BodyTemplate {
    origin_x: 39.0,
    origin_dy: 6.0,
    outline: &[
        sp(0, 3, 9),
        sp(1, 2, 10),
        sp(2, 1, 11),
        sp(3, 1, 11),
        sp(4, 1, 11),
        sp(5, 1, 11),
        sp(6, 2, 10),
    ],
    fill: &[
        sp(1, 3, 9),
        sp(2, 2, 10),
        sp(3, 2, 10),
        sp(4, 2, 10),
        sp(5, 3, 9),
    ],
};

fn body_template(style: BodyStyle) -> Option<&'static BodyTemplate> {
    match style {
        BodyStyle::Round => Some(&ROUND_BODY),
        BodyStyle::Square => Some(&SQUARE_BODY),
        BodyStyle::Tall => Some(&TALL_BODY),
        BodyStyle::Wide => Some(&WIDE_BODY),
        BodyStyle::Unknown => None,
    }
}

fn fill_spans(canvas: &mut PixelCanvas, t: &BodyTemplate, spans: &[Span], body_y: f64, p: Pixel) {
    for s in spans {
        canvas.fill_rect(
            t.origin_x + f64::from(s.x0) * PX,
            body_y + t.origin_dy + f64::from(s.row) * PX,
            f64::from(s.x1 - s.x0 + 1) * PX,
            PX,
            p,
        );
    }
}

pub(crate) fn draw_body(
    canvas: &mut PixelCanvas,
    style: BodyStyle,
    body_color: &str,
    accent_color: &str,
    body_y: f64,
) {
    let Some(template) = body_template(style) else {
        return;
    };
    if let Some(accent) = Pixel::from_hex(accent_color) {
        fill_spans(canvas, template, template.outline, body_y, accent);
    }
    if let Some(body) = Pixel::from_hex(body_color) {
        fill_spans(canvas, template, template.fill, body_y, body);
    }
}

/* -----------------------------
   Eyes
------------------------------ */

fn closed_eye_bars(canvas: &mut PixelCanvas, body_y: f64, p: Pixel) {
    canvas.fill_rect(63.0, body_y + 24.0, PX * 2.0, PX, p);
    canvas.fill_rect(93.0, body_y + 24.0, PX * 2.0, PX, p);
}

pub(crate) fn draw_eyes(
    canvas: &mut PixelCanvas,
    style: EyeStyle,
    eye_color: &str,
    mood: Mood,
    body_y: f64,
    frame: u64,
    action: Option<ActionKind>,
    action_frame: u64,
) {
    let Some(ink) = Pixel::from_hex(eye_color) else {
        return;
    };
    let waking = action == Some(ActionKind::Wake);

    if mood == Mood::Sleepy && !waking {
        closed_eye_bars(canvas, body_y, ink);
        return;
    }

    let blinking = (frame / BLINK_WINDOW) % BLINK_PERIOD == 0;
    if blinking && !waking {
        closed_eye_bars(canvas, body_y, ink);
        return;
    }

    if waking {
        let openness = (action_frame as f64 / WAKE_EYE_OPEN_FRAMES).min(1.0);
        let eye_h = (PX * 2.0 * openness).floor();
        let top = body_y + 24.0 - (PX * 2.0 - eye_h);
        canvas.fill_rect(63.0, top, PX * 2.0, eye_h, ink);
        canvas.fill_rect(93.0, top, PX * 2.0, eye_h, ink);
        if openness > 0.5 {
            canvas.fill_rect(66.0, body_y + 21.0, PX, PX, WHITE);
            canvas.fill_rect(96.0, body_y + 21.0, PX, PX, WHITE);
        }
        return;
    }

    match style {
        EyeStyle::Big => {
            canvas.fill_rect(63.0, body_y + 21.0, PX * 2.0, PX * 2.0, ink);
            canvas.fill_rect(93.0, body_y + 21.0, PX * 2.0, PX * 2.0, ink);
            canvas.fill_rect(66.0, body_y + 21.0, PX, PX, WHITE);
            canvas.fill_rect(96.0, body_y + 21.0, PX, PX, WHITE);
            canvas.fill_rect(69.0, body_y + 24.0, PX / 2.0, PX / 2.0, WHITE);
            canvas.fill_rect(99.0, body_y + 24.0, PX / 2.0, PX / 2.0, WHITE);
        }
        EyeStyle::Small => {
            canvas.fill_rect(66.0, body_y + 24.0, PX, PX, ink);
            canvas.fill_rect(96.0, body_y + 24.0, PX, PX, ink);
            canvas.fill_rect(66.0, body_y + 24.0, PX / 2.0, PX / 2.0, WHITE);
            canvas.fill_rect(96.0, body_y + 24.0, PX / 2.0, PX / 2.0, WHITE);
        }
        EyeStyle::Star => {
            canvas.fill_rect(66.0, body_y + 21.0, PX, PX * 2.0, ink);
            canvas.fill_rect(63.0, body_y + 24.0, PX * 2.0, PX, ink);
            canvas.fill_rect(96.0, body_y + 21.0, PX, PX * 2.0, ink);
            canvas.fill_rect(93.0, body_y + 24.0, PX * 2.0, PX, ink);
            canvas.fill_rect(66.0, body_y + 24.0, PX / 2.0, PX / 2.0, WHITE);
            canvas.fill_rect(96.0, body_y + 24.0, PX / 2.0, PX / 2.0, WHITE);
        }
        EyeStyle::Sleepy => {
            canvas.fill_rect(63.0, body_y + 24.0, PX * 2.0, PX, ink);
            canvas.fill_rect(93.0, body_y + 24.0, PX * 2.0, PX, ink);
            canvas.fill_rect(63.0, body_y + 21.0, PX * 2.0, PX / 2.0, ink);
            canvas.fill_rect(93.0, body_y + 21.0, PX * 2.0, PX / 2.0, ink);
        }
        EyeStyle::Unknown => {}
    }
}

/* -----------------------------
   Mouth
------------------------------ */

pub(crate) fn draw_mouth(
    canvas: &mut PixelCanvas,
    mood: Mood,
    eye_color: &str,
    cheek_color: &str,
    body_y: f64,
    action: Option<ActionKind>,
    action_frame: u64,
) {
    let Some(ink) = Pixel::from_hex(eye_color) else {
        return;
    };

    if action == Some(ActionKind::Feed) {
        let openness = (action_frame as f64 * 0.3).sin() * 0.5 + 0.5;
        let mouth_h = (PX * openness).floor();
        canvas.fill_rect(75.0, body_y + 42.0, PX * 3.0, mouth_h, ink);
        if openness > 0.7 {
            canvas.fill_rect(78.0, body_y + 42.0, PX, PX / 2.0, WHITE);
            canvas.fill_rect(84.0, body_y + 42.0, PX, PX / 2.0, WHITE);
        }
        return;
    }

    // Any running action shows the happy mouth regardless of mood.
    if mood == Mood::Happy || action.is_some() {
        canvas.fill_rect(75.0, body_y + 42.0, PX * 3.0, PX, ink);
        canvas.fill_rect(69.0, body_y + 39.0, PX, PX, ink);
        canvas.fill_rect(105.0, body_y + 39.0, PX, PX, ink);
        if let Some(cheek) = Pixel::from_hex(cheek_color) {
            canvas.fill_rect(57.0, body_y + 36.0, PX * 2.0, PX, cheek);
            canvas.fill_rect(111.0, body_y + 36.0, PX * 2.0, PX, cheek);
        }
        return;
    }

    match mood {
        Mood::Sad => {
            canvas.fill_rect(75.0, body_y + 39.0, PX * 3.0, PX, ink);
            canvas.fill_rect(69.0, body_y + 42.0, PX, PX, ink);
            canvas.fill_rect(105.0, body_y + 42.0, PX, PX, ink);
        }
        Mood::Hungry => {
            // Chattering open-mouth cell mask.
            for (row, x0, x1) in [(0.0, 1.0, 2.0), (1.0, 0.0, 3.0), (2.0, 1.0, 2.0)] {
                canvas.fill_rect(
                    75.0 + x0 * PX,
                    body_y + 36.0 + row * PX,
                    (x1 - x0 + 1.0) * PX,
                    PX,
                    ink,
                );
            }
        }
        Mood::Sleepy => {
            canvas.fill_rect(78.0, body_y + 42.0, PX * 2.0, PX, ink);
        }
        Mood::Angry => {
            canvas.fill_rect(72.0, body_y + 42.0, PX * 4.0, PX, ink);
        }
        Mood::Happy | Mood::Unknown => {}
    }
}

/* -----------------------------
   Arms and feet
------------------------------ */

pub(crate) fn draw_arms(
    canvas: &mut PixelCanvas,
    body_color: &str,
    body_y: f64,
    frame: u64,
    action: Option<ActionKind>,
    action_frame: u64,
) {
    let Some(p) = Pixel::from_hex(body_color) else {
        return;
    };

    let mut wave = (frame as f64 * 0.1).sin() * 5.0;
    if action == Some(ActionKind::Cuddle) {
        wave += (action_frame as f64 * 0.2).sin() * 8.0;
    }

    canvas.fill_rect(33.0, body_y + 30.0 + wave, PX, PX * 3.0, p);
    canvas.fill_rect(27.0, body_y + 33.0 + wave, PX, PX * 2.0, p);
    canvas.fill_rect(123.0, body_y + 30.0 - wave, PX, PX * 3.0, p);
    canvas.fill_rect(129.0, body_y + 33.0 - wave, PX, PX * 2.0, p);

    canvas.fill_rect(57.0, body_y + 54.0, PX * 3.0, PX * 2.0, p);
    canvas.fill_rect(105.0, body_y + 54.0, PX * 3.0, PX * 2.0, p);
}

/* -----------------------------
   Antenna
------------------------------ */

pub(crate) fn draw_antenna(
    canvas: &mut PixelCanvas,
    style: AntennaStyle,
    antenna_color: &str,
    bobble_color: &str,
    body_y: f64,
    frame: u64,
    action: Option<ActionKind>,
    action_frame: u64,
) {
    if style == AntennaStyle::None || style == AntennaStyle::Unknown {
        return;
    }
    let (Some(stalk), Some(bobble)) =
        (Pixel::from_hex(antenna_color), Pixel::from_hex(bobble_color))
    else {
        return;
    };

    let mut bobble_y = body_y - 18.0 + (frame as f64 * 0.08).sin() * 3.0;
    if action == Some(ActionKind::Cuddle) {
        bobble_y += (action_frame as f64 * 0.4).sin() * 5.0;
    }

    match style {
        AntennaStyle::Single => {
            canvas.fill_rect(75.0, body_y - 6.0, PX, PX * 3.0, stalk);
            canvas.fill_rect(72.0, bobble_y, PX * 3.0, PX * 3.0, bobble);
            canvas.fill_rect(75.0, bobble_y + 3.0, PX, PX, WHITE);
        }
        AntennaStyle::Double => {
            canvas.fill_rect(63.0, body_y - 6.0, PX, PX * 3.0, stalk);
            canvas.fill_rect(87.0, body_y - 12.0, PX, PX * 3.0, stalk);
            canvas.fill_rect(63.0, bobble_y, PX * 3.0, PX * 3.0, bobble);
            canvas.fill_rect(81.0, bobble_y, PX * 3.0, PX * 3.0, bobble);
            canvas.fill_rect(66.0, bobble_y + 3.0, PX, PX, WHITE);
            canvas.fill_rect(84.0, bobble_y + 3.0, PX, PX, WHITE);
        }
        AntennaStyle::Curly => {
            for (x, dy) in [(78.0, -12.0), (84.0, -15.0), (84.0, -21.0), (78.0, -24.0)] {
                canvas.fill_rect(x, body_y + dy, PX, PX, stalk);
            }
            canvas.fill_rect(72.0, bobble_y, PX * 3.0, PX * 3.0, bobble);
            canvas.fill_rect(75.0, bobble_y + 3.0, PX, PX, WHITE);
        }
        AntennaStyle::None | AntennaStyle::Unknown => {}
    }
}

/* -----------------------------
   Accessory
------------------------------ */

pub(crate) fn draw_accessory(
    canvas: &mut PixelCanvas,
    accessory: Accessory,
    accent_color: &str,
    body_y: f64,
    frame: u64,
    action: Option<ActionKind>,
    action_frame: u64,
) {
    if accessory == Accessory::None || accessory == Accessory::Unknown {
        return;
    }
    let Some(p) = Pixel::from_hex(accent_color) else {
        return;
    };

    match accessory {
        Accessory::Horns => {
            canvas.fill_rect(51.0, body_y - 6.0, PX, PX * 2.0, p);
            canvas.fill_rect(45.0, body_y - 12.0, PX, PX * 2.0, p);
            canvas.fill_rect(105.0, body_y - 6.0, PX, PX * 2.0, p);
            canvas.fill_rect(111.0, body_y - 12.0, PX, PX * 2.0, p);
        }
        Accessory::Ears => {
            canvas.fill_rect(51.0, body_y, PX * 2.0, PX, p);
            canvas.fill_rect(51.0, body_y - 6.0, PX, PX * 2.0, p);
            canvas.fill_rect(105.0, body_y, PX * 2.0, PX, p);
            canvas.fill_rect(111.0, body_y - 6.0, PX, PX * 2.0, p);
        }
        Accessory::Tail => {
            let mut wag = (frame as f64 * 0.12).sin() * 4.0;
            if action == Some(ActionKind::Cuddle) {
                wag += (action_frame as f64 * 0.3).sin() * 6.0;
            }
            canvas.fill_rect(126.0, body_y + 42.0 + wag, PX, PX * 3.0, p);
            canvas.fill_rect(132.0, body_y + 48.0 + wag, PX, PX * 2.0, p);
        }
        Accessory::None | Accessory::Unknown => {}
    }
}

/* -----------------------------
   Mood and action effects
------------------------------ */

pub(crate) fn draw_effects(
    canvas: &mut PixelCanvas,
    mood: Mood,
    body_y: f64,
    frame: u64,
    action: Option<ActionKind>,
    action_frame: u64,
) {
    let f = frame as f64;
    let af = action_frame as f64;

    if mood == Mood::Hungry && action != Some(ActionKind::Feed) {
        let rumble = (f * 0.2).sin() * 2.0;
        canvas.stroke_line(51.0 + rumble, body_y + 45.0, 39.0 + rumble, body_y + 45.0, RUMBLE_INK);
    }

    if mood == Mood::Sleepy && action != Some(ActionKind::Wake) {
        let z_offset = (frame * 2 % 50) as f64;
        canvas.draw_glyph('z', 130.0, body_y - z_offset, 3.0, SLEEP_TINT);
        canvas.draw_glyph('Z', 138.0, body_y - z_offset - 15.0, 4.0, SLEEP_TINT);
    }

    if mood == Mood::Sad && action != Some(ActionKind::Comfort) && (frame / 30) % 4 == 0 {
        let tear_y = body_y + 30.0 + (frame % 30) as f64 * 2.0;
        canvas.fill_rect(66.0, tear_y, PX, PX * 2.0, TEAR_BLUE);
    }

    if mood == Mood::Angry {
        canvas.fill_rect(45.0, body_y + 12.0, PX, PX, FLASH_RED);
        canvas.fill_rect(111.0, body_y + 15.0, PX, PX, FLASH_RED);
    }

    match action {
        Some(ActionKind::Feed) => {
            for i in 0..3 {
                let px = 60.0 + i as f64 * 20.0 + (af * 0.1 + i as f64).sin() * 10.0;
                let py = body_y - 20.0 - (af * 0.5) % 30.0;
                canvas.fill_rect(px, py, PX / 2.0, PX / 2.0, FOOD_COLORS[i]);
            }
        }
        Some(ActionKind::Comfort) => {
            let heart_y = body_y - 15.0 - (af * 0.3) % 20.0;
            canvas.draw_glyph('\u{2665}', 70.0, heart_y, 2.0, HEART_PINK);
            canvas.draw_glyph('\u{2665}', 90.0, heart_y + 5.0, 2.0, HEART_PINK);
        }
        Some(ActionKind::Cuddle) => {
            for i in 0..5 {
                let star_x = 50.0 + i as f64 * 15.0 + (af * 0.2 + i as f64).sin() * 5.0;
                let star_y = body_y - 10.0 - (af * 0.4) % 25.0;
                canvas.draw_glyph('*', star_x, star_y, 2.0, SUN_GOLD);
            }
        }
        Some(ActionKind::Wake) => {
            for i in 0..8 {
                let angle = i as f64 * std::f64::consts::TAU / 8.0 + af * 0.1;
                let (s, c) = angle.sin_cos();
                canvas.stroke_line(
                    80.0 + c * 30.0,
                    body_y - 30.0 + s * 30.0,
                    80.0 + c * 40.0,
                    body_y - 30.0 + s * 40.0,
                    SUN_GOLD,
                );
            }
        }
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_traits() -> Traits {
        Traits::from_payload(
            r##"{
                "bodyStyle": "round",
                "eyeStyle": "big",
                "antennaStyle": "single",
                "accessory": "none",
                "bodyColor": "#FFB5E8",
                "accentColor": "#B5D8FF",
                "eyeColor": "#2C2C2C",
                "cheekColor": "#FFD6E8",
                "antennaColor": "#FFD1DC",
                "bobbleColor": "#FFF3B0"
            }"##,
        )
        .unwrap()
    }

    fn has_color(canvas: &PixelCanvas, hex: &str) -> bool {
        let p = Pixel::from_hex(hex).unwrap();
        canvas.px.iter().any(|q| *q == p)
    }

    // Frame where the idle bounce is ~0 and no blink window is active,
    // so the happy reference pose sits at the documented offsets.
    const STEADY_FRAME: u64 = 440;

    #[test]
    fn happy_round_reference_pose() {
        let mut canvas = PixelCanvas::new();
        let traits = sample_traits();
        draw_monster(&mut canvas, &traits, Mood::Happy, 1, STEADY_FRAME, None, 0);

        let accent = Pixel::from_hex("#B5D8FF").unwrap();
        let body = Pixel::from_hex("#FFB5E8").unwrap();
        let ink = Pixel::from_hex("#2C2C2C").unwrap();
        let cheek = Pixel::from_hex("#FFD6E8").unwrap();
        let white = Pixel::rgb(255, 255, 255);

        // Body: round template anchored at x=45, y=55; outline row 0
        // starts at cell 3, interior row 2 starts at cell 2.
        assert_eq!(canvas.pixel(63, 55), accent);
        assert_eq!(canvas.pixel(57, 67), body);
        // Outside the round top row there is no body.
        assert_eq!(canvas.pixel(45, 55), Pixel::default());

        // Big eyes with white highlights.
        assert_eq!(canvas.pixel(63, 76), ink);
        assert_eq!(canvas.pixel(66, 76), white);
        assert_eq!(canvas.pixel(96, 76), white);

        // Smiling mouth and cheek blush.
        assert_eq!(canvas.pixel(75, 97), ink);
        assert_eq!(canvas.pixel(57, 91), cheek);

        // Single antenna stalk below the bobble, bobble drawn above it.
        assert_eq!(canvas.pixel(75, 60), Pixel::from_hex("#FFD1DC").unwrap());
        assert!(has_color(&canvas, "#FFF3B0"));

        // No accessory: the horn anchor cell stays empty.
        assert_eq!(canvas.pixel(45, 43), Pixel::default());

        // No ambient effects while happy.
        assert!(!has_color(&canvas, "#9B8FD4"));
        assert!(!has_color(&canvas, "#7DD3FC"));
        assert!(!has_color(&canvas, "#FF6B6B"));
    }

    #[test]
    fn unknown_body_style_draws_nothing_for_the_body() {
        let mut canvas = PixelCanvas::new();
        draw_body(&mut canvas, BodyStyle::Unknown, "#FFB5E8", "#B5D8FF", 55.0);
        assert_eq!(canvas.ink_count(), 0);
    }

    #[test]
    fn unknown_parts_skip_while_siblings_still_render() {
        let mut canvas = PixelCanvas::new();
        let mut traits = sample_traits();
        traits.body_style = BodyStyle::Unknown;
        traits.eye_style = EyeStyle::Unknown;
        traits.antenna_style = AntennaStyle::Unknown;
        traits.accessory = Accessory::Unknown;

        draw_monster(&mut canvas, &traits, Mood::Happy, 1, STEADY_FRAME, None, 0);

        // Mouth and arms still drew.
        assert!(has_color(&canvas, "#2C2C2C"));
        assert!(has_color(&canvas, "#FFB5E8"));
        // Body/antenna/accessory colors are absent.
        assert!(!has_color(&canvas, "#B5D8FF"));
        assert!(!has_color(&canvas, "#FFD1DC"));
        assert!(!has_color(&canvas, "#FFF3B0"));
    }

    #[test]
    fn unknown_mood_skips_mouth_and_effects_but_not_geometry() {
        let mut canvas = PixelCanvas::new();
        let traits = sample_traits();
        draw_monster(&mut canvas, &traits, Mood::Unknown, 1, STEADY_FRAME, None, 0);
        // Body still renders.
        assert!(has_color(&canvas, "#B5D8FF"));
        // No mood effect colors appear.
        assert!(!has_color(&canvas, "#7DD3FC"));
        assert!(!has_color(&canvas, "#FF6B6B"));
    }

    #[test]
    fn malformed_color_skips_that_part_only() {
        let mut canvas = PixelCanvas::new();
        let mut traits = sample_traits();
        traits.eye_color = "garbage".to_string();
        draw_monster(&mut canvas, &traits, Mood::Happy, 1, STEADY_FRAME, None, 0);
        // Body drew; eyes and mouth (both keyed on eye color) did not.
        assert!(has_color(&canvas, "#B5D8FF"));
        assert!(!has_color(&canvas, "#2C2C2C"));
    }

    #[test]
    fn sleepy_mood_forces_closed_eyes_unless_waking() {
        let traits = sample_traits();

        let mut closed = PixelCanvas::new();
        draw_monster(&mut closed, &traits, Mood::Sleepy, 1, STEADY_FRAME, None, 0);
        // Closed bar sits at body_y + 24; the big-eye top row is empty.
        let ink = Pixel::from_hex("#2C2C2C").unwrap();
        assert_eq!(closed.pixel(63, 79), ink);
        assert_ne!(closed.pixel(66, 76), Pixel::rgb(255, 255, 255));

        // Wake with eyes fully open restores the highlight.
        let mut waking = PixelCanvas::new();
        draw_monster(
            &mut waking,
            &traits,
            Mood::Sleepy,
            1,
            STEADY_FRAME,
            Some(ActionKind::Wake),
            60,
        );
        assert!(waking.px.iter().any(|p| *p == Pixel::rgb(255, 255, 255)));
    }

    #[test]
    fn wake_eyes_open_progressively() {
        let mut early = PixelCanvas::new();
        let mut late = PixelCanvas::new();
        draw_eyes(
            &mut early,
            EyeStyle::Big,
            "#2C2C2C",
            Mood::Sleepy,
            55.0,
            0,
            Some(ActionKind::Wake),
            3,
        );
        draw_eyes(
            &mut late,
            EyeStyle::Big,
            "#2C2C2C",
            Mood::Sleepy,
            55.0,
            0,
            Some(ActionKind::Wake),
            30,
        );
        assert!(early.ink_count() < late.ink_count());
        // Highlight only appears past half openness.
        assert!(!early.px.iter().any(|p| *p == Pixel::rgb(255, 255, 255)));
        assert!(late.px.iter().any(|p| *p == Pixel::rgb(255, 255, 255)));
    }

    #[test]
    fn blink_closes_eyes_outside_wake() {
        // Frame 0 falls in the first blink window.
        let mut blink = PixelCanvas::new();
        draw_eyes(&mut blink, EyeStyle::Big, "#2C2C2C", Mood::Happy, 55.0, 0, None, 0);
        assert!(!blink.px.iter().any(|p| *p == Pixel::rgb(255, 255, 255)));

        let mut open = PixelCanvas::new();
        draw_eyes(
            &mut open,
            EyeStyle::Big,
            "#2C2C2C",
            Mood::Happy,
            55.0,
            BLINK_WINDOW,
            None,
            0,
        );
        assert!(open.px.iter().any(|p| *p == Pixel::rgb(255, 255, 255)));
        assert!(blink.ink_count() < open.ink_count());
    }

    #[test]
    fn feed_mouth_shows_teeth_when_wide_open() {
        // sin(5 * 0.3) ~= 0.997 -> openness ~0.999.
        let mut canvas = PixelCanvas::new();
        draw_mouth(
            &mut canvas,
            Mood::Happy,
            "#2C2C2C",
            "#FFD6E8",
            55.0,
            Some(ActionKind::Feed),
            5,
        );
        assert!(canvas.px.iter().any(|p| *p == Pixel::rgb(255, 255, 255)));

        // sin(16 * 0.3) ~= -1 -> openness ~0: mouth fully closed.
        let mut closed = PixelCanvas::new();
        draw_mouth(
            &mut closed,
            Mood::Happy,
            "#2C2C2C",
            "#FFD6E8",
            55.0,
            Some(ActionKind::Feed),
            16,
        );
        assert_eq!(closed.ink_count(), 0);
    }

    #[test]
    fn hungry_rumble_is_suppressed_during_feed() {
        let mut idle = PixelCanvas::new();
        draw_effects(&mut idle, Mood::Hungry, 55.0, 100, None, 0);
        assert!(idle.ink_count() > 0);

        let mut feeding = PixelCanvas::new();
        draw_effects(&mut feeding, Mood::Hungry, 55.0, 100, Some(ActionKind::Feed), 40);
        // Only the food particles remain, no rumble ink.
        assert!(!feeding.px.iter().any(|p| *p == RUMBLE_INK));
        assert!(feeding.ink_count() > 0);
    }

    #[test]
    fn sleepy_glyphs_are_suppressed_during_wake() {
        let mut dozing = PixelCanvas::new();
        draw_effects(&mut dozing, Mood::Sleepy, 55.0, 10, None, 0);
        assert!(dozing.px.iter().any(|p| *p == SLEEP_TINT));

        let mut waking = PixelCanvas::new();
        draw_effects(&mut waking, Mood::Sleepy, 55.0, 10, Some(ActionKind::Wake), 5);
        assert!(!waking.px.iter().any(|p| *p == SLEEP_TINT));
        // Sunburst rays drew instead.
        assert!(waking.px.iter().any(|p| *p == SUN_GOLD));
    }

    #[test]
    fn each_action_layers_its_own_effect() {
        for (kind, marker) in [
            (ActionKind::Feed, FOOD_COLORS[0]),
            (ActionKind::Comfort, HEART_PINK),
            (ActionKind::Cuddle, SUN_GOLD),
            (ActionKind::Wake, SUN_GOLD),
        ] {
            let mut canvas = PixelCanvas::new();
            draw_effects(&mut canvas, Mood::Happy, 55.0, 200, Some(kind), 12);
            assert!(
                canvas.px.iter().any(|p| *p == marker),
                "missing effect for {kind:?}"
            );
        }
    }
}
