/// 8-bit RGB triple used by the brightness math and the pixel canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Rgb {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

/// Parses a 6-hex-digit color, with or without a leading '#'.
pub(crate) fn parse_hex(s: &str) -> Option<Rgb> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let n = u32::from_str_radix(hex, 16).ok()?;
    Some(Rgb {
        r: (n >> 16) as u8,
        g: (n >> 8) as u8,
        b: n as u8,
    })
}

pub(crate) fn to_hex(c: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}

/// Lightens (positive percent) or darkens (negative percent) a hex color.
///
/// Each channel moves by `round(2.55 * percent)` and clamps to [0, 255].
/// A malformed input comes back unchanged; the renderers skip bad colors
/// on their own.
pub(crate) fn adjust_brightness(hex: &str, percent: i32) -> String {
    let Some(c) = parse_hex(hex) else {
        return hex.to_string();
    };
    let amt = (2.55 * percent as f64).round() as i32;
    let shift = |ch: u8| (ch as i32 + amt).clamp(0, 255) as u8;
    to_hex(Rgb {
        r: shift(c.r),
        g: shift(c.g),
        b: shift(c.b),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_hex_color(s: &str) -> bool {
        let h = s.strip_prefix('#').unwrap_or(s);
        h.len() == 6 && h.bytes().all(|b| b.is_ascii_hexdigit())
    }

    #[test]
    fn parse_accepts_both_prefixed_and_bare() {
        assert_eq!(parse_hex("#ffb5e8"), Some(Rgb { r: 0xff, g: 0xb5, b: 0xe8 }));
        assert_eq!(parse_hex("2C2C2C"), Some(Rgb { r: 0x2c, g: 0x2c, b: 0x2c }));
        assert_eq!(parse_hex("#fff"), None);
        assert_eq!(parse_hex("zzzzzz"), None);
        assert_eq!(parse_hex(""), None);
    }

    #[test]
    fn zero_percent_is_identity() {
        for c in ["#ffb5e8", "#000000", "#ffffff", "#2c2c2c"] {
            assert_eq!(adjust_brightness(c, 0), c);
        }
    }

    #[test]
    fn output_is_always_a_valid_color_within_bounds() {
        for pct in (-100..=100).step_by(7) {
            let out = adjust_brightness("#8f41c2", pct);
            assert!(is_hex_color(&out), "bad output {out} for pct {pct}");
            assert!(parse_hex(&out).is_some());
        }
    }

    #[test]
    fn clamps_at_channel_extremes() {
        assert_eq!(adjust_brightness("#ffffff", 50), "#ffffff");
        assert_eq!(adjust_brightness("#000000", -50), "#000000");
        assert_eq!(adjust_brightness("#0000ff", 100), "#ffffff");
    }

    #[test]
    fn darken_then_lighten_round_trips_when_unclamped() {
        // Mid-range color so no channel hits 0 or 255.
        let base = "#808080";
        for pct in [5, 10, 20, 40] {
            let there = adjust_brightness(base, pct);
            let back = adjust_brightness(&there, -pct);
            let (a, b) = (parse_hex(base).unwrap(), parse_hex(&back).unwrap());
            assert!((a.r as i32 - b.r as i32).abs() <= 1, "pct {pct}: {base} -> {back}");
            assert!((a.g as i32 - b.g as i32).abs() <= 1);
            assert!((a.b as i32 - b.b as i32).abs() <= 1);
        }
    }

    #[test]
    fn malformed_input_passes_through() {
        assert_eq!(adjust_brightness("not-a-color", 20), "not-a-color");
        assert_eq!(adjust_brightness("", -20), "");
    }
}
