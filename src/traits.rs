use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Visual traits of a monster. Generated once at adoption time, then
/// persisted as an opaque JSON payload; they never change afterwards.
///
/// Every enum carries an `Unknown` catch-all so a payload written by a
/// newer (or buggy) producer still deserializes; the renderers draw
/// nothing for an unknown part instead of failing the whole frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum BodyStyle {
    Round,
    Square,
    Tall,
    Wide,
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum EyeStyle {
    Big,
    Small,
    Star,
    Sleepy,
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum AntennaStyle {
    Single,
    Double,
    Curly,
    None,
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Accessory {
    Horns,
    Ears,
    Tail,
    None,
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Traits {
    pub(crate) body_style: BodyStyle,
    pub(crate) eye_style: EyeStyle,
    pub(crate) antenna_style: AntennaStyle,
    pub(crate) accessory: Accessory,
    pub(crate) body_color: String,
    pub(crate) accent_color: String,
    pub(crate) eye_color: String,
    pub(crate) cheek_color: String,
    pub(crate) antenna_color: String,
    pub(crate) bobble_color: String,
}

const BODY_STYLES: [BodyStyle; 4] = [
    BodyStyle::Round,
    BodyStyle::Square,
    BodyStyle::Tall,
    BodyStyle::Wide,
];
const EYE_STYLES: [EyeStyle; 4] = [
    EyeStyle::Big,
    EyeStyle::Small,
    EyeStyle::Star,
    EyeStyle::Sleepy,
];
const ANTENNA_STYLES: [AntennaStyle; 4] = [
    AntennaStyle::Single,
    AntennaStyle::Double,
    AntennaStyle::Curly,
    AntennaStyle::None,
];
const ACCESSORIES: [Accessory; 4] = [
    Accessory::Horns,
    Accessory::Ears,
    Accessory::Tail,
    Accessory::None,
];

// Curated pastel palette, one pool per color slot.
const BODY_COLORS: [&str; 8] = [
    "#FFB5E8", "#B5D8FF", "#BFFCC6", "#FFF3B0", "#E0C3FC", "#FFC9DE", "#C4FAF8", "#FFDAC1",
];
const ACCENT_COLORS: [&str; 8] = [
    "#B5D8FF", "#FFB5E8", "#A8E6CF", "#FFD1DC", "#C7CEEA", "#F6DFEB", "#B5EAD7", "#FDE2E4",
];
const EYE_COLORS: [&str; 4] = ["#2C2C2C", "#3A2E39", "#1F2430", "#40304A"];
const CHEEK_COLORS: [&str; 4] = ["#FFD6E8", "#FFC9DE", "#FAD4D8", "#FFE0EC"];
const ANTENNA_COLORS: [&str; 6] = [
    "#FFD1DC", "#C7CEEA", "#B5EAD7", "#FFDAC1", "#E2F0CB", "#D4A5FF",
];
const BOBBLE_COLORS: [&str; 6] = [
    "#FFF3B0", "#FFD700", "#FFABAB", "#85E3FF", "#FFCBC1", "#AFF8DB",
];

impl Traits {
    /// Rolls a fresh random trait set. Pure apart from thread-local RNG;
    /// callable repeatedly to reroll a preview before adoption.
    pub(crate) fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let mut pick =
            |pool: &[&str]| pool.choose(&mut rng).copied().unwrap_or("#ffffff").to_string();
        let body_color = pick(&BODY_COLORS);
        let accent_color = pick(&ACCENT_COLORS);
        let eye_color = pick(&EYE_COLORS);
        let cheek_color = pick(&CHEEK_COLORS);
        let antenna_color = pick(&ANTENNA_COLORS);
        let bobble_color = pick(&BOBBLE_COLORS);
        Self {
            body_style: *BODY_STYLES.choose(&mut rng).unwrap_or(&BodyStyle::Round),
            eye_style: *EYE_STYLES.choose(&mut rng).unwrap_or(&EyeStyle::Big),
            antenna_style: *ANTENNA_STYLES
                .choose(&mut rng)
                .unwrap_or(&AntennaStyle::Single),
            accessory: *ACCESSORIES.choose(&mut rng).unwrap_or(&Accessory::None),
            body_color,
            accent_color,
            eye_color,
            cheek_color,
            antenna_color,
            bobble_color,
        }
    }

    /// Decodes the persisted JSON payload. `None` means the record is
    /// unreadable and the sprite should not be drawn at all.
    pub(crate) fn from_payload(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            return None;
        }
        serde_json::from_str(raw).ok()
    }

    pub(crate) fn to_payload(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_hex_color(s: &str) -> bool {
        let h = s.strip_prefix('#').unwrap_or(s);
        h.len() == 6 && h.bytes().all(|b| b.is_ascii_hexdigit())
    }

    #[test]
    fn generated_traits_are_always_valid() {
        for _ in 0..10_000 {
            let t = Traits::generate();
            assert_ne!(t.body_style, BodyStyle::Unknown);
            assert_ne!(t.eye_style, EyeStyle::Unknown);
            assert_ne!(t.antenna_style, AntennaStyle::Unknown);
            assert_ne!(t.accessory, Accessory::Unknown);
            for c in [
                &t.body_color,
                &t.accent_color,
                &t.eye_color,
                &t.cheek_color,
                &t.antenna_color,
                &t.bobble_color,
            ] {
                assert!(is_hex_color(c), "bad color {c}");
            }
        }
    }

    #[test]
    fn payload_round_trip() {
        let t = Traits::generate();
        let raw = t.to_payload();
        assert_eq!(Traits::from_payload(&raw), Some(t));
    }

    #[test]
    fn payload_uses_the_wire_field_names() {
        let t = Traits::generate();
        let raw = t.to_payload();
        assert!(raw.contains("\"bodyStyle\""));
        assert!(raw.contains("\"bobbleColor\""));
    }

    #[test]
    fn malformed_payload_is_rejected() {
        assert_eq!(Traits::from_payload(""), None);
        assert_eq!(Traits::from_payload("   "), None);
        assert_eq!(Traits::from_payload("{not json"), None);
        assert_eq!(Traits::from_payload("{\"bodyStyle\":\"round\"}"), None);
    }

    #[test]
    fn unrecognized_enum_values_degrade_to_unknown() {
        let raw = r##"{
            "bodyStyle": "blob",
            "eyeStyle": "laser",
            "antennaStyle": "satellite",
            "accessory": "cape",
            "bodyColor": "#FFB5E8",
            "accentColor": "#B5D8FF",
            "eyeColor": "#2C2C2C",
            "cheekColor": "#FFD6E8",
            "antennaColor": "#FFD1DC",
            "bobbleColor": "#FFF3B0"
        }"##;
        let t = Traits::from_payload(raw).expect("payload should still parse");
        assert_eq!(t.body_style, BodyStyle::Unknown);
        assert_eq!(t.eye_style, EyeStyle::Unknown);
        assert_eq!(t.antenna_style, AntennaStyle::Unknown);
        assert_eq!(t.accessory, Accessory::Unknown);
    }
}
