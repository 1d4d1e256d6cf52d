//! BSTLD label taxonomy.
//!
//! The dataset annotates traffic lights with ~14 raw state strings
//! (`GreenLeft`, `RedStraight`, ...) that downstream consumers normalize to
//! four canonical classes. The crop transform itself only passes labels
//! through; the taxonomy is exported for the class summary and for tooling
//! that trains on the cropped dataset.

/// Default crop width, matching the BSTLD camera resolution.
pub const WIDTH: u32 = 960;
/// Default crop height, matching the BSTLD camera resolution.
pub const HEIGHT: u32 = 720;

/// Canonical traffic light state a raw BSTLD label normalizes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LightState {
    Green,
    Red,
    Yellow,
    Off,
}

impl LightState {
    /// Normalize a raw BSTLD label string to its canonical class.
    pub fn from_raw(label: &str) -> Option<Self> {
        match label {
            "Green" | "GreenLeft" | "GreenRight" | "GreenStraight" | "GreenStraightRight"
            | "GreenStraightLeft" => Some(LightState::Green),
            "Yellow" => Some(LightState::Yellow),
            "Red" | "RedLeft" | "RedRight" | "RedStraight" | "RedStraightLeft" => {
                Some(LightState::Red)
            }
            "Off" | "off" => Some(LightState::Off),
            _ => None,
        }
    }

    /// One-based category id as used by detection label maps.
    pub fn category_id(self) -> u32 {
        match self {
            LightState::Green => 1,
            LightState::Red => 2,
            LightState::Yellow => 3,
            LightState::Off => 4,
        }
    }

    /// Zero-based id as used by evaluation tooling.
    pub fn eval_id(self) -> u32 {
        self.category_id() - 1
    }

    pub fn name(self) -> &'static str {
        match self {
            LightState::Green => "Green",
            LightState::Red => "Red",
            LightState::Yellow => "Yellow",
            LightState::Off => "Off",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_labels_normalize() {
        assert_eq!(LightState::from_raw("GreenStraightRight"), Some(LightState::Green));
        assert_eq!(LightState::from_raw("RedLeft"), Some(LightState::Red));
        assert_eq!(LightState::from_raw("Yellow"), Some(LightState::Yellow));
        assert_eq!(LightState::from_raw("off"), Some(LightState::Off));
        assert_eq!(LightState::from_raw("Purple"), None);
    }

    #[test]
    fn test_category_ids() {
        assert_eq!(LightState::Green.category_id(), 1);
        assert_eq!(LightState::Off.category_id(), 4);
        assert_eq!(LightState::Yellow.eval_id(), 2);
    }
}
