//! Color compatibility between two garments

use serde::{Deserialize, Serialize};
use std::fmt;
use wardrobe_core::{ColorGroup, Garment, UserPreferenceRules};

/// The user's color rule toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ColorRules {
    pub disallow_vivid_pair: bool,
    pub allow_black_navy: bool,
}

impl ColorRules {
    pub fn new(disallow_vivid_pair: bool, allow_black_navy: bool) -> Self {
        Self {
            disallow_vivid_pair,
            allow_black_navy,
        }
    }

    /// No restriction at all.
    pub fn permissive() -> Self {
        Self::new(false, true)
    }
}

impl From<&UserPreferenceRules> for ColorRules {
    fn from(rules: &UserPreferenceRules) -> Self {
        Self::new(rules.disallow_vivid_pair, rules.allow_black_navy)
    }
}

/// Which rule rejected a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColorConflict {
    VividPair,
    BlackNavy,
}

impl ColorConflict {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorConflict::VividPair => "VIVID_PAIR",
            ColorConflict::BlackNavy => "BLACK_NAVY",
        }
    }
}

impl fmt::Display for ColorConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The rule a pair of color groups breaks, if any. Symmetric.
pub fn color_conflict(a: ColorGroup, b: ColorGroup, rules: ColorRules) -> Option<ColorConflict> {
    if rules.disallow_vivid_pair && a == ColorGroup::Vivid && b == ColorGroup::Vivid {
        return Some(ColorConflict::VividPair);
    }
    let navy_with_monotone = matches!(
        (a, b),
        (ColorGroup::NavyBlue, ColorGroup::Monotone) | (ColorGroup::Monotone, ColorGroup::NavyBlue)
    );
    if !rules.allow_black_navy && navy_with_monotone {
        return Some(ColorConflict::BlackNavy);
    }
    None
}

/// Whether two garments may be worn together.
pub fn colors_compatible(a: &Garment, b: &Garment, rules: ColorRules) -> bool {
    color_conflict(a.color_group, b.color_group, rules).is_none()
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;
    use wardrobe_test_utils::generators::arb_garment;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_color_rule_is_symmetric(
            a in arb_garment(),
            b in arb_garment(),
            disallow_vivid_pair in any::<bool>(),
            allow_black_navy in any::<bool>(),
        ) {
            let rules = ColorRules::new(disallow_vivid_pair, allow_black_navy);
            prop_assert_eq!(colors_compatible(&a, &b, rules), colors_compatible(&b, &a, rules));
        }
    }
}
