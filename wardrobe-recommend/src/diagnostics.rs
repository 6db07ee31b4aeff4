//! Structured diagnostics
//!
//! The engine never formats user-facing text. It emits a tag plus positional
//! arguments, and the caller renders them through a [`DiagnosticResolver`].

use serde::{Deserialize, Serialize};
use std::fmt;
use wardrobe_core::{GarmentCategory, SlotType, StyleMode};

/// What a diagnostic is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticTag {
    /// No tops in inventory. Args: recommended categories
    MissingTop,
    /// No bottoms in inventory. Args: recommended categories
    MissingBottom,
    /// No top suits today's weather; all tops were kept anyway
    WeatherTop,
    /// No bottom suits today's weather; all bottoms were kept anyway
    WeatherBottom,
    /// Nothing in the wished slot has the wished color. Args: slot, label
    ColorWishUnmet,
    /// Top candidates ran out. Args: recommended categories
    NoTopCandidates,
    /// Bottom candidates ran out. Args: recommended categories
    NoBottomCandidates,
    /// Casual range matched nothing. Args: slot, recommended categories
    CasualRangeRelaxed,
    /// Office range matched nothing. Args: slot, recommended categories
    OfficeRangeRelaxed,
    /// Fallback range matched nothing. Args: slot, recommended categories
    RangeRelaxed,
    /// Every pair broke a color rule. Args: rule names
    ColorRuleExcluded,
    /// A color wish was active and no pair survived. Args: label
    NoCombinationMatchesWish,
    /// The chosen wish slot has no colors to pick from. Args: slot
    NoColorsForSlot,
}

impl DiagnosticTag {
    pub fn as_key(&self) -> &'static str {
        match self {
            DiagnosticTag::MissingTop => "missing_top",
            DiagnosticTag::MissingBottom => "missing_bottom",
            DiagnosticTag::WeatherTop => "weather_top",
            DiagnosticTag::WeatherBottom => "weather_bottom",
            DiagnosticTag::ColorWishUnmet => "color_wish_unmet",
            DiagnosticTag::NoTopCandidates => "no_top_candidates",
            DiagnosticTag::NoBottomCandidates => "no_bottom_candidates",
            DiagnosticTag::CasualRangeRelaxed => "casual_range_relaxed",
            DiagnosticTag::OfficeRangeRelaxed => "office_range_relaxed",
            DiagnosticTag::RangeRelaxed => "range_relaxed",
            DiagnosticTag::ColorRuleExcluded => "color_rule_excluded",
            DiagnosticTag::NoCombinationMatchesWish => "no_combination_matches_wish",
            DiagnosticTag::NoColorsForSlot => "no_colors_for_slot",
        }
    }

    /// Relaxed-range tag appropriate for a mode.
    pub fn relaxed_for(mode: StyleMode) -> Self {
        match mode {
            StyleMode::Casual => DiagnosticTag::CasualRangeRelaxed,
            StyleMode::Office => DiagnosticTag::OfficeRangeRelaxed,
            StyleMode::Unknown => DiagnosticTag::RangeRelaxed,
        }
    }
}

impl fmt::Display for DiagnosticTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

/// A tag plus its positional arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Diagnostic {
    pub tag: DiagnosticTag,
    pub args: Vec<String>,
}

impl Diagnostic {
    pub fn new(tag: DiagnosticTag, args: Vec<String>) -> Self {
        Self { tag, args }
    }

    pub fn bare(tag: DiagnosticTag) -> Self {
        Self::new(tag, Vec::new())
    }

    pub fn missing_top(mode: StyleMode) -> Self {
        Self::new(
            DiagnosticTag::MissingTop,
            vec![join_categories(mode.recommended_top_categories())],
        )
    }

    pub fn missing_bottom(mode: StyleMode) -> Self {
        Self::new(
            DiagnosticTag::MissingBottom,
            vec![join_categories(mode.recommended_bottom_categories())],
        )
    }

    /// Diagnostic for a slot whose candidates ran out.
    pub fn no_candidates(slot: SlotType, mode: StyleMode) -> Self {
        match slot {
            SlotType::Bottom => Self::new(
                DiagnosticTag::NoBottomCandidates,
                vec![join_categories(mode.recommended_bottom_categories())],
            ),
            _ => Self::new(
                DiagnosticTag::NoTopCandidates,
                vec![join_categories(mode.recommended_top_categories())],
            ),
        }
    }

    /// Score range was relaxed; `slot` is the scarcer of top/bottom.
    pub fn range_relaxed(mode: StyleMode, slot: SlotType) -> Self {
        let categories = match slot {
            SlotType::Bottom => mode.recommended_bottom_categories(),
            _ => mode.recommended_top_categories(),
        };
        Self::new(
            DiagnosticTag::relaxed_for(mode),
            vec![slot.as_db_str().to_string(), join_categories(categories)],
        )
    }

    /// Render through a caller-supplied resolver.
    pub fn render(&self, resolver: &dyn DiagnosticResolver) -> String {
        resolver.resolve(self.tag, &self.args)
    }
}

/// `"T_SHIRT/POLO"` style category list.
pub fn join_categories(categories: &[GarmentCategory]) -> String {
    categories
        .iter()
        .map(GarmentCategory::as_db_str)
        .collect::<Vec<_>>()
        .join("/")
}

/// Insertion-ordered set of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic unless an identical one is already present.
    /// Returns whether it was added.
    pub fn push(&mut self, diagnostic: Diagnostic) -> bool {
        if self.items.contains(&diagnostic) {
            return false;
        }
        self.items.push(diagnostic);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

// ============================================================================
// RENDERING
// ============================================================================

/// Turns a tag and its arguments into display text.
///
/// Implemented by the presentation layer (localized string tables); the
/// engine only ever hands out tags.
pub trait DiagnosticResolver {
    fn resolve(&self, tag: DiagnosticTag, args: &[String]) -> String;
}

impl<F> DiagnosticResolver for F
where
    F: Fn(DiagnosticTag, &[String]) -> String,
{
    fn resolve(&self, tag: DiagnosticTag, args: &[String]) -> String {
        self(tag, args)
    }
}

/// Plain English rendering, for logs and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishResolver;

impl DiagnosticResolver for EnglishResolver {
    fn resolve(&self, tag: DiagnosticTag, args: &[String]) -> String {
        let arg = |i: usize| args.get(i).map(String::as_str).unwrap_or("?");
        match tag {
            DiagnosticTag::MissingTop => format!("Add a top to your closet (try {})", arg(0)),
            DiagnosticTag::MissingBottom => {
                format!("Add a bottom to your closet (try {})", arg(0))
            }
            DiagnosticTag::WeatherTop => {
                "No top fits today's weather; showing all tops".to_string()
            }
            DiagnosticTag::WeatherBottom => {
                "No bottom fits today's weather; showing all bottoms".to_string()
            }
            DiagnosticTag::ColorWishUnmet => {
                format!("No {} item in {}", arg(0), arg(1))
            }
            DiagnosticTag::NoTopCandidates => {
                format!("No usable top today (try {})", arg(0))
            }
            DiagnosticTag::NoBottomCandidates => {
                format!("No usable bottom today (try {})", arg(0))
            }
            DiagnosticTag::CasualRangeRelaxed => format!(
                "Nothing casual enough; more {} options would help ({})",
                arg(0),
                arg(1)
            ),
            DiagnosticTag::OfficeRangeRelaxed => format!(
                "Nothing formal enough for the office; more {} options would help ({})",
                arg(0),
                arg(1)
            ),
            DiagnosticTag::RangeRelaxed => format!(
                "No outfit in the usual range; more {} options would help ({})",
                arg(0),
                arg(1)
            ),
            DiagnosticTag::ColorRuleExcluded => {
                format!("Every combination broke a color rule ({})", args.join(", "))
            }
            DiagnosticTag::NoCombinationMatchesWish => {
                format!("No outfit works with {}", arg(0))
            }
            DiagnosticTag::NoColorsForSlot => format!("No colors available for {}", arg(0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_deduplicates() {
        let mut diagnostics = Diagnostics::new();
        assert!(diagnostics.push(Diagnostic::missing_top(StyleMode::Casual)));
        assert!(!diagnostics.push(Diagnostic::missing_top(StyleMode::Casual)));
        assert!(diagnostics.push(Diagnostic::missing_top(StyleMode::Office)));
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn test_missing_top_args() {
        let d = Diagnostic::missing_top(StyleMode::Office);
        assert_eq!(d.args, vec!["DRESS_SHIRT/KNIT/POLO".to_string()]);
    }

    #[test]
    fn test_range_relaxed_picks_mode_tag() {
        let d = Diagnostic::range_relaxed(StyleMode::Casual, SlotType::Bottom);
        assert_eq!(d.tag, DiagnosticTag::CasualRangeRelaxed);
        assert_eq!(d.args, vec!["BOTTOM".to_string(), "DENIM/CHINO".to_string()]);
    }

    #[test]
    fn test_render_with_closure_resolver() {
        let d = Diagnostic::missing_bottom(StyleMode::Casual);
        let rendered = d.render(&|tag: DiagnosticTag, args: &[String]| {
            format!("{}:{}", tag, args.join(","))
        });
        assert_eq!(rendered, "missing_bottom:DENIM/CHINO");
    }

    #[test]
    fn test_english_resolver_tolerates_missing_args() {
        let d = Diagnostic::bare(DiagnosticTag::ColorWishUnmet);
        assert_eq!(d.render(&EnglishResolver), "No ? item in ?");
    }
}
