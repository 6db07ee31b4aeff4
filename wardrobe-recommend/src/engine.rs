//! Suggestion engine
//!
//! Turns a snapshot of (inventory, preferences, weather) into ranked outfit
//! suggestions or, when nothing can be suggested, structured diagnostics.
//! Every call is independent and side-effect free, so the caller may simply
//! re-run it whenever an input changes.

use crate::diagnostics::{Diagnostic, DiagnosticTag, Diagnostics};
use crate::formality::formality_score;
use crate::palette::{color_conflict, ColorConflict, ColorRules};
use crate::suitability::garment_suits;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use wardrobe_core::{
    same_hex, ColorWish, Garment, OutfitSuggestion, ScoreRange, SlotType, StyleMode,
    TemperatureRange, UserPreferenceRules, WardrobeConfig, WardrobeResult, WeatherSnapshot,
};

// ============================================================================
// REQUEST / RESULT
// ============================================================================

/// Inputs of one engine run.
#[derive(Debug, Clone)]
pub struct SuggestionRequest<'a> {
    pub inventory: &'a [Garment],
    pub mode: StyleMode,
    pub rules: ColorRules,
    /// `None` until the first weather snapshot arrives; weather filtering
    /// is skipped entirely in that case
    pub forecast: Option<TemperatureRange>,
    pub color_wish: Option<&'a ColorWish>,
}

impl<'a> SuggestionRequest<'a> {
    /// Request with default color rules, no weather and no wish.
    pub fn new(inventory: &'a [Garment], mode: StyleMode) -> Self {
        Self {
            inventory,
            mode,
            rules: ColorRules::from(&UserPreferenceRules::default()),
            forecast: None,
            color_wish: None,
        }
    }

    /// Request built from stored preferences and the latest weather.
    pub fn from_preferences(
        inventory: &'a [Garment],
        mode: StyleMode,
        preferences: &'a UserPreferenceRules,
        weather: Option<&WeatherSnapshot>,
    ) -> Self {
        Self {
            inventory,
            mode,
            rules: ColorRules::from(preferences),
            forecast: weather.map(WeatherSnapshot::forecast),
            color_wish: preferences.color_wish.as_ref(),
        }
    }

    pub fn with_rules(mut self, rules: ColorRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_forecast(mut self, forecast: TemperatureRange) -> Self {
        self.forecast = Some(forecast);
        self
    }

    pub fn with_color_wish(mut self, wish: &'a ColorWish) -> Self {
        self.color_wish = Some(wish);
        self
    }

    /// The wish, if it targets a slot that takes part in outfits.
    fn active_wish(&self) -> Option<&'a ColorWish> {
        self.color_wish.filter(|w| w.slot_type.is_wishable())
    }
}

/// Output of one engine run.
///
/// Either `suggestions` is non-empty, or `diagnostics` explains why not.
/// A relaxed-range result carries both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Recommendation {
    pub suggestions: Vec<OutfitSuggestion>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Recommendation {
    fn empty(diagnostics: Diagnostics) -> Self {
        Self {
            suggestions: Vec::new(),
            diagnostics: diagnostics.into_vec(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    pub fn has_diagnostic(&self, tag: DiagnosticTag) -> bool {
        self.diagnostics.iter().any(|d| d.tag == tag)
    }
}

// ============================================================================
// ENGINE
// ============================================================================

/// A garment paired with its precomputed formality score.
#[derive(Debug, Clone, Copy)]
struct Scored<'a> {
    garment: &'a Garment,
    score: i32,
}

fn scored<'g>(garments: &[&'g Garment]) -> Vec<Scored<'g>> {
    garments
        .iter()
        .map(|&garment| Scored {
            garment,
            score: formality_score(garment),
        })
        .collect()
}

/// Pairs that survived enumeration plus the color rules that rejected the rest.
struct Enumeration {
    suggestions: Vec<OutfitSuggestion>,
    conflicts: BTreeSet<ColorConflict>,
}

/// Ranked outfit generator.
#[derive(Debug, Clone)]
pub struct SuggestionEngine {
    config: WardrobeConfig,
}

impl SuggestionEngine {
    /// Create an engine, validating the configuration.
    pub fn new(config: WardrobeConfig) -> WardrobeResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &WardrobeConfig {
        &self.config
    }

    /// Run the full filtering, enumeration and fallback pipeline.
    pub fn suggest(&self, request: &SuggestionRequest<'_>) -> Recommendation {
        let mode = request.mode;
        let mut diagnostics = Diagnostics::new();

        if request.inventory.is_empty() {
            diagnostics.push(Diagnostic::missing_top(mode));
            diagnostics.push(Diagnostic::missing_bottom(mode));
            return Recommendation::empty(diagnostics);
        }

        let mut tops = partition(request.inventory, SlotType::Top);
        let mut bottoms = partition(request.inventory, SlotType::Bottom);
        let mut outers = partition(request.inventory, SlotType::Outer);
        if tops.is_empty() {
            diagnostics.push(Diagnostic::missing_top(mode));
        }
        if bottoms.is_empty() {
            diagnostics.push(Diagnostic::missing_bottom(mode));
        }

        // A missing slot is already reported; weather only speaks for stocked ones.
        if let Some(forecast) = request.forecast {
            if !tops.is_empty() && !self.retain_suitable(&mut tops, forecast) {
                diagnostics.push(Diagnostic::bare(DiagnosticTag::WeatherTop));
            }
            if !bottoms.is_empty() && !self.retain_suitable(&mut bottoms, forecast) {
                diagnostics.push(Diagnostic::bare(DiagnosticTag::WeatherBottom));
            }
        }

        let wish = request.active_wish();
        if let Some(wish) = wish {
            let target = match wish.slot_type {
                SlotType::Top => &mut tops,
                SlotType::Bottom => &mut bottoms,
                _ => &mut outers,
            };
            target.retain(|g| same_hex(&g.color_hex, &wish.color_hex));
            if target.is_empty() {
                tracing::debug!(slot = %wish.slot_type, color = %wish.color_hex, "color wish unmet");
                diagnostics.push(Diagnostic::new(
                    DiagnosticTag::ColorWishUnmet,
                    vec![wish.slot_type.as_db_str().to_string(), wish.label.clone()],
                ));
                return Recommendation::empty(diagnostics);
            }
        }

        if tops.is_empty() || bottoms.is_empty() {
            if diagnostics.is_empty() {
                let slot = if tops.is_empty() {
                    SlotType::Top
                } else {
                    SlotType::Bottom
                };
                diagnostics.push(Diagnostic::no_candidates(slot, mode));
            }
            return Recommendation::empty(diagnostics);
        }

        let range = self.config.score_ranges.for_mode(mode);
        let outers = self.outer_candidates(outers, request.forecast);
        let tops = scored(&tops);
        let bottoms = scored(&bottoms);

        tracing::debug!(
            mode = %mode,
            tops = tops.len(),
            bottoms = bottoms.len(),
            outers = outers.len(),
            min_score = range.min,
            max_score = range.max,
            "enumerating outfits"
        );

        let strict = self.enumerate(&tops, &bottoms, &outers, request.rules, Some(range));
        if !strict.suggestions.is_empty() {
            return Recommendation {
                suggestions: strict.suggestions,
                diagnostics: diagnostics.into_vec(),
            };
        }

        let relaxed = self.enumerate(&tops, &bottoms, &outers, request.rules, None);
        if !relaxed.suggestions.is_empty() {
            let scarcer = if bottoms.len() < tops.len() {
                SlotType::Bottom
            } else {
                SlotType::Top
            };
            tracing::debug!(
                mode = %mode,
                slot = %scarcer,
                count = relaxed.suggestions.len(),
                "score range relaxed"
            );
            diagnostics.push(Diagnostic::range_relaxed(mode, scarcer));
            return Recommendation {
                suggestions: relaxed.suggestions,
                diagnostics: diagnostics.into_vec(),
            };
        }

        if !relaxed.conflicts.is_empty() {
            diagnostics.push(Diagnostic::new(
                DiagnosticTag::ColorRuleExcluded,
                relaxed.conflicts.iter().map(|c| c.as_str().to_string()).collect(),
            ));
        }
        if let Some(wish) = wish {
            diagnostics.push(Diagnostic::new(
                DiagnosticTag::NoCombinationMatchesWish,
                vec![wish.label.clone()],
            ));
        }
        if diagnostics.is_empty() {
            diagnostics.push(Diagnostic::no_candidates(SlotType::Top, mode));
            diagnostics.push(Diagnostic::no_candidates(SlotType::Bottom, mode));
        }
        tracing::debug!(diagnostics = diagnostics.len(), "no outfit survived");
        Recommendation::empty(diagnostics)
    }

    /// Keep weather-suitable garments. Returns `false` (and keeps the list
    /// untouched) when nothing suits.
    fn retain_suitable(&self, garments: &mut Vec<&Garment>, forecast: TemperatureRange) -> bool {
        let suitable: Vec<&Garment> = garments
            .iter()
            .copied()
            .filter(|g| garment_suits(g, forecast, &self.config.suitability))
            .collect();
        if suitable.is_empty() {
            return false;
        }
        *garments = suitable;
        true
    }

    /// Weather-suitable outers (all outers if none suit), most formal first.
    fn outer_candidates<'g>(
        &self,
        mut outers: Vec<&'g Garment>,
        forecast: Option<TemperatureRange>,
    ) -> Vec<&'g Garment> {
        if let Some(forecast) = forecast {
            self.retain_suitable(&mut outers, forecast);
        }
        let mut ranked = scored(&outers);
        ranked.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.garment.name.cmp(&b.garment.name))
        });
        ranked.into_iter().map(|s| s.garment).collect()
    }

    fn enumerate(
        &self,
        tops: &[Scored<'_>],
        bottoms: &[Scored<'_>],
        outers: &[&Garment],
        rules: ColorRules,
        range: Option<ScoreRange>,
    ) -> Enumeration {
        let mut suggestions = Vec::new();
        let mut conflicts = BTreeSet::new();

        for top in tops {
            for bottom in bottoms {
                let score = top.score + bottom.score;
                if range.is_some_and(|r| !r.contains(score)) {
                    continue;
                }
                if let Some(conflict) =
                    color_conflict(top.garment.color_group, bottom.garment.color_group, rules)
                {
                    conflicts.insert(conflict);
                    continue;
                }
                let outer = if outers.is_empty() {
                    None
                } else {
                    Some(outers[suggestions.len() % outers.len()].clone())
                };
                suggestions.push(OutfitSuggestion {
                    top: top.garment.clone(),
                    bottom: bottom.garment.clone(),
                    outer,
                    score,
                });
            }
        }

        suggestions.sort_by(compare_suggestions);
        suggestions.truncate(self.config.max_suggestions);
        Enumeration {
            suggestions,
            conflicts,
        }
    }
}

fn partition(inventory: &[Garment], slot: SlotType) -> Vec<&Garment> {
    inventory.iter().filter(|g| g.slot_type == slot).collect()
}

/// Score descending, then top, bottom and outer name ascending.
pub fn compare_suggestions(a: &OutfitSuggestion, b: &OutfitSuggestion) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.top.name.cmp(&b.top.name))
        .then_with(|| a.bottom.name.cmp(&b.bottom.name))
        .then_with(|| a.outer_name().cmp(b.outer_name()))
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;
    use wardrobe_test_utils::generators::{arb_forecast, arb_inventory, arb_style_mode};

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_never_more_than_cap(
            inventory in arb_inventory(24),
            mode in arb_style_mode(),
            vivid in any::<bool>(),
            navy in any::<bool>(),
            forecast in proptest::option::of(arb_forecast()),
        ) {
            let engine = SuggestionEngine::new(WardrobeConfig::default()).unwrap();
            let mut request = SuggestionRequest::new(&inventory, mode)
                .with_rules(ColorRules::new(vivid, navy));
            request.forecast = forecast;
            let result = engine.suggest(&request);
            prop_assert!(result.suggestions.len() <= 20);
        }

        #[test]
        fn prop_sorted_by_score_then_names(
            inventory in arb_inventory(16),
            mode in arb_style_mode(),
        ) {
            let engine = SuggestionEngine::new(WardrobeConfig::default()).unwrap();
            let result = engine.suggest(&SuggestionRequest::new(&inventory, mode));
            for pair in result.suggestions.windows(2) {
                prop_assert_ne!(compare_suggestions(&pair[0], &pair[1]), Ordering::Greater);
            }
        }

        #[test]
        fn prop_idempotent(
            inventory in arb_inventory(16),
            mode in arb_style_mode(),
            forecast in proptest::option::of(arb_forecast()),
        ) {
            let engine = SuggestionEngine::new(WardrobeConfig::default()).unwrap();
            let mut request = SuggestionRequest::new(&inventory, mode);
            request.forecast = forecast;
            prop_assert_eq!(engine.suggest(&request), engine.suggest(&request));
        }

        #[test]
        fn prop_empty_result_always_explained(
            inventory in arb_inventory(8),
            mode in arb_style_mode(),
        ) {
            let engine = SuggestionEngine::new(WardrobeConfig::default()).unwrap();
            let result = engine.suggest(&SuggestionRequest::new(&inventory, mode));
            if result.is_empty() {
                prop_assert!(!result.diagnostics.is_empty());
            }
        }
    }
}
