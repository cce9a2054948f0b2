//! Lightness sweep: hold a color's hue and saturation fixed and report which
//! lightness values pass which WCAG tier against a background.

use log::debug;
use serde::Serialize;

use crate::color::{Hsl, hex_to_hsl, hsl_to_hex};
use crate::contrast::{contrast_ratio, format_ratio};
use crate::error::Result;
use crate::tier::{ComplianceTier, classify};

/// Lightness is sampled at `i / SWEEP_STEPS` for every `i` in `0..=SWEEP_STEPS`.
pub const SWEEP_STEPS: u32 = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepSample {
    pub hex: String,
    pub lightness: f64,
    pub ratio: f64,
    pub tier: ComplianceTier,
    /// Same 24-bit color as the evaluated foreground.
    pub is_current: bool,
    /// Same 24-bit color as the background.
    pub is_background: bool,
}

/// A maximal run of samples sharing one tier. `start..=end` indexes into
/// [`SweepResult::samples`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Band {
    pub tier: ComplianceTier,
    pub first: String,
    pub last: String,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepResult {
    pub background: String,
    pub foreground: String,
    pub ratio: f64,
    pub ratio_text: String,
    pub tier: ComplianceTier,
    pub message: &'static str,
    pub bands: Vec<Band>,
    pub samples: Vec<SweepSample>,
    /// Color at the last AA / AA-large boundary crossed by the sweep.
    pub recommendation: Option<String>,
    /// `recommendation`, but only when the evaluated pair is below AA.
    pub suggestion: Option<String>,
}

/// Evaluates `foreground` on `background` and sweeps the foreground's lightness.
///
/// Both colors must parse as hex; any failure aborts the whole evaluation.
pub fn evaluate(background: &str, foreground: &str) -> Result<SweepResult> {
    let fg_hsl = hex_to_hsl(foreground)?;
    let bg_hsl = hex_to_hsl(background)?;
    let current_hex = hsl_to_hex(fg_hsl);
    let background_hex = hsl_to_hex(bg_hsl);

    let ratio = contrast_ratio(background, foreground)?;
    let tier = classify(ratio)?;

    let mut samples = sample_lightness(background, fg_hsl)?;
    for sample in samples.iter_mut() {
        sample.is_current = sample.hex == current_hex;
        sample.is_background = sample.hex == background_hex;
    }
    let bands = group_bands(&samples);
    let recommendation = find_recommendation(&samples);
    debug!(
        "swept {} on {}: {} samples in {} bands, recommendation {:?}",
        current_hex,
        background_hex,
        samples.len(),
        bands.len(),
        recommendation
    );

    let suggestion = recommendation.clone().filter(|_| tier.needs_suggestion());
    Ok(SweepResult {
        background: background_hex,
        foreground: current_hex,
        ratio,
        ratio_text: format_ratio(ratio),
        tier,
        message: tier.message(),
        bands,
        samples,
        recommendation,
        suggestion,
    })
}

/// Samples every lightness step of `color`'s hue and saturation, dropping any
/// sample whose hex equals the one emitted just before it.
pub fn sample_lightness(background: &str, color: Hsl) -> Result<Vec<SweepSample>> {
    let mut samples: Vec<SweepSample> = Vec::new();
    for i in 0..=SWEEP_STEPS {
        let lightness = i as f64 / SWEEP_STEPS as f64;
        let hex = hsl_to_hex(Hsl::new(color.h, color.s, lightness));
        if samples.last().is_some_and(|prev| prev.hex == hex) {
            continue;
        }
        let ratio = contrast_ratio(background, &hex)?;
        samples.push(SweepSample {
            hex,
            lightness,
            ratio,
            tier: classify(ratio)?,
            is_current: false,
            is_background: false,
        });
    }
    Ok(samples)
}

pub fn group_bands(samples: &[SweepSample]) -> Vec<Band> {
    let mut bands: Vec<Band> = Vec::new();
    for (i, sample) in samples.iter().enumerate() {
        match bands.last_mut() {
            Some(open) if open.tier == sample.tier => {
                open.last.clone_from(&sample.hex);
                open.end = i;
            }
            _ => bands.push(Band {
                tier: sample.tier,
                first: sample.hex.clone(),
                last: sample.hex.clone(),
                start: i,
                end: i,
            }),
        }
    }
    bands
}

/// Finds the color nearest the AA / AA-large boundary that still meets AA.
///
/// Only those two transitions count; a later crossing replaces an earlier one.
pub fn find_recommendation(samples: &[SweepSample]) -> Option<String> {
    samples
        .windows(2)
        .filter_map(|pair| match (pair[0].tier, pair[1].tier) {
            (ComplianceTier::AaLarge, ComplianceTier::Aa) => Some(&pair[1].hex),
            (ComplianceTier::Aa, ComplianceTier::AaLarge) => Some(&pair[0].hex),
            _ => None,
        })
        .last()
        .cloned()
}
