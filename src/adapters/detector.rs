//! Cat detector adapters.
//!
//! - [`FakeDetector`] answers from a fixed value or a (optionally seeded)
//!   random source.  Used for demos and tests.
//! - [`LabelDetector`] fronts a fallible [`VisionClient`] and absorbs every
//!   failure into "no cat", which is what makes
//!   [`CatDetector`] total.

use std::sync::{Mutex, PoisonError};

use log::{debug, error, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::app::ports::{CatDetector, VisionClient};
use crate::config::DetectorConfig;
use crate::image::Image;

// ───────────────────────────────────────────────────────────────
// FakeDetector
// ───────────────────────────────────────────────────────────────

enum Mode {
    Fixed(bool),
    Random(Mutex<StdRng>),
}

pub struct FakeDetector {
    mode: Mode,
    last_threshold: Mutex<Option<f32>>,
}

impl FakeDetector {
    /// Always answers `cat_present`.
    pub fn fixed(cat_present: bool) -> Self {
        Self::with_mode(Mode::Fixed(cat_present))
    }

    /// Coin-flip answers from a reproducible sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::with_mode(Mode::Random(Mutex::new(StdRng::seed_from_u64(seed))))
    }

    /// Coin-flip answers seeded from OS entropy.
    pub fn random() -> Self {
        Self::with_mode(Mode::Random(Mutex::new(StdRng::from_entropy())))
    }

    pub fn from_config(config: &DetectorConfig) -> Self {
        match *config {
            DetectorConfig::Fixed { cat_present } => Self::fixed(cat_present),
            DetectorConfig::Random { seed: Some(seed) } => Self::seeded(seed),
            DetectorConfig::Random { seed: None } => Self::random(),
        }
    }

    fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            last_threshold: Mutex::new(None),
        }
    }

    /// Threshold passed to the most recent call, if any.
    pub fn last_threshold(&self) -> Option<f32> {
        *self
            .last_threshold
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl CatDetector for FakeDetector {
    fn contains_cat(&self, _image: &Image, confidence_threshold: f32) -> bool {
        *self
            .last_threshold
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(confidence_threshold);

        match &self.mode {
            Mode::Fixed(answer) => *answer,
            Mode::Random(rng) => rng.lock().unwrap_or_else(PoisonError::into_inner).r#gen(),
        }
    }
}

impl core::fmt::Debug for FakeDetector {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mode = match self.mode {
            Mode::Fixed(true) => "fixed(cat)",
            Mode::Fixed(false) => "fixed(no cat)",
            Mode::Random(_) => "random",
        };
        f.debug_struct("FakeDetector").field("mode", &mode).finish()
    }
}

// ───────────────────────────────────────────────────────────────
// LabelDetector
// ───────────────────────────────────────────────────────────────

/// Label name that counts as a cat (compared case-insensitively).
pub const CAT_LABEL: &str = "cat";

/// [`CatDetector`] over a label-producing [`VisionClient`].
///
/// A frame contains a cat when any returned label is named [`CAT_LABEL`]
/// with confidence at or above the threshold.
#[derive(Debug)]
pub struct LabelDetector<C> {
    client: C,
}

impl<C: VisionClient> LabelDetector<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

impl<C: VisionClient> CatDetector for LabelDetector<C> {
    fn contains_cat(&self, image: &Image, confidence_threshold: f32) -> bool {
        if !(0.0..=100.0).contains(&confidence_threshold) {
            warn!("Confidence threshold {confidence_threshold} outside 0-100; reporting no cat");
            return false;
        }

        match self.client.detect_labels(image, confidence_threshold) {
            Ok(labels) => {
                debug!("Vision client returned {} labels", labels.len());
                labels.iter().any(|l| {
                    l.name.eq_ignore_ascii_case(CAT_LABEL) && l.confidence >= confidence_threshold
                })
            }
            Err(e) => {
                error!("Cat detection failed, reporting no cat: {e}");
                false
            }
        }
    }
}
