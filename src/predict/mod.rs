//! Thin wrapper around a trained classifier's inference call.
//!
//! Tokenizes input text, pads it to a fixed sequence length, runs one
//! prediction, and pairs every output class score with its label.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::error::Error;

mod sequence;
pub use sequence::pad_sequence;

/// Default number of token positions fed to the model.
pub const DEFAULT_MAX_SEQUENCE_LENGTH: usize = 280;
/// Minimum length for the input text.
const MIN_TEXT_LEN: usize = 5;

/// A trained classifier that scores one fixed-length token sequence.
///
/// Implementations wrap whatever model representation is in use; the trait
/// bound replaces any runtime check that a handle "looks like" a model.
pub trait Classifier {
    /// Score a single padded sequence, returning one value per output class.
    fn predict(&self, input: &[u32]) -> Result<Vec<f32>, String>;
}

/// Converts raw text into an integer token sequence per a fixed vocabulary.
pub trait Tokenizer {
    fn text_to_sequence(&self, text: &str) -> Vec<u32>;
}

/// Options for [`predict`].
#[derive(Debug, Clone, Copy)]
pub struct PredictOptions {
    /// Sequences are padded or truncated to exactly this many positions.
    pub max_sequence_length: usize,
}

impl Default for PredictOptions {
    fn default() -> Self {
        Self {
            max_sequence_length: DEFAULT_MAX_SEQUENCE_LENGTH,
        }
    }
}

/// One output class paired with its predicted probability.
///
/// Serializes as a single-entry map, e.g. `{"ham": 0.93}`.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledScore {
    pub label: String,
    pub probability: f32,
}

impl Serialize for LabeledScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.label, &self.probability)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for LabeledScore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScoreVisitor;

        impl<'de> Visitor<'de> for ScoreVisitor {
            type Value = LabeledScore;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a single-entry map of label to probability")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let Some((label, probability)) = map.next_entry::<String, f32>()? else {
                    return Err(de::Error::invalid_length(0, &self));
                };
                if map.next_key::<String>()?.is_some() {
                    return Err(de::Error::custom("expected exactly one label entry"));
                }
                Ok(LabeledScore { label, probability })
            }
        }

        deserializer.deserialize_map(ScoreVisitor)
    }
}

/// Run one prediction and label every output class score in index order.
///
/// Returns `Ok(None)` when no tokenizer is supplied; the text cannot be
/// vectorized without one, and that is a designed no-op rather than an
/// error. The result preserves the raw output vector's index order with no
/// sorting or top-k truncation.
pub fn predict(
    model: &dyn Classifier,
    text: &str,
    label_mapping: &BTreeMap<usize, String>,
    tokenizer: Option<&dyn Tokenizer>,
    options: &PredictOptions,
) -> Result<Option<Vec<LabeledScore>>, Error> {
    if text.chars().count() < MIN_TEXT_LEN {
        return Err(Error::Validation(format!(
            "'text' must be at least {MIN_TEXT_LEN} characters"
        )));
    }
    let Some(tokenizer) = tokenizer else {
        return Ok(None);
    };

    let tokens = tokenizer.text_to_sequence(text);
    let input = pad_sequence(&tokens, options.max_sequence_length);
    let scores = model.predict(&input).map_err(Error::Inference)?;

    let top_class = scores
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(idx, _)| idx);
    debug!(classes = scores.len(), ?top_class, "classifier output");

    let mut labeled = Vec::with_capacity(scores.len());
    for (index, &probability) in scores.iter().enumerate() {
        let label = label_mapping.get(&index).ok_or_else(|| {
            Error::Inference(format!("no label mapped for class index {index}"))
        })?;
        labeled.push(LabeledScore {
            label: label.clone(),
            probability,
        });
    }
    Ok(Some(labeled))
}
