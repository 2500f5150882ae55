//! Mock forward pass feeding the data-flow animation.
//!
//! Values are random and only meant to look plausible: each layer gets one
//! magnitude in [0, 1] per displayed neuron.

use rand::Rng;
use serde::Serialize;

use nnviz_model::{Activation, Layer, LayerId, LayerParams};

use crate::activation::ActivationFn;

/// Most neurons drawn per layer.
pub const MAX_DISPLAY_NEURONS: usize = 16;

/// Width used when a layer has no natural width of its own.
const FALLBACK_NEURONS: usize = 8;

/// Activations of one layer, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerActivations {
    pub layer_id: LayerId,
    pub values: Vec<f64>,
}

/// Number of neurons drawn for `layer`, given the width drawn for its
/// predecessor.
pub fn display_neurons(layer: &Layer, previous: usize) -> usize {
    let natural = match &layer.params {
        LayerParams::Input(p) => p
            .shape
            .iter()
            .fold(1usize, |acc, &dim| acc.saturating_mul(dim as usize)),
        LayerParams::Dense(p) => p.units as usize,
        LayerParams::Output(p) => p.units as usize,
        LayerParams::Lstm(p) | LayerParams::Gru(p) => p.units as usize,
        LayerParams::Conv2d(p) => p.filters as usize,
        LayerParams::Embedding(p) => p.output_dim as usize,
        LayerParams::Attention(p) => p.num_heads as usize,
        _ => previous,
    };
    natural.clamp(1, MAX_DISPLAY_NEURONS)
}

fn layer_activation(params: &LayerParams) -> Activation {
    match params {
        LayerParams::Dense(p) => p.activation,
        LayerParams::Conv2d(p) => p.activation,
        LayerParams::Output(p) => p.activation,
        LayerParams::Lstm(_) | LayerParams::Gru(_) => Activation::Tanh,
        _ => Activation::Linear,
    }
}

/// Squashes an activation output into [0, 1] for display.
fn magnitude(value: f64) -> f64 {
    value.abs().min(1.0)
}

/// Runs the mock forward pass over `layers`.
pub fn mock_forward<R: Rng + ?Sized>(layers: &[Layer], rng: &mut R) -> Vec<LayerActivations> {
    let mut previous = FALLBACK_NEURONS;
    let mut out = Vec::with_capacity(layers.len());
    for layer in layers {
        let width = display_neurons(layer, previous);
        let raw: Vec<f64> = (0..width).map(|_| rng.random_range(-1.0..=1.0)).collect();
        let mut values: Vec<f64> = layer_activation(&layer.params)
            .apply(&raw)
            .into_iter()
            .map(magnitude)
            .collect();
        if let LayerParams::Dropout(p) = &layer.params {
            for value in &mut values {
                if rng.random::<f64>() < p.rate {
                    *value = 0.0;
                }
            }
        }
        out.push(LayerActivations {
            layer_id: layer.id.clone(),
            values,
        });
        previous = width;
    }
    tracing::trace!(layers = out.len(), "mock forward pass");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use nnviz_model::{LayerKind, ParamPatch};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn layer(kind: LayerKind, patch: ParamPatch) -> Layer {
        Layer::new(
            kind.as_str(),
            LayerParams::with_overrides(kind, &patch).unwrap(),
        )
    }

    #[test]
    fn widths_are_capped() {
        let input = layer(LayerKind::Input, ParamPatch::new());
        assert_eq!(display_neurons(&input, 1), MAX_DISPLAY_NEURONS);
        let dense = layer(LayerKind::Dense, ParamPatch::new().with("units", 3));
        assert_eq!(display_neurons(&dense, 16), 3);
    }

    #[test]
    fn pass_through_layers_inherit_width() {
        let flatten = layer(LayerKind::Flatten, ParamPatch::new());
        assert_eq!(display_neurons(&flatten, 5), 5);
    }

    #[test]
    fn seeded_pass_is_reproducible() {
        let layers = vec![
            layer(LayerKind::Input, ParamPatch::new().with("shape", 4)),
            layer(LayerKind::Dense, ParamPatch::new().with("units", 3)),
            layer(LayerKind::Dropout, ParamPatch::new().with("rate", 1.0)),
        ];
        let a = mock_forward(&layers, &mut StdRng::seed_from_u64(7));
        let b = mock_forward(&layers, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert_eq!(a[0].values.len(), 4);
        assert_eq!(a[1].values.len(), 3);
        assert!(a[2].values.iter().all(|v| *v == 0.0));
    }
}
