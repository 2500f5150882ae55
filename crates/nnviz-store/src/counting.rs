//! Parameter totals shown in the summary panel.
//!
//! This is the visualizer's simplified count, not Keras's: only dense and
//! conv2d layers contribute, and the running input width starts at a
//! flattened 28x28 image regardless of the actual input layer.

use nnviz_model::{Layer, LayerParams};

/// Input width assumed before the first counted layer.
pub const SEED_WIDTH: u64 = 784;

/// Parameters contributed by each layer, in order.
pub fn per_layer(layers: &[Layer]) -> Vec<u64> {
    let mut width = SEED_WIDTH;
    layers
        .iter()
        .map(|layer| match &layer.params {
            LayerParams::Dense(p) => {
                let units = u64::from(p.units);
                let count = width.saturating_mul(units).saturating_add(units);
                width = units;
                count
            }
            LayerParams::Conv2d(p) => {
                let k = u64::from(p.kernel_size);
                let filters = u64::from(p.filters);
                let count = k
                    .saturating_mul(k)
                    .saturating_mul(width)
                    .saturating_mul(filters)
                    .saturating_add(filters);
                width = filters;
                count
            }
            _ => 0,
        })
        .collect()
}

/// Sum of [`per_layer`].
pub fn total(layers: &[Layer]) -> u64 {
    per_layer(layers)
        .into_iter()
        .fold(0, u64::saturating_add)
}
