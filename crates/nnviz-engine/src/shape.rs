//! Output-shape inference, batch dimension omitted.

use nnviz_model::{Layer, LayerKind, LayerParams, Padding};

use crate::error::{EngineError, Result};

/// Shape of one sample flowing between layers.
pub type Shape = Vec<u32>;

fn spatial(kind: LayerKind, size: u32, window: u32, strides: u32, padding: Padding) -> Result<u32> {
    match padding {
        Padding::Same => Ok(size.div_ceil(strides)),
        Padding::Valid => {
            if window > size {
                return Err(EngineError::WindowTooLarge { kind, window, size });
            }
            Ok((size - window) / strides + 1)
        }
    }
}

fn require_rank(kind: LayerKind, input: &[u32], expected: usize) -> Result<()> {
    if input.len() == expected {
        Ok(())
    } else {
        Err(EngineError::Rank {
            kind,
            expected,
            shape: input.to_vec(),
        })
    }
}

fn replace_last(input: &[u32], units: u32) -> Shape {
    let mut out = input.to_vec();
    match out.last_mut() {
        Some(last) => *last = units,
        None => out.push(units),
    }
    out
}

/// Shape produced by a layer with `params` fed `input`.
pub fn output_shape(params: &LayerParams, input: &[u32]) -> Result<Shape> {
    let kind = params.kind();
    match params {
        LayerParams::Input(p) => Ok(p.shape.clone()),
        LayerParams::Dense(p) => Ok(replace_last(input, p.units)),
        LayerParams::Output(p) => Ok(replace_last(input, p.units)),
        LayerParams::Conv2d(p) => {
            require_rank(kind, input, 3)?;
            Ok(vec![
                spatial(kind, input[0], p.kernel_size, p.strides, p.padding)?,
                spatial(kind, input[1], p.kernel_size, p.strides, p.padding)?,
                p.filters,
            ])
        }
        LayerParams::MaxPool2d(p) | LayerParams::AvgPool2d(p) => {
            require_rank(kind, input, 3)?;
            Ok(vec![
                spatial(kind, input[0], p.pool_size, p.strides, p.padding)?,
                spatial(kind, input[1], p.pool_size, p.strides, p.padding)?,
                input[2],
            ])
        }
        LayerParams::Flatten => input
            .iter()
            .try_fold(1u32, |width, &dim| width.checked_mul(dim))
            .map(|width| vec![width])
            .ok_or_else(|| EngineError::ShapeOverflow {
                kind,
                shape: input.to_vec(),
            }),
        LayerParams::Lstm(p) | LayerParams::Gru(p) => {
            if p.return_sequences {
                Ok(replace_last(input, p.units))
            } else {
                Ok(vec![p.units])
            }
        }
        LayerParams::Embedding(p) => {
            let mut out = input.to_vec();
            out.push(p.output_dim);
            Ok(out)
        }
        LayerParams::Dropout(_) | LayerParams::BatchNorm(_) | LayerParams::Attention(_) => {
            Ok(input.to_vec())
        }
    }
}

/// Output shape of every layer in order.
///
/// The first layer must be an input layer; an empty network has no shapes.
pub fn infer_shapes(layers: &[Layer]) -> Result<Vec<Shape>> {
    let Some(first) = layers.first() else {
        return Ok(Vec::new());
    };
    if first.kind() != LayerKind::Input {
        return Err(EngineError::MissingInput(first.kind()));
    }
    let mut shapes: Vec<Shape> = Vec::with_capacity(layers.len());
    let mut current: Shape = Vec::new();
    for layer in layers {
        current = output_shape(&layer.params, &current)?;
        shapes.push(current.clone());
    }
    Ok(shapes)
}

/// Renders a shape the way Keras summaries do: `(None, 28, 28, 1)`.
pub fn format_shape(shape: &[u32]) -> String {
    let dims: Vec<String> = shape.iter().map(ToString::to_string).collect();
    if dims.is_empty() {
        "(None,)".to_string()
    } else {
        format!("(None, {})", dims.join(", "))
    }
}
