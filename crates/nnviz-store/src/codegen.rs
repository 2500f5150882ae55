//! Keras program generation.
//!
//! The output is a pure function of the layer list and the config. It is
//! meant for copy-paste and never parsed back.

use std::fmt::Write as _;

use nnviz_model::{Layer, LayerParams, NetworkConfig, Optimizer, Padding, PoolParams};

/// Momentum used when the config picks the momentum optimizer.
const SGD_MOMENTUM: f64 = 0.9;

fn py_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

fn py_tuple(values: &[u32]) -> String {
    match values {
        [single] => format!("({single},)"),
        _ => {
            let parts: Vec<String> = values.iter().map(ToString::to_string).collect();
            format!("({})", parts.join(", "))
        }
    }
}

fn pool_call(name: &str, p: &PoolParams) -> String {
    let mut call = format!(
        "layers.{name}(pool_size=({0}, {0}), strides=({1}, {1})",
        p.pool_size, p.strides
    );
    if p.padding == Padding::Same {
        call.push_str(", padding='same'");
    }
    call.push(')');
    call
}

/// One entry of the `Sequential` list, without indentation or trailing comma.
///
/// Kinds without a `Sequential` counterpart come back as a comment.
pub fn layer_line(layer: &Layer) -> String {
    match &layer.params {
        LayerParams::Input(p) => format!("layers.Input(shape={})", py_tuple(&p.shape)),
        LayerParams::Dense(p) => {
            let mut call = format!("layers.Dense({}, activation='{}'", p.units, p.activation);
            if !p.use_bias {
                let _ = write!(call, ", use_bias={}", py_bool(p.use_bias));
            }
            call.push(')');
            call
        }
        LayerParams::Conv2d(p) => format!(
            "layers.Conv2D({}, ({k}, {k}), strides=({s}, {s}), padding='{}', activation='{}')",
            p.filters,
            p.padding,
            p.activation,
            k = p.kernel_size,
            s = p.strides,
        ),
        LayerParams::MaxPool2d(p) => pool_call("MaxPooling2D", p),
        LayerParams::AvgPool2d(p) => pool_call("AveragePooling2D", p),
        LayerParams::Flatten => "layers.Flatten()".to_string(),
        LayerParams::Dropout(p) => format!("layers.Dropout({})", p.rate),
        LayerParams::BatchNorm(p) => format!(
            "layers.BatchNormalization(momentum={}, epsilon={})",
            p.momentum, p.epsilon
        ),
        LayerParams::Lstm(p) | LayerParams::Gru(p) => {
            let name = if matches!(layer.params, LayerParams::Lstm(_)) {
                "LSTM"
            } else {
                "GRU"
            };
            let mut call = format!("layers.{name}({}", p.units);
            if p.return_sequences {
                let _ = write!(call, ", return_sequences={}", py_bool(p.return_sequences));
            }
            if p.dropout > 0.0 {
                let _ = write!(call, ", dropout={}", p.dropout);
            }
            call.push(')');
            call
        }
        LayerParams::Embedding(p) => {
            format!("layers.Embedding({}, {})", p.input_dim, p.output_dim)
        }
        LayerParams::Attention(p) => format!(
            "# MultiHeadAttention(num_heads={}, key_dim={}) needs the functional API",
            p.num_heads, p.key_dim
        ),
        LayerParams::Output(p) => {
            format!("layers.Dense({}, activation='{}')", p.units, p.activation)
        }
    }
}

fn optimizer_call(config: &NetworkConfig) -> String {
    let lr = config.learning_rate;
    match config.optimizer {
        Optimizer::Adam => format!("keras.optimizers.Adam(learning_rate={lr})"),
        Optimizer::Sgd => format!("keras.optimizers.SGD(learning_rate={lr})"),
        Optimizer::Momentum => {
            format!("keras.optimizers.SGD(learning_rate={lr}, momentum={SGD_MOMENTUM})")
        }
    }
}

/// Renders the full Keras program for `layers` and `config`.
pub fn generate(layers: &[Layer], config: &NetworkConfig) -> String {
    let mut out = String::new();
    out.push_str("import tensorflow as tf\n");
    out.push_str("from tensorflow import keras\n");
    out.push_str("from tensorflow.keras import layers\n");
    out.push('\n');
    out.push_str("model = keras.Sequential([\n");
    for layer in layers {
        let line = layer_line(layer);
        if line.starts_with('#') {
            let _ = writeln!(out, "    {line}");
        } else {
            let _ = writeln!(out, "    {line},");
        }
    }
    out.push_str("])\n");
    out.push('\n');
    out.push_str("model.compile(\n");
    let _ = writeln!(out, "    optimizer={},", optimizer_call(config));
    let _ = writeln!(out, "    loss='{}',", config.loss_function);
    out.push_str("    metrics=['accuracy'],\n");
    out.push_str(")\n");
    out.push('\n');
    out.push_str("model.summary()\n");
    out.push('\n');
    out.push_str("history = model.fit(\n");
    out.push_str("    x_train, y_train,\n");
    let _ = writeln!(out, "    epochs={},", config.epochs);
    let _ = writeln!(out, "    batch_size={},", config.batch_size);
    out.push_str("    validation_split=0.2,\n");
    out.push_str(")\n");
    out
}
