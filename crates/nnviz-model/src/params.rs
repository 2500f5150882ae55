//! Layer parameters.
//!
//! Parameters are held as [`LayerParams`], a tagged union with one strongly
//! typed variant per [`LayerKind`]. Generic parameter-editing forms talk in
//! [`ParamPatch`] maps instead; a patch is applied as a shallow merge (keys
//! present replace fields, everything else survives) and is validated as a
//! whole before anything is written.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::enums::{Activation, LayerKind, Padding};
use crate::error::{ModelError, Result};

// =============================================================================
// GENERIC VALUES (UI BOUNDARY)
// =============================================================================

/// A loosely typed parameter value as produced by an editing form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Flag(bool),
    Number(f64),
    Numbers(Vec<f64>),
    Text(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Numbers(ns) => {
                let parts: Vec<String> = ns.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            Self::Text(s) => write!(f, "'{s}'"),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<f32> for ParamValue {
    fn from(value: f32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Activation> for ParamValue {
    fn from(value: Activation) -> Self {
        Self::Text(value.as_str().to_string())
    }
}

impl From<Padding> for ParamValue {
    fn from(value: Padding) -> Self {
        Self::Text(value.as_str().to_string())
    }
}

impl From<Vec<u32>> for ParamValue {
    fn from(value: Vec<u32>) -> Self {
        Self::Numbers(value.into_iter().map(f64::from).collect())
    }
}

/// Partial parameter map keyed by parameter name.
///
/// Keys are accepted in snake_case or camelCase (`kernel_size` / `kernelSize`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, ParamValue>",
    into = "BTreeMap<String, ParamValue>"
)]
pub struct ParamPatch(BTreeMap<String, ParamValue>);

impl ParamPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(normalize_key(&key.into()), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(&normalize_key(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl From<BTreeMap<String, ParamValue>> for ParamPatch {
    fn from(map: BTreeMap<String, ParamValue>) -> Self {
        map.into_iter().collect()
    }
}

impl From<ParamPatch> for BTreeMap<String, ParamValue> {
    fn from(patch: ParamPatch) -> Self {
        patch.0
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for ParamPatch {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut patch = Self::new();
        for (k, v) in iter {
            patch.insert(k, v);
        }
        patch
    }
}

/// camelCase → snake_case.
fn normalize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, ch) in key.trim().chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

// =============================================================================
// VALUE EXTRACTION
// =============================================================================

fn type_error(key: &str, expected: &'static str, found: &ParamValue) -> ModelError {
    ModelError::ParamType {
        key: key.to_string(),
        expected,
        found: found.to_string(),
    }
}

fn positive_int(key: &str, value: &ParamValue) -> Result<u32> {
    match value {
        ParamValue::Number(n) if n.fract() == 0.0 && *n >= 1.0 && *n <= f64::from(u32::MAX) => {
            Ok(*n as u32)
        }
        other => Err(type_error(key, "a positive integer", other)),
    }
}

fn unit_interval(key: &str, value: &ParamValue) -> Result<f64> {
    match value {
        ParamValue::Number(n) if (0.0..=1.0).contains(n) => Ok(*n),
        other => Err(type_error(key, "a number between 0 and 1", other)),
    }
}

fn positive_number(key: &str, value: &ParamValue) -> Result<f64> {
    match value {
        ParamValue::Number(n) if *n > 0.0 && n.is_finite() => Ok(*n),
        other => Err(type_error(key, "a positive number", other)),
    }
}

fn flag(key: &str, value: &ParamValue) -> Result<bool> {
    match value {
        ParamValue::Flag(b) => Ok(*b),
        other => Err(type_error(key, "true or false", other)),
    }
}

fn activation(key: &str, value: &ParamValue) -> Result<Activation> {
    match value {
        ParamValue::Text(s) => s
            .parse()
            .map_err(|_| type_error(key, "an activation name", value)),
        other => Err(type_error(key, "an activation name", other)),
    }
}

fn padding(key: &str, value: &ParamValue) -> Result<Padding> {
    match value {
        ParamValue::Text(s) => s
            .parse()
            .map_err(|_| type_error(key, "'valid' or 'same'", value)),
        other => Err(type_error(key, "'valid' or 'same'", other)),
    }
}

fn shape(key: &str, value: &ParamValue) -> Result<Vec<u32>> {
    match value {
        ParamValue::Number(_) => Ok(vec![positive_int(key, value)?]),
        ParamValue::Numbers(ns) if !ns.is_empty() => ns
            .iter()
            .map(|n| positive_int(key, &ParamValue::Number(*n)))
            .collect::<Result<Vec<_>>>()
            .map_err(|_| type_error(key, "a list of positive integers", value)),
        other => Err(type_error(key, "a list of positive integers", other)),
    }
}

// =============================================================================
// PER-KIND PARAMETERS
// =============================================================================

/// Input layer: the shape of one sample, without the batch dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputParams {
    pub shape: Vec<u32>,
}

impl Default for InputParams {
    fn default() -> Self {
        Self { shape: vec![784] }
    }
}

impl InputParams {
    fn set(&mut self, key: &str, value: &ParamValue) -> Result<bool> {
        match key {
            "shape" => self.shape = shape(key, value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseParams {
    pub units: u32,
    pub activation: Activation,
    pub use_bias: bool,
}

impl Default for DenseParams {
    fn default() -> Self {
        Self {
            units: 64,
            activation: Activation::Relu,
            use_bias: true,
        }
    }
}

impl DenseParams {
    fn set(&mut self, key: &str, value: &ParamValue) -> Result<bool> {
        match key {
            "units" => self.units = positive_int(key, value)?,
            "activation" => self.activation = activation(key, value)?,
            "use_bias" => self.use_bias = flag(key, value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conv2dParams {
    pub filters: u32,
    pub kernel_size: u32,
    pub strides: u32,
    pub padding: Padding,
    pub activation: Activation,
}

impl Default for Conv2dParams {
    fn default() -> Self {
        Self {
            filters: 32,
            kernel_size: 3,
            strides: 1,
            padding: Padding::Valid,
            activation: Activation::Relu,
        }
    }
}

impl Conv2dParams {
    fn set(&mut self, key: &str, value: &ParamValue) -> Result<bool> {
        match key {
            "filters" => self.filters = positive_int(key, value)?,
            "kernel_size" => self.kernel_size = positive_int(key, value)?,
            "strides" => self.strides = positive_int(key, value)?,
            "padding" => self.padding = padding(key, value)?,
            "activation" => self.activation = activation(key, value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Shared by max and average pooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolParams {
    pub pool_size: u32,
    pub strides: u32,
    pub padding: Padding,
}

impl Default for PoolParams {
    fn default() -> Self {
        Self {
            pool_size: 2,
            strides: 2,
            padding: Padding::Valid,
        }
    }
}

impl PoolParams {
    fn set(&mut self, key: &str, value: &ParamValue) -> Result<bool> {
        match key {
            "pool_size" => self.pool_size = positive_int(key, value)?,
            "strides" => self.strides = positive_int(key, value)?,
            "padding" => self.padding = padding(key, value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropoutParams {
    pub rate: f64,
}

impl Default for DropoutParams {
    fn default() -> Self {
        Self { rate: 0.5 }
    }
}

impl DropoutParams {
    fn set(&mut self, key: &str, value: &ParamValue) -> Result<bool> {
        match key {
            "rate" => self.rate = unit_interval(key, value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchNormParams {
    pub momentum: f64,
    pub epsilon: f64,
}

impl Default for BatchNormParams {
    fn default() -> Self {
        Self {
            momentum: 0.99,
            epsilon: 0.001,
        }
    }
}

impl BatchNormParams {
    fn set(&mut self, key: &str, value: &ParamValue) -> Result<bool> {
        match key {
            "momentum" => self.momentum = unit_interval(key, value)?,
            "epsilon" => self.epsilon = positive_number(key, value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Shared by LSTM and GRU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurrentParams {
    pub units: u32,
    pub return_sequences: bool,
    pub dropout: f64,
}

impl Default for RecurrentParams {
    fn default() -> Self {
        Self {
            units: 64,
            return_sequences: false,
            dropout: 0.0,
        }
    }
}

impl RecurrentParams {
    fn set(&mut self, key: &str, value: &ParamValue) -> Result<bool> {
        match key {
            "units" => self.units = positive_int(key, value)?,
            "return_sequences" => self.return_sequences = flag(key, value)?,
            "dropout" => self.dropout = unit_interval(key, value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingParams {
    pub input_dim: u32,
    pub output_dim: u32,
}

impl Default for EmbeddingParams {
    fn default() -> Self {
        Self {
            input_dim: 10_000,
            output_dim: 128,
        }
    }
}

impl EmbeddingParams {
    fn set(&mut self, key: &str, value: &ParamValue) -> Result<bool> {
        match key {
            "input_dim" => self.input_dim = positive_int(key, value)?,
            "output_dim" => self.output_dim = positive_int(key, value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttentionParams {
    pub num_heads: u32,
    pub key_dim: u32,
    pub dropout: f64,
}

impl Default for AttentionParams {
    fn default() -> Self {
        Self {
            num_heads: 8,
            key_dim: 64,
            dropout: 0.0,
        }
    }
}

impl AttentionParams {
    fn set(&mut self, key: &str, value: &ParamValue) -> Result<bool> {
        match key {
            "num_heads" => self.num_heads = positive_int(key, value)?,
            "key_dim" => self.key_dim = positive_int(key, value)?,
            "dropout" => self.dropout = unit_interval(key, value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputParams {
    pub units: u32,
    pub activation: Activation,
}

impl Default for OutputParams {
    fn default() -> Self {
        Self {
            units: 10,
            activation: Activation::Softmax,
        }
    }
}

impl OutputParams {
    fn set(&mut self, key: &str, value: &ParamValue) -> Result<bool> {
        match key {
            "units" => self.units = positive_int(key, value)?,
            "activation" => self.activation = activation(key, value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

// =============================================================================
// TAGGED UNION
// =============================================================================

/// Parameters of one layer, one variant per [`LayerKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LayerParams {
    Input(InputParams),
    Dense(DenseParams),
    Conv2d(Conv2dParams),
    MaxPool2d(PoolParams),
    AvgPool2d(PoolParams),
    Flatten,
    Dropout(DropoutParams),
    BatchNorm(BatchNormParams),
    Lstm(RecurrentParams),
    Gru(RecurrentParams),
    Embedding(EmbeddingParams),
    Attention(AttentionParams),
    Output(OutputParams),
}

impl LayerParams {
    /// Default parameters for a kind.
    pub fn default_for(kind: LayerKind) -> Self {
        match kind {
            LayerKind::Input => Self::Input(InputParams::default()),
            LayerKind::Dense => Self::Dense(DenseParams::default()),
            LayerKind::Conv2d => Self::Conv2d(Conv2dParams::default()),
            LayerKind::MaxPool2d => Self::MaxPool2d(PoolParams::default()),
            LayerKind::AvgPool2d => Self::AvgPool2d(PoolParams::default()),
            LayerKind::Flatten => Self::Flatten,
            LayerKind::Dropout => Self::Dropout(DropoutParams::default()),
            LayerKind::BatchNorm => Self::BatchNorm(BatchNormParams::default()),
            LayerKind::Lstm => Self::Lstm(RecurrentParams::default()),
            LayerKind::Gru => Self::Gru(RecurrentParams::default()),
            LayerKind::Embedding => Self::Embedding(EmbeddingParams::default()),
            LayerKind::Attention => Self::Attention(AttentionParams::default()),
            LayerKind::Output => Self::Output(OutputParams::default()),
        }
    }

    /// Defaults for `kind` with `overrides` merged on top.
    pub fn with_overrides(kind: LayerKind, overrides: &ParamPatch) -> Result<Self> {
        let mut params = Self::default_for(kind);
        params.apply(overrides)?;
        Ok(params)
    }

    pub fn kind(&self) -> LayerKind {
        match self {
            Self::Input(_) => LayerKind::Input,
            Self::Dense(_) => LayerKind::Dense,
            Self::Conv2d(_) => LayerKind::Conv2d,
            Self::MaxPool2d(_) => LayerKind::MaxPool2d,
            Self::AvgPool2d(_) => LayerKind::AvgPool2d,
            Self::Flatten => LayerKind::Flatten,
            Self::Dropout(_) => LayerKind::Dropout,
            Self::BatchNorm(_) => LayerKind::BatchNorm,
            Self::Lstm(_) => LayerKind::Lstm,
            Self::Gru(_) => LayerKind::Gru,
            Self::Embedding(_) => LayerKind::Embedding,
            Self::Attention(_) => LayerKind::Attention,
            Self::Output(_) => LayerKind::Output,
        }
    }

    /// Width of the layer for kinds that declare `units`.
    pub fn units(&self) -> Option<u32> {
        match self {
            Self::Dense(p) => Some(p.units),
            Self::Lstm(p) | Self::Gru(p) => Some(p.units),
            Self::Output(p) => Some(p.units),
            _ => None,
        }
    }

    /// Shallow-merges `patch` into these parameters.
    ///
    /// The whole patch is validated first; on error `self` is left untouched.
    pub fn apply(&mut self, patch: &ParamPatch) -> Result<()> {
        let kind = self.kind();
        let mut candidate = self.clone();
        for (key, value) in patch.iter() {
            let known = match &mut candidate {
                Self::Input(p) => p.set(key, value)?,
                Self::Dense(p) => p.set(key, value)?,
                Self::Conv2d(p) => p.set(key, value)?,
                Self::MaxPool2d(p) | Self::AvgPool2d(p) => p.set(key, value)?,
                Self::Flatten => false,
                Self::Dropout(p) => p.set(key, value)?,
                Self::BatchNorm(p) => p.set(key, value)?,
                Self::Lstm(p) | Self::Gru(p) => p.set(key, value)?,
                Self::Embedding(p) => p.set(key, value)?,
                Self::Attention(p) => p.set(key, value)?,
                Self::Output(p) => p.set(key, value)?,
            };
            if !known {
                return Err(ModelError::UnknownParam {
                    kind,
                    key: key.to_string(),
                });
            }
        }
        *self = candidate;
        Ok(())
    }

    /// Renders the parameters as a generic map for editing forms.
    pub fn to_patch(&self) -> ParamPatch {
        let patch = ParamPatch::new();
        match self {
            Self::Input(p) => patch.with("shape", p.shape.clone()),
            Self::Dense(p) => patch
                .with("units", p.units)
                .with("activation", p.activation)
                .with("use_bias", p.use_bias),
            Self::Conv2d(p) => patch
                .with("filters", p.filters)
                .with("kernel_size", p.kernel_size)
                .with("strides", p.strides)
                .with("padding", p.padding)
                .with("activation", p.activation),
            Self::MaxPool2d(p) | Self::AvgPool2d(p) => patch
                .with("pool_size", p.pool_size)
                .with("strides", p.strides)
                .with("padding", p.padding),
            Self::Flatten => patch,
            Self::Dropout(p) => patch.with("rate", p.rate),
            Self::BatchNorm(p) => patch
                .with("momentum", p.momentum)
                .with("epsilon", p.epsilon),
            Self::Lstm(p) | Self::Gru(p) => patch
                .with("units", p.units)
                .with("return_sequences", p.return_sequences)
                .with("dropout", p.dropout),
            Self::Embedding(p) => patch
                .with("input_dim", p.input_dim)
                .with("output_dim", p.output_dim),
            Self::Attention(p) => patch
                .with("num_heads", p.num_heads)
                .with("key_dim", p.key_dim)
                .with("dropout", p.dropout),
            Self::Output(p) => patch
                .with("units", p.units)
                .with("activation", p.activation),
        }
    }
}
