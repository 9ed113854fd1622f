//! Column transforms turning a `PropertyRecord` into a numeric feature row.
//!
//! A `FeatureEncoder` is the fitted preprocessing stage exported with each
//! pipeline model: an ordered list of per-column transforms whose outputs are
//! concatenated.

use serde::{Deserialize, Serialize};

use crate::domain::{FieldKind, PropertyField, PropertyRecord};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "transform", rename_all = "snake_case")]
pub enum ColumnTransform {
    /// `(x - mean) / scale`
    Scale {
        field: PropertyField,
        mean: f64,
        scale: f64,
    },
    /// Raw numeric value
    Passthrough { field: PropertyField },
    /// One indicator per known category, all zeros for unknown values
    OneHot {
        field: PropertyField,
        categories: Vec<String>,
    },
}

impl ColumnTransform {
    pub fn field(&self) -> PropertyField {
        match self {
            ColumnTransform::Scale { field, .. }
            | ColumnTransform::Passthrough { field }
            | ColumnTransform::OneHot { field, .. } => *field,
        }
    }

    pub fn width(&self) -> usize {
        match self {
            ColumnTransform::Scale { .. } | ColumnTransform::Passthrough { .. } => 1,
            ColumnTransform::OneHot { categories, .. } => categories.len(),
        }
    }

    fn validate(&self) -> std::result::Result<(), String> {
        let field = self.field();
        match self {
            ColumnTransform::Scale { mean, scale, .. } => {
                if field.kind() != FieldKind::Numeric {
                    return Err(format!("cannot scale categorical field {field}"));
                }
                if !mean.is_finite() || !scale.is_finite() || *scale < 0.0 {
                    return Err(format!("{field} mean/scale must be finite, scale >= 0"));
                }
            }
            ColumnTransform::Passthrough { .. } => {
                if field.kind() != FieldKind::Numeric {
                    return Err(format!("cannot pass through categorical field {field}"));
                }
            }
            ColumnTransform::OneHot { categories, .. } => {
                if field.kind() != FieldKind::Categorical {
                    return Err(format!("cannot one-hot encode numeric field {field}"));
                }
                if categories.is_empty() {
                    return Err(format!("{field} has no categories"));
                }
            }
        }
        Ok(())
    }

    fn transform_into(&self, record: &PropertyRecord, out: &mut Vec<f64>) {
        match self {
            ColumnTransform::Scale { field, mean, scale } => {
                let x = record.numeric(*field).unwrap_or_default();
                // Zero-variance columns are left unscaled.
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                out.push((x - mean) / scale);
            }
            ColumnTransform::Passthrough { field } => {
                out.push(record.numeric(*field).unwrap_or_default());
            }
            ColumnTransform::OneHot { field, categories } => {
                let value = record.categorical(*field).unwrap_or_default();
                out.extend(
                    categories
                        .iter()
                        .map(|c| if c == value { 1.0 } else { 0.0 }),
                );
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureEncoder {
    pub columns: Vec<ColumnTransform>,
}

impl FeatureEncoder {
    pub fn new(columns: Vec<ColumnTransform>) -> Self {
        Self { columns }
    }

    /// Fit a standard scaler and a one-hot encoder on a single record.
    ///
    /// A one-row fit has zero variance, so every scaled numeric comes out as
    /// `0.0`, and every categorical field encodes to the single indicator
    /// `[1.0]`.
    pub fn fit_single(
        record: &PropertyRecord,
        numeric: &[PropertyField],
        categorical: &[PropertyField],
    ) -> Self {
        let scaled = numeric.iter().map(|&field| ColumnTransform::Scale {
            field,
            mean: record.numeric(field).unwrap_or_default(),
            scale: 0.0,
        });
        let encoded = categorical.iter().map(|&field| ColumnTransform::OneHot {
            field,
            categories: vec![record.categorical(field).unwrap_or_default().to_string()],
        });
        Self::new(scaled.chain(encoded).collect())
    }

    pub fn width(&self) -> usize {
        self.columns.iter().map(ColumnTransform::width).sum()
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.columns.is_empty() {
            return Err("encoder has no columns".to_string());
        }
        for (idx, column) in self.columns.iter().enumerate() {
            column
                .validate()
                .map_err(|e| format!("column[{idx}]: {e}"))?;
        }
        Ok(())
    }

    pub fn transform(&self, record: &PropertyRecord) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.width());
        for column in &self.columns {
            column.transform_into(record, &mut out);
        }
        out
    }
}
