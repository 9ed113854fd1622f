//! Feature rows for the k-means model.
//!
//! Layout: scaled `Rooms`, `Propertycount`, `Distance`, then one-hot
//! `Suburb`, `Type`, `Regionname`, then zero padding up to the width the
//! clustering model was trained with. Rows already at or above that width are
//! left untouched; the model rejects them.

use crate::domain::{PropertyField, PropertyRecord};
use crate::ml::encoding::FeatureEncoder;

pub const CLUSTERING_NUMERIC_FIELDS: [PropertyField; 3] = [
    PropertyField::Rooms,
    PropertyField::Propertycount,
    PropertyField::Distance,
];

pub const CLUSTERING_CATEGORICAL_FIELDS: [PropertyField; 3] = [
    PropertyField::Suburb,
    PropertyField::Type,
    PropertyField::Regionname,
];

/// Where the scaler and encoder statistics come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitSource {
    /// Training-time statistics shipped with the k-means artifact
    Trained,
    /// Scaler and encoder fit on the request row itself
    SingleRow,
}

#[derive(Debug, Clone, Copy)]
pub struct ClusteringFeatureBuilder<'a> {
    width: usize,
    trained: Option<&'a FeatureEncoder>,
}

impl<'a> ClusteringFeatureBuilder<'a> {
    pub fn new(width: usize, trained: Option<&'a FeatureEncoder>) -> Self {
        Self { width, trained }
    }

    pub fn fit_source(&self) -> FitSource {
        if self.trained.is_some() {
            FitSource::Trained
        } else {
            FitSource::SingleRow
        }
    }

    pub fn build(&self, record: &PropertyRecord) -> Vec<f64> {
        let mut row = match self.trained {
            Some(encoder) => encoder.transform(record),
            None => FeatureEncoder::fit_single(
                record,
                &CLUSTERING_NUMERIC_FIELDS,
                &CLUSTERING_CATEGORICAL_FIELDS,
            )
            .transform(record),
        };

        if row.len() < self.width {
            row.resize(self.width, 0.0);
        }
        row
    }
}
