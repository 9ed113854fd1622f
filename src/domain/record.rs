use serde::{Deserialize, Serialize};

/// Column of a property record, spelled the way the JSON payload spells it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyField {
    Suburb,
    Rooms,
    Type,
    Propertycount,
    Distance,
    Regionname,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Numeric,
    Categorical,
}

impl PropertyField {
    pub const ALL: [PropertyField; 6] = [
        PropertyField::Suburb,
        PropertyField::Rooms,
        PropertyField::Type,
        PropertyField::Propertycount,
        PropertyField::Distance,
        PropertyField::Regionname,
    ];

    pub fn kind(&self) -> FieldKind {
        match self {
            PropertyField::Rooms | PropertyField::Propertycount | PropertyField::Distance => {
                FieldKind::Numeric
            }
            PropertyField::Suburb | PropertyField::Type | PropertyField::Regionname => {
                FieldKind::Categorical
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyField::Suburb => "Suburb",
            PropertyField::Rooms => "Rooms",
            PropertyField::Type => "Type",
            PropertyField::Propertycount => "Propertycount",
            PropertyField::Distance => "Distance",
            PropertyField::Regionname => "Regionname",
        }
    }
}

impl std::fmt::Display for PropertyField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One property observation submitted for prediction.
///
/// Counts (`Rooms`, `Propertycount`) are accepted as any JSON number since
/// they only ever feed floating point feature vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    #[serde(rename = "Suburb")]
    pub suburb: String,
    #[serde(rename = "Rooms")]
    pub rooms: f64,
    #[serde(rename = "Type")]
    pub property_type: String,
    #[serde(rename = "Propertycount")]
    pub property_count: f64,
    #[serde(rename = "Distance")]
    pub distance: f64,
    #[serde(rename = "Regionname")]
    pub region_name: String,
}

impl PropertyRecord {
    /// Value of a numeric field, `None` for categorical fields
    pub fn numeric(&self, field: PropertyField) -> Option<f64> {
        match field {
            PropertyField::Rooms => Some(self.rooms),
            PropertyField::Propertycount => Some(self.property_count),
            PropertyField::Distance => Some(self.distance),
            _ => None,
        }
    }

    /// Value of a categorical field, `None` for numeric fields
    pub fn categorical(&self, field: PropertyField) -> Option<&str> {
        match field {
            PropertyField::Suburb => Some(&self.suburb),
            PropertyField::Type => Some(&self.property_type),
            PropertyField::Regionname => Some(&self.region_name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_payload_keys() {
        let record: PropertyRecord = serde_json::from_value(json!({
            "Suburb": "Richmond",
            "Rooms": 3,
            "Type": "h",
            "Propertycount": 5000,
            "Distance": 2.5,
            "Regionname": "Northern Metropolitan"
        }))
        .unwrap();

        assert_eq!(record.suburb, "Richmond");
        assert_eq!(record.rooms, 3.0);
        assert_eq!(record.numeric(PropertyField::Distance), Some(2.5));
        assert_eq!(
            record.categorical(PropertyField::Regionname),
            Some("Northern Metropolitan")
        );
        assert_eq!(record.categorical(PropertyField::Rooms), None);
    }

    #[test]
    fn missing_key_is_rejected() {
        let err = serde_json::from_value::<PropertyRecord>(json!({
            "Rooms": 3,
            "Type": "h",
            "Propertycount": 5000,
            "Distance": 2.5,
            "Regionname": "Northern Metropolitan"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("Suburb"));
    }

    #[test]
    fn field_kinds_partition_columns() {
        let numeric = PropertyField::ALL
            .iter()
            .filter(|f| f.kind() == FieldKind::Numeric)
            .count();
        assert_eq!(numeric, 3);
        assert_eq!(PropertyField::Propertycount.to_string(), "Propertycount");
    }
}
