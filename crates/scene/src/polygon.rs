use std::collections::BTreeSet;

use formats::PolygonRecord;
use foundation::{ConnectorId, PolygonId};

#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub id: PolygonId,
    /// World units.
    pub floor_height: f64,
    pub ceiling_height: f64,
    /// Boundary elements shared with neighbouring polygons.
    pub connections: BTreeSet<ConnectorId>,
}

impl Polygon {
    pub fn new(
        id: impl Into<String>,
        floor_height: f64,
        ceiling_height: f64,
        connections: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            id: PolygonId::new(id),
            floor_height,
            ceiling_height,
            connections: connections
                .into_iter()
                .map(ConnectorId::new)
                .collect(),
        }
    }

    /// Unsized heights (`null` in the document) read as 0, the value the
    /// viewer has always compared them as.
    pub fn from_record(id: &str, record: &PolygonRecord) -> Self {
        Self::new(
            id,
            record.floor_height.unwrap_or_default(),
            record.ceiling_height.unwrap_or_default(),
            record.connections.iter().cloned(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Polygon;
    use formats::PolygonRecord;
    use foundation::ConnectorId;

    #[test]
    fn record_conversion_defaults_missing_heights() {
        let record = PolygonRecord {
            floor_height: None,
            ceiling_height: Some(0.5),
            connections: vec!["l1".to_string(), "l1".to_string(), "l2".to_string()],
        };
        let poly = Polygon::from_record("7", &record);
        assert_eq!(poly.id.as_str(), "7");
        assert_eq!(poly.floor_height, 0.0);
        assert_eq!(poly.ceiling_height, 0.5);
        assert_eq!(poly.connections.len(), 2);
        assert!(poly.connections.contains(&ConnectorId::new("l2")));
    }
}
