use crate::cell::Cell;
use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject};
use rayon::prelude::*;
use serde_json::Value;

/// Trait for converting collections of [`Cell`]s to GeoJSON.
///
/// Implemented for `[Cell]` and `Vec<Cell>`.
pub trait CellsToGeoJson {
    /// One polygon feature per cell, keyed by token.
    fn to_feature_collection(&self) -> FeatureCollection;
    /// The feature collection serialised as a GeoJSON string.
    fn to_geojson_string(&self) -> String {
        GeoJson::FeatureCollection(self.to_feature_collection()).to_string()
    }
}

impl CellsToGeoJson for [Cell] {
    fn to_feature_collection(&self) -> FeatureCollection {
        let features = self.par_iter().map(cell_feature).collect();
        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}

impl CellsToGeoJson for Vec<Cell> {
    fn to_feature_collection(&self) -> FeatureCollection {
        self.as_slice().to_feature_collection()
    }
}

fn cell_feature(cell: &Cell) -> Feature {
    let center = cell.center();
    let bounds = cell.bounds();
    let mut properties = JsonObject::new();
    properties.insert("token".to_string(), Value::from(cell.token()));
    properties.insert("level".to_string(), Value::from(cell.level()));
    properties.insert("min_lat".to_string(), Value::from(bounds.min_lat));
    properties.insert("max_lat".to_string(), Value::from(bounds.max_lat));
    properties.insert("min_lon".to_string(), Value::from(bounds.min_lon));
    properties.insert("max_lon".to_string(), Value::from(bounds.max_lon));
    properties.insert("center_lat".to_string(), Value::from(center.latitude));
    properties.insert("center_lon".to_string(), Value::from(center.longitude));

    Feature {
        bbox: None,
        geometry: Some(Geometry::from(&cell.to_polygon())),
        id: Some(Id::String(cell.token().to_string())),
        properties: Some(properties),
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::S2CoverError;

    fn sample_cells() -> Result<Vec<Cell>, S2CoverError> {
        Cell::from_location(&(-0.1278, 51.5074), 9)?.children()
    }

    #[test]
    fn test_feature_collection() -> Result<(), S2CoverError> {
        let cells = sample_cells()?;
        let collection = cells.to_feature_collection();

        assert_eq!(collection.features.len(), 4);
        for (feature, cell) in collection.features.iter().zip(&cells) {
            assert_eq!(feature.id, Some(Id::String(cell.token().to_string())));
            let props = feature.properties.as_ref().unwrap();
            assert_eq!(props["token"], Value::from(cell.token()));
            assert_eq!(props["level"], Value::from(10));
            assert!(matches!(
                feature.geometry.as_ref().map(|g| &g.value),
                Some(geojson::Value::Polygon(_))
            ));
        }
        Ok(())
    }

    #[test]
    fn test_geojson_string_parses_back() -> Result<(), S2CoverError> {
        let cells = sample_cells()?;
        let text = cells.to_geojson_string();
        let parsed: GeoJson = text.parse().unwrap();
        match parsed {
            GeoJson::FeatureCollection(fc) => assert_eq!(fc.features.len(), cells.len()),
            other => panic!("expected a feature collection, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_empty_slice() {
        let cells: Vec<Cell> = Vec::new();
        assert!(cells.to_feature_collection().features.is_empty());
    }
}
