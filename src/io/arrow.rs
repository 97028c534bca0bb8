use crate::cell::Cell;
use crate::error::S2CoverError;
use arrow_array::{Float64Array, RecordBatch, StringArray, UInt8Array};
use arrow_schema::{DataType, Field, Schema};
use geoarrow_array::IntoArrow;
use geoarrow_array::array::{PointArray, PolygonArray};
use geoarrow_array::builder::{PointBuilder, PolygonBuilder};
use geoarrow_schema::{Crs, Dimension, Metadata, PointType, PolygonType};
use rayon::prelude::*;
use std::sync::Arc;

fn wgs84_metadata() -> Arc<Metadata> {
    let crs = Crs::from_authority_code("EPSG:4326".to_string());
    Arc::new(Metadata::new(crs, None))
}

/// Trait for converting collections of [`Cell`]s to Arrow arrays.
///
/// Implemented for `[Cell]` and `Vec<Cell>`. Geometries are in (lon, lat)
/// order and tagged as EPSG:4326.
pub trait CellsToArrow {
    /// Converts cell centers to an Arrow PointArray.
    fn to_arrow_points(&self) -> PointArray;
    /// Converts cell bounds to an Arrow PolygonArray of rectangles.
    fn to_arrow_polygons(&self) -> PolygonArray;
    /// Converts cells to a RecordBatch with token, level, bounds, center and geometry.
    fn to_record_batch(&self) -> Result<RecordBatch, S2CoverError>;
}

impl CellsToArrow for [Cell] {
    fn to_arrow_points(&self) -> PointArray {
        let point = PointType::new(Dimension::XY, wgs84_metadata());
        let mut builder = PointBuilder::with_capacity(point, self.len());

        for cell in self {
            builder.push_point(Some(&cell.center().to_point()));
        }
        builder.finish()
    }

    fn to_arrow_polygons(&self) -> PolygonArray {
        let poly = PolygonType::new(Dimension::XY, wgs84_metadata());
        let polygons: Vec<_> = self.par_iter().map(|c: &Cell| c.to_polygon()).collect();
        PolygonBuilder::from_polygons(&polygons, poly).finish()
    }

    fn to_record_batch(&self) -> Result<RecordBatch, S2CoverError> {
        let polygon_array = self.to_arrow_polygons();
        let centers: Vec<_> = self.iter().map(Cell::center).collect();

        let tokens: StringArray = self.iter().map(|c| Some(c.token())).collect();
        let levels: UInt8Array = self.iter().map(|c| Some(c.level())).collect();
        let min_lats: Float64Array = self.iter().map(|c| Some(c.bounds().min_lat)).collect();
        let max_lats: Float64Array = self.iter().map(|c| Some(c.bounds().max_lat)).collect();
        let min_lons: Float64Array = self.iter().map(|c| Some(c.bounds().min_lon)).collect();
        let max_lons: Float64Array = self.iter().map(|c| Some(c.bounds().max_lon)).collect();
        let center_lats: Float64Array = centers.iter().map(|p| Some(p.latitude)).collect();
        let center_lons: Float64Array = centers.iter().map(|p| Some(p.longitude)).collect();

        let geometry_field = polygon_array.extension_type().to_field("geometry", false);
        let schema = Schema::new(vec![
            Field::new("token", DataType::Utf8, false),
            Field::new("level", DataType::UInt8, false),
            Field::new("min_lat", DataType::Float64, false),
            Field::new("max_lat", DataType::Float64, false),
            Field::new("min_lon", DataType::Float64, false),
            Field::new("max_lon", DataType::Float64, false),
            Field::new("center_lat", DataType::Float64, false),
            Field::new("center_lon", DataType::Float64, false),
            geometry_field,
        ]);

        RecordBatch::try_new(
            Arc::new(schema),
            vec![
                Arc::new(tokens),
                Arc::new(levels),
                Arc::new(min_lats),
                Arc::new(max_lats),
                Arc::new(min_lons),
                Arc::new(max_lons),
                Arc::new(center_lats),
                Arc::new(center_lons),
                Arc::new(polygon_array.into_arrow()),
            ],
        )
        .map_err(|e| S2CoverError::Export(e.to_string()))
    }
}

impl CellsToArrow for Vec<Cell> {
    fn to_arrow_points(&self) -> PointArray {
        self.as_slice().to_arrow_points()
    }

    fn to_arrow_polygons(&self) -> PolygonArray {
        self.as_slice().to_arrow_polygons()
    }

    fn to_record_batch(&self) -> Result<RecordBatch, S2CoverError> {
        self.as_slice().to_record_batch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow_array::Array;
    use geoarrow_array::GeoArrowArray;

    fn sample_cells() -> Result<Vec<Cell>, S2CoverError> {
        Ok(vec![
            Cell::from_location(&(-74.0060, 40.7128), 12)?,
            Cell::from_location(&(-73.9857, 40.7484), 12)?,
            Cell::from_location(&(-73.9680, 40.7851), 12)?,
        ])
    }

    #[test]
    fn test_cells_to_arrow_points() -> Result<(), S2CoverError> {
        let point_array = sample_cells()?.to_arrow_points();
        assert_eq!(point_array.len(), 3);
        Ok(())
    }

    #[test]
    fn test_cells_to_arrow_polygons() -> Result<(), S2CoverError> {
        let cells = sample_cells()?;
        let polygon_array = cells.as_slice().to_arrow_polygons();
        assert_eq!(polygon_array.len(), 3);
        Ok(())
    }

    #[test]
    fn test_record_batch() -> Result<(), S2CoverError> {
        let cells = sample_cells()?;
        let batch = cells.to_record_batch()?;

        assert_eq!(batch.num_rows(), 3);
        assert_eq!(batch.num_columns(), 9);

        let schema = batch.schema();
        assert_eq!(schema.field(0).name(), "token");
        assert_eq!(schema.field(8).name(), "geometry");

        let tokens = batch
            .column(0)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(tokens.value(0), cells[0].token());
        assert_eq!(batch.column(1).null_count(), 0);
        Ok(())
    }
}
