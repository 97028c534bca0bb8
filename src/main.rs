use s2cover_rs::{
    Cell, CellsToGeoJson, CoveredCell, CoveringOptions, Geolocation, S2CoverError, cover_radius,
    decode_bounds, encode,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), S2CoverError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("s2cover_rs=info")),
        )
        .init();

    let lat = 53.48082746395233;
    let lon = -2.2479699500757597;

    let token = encode(lat, lon, 14)?;
    let bounds = decode_bounds(&token)?;
    println!("Token: {token}");
    println!(
        "Bounds: lat {:.6}..{:.6}, lon {:.6}..{:.6}",
        bounds.min_lat, bounds.max_lat, bounds.min_lon, bounds.max_lon
    );

    let cell = Cell::from_token(&token)?;
    println!("Parent: {}", cell.parent()?);
    println!("Neighbors: {}", cell.neighbors().join(", "));

    let center = Geolocation::new(lat, lon)?;
    let options = CoveringOptions::new(12).max_cells(10);
    let covering = cover_radius(&center, 3.0, &options)?;
    for covered in &covering {
        println!("{:>18} {:8.3} km", covered.token, covered.distance_km);
    }

    let cells: Vec<Cell> = covering
        .iter()
        .map(CoveredCell::cell)
        .collect::<Result<_, _>>()?;
    println!("{}", cells.to_geojson_string());

    Ok(())
}
