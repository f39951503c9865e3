//! Facade over the `h3o` hexagonal-grid library. Everything here is pure:
//! `h3o` carries no process-wide handle, so there is no initialization
//! lifecycle to manage.

use h3o::{CellIndex, LatLng, Resolution};

use crate::error::Error;

/// Parses the decimal-string form of a cell index. `None` covers both text
/// that is not a 64-bit decimal integer and integers that are not valid
/// cells.
pub(crate) fn parse_index(text: &str) -> Option<CellIndex> {
    let raw = text.parse::<i64>().ok()?;
    CellIndex::try_from(raw as u64).ok()
}

pub(crate) fn index_from_coordinate(
    lat: f64,
    lng: f64,
    resolution: u8,
) -> Result<CellIndex, Error> {
    let coord = LatLng::new(lat, lng)?;
    let resolution = Resolution::try_from(resolution)?;
    Ok(coord.to_cell(resolution))
}

/// Cell-center coordinate, in degrees, as `(lat, lng)`.
pub(crate) fn coordinate_from_index(cell: CellIndex) -> (f64, f64) {
    let center = LatLng::from(cell);
    (center.lat(), center.lng())
}

/// Vertices of the cell boundary as `(lat, lng)` degree pairs, in the order
/// the library walks them. The first vertex is not repeated at the end.
pub(crate) fn boundary_from_index(cell: CellIndex) -> Vec<(f64, f64)> {
    cell.boundary()
        .iter()
        .map(|vertex| (vertex.lat(), vertex.lng()))
        .collect()
}

/// Cells at grid distance exactly `k`. `k = 0` yields the input cell alone.
pub(crate) fn ring_at(cell: CellIndex, k: u32) -> Vec<CellIndex> {
    let fast: Option<Vec<CellIndex>> = cell.grid_ring_fast(k).collect();
    match fast {
        Some(cells) => cells,
        // Pentagon distortion breaks the fast ring walk; fall back to the
        // full disk and keep the outermost layer.
        None => cell
            .grid_disk_distances::<Vec<_>>(k)
            .into_iter()
            .filter(|(_, distance)| *distance == k)
            .map(|(cell, _)| cell)
            .collect(),
    }
}

pub(crate) fn grid_distance(from: CellIndex, to: CellIndex) -> Result<i64, Error> {
    from.grid_distance(to)
        .map(i64::from)
        .map_err(|source| Error::GridDistanceUndefined {
            from: from.into(),
            to: to.into(),
            source,
        })
}
