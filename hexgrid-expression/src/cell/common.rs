use crate::cell::encode::{
    evaluate_cell_to_latlng, evaluate_latlng_to_cell, validate_cell_to_latlng,
    validate_latlng_to_cell,
};
use crate::cell::grid;
use crate::cell::inspect::{
    evaluate_cell_to_boundary, evaluate_is_valid_cell, validate_cell_to_boundary,
    validate_is_valid_cell,
};
use crate::cell::traverse::{
    evaluate_grid_distance, evaluate_grid_ring, validate_grid_distance, validate_grid_ring,
};
use crate::error::Error;
use crate::execution::{Expression, ExpressionType};
use h3o::CellIndex;
use hexgrid_types::serde::{Deserialize, Serialize};
use hexgrid_types::types::Record;
use hexgrid_types::types::{Field, Schema};
use std::fmt::{Display, Formatter};

/// The closed set of cell-index functions. Identity is the wire name: it is
/// the key in the parser's macro table and the tag a persisted plan
/// round-trips through, so the two can never disagree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(crate = "hexgrid_types::serde")]
pub enum CellFunctionType {
    #[serde(rename = "h3_latlng_to_cell")]
    LatLngToCell,
    #[serde(rename = "h3_cell_to_latlng")]
    CellToLatLng,
    #[serde(rename = "h3_grid_ring")]
    GridRing,
    #[serde(rename = "h3_grid_distance")]
    GridDistance,
    #[serde(rename = "h3_is_valid_cell")]
    IsValidCell,
    #[serde(rename = "h3_cell_to_boundary")]
    CellToBoundary,
}

impl CellFunctionType {
    pub const ALL: [CellFunctionType; 6] = [
        CellFunctionType::LatLngToCell,
        CellFunctionType::CellToLatLng,
        CellFunctionType::GridRing,
        CellFunctionType::GridDistance,
        CellFunctionType::IsValidCell,
        CellFunctionType::CellToBoundary,
    ];
}

impl Display for CellFunctionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CellFunctionType::LatLngToCell => f.write_str("h3_latlng_to_cell"),
            CellFunctionType::CellToLatLng => f.write_str("h3_cell_to_latlng"),
            CellFunctionType::GridRing => f.write_str("h3_grid_ring"),
            CellFunctionType::GridDistance => f.write_str("h3_grid_distance"),
            CellFunctionType::IsValidCell => f.write_str("h3_is_valid_cell"),
            CellFunctionType::CellToBoundary => f.write_str("h3_cell_to_boundary"),
        }
    }
}

pub fn get_cell_function_type(
    function: &CellFunctionType,
    args: &[Expression],
    schema: &Schema,
) -> Result<ExpressionType, Error> {
    match function {
        CellFunctionType::LatLngToCell => validate_latlng_to_cell(args, schema),
        CellFunctionType::CellToLatLng => validate_cell_to_latlng(args, schema),
        CellFunctionType::GridRing => validate_grid_ring(args, schema),
        CellFunctionType::GridDistance => validate_grid_distance(args, schema),
        CellFunctionType::IsValidCell => validate_is_valid_cell(args, schema),
        CellFunctionType::CellToBoundary => validate_cell_to_boundary(args, schema),
    }
}

impl CellFunctionType {
    pub fn new(name: &str) -> Option<CellFunctionType> {
        match name {
            "h3_latlng_to_cell" => Some(CellFunctionType::LatLngToCell),
            "h3_cell_to_latlng" => Some(CellFunctionType::CellToLatLng),
            "h3_grid_ring" => Some(CellFunctionType::GridRing),
            "h3_grid_distance" => Some(CellFunctionType::GridDistance),
            "h3_is_valid_cell" => Some(CellFunctionType::IsValidCell),
            "h3_cell_to_boundary" => Some(CellFunctionType::CellToBoundary),
            _ => None,
        }
    }

    pub(crate) fn evaluate(
        &self,
        schema: &Schema,
        args: &[Expression],
        record: &Record,
    ) -> Result<Field, Error> {
        match self {
            CellFunctionType::LatLngToCell => evaluate_latlng_to_cell(schema, args, record),
            CellFunctionType::CellToLatLng => evaluate_cell_to_latlng(schema, args, record),
            CellFunctionType::GridRing => evaluate_grid_ring(schema, args, record),
            CellFunctionType::GridDistance => evaluate_grid_distance(schema, args, record),
            CellFunctionType::IsValidCell => evaluate_is_valid_cell(schema, args, record),
            CellFunctionType::CellToBoundary => evaluate_cell_to_boundary(schema, args, record),
        }
    }
}

/// Evaluates an index argument down to a parsed cell. `Ok(None)` is the
/// per-row degraded case: a null input, text that is not a decimal 64-bit
/// integer, or an integer that is not a valid cell.
pub(crate) fn evaluate_index_arg(
    schema: &Schema,
    arg: &Expression,
    record: &Record,
) -> Result<Option<CellIndex>, Error> {
    let field = arg.evaluate(record, schema)?;
    Ok(field.to_text().and_then(|text| grid::parse_index(&text)))
}
