use crate::arg_utils::{validate_arg_type, validate_num_arguments};
use crate::cell::common::{evaluate_index_arg, CellFunctionType};
use crate::cell::encode::INDEX_ARG_TYPES;
use crate::cell::grid;
use crate::error::Error;
use crate::execution::{Expression, ExpressionType};
use hexgrid_types::types::Record;
use hexgrid_types::types::{Field, FieldType, Schema, SourceDefinition};

pub(crate) fn validate_is_valid_cell(
    args: &[Expression],
    schema: &Schema,
) -> Result<ExpressionType, Error> {
    validate_num_arguments(1..2, args.len(), CellFunctionType::IsValidCell)?;
    validate_arg_type(
        &args[0],
        INDEX_ARG_TYPES.to_vec(),
        schema,
        CellFunctionType::IsValidCell,
        0,
    )?;
    Ok(ExpressionType::new(
        FieldType::Int,
        false,
        SourceDefinition::Dynamic,
        false,
    ))
}

/// Unlike the other index-taking functions, a row that fails to parse
/// degrades to `0`, not to null: unparsable text and a parsed-but-invalid
/// index both collapse to "not a valid cell".
pub(crate) fn evaluate_is_valid_cell(
    schema: &Schema,
    args: &[Expression],
    record: &Record,
) -> Result<Field, Error> {
    validate_num_arguments(1..2, args.len(), CellFunctionType::IsValidCell)?;
    let valid = evaluate_index_arg(schema, &args[0], record)?.is_some();
    Ok(Field::Int(i64::from(valid)))
}

pub(crate) fn validate_cell_to_boundary(
    args: &[Expression],
    schema: &Schema,
) -> Result<ExpressionType, Error> {
    validate_num_arguments(1..2, args.len(), CellFunctionType::CellToBoundary)?;
    validate_arg_type(
        &args[0],
        INDEX_ARG_TYPES.to_vec(),
        schema,
        CellFunctionType::CellToBoundary,
        0,
    )?;
    Ok(ExpressionType::new(
        FieldType::String,
        true,
        SourceDefinition::Dynamic,
        false,
    ))
}

/// GeoJSON-style polygon text. Vertices are `[lng,lat]` pairs with 6 decimal
/// digits, in the order the grid library walks the boundary.
pub(crate) fn evaluate_cell_to_boundary(
    schema: &Schema,
    args: &[Expression],
    record: &Record,
) -> Result<Field, Error> {
    validate_num_arguments(1..2, args.len(), CellFunctionType::CellToBoundary)?;
    let Some(cell) = evaluate_index_arg(schema, &args[0], record)? else {
        return Ok(Field::Null);
    };

    let vertices = grid::boundary_from_index(cell)
        .into_iter()
        .map(|(lat, lng)| format!("[{lng:.6},{lat:.6}]"))
        .collect::<Vec<String>>()
        .join(",");
    Ok(Field::String(format!(
        "{{\"type\":\"Polygon\",\"coordinates\":[{vertices}]}}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::encode::evaluate_latlng_to_cell;
    use hexgrid_types::serde_json;
    use proptest::prelude::*;
    use Expression::Literal;

    fn sample_index() -> Field {
        let args = vec![
            Literal(Field::Float(37.7749.into())),
            Literal(Field::Float((-122.4194).into())),
            Literal(Field::Int(9)),
        ];
        evaluate_latlng_to_cell(&Schema::default(), &args, &Record::new(vec![])).unwrap()
    }

    #[test]
    fn test_is_valid_cell() {
        let row = Record::new(vec![]);
        let schema = Schema::default();

        let args = vec![Literal(sample_index())];
        assert_eq!(
            evaluate_is_valid_cell(&schema, &args, &row).unwrap(),
            Field::Int(1)
        );

        for bad in ["not-a-number", "123", ""] {
            let args = vec![Literal(Field::String(bad.to_string()))];
            assert_eq!(
                evaluate_is_valid_cell(&schema, &args, &row).unwrap(),
                Field::Int(0)
            );
        }

        let args = vec![Literal(Field::Null)];
        assert_eq!(
            evaluate_is_valid_cell(&schema, &args, &row).unwrap(),
            Field::Int(0)
        );
    }

    #[test]
    fn test_every_produced_index_is_valid() {
        proptest!(
            ProptestConfig::with_cases(200),
            move |(lat in -89.0f64..89.0, lng in -179.0f64..179.0, res in 0u8..15)| {
                let row = Record::new(vec![]);
                let schema = Schema::default();

                let args = vec![
                    Literal(Field::Float(lat.into())),
                    Literal(Field::Float(lng.into())),
                    Literal(Field::UInt(res as u64)),
                ];
                let index = evaluate_latlng_to_cell(&schema, &args, &row).unwrap();
                prop_assert_eq!(
                    evaluate_is_valid_cell(&schema, &[Literal(index)], &row).unwrap(),
                    Field::Int(1)
                );
        });
    }

    #[test]
    fn test_cell_to_boundary_is_a_polygon() {
        let row = Record::new(vec![]);
        let schema = Schema::default();

        let args = vec![Literal(sample_index())];
        let result = evaluate_cell_to_boundary(&schema, &args, &row).unwrap();
        let Field::String(json) = result else {
            panic!("expected a JSON string");
        };

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "Polygon");
        let coordinates = value["coordinates"].as_array().unwrap();
        assert!(coordinates.len() >= 5);
        for vertex in coordinates {
            let pair = vertex.as_array().unwrap();
            assert_eq!(pair.len(), 2);
            let lng = pair[0].as_f64().unwrap();
            let lat = pair[1].as_f64().unwrap();
            assert!((-180.0..=180.0).contains(&lng));
            assert!((-90.0..=90.0).contains(&lat));
        }
    }

    #[test]
    fn test_cell_to_boundary_unparsable_index_is_null() {
        let row = Record::new(vec![]);
        let schema = Schema::default();

        let args = vec![Literal(Field::String("garbage".to_string()))];
        assert_eq!(
            evaluate_cell_to_boundary(&schema, &args, &row).unwrap(),
            Field::Null
        );
    }
}
