use crate::arg_utils::{extract_float, extract_uint, validate_arg_type, validate_num_arguments};
use crate::cell::common::{evaluate_index_arg, CellFunctionType};
use crate::cell::grid;
use crate::error::Error;
use crate::execution::{Expression, ExpressionType};
use hexgrid_types::types::Record;
use hexgrid_types::types::{Field, FieldType, Schema, SourceDefinition};

const NUMERIC_ARG_TYPES: &[FieldType] = &[FieldType::UInt, FieldType::Int, FieldType::Float];
pub(crate) const INDEX_ARG_TYPES: &[FieldType] =
    &[FieldType::String, FieldType::UInt, FieldType::Int];

pub(crate) fn validate_latlng_to_cell(
    args: &[Expression],
    schema: &Schema,
) -> Result<ExpressionType, Error> {
    validate_num_arguments(3..4, args.len(), CellFunctionType::LatLngToCell)?;
    for (argument_index, arg) in args.iter().enumerate() {
        validate_arg_type(
            arg,
            NUMERIC_ARG_TYPES.to_vec(),
            schema,
            CellFunctionType::LatLngToCell,
            argument_index,
        )?;
    }
    Ok(ExpressionType::new(
        FieldType::String,
        false,
        SourceDefinition::Dynamic,
        false,
    ))
}

/// Cell indices cross the expression layer as decimal strings: the scalar
/// integer domain is signed and the index space round-trips most safely as
/// text across serialization boundaries.
pub(crate) fn evaluate_latlng_to_cell(
    schema: &Schema,
    args: &[Expression],
    record: &Record,
) -> Result<Field, Error> {
    validate_num_arguments(3..4, args.len(), CellFunctionType::LatLngToCell)?;
    let f_lat = args[0].evaluate(record, schema)?;
    let f_lng = args[1].evaluate(record, schema)?;
    let f_res = args[2].evaluate(record, schema)?;

    if f_lat == Field::Null || f_lng == Field::Null || f_res == Field::Null {
        return Ok(Field::Null);
    }

    let lat = extract_float(f_lat, CellFunctionType::LatLngToCell, 0)?;
    let lng = extract_float(f_lng, CellFunctionType::LatLngToCell, 1)?;
    let resolution = extract_uint(f_res.clone(), CellFunctionType::LatLngToCell, 2)?;
    let resolution =
        u8::try_from(resolution).map_err(|_| Error::InvalidFunctionArgument {
            function_name: CellFunctionType::LatLngToCell.to_string(),
            argument_index: 2,
            argument: f_res,
        })?;

    let cell = grid::index_from_coordinate(lat, lng, resolution)?;
    Ok(Field::String(u64::from(cell).to_string()))
}

pub(crate) fn validate_cell_to_latlng(
    args: &[Expression],
    schema: &Schema,
) -> Result<ExpressionType, Error> {
    validate_num_arguments(1..2, args.len(), CellFunctionType::CellToLatLng)?;
    validate_arg_type(
        &args[0],
        INDEX_ARG_TYPES.to_vec(),
        schema,
        CellFunctionType::CellToLatLng,
        0,
    )?;
    Ok(ExpressionType::new(
        FieldType::String,
        true,
        SourceDefinition::Dynamic,
        false,
    ))
}

/// Coordinates serialize with 6 decimal digits, the fixed format used by
/// every coordinate-producing function in this catalog.
pub(crate) fn evaluate_cell_to_latlng(
    schema: &Schema,
    args: &[Expression],
    record: &Record,
) -> Result<Field, Error> {
    validate_num_arguments(1..2, args.len(), CellFunctionType::CellToLatLng)?;
    let Some(cell) = evaluate_index_arg(schema, &args[0], record)? else {
        return Ok(Field::Null);
    };

    let (lat, lng) = grid::coordinate_from_index(cell);
    Ok(Field::String(format!(
        "{{\"lat\":{lat:.6},\"lon\":{lng:.6}}}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexgrid_types::serde_json;
    use Expression::Literal;

    #[test]
    fn test_latlng_to_cell_round_trip() {
        let row = Record::new(vec![]);
        let schema = Schema::default();

        let args = vec![
            Literal(Field::Float(37.7749.into())),
            Literal(Field::Float((-122.4194).into())),
            Literal(Field::Int(9)),
        ];
        let index = evaluate_latlng_to_cell(&schema, &args, &row).unwrap();
        let Field::String(index_text) = &index else {
            panic!("expected a string index, got {index:?}");
        };
        index_text.parse::<u64>().unwrap();

        let result = evaluate_cell_to_latlng(&schema, &[Literal(index)], &row).unwrap();
        let Field::String(json) = result else {
            panic!("expected a JSON string");
        };
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let lat = value["lat"].as_f64().unwrap();
        let lng = value["lon"].as_f64().unwrap();
        assert!((lat - 37.7749).abs() < 0.01);
        assert!((lng + 122.4194).abs() < 0.01);
    }

    #[test]
    fn test_latlng_to_cell_coerces_numeric_strings() {
        let row = Record::new(vec![]);
        let schema = Schema::default();

        let args = vec![
            Literal(Field::String("37.7749".to_string())),
            Literal(Field::Float((-122.4194).into())),
            Literal(Field::String("9".to_string())),
        ];
        assert!(matches!(
            evaluate_latlng_to_cell(&schema, &args, &row),
            Ok(Field::String(_))
        ));
    }

    #[test]
    fn test_latlng_to_cell_malformed_numeric_is_an_error() {
        let row = Record::new(vec![]);
        let schema = Schema::default();

        let args = vec![
            Literal(Field::String("north".to_string())),
            Literal(Field::Float((-122.4194).into())),
            Literal(Field::Int(9)),
        ];
        assert!(matches!(
            evaluate_latlng_to_cell(&schema, &args, &row),
            Err(Error::InvalidFunctionArgument { .. })
        ));
    }

    #[test]
    fn test_latlng_to_cell_null_propagation() {
        let row = Record::new(vec![]);
        let schema = Schema::default();

        let args = vec![
            Literal(Field::Null),
            Literal(Field::Float((-122.4194).into())),
            Literal(Field::Int(9)),
        ];
        assert_eq!(
            evaluate_latlng_to_cell(&schema, &args, &row).unwrap(),
            Field::Null
        );
    }

    #[test]
    fn test_latlng_to_cell_arity() {
        let schema = Schema::default();
        let row = Record::new(vec![]);
        let args = vec![
            Literal(Field::Float(37.7749.into())),
            Literal(Field::Float((-122.4194).into())),
        ];

        let result = validate_latlng_to_cell(&args, &schema);
        assert!(matches!(
            result,
            Err(Error::InvalidNumberOfArguments { .. })
        ));

        let result = evaluate_latlng_to_cell(&schema, &args, &row);
        assert!(matches!(
            result,
            Err(Error::InvalidNumberOfArguments { .. })
        ));
    }

    #[test]
    fn test_latlng_to_cell_rejects_boolean_argument_type() {
        let schema = Schema::default();
        let args = vec![
            Literal(Field::Boolean(true)),
            Literal(Field::Float((-122.4194).into())),
            Literal(Field::Int(9)),
        ];
        assert!(matches!(
            validate_latlng_to_cell(&args, &schema),
            Err(Error::InvalidFunctionArgumentType { .. })
        ));
    }

    #[test]
    fn test_cell_to_latlng_unparsable_index_is_null() {
        let row = Record::new(vec![]);
        let schema = Schema::default();

        for bad in ["garbage", "12.5", ""] {
            let args = vec![Literal(Field::String(bad.to_string()))];
            assert_eq!(
                evaluate_cell_to_latlng(&schema, &args, &row).unwrap(),
                Field::Null
            );
        }

        let args = vec![Literal(Field::Null)];
        assert_eq!(
            evaluate_cell_to_latlng(&schema, &args, &row).unwrap(),
            Field::Null
        );
    }

    #[test]
    fn test_cell_to_latlng_out_of_range_index_is_null() {
        let row = Record::new(vec![]);
        let schema = Schema::default();

        // Parses as i64 but is not a valid cell.
        let args = vec![Literal(Field::String("123".to_string()))];
        assert_eq!(
            evaluate_cell_to_latlng(&schema, &args, &row).unwrap(),
            Field::Null
        );
    }
}
