use crate::arg_utils::{extract_uint, validate_arg_type, validate_num_arguments};
use crate::cell::common::{evaluate_index_arg, CellFunctionType};
use crate::cell::encode::INDEX_ARG_TYPES;
use crate::cell::grid;
use crate::error::Error;
use crate::execution::{Expression, ExpressionType};
use hexgrid_types::types::Record;
use hexgrid_types::types::{Field, FieldType, Schema, SourceDefinition};

const K_ARG_TYPES: &[FieldType] = &[FieldType::UInt, FieldType::Int];

pub(crate) fn validate_grid_ring(
    args: &[Expression],
    schema: &Schema,
) -> Result<ExpressionType, Error> {
    validate_num_arguments(2..3, args.len(), CellFunctionType::GridRing)?;
    validate_arg_type(
        &args[0],
        INDEX_ARG_TYPES.to_vec(),
        schema,
        CellFunctionType::GridRing,
        0,
    )?;
    validate_arg_type(
        &args[1],
        K_ARG_TYPES.to_vec(),
        schema,
        CellFunctionType::GridRing,
        1,
    )?;
    Ok(ExpressionType::new(
        FieldType::String,
        true,
        SourceDefinition::Dynamic,
        false,
    ))
}

/// Cells at grid distance exactly `k`, comma-joined — the ring, not the
/// filled disk.
pub(crate) fn evaluate_grid_ring(
    schema: &Schema,
    args: &[Expression],
    record: &Record,
) -> Result<Field, Error> {
    validate_num_arguments(2..3, args.len(), CellFunctionType::GridRing)?;
    let Some(cell) = evaluate_index_arg(schema, &args[0], record)? else {
        return Ok(Field::Null);
    };

    let f_k = args[1].evaluate(record, schema)?;
    if f_k == Field::Null {
        return Ok(Field::Null);
    }
    let k = extract_uint(f_k.clone(), CellFunctionType::GridRing, 1)?;
    let k = u32::try_from(k).map_err(|_| Error::InvalidFunctionArgument {
        function_name: CellFunctionType::GridRing.to_string(),
        argument_index: 1,
        argument: f_k,
    })?;

    let ring = grid::ring_at(cell, k)
        .into_iter()
        .map(|cell| u64::from(cell).to_string())
        .collect::<Vec<String>>()
        .join(",");
    Ok(Field::String(ring))
}

pub(crate) fn validate_grid_distance(
    args: &[Expression],
    schema: &Schema,
) -> Result<ExpressionType, Error> {
    validate_num_arguments(2..3, args.len(), CellFunctionType::GridDistance)?;
    for (argument_index, arg) in args.iter().enumerate() {
        validate_arg_type(
            arg,
            INDEX_ARG_TYPES.to_vec(),
            schema,
            CellFunctionType::GridDistance,
            argument_index,
        )?;
    }
    Ok(ExpressionType::new(
        FieldType::Int,
        true,
        SourceDefinition::Dynamic,
        false,
    ))
}

pub(crate) fn evaluate_grid_distance(
    schema: &Schema,
    args: &[Expression],
    record: &Record,
) -> Result<Field, Error> {
    validate_num_arguments(2..3, args.len(), CellFunctionType::GridDistance)?;
    let Some(from) = evaluate_index_arg(schema, &args[0], record)? else {
        return Ok(Field::Null);
    };
    let Some(to) = evaluate_index_arg(schema, &args[1], record)? else {
        return Ok(Field::Null);
    };

    Ok(Field::Int(grid::grid_distance(from, to)?))
}
