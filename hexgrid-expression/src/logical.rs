use hexgrid_types::types::Record;
use hexgrid_types::types::{Field, Schema};

use crate::error::Error;
use crate::execution::Expression;

pub fn evaluate_and(
    schema: &Schema,
    left: &Expression,
    right: &Expression,
    record: &Record,
) -> Result<Field, Error> {
    let l_field = left.evaluate(record, schema)?;
    let r_field = right.evaluate(record, schema)?;
    match l_field {
        Field::Boolean(l) => match r_field {
            Field::Boolean(r) => Ok(Field::Boolean(l && r)),
            Field::Null => Ok(Field::Boolean(false)),
            Field::UInt(_) | Field::Int(_) | Field::Float(_) | Field::String(_) => {
                Err(Error::InvalidType(r_field, "AND".to_string()))
            }
        },
        Field::Null => Ok(Field::Boolean(false)),
        Field::UInt(_) | Field::Int(_) | Field::Float(_) | Field::String(_) => {
            Err(Error::InvalidType(l_field, "AND".to_string()))
        }
    }
}

pub fn evaluate_or(
    schema: &Schema,
    left: &Expression,
    right: &Expression,
    record: &Record,
) -> Result<Field, Error> {
    let l_field = left.evaluate(record, schema)?;
    let r_field = right.evaluate(record, schema)?;
    match l_field {
        Field::Boolean(l) => match r_field {
            Field::Boolean(r) => Ok(Field::Boolean(l || r)),
            Field::Null => Ok(Field::Boolean(l)),
            Field::UInt(_) | Field::Int(_) | Field::Float(_) | Field::String(_) => {
                Err(Error::InvalidType(r_field, "OR".to_string()))
            }
        },
        Field::Null => match r_field {
            Field::Boolean(r) => Ok(Field::Boolean(r)),
            Field::Null => Ok(Field::Boolean(false)),
            Field::UInt(_) | Field::Int(_) | Field::Float(_) | Field::String(_) => {
                Err(Error::InvalidType(r_field, "OR".to_string()))
            }
        },
        Field::UInt(_) | Field::Int(_) | Field::Float(_) | Field::String(_) => {
            Err(Error::InvalidType(l_field, "OR".to_string()))
        }
    }
}

pub fn evaluate_not(schema: &Schema, value: &Expression, record: &Record) -> Result<Field, Error> {
    let value_p = value.evaluate(record, schema)?;

    match value_p {
        Field::Boolean(value_v) => Ok(Field::Boolean(!value_v)),
        Field::Null => Ok(Field::Null),
        Field::UInt(_) | Field::Int(_) | Field::Float(_) | Field::String(_) => {
            Err(Error::InvalidType(value_p, "NOT".to_string()))
        }
    }
}
