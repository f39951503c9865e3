use crate::error::{Error, OperationError};
use crate::execution::Expression;
use hexgrid_types::ordered_float::OrderedFloat;
use hexgrid_types::types::Record;
use hexgrid_types::types::{Field, Schema};

pub fn evaluate_plus(
    schema: &Schema,
    expression: &Expression,
    record: &Record,
) -> Result<Field, Error> {
    let field = expression.evaluate(record, schema)?;
    match field {
        Field::UInt(_) | Field::Int(_) | Field::Float(_) | Field::Null => Ok(field),
        Field::Boolean(_) | Field::String(_) => Err(Error::InvalidType(field, "+".to_string())),
    }
}

pub fn evaluate_minus(
    schema: &Schema,
    expression: &Expression,
    record: &Record,
) -> Result<Field, Error> {
    let field = expression.evaluate(record, schema)?;
    match field {
        Field::UInt(u) => i64::try_from(u)
            .ok()
            .and_then(i64::checked_neg)
            .map(Field::Int)
            .ok_or(Error::SqlError(OperationError::SubtractionOverflow)),
        Field::Int(i) => i
            .checked_neg()
            .map(Field::Int)
            .ok_or(Error::SqlError(OperationError::SubtractionOverflow)),
        Field::Float(f) => Ok(Field::Float(-f)),
        Field::Null => Ok(Field::Null),
        Field::Boolean(_) | Field::String(_) => Err(Error::InvalidType(field, "-".to_string())),
    }
}

macro_rules! define_math_operator {
    ($fn_name:ident, $op:expr, $checked:ident, $float_op:tt, $err:expr) => {
        pub fn $fn_name(
            schema: &Schema,
            left: &Expression,
            right: &Expression,
            record: &Record,
        ) -> Result<Field, Error> {
            let l_field = left.evaluate(record, schema)?;
            let r_field = right.evaluate(record, schema)?;

            match (&l_field, &r_field) {
                (Field::Null, _) | (_, Field::Null) => Ok(Field::Null),
                (Field::UInt(l), Field::UInt(r)) => l
                    .$checked(*r)
                    .map(Field::UInt)
                    .ok_or(Error::SqlError($err)),
                (Field::Float(_), _) | (_, Field::Float(_)) => {
                    let (Some(l), Some(r)) = (l_field.to_float(), r_field.to_float()) else {
                        return Err(Error::InvalidTypeComparison(
                            l_field,
                            r_field,
                            $op.to_string(),
                        ));
                    };
                    Ok(Field::Float(OrderedFloat(l $float_op r)))
                }
                _ => {
                    let (Some(l), Some(r)) = (l_field.to_int(), r_field.to_int()) else {
                        return Err(Error::InvalidTypeComparison(
                            l_field,
                            r_field,
                            $op.to_string(),
                        ));
                    };
                    l.$checked(r).map(Field::Int).ok_or(Error::SqlError($err))
                }
            }
        }
    };
}

define_math_operator!(
    evaluate_add,
    "+",
    checked_add,
    +,
    OperationError::AdditionOverflow
);
define_math_operator!(
    evaluate_sub,
    "-",
    checked_sub,
    -,
    OperationError::SubtractionOverflow
);
define_math_operator!(
    evaluate_mul,
    "*",
    checked_mul,
    *,
    OperationError::MultiplicationOverflow
);
define_math_operator!(
    evaluate_mod,
    "%",
    checked_rem,
    %,
    OperationError::ModuloByZeroOrOverflow
);

/// Division always promotes to float, so `1 / 2` is `0.5` rather than `0`.
pub fn evaluate_div(
    schema: &Schema,
    left: &Expression,
    right: &Expression,
    record: &Record,
) -> Result<Field, Error> {
    let l_field = left.evaluate(record, schema)?;
    let r_field = right.evaluate(record, schema)?;

    match (&l_field, &r_field) {
        (Field::Null, _) | (_, Field::Null) => Ok(Field::Null),
        _ => {
            let (Some(l), Some(r)) = (l_field.to_float(), r_field.to_float()) else {
                return Err(Error::InvalidTypeComparison(
                    l_field,
                    r_field,
                    "/".to_string(),
                ));
            };
            if r == 0.0 {
                Err(Error::SqlError(OperationError::DivisionByZeroOrOverflow))
            } else {
                Ok(Field::Float(OrderedFloat(l / r)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use Expression::Literal;

    #[test]
    fn test_int_arithmetic() {
        proptest!(
            ProptestConfig::with_cases(1000), move |(l in -1000i64..1000, r in -1000i64..1000)| {
                let row = Record::new(vec![]);
                let schema = Schema::default();
                let left = Literal(Field::Int(l));
                let right = Literal(Field::Int(r));

                prop_assert_eq!(
                    evaluate_add(&schema, &left, &right, &row).unwrap(),
                    Field::Int(l + r)
                );
                prop_assert_eq!(
                    evaluate_sub(&schema, &left, &right, &row).unwrap(),
                    Field::Int(l - r)
                );
                prop_assert_eq!(
                    evaluate_mul(&schema, &left, &right, &row).unwrap(),
                    Field::Int(l * r)
                );
        });
    }

    #[test]
    fn test_division_promotes_to_float() {
        let row = Record::new(vec![]);
        let schema = Schema::default();
        let result = evaluate_div(
            &schema,
            &Literal(Field::Int(1)),
            &Literal(Field::Int(2)),
            &row,
        )
        .unwrap();
        assert_eq!(result, Field::Float(OrderedFloat(0.5)));

        let result = evaluate_div(
            &schema,
            &Literal(Field::Int(1)),
            &Literal(Field::Int(0)),
            &row,
        );
        assert!(matches!(
            result,
            Err(Error::SqlError(OperationError::DivisionByZeroOrOverflow))
        ));
    }

    #[test]
    fn test_null_propagation() {
        let row = Record::new(vec![]);
        let schema = Schema::default();
        let result = evaluate_add(
            &schema,
            &Literal(Field::Null),
            &Literal(Field::Int(1)),
            &row,
        )
        .unwrap();
        assert_eq!(result, Field::Null);
    }

    #[test]
    fn test_overflow_is_an_error() {
        let row = Record::new(vec![]);
        let schema = Schema::default();
        let result = evaluate_add(
            &schema,
            &Literal(Field::Int(i64::MAX)),
            &Literal(Field::Int(1)),
            &row,
        );
        assert!(matches!(
            result,
            Err(Error::SqlError(OperationError::AdditionOverflow))
        ));
    }
}
