use crate::error::Error;
use crate::execution::{Expression, ExpressionType};
use crate::logical::{evaluate_and, evaluate_not, evaluate_or};
use crate::mathematical::{
    evaluate_add, evaluate_div, evaluate_minus, evaluate_mod, evaluate_mul, evaluate_plus,
    evaluate_sub,
};
use hexgrid_types::serde::{Deserialize, Serialize};
use hexgrid_types::types::Record;
use hexgrid_types::types::{Field, FieldType, Schema, SourceDefinition};
use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(crate = "hexgrid_types::serde")]
pub enum UnaryOperatorType {
    Not,
    Plus,
    Minus,
}

impl Display for UnaryOperatorType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            UnaryOperatorType::Not => f.write_str("NOT "),
            UnaryOperatorType::Plus => f.write_str("+"),
            UnaryOperatorType::Minus => f.write_str("-"),
        }
    }
}

impl UnaryOperatorType {
    pub fn evaluate(
        &self,
        schema: &Schema,
        expression: &Expression,
        record: &Record,
    ) -> Result<Field, Error> {
        match self {
            UnaryOperatorType::Not => evaluate_not(schema, expression, record),
            UnaryOperatorType::Plus => evaluate_plus(schema, expression, record),
            UnaryOperatorType::Minus => evaluate_minus(schema, expression, record),
        }
    }

    pub fn get_type(&self, arg: &Expression, schema: &Schema) -> Result<ExpressionType, Error> {
        let arg_type = arg.get_type(schema)?;
        let return_type = match self {
            UnaryOperatorType::Not => FieldType::Boolean,
            UnaryOperatorType::Plus | UnaryOperatorType::Minus => arg_type.return_type,
        };
        Ok(ExpressionType::new(
            return_type,
            arg_type.nullable,
            SourceDefinition::Dynamic,
            false,
        ))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(crate = "hexgrid_types::serde")]
pub enum BinaryOperatorType {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    And,
    Or,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl Display for BinaryOperatorType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryOperatorType::Eq => f.write_str("="),
            BinaryOperatorType::Ne => f.write_str("!="),
            BinaryOperatorType::Gt => f.write_str(">"),
            BinaryOperatorType::Gte => f.write_str(">="),
            BinaryOperatorType::Lt => f.write_str("<"),
            BinaryOperatorType::Lte => f.write_str("<="),
            BinaryOperatorType::And => f.write_str(" AND "),
            BinaryOperatorType::Or => f.write_str(" OR "),
            BinaryOperatorType::Add => f.write_str("+"),
            BinaryOperatorType::Sub => f.write_str("-"),
            BinaryOperatorType::Mul => f.write_str("*"),
            BinaryOperatorType::Div => f.write_str("/"),
            BinaryOperatorType::Mod => f.write_str("%"),
        }
    }
}

impl BinaryOperatorType {
    pub fn evaluate(
        &self,
        schema: &Schema,
        left: &Expression,
        right: &Expression,
        record: &Record,
    ) -> Result<Field, Error> {
        match self {
            BinaryOperatorType::Eq => evaluate_cmp(schema, left, right, record, self),
            BinaryOperatorType::Ne => evaluate_cmp(schema, left, right, record, self),
            BinaryOperatorType::Gt => evaluate_cmp(schema, left, right, record, self),
            BinaryOperatorType::Gte => evaluate_cmp(schema, left, right, record, self),
            BinaryOperatorType::Lt => evaluate_cmp(schema, left, right, record, self),
            BinaryOperatorType::Lte => evaluate_cmp(schema, left, right, record, self),
            BinaryOperatorType::And => evaluate_and(schema, left, right, record),
            BinaryOperatorType::Or => evaluate_or(schema, left, right, record),
            BinaryOperatorType::Add => evaluate_add(schema, left, right, record),
            BinaryOperatorType::Sub => evaluate_sub(schema, left, right, record),
            BinaryOperatorType::Mul => evaluate_mul(schema, left, right, record),
            BinaryOperatorType::Div => evaluate_div(schema, left, right, record),
            BinaryOperatorType::Mod => evaluate_mod(schema, left, right, record),
        }
    }

    pub fn get_type(
        &self,
        left: &Expression,
        right: &Expression,
        schema: &Schema,
    ) -> Result<ExpressionType, Error> {
        let left_type = left.get_type(schema)?;
        let right_type = right.get_type(schema)?;
        let return_type = match self {
            BinaryOperatorType::Eq
            | BinaryOperatorType::Ne
            | BinaryOperatorType::Gt
            | BinaryOperatorType::Gte
            | BinaryOperatorType::Lt
            | BinaryOperatorType::Lte
            | BinaryOperatorType::And
            | BinaryOperatorType::Or => FieldType::Boolean,
            BinaryOperatorType::Div => FieldType::Float,
            BinaryOperatorType::Add
            | BinaryOperatorType::Sub
            | BinaryOperatorType::Mul
            | BinaryOperatorType::Mod => {
                promote_numeric(left_type.return_type, right_type.return_type)
            }
        };
        Ok(ExpressionType::new(
            return_type,
            left_type.nullable || right_type.nullable,
            SourceDefinition::Dynamic,
            false,
        ))
    }
}

fn promote_numeric(left: FieldType, right: FieldType) -> FieldType {
    match (left, right) {
        (FieldType::Float, _) | (_, FieldType::Float) => FieldType::Float,
        (FieldType::UInt, FieldType::UInt) => FieldType::UInt,
        _ => FieldType::Int,
    }
}

fn evaluate_cmp(
    schema: &Schema,
    left: &Expression,
    right: &Expression,
    record: &Record,
    operator: &BinaryOperatorType,
) -> Result<Field, Error> {
    let l_field = left.evaluate(record, schema)?;
    let r_field = right.evaluate(record, schema)?;

    if l_field == Field::Null || r_field == Field::Null {
        return Ok(Field::Null);
    }

    let ordering = compare_fields(&l_field, &r_field, operator)?;
    let result = match operator {
        BinaryOperatorType::Eq => ordering == std::cmp::Ordering::Equal,
        BinaryOperatorType::Ne => ordering != std::cmp::Ordering::Equal,
        BinaryOperatorType::Gt => ordering == std::cmp::Ordering::Greater,
        BinaryOperatorType::Gte => ordering != std::cmp::Ordering::Less,
        BinaryOperatorType::Lt => ordering == std::cmp::Ordering::Less,
        BinaryOperatorType::Lte => ordering != std::cmp::Ordering::Greater,
        _ => unreachable!("evaluate_cmp called with non-comparison operator"),
    };
    Ok(Field::Boolean(result))
}

fn compare_fields(
    left: &Field,
    right: &Field,
    operator: &BinaryOperatorType,
) -> Result<std::cmp::Ordering, Error> {
    match (left, right) {
        (Field::String(l), Field::String(r)) => Ok(l.cmp(r)),
        (Field::Boolean(l), Field::Boolean(r)) => Ok(l.cmp(r)),
        _ => {
            let (Some(l), Some(r)) = (left.to_float(), right.to_float()) else {
                return Err(Error::InvalidTypeComparison(
                    left.clone(),
                    right.clone(),
                    operator.to_string(),
                ));
            };
            l.partial_cmp(&r).ok_or_else(|| {
                Error::InvalidTypeComparison(left.clone(), right.clone(), operator.to_string())
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Expression::Literal;

    #[test]
    fn test_comparison() {
        let row = Record::new(vec![]);
        let schema = Schema::default();

        let l = Literal(Field::Int(3));
        let r = Literal(Field::Float(3.0.into()));
        assert_eq!(
            BinaryOperatorType::Eq
                .evaluate(&schema, &l, &r, &row)
                .unwrap(),
            Field::Boolean(true)
        );
        assert_eq!(
            BinaryOperatorType::Gt
                .evaluate(&schema, &l, &r, &row)
                .unwrap(),
            Field::Boolean(false)
        );

        let null = Literal(Field::Null);
        assert_eq!(
            BinaryOperatorType::Eq
                .evaluate(&schema, &l, &null, &row)
                .unwrap(),
            Field::Null
        );

        let s = Literal(Field::String("abc".to_string()));
        assert!(BinaryOperatorType::Lt
            .evaluate(&schema, &l, &s, &row)
            .is_err());
    }
}
