use crate::cell::common::{get_cell_function_type, CellFunctionType};
use crate::error::Error;
use crate::operator::{BinaryOperatorType, UnaryOperatorType};

use hexgrid_types::serde::{Deserialize, Serialize};
use hexgrid_types::types::Record;
use hexgrid_types::types::{Field, FieldType, Schema, SourceDefinition};

/// A node in an immutable expression tree. Function-call nodes hold their
/// argument sub-expressions unevaluated; evaluation is lazy and row-scoped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(crate = "hexgrid_types::serde")]
pub enum Expression {
    Column {
        index: usize,
    },
    Literal(Field),
    UnaryOperator {
        operator: UnaryOperatorType,
        arg: Box<Expression>,
    },
    BinaryOperator {
        left: Box<Expression>,
        operator: BinaryOperatorType,
        right: Box<Expression>,
    },
    CellFunction {
        fun: CellFunctionType,
        args: Vec<Expression>,
    },
}

impl Expression {
    pub fn to_string(&self, schema: &Schema) -> String {
        match &self {
            Expression::Column { index } => schema.fields[*index].name.clone(),
            Expression::Literal(value) => format!("{}", value),
            Expression::UnaryOperator { operator, arg } => {
                operator.to_string() + arg.to_string(schema).as_str()
            }
            Expression::BinaryOperator {
                left,
                operator,
                right,
            } => {
                left.to_string(schema)
                    + operator.to_string().as_str()
                    + right.to_string(schema).as_str()
            }
            Expression::CellFunction { fun, args } => {
                fun.to_string()
                    + "("
                    + args
                        .iter()
                        .map(|e| e.to_string(schema))
                        .collect::<Vec<String>>()
                        .join(",")
                        .as_str()
                    + ")"
            }
        }
    }
}

pub struct ExpressionType {
    pub return_type: FieldType,
    pub nullable: bool,
    pub source: SourceDefinition,
    pub is_primary_key: bool,
}

impl ExpressionType {
    pub fn new(
        return_type: FieldType,
        nullable: bool,
        source: SourceDefinition,
        is_primary_key: bool,
    ) -> Self {
        Self {
            return_type,
            nullable,
            source,
            is_primary_key,
        }
    }
}

impl Expression {
    /// Evaluates this node against one row binding. Children are evaluated
    /// left to right against the same binding.
    pub fn evaluate(&self, record: &Record, schema: &Schema) -> Result<Field, Error> {
        match self {
            Expression::Literal(field) => Ok(field.clone()),
            Expression::Column { index } => Ok(record.values[*index].clone()),
            Expression::UnaryOperator { operator, arg } => operator.evaluate(schema, arg, record),
            Expression::BinaryOperator {
                left,
                operator,
                right,
            } => operator.evaluate(schema, left, right, record),
            Expression::CellFunction { fun, args } => fun.evaluate(schema, args, record),
        }
    }

    /// Static output type of this node, used for planning before any row is
    /// evaluated. Also where wrong arity surfaces at compile time.
    pub fn get_type(&self, schema: &Schema) -> Result<ExpressionType, Error> {
        match self {
            Expression::Literal(field) => {
                let field_type = field.ty();
                match field_type {
                    Some(f) => Ok(ExpressionType::new(
                        f,
                        false,
                        SourceDefinition::Dynamic,
                        false,
                    )),
                    None => Err(Error::LiteralExpressionIsNull),
                }
            }
            Expression::Column { index } => {
                let t = &schema.fields[*index];

                Ok(ExpressionType::new(
                    t.typ,
                    t.nullable,
                    t.source.clone(),
                    schema.primary_index.contains(index),
                ))
            }
            Expression::UnaryOperator { operator, arg } => operator.get_type(arg, schema),
            Expression::BinaryOperator {
                left,
                operator,
                right,
            } => operator.get_type(left, right, schema),
            Expression::CellFunction { fun, args } => get_cell_function_type(fun, args, schema),
        }
    }
}
