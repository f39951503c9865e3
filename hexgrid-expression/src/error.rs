use std::ops::Range;

use hexgrid_types::{
    thiserror::{self, Error},
    types::{Field, FieldType},
};
use sqlparser::ast::{BinaryOperator, Expr, FunctionArg, Ident, UnaryOperator};

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unsupported SQL expression: {0:?}")]
    UnsupportedExpression(Expr),
    #[error("Unsupported SQL function arg: {0:?}")]
    UnsupportedFunctionArg(FunctionArg),
    #[error("Invalid ident: {}", .0.iter().map(|ident| ident.value.as_str()).collect::<Vec<_>>().join("."))]
    InvalidIdent(Vec<Ident>),
    #[error("Unknown function: {0}")]
    UnknownFunction(String),
    #[error("Function name registered twice: {0}")]
    DuplicateFunctionName(String),
    #[error("Unsupported SQL unary operator: {0:?}")]
    UnsupportedUnaryOperator(UnaryOperator),
    #[error("Unsupported SQL binary operator: {0:?}")]
    UnsupportedBinaryOperator(BinaryOperator),
    #[error("Not a number: {0}")]
    NotANumber(String),

    #[error("literal expression cannot be null")]
    LiteralExpressionIsNull,
    #[error("expected {expected:?} arguments for function {function_name}, got {actual}")]
    InvalidNumberOfArguments {
        function_name: String,
        expected: Range<usize>,
        actual: usize,
    },
    #[error(
        "Invalid argument type for function {function_name}: type: {actual}, expected types: {expected:?}, index: {argument_index}"
    )]
    InvalidFunctionArgumentType {
        function_name: String,
        argument_index: usize,
        expected: Vec<FieldType>,
        actual: FieldType,
    },
    #[error("Invalid argument for function {function_name}(): argument: {argument}, index: {argument_index}")]
    InvalidFunctionArgument {
        function_name: String,
        argument_index: usize,
        argument: Field,
    },
    #[error("Invalid types on {0} and {1} for {2} operand")]
    InvalidTypeComparison(Field, Field, String),
    #[error("Invalid types on {0} for {1} operand")]
    InvalidType(Field, String),
    #[error("Sql error: {0}")]
    SqlError(#[source] OperationError),

    #[error("Invalid latitude/longitude: {0}")]
    InvalidCoordinate(#[from] h3o::error::InvalidLatLng),
    #[error("Invalid grid resolution: {0}")]
    InvalidResolution(#[from] h3o::error::InvalidResolution),
    #[error("Grid distance is undefined between cells {from} and {to}")]
    GridDistanceUndefined {
        from: u64,
        to: u64,
        #[source]
        source: h3o::error::LocalIjError,
    },
}

#[derive(Error, Debug)]
pub enum OperationError {
    #[error("SQL Error: Addition operation cannot be done due to overflow.")]
    AdditionOverflow,
    #[error("SQL Error: Subtraction operation cannot be done due to overflow.")]
    SubtractionOverflow,
    #[error("SQL Error: Multiplication operation cannot be done due to overflow.")]
    MultiplicationOverflow,
    #[error("SQL Error: Division operation cannot be done.")]
    DivisionByZeroOrOverflow,
    #[error("SQL Error: Modulo operation cannot be done.")]
    ModuloByZeroOrOverflow,
}
