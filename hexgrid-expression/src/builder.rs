use crate::error::Error;
use crate::execution::Expression;
use crate::operator::{BinaryOperatorType, UnaryOperatorType};
use crate::registry::FunctionRegistry;
use hexgrid_types::ordered_float::OrderedFloat;
use hexgrid_types::types::{Field, FieldDefinition, Schema, SourceDefinition};
use sqlparser::ast::{
    BinaryOperator as SqlBinaryOperator, Expr as SqlExpr, Function, FunctionArg, FunctionArgExpr,
    Ident, UnaryOperator as SqlUnaryOperator, Value as SqlValue,
};

/// Translates a parsed SQL expression into an executable `Expression` tree,
/// resolving function names through the registry.
#[derive(Clone, Debug)]
pub struct ExpressionBuilder<'a> {
    registry: &'a FunctionRegistry,
}

impl<'a> ExpressionBuilder<'a> {
    pub fn new(registry: &'a FunctionRegistry) -> Self {
        Self { registry }
    }

    /// Builds and type-checks in one pass, so arity and argument-type
    /// mismatches fail here, at plan time, not per row.
    pub fn build(&self, sql_expression: &SqlExpr, schema: &Schema) -> Result<Expression, Error> {
        let expression = self.parse_sql_expression(sql_expression, schema)?;
        expression.get_type(schema)?;
        Ok(expression)
    }

    fn parse_sql_expression(
        &self,
        expression: &SqlExpr,
        schema: &Schema,
    ) -> Result<Expression, Error> {
        match expression {
            SqlExpr::Identifier(ident) => Self::parse_sql_column(&[ident.clone()], schema),
            SqlExpr::CompoundIdentifier(ident) => Self::parse_sql_column(ident, schema),
            SqlExpr::Value(SqlValue::Number(n, _)) => Self::parse_sql_number(n),
            SqlExpr::Value(SqlValue::Null) => Ok(Expression::Literal(Field::Null)),
            SqlExpr::Value(SqlValue::Boolean(b)) => Ok(Expression::Literal(Field::Boolean(*b))),
            SqlExpr::Value(SqlValue::SingleQuotedString(s) | SqlValue::DoubleQuotedString(s)) => {
                Ok(Expression::Literal(Field::String(s.clone())))
            }
            SqlExpr::UnaryOp { op, expr } => self.parse_sql_unary_op(op, expr, schema),
            SqlExpr::BinaryOp { left, op, right } => {
                self.parse_sql_binary_op(left, op, right, schema)
            }
            SqlExpr::Nested(expr) => self.parse_sql_expression(expr, schema),
            SqlExpr::Function(sql_function) => self.parse_sql_function(sql_function, schema),
            _ => Err(Error::UnsupportedExpression(expression.clone())),
        }
    }

    fn parse_sql_column(ident: &[Ident], schema: &Schema) -> Result<Expression, Error> {
        let (src_field, src_table_or_alias) = match ident {
            [field] => (&field.value, None),
            [table, field] => (&field.value, Some(&table.value)),
            _ => return Err(Error::InvalidIdent(ident.to_vec())),
        };

        let matching: Vec<(usize, &FieldDefinition)> = schema
            .fields
            .iter()
            .enumerate()
            .filter(|(_idx, f)| &f.name == src_field)
            .filter(|(_idx, f)| match src_table_or_alias {
                None => true,
                Some(table) => match &f.source {
                    SourceDefinition::Alias { name } => name == table,
                    SourceDefinition::Table { name, .. } => name == table,
                    SourceDefinition::Dynamic => false,
                },
            })
            .collect();

        match matching.as_slice() {
            [(index, _)] => Ok(Expression::Column { index: *index }),
            _ => Err(Error::InvalidIdent(ident.to_vec())),
        }
    }

    fn parse_sql_number(n: &str) -> Result<Expression, Error> {
        match n.parse::<i64>() {
            Ok(n) => Ok(Expression::Literal(Field::Int(n))),
            Err(_) => match n.parse::<f64>() {
                Ok(f) => Ok(Expression::Literal(Field::Float(OrderedFloat(f)))),
                Err(_) => Err(Error::NotANumber(n.to_string())),
            },
        }
    }

    fn parse_sql_unary_op(
        &self,
        op: &SqlUnaryOperator,
        expr: &SqlExpr,
        schema: &Schema,
    ) -> Result<Expression, Error> {
        let arg = Box::new(self.parse_sql_expression(expr, schema)?);
        let operator = match op {
            SqlUnaryOperator::Not => UnaryOperatorType::Not,
            SqlUnaryOperator::Plus => UnaryOperatorType::Plus,
            SqlUnaryOperator::Minus => UnaryOperatorType::Minus,
            _ => return Err(Error::UnsupportedUnaryOperator(*op)),
        };
        Ok(Expression::UnaryOperator { operator, arg })
    }

    fn parse_sql_binary_op(
        &self,
        left: &SqlExpr,
        op: &SqlBinaryOperator,
        right: &SqlExpr,
        schema: &Schema,
    ) -> Result<Expression, Error> {
        let left = Box::new(self.parse_sql_expression(left, schema)?);
        let right = Box::new(self.parse_sql_expression(right, schema)?);
        let operator = match op {
            SqlBinaryOperator::Eq => BinaryOperatorType::Eq,
            SqlBinaryOperator::NotEq => BinaryOperatorType::Ne,
            SqlBinaryOperator::Gt => BinaryOperatorType::Gt,
            SqlBinaryOperator::GtEq => BinaryOperatorType::Gte,
            SqlBinaryOperator::Lt => BinaryOperatorType::Lt,
            SqlBinaryOperator::LtEq => BinaryOperatorType::Lte,
            SqlBinaryOperator::And => BinaryOperatorType::And,
            SqlBinaryOperator::Or => BinaryOperatorType::Or,
            SqlBinaryOperator::Plus => BinaryOperatorType::Add,
            SqlBinaryOperator::Minus => BinaryOperatorType::Sub,
            SqlBinaryOperator::Multiply => BinaryOperatorType::Mul,
            SqlBinaryOperator::Divide => BinaryOperatorType::Div,
            SqlBinaryOperator::Modulo => BinaryOperatorType::Mod,
            _ => return Err(Error::UnsupportedBinaryOperator(op.clone())),
        };
        Ok(Expression::BinaryOperator {
            left,
            operator,
            right,
        })
    }

    fn parse_sql_function(
        &self,
        sql_function: &Function,
        schema: &Schema,
    ) -> Result<Expression, Error> {
        let function_name = sql_function.name.to_string().to_lowercase();

        let Some(fun) = self.registry.lookup(&function_name) else {
            return Err(Error::UnknownFunction(function_name));
        };

        let mut function_args: Vec<Expression> = Vec::new();
        for arg in &sql_function.args {
            function_args.push(self.parse_sql_function_arg(arg, schema)?);
        }

        Ok(Expression::CellFunction {
            fun,
            args: function_args,
        })
    }

    fn parse_sql_function_arg(
        &self,
        argument: &FunctionArg,
        schema: &Schema,
    ) -> Result<Expression, Error> {
        match argument {
            FunctionArg::Unnamed(FunctionArgExpr::Expr(arg)) => {
                self.parse_sql_expression(arg, schema)
            }
            _ => Err(Error::UnsupportedFunctionArg(argument.clone())),
        }
    }
}
