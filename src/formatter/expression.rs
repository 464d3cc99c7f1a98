use crate::parser::ast::{
    BinaryExpression, BoolLit, CallExpression, Expression, FloatLit, Ident, IntLit, StringLit,
    UnaryExpression,
};

use super::{Format, FormatterContext};

impl<T> Format for Expression<T> {
    fn format(&self, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error> {
        match self {
            Expression::Binary(binary) => binary.format(ctx),
            Expression::Unary(unary) => unary.format(ctx),
            Expression::IntLit(lit) => lit.format(ctx),
            Expression::FloatLit(lit) => lit.format(ctx),
            Expression::BoolLit(lit) => lit.format(ctx),
            Expression::StringLit(lit) => lit.format(ctx),
            Expression::Ident(ident) => ident.format(ctx),
            Expression::Call(call) => call.format(ctx),
        }
    }
}

/// Binary expressions are always parenthesized so the rendered text parses
/// back to the same tree regardless of precedence.
impl<T> Format for BinaryExpression<T> {
    fn format(&self, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error> {
        ctx.write("(")?;
        self.left.format(ctx)?;
        ctx.write(format!(" {} ", self.operator))?;
        self.right.format(ctx)?;
        ctx.write(")")
    }
}

impl<T> Format for UnaryExpression<T> {
    fn format(&self, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error> {
        ctx.write(self.operator.as_str())?;
        self.inner.format(ctx)
    }
}

impl<T> Format for IntLit<T> {
    fn format(&self, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error> {
        ctx.write(self.value.to_string())
    }
}

impl<T> Format for FloatLit<T> {
    fn format(&self, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error> {
        // keep a decimal point so the literal lexes as a float again
        if self.value.is_finite() && self.value.fract() == 0.0 {
            ctx.write(format!("{:.1}", self.value))
        } else {
            ctx.write(self.value.to_string())
        }
    }
}

impl<T> Format for BoolLit<T> {
    fn format(&self, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error> {
        ctx.write(self.value.to_string())
    }
}

impl<T> Format for StringLit<T> {
    fn format(&self, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error> {
        ctx.write(format!("\"{}\"", self.value))
    }
}

impl<T> Format for Ident<T> {
    fn format(&self, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error> {
        ctx.write(&self.name)
    }
}

impl<T> Format for CallExpression<T> {
    fn format(&self, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error> {
        ctx.write(&self.name)?;
        ctx.write("(")?;
        for (index, arg) in self.args.iter().enumerate() {
            if index > 0 {
                ctx.write(", ")?;
            }
            arg.format(ctx)?;
        }
        ctx.write(")")
    }
}
