use crate::parser::ast::{
    Assignment, Block, Declaration, FunctionDef, If, Param, Print, Statement, While,
};

use super::{Format, FormatterContext};

impl<T> Format for Statement<T> {
    fn format(&self, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error> {
        match self {
            Statement::Assignment(assignment) => assignment.format(ctx),
            Statement::If(if_stmt) => if_stmt.format(ctx),
            Statement::While(while_stmt) => while_stmt.format(ctx),
            Statement::Return(ret) => {
                ctx.write("return ")?;
                ret.value.format(ctx)?;
                ctx.write(";")
            }
            Statement::Print(print) => print.format(ctx),
            Statement::Block(block) => block.format(ctx),
        }
    }
}

impl<T> Format for Assignment<T> {
    fn format(&self, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error> {
        ctx.write(&self.ident.name)?;
        ctx.write(" = ")?;
        self.value.format(ctx)?;
        ctx.write(";")
    }
}

impl<T> Format for If<T> {
    fn format(&self, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error> {
        ctx.write("if (")?;
        self.condition.format(ctx)?;
        ctx.write(") ")?;
        self.then_branch.format(ctx)?;

        if let Some(else_branch) = &self.else_branch {
            ctx.write(" else ")?;
            else_branch.format(ctx)?;
        }

        Ok(())
    }
}

impl<T> Format for While<T> {
    fn format(&self, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error> {
        ctx.write("while (")?;
        self.condition.format(ctx)?;
        ctx.write(") ")?;
        self.body.format(ctx)
    }
}

impl<T> Format for Print<T> {
    fn format(&self, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error> {
        ctx.write("print(")?;
        for (index, arg) in self.args.iter().enumerate() {
            if index > 0 {
                ctx.write(", ")?;
            }
            arg.format(ctx)?;
        }
        ctx.write(");")
    }
}

impl<T> Format for Block<T> {
    fn format(&self, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error> {
        if self.statements.is_empty() {
            return ctx.write("{ }");
        }

        ctx.write("{")?;
        ctx.indent();
        for statement in &self.statements {
            ctx.newline()?;
            statement.format(ctx)?;
        }
        ctx.dedent();
        ctx.newline()?;
        ctx.write("}")
    }
}

impl Format for Param {
    fn format(&self, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error> {
        ctx.write(format!("{} {}", self.type_name, self.name))
    }
}

impl Format for Declaration {
    fn format(&self, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error> {
        ctx.write(format!("{} {};", self.type_name, self.name))
    }
}

impl<T> Format for FunctionDef<T> {
    fn format(&self, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error> {
        ctx.write(format!("{} {}(", self.return_type, self.name))?;
        for (index, param) in self.params.iter().enumerate() {
            if index > 0 {
                ctx.write(", ")?;
            }
            param.format(ctx)?;
        }
        ctx.write(") {")?;

        ctx.indent();
        for decl in &self.decls {
            ctx.newline()?;
            decl.format(ctx)?;
        }
        for statement in &self.statements {
            ctx.newline()?;
            statement.format(ctx)?;
        }
        ctx.dedent();
        ctx.newline()?;
        ctx.write("}")
    }
}
