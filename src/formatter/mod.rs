//! Reconstructing source text from the AST.
//!
//! Every node implements [`Format`], writing itself into a
//! [`FormatterContext`] that tracks indentation. The output parses back to
//! the same program shape, which the tests rely on.

mod expression;
mod statement;

use crate::parser::ast::Program;

pub trait Format {
    fn format(&self, ctx: &mut FormatterContext) -> Result<(), std::fmt::Error>;
}

/// Accumulated output plus the current indentation level.
#[derive(Debug, Default)]
pub struct FormatterContext {
    output: String,
    indentation: usize,
}

impl FormatterContext {
    const INDENT: &'static str = "    ";

    pub fn write(&mut self, text: impl AsRef<str>) -> Result<(), std::fmt::Error> {
        self.output.push_str(text.as_ref());
        Ok(())
    }

    /// Break the line and indent to the current level.
    pub fn newline(&mut self) -> Result<(), std::fmt::Error> {
        self.output.push('\n');
        for _ in 0..self.indentation {
            self.output.push_str(Self::INDENT);
        }
        Ok(())
    }

    pub fn indent(&mut self) {
        self.indentation += 1;
    }

    pub fn dedent(&mut self) {
        self.indentation = self.indentation.saturating_sub(1);
    }

    pub fn finish(self) -> String {
        self.output
    }
}

/// Render a whole program, one blank line between functions.
pub fn format_program<T>(program: &Program<T>) -> Result<String, std::fmt::Error> {
    let mut ctx = FormatterContext::default();

    for (index, function) in program.functions.iter().enumerate() {
        if index > 0 {
            ctx.write("\n\n")?;
        }
        function.format(&mut ctx)?;
    }
    ctx.write("\n")?;

    Ok(ctx.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::{ast::Program, Parser};

    fn parse(input: &str) -> Program<()> {
        let tokens = Lexer::new(input).lex().expect("input should lex");
        Parser::new(tokens).parse().expect("input should parse")
    }

    fn render(input: &str) -> String {
        format_program(&parse(input)).expect("formatting should succeed")
    }

    #[test]
    fn test_format_simple_function() {
        let formatted = render("int main(){int a;a=5;print(a);return 0;}");

        assert_eq!(
            "int main() {\n    int a;\n    a = 5;\n    print(a);\n    return 0;\n}\n",
            formatted
        );
    }

    #[test]
    fn test_formatted_output_reparses() {
        let formatted = render(
            "int add(int x,int y){return x+y;} int main(){float f;f=1.5e2;if(f>0.0)print(add(1,2),\"done\");return 0;}",
        );

        let reparsed = parse(&formatted);
        assert_eq!(2, reparsed.functions.len());
    }

    #[test]
    fn test_formatting_is_idempotent() {
        let source = "int main() {\n\
                          int a;\n\
                          a = 0;\n\
                          while (a < 3) {\n\
                              if (a == 1 || a == 2) print(a, \"hi\"); else ;\n\
                              a = a + 1;\n\
                          }\n\
                          return -a;\n\
                      }";

        let once = render(source);
        let twice = render(&once);

        assert_eq!(once, twice);
    }
}
