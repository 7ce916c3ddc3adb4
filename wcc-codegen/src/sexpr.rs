//! S-expression tree for WAT output
//!
//! WAT is an S-expression language. The generator builds a small tree and
//! this module prints it with two-space indentation:
//!
//! - an atom is a bare token or instruction, e.g. `local.get 0`
//! - a list is printed on one line, e.g. `(param i32 i32)`
//! - a block prints its head on the opening line, each body item on its own
//!   indented line, and the closing parenthesis on a line of its own

use crate::wat::Instruction;

#[derive(Debug, Clone, PartialEq)]
pub enum SExpr {
    Atom(String),
    List(Vec<SExpr>),
    Block { head: Vec<SExpr>, body: Vec<SExpr> },
}

impl SExpr {
    pub fn atom(text: impl Into<String>) -> Self {
        SExpr::Atom(text.into())
    }

    /// A quoted string atom, e.g. `"env"`
    pub fn string(text: &str) -> Self {
        SExpr::Atom(format!("\"{text}\""))
    }

    pub fn list(items: Vec<SExpr>) -> Self {
        SExpr::List(items)
    }

    pub fn block(head: Vec<SExpr>, body: Vec<SExpr>) -> Self {
        SExpr::Block { head, body }
    }

    /// Pretty-print the tree, ending with a newline
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_line(&mut out, 0);
        out
    }

    fn write_line(&self, out: &mut String, depth: usize) {
        out.push_str(&"  ".repeat(depth));
        match self {
            SExpr::Atom(_) | SExpr::List(_) => self.write_inline(out),
            SExpr::Block { head, body } => {
                out.push('(');
                write_items(out, head);
                out.push('\n');
                for item in body {
                    item.write_line(out, depth + 1);
                }
                out.push_str(&"  ".repeat(depth));
                out.push(')');
            }
        }
        out.push('\n');
    }

    fn write_inline(&self, out: &mut String) {
        match self {
            SExpr::Atom(text) => out.push_str(text),
            SExpr::List(items) => {
                out.push('(');
                write_items(out, items);
                out.push(')');
            }
            SExpr::Block { head, body } => {
                out.push('(');
                write_items(out, head);
                for item in body {
                    out.push(' ');
                    item.write_inline(out);
                }
                out.push(')');
            }
        }
    }
}

fn write_items(out: &mut String, items: &[SExpr]) {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            out.push(' ');
        }
        item.write_inline(out);
    }
}

impl From<Instruction> for SExpr {
    fn from(instruction: Instruction) -> Self {
        SExpr::Atom(instruction.to_string())
    }
}
