/// Accumulates an indented line-per-node rendering of an AST.
/// Diagnostic output only; nothing parses it back.
pub struct TreePrinter {
    out: String,
    depth: usize,
}

const INDENT: &str = "  ";

impl TreePrinter {
    pub fn new() -> Self {
        TreePrinter {
            out: String::new(),
            depth: 0,
        }
    }

    pub fn add_line(&mut self, line: impl AsRef<str>) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(line.as_ref());
        self.out.push('\n');
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn unindent(&mut self) {
        self.depth -= 1;
    }

    pub fn finish(self) -> String {
        self.out
    }
}

impl Default for TreePrinter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indents_two_spaces_per_level() {
        let mut printer = TreePrinter::new();
        printer.add_line("root");
        printer.indent();
        printer.add_line("child");
        printer.indent();
        printer.add_line("grandchild");
        printer.unindent();
        printer.unindent();
        printer.add_line("sibling");
        assert_eq!(printer.finish(), "root\n  child\n    grandchild\nsibling\n");
    }
}
