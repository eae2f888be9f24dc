//! Turns terminal lines into console commands.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Submit the buffered query text.
    Submit(String),
    Overview,
    /// All tables, or just the named one.
    Schema(Option<String>),
    PlSql,
    Example,
    Help,
    Quit,
    Unknown(String),
}

pub const HELP: &str = "\
Type SQL and finish it with ';' or an empty line to run it.

  \\overview   project overview
  \\schema     database tables (\\schema <table> for one)
  \\plsql      triggers, functions and procedures
  \\example    run the sample query
  \\help       this message
  \\q          quit
";

/// Collects query lines until the query is complete.
#[derive(Debug, Default)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Feed one line of input, returning a command once one is complete.
    ///
    /// Backslash commands are only recognised at the start of a query.
    pub fn feed(&mut self, line: &str) -> Option<Command> {
        let trimmed = line.trim();

        if self.lines.is_empty() && trimmed.starts_with('\\') {
            let mut words = trimmed.split_whitespace();
            let name = words.next().unwrap_or_default();
            let arg = words.next().map(String::from);
            return Some(match name {
                "\\overview" => Command::Overview,
                "\\schema" => Command::Schema(arg),
                "\\plsql" => Command::PlSql,
                "\\example" => Command::Example,
                "\\help" | "\\?" => Command::Help,
                "\\q" | "\\quit" => Command::Quit,
                _ => Command::Unknown(trimmed.to_string()),
            });
        }

        if trimmed.is_empty() {
            // a bare Enter at the prompt is not a submission
            return self.finish();
        }

        self.lines.push(line.trim_end_matches(['\r', '\n']).to_string());
        if trimmed.ends_with(';') {
            return Some(Command::Submit(self.take()));
        }

        None
    }

    /// Flush whatever is buffered, e.g. at end of input.
    pub fn finish(&mut self) -> Option<Command> {
        if self.lines.is_empty() {
            None
        } else {
            Some(Command::Submit(self.take()))
        }
    }

    fn take(&mut self) -> String {
        std::mem::take(&mut self.lines).join("\n")
    }
}
