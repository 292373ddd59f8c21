use color_print::cprintln;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MsgKind {
    Error,
    Warn,
    Note,
}

/// Non-fatal finding attached to a source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Msg {
    pub kind: MsgKind,
    pub line: usize,
    pub text: String,
}

impl Msg {
    pub fn warn(line: usize, text: String) -> Self {
        Msg {
            kind: MsgKind::Warn,
            line,
            text,
        }
    }

    pub fn note(line: usize, text: String) -> Self {
        Msg {
            kind: MsgKind::Note,
            line,
            text,
        }
    }

    pub fn print(&self, lines: &[String], file: &str) {
        match self.kind {
            MsgKind::Error => cprintln!("<red,bold>error</>: {}", self.text),
            MsgKind::Warn => cprintln!("<yellow,bold>warn</>: {}", self.text),
            MsgKind::Note => cprintln!("<green,bold>note</>: {}", self.text),
        }
        let raw = lines.get(self.line).map(|s| s.as_str()).unwrap_or("");
        cprintln!("     <blue>--></> <underline>{}:{}</>", file, self.line + 1);
        cprintln!("      <blue>|</>");
        cprintln!(" <blue>{:>4} |</> {}", self.line + 1, raw);
        cprintln!("      <blue>|</>");
    }
}

pub fn dump(msgs: &[Msg], lines: &[String], file: &str) {
    for msg in msgs {
        msg.print(lines, file);
    }
}
