use color_print::cprintln;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Lookup errors
    #[error("Unknown mnemonic: `{0}`")]
    UnknownMnemonic(String),

    #[error("Invalid register: `{0}`")]
    InvalidRegister(String),

    #[error("`{0}` is not a valid offset/target")]
    InvalidOffset(String),

    #[error("`{0}` is not a valid immediate")]
    InvalidImmediate(String),

    #[error("Undefined data symbol: `{0}`")]
    UndefinedSymbol(String),

    // Range errors
    #[error("Instruction `{stmt}` contains {value}, which does not fit in {width} bits")]
    OutOfRange {
        stmt: String,
        value: i64,
        width: usize,
    },

    // Shape errors
    #[error("Incorrect number of tokens for `{stmt}`: expected {expected}, got {} {:?}", .tokens.len(), .tokens)]
    TokenCount {
        stmt: String,
        expected: usize,
        tokens: Vec<String>,
    },

    #[error("Malformed operands for pseudo-instruction: `{0}`")]
    MalformedPseudo(String),

    #[error("Malformed data declaration: `{0}`")]
    MalformedData(String),

    // Unsupported features
    #[error("Unsupported pseudo-instruction: `{0}`")]
    UnsupportedPseudo(String),

    // Symbol table errors
    #[error("Re-defined label: `{0}`")]
    RedefinedLabel(String),

    #[error("Symbol `{0}` is defined both as a label and as data")]
    AmbiguousSymbol(String),

    #[error("Data symbol `{0}` at 0x{1:08X} is outside the data segment")]
    DataSegmentOverflow(String, u32),

    // Internal invariants
    #[error("Branch distance to `{label}` is not a multiple of 4: {distance}")]
    MisalignedOffset { label: String, distance: i64 },

    #[error("Invalid machine code length: {0} ({1})")]
    MachineLength(usize, String),

    // Configuration
    #[error("`{0}` must be word aligned: 0x{1:08X}")]
    Misaligned(&'static str, u32),

    #[error("Failed to load config {0}: {1}")]
    Config(String, String),

    // IO
    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read line")]
    FileRead(#[source] std::io::Error),

    #[error("Failed to create file: {0}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),

    #[error("{source}")]
    At {
        line: usize,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub fn at(self, line: usize) -> Self {
        match self {
            Error::At { .. } => self,
            _ => Error::At {
                line,
                source: Box::new(self),
            },
        }
    }

    /// The error without its line location.
    pub fn cause(&self) -> &Error {
        match self {
            Error::At { source, .. } => source.cause(),
            _ => self,
        }
    }

    pub fn line(&self) -> Option<usize> {
        match self {
            Error::At { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Print error with diagnostic information showing file location and line content
    pub fn print_diag(&self, lines: &[String], file: &str) {
        cprintln!("<red,bold>error</>: {}", self.cause());

        let Some(line_idx) = self.line() else {
            return;
        };

        // line_idx is 0-based, display as 1-based
        let line_num = line_idx + 1;
        cprintln!("     <blue>--></> <underline>{}:{}</>", file, line_num);
        cprintln!("      <blue>|</>");

        let line_content = lines.get(line_idx).map(|s| s.as_str()).unwrap_or("");

        cprintln!(" <blue>{:>4} |</> {}", line_num, line_content);
        cprintln!("      <blue>|</>");
    }
}
