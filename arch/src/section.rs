use serde::Serialize;
use std::fmt::Display;
use strum::EnumString;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, EnumString)]
pub enum Section {
    #[default]
    #[strum(disabled)]
    None,
    #[strum(serialize = ".text")]
    Text,
    #[strum(serialize = ".data")]
    Data,
    #[strum(serialize = ".bss")]
    Bss,
    #[strum(serialize = ".rodata")]
    Rodata,
}

impl Section {
    pub fn parse(s: &str) -> Option<Self> {
        s.parse::<Self>().ok()
    }

    pub fn is_implemented(&self) -> bool {
        matches!(self, Section::Text | Section::Data)
    }
}

impl Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Section::None => "(none)",
            Section::Text => ".text",
            Section::Data => ".data",
            Section::Bss => ".bss",
            Section::Rodata => ".rodata",
        };
        write!(f, "{}", name)
    }
}

#[test]
fn test() {
    assert_eq!(Section::parse(".text"), Some(Section::Text));
    assert_eq!(Section::parse(".data"), Some(Section::Data));
    assert_eq!(Section::parse(".rodata"), Some(Section::Rodata));
    assert_eq!(Section::parse("None"), None);
    assert_eq!(Section::parse(".globl"), None);
    assert!(!Section::Bss.is_implemented());
}
