use strum::{Display, EnumIter, EnumString};

/// Convenience mnemonics with no encoding of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Pseudo {
    Li,
    La,
    Move,
    Blt,
    Bgt,
    Ble,
    Bge,
    Beqz,
    Bnez,
    Not,
    Neg,
    Seq,
    Sne,
    Sle,
    Sge,
}

impl Pseudo {
    pub fn parse(s: &str) -> Option<Self> {
        s.parse::<Self>().ok()
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, Pseudo::Li | Pseudo::La)
    }
}

#[test]
fn test() {
    assert_eq!(Pseudo::parse("li"), Some(Pseudo::Li));
    assert_eq!(Pseudo::parse("sge"), Some(Pseudo::Sge));
    assert_eq!(Pseudo::parse("add"), None);
    assert!(Pseudo::La.is_supported());
    assert!(!Pseudo::Blt.is_supported());
}
