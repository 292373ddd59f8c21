use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::layout::Layout;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    EnumString,
    Display,
    EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OpKind {
    Add,
    Addu,
    Sub,
    Subu,
    And,
    Or,
    Xor,
    Nor,
    Slt,
    Sltu,
    Mult,
    Multu,
    Div,
    Divu,
    Jr,
    Sll,
    Srl,
    Sra,
    Addi,
    Addiu,
    Andi,
    Ori,
    Xori,
    Slti,
    Sltiu,
    Lui,
    Beq,
    Bne,
    Lw,
    Sw,
    Lb,
    Sb,
    Lbu,
    Lh,
    Sh,
    Bgtz,
    Bltz,
    J,
    Jal,
    Syscall,
    Nop,
}

impl OpKind {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.parse::<Self>() {
            Ok(op) => Ok(op),
            Err(_) => Err(format!("Unknown mnemonic: `{}`", s)),
        }
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }
}

// ----------------------------------------------------------------------------
// Opcode / Funct

impl OpKind {
    pub fn opcode(&self) -> u8 {
        use OpKind::*;
        match self {
            Add | Addu | Sub | Subu | And | Or | Xor | Nor | Slt | Sltu => 0b000000,
            Mult | Multu | Div | Divu | Jr | Sll | Srl | Sra => 0b000000,
            Syscall | Nop => 0b000000,
            Addi => 0b001000,
            Addiu => 0b001001,
            Andi => 0b001100,
            Ori => 0b001101,
            Xori => 0b001110,
            Slti => 0b001010,
            Sltiu => 0b001011,
            Lui => 0b001111,
            Beq => 0b000100,
            Bne => 0b000101,
            Lw => 0b100011,
            Sw => 0b101011,
            Lb => 0b100000,
            Sb => 0b101000,
            Lbu => 0b100100,
            Lh => 0b100001,
            Sh => 0b101001,
            Bgtz => 0b000111,
            Bltz => 0b000001,
            J => 0b000010,
            Jal => 0b000011,
        }
    }

    pub fn funct(&self) -> Option<u8> {
        use OpKind::*;
        match self {
            Add => Some(0b100000),
            Addu => Some(0b100001),
            Sub => Some(0b100010),
            Subu => Some(0b100011),
            Mult => Some(0b011000),
            Multu => Some(0b011001),
            Div => Some(0b011010),
            Divu => Some(0b011011),
            And => Some(0b100100),
            Or => Some(0b100101),
            Xor => Some(0b100110),
            Nor => Some(0b100111),
            Sll => Some(0b000000),
            Srl => Some(0b000010),
            Sra => Some(0b000011),
            Slt => Some(0b101010),
            Sltu => Some(0b101011),
            Jr => Some(0b001000),
            Syscall => Some(0b001100),
            Nop => Some(0b000000),
            _ => None,
        }
    }

    pub fn layout(&self) -> Layout {
        use OpKind::*;
        match self {
            Add | Addu | Sub | Subu | And | Or | Xor | Nor | Slt | Sltu => Layout::DST,
            Mult | Multu | Div | Divu => Layout::ST,
            Jr => Layout::S,
            Sll | Srl | Sra => Layout::DTSHA,
            Addi | Addiu | Andi | Ori | Xori | Slti | Sltiu => Layout::TSIMM,
            Lui => Layout::TIMM,
            Beq | Bne => Layout::STOFF,
            Lw | Sw | Lb | Sb | Lbu | Lh | Sh => Layout::TOFFS,
            Bgtz | Bltz => Layout::SOFF,
            J | Jal => Layout::TARG,
            Syscall | Nop => Layout::SYSCALL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_parse() {
        assert_eq!(OpKind::parse("add"), Ok(OpKind::Add));
        assert_eq!(OpKind::parse("syscall"), Ok(OpKind::Syscall));
        assert_eq!(OpKind::parse("j"), Ok(OpKind::J));
        assert!(OpKind::parse("li").is_err());
        assert!(OpKind::parse("ADD").is_err());
        assert!(OpKind::parse("hoge").is_err());
    }

    #[test]
    fn test_name_roundtrip() {
        for op in OpKind::iter() {
            assert_eq!(OpKind::parse(op.name()), Ok(op));
        }
    }

    #[test]
    fn test_funct_matches_layout() {
        for op in OpKind::iter() {
            assert!(op.opcode() < 64);
            let needs_funct = matches!(
                op.layout(),
                Layout::DST | Layout::ST | Layout::S | Layout::DTSHA | Layout::SYSCALL
            );
            assert_eq!(op.funct().is_some(), needs_funct, "{}", op);
            if let Some(funct) = op.funct() {
                assert_eq!(op.opcode(), 0, "{}", op);
                assert!(funct < 64);
            }
        }
    }
}
