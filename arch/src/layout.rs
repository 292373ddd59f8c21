use serde::Serialize;
use strum::{Display, EnumIter};

/// Operand shape of a mnemonic. Decides the token count and the order in
/// which fields are packed into the machine word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter)]
#[allow(clippy::upper_case_acronyms)]
pub enum Layout {
    /// `op $d $s $t`
    DST,
    /// `op $s $t`
    ST,
    /// `op $s`
    S,
    /// `op $d $t shamt`
    DTSHA,
    /// `op $t $s imm`
    TSIMM,
    /// `op $t imm`
    TIMM,
    /// `op $s $t offset`
    STOFF,
    /// `op $t offset($s)` or `op $t symbol`
    TOFFS,
    /// `op $s offset`
    SOFF,
    /// `op target`
    TARG,
    /// `op`
    SYSCALL,
}

pub enum Arg {
    Rd,
    Rs,
    Rt,
    Shamt,
    Imm,
    Offset,
    Addr,
    Target,
}

impl Layout {
    pub fn arg_field(&self) -> &'static [Arg] {
        use Layout::*;
        match self {
            DST => &[Arg::Rd, Arg::Rs, Arg::Rt],
            ST => &[Arg::Rs, Arg::Rt],
            S => &[Arg::Rs],
            DTSHA => &[Arg::Rd, Arg::Rt, Arg::Shamt],
            TSIMM => &[Arg::Rt, Arg::Rs, Arg::Imm],
            TIMM => &[Arg::Rt, Arg::Imm],
            STOFF => &[Arg::Rs, Arg::Rt, Arg::Offset],
            TOFFS => &[Arg::Rt, Arg::Addr],
            SOFF => &[Arg::Rs, Arg::Offset],
            TARG => &[Arg::Target],
            SYSCALL => &[],
        }
    }

    /// Tokens of a statement in this layout, mnemonic included.
    pub fn token_count(&self) -> usize {
        self.arg_field().len() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_count() {
        assert_eq!(Layout::DST.token_count(), 4);
        assert_eq!(Layout::ST.token_count(), 3);
        assert_eq!(Layout::S.token_count(), 2);
        assert_eq!(Layout::DTSHA.token_count(), 4);
        assert_eq!(Layout::TSIMM.token_count(), 4);
        assert_eq!(Layout::TIMM.token_count(), 3);
        assert_eq!(Layout::STOFF.token_count(), 4);
        assert_eq!(Layout::TOFFS.token_count(), 3);
        assert_eq!(Layout::SOFF.token_count(), 3);
        assert_eq!(Layout::TARG.token_count(), 2);
        assert_eq!(Layout::SYSCALL.token_count(), 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(Layout::TSIMM.to_string(), "TSIMM");
    }
}
