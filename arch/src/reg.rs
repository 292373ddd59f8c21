use bimap::BiMap;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use once_cell::sync::Lazy;
use serde::{Serialize, Serializer};
use std::fmt::Display;

use crate::field;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Reg {
    ZERO,
    AT,
    V0,
    V1,
    A0,
    A1,
    A2,
    A3,
    T0,
    T1,
    T2,
    T3,
    T4,
    T5,
    T6,
    T7,
    S0,
    S1,
    S2,
    S3,
    S4,
    S5,
    S6,
    S7,
    T8,
    T9,
    K0,
    K1,
    GP,
    SP,
    FP,
    RA,
}

static REG_MAP: Lazy<BiMap<&'static str, Reg>> = Lazy::new(|| {
    let mut map: BiMap<&'static str, Reg> = BiMap::new();
    map.insert("$zero", Reg::ZERO);
    map.insert("$at", Reg::AT);
    map.insert("$v0", Reg::V0);
    map.insert("$v1", Reg::V1);
    map.insert("$a0", Reg::A0);
    map.insert("$a1", Reg::A1);
    map.insert("$a2", Reg::A2);
    map.insert("$a3", Reg::A3);
    map.insert("$t0", Reg::T0);
    map.insert("$t1", Reg::T1);
    map.insert("$t2", Reg::T2);
    map.insert("$t3", Reg::T3);
    map.insert("$t4", Reg::T4);
    map.insert("$t5", Reg::T5);
    map.insert("$t6", Reg::T6);
    map.insert("$t7", Reg::T7);
    map.insert("$s0", Reg::S0);
    map.insert("$s1", Reg::S1);
    map.insert("$s2", Reg::S2);
    map.insert("$s3", Reg::S3);
    map.insert("$s4", Reg::S4);
    map.insert("$s5", Reg::S5);
    map.insert("$s6", Reg::S6);
    map.insert("$s7", Reg::S7);
    map.insert("$t8", Reg::T8);
    map.insert("$t9", Reg::T9);
    map.insert("$k0", Reg::K0);
    map.insert("$k1", Reg::K1);
    map.insert("$gp", Reg::GP);
    map.insert("$sp", Reg::SP);
    map.insert("$fp", Reg::FP);
    map.insert("$ra", Reg::RA);
    map
});

impl Reg {
    pub fn parse(s: &str) -> Result<Reg, String> {
        match REG_MAP.get_by_left(s) {
            Some(reg) => Ok(*reg),
            None => Err(format!("Unknown register name: `{}`", s)),
        }
    }

    pub fn from_index(idx: u8) -> Result<Reg, String> {
        Reg::try_from(idx).map_err(|_| format!("Register index out of range: {}", idx))
    }

    pub fn name(&self) -> &'static str {
        // Every variant is inserted into REG_MAP above.
        REG_MAP.get_by_right(self).copied().unwrap_or("$?")
    }

    pub fn index(&self) -> u8 {
        (*self).into()
    }

    /// 5-bit encoding, e.g. `$t0` -> `01000`.
    pub fn bits(&self) -> String {
        field::to_bits(self.index() as i64, 5)
    }
}

impl Display for Reg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for Reg {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
