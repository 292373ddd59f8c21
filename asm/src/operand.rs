use arch::field;
use arch::reg::Reg;

use crate::config::{Config, WORD};
use crate::error::Error;
use crate::table::{DataEntry, DataTable, Labels};

// ----------------------------------------------------------------------------
// Numeric literal

/// Decimal or `0x` hexadecimal literal, optionally negative. Hex values up
/// to `0xFFFFFFFF` are read as 32-bit two's complement.
pub fn parse_number(s: &str) -> Option<i64> {
    let (neg, body) = match s.strip_prefix('-') {
        Some(body) => (true, body),
        None => (false, s),
    };
    let value = match body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        Some(hex) => {
            if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return None;
            }
            match u64::from_str_radix(hex, 16) {
                Ok(v) if v <= u32::MAX as u64 => v as u32 as i32 as i64,
                Ok(v) => i64::try_from(v).unwrap_or(i64::MAX),
                Err(_) => i64::MAX,
            }
        }
        None => {
            if body.is_empty() || !body.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            body.parse::<i64>().unwrap_or(i64::MAX)
        }
    };
    Some(if neg { -value } else { value })
}

pub fn register(tok: &str) -> Result<Reg, Error> {
    Reg::parse(tok).map_err(|_| Error::InvalidRegister(tok.to_string()))
}

// ----------------------------------------------------------------------------
// Operand slot

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// 16-bit signed, literal only
    Immediate,
    /// 5-bit unsigned, literal only
    Shamt,
    /// 16-bit signed, labels are PC-relative word distances
    Branch,
    /// 16-bit signed, `offset` part of `offset($s)`
    Memory,
    /// 26-bit unsigned, labels are absolute addresses
    Jump,
}

impl Slot {
    pub fn width(&self) -> usize {
        match self {
            Slot::Immediate | Slot::Branch | Slot::Memory => 16,
            Slot::Shamt => 5,
            Slot::Jump => 26,
        }
    }

    fn fits(&self, value: i64) -> bool {
        match self {
            Slot::Shamt | Slot::Jump => field::fits_unsigned(value, self.width()),
            _ => field::fits_signed(value, self.width()),
        }
    }

    fn literal_only(&self) -> bool {
        matches!(self, Slot::Immediate | Slot::Shamt)
    }
}

// ----------------------------------------------------------------------------
// Symbol lookup

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol<'a> {
    Literal(i64),
    Data(&'a DataEntry),
    Label(&'a str, u32),
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub value: i64,
    pub bits: String,
    pub label: Option<String>,
    pub data: Option<String>,
}

/// Read-only view of everything pass 1 produced.
#[derive(Debug, Clone, Copy)]
pub struct Symbols<'a> {
    pub labels: &'a Labels,
    pub data: &'a DataTable,
    pub config: &'a Config,
}

impl<'a> Symbols<'a> {
    pub fn new(labels: &'a Labels, data: &'a DataTable, config: &'a Config) -> Self {
        Symbols {
            labels,
            data,
            config,
        }
    }

    pub fn classify<'t>(&self, tok: &'t str) -> Symbol<'t>
    where
        'a: 't,
    {
        if let Some(value) = parse_number(tok) {
            return Symbol::Literal(value);
        }
        if let Some(entry) = self.data.get(tok) {
            return Symbol::Data(entry);
        }
        if let Some(addr) = self.labels.get(tok) {
            return Symbol::Label(tok, addr);
        }
        Symbol::NotFound
    }

    /// Offset of a data entry from the data segment base.
    pub fn data_offset(&self, entry: &DataEntry) -> i64 {
        entry.address as i64 - self.config.data_start as i64
    }

    pub fn resolve(&self, tok: &str, slot: Slot, pc: u32, stmt: &str) -> Result<Resolved, Error> {
        let (value, label, data) = match self.classify(tok) {
            Symbol::Literal(value) => (value, None, None),
            _ if slot.literal_only() => return Err(Error::InvalidImmediate(tok.to_string())),
            Symbol::Data(entry) => (self.data_offset(entry), None, Some(entry.label.clone())),
            Symbol::Label(name, addr) => {
                let value = match slot {
                    Slot::Jump => addr as i64,
                    _ => {
                        let distance = addr as i64 - (pc as i64 + WORD as i64);
                        if distance % WORD as i64 != 0 {
                            return Err(Error::MisalignedOffset {
                                label: name.to_string(),
                                distance,
                            });
                        }
                        distance / WORD as i64
                    }
                };
                (value, Some(name.to_string()), None)
            }
            Symbol::NotFound => return Err(Error::InvalidOffset(tok.to_string())),
        };

        if !slot.fits(value) {
            return Err(Error::OutOfRange {
                stmt: stmt.to_string(),
                value,
                width: slot.width(),
            });
        }

        Ok(Resolved {
            value,
            bits: field::to_bits(value, slot.width()),
            label,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> (Labels, DataTable, Config) {
        let config = Config::default();
        let mut labels = Labels::new();
        labels.insert("main".to_string(), 0x00400000);
        labels.insert("done".to_string(), 0x00400010);
        let mut data = DataTable::new();
        data.insert(DataEntry::parse("first: .word 1", 0x10010000).unwrap());
        data.insert(DataEntry::parse("myvar: .word 7", 0x10010004).unwrap());
        (labels, data, config)
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("0"), Some(0));
        assert_eq!(parse_number("100000"), Some(100000));
        assert_eq!(parse_number("-12"), Some(-12));
        assert_eq!(parse_number("0x10"), Some(16));
        assert_eq!(parse_number("0XfF"), Some(255));
        assert_eq!(parse_number("0xFFFFFFFF"), Some(-1));
        assert_eq!(parse_number("-0x8000"), Some(-32768));
        assert_eq!(parse_number("0x"), None);
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number("12ab"), None);
        assert_eq!(parse_number("main"), None);
        assert_eq!(parse_number("$t0"), None);
    }

    #[test]
    fn test_classify() {
        let (labels, data, config) = tables();
        let symbols = Symbols::new(&labels, &data, &config);
        assert_eq!(symbols.classify("42"), Symbol::Literal(42));
        assert!(matches!(symbols.classify("myvar"), Symbol::Data(e) if e.address == 0x10010004));
        assert_eq!(symbols.classify("done"), Symbol::Label("done", 0x00400010));
        assert_eq!(symbols.classify("nowhere"), Symbol::NotFound);
    }

    #[test]
    fn test_forward_branch() {
        let (labels, data, config) = tables();
        let symbols = Symbols::new(&labels, &data, &config);
        let res = symbols.resolve("done", Slot::Branch, 0x00400000, "beq").unwrap();
        assert_eq!(res.value, 3);
        assert_eq!(res.bits, "0000000000000011");
        assert_eq!(res.label.as_deref(), Some("done"));
        assert_eq!(res.data, None);
    }

    #[test]
    fn test_backward_branch() {
        let (labels, data, config) = tables();
        let symbols = Symbols::new(&labels, &data, &config);
        let res = symbols.resolve("main", Slot::Branch, 0x00400008, "bne").unwrap();
        assert_eq!(res.value, -3);
        assert_eq!(res.bits, "1111111111111101");
    }

    #[test]
    fn test_data_offset() {
        let (labels, data, config) = tables();
        let symbols = Symbols::new(&labels, &data, &config);
        let res = symbols.resolve("myvar", Slot::Memory, 0x00400000, "lw").unwrap();
        assert_eq!(res.value, 4);
        assert_eq!(res.data.as_deref(), Some("myvar"));
    }

    #[test]
    fn test_jump_is_absolute() {
        let (labels, data, config) = tables();
        let symbols = Symbols::new(&labels, &data, &config);
        let res = symbols.resolve("done", Slot::Jump, 0x00400020, "j").unwrap();
        assert_eq!(res.value, 0x00400010);
        assert_eq!(res.bits.len(), 26);
    }

    #[test]
    fn test_misaligned_label() {
        let (mut labels, data, config) = tables();
        labels.insert("odd".to_string(), 0x00400006);
        let symbols = Symbols::new(&labels, &data, &config);
        assert!(matches!(
            symbols.resolve("odd", Slot::Branch, 0x00400000, "beq"),
            Err(Error::MisalignedOffset { distance: 2, .. })
        ));
    }

    #[test]
    fn test_range() {
        let (labels, data, config) = tables();
        let symbols = Symbols::new(&labels, &data, &config);
        assert!(symbols.resolve("32767", Slot::Immediate, 0, "addi").is_ok());
        assert!(matches!(
            symbols.resolve("32768", Slot::Immediate, 0, "addi"),
            Err(Error::OutOfRange { value: 32768, width: 16, .. })
        ));
        assert!(symbols.resolve("31", Slot::Shamt, 0, "sll").is_ok());
        assert!(matches!(
            symbols.resolve("32", Slot::Shamt, 0, "sll"),
            Err(Error::OutOfRange { width: 5, .. })
        ));
        assert!(matches!(
            symbols.resolve("0x4000000", Slot::Jump, 0, "j"),
            Err(Error::OutOfRange { width: 26, .. })
        ));
    }

    #[test]
    fn test_not_found() {
        let (labels, data, config) = tables();
        let symbols = Symbols::new(&labels, &data, &config);
        assert!(matches!(
            symbols.resolve("nowhere", Slot::Branch, 0, "beq"),
            Err(Error::InvalidOffset(_))
        ));
        assert!(matches!(
            symbols.resolve("main", Slot::Immediate, 0, "addi"),
            Err(Error::InvalidImmediate(_))
        ));
    }
}
