use arch::field;
use arch::pseudo::Pseudo;

use crate::error::Error;
use crate::operand::{self, parse_number};
use crate::table::DataTable;

/// Split a 32-bit value into the signed 16-bit halves written to `lui`/`ori`.
fn split(value: u32) -> (i16, i16) {
    ((value >> 16) as u16 as i16, (value & 0xFFFF) as u16 as i16)
}

fn check_shape(pseudo: Pseudo, tokens: &[&str], stmt: &str) -> Result<(), Error> {
    if !pseudo.is_supported() {
        return Err(Error::UnsupportedPseudo(stmt.to_string()));
    }
    if tokens.len() != 3 {
        return Err(Error::MalformedPseudo(stmt.to_string()));
    }
    operand::register(tokens[1])?;
    Ok(())
}

fn li_value(tok: &str, stmt: &str) -> Result<i64, Error> {
    let value = parse_number(tok).ok_or_else(|| Error::InvalidImmediate(tok.to_string()))?;
    if !field::fits_signed(value, 32) && !field::fits_unsigned(value, 32) {
        return Err(Error::OutOfRange {
            stmt: stmt.to_string(),
            value,
            width: 32,
        });
    }
    Ok(value)
}

/// Number of real instructions the statement occupies. Needs no symbol table,
/// so pass 1 can call it before data symbols are known.
pub fn slots(pseudo: Pseudo, stmt: &str) -> Result<u32, Error> {
    let tokens: Vec<&str> = stmt.split_whitespace().collect();
    check_shape(pseudo, &tokens, stmt)?;
    match pseudo {
        Pseudo::Li if field::fits_signed(li_value(tokens[2], stmt)?, 16) => Ok(1),
        _ => Ok(2),
    }
}

/// Rewrite a pseudo-instruction into the real statements it stands for.
pub fn expand(pseudo: Pseudo, stmt: &str, data: &DataTable) -> Result<Vec<String>, Error> {
    let tokens: Vec<&str> = stmt.split_whitespace().collect();
    check_shape(pseudo, &tokens, stmt)?;
    let reg = tokens[1];

    let value = match pseudo {
        Pseudo::Li => {
            let value = li_value(tokens[2], stmt)?;
            if field::fits_signed(value, 16) {
                return Ok(vec![format!("addi {} $zero {}", reg, value)]);
            }
            value as u32
        }
        Pseudo::La => match data.get(tokens[2]) {
            Some(entry) => entry.address,
            None => return Err(Error::UndefinedSymbol(tokens[2].to_string())),
        },
        _ => return Err(Error::UnsupportedPseudo(stmt.to_string())),
    };

    let (upper, lower) = split(value);
    Ok(vec![
        format!("lui {} {}", reg, upper),
        format!("ori {} {} {}", reg, reg, lower),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::DataEntry;

    fn data() -> DataTable {
        let mut data = DataTable::new();
        data.insert(DataEntry::parse("msg: .asciiz \"hi\"", 0x10010004).unwrap());
        data
    }

    #[test]
    fn test_li_small() {
        assert_eq!(slots(Pseudo::Li, "li $t0 100").unwrap(), 1);
        assert_eq!(
            expand(Pseudo::Li, "li $t0 100", &data()).unwrap(),
            vec!["addi $t0 $zero 100"]
        );
        assert_eq!(
            expand(Pseudo::Li, "li $t0 -5", &data()).unwrap(),
            vec!["addi $t0 $zero -5"]
        );
    }

    #[test]
    fn test_li_large() {
        // 100000 = 0x000186A0
        assert_eq!(slots(Pseudo::Li, "li $t0 100000").unwrap(), 2);
        assert_eq!(
            expand(Pseudo::Li, "li $t0 100000", &data()).unwrap(),
            vec!["lui $t0 1", "ori $t0 $t0 -31072"]
        );
        assert_eq!(
            expand(Pseudo::Li, "li $s0 0x12345678", &data()).unwrap(),
            vec!["lui $s0 4660", "ori $s0 $s0 22136"]
        );
    }

    #[test]
    fn test_la() {
        assert_eq!(slots(Pseudo::La, "la $a0 msg").unwrap(), 2);
        // 0x10010004
        assert_eq!(
            expand(Pseudo::La, "la $a0 msg", &data()).unwrap(),
            vec!["lui $a0 4097", "ori $a0 $a0 4"]
        );
        assert!(matches!(
            expand(Pseudo::La, "la $a0 nothing", &data()),
            Err(Error::UndefinedSymbol(_))
        ));
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(
            slots(Pseudo::Li, "li $t0"),
            Err(Error::MalformedPseudo(_))
        ));
        assert!(matches!(
            expand(Pseudo::La, "la $a0 msg extra", &data()),
            Err(Error::MalformedPseudo(_))
        ));
        assert!(matches!(
            slots(Pseudo::Li, "li $t0 label"),
            Err(Error::InvalidImmediate(_))
        ));
        assert!(matches!(
            slots(Pseudo::Li, "li $bad 1"),
            Err(Error::InvalidRegister(_))
        ));
        assert!(matches!(
            slots(Pseudo::Li, "li $t0 0x100000000"),
            Err(Error::OutOfRange { width: 32, .. })
        ));
    }

    #[test]
    fn test_unsupported() {
        for stmt in ["move $t0 $t1", "blt $t0 $t1 loop", "not $t0 $t1", "beqz $t0 done"] {
            let pseudo = Pseudo::parse(stmt.split(' ').next().unwrap()).unwrap();
            assert!(matches!(
                slots(pseudo, stmt),
                Err(Error::UnsupportedPseudo(_))
            ));
        }
    }
}
