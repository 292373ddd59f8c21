use arch::field::{self, WORD_BITS};
use arch::layout::Layout;
use arch::op::OpKind;
use arch::pseudo::Pseudo;
use arch::reg::Reg;
use color_print::cformat;
use serde::Serialize;
use std::fmt::Display;

use crate::error::Error;
use crate::operand::{self, Resolved, Slot, Symbols};

// ----------------------------------------------------------------------------
// Instruction Record

/// One encoded statement. Built once by [`InstructionBuilder`], never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instruction {
    stmt: String,
    op: OpKind,
    layout: Layout,
    rd: Option<Reg>,
    rs: Option<Reg>,
    rt: Option<Reg>,
    imm: Option<i64>,
    imm_bits: Option<String>,
    label: Option<String>,
    data: Option<String>,
    address: u32,
    machine: String,
}

impl Instruction {
    pub fn stmt(&self) -> &str {
        &self.stmt
    }
    pub fn op(&self) -> OpKind {
        self.op
    }
    pub fn layout(&self) -> Layout {
        self.layout
    }
    pub fn rd(&self) -> Option<Reg> {
        self.rd
    }
    pub fn rs(&self) -> Option<Reg> {
        self.rs
    }
    pub fn rt(&self) -> Option<Reg> {
        self.rt
    }
    pub fn imm(&self) -> Option<i64> {
        self.imm
    }
    pub fn imm_bits(&self) -> Option<&str> {
        self.imm_bits.as_deref()
    }
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }
    pub fn address(&self) -> u32 {
        self.address
    }
    /// 32 characters of `0`/`1`.
    pub fn machine(&self) -> &str {
        &self.machine
    }
    pub fn word(&self) -> u32 {
        // machine is checked to be 32 binary digits on construction
        field::word(&self.machine).unwrap_or_default()
    }
}

impl Instruction {
    pub fn cformat(&self) -> String {
        let reg = |r: Option<Reg>| r.map(|r| r.name()).unwrap_or("");
        let imm = match (&self.imm, &self.label, &self.data) {
            (Some(v), Some(label), _) => cformat!("<g>{}({})</>", v, label),
            (Some(v), _, Some(data)) => cformat!("<c>{}({})</>", v, data),
            (Some(v), _, _) => cformat!("<y>{}</>", v),
            _ => String::new(),
        };
        cformat!(
            "<r>{:<8}</><b>{:<6}{:<6}{:<6}</>{}",
            self.op.name(),
            reg(self.rd),
            reg(self.rs),
            reg(self.rt),
            imm
        )
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "0x{:08X}  {}  {:<7} {}",
            self.address, self.machine, self.layout, self.stmt
        )
    }
}

// ----------------------------------------------------------------------------
// Builder

pub struct InstructionBuilder {
    stmt: String,
    op: OpKind,
    address: u32,
    rd: Option<Reg>,
    rs: Option<Reg>,
    rt: Option<Reg>,
    imm: Option<Resolved>,
}

impl InstructionBuilder {
    pub fn new(stmt: &str, op: OpKind, address: u32) -> Self {
        InstructionBuilder {
            stmt: stmt.to_string(),
            op,
            address,
            rd: None,
            rs: None,
            rt: None,
            imm: None,
        }
    }

    pub fn rd(mut self, reg: Reg) -> Self {
        self.rd = Some(reg);
        self
    }

    pub fn rs(mut self, reg: Reg) -> Self {
        self.rs = Some(reg);
        self
    }

    pub fn rt(mut self, reg: Reg) -> Self {
        self.rt = Some(reg);
        self
    }

    pub fn imm(mut self, imm: Resolved) -> Self {
        self.imm = Some(imm);
        self
    }

    /// Concatenate the fields in layout order and finish the record.
    pub fn build(self) -> Result<Instruction, Error> {
        const ZERO5: &str = "00000";
        let op = self.op;
        let opcode = field::to_bits(op.opcode() as i64, 6);
        let funct = op
            .funct()
            .map(|f| field::to_bits(f as i64, 6))
            .unwrap_or_default();
        let bits = |r: Option<Reg>| r.map(|r| r.bits()).unwrap_or_else(|| ZERO5.to_string());
        let (rd, rs, rt) = (bits(self.rd), bits(self.rs), bits(self.rt));
        let imm = self
            .imm
            .as_ref()
            .map(|imm| imm.bits.clone())
            .unwrap_or_default();
        let (opcode, funct, imm) = (opcode.as_str(), funct.as_str(), imm.as_str());
        let (rd, rs, rt) = (rd.as_str(), rs.as_str(), rt.as_str());

        let fields: Vec<&str> = match op.layout() {
            Layout::DST => vec![opcode, rs, rt, rd, ZERO5, funct],
            Layout::ST => vec![opcode, rs, rt, "0000000000", funct],
            Layout::S => vec![opcode, rs, "000000000000000", funct],
            Layout::DTSHA => vec![opcode, ZERO5, rt, rd, imm, funct],
            Layout::TSIMM | Layout::STOFF | Layout::TOFFS => vec![opcode, rs, rt, imm],
            Layout::TIMM => vec![opcode, ZERO5, rt, imm],
            Layout::SOFF => vec![opcode, rs, ZERO5, imm],
            Layout::TARG => vec![opcode, imm],
            Layout::SYSCALL => vec![opcode, "00000000000000000000", funct],
        };
        let machine = fields.concat();
        if machine.len() != WORD_BITS {
            return Err(Error::MachineLength(machine.len(), self.stmt));
        }

        let (imm, imm_bits, label, data) = match self.imm {
            Some(r) => (Some(r.value), Some(r.bits), r.label, r.data),
            None => (None, None, None, None),
        };

        Ok(Instruction {
            stmt: self.stmt,
            op,
            layout: op.layout(),
            rd: self.rd,
            rs: self.rs,
            rt: self.rt,
            imm,
            imm_bits,
            label,
            data,
            address: self.address,
            machine,
        })
    }
}

// ----------------------------------------------------------------------------
// Encoder

/// Reserved base register for bare data-symbol operands.
const DATA_BASE: Reg = Reg::AT;

/// Split `offset($reg)` into its parts. `None` when there are no parentheses.
fn split_base(tok: &str) -> Option<(&str, &str)> {
    let open = tok.find('(')?;
    let close = tok.rfind(')')?;
    if close < open || close != tok.len() - 1 {
        return None;
    }
    Some((&tok[..open], &tok[open + 1..close]))
}

/// Encode one real (non-pseudo) statement located at `pc`.
pub fn encode(stmt: &str, pc: u32, symbols: &Symbols) -> Result<Instruction, Error> {
    let tokens: Vec<&str> = stmt.split_whitespace().collect();
    let Some(mnemonic) = tokens.first() else {
        return Err(Error::UnknownMnemonic(String::new()));
    };
    let op = match OpKind::parse(mnemonic) {
        Ok(op) => op,
        Err(_) if Pseudo::parse(mnemonic).is_some() => {
            return Err(Error::UnsupportedPseudo(stmt.to_string()))
        }
        Err(_) => return Err(Error::UnknownMnemonic(mnemonic.to_string())),
    };

    let layout = op.layout();
    if tokens.len() != layout.token_count() {
        return Err(Error::TokenCount {
            stmt: stmt.to_string(),
            expected: layout.token_count(),
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
        });
    }

    let reg = |idx: usize| operand::register(tokens[idx]);
    let val = |idx: usize, slot: Slot| symbols.resolve(tokens[idx], slot, pc, stmt);
    let inst = InstructionBuilder::new(stmt, op, pc);

    let inst = match layout {
        Layout::DST => inst.rd(reg(1)?).rs(reg(2)?).rt(reg(3)?),
        Layout::ST => inst.rs(reg(1)?).rt(reg(2)?),
        Layout::S => inst.rs(reg(1)?),
        Layout::DTSHA => inst.rd(reg(1)?).rt(reg(2)?).imm(val(3, Slot::Shamt)?),
        Layout::TSIMM => inst.rt(reg(1)?).rs(reg(2)?).imm(val(3, Slot::Immediate)?),
        Layout::TIMM => inst.rt(reg(1)?).imm(val(2, Slot::Immediate)?),
        Layout::STOFF => inst.rs(reg(1)?).rt(reg(2)?).imm(val(3, Slot::Branch)?),
        Layout::SOFF => inst.rs(reg(1)?).imm(val(2, Slot::Branch)?),
        Layout::TARG => inst.imm(val(1, Slot::Jump)?),
        Layout::SYSCALL => inst,
        Layout::TOFFS => {
            let inst = inst.rt(reg(1)?);
            match split_base(tokens[2]) {
                Some((offset, base)) => {
                    let offset = if offset.is_empty() { "0" } else { offset };
                    inst.imm(symbols.resolve(offset, Slot::Memory, pc, stmt)?)
                        .rs(operand::register(base)?)
                }
                None if symbols.data.contains(tokens[2]) => {
                    inst.imm(val(2, Slot::Memory)?).rs(DATA_BASE)
                }
                None => return Err(Error::InvalidOffset(tokens[2].to_string())),
            }
        }
    };

    inst.build()
}
