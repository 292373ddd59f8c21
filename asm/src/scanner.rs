use arch::pseudo::Pseudo;
use arch::section::Section;
use serde::Serialize;

use crate::config::{Config, WORD};
use crate::encode::{encode, Instruction};
use crate::error::Error;
use crate::msg::Msg;
use crate::operand::Symbols;
use crate::pseudo;
use crate::table::{DataEntry, DataTable, Labels};

/// Instruction statement found in the text section, label stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stmt {
    pub line: usize,
    pub code: String,
}

/// Everything pass 1 discovers.
#[derive(Debug, Clone, Default)]
pub struct Collected {
    pub labels: Labels,
    pub data: DataTable,
    pub global: Option<String>,
    pub stmts: Vec<Stmt>,
    pub msgs: Vec<Msg>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Program {
    pub global: Option<String>,
    pub labels: Labels,
    pub data: DataTable,
    pub instructions: Vec<Instruction>,
    #[serde(skip)]
    pub msgs: Vec<Msg>,
}

/// `main:` -> `main`
fn label_def(word: &str) -> Option<&str> {
    let name = word.strip_suffix(':')?;
    if name.is_empty() || name.contains(':') {
        None
    } else {
        Some(name)
    }
}

// ----------------------------------------------------------------------------
// Pass 1: addresses and symbols

pub fn collect<S: AsRef<str>>(lines: &[S], config: &Config) -> Result<Collected, Error> {
    config.validate()?;

    let mut out = Collected::default();
    let mut pc = config.pc_start;
    let mut data_addr = config.data_start;
    let mut section = Section::None;

    for (idx, line) in lines.iter().enumerate() {
        let line = line.as_ref().trim();
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some(head) = words.first() else {
            continue;
        };

        // .globl main
        if *head == ".globl" {
            match words.as_slice() {
                [_, sym] => out.global = Some(sym.to_string()),
                _ => out
                    .msgs
                    .push(Msg::warn(idx, format!("Malformed directive: `{}`", line))),
            }
            continue;
        }

        // .text / .data / .bss / .rodata
        if let Some(next) = Section::parse(head) {
            if words.len() == 1 {
                section = next;
            } else {
                out.msgs
                    .push(Msg::warn(idx, format!("Malformed directive: `{}`", line)));
            }
            continue;
        }

        match section {
            Section::None => {
                out.msgs.push(Msg::warn(
                    idx,
                    format!("Statement outside of any section: `{}`", line),
                ));
            }
            Section::Bss | Section::Rodata => {
                out.msgs.push(Msg::warn(
                    idx,
                    format!("{} section is not implemented, line skipped", section),
                ));
            }
            Section::Text => {
                let mut code = line;
                if let Some(name) = label_def(head) {
                    if out.labels.insert(name.to_string(), pc).is_some() {
                        return Err(Error::RedefinedLabel(name.to_string()).at(idx));
                    }
                    code = line[head.len()..].trim_start();
                    if code.is_empty() {
                        continue;
                    }
                }
                let mnemonic = code.split_whitespace().next().unwrap_or_default();
                let slots = match Pseudo::parse(mnemonic) {
                    Some(p) => pseudo::slots(p, code).map_err(|e| e.at(idx))?,
                    None => 1,
                };
                out.stmts.push(Stmt {
                    line: idx,
                    code: code.to_string(),
                });
                pc = pc.wrapping_add(slots * WORD);
            }
            Section::Data => {
                let entry = DataEntry::parse(line, data_addr)
                    .ok_or_else(|| Error::MalformedData(line.to_string()).at(idx))?;
                if entry.address as u64 + WORD as u64 > config.data_end() {
                    return Err(Error::DataSegmentOverflow(entry.label, entry.address).at(idx));
                }
                if let Some(prev) = out.data.insert(entry) {
                    return Err(Error::RedefinedLabel(prev.label).at(idx));
                }
                data_addr = data_addr.wrapping_add(WORD);
            }
        }
    }

    if let Some(name) = out.labels.iter().map(|(name, _)| name).find(|n| out.data.contains(n)) {
        return Err(Error::AmbiguousSymbol(name.clone()));
    }

    if let Some(global) = &out.global {
        if !out.labels.contains(global) {
            out.msgs.push(Msg::note(
                0,
                format!("Entry symbol `{}` is not defined in .text", global),
            ));
        }
    }

    Ok(out)
}

// ----------------------------------------------------------------------------
// Pass 2: realization and encoding

pub fn realize(collected: Collected, config: &Config) -> Result<Program, Error> {
    let symbols = Symbols::new(&collected.labels, &collected.data, config);
    let mut pc = config.pc_start;
    let mut instructions = vec![];

    for stmt in &collected.stmts {
        let mnemonic = stmt.code.split_whitespace().next().unwrap_or_default();
        let realized = match Pseudo::parse(mnemonic) {
            Some(p) => pseudo::expand(p, &stmt.code, &collected.data).map_err(|e| e.at(stmt.line))?,
            None => vec![stmt.code.clone()],
        };
        for code in &realized {
            let inst = encode(code, pc, &symbols).map_err(|e| e.at(stmt.line))?;
            instructions.push(inst);
            pc = pc.wrapping_add(WORD);
        }
    }

    Ok(Program {
        global: collected.global,
        labels: collected.labels,
        data: collected.data,
        instructions,
        msgs: collected.msgs,
    })
}

/// Run both passes over cleaned statement lines.
pub fn assemble<S: AsRef<str>>(lines: &[S], config: &Config) -> Result<Program, Error> {
    let collected = collect(lines, config)?;
    realize(collected, config)
}
