use color_print::cformat;

use crate::scanner::Program;

const RULE: &str = "-------------------+-----------------------------------------------------";

fn header(title: &str) -> String {
    format!("{}+------[{}]{}", "-".repeat(19), title, "-".repeat(45 - title.len()))
}

fn bytes(word: u32) -> String {
    format!(
        "{:02X} {:02X} {:02X} {:02X}",
        (word >> 24) & 0xFF,
        (word >> 16) & 0xFF,
        (word >> 8) & 0xFF,
        word & 0xFF
    )
}

/// Colored listing of the symbol tables and every encoded instruction.
pub fn render(program: &Program) -> Vec<String> {
    let mut out = vec![];

    out.push(header("data"));
    for entry in program.data.iter() {
        out.push(format!(
            "[{:08X}]{:10}| {} {}",
            entry.address,
            "",
            cformat!("<c>{}:</>", entry.label),
            cformat!("<y>{} {}</>", entry.directive, entry.value),
        ));
    }

    out.push(header("text"));
    for inst in &program.instructions {
        for (name, _) in program.labels.iter().filter(|(_, addr)| **addr == inst.address()) {
            let mark = match &program.global {
                Some(global) if global == name => cformat!("<g,s>{}:</> <s>(entry)</>", name),
                _ => cformat!("<g>{}:</>", name),
            };
            out.push(format!("{:19}| {}", "", mark));
        }
        out.push(format!(
            "[{:08X}] {} |   {}",
            inst.address(),
            bytes(inst.word()),
            inst.cformat()
        ));
    }

    out.push(RULE.to_string());
    out
}

pub fn print_dump(program: &Program) {
    for line in render(program) {
        println!("{}", line);
    }
}
