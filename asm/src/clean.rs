//! Source line cleanup: the assembler core only ever sees statements that
//! went through [`clean_line`].

/// Strip `#` comments, turn commas into spaces, put a space after every `:`
/// and collapse runs of whitespace into a single space.
pub fn clean_line(raw: &str) -> String {
    let code = match raw.split_once('#') {
        Some((code, _)) => code,
        None => raw,
    };
    let code: String = code
        .chars()
        .flat_map(|c| match c {
            ',' => vec![' '],
            ':' => vec![':', ' '],
            c => vec![c],
        })
        .collect();
    code.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn clean_lines<S: AsRef<str>>(raws: &[S]) -> Vec<String> {
    raws.iter().map(|raw| clean_line(raw.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_clean {
        ($($name:ident: $raw:expr => $clean:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    assert_eq!(clean_line($raw), $clean);
                }
            )*
        }
    }

    test_clean! {
        test_commas: "add $t0, $t1, $t2" => "add $t0 $t1 $t2",
        test_comment: "addi $t0, $zero, 5   # five" => "addi $t0 $zero 5",
        test_comment_only: "# nothing here" => "",
        test_label_glued: "main:li $v0, 10" => "main: li $v0 10",
        test_label_spaced: "  loop:   beq $t0, $t1, done" => "loop: beq $t0 $t1 done",
        test_commas_glued: "sub $t0,$t1,$t2" => "sub $t0 $t1 $t2",
        test_tabs: "\tlw\t$t0,\t4($sp)" => "lw $t0 4($sp)",
        test_data: "msg: .asciiz \"hi\"" => "msg: .asciiz \"hi\"",
        test_blank: "   " => "",
    }
}
