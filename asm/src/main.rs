use std::io::{BufRead, Write};

use mipsasm::clean::clean_lines;
use mipsasm::config::Config;
use mipsasm::error::Error;
use mipsasm::{dump, msg, scanner};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file
    #[clap(default_value = "main.asm")]
    input: String,

    /// Output file
    #[clap(short, long, default_value = "main.asm.txt")]
    output: String,

    /// Write little-endian words instead of binary strings
    #[clap(long)]
    raw: bool,

    /// Address layout (YAML)
    #[clap(short, long)]
    config: Option<String>,

    /// Dump assembled program
    #[clap(short, long)]
    dump: bool,

    /// Serialize symbol tables and instructions to YAML
    #[clap(long)]
    yaml: Option<String>,
}

fn read_lines(path: &str) -> Result<Vec<String>, Error> {
    let file = std::fs::File::open(path).map_err(|e| Error::FileOpen(path.to_string(), e))?;
    std::io::BufReader::new(file)
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .map_err(Error::FileRead)
}

fn write_output(program: &scanner::Program, path: &str, raw: bool) -> Result<(), Error> {
    let file = std::fs::File::create(path).map_err(|e| Error::FileCreate(path.to_string(), e))?;
    let mut file = std::io::BufWriter::new(file);
    for inst in &program.instructions {
        let written = if raw {
            file.write_all(&inst.word().to_le_bytes())
        } else {
            writeln!(file, "{}", inst.machine())
        };
        written.map_err(|e| Error::FileWrite(path.to_string(), e))?;
    }
    file.flush()
        .map_err(|e| Error::FileWrite(path.to_string(), e))
}

fn write_yaml(program: &scanner::Program, path: &str) -> Result<(), Error> {
    let text = serde_yaml::to_string(program)
        .map_err(|e| Error::FileWrite(path.to_string(), std::io::Error::other(e)))?;
    std::fs::write(path, text).map_err(|e| Error::FileWrite(path.to_string(), e))
}

fn run(args: &Args, raws: &[String]) -> Result<scanner::Program, Error> {
    let config = match &args.config {
        Some(path) => {
            println!("  < {}", path);
            Config::load(path)?
        }
        None => Config::default(),
    };

    println!("2. Assemble");
    let lines = clean_lines(raws);
    let program = scanner::assemble(&lines, &config)?;
    msg::dump(&program.msgs, raws, &args.input);
    println!(
        "  {} labels, {} data, {} instructions",
        program.labels.len(),
        program.data.len(),
        program.instructions.len()
    );

    println!("3. Write Output");
    println!("  > {}", &args.output);
    write_output(&program, &args.output, args.raw)?;
    if let Some(path) = &args.yaml {
        println!("  > {}", path);
        write_yaml(&program, path)?;
    }

    Ok(program)
}

fn main() {
    use clap::Parser;

    let args: Args = Args::parse();
    println!("MIPS Assembler");

    println!("1. Read File");
    println!("  < {}", &args.input);
    let raws = match read_lines(&args.input) {
        Ok(raws) => raws,
        Err(e) => {
            e.print_diag(&[], &args.input);
            std::process::exit(1);
        }
    };

    let program = match run(&args, &raws) {
        Ok(program) => program,
        Err(e) => {
            e.print_diag(&raws, &args.input);
            std::process::exit(1);
        }
    };

    if args.dump {
        dump::print_dump(&program);
    }
}
