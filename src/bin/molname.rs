use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use molname::*;

const USAGE: &str = "usage: molname [--log <level>] [--dot <file>] [--max-len <n>] [--no-ether] [formula]";

struct Args {
    log: Option<String>,
    dot: Option<String>,
    options: NamingOptions,
    formula: Option<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut parsed = Args {
        log: None,
        dot: None,
        options: NamingOptions::default(),
        formula: None,
    };
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--log" => parsed.log = Some(args.next().context("--log needs a level")?),
            "--dot" => parsed.dot = Some(args.next().context("--dot needs a file")?),
            "--max-len" => {
                let max = args.next().context("--max-len needs a number")?;
                let max = max
                    .parse::<usize>()
                    .with_context(|| format!("invalid --max-len {:?}", max))?;
                parsed.options = parsed.options.with_max_formula_len(Some(max));
            }
            "--no-ether" => parsed.options = parsed.options.with_ether_splitting(false),
            "-h" | "--help" => bail!("{}", USAGE),
            _ if arg.starts_with("--") => bail!("unknown flag {}\n{}", arg, USAGE),
            _ => parsed.formula = Some(arg),
        }
    }
    Ok(parsed)
}

fn prompt_formula() -> Result<String> {
    print!("ENTER THE MOLECULAR FORMULA: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read the formula")?;
    println!();
    Ok(line)
}

fn main() -> Result<()> {
    let args = parse_args(std::env::args().skip(1))?;
    let level = args
        .log
        .clone()
        .or_else(|| std::env::var("MOLNAME_LOG").ok())
        .unwrap_or_else(|| "warn".to_string());
    init_logging(&level);

    let formula = match args.formula {
        Some(formula) => formula,
        None => prompt_formula()?,
    };
    let formula = formula.trim();

    if let Some(dot) = &args.dot {
        visualize_formula(formula, args.options.split_ethers, dot, None)?;
    }

    match name_formula(formula, &args.options) {
        Ok(name) => println!("IUPAC NAME: {}", name),
        Err(e) => println!("{}", e),
    }
    Ok(())
}
