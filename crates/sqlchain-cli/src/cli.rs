use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    Root,
    Compile,
    Check,
    Show,
}

#[derive(Debug, Clone)]
pub enum Command {
    Help(HelpTopic),
    Compile(CompileArgs),
    Check(CheckArgs),
    Show(ShowArgs),
}

#[derive(Debug, Clone)]
pub struct CompileArgs {
    pub file: PathBuf,
    pub json: bool,
    pub verbose: bool,
}

#[derive(Debug, Clone)]
pub struct CheckArgs {
    pub file: PathBuf,
    pub verbose: bool,
}

#[derive(Debug, Clone)]
pub struct ShowArgs {
    pub file: PathBuf,
}

pub fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    let mut it = args.iter().skip(1);
    let Some(first) = it.next() else {
        return Ok(Command::Help(HelpTopic::Root));
    };

    match first.as_str() {
        "-h" | "--help" => Ok(Command::Help(HelpTopic::Root)),
        "help" => parse_help(it.map(|s| s.as_str())),
        "compile" => parse_compile(it.map(|s| s.as_str())),
        "check" => parse_check(it.map(|s| s.as_str())),
        "show" => parse_show(it.map(|s| s.as_str())),
        _ => anyhow::bail!("unknown command: {first}"),
    }
}

fn parse_help<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let topic = match it.next() {
        None => HelpTopic::Root,
        Some("compile") => HelpTopic::Compile,
        Some("check") => HelpTopic::Check,
        Some("show") => HelpTopic::Show,
        Some(other) => anyhow::bail!("unknown help topic: {other}"),
    };
    if let Some(extra) = it.next() {
        anyhow::bail!("unexpected argument: {extra}");
    }
    Ok(Command::Help(topic))
}

fn parse_compile<'a>(it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut file: Option<PathBuf> = None;
    let mut json = false;
    let mut verbose = false;

    for token in it {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Compile)),
            "--json" => json = true,
            "-v" | "--verbose" => verbose = true,
            _ if token.starts_with('-') => anyhow::bail!("unknown argument: {token}"),
            _ => set_file(&mut file, token)?,
        }
    }

    let Some(file) = file else {
        anyhow::bail!("compile requires a chain file");
    };
    Ok(Command::Compile(CompileArgs {
        file,
        json,
        verbose,
    }))
}

fn parse_check<'a>(it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut file: Option<PathBuf> = None;
    let mut verbose = false;

    for token in it {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Check)),
            "-v" | "--verbose" => verbose = true,
            _ if token.starts_with('-') => anyhow::bail!("unknown argument: {token}"),
            _ => set_file(&mut file, token)?,
        }
    }

    let Some(file) = file else {
        anyhow::bail!("check requires a chain file");
    };
    Ok(Command::Check(CheckArgs { file, verbose }))
}

fn parse_show<'a>(it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut file: Option<PathBuf> = None;

    for token in it {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Show)),
            _ if token.starts_with('-') => anyhow::bail!("unknown argument: {token}"),
            _ => set_file(&mut file, token)?,
        }
    }

    let Some(file) = file else {
        anyhow::bail!("show requires a chain file");
    };
    Ok(Command::Show(ShowArgs { file }))
}

fn set_file(slot: &mut Option<PathBuf>, token: &str) -> anyhow::Result<()> {
    if let Some(existing) = slot {
        anyhow::bail!(
            "only one chain file is accepted (got {} and {token})",
            existing.display()
        );
    }
    *slot = Some(PathBuf::from(token));
    Ok(())
}

pub fn print_help(topic: HelpTopic) {
    match topic {
        HelpTopic::Root => {
            println!(
                "\
sqlchain - compile SQL expression chains described in TOML

USAGE:
  sqlchain <COMMAND> [OPTIONS] <FILE>

COMMANDS:
  compile       Replay a chain file and print the compiled SQL
  check         Exit non-zero if any unit of the chain does not compile
  show          Print the chain as a table with the allowed next kinds
  help          Print help for a command

Run `sqlchain <command> --help` for more."
            );
        }
        HelpTopic::Compile => {
            println!(
                "\
USAGE:
  sqlchain compile [OPTIONS] <FILE>

OPTIONS:
  --json                Print the chain snapshot as JSON instead of the SQL
  -v, --verbose         Log chain activity to stderr
  -h, --help            Print help"
            );
        }
        HelpTopic::Check => {
            println!(
                "\
USAGE:
  sqlchain check [OPTIONS] <FILE>

OPTIONS:
  -v, --verbose         Log chain activity to stderr
  -h, --help            Print help"
            );
        }
        HelpTopic::Show => {
            println!(
                "\
USAGE:
  sqlchain show <FILE>

OPTIONS:
  -h, --help            Print help"
            );
        }
    }
}
