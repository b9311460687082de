use crate::cli::CheckArgs;
use crate::config::ChainFile;
use crate::replay::build_chain;
use colored::Colorize;

pub fn run(args: CheckArgs) -> anyhow::Result<()> {
    let chain_file = ChainFile::load(&args.file)?;
    let path = chain_file.path.display();
    let chain = build_chain(&chain_file.contents, args.verbose)
        .map_err(|e| anyhow::anyhow!("{path}: {e:#}"))?;

    if let Some(failure) = chain.diagnose() {
        eprintln!(
            "{} {path}: unit {} ({}): {}",
            "error:".red().bold(),
            failure.position,
            failure.kind,
            failure.error
        );
        anyhow::bail!("chain check failed");
    }

    let sql = chain.try_compile()?;
    if sql.is_empty() {
        println!("{} {path}: empty chain", "ok".green().bold());
    } else {
        println!("{} {path}: {sql}", "ok".green().bold());
    }
    Ok(())
}
