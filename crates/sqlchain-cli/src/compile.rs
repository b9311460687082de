use crate::cli::CompileArgs;
use crate::config::ChainFile;
use crate::replay::build_chain;

pub fn run(args: CompileArgs) -> anyhow::Result<()> {
    let chain_file = ChainFile::load(&args.file)?;
    let mut chain = build_chain(&chain_file.contents, args.verbose)
        .map_err(|e| anyhow::anyhow!("{}: {e:#}", chain_file.path.display()))?;

    let sql = chain.compile().to_string();
    if args.json {
        let json = chain.snapshot().to_json()?;
        println!("{json}");
    } else {
        println!("{sql}");
    }
    Ok(())
}
