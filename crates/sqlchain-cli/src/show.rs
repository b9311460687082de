use crate::cli::ShowArgs;
use crate::config::ChainFile;
use crate::replay::build_chain;
use colored::Colorize;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use sqlchain::{Chain, UnitSnapshot};

pub fn run(args: ShowArgs) -> anyhow::Result<()> {
    let chain_file = ChainFile::load(&args.file)?;
    let mut chain = build_chain(&chain_file.contents, false)
        .map_err(|e| anyhow::anyhow!("{}: {e:#}", chain_file.path.display()))?;
    chain.compile();

    println!("{}", chain_file.path.display().to_string().bold().cyan());
    let snapshot = chain.snapshot();
    println!("{}", unit_table(&snapshot.units));
    print_next(&chain);

    let sql = chain.compiled_sql().unwrap_or_default();
    if chain.diagnose().is_some() {
        println!("  {} {}", "sql:".dimmed(), sql.red());
    } else {
        println!("  {} {}", "sql:".dimmed(), sql.green());
    }
    Ok(())
}

fn header(title: &str) -> Cell {
    Cell::new(title).add_attribute(Attribute::Bold).fg(Color::Cyan)
}

fn unit_table(units: &[UnitSnapshot]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            header("Position"),
            header("Kind"),
            header("Deletable"),
            header("Fragment"),
        ]);

    for unit in units {
        let fragment = match (&unit.fragment, &unit.error) {
            (Some(fragment), _) => Cell::new(fragment.trim()),
            (None, Some(error)) => Cell::new(error).fg(Color::Red),
            (None, None) => Cell::new("-"),
        };
        table.add_row(vec![
            Cell::new(unit.position),
            Cell::new(unit.kind.label()),
            Cell::new(if unit.deletable { "yes" } else { "no" }),
            fragment,
        ]);
    }
    table
}

fn print_next(chain: &Chain) {
    let labels: Vec<String> = chain
        .options()
        .iter()
        .map(|option| {
            if chain.default_selection() == Some(option.kind) {
                format!("{} (default)", option.label)
            } else {
                option.label.to_string()
            }
        })
        .collect();

    println!(
        "  {} {}",
        "next:".dimmed(),
        if labels.is_empty() {
            "-".to_string()
        } else {
            labels.join(", ")
        }
    );
}
