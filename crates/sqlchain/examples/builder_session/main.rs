//! Example walking through a builder session: add units, edit them, remove
//! one through its removal request, reset everything.
//!
//! Run with:
//!   cargo run --example builder_session -p sqlchain

use colored::Colorize;
use sqlchain::prelude::*;
use sqlchain::{CompositeHook, LoggingHook, StatsHook};
use std::sync::Arc;

fn print_options(chain: &Chain) {
    let labels: Vec<&str> = chain.options().iter().map(|option| option.label).collect();
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

fn main() -> ChainResult<()> {
    let config = BuilderConfig::new()
        .with_field("ABC", 1)
        .with_field("DEF", 2)
        .with_field("EFG", 3);

    let stats = Arc::new(StatsHook::new());
    let hook = CompositeHook::new()
        .add(LoggingHook::new().prefix("[session]").verbose(true))
        .add_arc(stats.clone());
    let mut chain = Chain::new(config)?.with_hook(hook);

    println!("{}", "== empty chain".bold());
    print_options(&chain);

    chain.append(UnitKind::Field);
    chain.last_mut().and_then(Unit::field_mut).unwrap().select("ABC")?;
    print_options(&chain);

    chain.append(UnitKind::Operator);
    chain
        .last_mut()
        .and_then(Unit::operator_mut)
        .unwrap()
        .select_symbol(">=")?;
    print_options(&chain);

    println!("{}", "== dangling operator is dropped".bold());
    println!("  {}", chain.compile().green());

    chain.append(UnitKind::Function);
    {
        let function = chain.last_mut().and_then(Unit::function_mut).unwrap();
        function.set_function(SqlFunction::Length);
        function.set_argument_kind(ArgumentKind::Constant);
        function.argument_constant_mut().unwrap().set_value("hello");
    }
    println!("{}", "== full expression".bold());
    println!("  {}", chain.compile().green());

    println!("{}", "== last unit asks to be removed".bold());
    if let Some(unit) = chain.last_mut() {
        unit.request_removal();
    }
    chain.process_events();
    println!("  {}", chain.compile().green());

    println!("{}", "== reset".bold());
    chain.reset_all();
    println!("  {}", chain.compile().red());

    let stats = stats.stats();
    println!(
        "{} appends={} removals={} compilations={} failed={}",
        "== stats".bold(),
        stats.appends,
        stats.removals,
        stats.compilations,
        stats.failed_compilations
    );

    Ok(())
}
