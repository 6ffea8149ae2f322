use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Parser;

use quickbill_app::{Config, Session};
use quickbill_catalog::{CatalogEntry, CatalogQuery, load_catalog};

#[derive(Parser)]
#[command(
    name = "quickbill",
    about = "Search a price list, build an invoice, export it as PDF and XLSX"
)]
struct Cli {
    /// Price list (.xlsx or .csv); overrides the config value.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Config file (falls back to ./quickbill.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory receiving invoice.pdf and invoice.xlsx.
    #[arg(long, default_value = ".")]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    quickbill_observability::init();
    let cli = Cli::parse();

    let config = Config::load_or_default(cli.config.as_deref())?;
    let catalog_path = cli
        .catalog
        .or_else(|| config.catalog.path.clone())
        .context("no catalog configured; pass --catalog or set [catalog] path in the config")?;

    // A catalog that cannot load is fatal here: nothing downstream works
    // without it, and surfacing it at startup beats a dead search prompt.
    let catalog = load_catalog(&catalog_path).context("loading the price catalog")?;

    let mut session = Session::new(
        Arc::new(catalog),
        config.business.clone(),
        Local::now().date_naive(),
    );

    println!("quickbill: type `help` for commands");
    let stdin = io::stdin();
    let mut results: Vec<CatalogEntry> = Vec::new();

    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = stdin.lock().lines().next() else {
            break;
        };
        let line = line?;
        let mut tokens = line.split_whitespace();
        let Some(command) = tokens.next() else {
            continue;
        };
        let rest: Vec<&str> = tokens.collect();

        match command {
            "help" => print_help(),
            "search" => {
                results = run_search(&session, &rest);
            }
            "add" => {
                if let Err(e) = run_add(&mut session, &results, &rest) {
                    println!("error: {e}");
                }
            }
            "list" => print_invoice(&session),
            "json" => match serde_json::to_string_pretty(session.invoice()) {
                Ok(dump) => println!("{dump}"),
                Err(e) => println!("error: {e}"),
            },
            "qty" => run_qty(&mut session, &rest),
            "rm" => run_remove(&mut session, &rest),
            "refresh" => match session.invoice_mut().recompute_totals() {
                Ok(grand) => println!("totals refreshed; grand total {grand}"),
                Err(e) => println!("error: {e}"),
            },
            "date" => run_date(&mut session, &rest),
            "tracking" => {
                session.invoice_mut().set_tracking_number(rest.join(" "));
                println!("tracking number set");
            }
            "export" => match session.export() {
                Ok(bundle) => match bundle.write_to(&cli.out) {
                    Ok((pdf, xlsx)) => {
                        println!("wrote {} and {}", pdf.display(), xlsx.display());
                    }
                    Err(e) => println!("error: {e}"),
                },
                Err(e) => println!("error: {e}"),
            },
            "quit" | "exit" => break,
            other => println!("unknown command {other:?}; type `help`"),
        }
    }

    Ok(())
}

fn print_help() {
    println!("  search [brand] [ref=..] [type=..]   filter the price list");
    println!("  add <n> [qty]                       add search result n (default qty 1)");
    println!("  list                                show invoice lines and grand total");
    println!("  json                                dump the invoice as JSON");
    println!("  qty <n> <value>                     set line n quantity (refresh to recompute)");
    println!("  rm <n>                              remove line n");
    println!("  refresh                             recompute all line totals");
    println!("  date <YYYY-MM-DD>                   set the invoice date");
    println!("  tracking <number>                   set the tracking number");
    println!("  export                              write invoice.pdf and invoice.xlsx");
    println!("  quit                                leave");
}

fn run_search(session: &Session, args: &[&str]) -> Vec<CatalogEntry> {
    let mut brand = String::new();
    let mut reference = String::new();
    let mut kind = String::new();
    for arg in args {
        if let Some(value) = arg.strip_prefix("ref=") {
            reference = value.to_string();
        } else if let Some(value) = arg.strip_prefix("type=") {
            kind = value.to_string();
        } else if let Some(value) = arg.strip_prefix("brand=") {
            brand = value.to_string();
        } else {
            brand = (*arg).to_string();
        }
    }

    let query = CatalogQuery::new(&brand, &reference, &kind);
    let matches: Vec<CatalogEntry> = session.search(&query).into_iter().cloned().collect();

    println!("{} result(s)", matches.len());
    for (i, entry) in matches.iter().enumerate() {
        println!(
            "  {}. {} | {} | {} | {}",
            i + 1,
            entry.brand,
            entry.reference_code,
            entry.kind,
            entry.price
        );
    }
    matches
}

fn run_add(session: &mut Session, results: &[CatalogEntry], args: &[&str]) -> anyhow::Result<()> {
    let index: usize = args
        .first()
        .context("usage: add <n> [qty]")?
        .parse()
        .context("result number must be a whole number")?;
    let entry = results
        .get(index.checked_sub(1).context("result numbers start at 1")?)
        .context("no such search result; run `search` first")?;
    let quantity = match args.get(1) {
        Some(raw) => Some(raw.parse::<u32>().context("quantity must be a whole number")?),
        None => None,
    };

    session.add(entry, quantity)?;
    println!("added {} (qty {})", entry.brand, quantity.unwrap_or(1));
    Ok(())
}

fn print_invoice(session: &Session) {
    let invoice = session.invoice();
    if invoice.is_empty() {
        println!("invoice is empty");
        return;
    }
    println!("invoice date {}", invoice.invoice_date());
    for (i, line) in invoice.lines().iter().enumerate() {
        println!(
            "  {}. {} | {} | qty {} | @ {} | {}",
            i + 1,
            line.brand,
            line.reference_code,
            line.quantity,
            line.unit_price,
            line.line_total
        );
    }
    match session.grand_total() {
        Ok(grand) => println!("grand total {grand}"),
        Err(e) => println!("grand total unavailable: {e}"),
    }
}

fn run_qty(session: &mut Session, args: &[&str]) {
    let (Some(index), Some(value)) = (args.first(), args.get(1)) else {
        println!("usage: qty <n> <value>");
        return;
    };
    let (Ok(index), Ok(quantity)) = (index.parse::<usize>(), value.parse::<u32>()) else {
        println!("line number and quantity must be whole numbers");
        return;
    };
    let lines = session.invoice_mut().lines_mut();
    let Some(line) = index.checked_sub(1).and_then(|i| lines.get_mut(i)) else {
        println!("no line {index}");
        return;
    };
    line.quantity = quantity;
    println!("line {index} quantity set to {quantity} (totals refresh on export)");
}

fn run_remove(session: &mut Session, args: &[&str]) {
    let Some(Ok(index)) = args.first().map(|a| a.parse::<usize>()) else {
        println!("usage: rm <n>");
        return;
    };
    match index
        .checked_sub(1)
        .ok_or_else(|| "line numbers start at 1".to_string())
        .and_then(|i| {
            session
                .invoice_mut()
                .remove_line(i)
                .map_err(|e| e.to_string())
        }) {
        Ok(removed) => println!("removed {}", removed.brand),
        Err(e) => println!("error: {e}"),
    }
}

fn run_date(session: &mut Session, args: &[&str]) {
    let Some(raw) = args.first() else {
        println!("usage: date <YYYY-MM-DD>");
        return;
    };
    match raw.parse::<NaiveDate>() {
        Ok(date) => {
            session.invoice_mut().set_invoice_date(date);
            println!("invoice date set to {date}");
        }
        Err(e) => println!("error: {e}"),
    }
}
