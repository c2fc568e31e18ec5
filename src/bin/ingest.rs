use dotenv::dotenv;
use newsletter_ingest::db;
use newsletter_ingest::seed;
use newsletter_ingest::sync::fetcher::HttpFetcher;
use newsletter_ingest::sync::preview;
use newsletter_ingest::sync::{IngestJob, IngestNewsletterJob, PgCatalogStore};
use std::env;
use std::process;

const USAGE: &str = "Usage: ingest [<newsletter_id> | --preview <url> | --seed <file>]";

fn main() {
    dotenv().ok();
    env_logger::init();

    let args = env::args().skip(1).collect::<Vec<String>>();
    let args = args.iter().map(String::as_str).collect::<Vec<&str>>();

    let result = match args.as_slice() {
        [] => ingest_all(),
        ["--preview", url] => print_preview(url),
        ["--seed", path] => load_seed(path),
        [id] if !id.starts_with("--") => ingest_one(id),
        _ => Err(USAGE.to_string()),
    };

    if let Err(error) = result {
        log::error!("{}", error);
        eprintln!("{}", error);
        process::exit(1);
    }
}

fn ingest_all() -> Result<(), String> {
    let mut connection = db::connection().map_err(|error| error.to_string())?;
    let mut store = PgCatalogStore::new(&mut connection);

    let report = IngestJob::new()
        .execute(&mut store, &HttpFetcher)
        .map_err(|error| error.to_string())?;

    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(count) => println!("{}: {} ({} issues)", outcome.newsletter_id, outcome.state, count),
            Err(error) => println!("{}: {} ({})", outcome.newsletter_id, outcome.state, error),
        }
    }

    println!(
        "{} succeeded, {} failed, {} issues submitted",
        report.succeeded(),
        report.failed(),
        report.total_submitted()
    );

    Ok(())
}

fn ingest_one(id: &str) -> Result<(), String> {
    let mut connection = db::connection().map_err(|error| error.to_string())?;
    let mut store = PgCatalogStore::new(&mut connection);

    let count = IngestNewsletterJob::new(id)
        .execute(&mut store, &HttpFetcher)
        .map_err(|error| error.to_string())?;

    println!("{}: {} issues submitted", id, count);

    Ok(())
}

fn print_preview(url: &str) -> Result<(), String> {
    let preview = preview::preview_feed(&HttpFetcher, url).map_err(|error| error.to_string())?;
    let json = serde_json::to_string_pretty(&preview).map_err(|error| error.to_string())?;

    println!("{}", json);

    Ok(())
}

fn load_seed(path: &str) -> Result<(), String> {
    let newsletters = seed::load_newsletters(path).map_err(|error| error.to_string())?;
    let mut connection = db::connection().map_err(|error| error.to_string())?;

    let inserted =
        seed::insert_newsletters(&mut connection, newsletters).map_err(|error| error.to_string())?;

    println!("{} newsletters inserted", inserted);

    Ok(())
}
