pub use error::Error;
mod aoi;
mod command;
mod db;
mod error;
mod geo_utils;
mod geocoding;

use crate::aoi::AoiStore;
use std::env;
use tracing_subscriber::EnvFilter;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let mut conn = db::open_connection()?;
    db::migrate(&mut conn)?;

    let args: Vec<String> = env::args().collect();

    let command = match args.get(1) {
        Some(some) => some,
        None => Err(Error::CLI("No actions passed".into()))?,
    };

    let mut store = AoiStore::open(conn);

    match command.as_str() {
        "list" => command::list::run(&store)?,
        "add" => command::add::run(&args[2..], &mut store)?,
        "draw" => command::draw::run(&args[2..], &mut store)?,
        "show" => command::show::run(&args[2..], &store)?,
        "update" => command::update::run(&args[2..], &mut store)?,
        "delete" => command::delete::run(&args[2..], &mut store)?,
        "clear" => command::clear::run(&mut store)?,
        "import" => command::import::run(&args[2..], &mut store)?,
        "search" => command::search::run(&args[2..]).await?,
        first_arg => Err(Error::CLI(format!("Unknown command: {first_arg}")))?,
    }

    Ok(())
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}
