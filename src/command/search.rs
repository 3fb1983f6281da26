use crate::geocoding::GeocodingClient;
use crate::{Error, Result};

/// Usage: search <place name>
///
/// One-shot lookup, so the interactive debounce layer isn't involved here.
pub async fn run(args: &[String]) -> Result<()> {
    if args.is_empty() {
        Err(Error::CLI("No search query passed".into()))?
    }
    let query = args.join(" ");
    let results = GeocodingClient::new().search(&query).await;
    if results.is_empty() {
        println!("No results");
        return Ok(());
    }
    for result in results {
        match result.coords() {
            Some([lng, lat]) => println!("{}  ({lng}, {lat})", result.display_name),
            None => println!("{}", result.display_name),
        }
    }
    Ok(())
}
