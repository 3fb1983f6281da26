use crate::aoi::AoiStore;
use crate::{Error, Result};

/// Usage: delete <id>
pub fn run(args: &[String], store: &mut AoiStore) -> Result<()> {
    let id = match args.first() {
        Some(some) => some,
        None => Err(Error::CLI("No id passed".into()))?,
    };
    store.delete(id);
    println!("Deleted AOI {id}");
    Ok(())
}
