use crate::aoi::AoiStore;
use crate::Result;

pub fn run(store: &mut AoiStore) -> Result<()> {
    store.clear_all();
    println!("Removed all AOIs");
    Ok(())
}
