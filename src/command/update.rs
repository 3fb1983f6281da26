use crate::aoi::{AoiPatch, AoiStore};
use crate::{Error, Result};

/// Usage: update <id> <name|description> <value>
pub fn run(args: &[String], store: &mut AoiStore) -> Result<()> {
    let [id, field, value] = args else {
        return Err(Error::CLI(
            "Expected arguments: <id> <name|description> <value>".into(),
        ));
    };
    let patch = match field.as_str() {
        "name" => AoiPatch {
            name: Some(value.clone()),
            ..Default::default()
        },
        "description" => AoiPatch {
            description: Some(value.clone()),
            ..Default::default()
        },
        _ => Err(Error::CLI(format!("Unknown field: {field}")))?,
    };
    store.update(id, patch);
    println!("Updated AOI {id}");
    Ok(())
}
