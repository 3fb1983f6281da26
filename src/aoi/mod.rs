pub mod import;
pub mod schema;
pub mod store;

pub use schema::{Aoi, AoiPatch, NewAoi, Point, Polygon};
pub use store::AoiStore;
