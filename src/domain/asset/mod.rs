mod model;
mod repository;

pub use model::Asset;
pub use repository::{AssetRepository, InMemoryAssetRepository, PgAssetRepository};
