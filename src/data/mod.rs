pub mod crops;
pub mod regions;
pub mod soils;

pub use crops::{crops_by_category, find_crop, static_catalog};
pub use regions::{climate_normals, find_region, regions};
pub use soils::SoilDatabase;
