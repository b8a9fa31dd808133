mod model;
mod repository;

pub use model::{NewPostcodeDB, NewRegionDB, PostcodeDB, RegionDB};
pub use repository::RegionRepository;
