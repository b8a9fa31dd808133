mod model;
mod repository;

pub use model::{MileageBandDB, NewMileageBandDB};
pub use repository::MileageBandRepository;
