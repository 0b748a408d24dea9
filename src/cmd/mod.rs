pub mod bands;
pub mod batch;
pub mod lookup;
pub mod schema;
