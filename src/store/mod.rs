pub mod json_store;
pub mod keys;
pub mod normalize;
pub mod schema;
