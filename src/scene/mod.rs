pub(crate) mod config;
pub(crate) mod graph;
pub(crate) mod model;
