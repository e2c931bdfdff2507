pub mod healthcheck;
pub mod root;
