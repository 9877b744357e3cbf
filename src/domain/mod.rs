pub mod class_name;
pub mod descriptor;
pub mod filter;
pub mod graph;
pub mod policy;
pub mod ports;
pub mod processor;
pub mod walker;
