pub mod builder;
pub mod maintenance;
pub mod ocf;
pub mod pipeline;
pub mod rules;
pub mod severity;
pub mod snapshot;
pub mod xml;

#[cfg(test)]
mod fixtures;
