pub mod core;
pub mod data;
pub mod distributions;
pub mod io;
pub mod metropolis_hastings;
pub mod random;
pub mod sampler;
pub mod sanitize;
pub mod state;
pub mod stats;
