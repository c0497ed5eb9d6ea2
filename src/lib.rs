pub mod constants;
pub mod coordinates;
pub mod eci;
pub mod elements;
pub mod kepler;
pub mod observers;
pub mod propagator;
pub mod sattrack_errors;
pub mod time;
pub mod tle;
