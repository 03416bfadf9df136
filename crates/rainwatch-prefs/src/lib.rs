//! Persisted user preferences
//!
//! Storage is modelled as an injected key-value capability so the backing
//! medium can be faked in tests. Reads and writes never fail from the
//! caller's perspective: storage errors are swallowed and logged.

pub mod preference;
pub mod store;

pub use preference::*;
pub use store::*;
