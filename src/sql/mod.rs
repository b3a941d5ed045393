//! Safe SQL builder: identifiers from the column whitelist only, values as parameters.

mod builder;
pub mod params;
pub mod scaffold;
pub use builder::*;
pub use params::*;
pub use scaffold::*;
