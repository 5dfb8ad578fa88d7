// Domain value objects
pub mod cap_policy;
pub mod category;
pub mod identifiers;
pub mod quality;
pub mod region;

pub use cap_policy::*;
pub use category::*;
pub use identifiers::*;
pub use quality::*;
pub use region::*;
