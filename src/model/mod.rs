//! Plain data types shared by the loader, the store actor and the platform boundary.

pub mod description;
pub mod product;
pub mod purchase;

pub use description::*;
pub use product::*;
pub use purchase::*;
