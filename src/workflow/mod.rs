pub mod aggregate;
pub mod compare;
pub mod narrate;
pub mod range;
pub mod repositories;
pub mod tags;
