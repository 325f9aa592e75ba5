pub mod convert;
pub mod diff;
pub mod explain;
pub mod prepare;
