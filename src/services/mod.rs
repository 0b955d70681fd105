pub mod context;
pub mod names;
pub mod net;
