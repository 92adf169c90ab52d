pub mod entities;
pub mod origin;
