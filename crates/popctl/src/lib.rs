pub mod geom;
pub mod protocol;
