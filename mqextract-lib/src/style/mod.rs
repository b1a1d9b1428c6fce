pub mod classify;
pub mod collection;
pub mod normalize;
pub mod owned_css;
pub mod serialize;
pub mod sort;
