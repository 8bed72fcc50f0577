pub mod duration;
pub mod sorting;
pub mod track;
