pub mod gallery;
pub mod grid;
pub mod panels;
