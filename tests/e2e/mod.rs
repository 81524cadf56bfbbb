pub mod scrolling;
pub mod selection;
pub mod tokenizing;
