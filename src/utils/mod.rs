pub mod cors;
pub mod visitor;
