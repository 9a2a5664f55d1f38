pub mod generate;
pub mod mark;
pub mod paper;
pub mod topics;
