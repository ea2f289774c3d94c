pub mod extraction;
pub mod prescription;
pub mod processor;
