pub mod export;
pub mod owner;
pub mod register;
