pub mod health;
pub mod species;
