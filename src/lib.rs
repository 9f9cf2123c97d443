//! Energon Brain - adaptive monster AI for Energon Pets battles

pub mod brain;
pub mod core;
