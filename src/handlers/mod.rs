pub mod design_handlers;
pub mod health;
