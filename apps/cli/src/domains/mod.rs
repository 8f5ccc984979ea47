pub mod aggregate;
pub mod events;
pub mod teams;
