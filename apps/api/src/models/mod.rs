pub mod complaint;
pub mod representative;
pub mod team;
