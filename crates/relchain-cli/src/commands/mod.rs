pub mod check;
pub mod names;
pub mod restore;
pub mod save;
