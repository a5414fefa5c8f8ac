pub mod classify;
pub mod intent;
pub mod schema;
pub mod trace;
pub mod verify;
