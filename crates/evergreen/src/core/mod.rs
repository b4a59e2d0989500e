pub mod blend;
pub mod scene;
pub mod time;
