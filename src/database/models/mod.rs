pub mod game_result;
pub mod resource;
pub mod session;
pub mod session_resource;
pub mod student;
pub mod theme;
pub mod therapist;
