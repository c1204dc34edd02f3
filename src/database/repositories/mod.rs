pub mod game_results;
pub mod resources;
pub mod session_resources;
pub mod sessions;
pub mod students;
pub mod themes;
pub mod therapists;

pub use game_results::GameResultRepository;
pub use resources::ResourceRepository;
pub use session_resources::SessionResourceRepository;
pub use sessions::SessionRepository;
pub use students::StudentRepository;
pub use themes::ThemeRepository;
pub use therapists::TherapistRepository;
