pub mod identity;
pub mod mailer;
pub mod otp;
pub mod storage;

pub use identity::IdentityClient;
pub use mailer::Mailer;
pub use otp::OtpStore;
pub use storage::StorageClient;
