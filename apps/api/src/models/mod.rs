pub mod profile;
pub mod question;
