pub mod chat;
pub mod doctor;
