pub mod answer_client;
pub mod session;
pub mod transcript;
