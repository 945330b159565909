//! Terminal front end: a pure renderer, a scroll-to-latest viewport and the
//! event loop that ties them to a [`ChatSession`](crate::services::session::ChatSession).

pub mod render;
pub mod repl;
pub mod viewport;
