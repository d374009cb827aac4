// Assistant chat: proxies a student's question to the AI gateway with a system
// prompt describing the platform, a slice of the active catalog and, when known,
// the student's own profile.

pub mod client;
pub mod handlers;
pub mod prompts;
