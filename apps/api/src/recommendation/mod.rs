// Internship recommendations: preference wizard input, rule-based scoring,
// top-N selection with a random fallback, and the HTTP surface over them.
// The engine itself performs no I/O; catalog access comes in through `InternshipSource`.

pub mod engine;
pub mod handlers;
pub mod preference;
pub mod sampler;
pub mod service;
