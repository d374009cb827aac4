// Application tracking: the (user, internship) pairs recorded when a student
// follows an "Apply" link from their recommendations.

pub mod handlers;
pub mod store;
