// Student profiles. Accounts themselves live with the external auth provider;
// this module only keeps the display/profile metadata keyed by that account id.

pub mod handlers;
pub mod store;
