// Handlers only extract, delegate to a service and wrap the result.
//
// Public (no token) → Protected (session token)
pub mod extract;
pub mod protected;
pub mod public;
