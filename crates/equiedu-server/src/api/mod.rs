// ABOUTME: JSON API handler modules for equiedu.
// ABOUTME: Re-exports the learning request and history handlers used by the router.

pub mod history;
pub mod learn;
