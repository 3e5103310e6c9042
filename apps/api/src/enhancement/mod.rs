// Enhancement API: render a prompt from resume + job description text and
// collect one rewrite per provider. Provider calls live in `providers`.

pub mod handlers;
pub mod prompts;
pub mod service;
