mod common;

mod concurrency;
mod moves;
mod rollback;
