pub mod cli;
pub mod repl;
pub mod runner;
pub mod shape;
