// Library root for the command-line app: configuration and rendering.

pub mod config;
pub mod report;
