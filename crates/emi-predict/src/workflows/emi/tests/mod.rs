mod builder;
mod common;
