mod harness;
mod resolution;
