mod common;
mod intake;
mod results;
