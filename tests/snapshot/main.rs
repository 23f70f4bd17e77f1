mod atomic;
mod common;
mod mutex;
