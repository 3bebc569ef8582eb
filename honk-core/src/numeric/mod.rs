pub mod bitop;
