pub mod prizes;
