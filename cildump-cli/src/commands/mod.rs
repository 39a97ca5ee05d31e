pub mod il;
