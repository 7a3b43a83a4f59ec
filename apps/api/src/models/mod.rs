pub mod bio;
