pub mod package;
pub mod run;
