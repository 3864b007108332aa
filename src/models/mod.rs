pub mod enums;
pub mod profile;
pub mod reading;
pub mod report;

pub use enums::*;
pub use profile::*;
pub use reading::*;
pub use report::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },
}
