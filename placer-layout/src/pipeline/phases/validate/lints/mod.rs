//! Built-in lints for IR validation.

mod keyword_package;
mod reserved_package;

pub use keyword_package::KeywordPackageLint;
pub use reserved_package::ReservedPackageLint;
