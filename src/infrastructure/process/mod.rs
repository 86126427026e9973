//! CommandRunner backed by `std::process::Command`

mod system;

pub use system::SystemRunner;
