//! Command implementations.

mod add;
mod adhere;
mod init;
mod list;
mod module;
mod watch;

pub use add::AddCommand;
pub use adhere::AdhereCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use module::ModuleCommand;
pub use watch::WatchCommand;
