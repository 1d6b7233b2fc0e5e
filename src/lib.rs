// Library surface for the binary and the integration tests.
pub mod app;
pub mod app_dirs;
pub mod backend;
pub mod config;
pub mod dispatch;
pub mod download;
pub mod error;
pub mod input;
pub mod logging;
pub mod presenter;
pub mod question;
pub mod router;
pub mod runtime;
pub mod session;
pub mod timer;
pub mod ui;
pub mod util;
