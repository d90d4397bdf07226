//! TUI (Terminal User Interface) module for the Avalam client.
//!
//! This module provides the terminal interface using ratatui, supporting
//! keyboard navigation, mouse input and live updates from the controller.

mod app;
mod event;
mod render;
mod widgets;

use avalam_core::session::Session;
use url::Url;

use crate::error::ClientError;
use crate::net::Connection;

use app::App;

/// Connects to the controller and runs the TUI until the user quits.
///
/// Returns the final session state so the caller can print a summary.
pub async fn run(server: &Url) -> Result<Session, ClientError> {
    let connection = Connection::connect(server).await?;
    let app = App::new(connection);

    let terminal = ratatui::init();
    let result = app.run(terminal).await;
    ratatui::restore();

    Ok(result?)
}
