//! Serve command - reports over HTTP

use std::path::Path;

use tiny_http::Server;

use crate::server::tiny_http::{ServerState, handle_request};
use openmedicaid::config::Config;

/// Start the local HTTP server
pub fn serve(data_dir: &Path, port: u16, open: bool, config: &Config) -> anyhow::Result<()> {
    let state = ServerState {
        data: super::load(data_dir)?,
        site_url: config.site_url.clone(),
    };

    let addr = format!("0.0.0.0:{port}");
    let server = Server::http(&addr).map_err(|e| anyhow::anyhow!("Failed to start server: {e}"))?;

    println!("Serving reports from {}", data_dir.display());
    println!("Open http://localhost:{port} in your browser");
    println!();
    println!("Press Ctrl+C to stop");

    if open {
        #[cfg(target_os = "macos")]
        let _ = std::process::Command::new("open")
            .arg(format!("http://localhost:{port}"))
            .spawn();

        #[cfg(target_os = "linux")]
        let _ = std::process::Command::new("xdg-open")
            .arg(format!("http://localhost:{port}"))
            .spawn();

        #[cfg(target_os = "windows")]
        let _ = std::process::Command::new("cmd")
            .args(["/c", "start", &format!("http://localhost:{port}")])
            .spawn();
    }

    for request in server.incoming_requests() {
        let response = handle_request(&state, &request);
        let _ = request.respond(response);
    }

    Ok(())
}
