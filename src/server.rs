// Foreground launch of the dev server
// The helper stays attached to the child for its whole lifetime

use crate::config::ServerConfig;
use crate::errors::{QnError, Result};
use std::io::{BufRead, BufReader};
use std::process::{Child, Command, Stdio};

/// Scoped handle for the launched server child process
#[derive(Debug)]
pub struct ServerProcess {
    child: Child,
    script: String,
}

impl ServerProcess {
    /// Spawn `<script> -db-host <host> -db-port <port>` with stdout piped
    /// back to us. Stderr stays attached to the terminal.
    pub fn spawn(config: &ServerConfig, db_host: &str) -> Result<Self> {
        let port = config.db_port.to_string();
        println!(
            "cmd: {} -db-host {} -db-port {}",
            config.run_script, db_host, port
        );
        let child = Command::new(&config.run_script)
            .args(["-db-host", db_host, "-db-port", &port])
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| QnError::CommandFailed(format!("{}: {}", config.run_script, e)))?;

        Ok(Self {
            child,
            script: config.run_script.clone(),
        })
    }

    /// Echo the child's output until it closes its end of the pipe, then
    /// reap it. Draining is what keeps the pipe from filling up and
    /// blocking the child; it effectively lasts the server's lifetime.
    pub fn stream_to_stdout(mut self) -> Result<()> {
        if let Some(stdout) = self.child.stdout.take() {
            let reader = BufReader::new(stdout);
            for line in reader.lines() {
                println!("{}", line?);
            }
        }

        let status = self.child.wait()?;
        if !status.success() {
            return Err(QnError::CommandFailed(format!(
                "{} exited with {}",
                self.script, status
            )));
        }
        Ok(())
    }
}
