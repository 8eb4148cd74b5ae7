// Container lifecycle for the local database dependency
// Decides whether to start, reuse, or wait for the container the dev server
// needs, based on the text listing the docker CLI prints

use crate::clock::Clock;
use crate::config::DockerConfig;
use crate::errors::{QnError, Result};
use std::io::Write;
use std::process::Command;
use std::time::Duration;

/// Container state as classified from the `docker ps -a` listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerState {
    Running,
    Exited,
}

/// One row of the container listing, reduced to what the helper needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRecord {
    pub id: String,
    pub state: ContainerState,
}

/// The process-manager commands the lifecycle helper issues
pub trait DockerHost {
    /// Trivial status command, used only to check the daemon is reachable
    fn ping(&self) -> Result<()>;

    /// Text listing of all containers, running or not
    fn list_all(&self) -> Result<String>;

    /// Start a detached container with a name and host:container port mapping
    fn run_detached(&self, image: &str, name: &str, port_mapping: &str) -> Result<()>;
}

/// The real docker CLI, invoked as a subprocess. Output of the start and
/// ping commands goes straight to the terminal, like running them by hand.
pub struct DockerCommandLine;

fn echo_cmd(parts: &[&str]) {
    println!("cmd: {}", parts.join(" "));
}

impl DockerHost for DockerCommandLine {
    fn ping(&self) -> Result<()> {
        echo_cmd(&["docker", "ps"]);
        let status = Command::new("docker")
            .arg("ps")
            .status()
            .map_err(|e| QnError::DockerError(format!("docker ps: {}", e)))?;
        if !status.success() {
            return Err(QnError::DockerError("docker ps failed".to_string()));
        }
        Ok(())
    }

    fn list_all(&self) -> Result<String> {
        echo_cmd(&["docker", "ps", "-a"]);
        let output = Command::new("docker")
            .args(["ps", "-a"])
            .output()
            .map_err(|e| QnError::DockerError(format!("docker ps -a: {}", e)))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(QnError::DockerError(format!(
                "docker ps -a: {}",
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    fn run_detached(&self, image: &str, name: &str, port_mapping: &str) -> Result<()> {
        let name_arg = format!("--name={}", name);
        let args = ["run", "-d", name_arg.as_str(), "-p", port_mapping, image];
        let mut echoed = vec!["docker"];
        echoed.extend_from_slice(&args);
        echo_cmd(&echoed);
        let status = Command::new("docker")
            .args(args)
            .status()
            .map_err(|e| QnError::DockerError(format!("docker run: {}", e)))?;
        if !status.success() {
            return Err(QnError::DockerError(format!(
                "docker run failed for image {}",
                image
            )));
        }
        Ok(())
    }
}

/// First listing row containing `name`, or None.
///
/// The header line is discarded; data lines are matched by plain substring
/// against the whole row, not by column. Imperfect on purpose: a name that
/// is a substring of another container's name or image matches that row
/// too, and only the first match is ever looked at.
pub fn find_in_listing(listing: &str, name: &str) -> Option<ContainerRecord> {
    let mut lines = listing.lines();
    lines.next()?; // header

    for line in lines {
        if !line.contains(name) {
            continue;
        }
        let id = line.split_whitespace().next()?.to_string();
        let state = if line.contains("Exited") {
            ContainerState::Exited
        } else {
            ContainerState::Running
        };
        return Some(ContainerRecord { id, state });
    }
    None
}

/// Manages the lifecycle of the single container the dev server depends on
pub struct ContainerManager<'a, H: DockerHost, C: Clock> {
    config: &'a DockerConfig,
    host: H,
    clock: C,
}

impl<'a, H: DockerHost, C: Clock> ContainerManager<'a, H, C> {
    pub fn new(config: &'a DockerConfig, host: H, clock: C) -> Self {
        Self {
            config,
            host,
            clock,
        }
    }

    /// Check the docker daemon is reachable before anything else runs
    pub fn verify_daemon(&self) -> Result<()> {
        self.host.ping().map_err(|_| QnError::DockerUnavailable)
    }

    /// Look up a container by name in the full listing
    pub fn find_container(&self, name: &str) -> Result<Option<ContainerRecord>> {
        let listing = self.host.list_all()?;
        Ok(find_in_listing(&listing, name))
    }

    /// Start the configured container unless a running one already matches
    /// its name. A stopped match is ignored and a fresh container started;
    /// a failed start aborts the invocation with no cleanup.
    pub fn ensure_running(&self) -> Result<()> {
        let name = &self.config.container_name;
        if let Some(record) = self.find_container(name)? {
            if record.state == ContainerState::Running {
                println!("container {} is already running", name);
                return Ok(());
            }
        }
        self.host
            .run_detached(&self.config.image, name, &self.config.port_mapping())?;
        self.wait_for_settle();
        Ok(())
    }

    /// Fixed countdown giving the container's service time to come up.
    /// Deliberately not a health check.
    fn wait_for_settle(&self) {
        let secs = self.config.settle_secs;
        print!("waiting {} secs for container to start", secs);
        let _ = std::io::stdout().flush();
        for _ in 0..secs {
            print!(".");
            let _ = std::io::stdout().flush();
            self.clock.sleep(Duration::from_secs(1));
        }
        println!();
    }
}
