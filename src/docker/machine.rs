use crate::errors::{QnError, Result};
use std::process::Command;

/// Resolve the docker-machine VM address the container's ports are exposed
/// on. The dev server is pointed at this address rather than localhost.
pub fn machine_ip() -> Result<String> {
    println!("cmd: docker-machine ip default");
    let output = Command::new("docker-machine")
        .args(["ip", "default"])
        .output()
        .map_err(|e| QnError::CommandFailed(format!("docker-machine ip default: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(QnError::CommandFailed(format!(
            "docker-machine ip default: {}",
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
