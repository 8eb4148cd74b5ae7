use crate::clock::SystemClock;
use crate::config::Config;
use crate::docker::container::{ContainerManager, DockerCommandLine};
use crate::docker::machine;
use crate::errors::Result;
use crate::server::ServerProcess;
use std::env;

/// Start the database container if needed, then launch the dev server
/// against it and stay attached in the foreground until it exits.
pub fn run() -> Result<()> {
    let cwd = env::current_dir()?;
    let config = Config::load(&cwd)?;

    let manager = ContainerManager::new(&config.docker, DockerCommandLine, SystemClock);
    manager.verify_daemon()?;

    let ip = machine::machine_ip()?;

    manager.ensure_running()?;

    let server = ServerProcess::spawn(&config.server, &ip)?;
    server.stream_to_stdout()
}
