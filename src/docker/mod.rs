// Docker process-manager integration
// The docker and docker-machine CLIs are treated as opaque collaborators

pub mod container;
pub mod machine;
