//! Built-in step catalogs for common cluster lifecycle commands.
//!
//! A catalog is just an ordered list of stable step names. Hosts with their own
//! workflow register their own list instead.

use crate::telemetry::Step;

pub const INITIAL_SETUP: &str = "Initial Minikube Setup";
pub const SELECTING_DRIVER: &str = "Selecting Driver";
pub const DOWNLOADING_ARTIFACTS: &str = "Downloading Artifacts";
pub const STARTING_NODE: &str = "Starting Node";
pub const PULLING_BASE_IMAGE: &str = "Pulling Base Image";
pub const RUNNING_LOCALHOST: &str = "Running on Localhost";
pub const LOCAL_OS_RELEASE: &str = "Local OS Release";
pub const CREATING_CONTAINER: &str = "Creating Container";
pub const CREATING_VM: &str = "Creating VM";
pub const CONFIGURING_LOCALHOST_ENV: &str = "Configuring Localhost Environment";
pub const PREPARING_KUBERNETES: &str = "Preparing Kubernetes";
pub const GENERATING_CERTS: &str = "Generating certificates";
pub const BOOTING_CONTROL_PLANE: &str = "Booting control plane";
pub const CONFIGURING_RBAC: &str = "Configuring RBAC rules";
pub const CONFIGURING_CNI: &str = "Configuring CNI";
pub const VERIFYING_KUBERNETES: &str = "Verifying Kubernetes";
pub const ENABLING_ADDONS: &str = "Enabling Addons";
pub const DONE: &str = "Done";

pub const DELETING: &str = "Deleting";
pub const STOPPING: &str = "Stopping";
pub const PAUSING: &str = "Pausing";
pub const UNPAUSING: &str = "Unpausing";

const START: &[&str] = &[
    INITIAL_SETUP,
    SELECTING_DRIVER,
    DOWNLOADING_ARTIFACTS,
    STARTING_NODE,
    PULLING_BASE_IMAGE,
    RUNNING_LOCALHOST,
    LOCAL_OS_RELEASE,
    CREATING_CONTAINER,
    CREATING_VM,
    CONFIGURING_LOCALHOST_ENV,
    PREPARING_KUBERNETES,
    GENERATING_CERTS,
    BOOTING_CONTROL_PLANE,
    CONFIGURING_RBAC,
    CONFIGURING_CNI,
    VERIFYING_KUBERNETES,
    ENABLING_ADDONS,
    DONE,
];

const DELETE: &[&str] = &[DELETING, DONE];
const STOP: &[&str] = &[STOPPING, DONE];
const PAUSE: &[&str] = &[PAUSING, DONE];
const UNPAUSE: &[&str] = &[UNPAUSING, DONE];

/// Catalog for the cluster start command.
pub fn default_start_steps() -> Vec<Step> {
    to_steps(START)
}

/// Catalog for a named command (`start`, `delete`, `stop`, `pause`, `unpause`).
pub fn catalog_for(command: &str) -> Option<Vec<Step>> {
    let names = match command {
        "start" => START,
        "delete" => DELETE,
        "stop" => STOP,
        "pause" => PAUSE,
        "unpause" => UNPAUSE,
        _ => return None,
    };
    Some(to_steps(names))
}

fn to_steps(names: &[&str]) -> Vec<Step> {
    names.iter().map(|name| Step::new(*name)).collect()
}
