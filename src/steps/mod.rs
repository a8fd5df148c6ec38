//! Migration steps.
//!
//! Each step is an independent unit run against the working directory. The
//! default pipeline order matters: later steps rely on the files earlier
//! steps produce (`delete-spec` in particular requires the manifest written
//! by `write-manifest`).

mod commit_branch;
mod connector_entry;
mod delete_paramgen;
mod delete_spec;
mod lifecycle;
mod makefile;
mod scripts;
mod update_deps;
mod update_destination;
mod update_source;
mod upgrade_sdk;
mod workflows;
mod write_manifest;

pub use commit_branch::CommitBranch;
pub use connector_entry::ConnectorEntry;
pub use delete_paramgen::DeleteParamgen;
pub use delete_spec::DeleteSpec;
pub use makefile::Makefile;
pub use scripts::Scripts;
pub use update_deps::UpdateDeps;
pub use update_destination::UpdateDestination;
pub use update_source::UpdateSource;
pub use upgrade_sdk::UpgradeSdk;
pub use workflows::Workflows;
pub use write_manifest::WriteManifest;

use crate::pipeline::{MigrationStep, Pipeline};

/// The standard migration, in order.
pub fn default_pipeline() -> Pipeline {
    Pipeline::new(vec![
        Box::new(UpdateDeps),
        Box::new(UpgradeSdk),
        Box::new(ConnectorEntry),
        Box::new(UpdateSource),
        Box::new(UpdateDestination),
        Box::new(WriteManifest),
        Box::new(DeleteParamgen),
        Box::new(DeleteSpec),
        Box::new(Workflows),
        Box::new(Makefile),
        Box::new(Scripts),
    ])
}

/// Every step selectable by name, including the ones outside the default
/// order.
pub fn step_names() -> &'static [&'static str] {
    &[
        "update-deps",
        "upgrade-sdk",
        "connector-entry",
        "update-source",
        "update-destination",
        "write-manifest",
        "delete-paramgen",
        "delete-spec",
        "workflows",
        "makefile",
        "scripts",
        "commit-branch",
    ]
}

/// Look up a single step by name.
pub fn step_named(name: &str) -> Option<Box<dyn MigrationStep>> {
    let step: Box<dyn MigrationStep> = match name {
        "update-deps" => Box::new(UpdateDeps),
        "upgrade-sdk" => Box::new(UpgradeSdk),
        "connector-entry" => Box::new(ConnectorEntry),
        "update-source" => Box::new(UpdateSource),
        "update-destination" => Box::new(UpdateDestination),
        "write-manifest" => Box::new(WriteManifest),
        "delete-paramgen" => Box::new(DeleteParamgen),
        "delete-spec" => Box::new(DeleteSpec),
        "workflows" => Box::new(Workflows),
        "makefile" => Box::new(Makefile),
        "scripts" => Box::new(Scripts),
        "commit-branch" => Box::new(CommitBranch),
        _ => return None,
    };
    Some(step)
}
