//! Backfilling of empty species folders from a remote archive.

mod enricher;
mod policy;
mod staging;

pub use enricher::{
    EnrichSummary, FolderState, SpeciesOutcome, enrich, enrich_species, folder_state,
};
pub use policy::ClipPolicy;
pub use staging::{StagedClip, cleanup_all_staged};
