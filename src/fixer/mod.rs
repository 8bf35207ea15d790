pub mod backup;
pub mod drivers;
pub mod mutator;

pub use backup::create_backup;
pub use drivers::{
    run_batch, run_duplicates, run_interactive, ReviewAction, ReviewPrompt, SessionSummary,
    DEFAULT_MIN_PRIORITY,
};
pub use mutator::{render_replacement, Edit, EditOutcome, GuardedMutator};
