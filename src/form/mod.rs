pub mod entries;
pub mod error;
pub mod pager;
pub mod rules;
pub mod snapshot;
pub mod state;

pub use entries::{EntryList, EnvVar, ListEntry, ListKind, SpecEntryValues, Validated};
pub use error::FormError;
pub use pager::{Pager, DEFAULT_PAGE_SIZE};
pub use rules::{StandardRules, ValidationIssue, ValidationRules, MIN_CPUS, MIN_REPLICAS};
pub use snapshot::FormSnapshot;
pub use state::{ExperimentForm, FormOptions, DEFAULT_NAMESPACE};
