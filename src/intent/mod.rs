//! Intent extracted from a document: one fragment type per kind of table,
//! and the requests assembled from them. Absence is explicit in these types;
//! the reserved placeholder strings only appear once serialized.

mod control;
mod experiment;
mod lab;
mod measurement;
mod named;
mod opil;
mod parameter;
mod request;

pub use control::{ControlIntent, ControlTableIntent};
pub use experiment::{ExperimentSpecification, ExperimentStatus, ExperimentStatusTable, StatusState};
pub use lab::LabIntent;
pub use measurement::{ControlReference, MeasurementIntent, MeasurementTableIntent};
pub use named::{NamedLink, ReagentEntry, ReagentValue};
pub use opil::{ExperimentalRequest, OpilMeasurement, ProtocolInterface, ProtocolParameter, SampleSet};
pub use parameter::{ParameterIntent, ParameterValue};
pub use request::{ExperimentRunRequest, ExperimentStatusRequest, Request, Run};

/// Written where a reagent or strain has no catalog URI.
pub const NO_PROGRAM_DICTIONARY_ENTRY: &str = "NO PROGRAM DICTIONARY ENTRY";

/// Written where the experiment id is not yet known.
pub const TBD: &str = "TBD";

/// Lab used when a document names none.
pub const DEFAULT_LAB: &str = "tacc";

/// Written for a challenge problem that could not be mapped.
pub const UNDEFINED: &str = "Undefined";

/// Written for an experiment reference that could not be mapped.
pub const UNKNOWN: &str = "Unknown";
