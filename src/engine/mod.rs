//! The passes that take a document from tables to requests: classify and
//! parse every table, link the tables to each other, assemble the requests
//! and validate them.

mod assembler;
mod linker;
mod mapper;
mod passes;
mod validator;

pub use assembler::{assemble_request, assemble_run_request, assemble_status_request, document_url};
pub use linker::{check_specifications, link_controls, ControlIndex};
pub use mapper::{ExperimentReference, ReferenceMapper, ReferenceTable};
pub use passes::{Engine, Outcome, TableSummary};
pub use validator::{missing_uris, Validator};
