pub mod patch;

pub use patch::{PatchOptions, PatchOutcome, PatchReport, Patcher};
