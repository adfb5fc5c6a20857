pub mod status;

pub use status::{round_up_to_micros, StatusReport, StatusService};
