pub mod config;
pub mod pipeline;

pub use pipeline::prescription::{
    parse_prescription, DoctorDetails, Medication, ParseError, ParsedPrescription,
    PrescriptionParser, SoftFailure,
};

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber. `RUST_LOG` overrides the
/// default filter. Calling it twice is harmless.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
