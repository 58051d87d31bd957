//! Output formatting and logging utilities

use crate::spins::Lattice;
use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::time::SystemTime as StdSystemTime;
use tracing::info;
use tracing_subscriber::{
    fmt::format::Writer, fmt::layer, fmt::time::FormatTime, layer::SubscriberExt,
    util::SubscriberInitExt, Registry,
};

/// Wall-clock timer with second precision
struct SecondPrecisionTimer;

impl FormatTime for SecondPrecisionTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        let now = StdSystemTime::now();
        let duration = now
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default();

        let total_seconds = duration.as_secs();
        let hours = (total_seconds / 3600) % 24;
        let minutes = (total_seconds / 60) % 60;
        let seconds = total_seconds % 60;

        write!(w, "{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

/// Install the global tracing subscriber, logging to `log_path` when given
/// and to stdout otherwise.
///
/// Fails if the log file cannot be created; no subscriber is installed then.
pub fn setup_output(log_path: Option<&Path>) -> io::Result<()> {
    let base = layer().with_timer(SecondPrecisionTimer);
    match log_path {
        Some(path) => {
            let log = File::create(path)?;
            Registry::default()
                .with(base.with_writer(log).with_ansi(false))
                .init();
            info!("Logging to {}", path.display());
        }
        None => {
            Registry::default()
                .with(base.with_writer(io::stdout).with_ansi(true))
                .init();
        }
    }
    Ok(())
}

/// Write every spin of `lattice` as a whitespace-separated table.
///
/// The header line is `# nx ny sublattices`, followed by one row per site:
/// `i j sublattice sx sy sz`, in storage order.
pub fn write_spins<W: Write, L: Lattice>(writer: &mut W, lattice: &L) -> io::Result<()> {
    let (nx, ny) = lattice.dims();
    let sublattices = lattice.sublattices();
    writeln!(writer, "# {} {} {}", nx, ny, sublattices)?;

    for (idx, s) in lattice.as_slice().iter().enumerate() {
        let cell = idx / sublattices;
        writeln!(
            writer,
            "{} {} {} {:+.10} {:+.10} {:+.10}",
            cell / ny,
            cell % ny,
            idx % sublattices,
            s.x,
            s.y,
            s.z
        )?;
    }
    Ok(())
}
