//! Letter frequency histograms. Feed text to a [`Histogram`] a chunk at a
//! time, then print it once the input is done:
//!
//! ```
//! let mut h = charfreq::Histogram::new();
//! h.add("Hello, ");
//! h.add("World!");
//! assert!(h.to_string().starts_with(&format!("L: {} 25.00%", "#".repeat(25))));
//! ```

mod counts;
mod histogram;
mod render;

pub use counts::CharCounts;
pub use histogram::Histogram;
pub use render::{render, Report, ReportEntry, THRESHOLD};
