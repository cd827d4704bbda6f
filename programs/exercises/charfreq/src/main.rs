use charfreq::Histogram;
use std::io::Write;
use term_macros::*;

// charfreq < corpus.txt
fn main() {
    tool! {
        args: ;

        body: || -> std::io::Result<()> {
            let mut histogram = Histogram::new();
            let mut wtr = readin!(wtr, |chunk: &str| histogram.add(chunk))?;
            log::debug!(
                "{} characters counted, {} distinct",
                histogram.total(),
                histogram.counts().len()
            );

            writeln!(wtr, "{}", histogram)?;
            wtr.flush()
        }
    }
}
