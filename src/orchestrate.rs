//! Batch orchestration: the sequential tools × files loop.
//!
//! One runner is constructed per requested tool and reused across all
//! requested files. Aliases missing from the registry are skipped, and a
//! failing tool never aborts the batch; the worst case for one tool × file
//! pair is an empty report.

use crate::config::Effective;
use crate::output;
use crate::registry;
use crate::runner::Runner;

/// Run every requested tool over every requested file, strictly in order.
/// Each invocation blocks until the spawned tool's output is drained.
pub fn run_batch(eff: &Effective) {
    for alias in &eff.tools {
        let Some(kind) = registry::lookup(alias) else {
            continue;
        };
        let mut runner = Runner::new(kind, &[], true, eff);
        for filename in &eff.files {
            output::print_separator();
            output::print_progress(alias, filename);
            runner.run(filename);
        }
    }
}
