//! Run statistics collection and reporting.
//!
//! This module tracks what the driver loop did during a run:
//! 1. **Loop:** Number of evaluation steps performed.
//! 2. **Time:** Final simulation time and the per-step time delta.
//! 3. **Host:** Wall-clock seconds spent in the loop and derived throughput.

/// Statistics for one completed run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStats {
    /// Number of model evaluations performed.
    pub steps: u64,
    /// Simulation time when the loop exited.
    pub final_time: u64,
    /// Time units added per loop iteration.
    pub time_step: u64,
    /// Host wall-clock seconds spent between loop start and release.
    pub host_seconds: f64,
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"time"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "time"];

impl RunStats {
    /// Evaluation steps per host second, or `0.0` for an instantaneous run.
    pub fn steps_per_second(&self) -> f64 {
        if self.host_seconds > 0.0 {
            self.steps as f64 / self.host_seconds
        } else {
            0.0
        }
    }

    /// Renders the requested sections as text.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]; an
    /// empty slice selects all of them. Unknown names are ignored.
    pub fn render_sections(&self, sections: &[String]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let mut out = String::new();

        if want("summary") {
            out.push_str("==========================================================\n");
            out.push_str("SIMULATION STATISTICS\n");
            out.push_str("==========================================================\n");
            out.push_str(&format!("host_seconds             {:.4} s\n", self.host_seconds));
            out.push_str(&format!("sim_steps                {}\n", self.steps));
            out.push_str(&format!(
                "sim_rate                 {:.2} steps/s\n",
                self.steps_per_second()
            ));
            out.push_str("----------------------------------------------------------\n");
        }
        if want("time") {
            out.push_str("SIMULATION TIME\n");
            out.push_str(&format!("  time.final             {}\n", self.final_time));
            out.push_str(&format!("  time.step              {}\n", self.time_step));
            out.push_str("----------------------------------------------------------\n");
        }
        out
    }

    /// Prints only the requested statistics sections to stdout.
    pub fn print_sections(&self, sections: &[String]) {
        print!("{}", self.render_sections(sections));
    }

    /// Prints every section to stdout.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
