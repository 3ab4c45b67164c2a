//! Pipeline runner for composing and executing frequency steps.

use crate::aggregate::merge_uk;
use crate::data::{Frequency, Roster, StatReport, TotalsTable};
use crate::error::{FtmError, Result};
use crate::report::{assemble_stats, sorted_descending};
use crate::scale::{scale_log, scale_relative};
use crate::tally::CountryTally;
use serde::{Deserialize, Serialize};

/// A step in the frequency pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineStep {
    /// Drop countries without a positive known total.
    RestrictToTotals,
    /// Fold UK constituent countries into United Kingdom, in counts and totals.
    MergeUk,
    /// Percent of the known testers per country.
    ScaleRelative,
    /// log2(x + 1) display smoothing.
    ScaleLog,
}

/// How output values are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleMode {
    /// Raw project member counts.
    Absolute,
    /// Percent of the known testers per country.
    Relative,
    /// log2(count + 1).
    Log,
}

impl ScaleMode {
    fn step(self) -> Option<PipelineStep> {
        match self {
            Self::Absolute => None,
            Self::Relative => Some(PipelineStep::ScaleRelative),
            Self::Log => Some(PipelineStep::ScaleLog),
        }
    }

    /// Check if this mode needs a totals table.
    pub fn needs_totals(self) -> bool {
        matches!(self, Self::Relative)
    }
}

/// Pipeline configuration for serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Name of the pipeline.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Steps to execute.
    pub steps: Vec<PipelineStep>,
    /// Whether to build the statistics report.
    #[serde(default)]
    pub stats: bool,
}

impl PipelineConfig {
    /// Load from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(FtmError::from)
    }

    /// Save to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(FtmError::from)
    }
}

/// Builder for constructing and running frequency pipelines.
#[derive(Debug, Clone)]
pub struct Pipeline {
    steps: Vec<PipelineStep>,
    stats: bool,
    name: String,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    /// Create a new empty pipeline.
    ///
    /// An empty pipeline reports absolute counts.
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            stats: false,
            name: "unnamed".to_string(),
        }
    }

    /// Create from a config.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            steps: config.steps.clone(),
            stats: config.stats,
            name: config.name.clone(),
        }
    }

    /// Set the pipeline name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Keep only countries with a positive known total.
    pub fn restrict_to_totals(mut self) -> Self {
        self.steps.push(PipelineStep::RestrictToTotals);
        self
    }

    /// Add UK merging.
    pub fn merge_uk(mut self) -> Self {
        self.steps.push(PipelineStep::MergeUk);
        self
    }

    /// Add relative scaling.
    pub fn scale_relative(mut self) -> Self {
        self.steps.push(PipelineStep::ScaleRelative);
        self
    }

    /// Add log scaling.
    pub fn scale_log(mut self) -> Self {
        self.steps.push(PipelineStep::ScaleLog);
        self
    }

    /// Add the scaling step for an output mode. Absolute adds nothing.
    pub fn scale(mut self, mode: ScaleMode) -> Self {
        if let Some(step) = mode.step() {
            self.steps.push(step);
        }
        self
    }

    /// Also build the statistics report.
    pub fn with_stats(self) -> Self {
        self.stats(true)
    }

    /// Turn the statistics report on or off.
    pub fn stats(mut self, enabled: bool) -> Self {
        self.stats = enabled;
        self
    }

    /// Steps in execution order.
    pub fn steps(&self) -> &[PipelineStep] {
        &self.steps
    }

    /// Check if any step or the statistics report uses totals.
    pub fn needs_totals(&self) -> bool {
        self.stats
            || self.steps.iter().any(|s| {
                matches!(s, PipelineStep::RestrictToTotals | PipelineStep::ScaleRelative)
            })
    }

    /// Convert to config for serialization.
    pub fn to_config(&self, description: Option<&str>) -> PipelineConfig {
        PipelineConfig {
            name: self.name.clone(),
            description: description.map(String::from),
            steps: self.steps.clone(),
            stats: self.stats,
        }
    }

    /// Run the pipeline on a roster.
    ///
    /// `totals` is copied; UK merging applies to the copy only.
    pub fn run(&self, roster: &Roster, totals: &TotalsTable) -> Result<PipelineOutput> {
        let mut state = PipelineState::new(CountryTally::from_roster(roster), totals.clone());
        log::debug!(
            "Pipeline '{}': {} participants in {} countries",
            self.name,
            state.tally.total(),
            state.tally.len()
        );

        for (i, step) in self.steps.iter().enumerate() {
            state = state.apply(*step).map_err(|e| {
                FtmError::Pipeline(format!("Step {} ({:?}) failed: {}", i + 1, step, e))
            })?;
        }

        state.finalize(&self.name, self.stats)
    }
}

/// Result of a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Pipeline name.
    pub name: String,
    /// Tally after any restriction, before merging.
    pub tally: CountryTally,
    /// Absolute counts after any UK merge, in tally order.
    pub counts: Vec<Frequency>,
    /// Output values, largest first.
    pub frequencies: Vec<Frequency>,
    /// Totals as used, after any UK merge.
    pub totals: TotalsTable,
    /// Statistics report, if requested.
    pub stats: Option<StatReport>,
}

/// Internal state during pipeline execution.
struct PipelineState {
    tally: CountryTally,
    counts: Vec<Frequency>,
    totals: TotalsTable,
    scaled: Option<(PipelineStep, Vec<Frequency>)>,
    uk_merged: bool,
}

impl PipelineState {
    fn new(tally: CountryTally, totals: TotalsTable) -> Self {
        Self {
            counts: tally.to_frequencies(),
            tally,
            totals,
            scaled: None,
            uk_merged: false,
        }
    }

    fn apply(mut self, step: PipelineStep) -> Result<Self> {
        if let Some((previous, _)) = &self.scaled {
            return Err(FtmError::Pipeline(format!(
                "no step may follow {:?}; relative and log scaling are alternatives",
                previous
            )));
        }

        match step {
            PipelineStep::RestrictToTotals => {
                if self.uk_merged {
                    return Err(FtmError::Pipeline(
                        "RestrictToTotals must come before MergeUk".to_string(),
                    ));
                }
                self.tally = self.tally.restrict_to(&self.totals);
                self.counts = self.tally.to_frequencies();
            }
            PipelineStep::MergeUk => {
                // Merging twice would count the constituents twice.
                if self.uk_merged {
                    return Err(FtmError::Pipeline("UK regions already merged".to_string()));
                }
                merge_uk(&mut self.counts);
                self.totals.merge_uk();
                self.uk_merged = true;
            }
            PipelineStep::ScaleRelative => {
                let scaled = scale_relative(&self.counts, &self.totals);
                self.scaled = Some((step, scaled));
            }
            PipelineStep::ScaleLog => {
                let scaled = scale_log(&self.counts);
                self.scaled = Some((step, scaled));
            }
        }
        Ok(self)
    }

    fn finalize(self, name: &str, stats: bool) -> Result<PipelineOutput> {
        let values = match &self.scaled {
            Some((_, scaled)) => scaled.clone(),
            None => self.counts.clone(),
        };
        let stats = if stats {
            Some(assemble_stats(&self.counts, &self.totals)?)
        } else {
            None
        };

        Ok(PipelineOutput {
            name: name.to_string(),
            tally: self.tally,
            counts: self.counts,
            frequencies: sorted_descending(values),
            totals: self.totals,
            stats,
        })
    }
}
