//! Scenario runner for batch projections
//!
//! Loads tables once, then runs many projections against them: a batch of
//! people in parallel, or one person under each macroeconomic prognosis.

use std::path::Path;

use log::info;
use rayon::prelude::*;

use crate::assumptions::{Assumptions, PrognosisTable, PrognosisVariant};
use crate::career::SimulationInputs;
use crate::error::Result;
use crate::projection::{EngineConfig, PensionEngine, SimulationResults};

/// One prognosis variant's projection
#[derive(Debug, Clone)]
pub struct VariantResult {
    pub variant: PrognosisVariant,
    pub results: SimulationResults,
}

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv_path(Path::new("data/tables"), PrognosisVariant::Moderate, EngineConfig::default())?;
/// let results = runner.run(&inputs)?;
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    /// Tables before any prognosis was applied
    historical: Assumptions,
    /// Tables used for single and batch runs
    assumptions: Assumptions,
    config: EngineConfig,
}

impl ScenarioRunner {
    /// Built-in tables with the moderate prognosis
    pub fn new(config: EngineConfig) -> Self {
        let historical = Assumptions::historical_tables();
        let assumptions =
            historical.clone().with_prognosis(&PrognosisTable::default_variant(PrognosisVariant::Moderate));
        Self {
            historical,
            assumptions,
            config,
        }
    }

    /// Load tables and the given prognosis from the default directory
    pub fn from_csv(variant: PrognosisVariant, config: EngineConfig) -> Result<Self> {
        Self::from_csv_path(Path::new(crate::assumptions::loader::DEFAULT_TABLES_PATH), variant, config)
    }

    /// Load tables and the given prognosis from a specific directory
    pub fn from_csv_path(path: &Path, variant: PrognosisVariant, config: EngineConfig) -> Result<Self> {
        let historical = Assumptions::from_csv_path(path)?;
        let prognosis = PrognosisTable::load(path, variant)?;
        let assumptions = historical.clone().with_prognosis(&prognosis);
        Ok(Self {
            historical,
            assumptions,
            config,
        })
    }

    /// Use pre-built tables as-is; variant runs extend the same tables
    pub fn with_assumptions(assumptions: Assumptions, config: EngineConfig) -> Self {
        Self {
            historical: assumptions.clone(),
            assumptions,
            config,
        }
    }

    /// Run a single projection
    pub fn run(&self, inputs: &SimulationInputs) -> Result<SimulationResults> {
        self.engine().project(inputs)
    }

    /// Run projections for many inputs in parallel, results in input order
    pub fn run_batch(&self, batch: &[SimulationInputs]) -> Vec<Result<SimulationResults>> {
        info!("Running batch of {} projections", batch.len());
        let engine = self.engine();
        batch.par_iter().map(|inputs| engine.project(inputs)).collect()
    }

    /// Run one person under each prognosis
    pub fn run_variants(&self, inputs: &SimulationInputs, prognoses: &[PrognosisTable]) -> Result<Vec<VariantResult>> {
        prognoses
            .par_iter()
            .map(|prognosis| -> Result<VariantResult> {
                let assumptions = self.historical.clone().with_prognosis(prognosis);
                let engine = PensionEngine::new(assumptions, self.config.clone());
                Ok(VariantResult {
                    variant: prognosis.variant,
                    results: engine.project(inputs)?,
                })
            })
            .collect()
    }

    fn engine(&self) -> PensionEngine {
        PensionEngine::new(self.assumptions.clone(), self.config.clone())
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    /// Get mutable reference to the tables for customization
    pub fn assumptions_mut(&mut self) -> &mut Assumptions {
        &mut self.assumptions
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::career::Sex;

    fn runner() -> ScenarioRunner {
        ScenarioRunner::new(EngineConfig::for_year(2026))
    }

    #[test]
    fn test_batch_matches_single_runs() {
        let runner = runner();
        let batch: Vec<_> = [5_000.0, 7_000.0, 9_000.0]
            .iter()
            .map(|&gross| SimulationInputs::new(30, Sex::Female, gross, 2015, 2060))
            .collect();

        let results = runner.run_batch(&batch);
        assert_eq!(results.len(), 3);
        for (inputs, result) in batch.iter().zip(&results) {
            assert_eq!(result.as_ref().unwrap(), &runner.run(inputs).unwrap());
        }

        // Higher salary should result in higher pension
        let pensions: Vec<f64> = results.iter().map(|r| r.as_ref().unwrap().nominal_pension).collect();
        assert!(pensions[0] < pensions[1] && pensions[1] < pensions[2]);
    }

    #[test]
    fn test_batch_keeps_failures_in_place() {
        let runner = runner();
        let batch = vec![
            SimulationInputs::new(30, Sex::Male, 7_000.0, 2015, 2060),
            SimulationInputs::new(30, Sex::Male, -1.0, 2015, 2060),
        ];

        let results = runner.run_batch(&batch);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }

    #[test]
    fn test_from_csv_tables() {
        let runner =
            ScenarioRunner::from_csv(PrognosisVariant::Moderate, EngineConfig::for_year(2026)).expect("Failed to load tables");
        let results = runner.run(&SimulationInputs::new(30, Sex::Female, 7_000.0, 2015, 2060)).unwrap();

        assert_eq!(results.capital_path.len(), 46);
        assert!(results.nominal_pension > 0.0);
    }

    #[test]
    fn test_variants_differ() {
        let runner = runner();
        let inputs = SimulationInputs::new(30, Sex::Female, 7_000.0, 2015, 2060);
        let prognoses = [
            PrognosisTable::default_variant(PrognosisVariant::Pessimistic),
            PrognosisTable::default_variant(PrognosisVariant::Optimistic),
        ];

        let variants = runner.run_variants(&inputs, &prognoses).unwrap();
        assert_eq!(variants[0].variant, PrognosisVariant::Pessimistic);
        assert!(variants[1].results.total_capital > variants[0].results.total_capital);
    }
}
