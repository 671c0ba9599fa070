//! Decoded solutions.
//!
//! A [`SolutionSet`] is what one decode of one report produces. It is never
//! merged with another set.

use std::fmt;

use serde::Serialize;

use crate::mode::SolverMode;

/// One material of an evaluated structure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialRecord {
    pub name: String,
    pub cost: f64,
    pub money_unit: Option<String>,
    pub flow: f64,
    pub flow_unit: Option<String>,
}

impl MaterialRecord {
    /// A material the solver reported as `balanced`: zero cost and zero flow.
    pub fn balanced(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cost: 0.0,
            money_unit: None,
            flow: 0.0,
            flow_unit: None,
        }
    }

    pub fn is_balanced(&self) -> bool {
        self.money_unit.is_none() && self.cost == 0.0 && self.flow == 0.0
    }
}

/// One operating unit of an evaluated structure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperatingUnitRecord {
    /// Capacity multiplier chosen by the solver.
    pub size: f64,
    pub name: String,
    pub cost: f64,
    pub cost_unit: Option<String>,
}

/// How a solution is identified in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SolutionId {
    /// A `Feasible structure` block: 0-based position plus the solver's own
    /// label (e.g. `#1`).
    Feasible { index: usize, label: String },
    /// The maximal structure of an MSG report.
    Maximal,
    /// A `Solution structure` block with its solver-assigned number.
    Structure { number: String },
}

impl fmt::Display for SolutionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolutionId::Feasible { index, .. } => write!(f, "#{}", index + 1),
            SolutionId::Maximal => write!(f, "0"),
            SolutionId::Structure { number } => write!(f, "#{number}"),
        }
    }
}

/// Materials and operating units taking part in a structure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StructureContents {
    /// Per-item figures, reported by SSGLP and ABB.
    Evaluated {
        materials: Vec<MaterialRecord>,
        operating_units: Vec<OperatingUnitRecord>,
    },
    /// Bare names, reported by MSG and SSG.
    Listed {
        materials: Vec<String>,
        operating_units: Vec<String>,
    },
}

/// One structure found by the solver.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    pub id: SolutionId,
    pub contents: StructureContents,
    /// Present for evaluated structures, `0` for the maximal structure, absent
    /// for listed solution structures.
    pub total_cost: Option<f64>,
}

impl Solution {
    pub fn material_names(&self) -> Vec<&str> {
        match &self.contents {
            StructureContents::Evaluated { materials, .. } => {
                materials.iter().map(|m| m.name.as_str()).collect()
            }
            StructureContents::Listed { materials, .. } => {
                materials.iter().map(String::as_str).collect()
            }
        }
    }

    pub fn operating_unit_names(&self) -> Vec<&str> {
        match &self.contents {
            StructureContents::Evaluated {
                operating_units, ..
            } => operating_units.iter().map(|o| o.name.as_str()).collect(),
            StructureContents::Listed {
                operating_units, ..
            } => operating_units.iter().map(String::as_str).collect(),
        }
    }

    /// Record for a material, if this structure carries figures.
    pub fn material(&self, name: &str) -> Option<&MaterialRecord> {
        match &self.contents {
            StructureContents::Evaluated { materials, .. } => {
                materials.iter().find(|m| m.name == name)
            }
            StructureContents::Listed { .. } => None,
        }
    }

    /// Record for an operating unit, if this structure carries figures.
    pub fn operating_unit(&self, name: &str) -> Option<&OperatingUnitRecord> {
        match &self.contents {
            StructureContents::Evaluated {
                operating_units, ..
            } => operating_units.iter().find(|o| o.name == name),
            StructureContents::Listed { .. } => None,
        }
    }

    /// Whether `name` is a material or operating unit of this structure.
    pub fn contains(&self, name: &str) -> bool {
        self.material_names().contains(&name) || self.operating_unit_names().contains(&name)
    }

    /// Whether the structure has no materials and no operating units.
    pub fn is_empty(&self) -> bool {
        self.material_names().is_empty() && self.operating_unit_names().is_empty()
    }
}

/// All structures decoded from one report, in report order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolutionSet {
    mode: SolverMode,
    solutions: Vec<Solution>,
}

impl SolutionSet {
    pub fn new(mode: SolverMode, solutions: Vec<Solution>) -> Self {
        Self { mode, solutions }
    }

    /// Mode of the report the set was decoded from.
    pub fn mode(&self) -> SolverMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    /// `false` when the solver reported no structure at all.
    pub fn has_feasible_solution(&self) -> bool {
        !self.solutions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Solution> {
        self.solutions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Solution> {
        self.solutions.iter()
    }

    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    pub fn into_solutions(self) -> Vec<Solution> {
        self.solutions
    }

    /// Material names of every solution, in solution order.
    pub fn material_names(&self) -> Vec<Vec<&str>> {
        self.solutions.iter().map(Solution::material_names).collect()
    }

    /// Operating-unit names of every solution, in solution order.
    pub fn operating_unit_names(&self) -> Vec<Vec<&str>> {
        self.solutions
            .iter()
            .map(Solution::operating_unit_names)
            .collect()
    }

    /// Total cost of every solution, in solution order.
    pub fn costs(&self) -> Vec<Option<f64>> {
        self.solutions.iter().map(|s| s.total_cost).collect()
    }

    /// The cheapest solution that reports a cost.
    pub fn cheapest(&self) -> Option<&Solution> {
        self.solutions
            .iter()
            .filter(|s| s.total_cost.is_some())
            .min_by(|a, b| {
                let (a, b) = (a.total_cost.unwrap_or(0.0), b.total_cost.unwrap_or(0.0));
                a.total_cmp(&b)
            })
    }

    /// Pretty-printed JSON for external consumers.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl<'a> IntoIterator for &'a SolutionSet {
    type Item = &'a Solution;
    type IntoIter = std::slice::Iter<'a, Solution>;

    fn into_iter(self) -> Self::IntoIter {
        self.solutions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluated(index: usize, cost: f64) -> Solution {
        Solution {
            id: SolutionId::Feasible {
                index,
                label: format!("#{}", index + 1),
            },
            contents: StructureContents::Evaluated {
                materials: vec![
                    MaterialRecord {
                        name: "M1".into(),
                        cost: 0.0,
                        money_unit: Some("USD/y".into()),
                        flow: 3.0,
                        flow_unit: Some("t/y".into()),
                    },
                    MaterialRecord::balanced("M2"),
                ],
                operating_units: vec![OperatingUnitRecord {
                    size: 1.0,
                    name: "O1".into(),
                    cost,
                    cost_unit: Some("USD/y".into()),
                }],
            },
            total_cost: Some(cost),
        }
    }

    #[test]
    fn per_solution_collections() {
        let set = SolutionSet::new(
            SolverMode::Abb,
            vec![evaluated(0, 2400.0), evaluated(1, 2600.0)],
        );
        assert_eq!(set.len(), 2);
        assert!(set.has_feasible_solution());
        assert_eq!(set.costs(), vec![Some(2400.0), Some(2600.0)]);
        assert_eq!(set.material_names()[1], vec!["M1", "M2"]);
        assert_eq!(set.operating_unit_names()[0], vec!["O1"]);
        assert_eq!(set.cheapest().map(|s| s.id.to_string()), Some("#1".into()));
        assert_eq!((&set).into_iter().count(), 2);
    }

    #[test]
    fn record_lookup() {
        let s = evaluated(0, 2400.0);
        assert!(s.material("M2").unwrap().is_balanced());
        assert!(!s.material("M1").unwrap().is_balanced());
        assert_eq!(s.operating_unit("O1").unwrap().cost, 2400.0);
        assert!(s.contains("O1"));
        assert!(!s.contains("O2"));
    }

    #[test]
    fn listed_structure() {
        let s = Solution {
            id: SolutionId::Structure {
                number: "3".into(),
            },
            contents: StructureContents::Listed {
                materials: vec!["M1".into(), "M3".into()],
                operating_units: vec!["O2".into()],
            },
            total_cost: None,
        };
        assert_eq!(s.id.to_string(), "#3");
        assert_eq!(s.material_names(), vec!["M1", "M3"]);
        assert!(s.material("M1").is_none());
        assert!(!s.is_empty());
    }

    #[test]
    fn empty_set() {
        let set = SolutionSet::new(SolverMode::Ssg, Vec::new());
        assert!(set.is_empty());
        assert!(!set.has_feasible_solution());
        assert!(set.cheapest().is_none());
        assert!(set.get(0).is_none());
    }

    #[test]
    fn json_export() {
        let set = SolutionSet::new(SolverMode::Abb, vec![evaluated(0, 2400.0)]);
        let json: serde_json::Value = serde_json::from_str(&set.to_json().unwrap()).unwrap();
        assert_eq!(json["mode"], "INSIDEOUT");
        assert_eq!(json["solutions"][0]["id"]["kind"], "feasible");
        assert_eq!(json["solutions"][0]["id"]["label"], "#1");
        assert_eq!(json["solutions"][0]["contents"]["kind"], "evaluated");
        assert_eq!(json["solutions"][0]["total_cost"], 2400.0);
        assert_eq!(
            json["solutions"][0]["contents"]["materials"][1]["money_unit"],
            serde_json::Value::Null
        );
    }
}
