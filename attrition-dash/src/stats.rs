//! Aggregations for the statistics and home pages
//!
//! Computed over whatever page of employees the API returned. Averages skip
//! absent values and are `None` when nothing is left to average.

use std::borrow::Borrow;
use std::collections::BTreeMap;

use attrition_common::Employee;

/// Width of an age histogram bucket, in years
pub const AGE_BUCKET_WIDTH: i64 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentStats {
    pub name: String,
    pub count: usize,
    pub avg_income: Option<f64>,
    pub avg_satisfaction: Option<f64>,
}

/// `[start, start + AGE_BUCKET_WIDTH)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeBucket {
    pub start: i64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkforceStats {
    /// Table size reported by the API
    pub total: i64,
    /// Rows the figures below are computed on
    pub sample_size: usize,
    pub avg_age: Option<f64>,
    pub avg_satisfaction: Option<f64>,
    pub avg_income: Option<f64>,
    pub avg_tenure: Option<f64>,
    /// Largest department first
    pub departments: Vec<DepartmentStats>,
    /// Most frequent first
    pub genders: Vec<(String, usize)>,
    pub age_histogram: Vec<AgeBucket>,
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

const UNKNOWN_LABEL: &str = "Non renseigné";

fn counts_desc(counts: BTreeMap<String, usize>) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = counts.into_iter().collect();
    // stable: ties stay alphabetical
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

impl WorkforceStats {
    /// Aggregate over owned rows or over a filtered selection of references
    pub fn compute<E: Borrow<Employee>>(total: i64, employees: &[E]) -> Self {
        let employees: Vec<&Employee> = employees.iter().map(|e| e.borrow()).collect();
        let profiles = || employees.iter().map(|e| &e.profile);

        let mut by_department: BTreeMap<String, Vec<&Employee>> = BTreeMap::new();
        for &employee in &employees {
            let name = employee
                .profile
                .departement
                .clone()
                .unwrap_or_else(|| UNKNOWN_LABEL.to_string());
            by_department.entry(name).or_default().push(employee);
        }

        let mut departments: Vec<DepartmentStats> = by_department
            .into_iter()
            .map(|(name, members)| DepartmentStats {
                name,
                count: members.len(),
                avg_income: mean(
                    members
                        .iter()
                        .filter_map(|e| e.profile.revenu_mensuel)
                        .map(|v| v as f64),
                ),
                avg_satisfaction: mean(
                    members.iter().filter_map(|e| e.profile.satisfaction_moyenne),
                ),
            })
            .collect();
        departments.sort_by(|a, b| b.count.cmp(&a.count));

        let mut genders = BTreeMap::new();
        for profile in profiles() {
            let label = profile
                .genre
                .clone()
                .unwrap_or_else(|| UNKNOWN_LABEL.to_string());
            *genders.entry(label).or_insert(0) += 1;
        }

        let mut ages: BTreeMap<i64, usize> = BTreeMap::new();
        for age in profiles().filter_map(|p| p.age) {
            *ages.entry(age.div_euclid(AGE_BUCKET_WIDTH) * AGE_BUCKET_WIDTH).or_insert(0) += 1;
        }

        Self {
            total,
            sample_size: employees.len(),
            avg_age: mean(profiles().filter_map(|p| p.age).map(|v| v as f64)),
            avg_satisfaction: mean(profiles().filter_map(|p| p.satisfaction_moyenne)),
            avg_income: mean(profiles().filter_map(|p| p.revenu_mensuel).map(|v| v as f64)),
            avg_tenure: mean(
                profiles()
                    .filter_map(|p| p.annees_dans_l_entreprise)
                    .map(|v| v as f64),
            ),
            departments,
            genders: counts_desc(genders),
            age_histogram: ages
                .into_iter()
                .map(|(start, count)| AgeBucket { start, count })
                .collect(),
        }
    }
}
