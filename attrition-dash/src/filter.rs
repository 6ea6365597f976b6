//! Client-side employee filtering for the explorer page

use attrition_common::Employee;

/// Age assumed for a record without one when checking an upper bound
const MISSING_AGE_UPPER: i64 = 999;

/// Exact-match filters; `None` or an empty list means "any"
#[derive(Debug, Clone, Default)]
pub struct EmployeeFilter {
    /// Accepted departments
    pub departments: Vec<String>,
    pub title: Option<String>,
    pub age_min: Option<i64>,
    pub age_max: Option<i64>,
}

impl EmployeeFilter {
    /// A missing age fails an upper bound and a positive lower bound
    pub fn matches(&self, employee: &Employee) -> bool {
        let profile = &employee.profile;

        if !self.departments.is_empty() {
            match &profile.departement {
                Some(department) if self.departments.contains(department) => {}
                _ => return false,
            }
        }

        if let Some(title) = &self.title {
            if profile.poste.as_ref() != Some(title) {
                return false;
            }
        }

        if let Some(min) = self.age_min {
            if profile.age.unwrap_or(0) < min {
                return false;
            }
        }

        if let Some(max) = self.age_max {
            if profile.age.unwrap_or(MISSING_AGE_UPPER) > max {
                return false;
            }
        }

        true
    }

    pub fn apply<'a>(&self, employees: &'a [Employee]) -> Vec<&'a Employee> {
        employees.iter().filter(|e| self.matches(e)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.departments.is_empty()
            && self.title.is_none()
            && self.age_min.is_none()
            && self.age_max.is_none()
    }
}
