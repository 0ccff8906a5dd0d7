//! Read-only statistics over the collected jobs.

use indexmap::IndexMap;

use crate::types::JobRecord;

/// Summary counts for a finished run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobStats {
    pub total_jobs: usize,
    /// Jobs per company, in order of first appearance.
    pub companies: IndexMap<String, usize>,
    pub with_emails: usize,
    pub with_website: usize,
    pub remote: usize,
    pub with_salary: usize,
}

impl JobStats {
    pub fn compute(jobs: &[JobRecord]) -> Self {
        let mut stats = JobStats {
            total_jobs: jobs.len(),
            ..Default::default()
        };

        for job in jobs {
            if let Some(company) = job.company_name() {
                *stats.companies.entry(company.to_string()).or_insert(0) += 1;
            }
            stats.with_emails += usize::from(job.has_emails());
            stats.with_website += usize::from(job.has_company_website());
            stats.remote += usize::from(job.is_remote());
            stats.with_salary += usize::from(job.has_salary_info());
        }

        stats
    }

    /// The `n` most frequent companies; equal counts keep first-appearance order.
    pub fn top_companies(&self, n: usize) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .companies
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        // sort_by is stable
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    /// Jobs that carried a usable company name.
    pub fn jobs_with_company(&self) -> usize {
        self.companies.values().sum()
    }
}
