//! Year-scaled citation threshold.

use crate::error::Result;
use crate::extract::{num_citations, year_for, DEFAULT_YEAR};
use crate::record::ResultRecord;

/// Parameters for deciding whether a paper is well cited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterArgs {
    /// Citations per year required for inclusion
    pub required_annual_count: u32,
    /// Last full year of the survey
    pub final_year: i32,
    /// Year reported in the table for papers with no detectable year.
    /// The threshold itself always assumes [`DEFAULT_YEAR`].
    pub default_year: i32,
}

impl Default for FilterArgs {
    fn default() -> Self {
        Self {
            required_annual_count: 8,
            final_year: 2020,
            default_year: DEFAULT_YEAR,
        }
    }
}

impl FilterArgs {
    /// Citations a paper from `year` must exceed.
    ///
    /// Papers from the final year onwards get half a year's worth.
    pub fn threshold(&self, year: i32) -> f64 {
        let annual = f64::from(self.required_annual_count);
        if year >= self.final_year {
            annual / 2.0
        } else {
            f64::from(self.final_year - year) * annual
        }
    }
}

/// True if the record has strictly more citations than its year requires.
///
/// Papers without a detectable year are treated as from [`DEFAULT_YEAR`],
/// whatever `args.default_year` says.
pub fn has_enough_citations(record: &ResultRecord, args: &FilterArgs) -> Result<bool> {
    let year = year_for(record, DEFAULT_YEAR)?;
    Ok(num_citations(record) as f64 > args.threshold(year))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CitedBy, InlineLinks, PublicationInfo};

    fn paper(year: i32, citations: u64) -> ResultRecord {
        ResultRecord {
            title: "t".to_string(),
            result_id: "r".to_string(),
            publication_info: PublicationInfo {
                summary: Some(format!("A Author - Venue, {} - x.org", year)),
            },
            inline_links: InlineLinks {
                cited_by: Some(CitedBy {
                    total: Some(citations),
                    cites_id: Some("c".to_string()),
                }),
                related_pages_link: None,
            },
            snippet: None,
            link: None,
            resources: Vec::new(),
        }
    }

    #[test]
    fn test_final_year_boundary_is_strict() {
        let args = FilterArgs::default();
        assert!(has_enough_citations(&paper(2020, 5), &args).expect("filter"));
        assert!(!has_enough_citations(&paper(2020, 4), &args).expect("filter"));
    }

    #[test]
    fn test_recent_papers_use_half_year() {
        let args = FilterArgs::default();
        assert!(has_enough_citations(&paper(2021, 5), &args).expect("filter"));
        assert!(!has_enough_citations(&paper(2021, 3), &args).expect("filter"));
    }

    #[test]
    fn test_older_papers_scale_with_age() {
        let args = FilterArgs::default();
        // 2015 -> 5 years * 8 = 40
        assert!(!has_enough_citations(&paper(2015, 40), &args).expect("filter"));
        assert!(has_enough_citations(&paper(2015, 41), &args).expect("filter"));
    }

    #[test]
    fn test_odd_annual_count_keeps_fraction() {
        let args = FilterArgs {
            required_annual_count: 7,
            ..Default::default()
        };
        assert_eq!(args.threshold(2020), 3.5);
        assert!(has_enough_citations(&paper(2020, 4), &args).expect("filter"));
        assert!(!has_enough_citations(&paper(2020, 3), &args).expect("filter"));
    }

    #[test]
    fn test_missing_year_assumes_fixed_default() {
        let mut p = paper(2000, 5);
        p.publication_info.summary = Some("A Author - Venue".to_string());
        // assumed 2022 >= 2020 -> threshold 4
        assert!(has_enough_citations(&p, &FilterArgs::default()).expect("filter"));

        let old_default = FilterArgs {
            default_year: 2010,
            ..Default::default()
        };
        assert!(has_enough_citations(&p, &old_default).expect("filter"));

        let mut few = p.clone();
        if let Some(c) = few.inline_links.cited_by.as_mut() {
            c.total = Some(4);
        }
        assert!(!has_enough_citations(&few, &old_default).expect("filter"));
    }
}
