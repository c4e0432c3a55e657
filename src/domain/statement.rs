use serde::Serialize;

use super::{Amount, ContributionLine, Member};

/// Everything the detail view shows for one member.
#[derive(Debug, Clone, Serialize)]
pub struct MemberStatement {
    pub member: Member,
    /// All records, in the order they were recorded.
    pub lines: Vec<ContributionLine>,
    pub year: i32,
    pub year_total: Amount,
}

impl MemberStatement {
    /// Sum of every line total across all years.
    pub fn all_time_total(&self) -> Amount {
        sum_totals(&self.lines)
    }
}

pub fn sum_totals(lines: &[ContributionLine]) -> Amount {
    lines.iter().map(|line| line.total).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, CategoryValues, ContributionRecord};

    fn line(id: i64, year: i32, attendance: Amount) -> ContributionLine {
        ContributionRecord {
            id,
            member_id: 1,
            month: "May".into(),
            year,
            values: CategoryValues::new().with(Category::Attendance, attendance),
        }
        .into()
    }

    #[test]
    fn test_all_time_total_spans_years() {
        let statement = MemberStatement {
            member: Member {
                id: 1,
                name: "Alice".into(),
            },
            lines: vec![line(1, 2023, 4.0), line(2, 2024, 6.0)],
            year: 2024,
            year_total: 6.0,
        };
        assert_eq!(statement.all_time_total(), 10.0);
    }

    #[test]
    fn test_sum_totals_empty() {
        assert_eq!(sum_totals(&[]), 0.0);
    }
}
