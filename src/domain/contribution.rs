use serde::{Deserialize, Serialize};

use super::{parse_amount, Amount, MemberId, ParseAmountError};

pub type ContributionId = i64;

/// The fixed set of contribution categories, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Attendance,
    Society,
    Uwaka,
    Wawata,
    Construction,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Attendance,
        Category::Society,
        Category::Uwaka,
        Category::Wawata,
        Category::Construction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Attendance => "attendance",
            Category::Society => "society",
            Category::Uwaka => "uwaka",
            Category::Wawata => "wawata",
            Category::Construction => "construction",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "attendance" => Some(Category::Attendance),
            "society" => Some(Category::Society),
            "uwaka" => Some(Category::Uwaka),
            "wawata" => Some(Category::Wawata),
            "construction" => Some(Category::Construction),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One amount per category, kept in `Category::ALL` order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryValues([Amount; 5]);

impl CategoryValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, category: Category, amount: Amount) -> Self {
        self.set(category, amount);
        self
    }

    pub fn get(&self, category: Category) -> Amount {
        self.0[category.index()]
    }

    pub fn set(&mut self, category: Category, amount: Amount) {
        self.0[category.index()] = amount;
    }

    /// Iterate `(category, amount)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, Amount)> + '_ {
        Category::ALL.iter().map(move |c| (*c, self.get(*c)))
    }

    /// Sum of all five categories. Never stored, always recomputed.
    pub fn total(&self) -> Amount {
        self.0.iter().sum()
    }

    /// Validate raw `(category, text)` entries as a unit.
    ///
    /// Categories left out or left blank count as zero. The first invalid
    /// entry fails the whole set.
    pub fn parse<I, K, V>(entries: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut values = Self::new();
        for (name, raw) in entries {
            let name = name.as_ref();
            let raw = raw.as_ref();
            let category = Category::from_str(name)
                .ok_or_else(|| ValidationError::UnknownCategory(name.to_string()))?;
            let amount = parse_amount(raw).map_err(|reason| ValidationError::InvalidAmount {
                category,
                value: raw.to_string(),
                reason,
            })?;
            values.set(category, amount);
        }
        Ok(values)
    }
}

/// A single dated contribution entry for one member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionRecord {
    pub id: ContributionId,
    pub member_id: MemberId,
    pub month: String,
    pub year: i32,
    pub values: CategoryValues,
}

impl ContributionRecord {
    pub fn total(&self) -> Amount {
        self.values.total()
    }
}

/// A record paired with its computed total, as shown in a detail view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContributionLine {
    pub record: ContributionRecord,
    pub total: Amount,
}

impl From<ContributionRecord> for ContributionLine {
    fn from(record: ContributionRecord) -> Self {
        let total = record.total();
        Self { record, total }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    UnknownCategory(String),
    InvalidAmount {
        category: Category,
        value: String,
        reason: ParseAmountError,
    },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::UnknownCategory(name) => write!(f, "unknown category '{}'", name),
            ValidationError::InvalidAmount {
                category,
                value,
                reason,
            } => write!(f, "invalid {} amount '{}': {}", category, value, reason),
        }
    }
}

impl std::error::Error for ValidationError {}
