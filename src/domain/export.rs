use serde::Serialize;

use super::{Amount, Category, CategoryValues, MemberId};

/// Which contributions an export covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportScope {
    Member(MemberId),
    All,
}

impl ExportScope {
    /// Column names, in the same order as `ExportRow::fields`.
    pub fn header(&self) -> Vec<&'static str> {
        let mut header = Vec::with_capacity(8);
        if matches!(self, ExportScope::All) {
            header.push("member");
        }
        header.push("month");
        header.extend(Category::ALL.iter().map(|c| c.as_str()));
        header.push("total");
        header
    }
}

/// One exported contribution.
///
/// `member_name` is only present for `ExportScope::All`, so member-scoped
/// rows have 7 fields and all-member rows have 8.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub member_name: Option<String>,
    pub month: String,
    pub values: CategoryValues,
    pub total: Amount,
}

impl ExportRow {
    pub fn new(member_name: Option<String>, month: String, values: CategoryValues) -> Self {
        Self {
            member_name,
            month,
            total: values.total(),
            values,
        }
    }

    pub fn fields(&self) -> Vec<String> {
        let mut fields = Vec::with_capacity(8);
        if let Some(name) = &self.member_name {
            fields.push(name.clone());
        }
        fields.push(self.month.clone());
        fields.extend(self.values.iter().map(|(_, amount)| amount.to_string()));
        fields.push(self.total.to_string());
        fields
    }
}

impl Serialize for ExportRow {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(None)?;
        if let Some(name) = &self.member_name {
            map.serialize_entry("member", name)?;
        }
        map.serialize_entry("month", &self.month)?;
        for (category, amount) in self.values.iter() {
            map.serialize_entry(category.as_str(), &amount)?;
        }
        map.serialize_entry("total", &self.total)?;
        map.end()
    }
}
