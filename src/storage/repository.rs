use anyhow::{Context, Result};
use sqlx::{Row, SqlitePool};

use crate::domain::{
    Amount, Category, CategoryValues, ContributionRecord, ExportRow, Member, MemberId, MonthYear,
};

use super::MIGRATION_001_INITIAL;

const CONTRIBUTION_COLUMNS: &str =
    "id, member_id, month, year, attendance, society, uwaka, wawata, construction";

/// Repository for persisting and querying members and contributions.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given URL.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations. Safe to run against an existing database.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;
        tracing::debug!("schema migrations applied");
        Ok(())
    }

    /// Initialize a database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    // ========================
    // Member operations
    // ========================

    /// Insert a member and return it with its assigned id.
    pub async fn insert_member(&self, name: &str) -> Result<Member> {
        let result = sqlx::query("INSERT INTO members (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await
            .context("Failed to save member")?;

        Ok(Member {
            id: result.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    /// Get a member by ID.
    pub async fn get_member(&self, id: MemberId) -> Result<Option<Member>> {
        let row = sqlx::query("SELECT id, name FROM members WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch member")?;

        Ok(row.as_ref().map(Self::row_to_member))
    }

    /// Get a member by exact (case-sensitive) name.
    pub async fn get_member_by_name(&self, name: &str) -> Result<Option<Member>> {
        let row = sqlx::query("SELECT id, name FROM members WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch member by name")?;

        Ok(row.as_ref().map(Self::row_to_member))
    }

    /// List all members ordered by name.
    pub async fn list_members(&self) -> Result<Vec<Member>> {
        let rows = sqlx::query("SELECT id, name FROM members ORDER BY name, id")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list members")?;

        Ok(rows.iter().map(Self::row_to_member).collect())
    }

    fn row_to_member(row: &sqlx::sqlite::SqliteRow) -> Member {
        Member {
            id: row.get("id"),
            name: row.get("name"),
        }
    }

    // ========================
    // Contribution operations
    // ========================

    /// Append a contribution record stamped with the given month and year.
    pub async fn insert_contribution(
        &self,
        member_id: MemberId,
        stamp: &MonthYear,
        values: &CategoryValues,
    ) -> Result<ContributionRecord> {
        let result = sqlx::query(
            r#"
            INSERT INTO contributions (member_id, month, year, attendance, society, uwaka, wawata, construction)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(member_id)
        .bind(&stamp.month)
        .bind(stamp.year)
        .bind(values.get(Category::Attendance))
        .bind(values.get(Category::Society))
        .bind(values.get(Category::Uwaka))
        .bind(values.get(Category::Wawata))
        .bind(values.get(Category::Construction))
        .execute(&self.pool)
        .await
        .context("Failed to save contribution")?;

        Ok(ContributionRecord {
            id: result.last_insert_rowid(),
            member_id,
            month: stamp.month.clone(),
            year: stamp.year,
            values: *values,
        })
    }

    /// List a member's contributions in insertion order.
    pub async fn list_contributions_for_member(
        &self,
        member_id: MemberId,
    ) -> Result<Vec<ContributionRecord>> {
        let query = format!(
            "SELECT {} FROM contributions WHERE member_id = ? ORDER BY id",
            CONTRIBUTION_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(member_id)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list contributions for member")?;

        Ok(rows.iter().map(Self::row_to_contribution).collect())
    }

    /// Sum of all category columns for a member within one year.
    /// Returns zero when there are no matching rows.
    pub async fn sum_year_total(&self, member_id: MemberId, year: i32) -> Result<Amount> {
        let row = sqlx::query(
            r#"
            SELECT COALESCE(SUM(attendance + society + uwaka + wawata + construction), 0.0) as total
            FROM contributions
            WHERE member_id = ? AND year = ?
            "#,
        )
        .bind(member_id)
        .bind(year)
        .fetch_one(&self.pool)
        .await
        .context("Failed to compute year total")?;

        Ok(row.get("total"))
    }

    /// Export rows for a single member, without the member column.
    pub async fn export_rows_for_member(&self, member_id: MemberId) -> Result<Vec<ExportRow>> {
        Ok(self
            .list_contributions_for_member(member_id)
            .await?
            .into_iter()
            .map(|record| ExportRow::new(None, record.month, record.values))
            .collect())
    }

    /// Export rows for every member, joined with member names.
    /// Contributions whose member no longer exists are left out.
    pub async fn export_rows_all(&self) -> Result<Vec<ExportRow>> {
        let rows = sqlx::query(
            r#"
            SELECT m.name AS name, c.month AS month,
                   c.attendance AS attendance, c.society AS society, c.uwaka AS uwaka,
                   c.wawata AS wawata, c.construction AS construction
            FROM contributions c
            JOIN members m ON m.id = c.member_id
            ORDER BY c.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to export contributions")?;

        Ok(rows
            .iter()
            .map(|row| {
                ExportRow::new(
                    Some(row.get("name")),
                    row.get("month"),
                    Self::row_to_values(row),
                )
            })
            .collect())
    }

    fn row_to_values(row: &sqlx::sqlite::SqliteRow) -> CategoryValues {
        // Columns are nullable in the schema; a NULL amount counts as zero.
        Category::ALL
            .iter()
            .fold(CategoryValues::new(), |values, category| {
                let amount: Option<Amount> = row.get(category.as_str());
                values.with(*category, amount.unwrap_or_default())
            })
    }

    fn row_to_contribution(row: &sqlx::sqlite::SqliteRow) -> ContributionRecord {
        ContributionRecord {
            id: row.get("id"),
            member_id: row.get("member_id"),
            month: row.get("month"),
            year: row.get("year"),
            values: Self::row_to_values(row),
        }
    }
}
