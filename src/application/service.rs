use tracing::{debug, info};

use crate::domain::{
    normalize_member_name, Amount, CategoryValues, Clock, ContributionLine,
    ContributionRecord, ExportRow, ExportScope, Member, MemberId, MemberStatement, SystemClock,
};
use crate::storage::Repository;

use super::AppError;

/// Application service providing the ledger operations.
/// This is the primary interface for any client (CLI, exporter, tests).
///
/// Operations that act on one member take the caller's current selection
/// as `Option<MemberId>` and fail with `SelectionRequired` when it is empty.
pub struct LedgerService {
    repo: Repository,
    clock: Box<dyn Clock>,
}

impl LedgerService {
    /// Create a new ledger service reading time from the system clock.
    pub fn new(repo: Repository) -> Self {
        Self {
            repo,
            clock: Box::new(SystemClock),
        }
    }

    /// Replace the clock used to stamp new contributions.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Initialize a database at the given path, creating it if needed.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        info!(database = database_path, "ledger initialized");
        Ok(Self::new(repo))
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let repo = Repository::connect(&db_url).await?;
        debug!(database = database_path, "ledger opened");
        Ok(Self::new(repo))
    }

    // ========================
    // Member operations
    // ========================

    /// Add a new member. The name is trimmed and must be unique.
    pub async fn add_member(&self, name: &str) -> Result<Member, AppError> {
        let name = normalize_member_name(name).ok_or(AppError::EmptyMemberName)?;

        if self.repo.get_member_by_name(&name).await?.is_some() {
            return Err(AppError::DuplicateName(name));
        }

        let member = self.repo.insert_member(&name).await?;
        info!(member_id = member.id, name = %member.name, "member added");
        Ok(member)
    }

    /// List all members ordered by name.
    pub async fn list_members(&self) -> Result<Vec<Member>, AppError> {
        Ok(self.repo.list_members().await?)
    }

    /// Look up a member by exact name.
    pub async fn find_member(&self, name: &str) -> Result<Member, AppError> {
        self.repo
            .get_member_by_name(name.trim())
            .await?
            .ok_or_else(|| AppError::MemberNotFound(name.to_string()))
    }

    async fn selected_member(&self, selected: Option<MemberId>) -> Result<Member, AppError> {
        let id = selected.ok_or(AppError::SelectionRequired)?;
        self.repo
            .get_member(id)
            .await?
            .ok_or_else(|| AppError::MemberNotFound(id.to_string()))
    }

    // ========================
    // Contribution operations
    // ========================

    /// Record a contribution for the selected member.
    ///
    /// `entries` are `(category, raw value)` pairs; omitted or blank categories
    /// count as zero. Nothing is written if any entry fails to validate.
    pub async fn record_contribution<I, K, V>(
        &self,
        selected: Option<MemberId>,
        entries: I,
    ) -> Result<ContributionRecord, AppError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let member = self.selected_member(selected).await?;
        let values = CategoryValues::parse(entries)?;
        self.record_values(&member, &values).await
    }

    async fn record_values(
        &self,
        member: &Member,
        values: &CategoryValues,
    ) -> Result<ContributionRecord, AppError> {
        let stamp = self.clock.month_year();
        let record = self
            .repo
            .insert_contribution(member.id, &stamp, values)
            .await?;

        info!(
            member = %member.name,
            month = %record.month,
            year = record.year,
            total = record.total(),
            "contribution recorded"
        );
        Ok(record)
    }

    /// All of the selected member's contributions in the order they were
    /// recorded, each paired with its total.
    pub async fn get_member_contributions(
        &self,
        selected: Option<MemberId>,
    ) -> Result<Vec<ContributionLine>, AppError> {
        let member = self.selected_member(selected).await?;
        self.contribution_lines(&member).await
    }

    async fn contribution_lines(&self, member: &Member) -> Result<Vec<ContributionLine>, AppError> {
        let records = self.repo.list_contributions_for_member(member.id).await?;
        debug!(member = %member.name, count = records.len(), "loaded contributions");
        Ok(records.into_iter().map(ContributionLine::from).collect())
    }

    /// Sum of the selected member's totals within `year`.
    /// Defaults to the clock's current year; zero when nothing matches.
    pub async fn get_year_total(
        &self,
        selected: Option<MemberId>,
        year: Option<i32>,
    ) -> Result<Amount, AppError> {
        let member = self.selected_member(selected).await?;
        let year = year.unwrap_or_else(|| self.clock.month_year().year);
        let total = self.repo.sum_year_total(member.id, year).await?;
        debug!(member = %member.name, year, total, "computed year total");
        Ok(total)
    }

    /// The detail view for the selected member: every line, plus the total
    /// for the clock's current year.
    pub async fn get_member_statement(
        &self,
        selected: Option<MemberId>,
    ) -> Result<MemberStatement, AppError> {
        let member = self.selected_member(selected).await?;
        let lines = self.contribution_lines(&member).await?;
        let year = self.clock.month_year().year;
        let year_total = lines
            .iter()
            .filter(|line| line.record.year == year)
            .map(|line| line.total)
            .sum();

        Ok(MemberStatement {
            member,
            lines,
            year,
            year_total,
        })
    }

    // ========================
    // Export operations
    // ========================

    /// Rows for a spreadsheet export, in storage order.
    pub async fn export_rows(&self, scope: ExportScope) -> Result<Vec<ExportRow>, AppError> {
        let rows = match scope {
            ExportScope::Member(id) => {
                let member = self.selected_member(Some(id)).await?;
                self.repo.export_rows_for_member(member.id).await?
            }
            ExportScope::All => self.repo.export_rows_all().await?,
        };
        debug!(?scope, count = rows.len(), "built export rows");
        Ok(rows)
    }
}
