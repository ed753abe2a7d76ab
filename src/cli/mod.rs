//! CLI command handlers
//!
//! Bridges the clap argument parsing with the weekly engine. Handlers load
//! the schedule through `Storage`, build a `SessionState`, and print or save
//! the result.

pub mod export;
pub mod info;
pub mod schedule;
pub mod week;

pub use export::handle_export_command;
pub use info::{handle_accounts_command, handle_audit_command, handle_config_command};
pub use schedule::{handle_inclusion_command, handle_move_command, InclusionChange};
pub use week::{handle_item_command, handle_items_command, handle_show_command, handle_weeks_command};

use clap::Args;

use crate::audit::AuditLogger;
use crate::config::paths::BorderoPaths;
use crate::config::settings::Settings;
use crate::error::{BorderoError, BorderoResult};
use crate::models::{AccountKey, WeekPeriod};
use crate::reports::SessionState;
use crate::services::filter::{FilterCriteria, StatusFilter};
use crate::services::ordering::Direction;
use crate::services::period::PeriodService;
use crate::storage::init::needs_initialization;
use crate::storage::Storage;

/// Week and filter options shared by the viewing commands
#[derive(Args, Debug, Clone, Default)]
pub struct WeekArgs {
    /// Week to review: current, last, next, +N/-N, 2025-W03 or any date in the week
    #[arg(short, long)]
    pub week: Option<String>,

    /// Only items charged to this bank (use with --account)
    #[arg(long, requires = "account")]
    pub bank: Option<String>,

    /// Only items charged to this account label (use with --bank)
    #[arg(long, requires = "bank")]
    pub account: Option<String>,

    /// Only items with this status (Pendente, Aprovado, Agendado, Pago)
    #[arg(short, long)]
    pub status: Option<String>,

    /// Case-insensitive text searched in supplier, description and cost center
    #[arg(long)]
    pub search: Option<String>,
}

impl WeekArgs {
    /// Resolve the week under review
    pub fn period(&self, settings: &Settings) -> BorderoResult<WeekPeriod> {
        PeriodService::new(settings).parse_or_current(self.week.as_deref())
    }

    /// Build the filter criteria from the flags
    pub fn criteria(&self) -> FilterCriteria {
        let mut criteria = FilterCriteria::all();
        if let (Some(bank), Some(account)) = (&self.bank, &self.account) {
            criteria = criteria.with_account(AccountKey::new(bank.as_str(), account.as_str()));
        }
        if let Some(status) = &self.status {
            criteria = criteria.with_status(StatusFilter::from_label(status));
        }
        if let Some(search) = &self.search {
            criteria = criteria.with_search(search.as_str());
        }
        criteria
    }
}

/// Parse a move direction argument
pub fn parse_direction(s: &str) -> Result<Direction, String> {
    Direction::parse(s).ok_or_else(|| format!("invalid direction '{}': use up or down", s))
}

/// Snapshot the stored schedule as a session for the requested week
pub(crate) fn load_session(
    storage: &Storage,
    settings: &Settings,
    args: &WeekArgs,
) -> BorderoResult<SessionState> {
    ensure_initialized(storage.paths())?;

    let period = args.period(settings)?;
    let document = storage.schedule.snapshot()?;

    Ok(SessionState::new(document.itens, document.contas, period.start).with_criteria(args.criteria()))
}

pub(crate) fn ensure_initialized(paths: &BorderoPaths) -> BorderoResult<()> {
    if !needs_initialization(paths) {
        Ok(())
    } else {
        Err(BorderoError::Config(format!(
            "No schedule found at {}. Run 'bordero init' first.",
            paths.schedule_file().display()
        )))
    }
}

/// Audit logger honouring the settings switch
pub fn audit_logger(paths: &BorderoPaths, settings: &Settings) -> AuditLogger {
    if settings.audit_enabled {
        AuditLogger::new(paths.audit_log())
    } else {
        AuditLogger::disabled(paths.audit_log())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criteria_from_args() {
        let args = WeekArgs {
            bank: Some("Itaú".into()),
            account: Some("Operacional".into()),
            status: Some("aprovado".into()),
            search: Some("limpeza".into()),
            ..WeekArgs::default()
        };
        let criteria = args.criteria();
        assert_eq!(
            criteria,
            FilterCriteria::all()
                .with_account(AccountKey::new("Itaú", "Operacional"))
                .with_status(StatusFilter::Only(crate::models::ItemStatus::Approved))
                .with_search("limpeza")
        );

        assert!(WeekArgs::default().criteria().is_unfiltered());
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!(parse_direction("up"), Ok(Direction::Up));
        assert!(parse_direction("sideways").is_err());
    }
}
