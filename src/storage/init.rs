//! Storage initialization
//!
//! First-run setup: default settings and a sample schedule with three funding
//! accounts and four payables due around today.

use chrono::{DateTime, Duration, FixedOffset};

use crate::config::paths::BorderoPaths;
use crate::config::settings::Settings;
use crate::error::BorderoResult;
use crate::models::{Account, AccountKey, AccountRegistry, ItemStatus, Money, PaymentItem, PaymentMethod, Priority};

use super::file_io::write_json_atomic;
use super::schedule::ScheduleDocument;

/// Initialize storage for a fresh installation
///
/// Writes the sample schedule unless one exists and `force` is false, and
/// the settings file if it is missing. Returns whether a schedule was written.
pub fn initialize_storage(
    paths: &BorderoPaths,
    settings: &Settings,
    now: DateTime<FixedOffset>,
    force: bool,
) -> BorderoResult<bool> {
    paths.ensure_directories()?;

    if !paths.settings_file().exists() {
        settings.save(paths)?;
    }

    if paths.schedule_file().exists() && !force {
        return Ok(false);
    }

    write_json_atomic(paths.schedule_file(), &sample_schedule(now)?)?;
    Ok(true)
}

/// The sample schedule, with due dates relative to `now`
pub fn sample_schedule(now: DateTime<FixedOffset>) -> BorderoResult<ScheduleDocument> {
    let contas = AccountRegistry::new(vec![
        Account::new("Itaú", "Operacional", Money::from_units(25000)),
        Account::new("Bradesco", "Projetos", Money::from_units(18000)),
        Account::new("Santander", "Captação", Money::from_units(12000)),
    ])?;

    let itens = vec![
        PaymentItem::new(
            "1",
            "Fornecedor A",
            AccountKey::new("Itaú", "Operacional"),
            PaymentMethod::Pix,
            now,
            Money::from_units(3200),
        )
        .with_description("Serviços de limpeza")
        .with_cost_center("Manutenção")
        .with_priority(Priority::High)
        .with_status(ItemStatus::Approved),
        PaymentItem::new(
            "2",
            "Fornecedor B",
            AccountKey::new("Bradesco", "Projetos"),
            PaymentMethod::Ted,
            now,
            Money::from_units(8200),
        )
        .with_description("Material didático")
        .with_cost_center("Educação")
        .with_priority(Priority::Medium)
        .with_status(ItemStatus::Pending),
        PaymentItem::new(
            "3",
            "Concessionária X",
            AccountKey::new("Itaú", "Operacional"),
            PaymentMethod::Boleto,
            now + Duration::days(2),
            Money::from_units(5400),
        )
        .with_description("Energia elétrica")
        .with_cost_center("Utilidades")
        .with_priority(Priority::High)
        .with_status(ItemStatus::Approved),
        PaymentItem::new(
            "4",
            "Prestador Y",
            AccountKey::new("Santander", "Captação"),
            PaymentMethod::Ted,
            now + Duration::days(5),
            Money::from_units(1500),
        )
        .with_description("Suporte de TI")
        .with_cost_center("TI")
        .with_priority(Priority::Low)
        .with_status(ItemStatus::Scheduled)
        .with_incluir(false),
    ];

    let document = ScheduleDocument::new(contas, itens);
    document.validate()?;
    Ok(document)
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &BorderoPaths) -> bool {
    !paths.is_initialized()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::file_io::read_json_required;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn now() -> DateTime<FixedOffset> {
        FixedOffset::west_opt(3 * 3600)
            .unwrap()
            .with_ymd_and_hms(2025, 1, 13, 10, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_initialize_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BorderoPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(needs_initialization(&paths));
        assert!(initialize_storage(&paths, &Settings::default(), now(), false).unwrap());

        assert!(!needs_initialization(&paths));
        assert!(paths.settings_file().exists());
        assert!(paths.export_dir().exists());
    }

    #[test]
    fn test_sample_contents() {
        let sample = sample_schedule(now()).unwrap();
        assert_eq!(sample.contas.len(), 3);
        assert_eq!(sample.itens.len(), 4);

        let ids: Vec<_> = sample.itens.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
        assert!(!sample.itens[3].incluir);
        assert_eq!(sample.itens[2].due_at(now().timezone()).unwrap(), now() + Duration::days(2));
    }

    #[test]
    fn test_doesnt_overwrite_existing_without_force() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BorderoPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths, &Settings::default(), now(), false).unwrap();

        let mut custom: ScheduleDocument = read_json_required(paths.schedule_file()).unwrap();
        custom.itens.truncate(1);
        write_json_atomic(paths.schedule_file(), &custom).unwrap();

        assert!(!initialize_storage(&paths, &Settings::default(), now(), false).unwrap());
        let kept: ScheduleDocument = read_json_required(paths.schedule_file()).unwrap();
        assert_eq!(kept.itens.len(), 1);

        assert!(initialize_storage(&paths, &Settings::default(), now(), true).unwrap());
        let reset: ScheduleDocument = read_json_required(paths.schedule_file()).unwrap();
        assert_eq!(reset.itens.len(), 4);
    }
}
