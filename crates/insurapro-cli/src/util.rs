use anyhow::Result;
use chrono::Local;
use insurapro_core::domain::CustomerId;
use std::str::FromStr;

/// `dd/mm/yyyy`, the date style the menu asks for.
pub const INTERACTION_DATE_FORMAT: &str = "%d/%m/%Y";
const BACKUP_STAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

pub fn today_label() -> String {
    Local::now().format(INTERACTION_DATE_FORMAT).to_string()
}

pub fn backup_stamp() -> String {
    Local::now().format(BACKUP_STAMP_FORMAT).to_string()
}

pub fn parse_customer_id(raw: &str) -> Result<CustomerId> {
    Ok(CustomerId::from_str(raw)?)
}

#[cfg(test)]
mod tests {
    use super::{parse_customer_id, today_label};
    use chrono::NaiveDate;
    use insurapro_core::domain::CustomerId;

    #[test]
    fn today_label_uses_day_month_year() {
        let label = today_label();
        assert!(NaiveDate::parse_from_str(&label, "%d/%m/%Y").is_ok());
        assert_eq!(label.len(), 10);
    }

    #[test]
    fn parse_customer_id_accepts_digits_only() {
        assert_eq!(parse_customer_id("12").unwrap(), CustomerId(12));
        assert!(parse_customer_id("twelve").is_err());
    }
}
