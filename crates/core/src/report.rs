use serde::{Deserialize, Serialize};

/// Report type selected for the session; picks the system context string
/// prepended to queries. `Bpo` has no dedicated context and resolves to the
/// general one, as does `Others`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    Allocation,
    Performance,
    Bpo,
    #[default]
    Others,
}

impl std::str::FromStr for ReportType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Allocation Report" | "allocation" => Ok(Self::Allocation),
            "Performance Report" | "performance" => Ok(Self::Performance),
            "BPO Report" | "bpo" => Ok(Self::Bpo),
            "Others" | "others" => Ok(Self::Others),
            _ => Err(format!("unknown report type: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_display_labels() {
        assert_eq!("Allocation Report".parse::<ReportType>().unwrap(), ReportType::Allocation);
        assert_eq!("Performance Report".parse::<ReportType>().unwrap(), ReportType::Performance);
        assert_eq!("BPO Report".parse::<ReportType>().unwrap(), ReportType::Bpo);
        assert_eq!("Others".parse::<ReportType>().unwrap(), ReportType::Others);
    }

    #[test]
    fn test_unknown_label_rejected() {
        assert!("Quarterly".parse::<ReportType>().is_err());
    }

    #[test]
    fn test_default_is_others() {
        assert_eq!(ReportType::default(), ReportType::Others);
    }
}
