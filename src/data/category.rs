use std::fmt;

/// Closed set of semantic indicator families.
///
/// Display logic keys off these rather than exact upstream label text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IndicatorCategory {
    IncomeShare,
    Headcount,
    Gini,
    Mpi,
    Other,
}

impl IndicatorCategory {
    pub const ALL: [IndicatorCategory; 5] = [
        IndicatorCategory::IncomeShare,
        IndicatorCategory::Headcount,
        IndicatorCategory::Gini,
        IndicatorCategory::Mpi,
        IndicatorCategory::Other,
    ];

    /// Classify a raw indicator label (case-insensitive).
    pub fn classify(name: &str) -> Self {
        let lower = name.to_lowercase();
        // MPI labels also mention "headcount", so they go first.
        if lower.contains("multidimensional poverty")
            || lower
                .split(|c: char| !c.is_ascii_alphanumeric())
                .any(|tok| tok == "mpi")
        {
            IndicatorCategory::Mpi
        } else if lower.contains("gini") {
            IndicatorCategory::Gini
        } else if lower.contains("income share") {
            IndicatorCategory::IncomeShare
        } else if lower.contains("headcount") {
            IndicatorCategory::Headcount
        } else {
            IndicatorCategory::Other
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IndicatorCategory::IncomeShare => "Income share",
            IndicatorCategory::Headcount => "Poverty headcount",
            IndicatorCategory::Gini => "Gini",
            IndicatorCategory::Mpi => "Multidimensional poverty",
            IndicatorCategory::Other => "Other",
        }
    }

    pub fn is_percentage(&self) -> bool {
        matches!(self, IndicatorCategory::IncomeShare | IndicatorCategory::Headcount)
    }

    /// Render a metric value the way this family is usually quoted.
    pub fn format_value(&self, value: Option<f64>) -> String {
        match value {
            None => "N/A".to_string(),
            Some(v) if self.is_percentage() => format!("{v:.2}%"),
            Some(v) if *self == IndicatorCategory::Mpi => format!("{v:.3}"),
            Some(v) => format!("{v:.2}"),
        }
    }
}

impl fmt::Display for IndicatorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_world_bank_labels() {
        use IndicatorCategory::*;
        let cases = [
            ("Income share held by lowest 20%", IncomeShare),
            ("Income share held by highest 10%", IncomeShare),
            ("Poverty headcount ratio at $2.15 a day (2017 PPP) (% of population)", Headcount),
            ("Poverty headcount ratio at national poverty lines (% of population)", Headcount),
            ("Gini index", Gini),
            ("GINI INDEX (World Bank estimate)", Gini),
            ("Multidimensional poverty headcount ratio (% of total population)", Mpi),
            ("Multidimensional poverty index (scale 0-1)", Mpi),
            ("MPI, intensity of deprivation", Mpi),
            ("Poverty gap at $3.65 a day (2017 PPP) (%)", Other),
            ("Olympic games", Other),
        ];
        for (name, expected) in cases {
            assert_eq!(IndicatorCategory::classify(name), expected, "{name}");
        }
    }

    #[test]
    fn formats_by_family() {
        assert_eq!(IndicatorCategory::IncomeShare.format_value(Some(7.456)), "7.46%");
        assert_eq!(IndicatorCategory::Gini.format_value(Some(39.3)), "39.30");
        assert_eq!(IndicatorCategory::Mpi.format_value(Some(0.0112)), "0.011");
        assert_eq!(IndicatorCategory::Headcount.format_value(None), "N/A");
        assert_eq!(IndicatorCategory::Other.format_value(Some(0.0)), "0.00");
    }
}
