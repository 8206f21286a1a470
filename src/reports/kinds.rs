use std::str::FromStr;

/// Reports served under `/reports/{kind}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Packages,
    Sizes,
    Products,
    Stock,
    Sales,
    Coupons,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Packages => "packages",
            ReportKind::Sizes => "sizes",
            ReportKind::Products => "products",
            ReportKind::Stock => "stock",
            ReportKind::Sales => "sales",
            ReportKind::Coupons => "coupons",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::Packages => "Packages",
            ReportKind::Sizes => "Sizes",
            ReportKind::Products => "Products",
            ReportKind::Stock => "Stock amounts",
            ReportKind::Sales => "Sales",
            ReportKind::Coupons => "Coupons",
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            ReportKind::Packages => &["Id", "Description", "Active"],
            ReportKind::Sizes => &["Id", "Description", "Capacity (L)"],
            ReportKind::Products => &["Id", "Name", "Description", "Active"],
            ReportKind::Stock => &["Product", "Size", "Amount"],
            ReportKind::Sales => &[
                "Id", "Date", "Customer", "Status", "Subtotal", "Discount", "Total", "Payment",
            ],
            ReportKind::Coupons => &[
                "Id", "Name", "Type", "Value", "Start", "End", "Uses", "Limit",
            ],
        }
    }

    /// Wide tables are laid out in landscape.
    pub fn landscape(&self) -> bool {
        self.columns().len() > 5
    }
}

impl FromStr for ReportKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "packages" => Ok(ReportKind::Packages),
            "sizes" => Ok(ReportKind::Sizes),
            "products" => Ok(ReportKind::Products),
            "stock" => Ok(ReportKind::Stock),
            "sales" => Ok(ReportKind::Sales),
            "coupons" => Ok(ReportKind::Coupons),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_kinds_only() {
        assert_eq!("Sales".parse::<ReportKind>(), Ok(ReportKind::Sales));
        assert_eq!("stock".parse::<ReportKind>(), Ok(ReportKind::Stock));
        assert!("orders".parse::<ReportKind>().is_err());
    }

    #[test]
    fn wide_reports_are_landscape() {
        assert!(ReportKind::Sales.landscape());
        assert!(!ReportKind::Packages.landscape());
    }
}
