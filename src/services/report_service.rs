use crate::data::database::Database;
use crate::data::repos::implementors::coupon_repo::CouponRepo;
use crate::data::repos::implementors::package_repo::PackageRepo;
use crate::data::repos::implementors::product_repo::ProductRepo;
use crate::data::repos::implementors::sale_repo::SaleRepo;
use crate::data::repos::implementors::size_repo::SizeRepo;
use crate::data::repos::implementors::stock_repo::StockAmountRepo;
use crate::reports::{DocumentDefinition, ReportBuilder, ReportKind};
use crate::services::errors::ServiceError;

fn yes_no(flag: bool) -> String {
    let answer = if flag { "Yes" } else { "No" };
    answer.to_string()
}

fn or_dash(value: Option<String>) -> String {
    value.unwrap_or_else(|| "-".to_string())
}

pub struct ReportService {
    db: Database,
}

impl ReportService {
    pub fn new(db: Database) -> Self {
        ReportService { db }
    }

    /// Fetches every row of the report's table and shapes the document.
    pub async fn build(&self, kind: ReportKind) -> Result<DocumentDefinition, ServiceError> {
        let rows = self.rows(kind).await?;

        let document = ReportBuilder::new(kind.title())
            .landscape(kind.landscape())
            .columns(kind.columns().iter().copied())
            .rows(rows)
            .build()
            .map_err(|e| {
                tracing::error!("Report {} could not be built: {}", kind.as_str(), e);
                ServiceError::Report(e)
            })?;

        Ok(document)
    }

    async fn rows(&self, kind: ReportKind) -> Result<Vec<Vec<String>>, ServiceError> {
        let rows: Vec<Vec<String>> = match kind {
            ReportKind::Packages => PackageRepo::new(self.db.clone())
                .get_all()
                .await?
                .into_iter()
                .map(|p| vec![p.id.to_string(), p.description, yes_no(p.active)])
                .collect(),
            ReportKind::Sizes => SizeRepo::new(self.db.clone())
                .get_all()
                .await?
                .into_iter()
                .map(|s| vec![s.id.to_string(), s.description, s.capacity.to_string()])
                .collect(),
            ReportKind::Products => ProductRepo::new(self.db.clone())
                .get_all()
                .await?
                .into_iter()
                .map(|p| {
                    vec![
                        p.id.to_string(),
                        p.name,
                        or_dash(p.description),
                        yes_no(p.active),
                    ]
                })
                .collect(),
            ReportKind::Stock => StockAmountRepo::new(self.db.clone())
                .get_all()
                .await?
                .into_iter()
                .map(|a| {
                    vec![
                        a.product_id.to_string(),
                        a.size_id.to_string(),
                        a.amount.to_string(),
                    ]
                })
                .collect(),
            ReportKind::Sales => SaleRepo::new(self.db.clone())
                .get_all()
                .await?
                .into_iter()
                .map(|s| {
                    vec![
                        s.id.to_string(),
                        s.date.to_string(),
                        s.customer_id.to_string(),
                        s.status,
                        s.subtotal.to_string(),
                        s.discount.to_string(),
                        s.total.to_string(),
                        s.payment_method,
                    ]
                })
                .collect(),
            ReportKind::Coupons => CouponRepo::new(self.db.clone())
                .get_all()
                .await?
                .into_iter()
                .map(|c| {
                    vec![
                        c.id.to_string(),
                        c.name,
                        c.kind,
                        c.value.to_string(),
                        c.start_date.to_string(),
                        or_dash(c.end_date.map(|d| d.to_string())),
                        c.uses.to_string(),
                        or_dash(c.use_limit.map(|l| l.to_string())),
                    ]
                })
                .collect(),
        };

        Ok(rows)
    }
}
