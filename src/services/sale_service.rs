use crate::api::controllers::dto::sale_dto::{SaleDTO, SaleRequest, UpdateSaleRequest};
use crate::data::database::Database;
use crate::data::models::coupon::Coupon;
use crate::data::models::sale::{NewSale, Sale, SaleLine, SaleStatus};
use crate::data::repos::implementors::coupon_repo::CouponRepo;
use crate::data::repos::implementors::price_repo::PriceRepo;
use crate::data::repos::implementors::sale_repo::SaleRepo;
use crate::data::repos::traits::repository::{Page, Repository};
use crate::services::errors::ServiceError;
use bigdecimal::{BigDecimal, Zero};

/// Money columns of a sale before it is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleTotals {
    pub subtotal: BigDecimal,
    pub discount: BigDecimal,
    pub total: BigDecimal,
}

/// Sums the lines and applies `coupon` to the eligible ones. An empty
/// eligible list makes every product eligible.
pub fn compute_totals(lines: &[SaleLine], coupon: Option<(&Coupon, &[i32])>) -> SaleTotals {
    let subtotal = lines
        .iter()
        .fold(BigDecimal::zero(), |acc, line| acc + line.line_total());

    let discount = match coupon {
        Some((coupon, eligible_products)) => {
            let eligible = lines
                .iter()
                .filter(|line| {
                    eligible_products.is_empty() || eligible_products.contains(&line.product_id)
                })
                .fold(BigDecimal::zero(), |acc, line| acc + line.line_total());
            coupon.discount_for(&eligible)
        }
        None => BigDecimal::zero(),
    };

    SaleTotals {
        total: &subtotal - &discount,
        subtotal,
        discount,
    }
}

pub struct SaleService {
    sales: SaleRepo,
    prices: PriceRepo,
    coupons: CouponRepo,
}

impl SaleService {
    pub fn new(db: Database) -> Self {
        SaleService {
            sales: SaleRepo::new(db.clone()),
            prices: PriceRepo::new(db.clone()),
            coupons: CouponRepo::new(db),
        }
    }

    pub async fn list(&self, page: Page) -> Result<(Vec<SaleDTO>, i64), ServiceError> {
        let (sales, total) = self.sales.get_page(page).await?;
        let ids: Vec<i32> = sales.iter().map(|s| s.id).collect();
        let mut items = self.sales.get_items(&ids).await?;

        let dtos = sales
            .into_iter()
            .map(|sale| {
                let lines = items.remove(&sale.id).unwrap_or_default();
                SaleDTO::with_items(sale, lines)
            })
            .collect();

        Ok((dtos, total))
    }

    /// Prices the items on the sale date, applies the coupon and stores the
    /// sale together with its stock exit. `operator_id` is the signed user.
    pub async fn create(
        &self,
        operator_id: i32,
        request: SaleRequest,
    ) -> Result<SaleDTO, ServiceError> {
        let date = request
            .date
            .unwrap_or_else(|| chrono::Local::now().date_naive());

        let quantities = request.quantities().ok_or(ServiceError::Validation)?;

        let mut lines = Vec::new();
        for (product_id, size_id, quantity) in quantities {
            let price = self
                .prices
                .find_valid(product_id, size_id, date)
                .await?
                .ok_or(ServiceError::PriceNotFound {
                    product_id,
                    size_id,
                })?;
            lines.push(SaleLine {
                product_id,
                size_id,
                quantity,
                unit_price: price.price,
            });
        }

        let totals = match request.coupon_id {
            Some(coupon_id) => {
                let coupon = self
                    .coupons
                    .get_by_id(coupon_id)
                    .await?
                    .filter(|coupon| coupon.is_valid_on(date))
                    .ok_or(ServiceError::InvalidCoupon)?;
                let eligible = self
                    .coupons
                    .get_product_ids(&[coupon_id])
                    .await?
                    .remove(&coupon_id)
                    .unwrap_or_default();
                compute_totals(&lines, Some((&coupon, eligible.as_slice())))
            }
            None => compute_totals(&lines, None),
        };

        let new_sale = NewSale {
            customer_id: request.customer_id,
            status: SaleStatus::Pending.as_str().to_string(),
            subtotal: totals.subtotal,
            discount: totals.discount,
            total: totals.total,
            coupon_id: request.coupon_id,
            payment_method: request.payment_method,
            date,
        };

        let sale = self.sales.create(new_sale, lines, operator_id).await?;
        tracing::info!("Sale {} stored with total {}", sale.id, sale.total);

        self.with_items(sale).await
    }

    pub async fn update(
        &self,
        sale_id: i32,
        request: UpdateSaleRequest,
    ) -> Result<SaleDTO, ServiceError> {
        let updated = self
            .sales
            .update(sale_id, request.status, request.payment_method)
            .await?
            .ok_or(ServiceError::NotFound("Sale"))?;

        self.with_items(updated).await
    }

    async fn with_items(&self, sale: Sale) -> Result<SaleDTO, ServiceError> {
        let items = self
            .sales
            .get_items(&[sale.id])
            .await?
            .remove(&sale.id)
            .unwrap_or_default();

        Ok(SaleDTO::with_items(sale, items))
    }
}
