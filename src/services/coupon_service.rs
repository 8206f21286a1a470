use crate::api::controllers::dto::coupon_dto::{CouponDTO, CouponRequest};
use crate::data::database::Database;
use crate::data::models::coupon::{NewCoupon, UpdateCoupon};
use crate::data::repos::implementors::coupon_repo::CouponRepo;
use crate::data::repos::traits::repository::{Page, Repository};
use crate::services::errors::ServiceError;

pub struct CouponService {
    repo: CouponRepo,
}

impl CouponService {
    pub fn new(db: Database) -> Self {
        CouponService {
            repo: CouponRepo::new(db),
        }
    }

    pub async fn list(&self, page: Page) -> Result<(Vec<CouponDTO>, i64), ServiceError> {
        let (coupons, total) = self.repo.get_page(page).await?;
        let ids: Vec<i32> = coupons.iter().map(|c| c.id).collect();
        let mut products = self.repo.get_product_ids(&ids).await?;

        let dtos = coupons
            .into_iter()
            .map(|coupon| {
                let product_ids = products.remove(&coupon.id).unwrap_or_default();
                CouponDTO::with_products(coupon, product_ids)
            })
            .collect();

        Ok((dtos, total))
    }

    pub async fn create(&self, request: CouponRequest) -> Result<CouponDTO, ServiceError> {
        let product_ids = request.distinct_product_ids();
        let coupon = self
            .repo
            .add((NewCoupon::from(request), product_ids.clone()))
            .await?;

        tracing::info!("Coupon {} created", coupon.id);
        Ok(CouponDTO::with_products(coupon, product_ids))
    }

    pub async fn update(
        &self,
        coupon_id: i32,
        request: CouponRequest,
    ) -> Result<CouponDTO, ServiceError> {
        let product_ids = request.distinct_product_ids();

        self.repo
            .update(coupon_id, (UpdateCoupon::from(request), product_ids.clone()))
            .await?
            .map(|coupon| CouponDTO::with_products(coupon, product_ids))
            .ok_or(ServiceError::NotFound("Coupon"))
    }
}
