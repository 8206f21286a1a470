use crate::api::controllers::dto::stock_dto::{
    StockAmountDTO, StockOperationDTO, StockOperationRequest, UpdateStockOperationRequest,
};
use crate::data::database::Database;
use crate::data::models::stock::{NewStockOperation, StockOperation, UpdateStockOperation};
use crate::data::repos::implementors::stock_repo::{StockAmountRepo, StockOperationRepo};
use crate::data::repos::traits::repository::Page;
use crate::services::errors::ServiceError;

pub struct StockService {
    operations: StockOperationRepo,
    amounts: StockAmountRepo,
}

impl StockService {
    pub fn new(db: Database) -> Self {
        StockService {
            operations: StockOperationRepo::new(db.clone()),
            amounts: StockAmountRepo::new(db),
        }
    }

    pub async fn list_operations(
        &self,
        page: Page,
    ) -> Result<(Vec<StockOperationDTO>, i64), ServiceError> {
        let (operations, total) = self.operations.get_page(page).await?;
        let ids: Vec<i32> = operations.iter().map(|o| o.id).collect();
        let mut items = self.operations.get_items(&ids).await?;

        let dtos = operations
            .into_iter()
            .map(|operation| {
                let lines = items.remove(&operation.id).unwrap_or_default();
                StockOperationDTO::with_items(operation, lines)
            })
            .collect();

        Ok((dtos, total))
    }

    /// Records a manual entry or exit by `user_id`.
    pub async fn create_operation(
        &self,
        user_id: i32,
        request: StockOperationRequest,
    ) -> Result<StockOperationDTO, ServiceError> {
        let lines = request.lines().ok_or(ServiceError::Validation)?;
        let operation = NewStockOperation {
            kind: request.kind.as_str().to_string(),
            date: request
                .date
                .unwrap_or_else(|| chrono::Local::now().date_naive()),
            user_id,
            sale_id: None,
        };

        let created = self.operations.add(operation, lines).await?;
        tracing::info!("Stock operation {} ({}) stored", created.id, created.kind);

        self.with_items(created).await
    }

    pub async fn update_operation(
        &self,
        operation_id: i32,
        request: UpdateStockOperationRequest,
    ) -> Result<StockOperationDTO, ServiceError> {
        let updated = self
            .operations
            .update(operation_id, UpdateStockOperation::from(request))
            .await?
            .ok_or(ServiceError::NotFound("Stock operation"))?;

        self.with_items(updated).await
    }

    pub async fn list_amounts(
        &self,
        page: Page,
    ) -> Result<(Vec<StockAmountDTO>, i64), ServiceError> {
        let (amounts, total) = self.amounts.get_page(page).await?;

        Ok((amounts.into_iter().map(StockAmountDTO::from).collect(), total))
    }

    async fn with_items(
        &self,
        operation: StockOperation,
    ) -> Result<StockOperationDTO, ServiceError> {
        let items = self
            .operations
            .get_items(&[operation.id])
            .await?
            .remove(&operation.id)
            .unwrap_or_default();

        Ok(StockOperationDTO::with_items(operation, items))
    }
}
