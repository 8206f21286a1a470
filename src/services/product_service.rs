use crate::api::controllers::dto::product_dto::{
    ProductDTO, ProductImageDTO, ProductImageRequest, ProductRequest,
};
use crate::data::database::Database;
use crate::data::models::product::{NewProduct, NewProductImage, UpdateProduct};
use crate::data::repos::implementors::product_repo::ProductRepo;
use crate::data::repos::traits::repository::{Page, Repository};
use crate::services::errors::ServiceError;

pub struct ProductService {
    repo: ProductRepo,
}

impl ProductService {
    pub fn new(db: Database) -> Self {
        ProductService {
            repo: ProductRepo::new(db),
        }
    }

    pub async fn list(&self, page: Page) -> Result<(Vec<ProductDTO>, i64), ServiceError> {
        let (products, total) = self.repo.get_page(page).await?;
        let ids: Vec<i32> = products.iter().map(|p| p.id).collect();
        let mut sizes = self.repo.get_size_ids(&ids).await?;

        let dtos = products
            .into_iter()
            .map(|product| {
                let size_ids = sizes.remove(&product.id).unwrap_or_default();
                ProductDTO::with_sizes(product, size_ids)
            })
            .collect();

        Ok((dtos, total))
    }

    pub async fn create(&self, request: ProductRequest) -> Result<ProductDTO, ServiceError> {
        let size_ids = request.distinct_size_ids();
        let product = self
            .repo
            .add((NewProduct::from(request), size_ids.clone()))
            .await?;

        tracing::info!("Product {} created", product.id);
        Ok(ProductDTO::with_sizes(product, size_ids))
    }

    pub async fn update(
        &self,
        product_id: i32,
        request: ProductRequest,
    ) -> Result<ProductDTO, ServiceError> {
        let size_ids = request.distinct_size_ids();

        self.repo
            .update(product_id, (UpdateProduct::from(request), size_ids.clone()))
            .await?
            .map(|product| ProductDTO::with_sizes(product, size_ids))
            .ok_or(ServiceError::NotFound("Product"))
    }

    pub async fn images(&self, product_id: i32) -> Result<Vec<ProductImageDTO>, ServiceError> {
        self.ensure_exists(product_id).await?;

        let images = self.repo.get_images(product_id).await?;
        Ok(images.into_iter().map(ProductImageDTO::from).collect())
    }

    pub async fn add_image(
        &self,
        product_id: i32,
        request: ProductImageRequest,
    ) -> Result<ProductImageDTO, ServiceError> {
        self.ensure_exists(product_id).await?;

        let image = self
            .repo
            .add_image(NewProductImage {
                product_id,
                url: request.url,
            })
            .await?;

        Ok(ProductImageDTO::from(image))
    }

    async fn ensure_exists(&self, product_id: i32) -> Result<(), ServiceError> {
        match self.repo.get_by_id(product_id).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::NotFound("Product")),
        }
    }
}
