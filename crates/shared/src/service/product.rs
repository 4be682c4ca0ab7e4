use crate::{
    abstract_trait::{DynProductRepository, ProductServiceTrait},
    domain::{
        requests::{
            CreateProductRecord, CreateProductRequest, FarmerProductRequest, UpdateProductRequest,
        },
        responses::{ApiResponse, MessageResponse, ProductResponse},
    },
    errors::ServiceError,
    model::Product,
    utils::{Method, Metrics, OperationTracer, TracingContext},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

const PRODUCT_NOT_FOUND: &str = "Product not found";
const PRICE_NOT_POSITIVE: &str = "Price must be greater than zero.";

pub struct ProductService {
    products: DynProductRepository,
    tracer: OperationTracer,
}

pub struct ProductServiceDeps {
    pub products: DynProductRepository,
    pub registry: Arc<Mutex<Registry>>,
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn price_is_valid(price: Option<Decimal>) -> bool {
    price.is_none_or(|p| p > Decimal::ZERO)
}

impl ProductService {
    pub async fn new(deps: ProductServiceDeps) -> Self {
        let ProductServiceDeps { products, registry } = deps;

        let metrics = Metrics::new();
        metrics.register(&mut *registry.lock().await, "product");

        Self {
            products,
            tracer: OperationTracer::new("product-service", metrics),
        }
    }

    fn reject(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        err: ServiceError,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        self.tracer
            .complete_tracing_error(tracing_ctx, method, &err.to_string());
        Err(err)
    }

    async fn apply_update(
        &self,
        tracing_ctx: &TracingContext,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let method = Method::Put;

        if !price_is_valid(req.price) {
            return self.reject(tracing_ctx, method, ServiceError::validation(PRICE_NOT_POSITIVE));
        }

        match self.products.update_product(id, req).await {
            Ok(Some(product)) => {
                info!("🔄 Product {id} updated");
                self.tracer
                    .complete_tracing_success(tracing_ctx, method, "Product updated");
                Ok(ApiResponse::success(
                    "Product updated successfully",
                    ProductResponse::from(product),
                ))
            }
            Ok(None) => self.reject(tracing_ctx, method, ServiceError::not_found(PRODUCT_NOT_FOUND)),
            Err(err) => {
                error!("❌ Failed to update product {id}: {err}");
                self.reject(tracing_ctx, method, ServiceError::Repo(err))
            }
        }
    }

    async fn insert(
        &self,
        tracing_ctx: &TracingContext,
        record: CreateProductRecord,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let method = Method::Post;

        match self.products.create_product(&record).await {
            Ok(product) => {
                self.tracer
                    .complete_tracing_success(tracing_ctx, method, "Product created");
                Ok(ApiResponse::success(
                    "Product added successfully",
                    ProductResponse::from(product),
                ))
            }
            Err(err) => {
                error!("❌ Failed to create product {}: {err}", record.product_name);
                self.reject(tracing_ctx, method, ServiceError::Repo(err))
            }
        }
    }

    fn list_response(products: Vec<Product>) -> ApiResponse<Vec<ProductResponse>> {
        ApiResponse::success(
            "Products retrieved successfully",
            products.into_iter().map(ProductResponse::from).collect(),
        )
    }
}

#[async_trait]
impl ProductServiceTrait for ProductService {
    async fn find_all(&self) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start_tracing(
            "FindAllProducts",
            vec![KeyValue::new("component", "product")],
        );

        match self.products.find_all().await {
            Ok(products) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Products retrieved");
                Ok(Self::list_response(products))
            }
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start_tracing(
            "FindProductById",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        match self.products.find_by_id(id).await {
            Ok(Some(product)) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Product retrieved");
                Ok(ApiResponse::success(
                    "Product retrieved successfully",
                    ProductResponse::from(product),
                ))
            }
            Ok(None) => self.reject(&tracing_ctx, method, ServiceError::not_found(PRODUCT_NOT_FOUND)),
            Err(err) => self.reject(&tracing_ctx, method, ServiceError::Repo(err)),
        }
    }

    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🆕 Creating catalogue product for farmer {}", req.farmer_id);

        let tracing_ctx = self.tracer.start_tracing(
            "CreateProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.farmer_id", req.farmer_id.to_string()),
            ],
        );

        let (Some(product_name), Some(price)) = (non_blank(&req.product_name), req.price) else {
            return self.reject(
                &tracing_ctx,
                Method::Post,
                ServiceError::validation("Product name and price are required."),
            );
        };

        if !price_is_valid(Some(price)) {
            return self.reject(
                &tracing_ctx,
                Method::Post,
                ServiceError::validation(PRICE_NOT_POSITIVE),
            );
        }

        let record = CreateProductRecord {
            farmer_id: req.farmer_id,
            product_name,
            category: req.category.clone(),
            stock_quantity: req.stock_quantity.unwrap_or(0),
            price,
            description: req.description.clone(),
        };

        self.insert(&tracing_ctx, record).await
    }

    async fn update_product(
        &self,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let tracing_ctx = self.tracer.start_tracing(
            "UpdateProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        self.apply_update(&tracing_ctx, id, req).await
    }

    async fn delete_product(&self, id: i32) -> Result<MessageResponse, ServiceError> {
        let method = Method::Delete;
        let tracing_ctx = self.tracer.start_tracing(
            "DeleteProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        match self.products.delete_product(id).await {
            Ok(true) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Product deleted");
                Ok(MessageResponse::success("Product deleted successfully"))
            }
            Ok(false) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, PRODUCT_NOT_FOUND);
                Err(ServiceError::not_found(PRODUCT_NOT_FOUND))
            }
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn find_mine(
        &self,
        farmer_id: i32,
    ) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start_tracing(
            "FindFarmerProducts",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("farmer.id", farmer_id.to_string()),
            ],
        );

        match self.products.find_by_farmer(farmer_id).await {
            Ok(products) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Farmer products retrieved");
                Ok(Self::list_response(products))
            }
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn create_for_farmer(
        &self,
        farmer_id: i32,
        req: &FarmerProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🌱 Farmer {farmer_id} listing a new product");

        let tracing_ctx = self.tracer.start_tracing(
            "CreateFarmerProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("farmer.id", farmer_id.to_string()),
            ],
        );

        let (Some(product_name), Some(price), Some(stock_quantity)) =
            (non_blank(&req.product_name), req.price, req.stock_quantity)
        else {
            return self.reject(
                &tracing_ctx,
                Method::Post,
                ServiceError::validation("Name, price, and quantity are required"),
            );
        };

        if !price_is_valid(Some(price)) {
            return self.reject(
                &tracing_ctx,
                Method::Post,
                ServiceError::validation(PRICE_NOT_POSITIVE),
            );
        }

        let record = CreateProductRecord {
            farmer_id,
            product_name,
            category: req.category.clone(),
            stock_quantity,
            price,
            description: req.description.clone(),
        };

        self.insert(&tracing_ctx, record).await
    }

    async fn update_owned(
        &self,
        farmer_id: i32,
        id: i32,
        req: &FarmerProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let tracing_ctx = self.tracer.start_tracing(
            "UpdateFarmerProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("farmer.id", farmer_id.to_string()),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        match self.products.find_owned(id, farmer_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                error!("❌ Farmer {farmer_id} tried to edit product {id}");
                return self.reject(
                    &tracing_ctx,
                    Method::Put,
                    ServiceError::Forbidden("You can only edit your own products".into()),
                );
            }
            Err(err) => return self.reject(&tracing_ctx, Method::Put, ServiceError::Repo(err)),
        }

        self.apply_update(&tracing_ctx, id, &UpdateProductRequest::from(req.clone()))
            .await
    }

    async fn delete_owned(
        &self,
        farmer_id: i32,
        id: i32,
    ) -> Result<MessageResponse, ServiceError> {
        let method = Method::Delete;
        let tracing_ctx = self.tracer.start_tracing(
            "DeleteFarmerProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("farmer.id", farmer_id.to_string()),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        match self.products.find_owned(id, farmer_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                error!("❌ Farmer {farmer_id} tried to delete product {id}");
                let msg = "You can only delete your own products";
                self.tracer.complete_tracing_error(&tracing_ctx, method, msg);
                return Err(ServiceError::Forbidden(msg.into()));
            }
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                return Err(ServiceError::Repo(err));
            }
        }

        match self.products.delete_product(id).await {
            Ok(true) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Product deleted");
                Ok(MessageResponse::success("Product deleted successfully"))
            }
            Ok(false) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, PRODUCT_NOT_FOUND);
                Err(ServiceError::not_found(PRODUCT_NOT_FOUND))
            }
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                Err(ServiceError::Repo(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        errors::RepositoryError,
        model::ORDER_STATUS_PENDING,
        testing::{InMemoryStore, registry},
    };
    use rust_decimal_macros::dec;

    async fn service(store: Arc<InMemoryStore>) -> ProductService {
        ProductService::new(ProductServiceDeps {
            products: store,
            registry: registry(),
        })
        .await
    }

    fn farmer_request(name: Option<&str>, price: Option<Decimal>, qty: Option<i32>) -> FarmerProductRequest {
        FarmerProductRequest {
            product_name: name.map(str::to_string),
            price,
            stock_quantity: qty,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn catalogue_create_requires_name_and_price() {
        let service = service(InMemoryStore::new()).await;

        let req = CreateProductRequest {
            farmer_id: 1,
            product_name: Some("   ".into()),
            category: None,
            stock_quantity: None,
            price: Some(dec!(10)),
            description: None,
        };
        let err = service.create_product(&req).await.unwrap_err();
        assert!(
            matches!(err, ServiceError::Validation(ref m) if m[0] == "Product name and price are required.")
        );

        let ok = service
            .create_product(&CreateProductRequest {
                product_name: Some("Tomatoes".into()),
                ..req
            })
            .await
            .unwrap();
        assert_eq!(ok.message, "Product added successfully");
        assert_eq!(ok.data.stock_quantity, 0);
    }

    #[tokio::test]
    async fn update_rejects_non_positive_price_and_missing_rows() {
        let store = InMemoryStore::new();
        let product = store.seed_product(1, "Kale", dec!(20), 5);
        let service = service(store).await;

        let err = service
            .update_product(
                product.product_id,
                &UpdateProductRequest {
                    price: Some(dec!(0)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref m) if m[0] == PRICE_NOT_POSITIVE));

        let missing = service
            .update_product(404, &UpdateProductRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(missing, ServiceError::NotFound(ref m) if m == PRODUCT_NOT_FOUND));

        let updated = service
            .update_product(
                product.product_id,
                &UpdateProductRequest {
                    stock_quantity: Some(9),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.data.stock_quantity, 9);
        assert_eq!(updated.data.product_name, "Kale");
    }

    #[tokio::test]
    async fn farmer_create_needs_all_three_fields_and_uses_caller_id() {
        let store = InMemoryStore::new();
        let service = service(store.clone()).await;

        let err = service
            .create_for_farmer(7, &farmer_request(Some("Kale"), Some(dec!(12)), None))
            .await
            .unwrap_err();
        assert!(
            matches!(err, ServiceError::Validation(ref m) if m[0] == "Name, price, and quantity are required")
        );

        let created = service
            .create_for_farmer(7, &farmer_request(Some("Kale"), Some(dec!(12)), Some(3)))
            .await
            .unwrap();
        assert_eq!(created.data.farmer_id, 7);

        let mine = service.find_mine(7).await.unwrap();
        assert_eq!(mine.data.len(), 1);
        assert!(service.find_mine(8).await.unwrap().data.is_empty());
    }

    #[tokio::test]
    async fn farmers_cannot_touch_other_farmers_products() {
        let store = InMemoryStore::new();
        let theirs = store.seed_product(1, "Maize", dec!(40), 10);
        let service = service(store.clone()).await;

        let edit = service
            .update_owned(2, theirs.product_id, &farmer_request(None, Some(dec!(1)), None))
            .await
            .unwrap_err();
        assert!(
            matches!(edit, ServiceError::Forbidden(ref m) if m == "You can only edit your own products")
        );

        let delete = service.delete_owned(2, theirs.product_id).await.unwrap_err();
        assert!(
            matches!(delete, ServiceError::Forbidden(ref m) if m == "You can only delete your own products")
        );

        assert_eq!(store.products()[0].price, dec!(40));

        let removed = service.delete_owned(1, theirs.product_id).await.unwrap();
        assert_eq!(removed.message, "Product deleted successfully");
        assert!(store.products().is_empty());
    }

    #[tokio::test]
    async fn ordered_products_cannot_be_deleted() {
        let store = InMemoryStore::new();
        let product = store.seed_product(1, "Maize", dec!(40), 10);
        let order = store.seed_order(5, product.product_id, 2, ORDER_STATUS_PENDING);
        let service = service(store.clone()).await;

        let err = service
            .delete_owned(1, product.product_id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Repo(RepositoryError::ForeignKey(_))));

        assert_eq!(store.products().len(), 1);
        assert!(store.order(order.order_id).is_some());
    }

    #[tokio::test]
    async fn delete_missing_product_is_not_found() {
        let service = service(InMemoryStore::new()).await;
        let err = service.delete_product(1).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
