use crate::{
    abstract_trait::{AuthServiceTrait, DynHashing, DynJwtService, DynUserRepository},
    domain::{
        requests::{LoginRequest, RegisterRequest},
        responses::{ApiResponse, LoginResponse, UserResponse},
    },
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, OperationTracer},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

const EMAIL_TAKEN: &str = "Email is already registered";

pub struct AuthService {
    users: DynUserRepository,
    hash: DynHashing,
    jwt: DynJwtService,
    tracer: OperationTracer,
}

pub struct AuthServiceDeps {
    pub users: DynUserRepository,
    pub hash: DynHashing,
    pub jwt: DynJwtService,
    pub registry: Arc<Mutex<Registry>>,
}

impl AuthService {
    pub async fn new(deps: AuthServiceDeps) -> Self {
        let AuthServiceDeps {
            users,
            hash,
            jwt,
            registry,
        } = deps;

        let metrics = Metrics::new();
        metrics.register(&mut *registry.lock().await, "auth");

        Self {
            users,
            hash,
            jwt,
            tracer: OperationTracer::new("auth-service", metrics),
        }
    }
}

#[async_trait]
impl AuthServiceTrait for AuthService {
    async fn register(
        &self,
        req: &RegisterRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        info!("📝 Registering user {}", req.email);

        let method = Method::Post;
        let tracing_ctx = self.tracer.start_tracing(
            "Register",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("user.email", req.email.clone()),
            ],
        );

        match self.users.find_by_email(&req.email).await {
            Ok(Some(_)) => {
                error!("❌ Email already registered: {}", req.email);
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, EMAIL_TAKEN);
                return Err(RepositoryError::AlreadyExists(EMAIL_TAKEN.into()).into());
            }
            Ok(None) => {}
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                return Err(ServiceError::Repo(err));
            }
        }

        let password_hash = match self.hash.hash_password(&req.password).await {
            Ok(hash) => hash,
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to hash password");
                return Err(err);
            }
        };

        let user = match self.users.create_user(req, &password_hash).await {
            Ok(user) => user,
            Err(RepositoryError::AlreadyExists(_)) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, EMAIL_TAKEN);
                return Err(RepositoryError::AlreadyExists(EMAIL_TAKEN.into()).into());
            }
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to create user");
                return Err(ServiceError::Repo(err));
            }
        };

        self.tracer
            .complete_tracing_success(&tracing_ctx, method, "User registered");

        Ok(ApiResponse::success(
            "User registered successfully!",
            UserResponse::from(user),
        ))
    }

    async fn login(&self, req: &LoginRequest) -> Result<ApiResponse<LoginResponse>, ServiceError> {
        info!("🔐 Attempting login for email: {}", req.email);

        let method = Method::Post;
        let tracing_ctx = self.tracer.start_tracing(
            "Login",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("user.email", req.email.clone()),
            ],
        );

        let user = match self.users.find_by_email(&req.email).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                error!("❌ User not found: {}", req.email);
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "User not found");
                return Err(ServiceError::not_found("User not found"));
            }
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Database error");
                return Err(ServiceError::Repo(err));
            }
        };

        if let Err(err) = self
            .hash
            .compare_password(&user.password_hash, &req.password)
            .await
        {
            error!("❌ Invalid password for user: {}", req.email);
            self.tracer
                .complete_tracing_error(&tracing_ctx, method, "Invalid password");
            return Err(err);
        }

        let token = match self
            .jwt
            .generate_token(user.user_id, &user.email, &user.role)
        {
            Ok(token) => token,
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to sign token");
                return Err(err);
            }
        };

        self.tracer
            .complete_tracing_success(&tracing_ctx, method, "Login successful");

        Ok(ApiResponse::success(
            "Login successful",
            LoginResponse {
                token,
                user: UserResponse::from(user),
            },
        ))
    }

    async fn get_me(&self, user_id: i32) -> Result<ApiResponse<UserResponse>, ServiceError> {
        info!("👤 Fetching profile for user ID {user_id}");

        let method = Method::Get;
        let tracing_ctx = self.tracer.start_tracing(
            "GetMe",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("user.id", user_id.to_string()),
            ],
        );

        match self.users.find_by_id(user_id).await {
            Ok(Some(user)) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Profile retrieved");
                Ok(ApiResponse::success(
                    "User retrieved successfully",
                    UserResponse::from(user),
                ))
            }
            Ok(None) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "User not found");
                Err(ServiceError::not_found("User not found"))
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
        abstract_trait::JwtServiceTrait,
        config::{Hashing, JwtConfig},
        testing::{InMemoryStore, registry},
    };

    async fn service(store: Arc<InMemoryStore>) -> (AuthService, DynJwtService) {
        let jwt: DynJwtService = Arc::new(JwtConfig::new("test-secret"));
        let service = AuthService::new(AuthServiceDeps {
            users: store,
            hash: Arc::new(Hashing::with_cost(4)),
            jwt: jwt.clone(),
            registry: registry(),
        })
        .await;
        (service, jwt)
    }

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            full_name: "Jane Wanjiku".into(),
            email: email.into(),
            phone: Some("+254700000000".into()),
            role: "Farmer".into(),
            password: "secret1".into(),
        }
    }

    #[tokio::test]
    async fn register_then_login_issues_token_for_user() {
        let (service, jwt) = service(InMemoryStore::new()).await;

        let registered = service
            .register(&register_request("jane@farm.test"))
            .await
            .unwrap();
        assert_eq!(registered.message, "User registered successfully!");
        assert_eq!(registered.data.role, "farmer");

        let login = service
            .login(&LoginRequest {
                email: "jane@farm.test".into(),
                password: "secret1".into(),
            })
            .await
            .unwrap();

        assert_eq!(login.message, "Login successful");
        let claims = jwt.verify_token(&login.data.token).unwrap();
        assert_eq!(claims.user_id, registered.data.id);
        assert_eq!(claims.role, "farmer");
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let (service, _) = service(InMemoryStore::new()).await;
        service
            .register(&register_request("dup@farm.test"))
            .await
            .unwrap();

        let err = service
            .register(&register_request("dup@farm.test"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Repo(RepositoryError::AlreadyExists(ref msg)) if msg == EMAIL_TAKEN
        ));
    }

    #[tokio::test]
    async fn login_distinguishes_unknown_user_from_bad_password() {
        let (service, _) = service(InMemoryStore::new()).await;
        service
            .register(&register_request("jane@farm.test"))
            .await
            .unwrap();

        let unknown = service
            .login(&LoginRequest {
                email: "nobody@farm.test".into(),
                password: "secret1".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(unknown, ServiceError::NotFound(ref m) if m == "User not found"));

        let wrong = service
            .login(&LoginRequest {
                email: "jane@farm.test".into(),
                password: "wrong-password".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(wrong, ServiceError::InvalidCredentials));
    }

    #[tokio::test]
    async fn get_me_returns_profile_or_not_found() {
        let store = InMemoryStore::new();
        let user = store.seed_user("Otieno", "otieno@farm.test", "buyer");
        let (service, _) = service(store).await;

        let me = service.get_me(user.user_id).await.unwrap();
        assert_eq!(me.data.email, "otieno@farm.test");

        let missing = service.get_me(999).await.unwrap_err();
        assert!(matches!(missing, ServiceError::NotFound(_)));
    }
}
