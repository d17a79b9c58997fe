//! Endpoint groups.
//!
//! Thin wrappers over [`ApiClient`] organizing the starter kit's REST
//! surface by concern. Payloads and responses stay as raw JSON values;
//! typed models are the host application's business.

use serde_json::{json, Value};
use url::Url;

use crate::client::ApiClient;
use crate::error::ApiError;

/// Append query parameters to a path.
fn with_query(path: String, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return path;
    }
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();
    format!("{path}?{query}")
}

impl ApiClient {
    pub fn auth(&self) -> AuthEndpoints<'_> {
        AuthEndpoints { client: self }
    }

    pub fn users(&self, company_id: &str) -> UserEndpoints<'_> {
        UserEndpoints {
            client: self,
            company_id: company_id.to_string(),
        }
    }

    pub fn companies(&self) -> CompanyEndpoints<'_> {
        CompanyEndpoints { client: self }
    }

    pub fn permissions(&self) -> PermissionEndpoints<'_> {
        PermissionEndpoints { client: self }
    }

    pub fn health(&self) -> HealthEndpoints<'_> {
        HealthEndpoints { client: self }
    }
}

/// Authentication endpoints.
pub struct AuthEndpoints<'a> {
    client: &'a ApiClient,
}

impl AuthEndpoints<'_> {
    pub async fn login(&self, body: Value) -> Result<Value, ApiError> {
        self.client.post("/auth/login", body).await
    }

    pub async fn register(&self, body: Value) -> Result<Value, ApiError> {
        self.client.post("/auth/register", body).await
    }

    pub async fn logout(&self) -> Result<Value, ApiError> {
        self.client.post_empty("/auth/logout").await
    }

    pub async fn me(&self) -> Result<Value, ApiError> {
        self.client.get("/auth/me").await
    }

    pub async fn change_password(&self, body: Value) -> Result<Value, ApiError> {
        self.client.put("/auth/change-password", body).await
    }

    pub async fn forgot_password(&self, email: &str) -> Result<Value, ApiError> {
        self.client
            .post("/auth/forgot-password", json!({ "email": email }))
            .await
    }

    pub async fn reset_password(&self, body: Value) -> Result<Value, ApiError> {
        self.client.post("/auth/reset-password", body).await
    }
}

/// User endpoints, scoped to a company.
pub struct UserEndpoints<'a> {
    client: &'a ApiClient,
    company_id: String,
}

impl UserEndpoints<'_> {
    fn path(&self, suffix: &str) -> String {
        format!("/companies/{}/users{suffix}", self.company_id)
    }

    pub async fn list(&self, params: &[(&str, &str)]) -> Result<Value, ApiError> {
        self.client.get(&with_query(self.path(""), params)).await
    }

    pub async fn get(&self, user_id: &str) -> Result<Value, ApiError> {
        self.client.get(&self.path(&format!("/{user_id}"))).await
    }

    pub async fn create(&self, body: Value) -> Result<Value, ApiError> {
        self.client.post(&self.path(""), body).await
    }

    pub async fn update(&self, user_id: &str, body: Value) -> Result<Value, ApiError> {
        self.client
            .put(&self.path(&format!("/{user_id}")), body)
            .await
    }

    pub async fn delete(&self, user_id: &str) -> Result<Value, ApiError> {
        self.client.delete(&self.path(&format!("/{user_id}"))).await
    }

    pub async fn update_role(&self, user_id: &str, role: &str) -> Result<Value, ApiError> {
        self.client
            .put(
                &self.path(&format!("/{user_id}/role")),
                json!({ "role": role }),
            )
            .await
    }
}

/// Company endpoints.
pub struct CompanyEndpoints<'a> {
    client: &'a ApiClient,
}

impl CompanyEndpoints<'_> {
    pub async fn list(&self, params: &[(&str, &str)]) -> Result<Value, ApiError> {
        self.client
            .get(&with_query("/companies".to_string(), params))
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Value, ApiError> {
        self.client.get(&format!("/companies/{id}")).await
    }

    pub async fn create(&self, body: Value) -> Result<Value, ApiError> {
        self.client.post("/companies", body).await
    }

    pub async fn update(&self, id: &str, body: Value) -> Result<Value, ApiError> {
        self.client.put(&format!("/companies/{id}"), body).await
    }

    pub async fn delete(&self, id: &str) -> Result<Value, ApiError> {
        self.client.delete(&format!("/companies/{id}")).await
    }

    pub async fn select(&self, id: &str) -> Result<Value, ApiError> {
        self.client
            .post_empty(&format!("/companies/select/{id}"))
            .await
    }
}

/// Permission endpoints.
pub struct PermissionEndpoints<'a> {
    client: &'a ApiClient,
}

impl PermissionEndpoints<'_> {
    pub async fn list(&self) -> Result<Value, ApiError> {
        self.client.get("/permissions").await
    }

    pub async fn by_role(&self, role: &str) -> Result<Value, ApiError> {
        self.client.get(&format!("/permissions/role/{role}")).await
    }

    pub async fn check(&self, body: Value) -> Result<Value, ApiError> {
        self.client.post("/permissions/check", body).await
    }
}

/// Health endpoints.
pub struct HealthEndpoints<'a> {
    client: &'a ApiClient,
}

impl HealthEndpoints<'_> {
    pub async fn check(&self) -> Result<Value, ApiError> {
        self.client.get("/health").await
    }

    /// Readiness probe at the host root, outside the API base path and
    /// without authentication.
    pub async fn ready(&self) -> Result<Value, ApiError> {
        let base = Url::parse(self.client.base_url())
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        let ready_url = base
            .join("/ready")
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))?;

        let response = self
            .client
            .http_client()
            .get(ready_url)
            .send()
            .await
            .map_err(ApiError::Network)?;
        let status = response.status();
        let body: Option<Value> = response.json().await.ok();

        if status.is_success() {
            Ok(body.unwrap_or(Value::Null))
        } else {
            Err(ApiError::Http {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Not ready").to_string(),
                body,
            })
        }
    }
}
